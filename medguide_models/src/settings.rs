use std::path::PathBuf;

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct StorageSettings {
    pub data_dir: PathBuf,
    pub snapshot_key: String,
    /// Keep reminders in memory only, nothing is written to disk.
    #[serde(default)]
    pub ephemeral: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LookupSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    pub storage: StorageSettings,
    pub lookup: LookupSettings,
}
