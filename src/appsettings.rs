use config::{Config, ConfigError, Environment, File};
use medguide_models::settings::Settings;

pub fn load() -> Result<Settings, ConfigError> {
    let settings = Config::builder()
        .set_default("storage.data_dir", ".medguide")?
        .set_default("storage.snapshot_key", "medguide-medicines")?
        .set_default("storage.ephemeral", false)?
        .set_default("lookup.base_url", "https://api.fda.gov")?
        .set_default("lookup.timeout_secs", 15)?
        .add_source(File::with_name("appsettings").required(true))
        .add_source(File::with_name("appsettings.local").required(false))
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
