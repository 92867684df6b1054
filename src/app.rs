use medguide_lookup::{AdverseEventSource, MedicineLookup, OpenFdaClient};
use medguide_models::settings::Settings;
use medguide_storage::{FileSnapshotSlot, InMemorySnapshotSlot, ReminderStore, SnapshotSlot};

/// Top-level owner of the reminder store and the medicine lookup.
pub struct App<S> {
    store: ReminderStore,
    lookup: MedicineLookup<S>,
}

impl App<OpenFdaClient> {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let slot: Box<dyn SnapshotSlot> = if settings.storage.ephemeral {
            log::warn!("Ephemeral storage enabled, reminders will not survive a restart");
            Box::new(InMemorySnapshotSlot::new())
        } else {
            let slot =
                FileSnapshotSlot::new(&settings.storage.data_dir, &settings.storage.snapshot_key);
            log::info!("Persisting reminders to {}", slot.path().display());
            Box::new(slot)
        };

        let client = OpenFdaClient::new(&settings.lookup)?;

        Ok(Self::init(slot, client))
    }
}

impl<S: AdverseEventSource> App<S> {
    pub fn init(slot: Box<dyn SnapshotSlot>, source: S) -> Self {
        Self {
            store: ReminderStore::init(slot),
            lookup: MedicineLookup::new(source),
        }
    }

    pub fn store(&self) -> &ReminderStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ReminderStore {
        &mut self.store
    }

    pub fn lookup(&self) -> &MedicineLookup<S> {
        &self.lookup
    }

    pub fn dispose(self) {
        let reminders = self.store.list().len();
        self.store.dispose();
        log::info!("Shut down with {} reminders saved", reminders);
    }
}
