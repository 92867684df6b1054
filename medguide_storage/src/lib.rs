mod reminder_store;
mod slot;

pub use reminder_store::{
    PersistenceWarning, ReminderStore, SnapshotError, SnapshotOperation, parse_snapshot,
    serialize_snapshot,
};
pub use slot::{FileSnapshotSlot, InMemorySnapshotSlot, PersistenceError, SnapshotSlot};
