
use std::{collections::HashSet, fmt};

use medguide_models::reminder::{NewReminder, Reminder, ReminderId, ValidationError};
use thiserror::Error;

use crate::slot::{PersistenceError, SnapshotSlot};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot is not a list of reminders: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("reminder {id} in snapshot is invalid: {source}")]
    InvalidReminder {
        id: ReminderId,
        source: ValidationError,
    },
    #[error("reminder id {0} appears more than once in snapshot")]
    DuplicateId(ReminderId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOperation {
    Load,
    Save,
}

/// Non-fatal persistence failure. The in-memory list stays authoritative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceWarning {
    pub operation: SnapshotOperation,
    pub message: String,
}

impl PersistenceWarning {
    fn new(operation: SnapshotOperation, error: impl fmt::Display) -> Self {
        Self {
            operation,
            message: error.to_string(),
        }
    }
}

impl fmt::Display for PersistenceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operation {
            SnapshotOperation::Load => write!(
                f,
                "Could not load saved reminders ({}). Starting with an empty list.",
                self.message
            ),
            SnapshotOperation::Save => write!(
                f,
                "Could not save reminders ({}). Changes are kept for this session only.",
                self.message
            ),
        }
    }
}

pub fn serialize_snapshot(reminders: &[Reminder]) -> Result<String, serde_json::Error> {
    serde_json::to_string(reminders)
}

pub fn parse_snapshot(snapshot: &str) -> Result<Vec<Reminder>, SnapshotError> {
    let reminders: Vec<Reminder> = serde_json::from_str(snapshot)?;

    let mut seen = HashSet::with_capacity(reminders.len());
    for reminder in &reminders {
        reminder
            .validate()
            .map_err(|source| SnapshotError::InvalidReminder {
                id: reminder.id.clone(),
                source,
            })?;
        if !seen.insert(&reminder.id) {
            return Err(SnapshotError::DuplicateId(reminder.id.clone()));
        }
    }

    Ok(reminders)
}

/// Owns the session's reminders and mirrors every change into a snapshot slot.
pub struct ReminderStore {
    slot: Box<dyn SnapshotSlot>,
    reminders: Vec<Reminder>,
    warnings: Vec<PersistenceWarning>,
    /// Set while the slot lags behind `reminders` after a failed save.
    unsaved: bool,
}

impl ReminderStore {
    pub fn init(slot: Box<dyn SnapshotSlot>) -> Self {
        let mut store = Self {
            slot,
            reminders: Vec::new(),
            warnings: Vec::new(),
            unsaved: false,
        };
        store.reminders = store.load();
        log::info!("Loaded {} reminders", store.reminders.len());
        store
    }

    /// Reads the persisted snapshot. Anything unreadable yields an empty list and a warning.
    pub fn load(&mut self) -> Vec<Reminder> {
        let snapshot = match self.slot.read() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return Vec::new(),
            Err(error) => {
                self.warn(SnapshotOperation::Load, error);
                return Vec::new();
            }
        };

        match parse_snapshot(&snapshot) {
            Ok(reminders) => reminders,
            Err(error) => {
                self.warn(SnapshotOperation::Load, error);
                Vec::new()
            }
        }
    }

    pub fn add(&mut self, candidate: &NewReminder) -> Result<Reminder, ValidationError> {
        let fields = candidate.validate()?;
        let reminder = fields.into_reminder(self.fresh_id());

        self.reminders.push(reminder.clone());
        log::info!("Added reminder {} for {}", reminder.id, reminder.name);
        self.save();

        Ok(reminder)
    }

    /// Removes the reminder with the given id, if any. Absent ids are a no-op.
    pub fn delete(&mut self, id: &ReminderId) -> Option<Reminder> {
        let removed = self
            .reminders
            .iter()
            .position(|reminder| &reminder.id == id)
            .map(|index| self.reminders.remove(index));

        match &removed {
            Some(reminder) => log::info!("Deleted reminder {} for {}", reminder.id, reminder.name),
            None => log::debug!("No reminder with id {} to delete", id),
        }
        self.save();

        removed
    }

    pub fn list(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn warnings(&self) -> &[PersistenceWarning] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<PersistenceWarning> {
        std::mem::take(&mut self.warnings)
    }

    /// Retries a failed save, if any, and hands the slot back.
    /// An untouched session never writes, so an unreadable snapshot is left as is.
    pub fn dispose(mut self) -> Box<dyn SnapshotSlot> {
        if self.unsaved {
            self.save();
        }
        for warning in self.warnings.drain(..) {
            log::warn!("Unreported persistence warning at shutdown: {}", warning);
        }
        self.slot
    }

    fn fresh_id(&self) -> ReminderId {
        loop {
            let id = ReminderId::generate();
            if !self.reminders.iter().any(|reminder| reminder.id == id) {
                return id;
            }
        }
    }

    fn save(&mut self) {
        let result = serialize_snapshot(&self.reminders)
            .map_err(|error| PersistenceError::Unavailable(error.to_string()))
            .and_then(|snapshot| self.slot.write(&snapshot));

        self.unsaved = result.is_err();
        if let Err(error) = result {
            self.warn(SnapshotOperation::Save, error);
        }
    }

    fn warn(&mut self, operation: SnapshotOperation, error: impl fmt::Display) {
        let warning = PersistenceWarning::new(operation, error);
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }
}
