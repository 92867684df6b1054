use std::{fmt, str::FromStr};

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;

const TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a medicine name.")]
    EmptyName,
    #[error("Could not parse time \"{0}\". Please use the following format: 13:00")]
    InvalidTime(String),
    #[error("Unknown frequency \"{0}\". Expected one of: once, daily, alternate")]
    InvalidFrequency(String),
    #[error("Please enter a medicine name to search for.")]
    EmptyQuery,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReminderId(String);

impl ReminderId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ReminderId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for ReminderId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ReminderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Once,
    Daily,
    Alternate,
}

impl Frequency {
    pub const ALL: [Frequency; 3] = [Frequency::Once, Frequency::Daily, Frequency::Alternate];

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Once => "once",
            Frequency::Daily => "daily",
            Frequency::Alternate => "alternate",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Frequency::Once => "Once only",
            Frequency::Daily => "Daily",
            Frequency::Alternate => "Every other day",
        }
    }
}

impl FromStr for Frequency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        Frequency::ALL
            .into_iter()
            .find(|frequency| frequency.as_str() == token)
            .ok_or_else(|| ValidationError::InvalidFrequency(token.to_owned()))
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time of day with minute precision, persisted as zero-padded `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReminderTime(NaiveTime);

impl ReminderTime {
    pub fn new(inner: NaiveTime) -> Self {
        let normalized_time = inner
            .with_nanosecond(0)
            .and_then(|time| time.with_second(0))
            .expect("Zero is always a valid second and nanosecond.");
        Self(normalized_time)
    }

    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let text = text.trim();
        // chrono accepts unpadded fields like `8:5`; only zero-padded `HH:MM` is valid here.
        if text.len() != 5 {
            return Err(ValidationError::InvalidTime(text.to_owned()));
        }
        NaiveTime::parse_from_str(text, TIME_FORMAT)
            .map(Self::new)
            .map_err(|_| ValidationError::InvalidTime(text.to_owned()))
    }

    pub fn time(&self) -> &NaiveTime {
        &self.0
    }

    pub fn to_12_hour(&self) -> String {
        self.0.format("%-I:%M %p").to_string()
    }
}

impl fmt::Display for ReminderTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIME_FORMAT))
    }
}

impl Serialize for ReminderTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ReminderTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        ReminderTime::parse(&text).map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ReminderId,
    pub name: String,
    pub time: ReminderTime,
    pub frequency: Frequency,
}

impl Reminder {
    /// Checks the invariants that serde cannot express on its own.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(())
    }
}

/// Raw user input for a reminder, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewReminder {
    pub name: String,
    pub time: String,
    pub frequency: String,
}

impl NewReminder {
    pub fn new(
        name: impl Into<String>,
        time: impl Into<String>,
        frequency: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            time: time.into(),
            frequency: frequency.into(),
        }
    }

    pub fn validate(&self) -> Result<ReminderFields, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let time = ReminderTime::parse(&self.time)?;
        let frequency = self.frequency.parse()?;

        Ok(ReminderFields {
            name: name.to_owned(),
            time,
            frequency,
        })
    }
}

/// Validated reminder fields still waiting for an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderFields {
    pub name: String,
    pub time: ReminderTime,
    pub frequency: Frequency,
}

impl ReminderFields {
    pub fn into_reminder(self, id: ReminderId) -> Reminder {
        Reminder {
            id,
            name: self.name,
            time: self.time,
            frequency: self.frequency,
        }
    }
}
