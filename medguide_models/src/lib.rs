pub mod reminder;
pub mod settings;

pub use chrono;
