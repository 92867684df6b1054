mod analysis;
mod fda;
mod lookup;
mod medicine_info;
mod suggestions;

pub use analysis::{MedicineAnalysis, SafetyLevel, analysis_for};
pub use fda::{AdverseEventReport, AdverseEventResponse, AdverseEventSource, LookupError, OpenFdaClient};
pub use lookup::{LookupOutcome, LookupState, MedicineLookup};
pub use medicine_info::{MedicineInfo, REACTIONS_SHOWN, ReactionSummary, format_report_date};
pub use suggestions::{MEDICINE_SUGGESTIONS, suggest};
