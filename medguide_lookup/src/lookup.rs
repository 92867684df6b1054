use std::sync::{Mutex, MutexGuard};

use medguide_models::reminder::ValidationError;

use crate::{fda::AdverseEventSource, medicine_info::MedicineInfo};

const FAILED_MESSAGE: &str = "Failed to fetch medicine information. Please try again.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LookupState {
    #[default]
    Idle,
    Loading {
        query: String,
    },
    Found(MedicineInfo),
    NotFound {
        query: String,
    },
    Failed {
        query: String,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Applied(LookupState),
    /// A newer search was issued while this one was in flight.
    Discarded,
}

struct LookupInner {
    latest_tag: u64,
    state: LookupState,
}

/// Visible lookup state. Only the most recently issued search may change it.
pub struct MedicineLookup<S> {
    source: S,
    inner: Mutex<LookupInner>,
}

impl<S: AdverseEventSource> MedicineLookup<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            inner: Mutex::new(LookupInner {
                latest_tag: 0,
                state: LookupState::Idle,
            }),
        }
    }

    pub fn state(&self) -> LookupState {
        self.lock().state.clone()
    }

    pub async fn search(&self, query: &str) -> Result<LookupOutcome, ValidationError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ValidationError::EmptyQuery);
        }

        let tag = self.begin(query);
        log::info!("Lookup #{} started for {}", tag, query);

        let state = match self.source.fetch_latest(query).await {
            Ok(Some(report)) => LookupState::Found(MedicineInfo::from_report(query, &report)),
            Ok(None) => LookupState::NotFound {
                query: query.to_owned(),
            },
            Err(error) => {
                log::error!("Lookup #{} for {} failed: {}", tag, query, error);
                LookupState::Failed {
                    query: query.to_owned(),
                    message: FAILED_MESSAGE.to_owned(),
                }
            }
        };

        Ok(self.complete(tag, state))
    }

    fn begin(&self, query: &str) -> u64 {
        let mut inner = self.lock();
        inner.latest_tag += 1;
        inner.state = LookupState::Loading {
            query: query.to_owned(),
        };
        inner.latest_tag
    }

    fn complete(&self, tag: u64, state: LookupState) -> LookupOutcome {
        let mut inner = self.lock();
        if inner.latest_tag != tag {
            log::debug!(
                "Discarding lookup #{}, latest is #{}",
                tag,
                inner.latest_tag
            );
            return LookupOutcome::Discarded;
        }

        inner.state = state.clone();
        LookupOutcome::Applied(state)
    }

    fn lock(&self) -> MutexGuard<'_, LookupInner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
