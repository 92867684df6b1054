use std::time::Duration;

use async_trait::async_trait;
use medguide_models::settings::LookupSettings;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("could not reach the medicine information service: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("medicine information service responded with status {0}")]
    Status(u16),
    #[error("medicine information response could not be read: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdverseEventResponse {
    #[serde(default)]
    pub results: Vec<AdverseEventReport>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdverseEventReport {
    #[serde(default)]
    pub patient: Option<Patient>,
    #[serde(default)]
    pub serious: Option<serde_json::Value>,
    #[serde(default)]
    pub receivedate: Option<String>,
    #[serde(default)]
    pub primarysourcecountry: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Patient {
    #[serde(default)]
    pub drug: Vec<Drug>,
    #[serde(default)]
    pub reaction: Vec<Reaction>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Drug {
    #[serde(default)]
    pub medicinalproduct: Option<String>,
    #[serde(default)]
    pub openfda: Option<OpenFdaFields>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenFdaFields {
    #[serde(default)]
    pub manufacturer_name: Vec<String>,
    #[serde(default)]
    pub brand_name: Vec<String>,
    #[serde(default)]
    pub generic_name: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Reaction {
    #[serde(default)]
    pub reactionmeddrapt: Option<String>,
}

impl AdverseEventReport {
    pub fn first_drug(&self) -> Option<&Drug> {
        self.patient.as_ref().and_then(|patient| patient.drug.first())
    }

    /// OpenFDA encodes seriousness as `1` (serious) or `2`, sometimes quoted.
    pub fn is_serious(&self) -> bool {
        match &self.serious {
            Some(serde_json::Value::String(flag)) => flag == "1",
            Some(serde_json::Value::Number(flag)) => flag.as_u64() == Some(1),
            _ => false,
        }
    }
}

#[async_trait]
pub trait AdverseEventSource: Send + Sync {
    /// Returns the most relevant report for `medicine`, or `None` when nothing matches.
    async fn fetch_latest(&self, medicine: &str)
    -> Result<Option<AdverseEventReport>, LookupError>;
}

pub struct OpenFdaClient {
    client: reqwest::Client,
    base_url: String,
}

impl OpenFdaClient {
    pub fn new(settings: &LookupSettings) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(concat!("medguide/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn event_url(&self) -> String {
        format!("{}/drug/event.json", self.base_url)
    }
}

pub(crate) fn search_expression(medicine: &str) -> String {
    let medicine: String = medicine.chars().filter(|c| *c != '"').collect();
    format!("patient.drug.medicinalproduct:\"{}\"", medicine.trim())
}

/// OpenFDA answers a search without matches with 404.
pub(crate) fn has_results(status: StatusCode) -> Result<bool, LookupError> {
    if status == StatusCode::NOT_FOUND {
        Ok(false)
    } else if status.is_success() {
        Ok(true)
    } else {
        Err(LookupError::Status(status.as_u16()))
    }
}

pub(crate) fn parse_response(body: &str) -> Result<Option<AdverseEventReport>, LookupError> {
    let response: AdverseEventResponse = serde_json::from_str(body)?;
    Ok(response.results.into_iter().next())
}

#[async_trait]
impl AdverseEventSource for OpenFdaClient {
    async fn fetch_latest(
        &self,
        medicine: &str,
    ) -> Result<Option<AdverseEventReport>, LookupError> {
        let search = search_expression(medicine);
        log::debug!("Requesting adverse events with search {}", search);

        let response = self
            .client
            .get(self.event_url())
            .query(&[("search", search.as_str()), ("limit", "1")])
            .send()
            .await?;

        if !has_results(response.status())? {
            return Ok(None);
        }

        let body = response.text().await?;
        parse_response(&body)
    }
}
