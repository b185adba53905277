use std::fmt;

use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::AppConfig;
use crate::error::ApiError;

pub const OPTIONS_PATH: &str = "/api/options";
pub const ANALYZE_PATH: &str = "/api/analyze";
pub const RECOMMEND_PATH: &str = "/api/recommend";

// -- Selectable entities --

/// Opaque identifier of a curriculum or job role.
///
/// Keeps the JSON form it arrived in so it is sent back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionId {
    Number(i64),
    Text(String),
}

impl OptionId {
    fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(OptionId::Number),
            Value::String(s) if !s.trim().is_empty() => Some(OptionId::Text(s)),
            _ => None,
        }
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionId::Number(n) => write!(f, "{}", n),
            OptionId::Text(s) => f.write_str(s),
        }
    }
}

/// A selectable curriculum or job role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: OptionId,
    pub label: String,
}

impl Choice {
    pub fn new(id: impl Into<OptionId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

impl From<i64> for OptionId {
    fn from(n: i64) -> Self {
        OptionId::Number(n)
    }
}

impl From<&str> for OptionId {
    fn from(s: &str) -> Self {
        OptionId::Text(s.to_string())
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawChoice {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    label: Option<String>,
}

impl RawChoice {
    fn into_choice(self) -> Option<Choice> {
        let id = self.id.and_then(OptionId::from_json)?;
        let label = self.label.filter(|l| !l.trim().is_empty())?;
        Some(Choice { id, label })
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawOptions {
    #[serde(default)]
    curricula: Vec<RawChoice>,
    #[serde(default)]
    jobs: Vec<RawChoice>,
}

/// Curricula and job roles offered by the backend, already filtered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogOptions {
    pub programs: Vec<Choice>,
    pub careers: Vec<Choice>,
}

impl From<RawOptions> for CatalogOptions {
    fn from(raw: RawOptions) -> Self {
        Self {
            programs: raw.curricula.into_iter().filter_map(RawChoice::into_choice).collect(),
            careers: raw.jobs.into_iter().filter_map(RawChoice::into_choice).collect(),
        }
    }
}

// -- Analysis payloads --

/// A percentage figure computed server-side.
///
/// The backend sends these either as numbers (`75`) or formatted strings
/// (`"75.0%"`); both decode to the same value.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
#[serde(transparent)]
pub struct Percent(pub f64);

impl Percent {
    /// Value bounded to 0..=100 for drawing.
    pub fn clamped(self) -> f64 {
        if self.0.is_nan() {
            0.0
        } else {
            self.0.clamp(0.0, 100.0)
        }
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = (self.0 * 10.0).round() / 10.0;
        if rounded.fract() == 0.0 {
            write!(f, "{:.0}%", rounded)
        } else {
            write!(f, "{:.1}%", rounded)
        }
    }
}

impl<'de> Deserialize<'de> for Percent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Ok(Percent(n)),
            Repr::Text(s) => parse_percent(&s)
                .map(Percent)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid percentage '{}'", s))),
        }
    }
}

fn parse_percent(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    number.parse::<f64>().ok()
}

/// Skill-gap report for one curriculum/job pair.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(default)]
    pub matching_skills: u32,
    #[serde(default)]
    pub missing_skills: u32,
    #[serde(default)]
    pub coverage: Percent,
    #[serde(default, alias = "alignment")]
    pub relevance: Percent,
    /// Matched skill names, in backend order.
    #[serde(default, alias = "covered")]
    pub exact: Vec<String>,
    /// Skills required by the role but absent from the curriculum.
    #[serde(default)]
    pub gaps: Vec<String>,
    #[serde(default)]
    pub irrelevant_skills: u32,
}

impl AnalysisResult {
    /// Number of skills the target role asks for.
    pub fn total_skills(&self) -> u64 {
        u64::from(self.matching_skills) + u64::from(self.missing_skills)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzeRequest {
    pub curriculum_id: OptionId,
    pub job_id: OptionId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendRequest {
    pub job_title: String,
    pub curriculum_title: String,
    pub missing_skills: Vec<String>,
    pub coverage_score: Percent,
}

#[derive(Debug, Deserialize)]
struct RecommendResponse {
    recommendation: String,
}

// -- Backend seam --

/// The three backend calls the dashboard makes.
#[allow(async_fn_in_trait)]
pub trait SkillGapApi {
    async fn fetch_options(&self) -> Result<CatalogOptions, ApiError>;

    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisResult, ApiError>;

    /// Returns the markdown recommendation text.
    async fn recommend(&self, request: &RecommendRequest) -> Result<String, ApiError>;
}

/// `SkillGapApi` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    config: AppConfig,
}

impl HttpApi {
    pub fn new(config: AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        check_response(status, &content_type)?;

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl SkillGapApi for HttpApi {
    async fn fetch_options(&self) -> Result<CatalogOptions, ApiError> {
        let url = self.config.endpoint(OPTIONS_PATH);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        let raw: RawOptions = Self::read_json(response).await?;
        Ok(raw.into())
    }

    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisResult, ApiError> {
        let url = self.config.endpoint(ANALYZE_PATH);
        debug!("POST {}", url);
        let response = self.client.post(&url).json(request).send().await?;
        Self::read_json(response).await
    }

    async fn recommend(&self, request: &RecommendRequest) -> Result<String, ApiError> {
        let url = self.config.endpoint(RECOMMEND_PATH);
        debug!("POST {}", url);
        let response = self.client.post(&url).json(request).send().await?;
        let body: RecommendResponse = Self::read_json(response).await?;
        Ok(body.recommendation)
    }
}

/// Accept a response only when it succeeded and carries JSON.
pub fn check_response(status: u16, content_type: &str) -> Result<(), ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::Status { status });
    }
    if !is_json_content_type(content_type) {
        return Err(ApiError::NotJson {
            content_type: content_type.to_string(),
        });
    }
    Ok(())
}

fn is_json_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || mime.ends_with("+json")
}
