//! Application configuration, resolved once when the bundle starts.
//!
//! The dashboard runs in the browser, so "environment" means the build
//! environment: `SKILLGAP_API_URL` and `SKILLGAP_LOG` are captured by
//! `option_env!` when the WASM bundle is compiled.

use tracing::warn;
use url::Url;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend base address without a trailing slash.
    pub api_base: String,
    pub log_filter: String,
}

impl AppConfig {
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("SKILLGAP_API_URL"), option_env!("SKILLGAP_LOG"))
    }

    pub fn from_values(api_base: Option<&str>, log_filter: Option<&str>) -> Self {
        let api_base = match api_base.map(str::trim).filter(|v| !v.is_empty()) {
            Some(raw) => match normalize_base(raw) {
                Ok(base) => base,
                Err(e) => {
                    warn!("Ignoring API base '{}': {}", raw, e);
                    DEFAULT_API_BASE.to_string()
                }
            },
            None => DEFAULT_API_BASE.to_string(),
        };

        Self {
            api_base,
            log_filter: resolve_log_filter(log_filter),
        }
    }

    /// Absolute URL for an API path such as `/api/analyze`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}

/// Log filter from the build environment.
///
/// Resolved on its own so the subscriber can be installed before the rest
/// of the configuration, whose fallbacks are logged.
pub fn build_log_filter() -> String {
    resolve_log_filter(option_env!("SKILLGAP_LOG"))
}

fn resolve_log_filter(raw: Option<&str>) -> String {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_LOG_FILTER)
        .to_string()
}

fn normalize_base(raw: &str) -> Result<String, String> {
    let parsed = Url::parse(raw).map_err(|e| e.to_string())?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(format!("unsupported scheme '{}'", other)),
    }
    Ok(raw.trim_end_matches('/').to_string())
}
