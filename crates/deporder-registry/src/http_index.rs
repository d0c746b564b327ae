use std::time::Duration;

use anyhow::Context;
use deporder_core::PackageKey;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, trace};

use crate::source::{DependencySource, FetchError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("deporder/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct DependenciesResponse {
    #[serde(default)]
    dependencies: Vec<DependencyRecord>,
}

#[derive(Debug, Deserialize)]
struct DependencyRecord {
    crate_id: String,
    req: String,
}

/// Live registry speaking the `{url}/{package}/{version}/dependencies` JSON
/// endpoint (the crates.io API shape).
#[derive(Debug, Clone)]
pub struct HttpRegistry {
    base_url: String,
    client: Client,
}

impl HttpRegistry {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed building registry http client")?;
        Ok(Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn dependencies_url(&self, key: &PackageKey) -> String {
        format!(
            "{}/{}/{}/dependencies",
            self.base_url,
            key.name(),
            key.version()
        )
    }
}

impl DependencySource for HttpRegistry {
    fn fetch_dependencies(&self, key: &PackageKey) -> Result<Vec<PackageKey>, FetchError> {
        let url = self.dependencies_url(key);
        debug!(%url, "fetching dependencies");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|source| FetchError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|source| FetchError::Request {
            url: url.clone(),
            source,
        })?;
        let payload: DependenciesResponse =
            serde_json::from_str(&body).map_err(|source| FetchError::Payload {
                url: url.clone(),
                source,
            })?;

        trace!(%url, count = payload.dependencies.len(), "decoded dependency payload");
        Ok(payload
            .dependencies
            .into_iter()
            .map(|record| PackageKey::new(record.crate_id, record.req))
            .collect())
    }
}
