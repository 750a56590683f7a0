//! Async HTTP client for the analysis service.
//!
//! Two operations: idempotent project creation and dependency-batch
//! analysis. Project creation returns a structured status distinguishing
//! "created" from "already exists"; callers treat both as success.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::models::PackageDescriptor;

/// Analysis-service operations the driver depends on.
#[async_trait]
pub trait SubmissionApi {
    /// Create the project, or find it if it already exists.
    async fn create_project(&self, name: &str, group: Option<&str>) -> Result<ProjectHandle>;

    /// Submit a dependency batch for analysis; returns the job id.
    async fn analyze(
        &self,
        ecosystem: &str,
        packages: &[PackageDescriptor],
        project: &str,
        group: Option<&str>,
    ) -> Result<String>;
}

/// Result of a project-creation call.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectHandle {
    pub id: String,
    pub status: ProjectStatus,
}

/// Whether the project was newly created or already present. The service's
/// structured status is authoritative; both variants are success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Created,
    Exists,
}

/// [`SubmissionApi`] over the service's REST endpoints.
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        let mut request = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .header(
                "User-Agent",
                concat!("gradle-submitr/", env!("CARGO_PKG_VERSION")),
            );
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request
    }
}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    job_id: String,
}

#[async_trait]
impl SubmissionApi for ApiClient {
    async fn create_project(&self, name: &str, group: Option<&str>) -> Result<ProjectHandle> {
        let response = self
            .post("/projects")
            .json(&json!({
                "name": sanitize_name(name),
                "group": group.map(sanitize_name),
            }))
            .send()
            .await
            .context("project creation request failed")?;

        if !response.status().is_success() {
            bail!("project creation failed with status {}", response.status());
        }

        response
            .json()
            .await
            .context("malformed project creation response")
    }

    async fn analyze(
        &self,
        ecosystem: &str,
        packages: &[PackageDescriptor],
        project: &str,
        group: Option<&str>,
    ) -> Result<String> {
        let response = self
            .post("/analyze")
            .json(&json!({
                "type": ecosystem,
                "packages": packages,
                "project": sanitize_name(project),
                "group": group.map(sanitize_name),
            }))
            .send()
            .await
            .context("analysis request failed")?;

        if !response.status().is_success() {
            bail!(
                "analysis submission failed with status {}",
                response.status()
            );
        }

        let body: AnalyzeResponse = response
            .json()
            .await
            .context("malformed analysis response")?;
        Ok(body.job_id)
    }
}

/// The service rejects names containing separators or shell metacharacters;
/// strip every occurrence, not just the first.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '&' | ';' | ':'))
        .collect()
}
