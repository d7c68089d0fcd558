use log::{debug, info, warn};
use reqwest::Client;
use url::Url;

use crate::auth::Token;
use crate::error::{Result, TriggerError};
use crate::runner::PipelineApi;

use super::types::{PipelineId, PipelineSnapshot, TriggerRequest, TriggeredPipeline};

/// Form field carrying the upstream branch into the triggered pipeline.
pub const SOURCE_BRANCH_VARIABLE: &str = "variables[CLINICAL_REASONING_BRANCH]";

/// GitLab REST client scoped to a single project.
pub struct GitLabClient {
    client: Client,
    api_url: Url,
    project: String,
    trigger_token: Token,
    read_token: Token,
}

impl GitLabClient {
    pub fn new(
        base_url: &str,
        project: &str,
        trigger_token: Token,
        read_token: Token,
    ) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("citrigger/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TriggerError::Config(format!("Failed to create HTTP client: {e}")))?;

        let api_url = Url::parse(base_url)
            .map_err(|e| TriggerError::Config(format!("Invalid base URL: {e}")))?
            .join("api/v4/")
            .map_err(|e| TriggerError::Config(format!("Invalid API base URL: {e}")))?;

        Ok(Self {
            client,
            api_url,
            project: project.to_owned(),
            trigger_token,
            read_token,
        })
    }

    /// Builds `{api}/projects/{project}/{segments..}`, percent-encoding the
    /// project so `group/project` paths address a single segment.
    fn project_endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| TriggerError::Config(format!("Invalid API URL: {}", self.api_url)))?
            .pop_if_empty()
            .push("projects")
            .push(&self.project)
            .extend(segments);
        Ok(url)
    }
}

impl PipelineApi for GitLabClient {
    async fn trigger(&self, request: &TriggerRequest) -> Result<PipelineId> {
        let url = self.project_endpoint(&["trigger", "pipeline"])?;
        debug!("POST {url}");

        let mut form = vec![
            ("token", self.trigger_token.as_str()),
            ("ref", request.target_ref.as_str()),
        ];
        if let Some(source) = &request.source_branch {
            form.push((SOURCE_BRANCH_VARIABLE, source.as_str()));
        }

        let response = self
            .client
            .post(url)
            .form(&form)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;

        // A rejected trigger is only reported; decoding below decides
        // whether the run can go on.
        if !status.is_success() {
            warn!("Trigger request returned HTTP {status}");
            warn!("Response body: {body}");
            warn!("Response headers: {headers:?}");
        }

        let triggered: TriggeredPipeline =
            serde_json::from_str(&body).map_err(|source| TriggerError::MalformedResponse {
                endpoint: "trigger",
                status: status.as_u16(),
                source,
            })?;

        info!("Pipeline {} created (HTTP {status})", triggered.id);
        Ok(triggered.id)
    }

    async fn fetch_pipeline(&self, id: PipelineId) -> Result<PipelineSnapshot> {
        let mut url = self.project_endpoint(&["pipelines", &id.to_string()])?;
        debug!("GET {url}");
        url.query_pairs_mut()
            .append_pair("private_token", self.read_token.as_str());

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(TriggerError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        serde_json::from_str(&body).map_err(|source| TriggerError::MalformedResponse {
            endpoint: "pipeline",
            status: status.as_u16(),
            source,
        })
    }
}
