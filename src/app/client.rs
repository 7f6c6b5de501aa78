use crate::core::demo::{demo_content, demo_response};
use crate::domain::model::{GenerationRequest, GenerationResponse};
use crate::domain::ports::ConceptGenerator;
use crate::utils::error::{Result, StudioError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_DEMO_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientMode {
    Live,
    Demo,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Client of the `/api/generate` endpoint.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    mode: ClientMode,
    demo_delay: Duration,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            mode: ClientMode::Live,
            demo_delay: DEFAULT_DEMO_DELAY,
        }
    }

    /// Client that never leaves the process.
    pub fn demo() -> Self {
        Self {
            mode: ClientMode::Demo,
            ..Self::new(String::new())
        }
    }

    pub fn with_demo_delay(mut self, delay: Duration) -> Self {
        self.demo_delay = delay;
        self
    }

    pub fn mode(&self) -> ClientMode {
        self.mode
    }

    pub async fn generate_concept(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
        let url = format!("{}/api/generate", self.base_url);
        tracing::debug!("POST {} for modules {:?}", url, request.modules);

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(StudioError::ServerError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    /// Waits the demo delay, then completes every module with canned content.
    pub async fn generate_concept_demo(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse> {
        tokio::time::sleep(self.demo_delay).await;
        let execution_id = format!("demo-{}", chrono::Utc::now().timestamp_millis());
        Ok(demo_response(request, execution_id, demo_content))
    }
}

#[async_trait]
impl ConceptGenerator for ApiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
        match self.mode {
            ClientMode::Live => self.generate_concept(request).await,
            ClientMode::Demo => self.generate_concept_demo(request).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ModuleStatus;
    use httpmock::prelude::*;
    use serde_json::json;

    fn request() -> GenerationRequest {
        GenerationRequest::new("A task app", vec!["brainstorm".to_string()])
    }

    #[tokio::test]
    async fn test_generate_concept_success() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/generate")
                .json_body_partial(r#"{"prompt": "A task app", "modules": ["brainstorm"]}"#);
            then.status(200).json_body(json!({
                "success": true,
                "executionId": "exec-1",
                "modules": {"brainstorm": {"status": "completed", "content": "ideas"}}
            }));
        });

        let client = ApiClient::new(server.base_url());
        let response = client.generate_concept(&request()).await.unwrap();

        api_mock.assert();
        assert_eq!(response.execution_id, "exec-1");
        assert_eq!(response.modules["brainstorm"].status, ModuleStatus::Completed);
    }

    #[tokio::test]
    async fn test_generate_concept_surfaces_server_message() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/generate");
            then.status(400)
                .json_body(json!({"error": "At least one module must be selected"}));
        });

        let client = ApiClient::new(server.base_url());
        let err = client.generate_concept(&request()).await.unwrap_err();

        assert_eq!(err.to_string(), "At least one module must be selected");
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_generate_concept_defaults_to_http_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/generate");
            then.status(502).body("bad gateway");
        });

        let client = ApiClient::new(server.base_url());
        let err = client.generate_concept(&request()).await.unwrap_err();

        assert_eq!(err.to_string(), "HTTP 502");
    }

    #[tokio::test]
    async fn test_demo_mode_completes_every_module() {
        let client = ApiClient::demo().with_demo_delay(Duration::from_millis(1));
        let request = GenerationRequest::new(
            "A task app",
            vec!["brainstorm".to_string(), "code_scripts".to_string()],
        );

        let response = client.generate(&request).await.unwrap();

        assert!(response.success);
        assert!(response.execution_id.starts_with("demo-"));
        assert_eq!(response.modules.len(), 2);
        assert!(response
            .modules
            .values()
            .all(|r| r.status == ModuleStatus::Completed));
        assert_eq!(
            response.modules["brainstorm"].content_text(),
            demo_content("brainstorm", "A task app")
        );
    }
}
