use concept_studio::config::{PollingConfig, Strategy};
use concept_studio::domain::model::{GenerationRequest, ModuleStatus};
use concept_studio::{GenerationProxy, HttpAgentBackend, StudioConfig, StudioError};
use httpmock::prelude::*;
use serde_json::json;

fn per_module_config(server: &MockServer) -> StudioConfig {
    let mut config = StudioConfig::default();
    config.backend.base_url = server.base_url();
    config.backend.api_key = "test-key".to_string();
    config
        .backend
        .agents
        .insert("brainstorm".to_string(), "agent-brainstorm".to_string());
    config
        .backend
        .agents
        .insert("mockups".to_string(), "agent-mockups".to_string());
    config
}

fn graph_config(server: &MockServer, max_attempts: u32) -> StudioConfig {
    let mut config = StudioConfig::default();
    config.backend.base_url = server.base_url();
    config.backend.api_key = "test-key".to_string();
    config.backend.graph_id = Some("graph-1".to_string());
    config.generation.strategy = Strategy::Graph;
    config.polling = PollingConfig {
        interval_ms: 1,
        max_attempts,
    };
    config
}

fn proxy(config: StudioConfig) -> GenerationProxy<HttpAgentBackend> {
    let backend = HttpAgentBackend::from_config(&config).unwrap();
    GenerationProxy::new(config, backend)
}

#[tokio::test]
async fn test_per_module_failures_stay_isolated() {
    let server = MockServer::start();
    let brainstorm_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/agents/agent-brainstorm/execute")
            .header("Authorization", "Bearer test-key")
            .json_body_partial(
                r#"{"input": {"prompt": "A task app", "module": "brainstorm", "style": "Professional"}}"#,
            );
        then.status(200)
            .json_body(json!({"output": "# Ideas\n- one\n- two"}));
    });
    let mockups_mock = server.mock(|when, then| {
        when.method(POST).path("/api/v1/agents/agent-mockups/execute");
        then.status(500).body("agent crashed");
    });

    let request = GenerationRequest::new(
        "A task app",
        vec![
            "brainstorm".to_string(),
            "mockups".to_string(),
            "branding".to_string(),
        ],
    );
    let response = proxy(per_module_config(&server)).handle(request).await.unwrap();

    brainstorm_mock.assert();
    mockups_mock.assert();

    assert!(response.success);
    assert!(response.execution_id.starts_with("exec-"));
    assert_eq!(response.message, None);
    assert_eq!(response.modules.len(), 3);

    let brainstorm = &response.modules["brainstorm"];
    assert_eq!(brainstorm.status, ModuleStatus::Completed);
    assert_eq!(brainstorm.content_text(), "# Ideas\n- one\n- two");

    let mockups = &response.modules["mockups"];
    assert_eq!(mockups.status, ModuleStatus::Error);
    assert_eq!(mockups.content_text(), "Agent returned HTTP 500");

    let branding = &response.modules["branding"];
    assert_eq!(branding.status, ModuleStatus::Error);
    assert_eq!(
        branding.content_text(),
        "Agent not configured for module: branding"
    );
}

#[tokio::test]
async fn test_per_module_falls_back_to_result_field() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/v1/agents/agent-brainstorm/execute");
        then.status(200).json_body(json!({"result": "from result"}));
    });

    let request = GenerationRequest::new("A task app", vec!["brainstorm".to_string()]);
    let response = proxy(per_module_config(&server)).handle(request).await.unwrap();

    assert_eq!(response.modules["brainstorm"].content_text(), "from result");
}

#[tokio::test]
async fn test_graph_execution_completes_and_matches_outputs() {
    let server = MockServer::start();
    let start_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/graphs/graph-1/execute")
            .header("X-API-Key", "test-key")
            .json_body_partial(r#"{"prompt": "A task app", "modules": "business_plan,brainstorm"}"#);
        then.status(200).json_body(json!({"id": "exec-42"}));
    });
    let poll_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/graphs/graph-1/executions/exec-42")
            .header("X-API-Key", "test-key");
        then.status(200).json_body(json!({
            "status": "COMPLETED",
            "outputs": {
                "Business_Plan_Output": ["# Plan"],
                "brainstorm_result": "# Ideas"
            }
        }));
    });

    let request = GenerationRequest::new(
        "A task app",
        vec!["business_plan".to_string(), "brainstorm".to_string()],
    );
    let response = proxy(graph_config(&server, 5)).handle(request).await.unwrap();

    start_mock.assert();
    poll_mock.assert();
    assert_eq!(response.execution_id, "exec-42");
    assert_eq!(response.modules["business_plan"].content_text(), "# Plan");
    assert_eq!(response.modules["brainstorm"].content_text(), "# Ideas");
}

#[tokio::test]
async fn test_graph_execution_failure_fails_request() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/graphs/graph-1/execute");
        then.status(200).json_body(json!({"id": "exec-9"}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/graphs/graph-1/executions/exec-9");
        then.status(200)
            .json_body(json!({"status": "FAILED", "outputs": {}}));
    });

    let request = GenerationRequest::new("A task app", vec!["brainstorm".to_string()]);
    let err = proxy(graph_config(&server, 5))
        .handle(request)
        .await
        .unwrap_err();

    assert!(matches!(err, StudioError::UpstreamError { .. }));
    assert_eq!(err.status_code(), 500);
}

#[tokio::test]
async fn test_graph_execution_times_out_after_max_attempts() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/graphs/graph-1/execute");
        then.status(200).json_body(json!({"graph_exec_id": "exec-slow"}));
    });
    let poll_mock = server.mock(|when, then| {
        when.method(GET).path("/graphs/graph-1/executions/exec-slow");
        then.status(200)
            .json_body(json!({"status": "RUNNING", "outputs": {}}));
    });

    let request = GenerationRequest::new("A task app", vec!["brainstorm".to_string()]);
    let err = proxy(graph_config(&server, 3))
        .handle(request)
        .await
        .unwrap_err();

    poll_mock.assert_hits(3);
    match err {
        StudioError::TimeoutError {
            execution_id,
            attempts,
        } => {
            assert_eq!(execution_id, "exec-slow");
            assert_eq!(attempts, 3);
        }
        other => panic!("expected timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unavailable_poll_endpoint_counts_as_not_ready() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/graphs/graph-1/execute");
        then.status(200).json_body(json!({"id": "exec-503"}));
    });
    let poll_mock = server.mock(|when, then| {
        when.method(GET).path("/graphs/graph-1/executions/exec-503");
        then.status(503);
    });

    let request = GenerationRequest::new("A task app", vec!["brainstorm".to_string()]);
    let err = proxy(graph_config(&server, 2))
        .handle(request)
        .await
        .unwrap_err();

    poll_mock.assert_hits(2);
    assert!(matches!(err, StudioError::TimeoutError { attempts: 2, .. }));
}
