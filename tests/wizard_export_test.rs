use concept_studio::app::router;
use concept_studio::core::demo::demo_content;
use concept_studio::core::export::{render_markdown, save_export};
use concept_studio::core::wizard::{ProgressEvent, WizardStatus};
use concept_studio::domain::model::{ModuleStatus, PreferenceField};
use concept_studio::{ApiClient, GenerationProxy, HttpAgentBackend, LocalStorage, StudioConfig, Wizard};
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::mpsc;

#[tokio::test]
async fn test_demo_wizard_exports_markdown() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let client = ApiClient::demo().with_demo_delay(Duration::from_millis(1));
    let mut wizard = Wizard::new();
    wizard.set_prompt("A task app");
    wizard.toggle_module("ui_ux");
    assert!(!wizard.toggle_module("tech_specs"));
    wizard.set_preference(PreferenceField::Audience, "Remote teams");

    let (tx, mut rx) = mpsc::unbounded_channel();
    wizard.generate(&client, Some(&tx)).await.unwrap();
    drop(tx);

    let mut finished = Vec::new();
    while let Some(event) = rx.recv().await {
        if let ProgressEvent::ModuleFinished { module_id, .. } = event {
            finished.push(module_id);
        }
    }
    assert_eq!(finished, vec!["brainstorm", "business_plan", "ui_ux"]);
    assert_eq!(wizard.status(), WizardStatus::Completed);

    let storage = LocalStorage::new(output_path.clone());
    let path = save_export(&storage, wizard.results_in_order()).await.unwrap();

    let file_name = std::path::Path::new(&path)
        .file_name()
        .unwrap()
        .to_string_lossy()
        .into_owned();
    assert!(file_name.starts_with("concept-studio-"));
    assert!(file_name.ends_with(".md"));

    let exported = std::fs::read_to_string(&path).unwrap();
    let expected = format!(
        "{}\n\n---\n\n{}\n\n---\n\n{}\n\n---\n\n",
        demo_content("brainstorm", "A task app"),
        demo_content("business_plan", "A task app"),
        demo_content("ui_ux", "A task app"),
    );
    assert_eq!(exported, expected);

    let html = render_markdown(&exported).unwrap();
    assert!(html.contains("<h1>"));
    assert!(!html.contains('\n'));
}

#[tokio::test]
async fn test_live_wizard_against_demo_server() {
    let backend = HttpAgentBackend::new("http://127.0.0.1:9", "");
    let app = router(GenerationProxy::new(StudioConfig::default(), backend));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = ApiClient::new(format!("http://{}", addr));
    let mut wizard = Wizard::new();
    wizard.set_prompt("A task app");
    wizard.toggle_module("business_plan");
    wizard.toggle_module("code_scripts");

    wizard.generate(&client, None).await.unwrap();

    assert_eq!(wizard.status(), WizardStatus::Completed);
    let ordered: Vec<&str> = wizard.results_in_order().iter().map(|(m, _)| m.id).collect();
    assert_eq!(ordered, vec!["brainstorm", "code_scripts"]);
    assert!(wizard
        .results()
        .values()
        .all(|r| r.status == ModuleStatus::Completed));
    assert!(wizard.results()["code_scripts"]
        .content_text()
        .starts_with("[Demo Mode] Generated code_scripts content for: A task app"));
}

#[tokio::test]
async fn test_unreachable_server_marks_modules_failed() {
    let client = ApiClient::new("http://127.0.0.1:9");
    let mut wizard = Wizard::new();
    wizard.set_prompt("A task app");

    wizard.generate(&client, None).await.unwrap();

    assert_eq!(wizard.status(), WizardStatus::Completed);
    assert_eq!(wizard.module_status("brainstorm"), Some(ModuleStatus::Error));
    assert_eq!(wizard.module_status("business_plan"), Some(ModuleStatus::Error));
}
