use clap::Parser;
use concept_studio::core::export::{export_markdown, render_markdown, save_export};
use concept_studio::core::wizard::{ProgressEvent, WizardStatus};
use concept_studio::domain::catalog::is_known_module;
use concept_studio::domain::model::{ModuleStatus, PreferenceField};
use concept_studio::domain::ports::Storage;
use concept_studio::utils::logger;
use concept_studio::{ApiClient, LocalStorage, Wizard};
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(name = "concept-wizard")]
#[command(about = "Generate a product concept one module at a time")]
struct Args {
    /// Product idea to develop
    #[arg(short, long)]
    prompt: String,

    /// Comma separated module ids; brainstorm and business_plan when omitted
    #[arg(short, long, value_delimiter = ',')]
    modules: Vec<String>,

    #[arg(long)]
    style: Option<String>,

    #[arg(long)]
    industry: Option<String>,

    #[arg(long)]
    audience: Option<String>,

    #[arg(long)]
    budget: Option<String>,

    #[arg(long)]
    timeline: Option<String>,

    #[arg(long)]
    notes: Option<String>,

    /// Base URL of a running concept-studio server
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    server: String,

    /// Use canned content instead of calling the server
    #[arg(long)]
    demo: bool,

    #[arg(long, default_value_t = 2000)]
    demo_delay_ms: u64,

    /// Directory for the markdown export
    #[arg(short, long, default_value = "output")]
    output: String,

    /// Also write an HTML rendering next to the markdown export
    #[arg(long)]
    html: bool,

    #[arg(short, long, help = "Enable verbose output")]
    verbose: bool,
}

fn select_modules(wizard: &mut Wizard, requested: &[String]) {
    if requested.is_empty() {
        return;
    }
    for id in requested {
        if !is_known_module(id) {
            tracing::warn!("⚠️ Ignoring unknown module: {}", id);
        }
    }
    let current: Vec<String> = wizard.selected().to_vec();
    for id in current.iter().filter(|id| !requested.contains(*id)) {
        wizard.toggle_module(id);
    }
    for id in requested {
        if !wizard.is_selected(id) {
            wizard.toggle_module(id);
        }
    }
}

fn apply_preferences(wizard: &mut Wizard, args: &Args) {
    let fields = [
        (PreferenceField::Style, &args.style),
        (PreferenceField::Industry, &args.industry),
        (PreferenceField::Audience, &args.audience),
        (PreferenceField::Budget, &args.budget),
        (PreferenceField::Timeline, &args.timeline),
        (PreferenceField::AdditionalNotes, &args.notes),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            wizard.set_preference(field, value.clone());
        }
    }
}

fn print_progress(event: &ProgressEvent) {
    match event {
        ProgressEvent::Started { total } => println!("🚀 Generating {} modules", total),
        ProgressEvent::ModuleStarted {
            module_id,
            position,
        } => println!("⏳ [{}] {}", position, module_id),
        ProgressEvent::ModuleFinished { module_id, result } => match result.status {
            ModuleStatus::Error => println!("❌ {}: {}", module_id, result.content_text()),
            _ => println!("✅ {}", module_id),
        },
        ProgressEvent::Finished { completed, failed } => {
            println!("🏁 {} completed, {} failed", completed, failed)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let client = if args.demo {
        ApiClient::demo().with_demo_delay(Duration::from_millis(args.demo_delay_ms))
    } else {
        ApiClient::new(args.server.clone())
    };
    tracing::info!("Client mode: {:?}", client.mode());

    let mut wizard = Wizard::new();
    wizard.set_prompt(args.prompt.clone());
    select_modules(&mut wizard, &args.modules);
    apply_preferences(&mut wizard, &args);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            print_progress(&event);
        }
    });

    let outcome = wizard.generate(&client, Some(&tx)).await;
    drop(tx);
    printer.await?;

    if let Err(e) = outcome {
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(2);
    }

    if wizard.status() != WizardStatus::Completed {
        anyhow::bail!("Generation did not complete");
    }

    let storage = LocalStorage::new(args.output.clone());
    let ordered = wizard.results_in_order();
    let path = save_export(&storage, ordered.iter().copied()).await?;
    println!("📄 Exported to {}", path);

    if args.html {
        let markdown = export_markdown(ordered.iter().copied());
        let html = render_markdown(&markdown)?;
        let html_name = std::path::Path::new(&path)
            .with_extension("html")
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "concept-studio.html".to_string());
        let html_path = storage.write_file(&html_name, html.as_bytes()).await?;
        println!("🌐 HTML written to {}", html_path);
    }

    Ok(())
}
