mod logging;
mod report;
mod tui;
mod workspace;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand, ValueEnum};
use datamint_client::{GenerationBackend, HttpBackend, TransportError};
use datamint_core::{
    ConfigError, ConfigPreset, DEFAULT_COUNT, Domain, GenerationPath, GenerationRequest,
    GeneratorConfig, OptionKey, OutputFormat, Scenario, Session, normalize_scenario_name,
};
use datamint_render::{RenderError, ResultStats, TableView, export_csv, export_json};
use schemars::schema_for;
use thiserror::Error;

use workspace::{
    DEFAULT_WORKSPACE_DIR, Settings, WorkspaceError, WorkspacePaths, load_or_create_settings,
    write_bytes_atomic,
};

#[derive(Debug, Error)]
enum CliError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("workspace error: {0}")]
    Workspace(#[from] WorkspaceError),
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    #[error("render error: {0}")]
    Render(#[from] RenderError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("generation failed: {0}")]
    Generation(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Parser, Debug)]
#[command(name = "datamint", version, about = "Configure and preview synthetic test data")]
struct Cli {
    /// Workspace directory holding settings, logs and exports.
    #[arg(long, global = true, default_value = DEFAULT_WORKSPACE_DIR)]
    workspace: PathBuf,
    /// Backend base URL; overrides the workspace settings.
    #[arg(long, global = true, env = "DATAMINT_BACKEND_URL")]
    backend_url: Option<String>,
    /// Request timeout in seconds; overrides the workspace settings.
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive configurator and result preview (default).
    Tui,
    /// Submit a request and print the result.
    Generate(GenerateArgs),
    /// Print the request payload without sending it.
    Request(ConfigArgs),
    /// List the backend schema catalog.
    Schemas {
        #[arg(long)]
        domain: Option<Domain>,
    },
    /// Check backend health.
    Health,
    /// Print the JSON Schema of the request payload.
    RequestSchema,
}

#[derive(Args, Debug, Default)]
struct ConfigArgs {
    #[arg(long)]
    domain: Option<Domain>,
    #[arg(long)]
    entity: Option<String>,
    /// Name of a custom entity; implies `--entity custom`.
    #[arg(long)]
    custom_name: Option<String>,
    #[arg(long)]
    count: Option<u32>,
    #[arg(long)]
    context: Option<String>,
    #[arg(long)]
    path: Option<GenerationPath>,
    #[arg(long)]
    format: Option<OutputFormat>,
    /// Enable a generation option (repeatable).
    #[arg(long = "option", value_name = "OPTION")]
    options: Vec<OptionKey>,
    /// Scenario as NAME or NAME=COUNT (repeatable); replaces the defaults.
    #[arg(long = "scenario", value_name = "NAME=COUNT", value_parser = parse_scenario)]
    scenarios: Vec<Scenario>,
    /// File holding the inline JSON schema.
    #[arg(long)]
    schema_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    config: ConfigArgs,
    #[arg(long, value_enum, default_value_t = View::Table)]
    view: View,
    /// Write the data to a file; `.csv` selects CSV, anything else JSON.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum View {
    Json,
    Table,
    Stats,
    Csv,
}

fn parse_scenario(raw: &str) -> Result<Scenario, String> {
    let (name, count) = match raw.split_once('=') {
        Some((name, count)) => {
            let count = count
                .trim()
                .parse::<u32>()
                .map_err(|_| format!("invalid scenario count: {count}"))?;
            (name, count)
        }
        None => (raw, DEFAULT_COUNT),
    };
    let name =
        normalize_scenario_name(name).ok_or_else(|| "scenario name is empty".to_string())?;
    Ok(Scenario::new(name, count))
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(event = "command_failed", error = %err);
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let paths = WorkspacePaths::new(cli.workspace);
    let mut settings = load_or_create_settings(&paths.settings_path())?;
    if let Some(url) = cli.backend_url {
        settings.backend_url = url;
    }
    if let Some(secs) = cli.timeout_secs {
        settings.timeout_secs = secs;
    }

    let log_path = settings
        .log_path
        .clone()
        .unwrap_or_else(|| paths.default_log_path());
    logging::init_logging(&log_path)?;
    tracing::info!(event = "cli_started", workspace = %paths.root.display());

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => {
            let backend = http_backend(&settings)?;
            tui::run(tokio::runtime::Handle::current(), paths, settings, backend)
        }
        Command::Generate(args) => run_generate(&paths, &settings, args).await,
        Command::Request(args) => run_request(&settings, args),
        Command::Schemas { domain } => {
            let backend = http_backend(&settings)?;
            let schemas = backend.list_schemas(domain.map(Domain::as_str)).await?;
            print!("{}", report::schemas_text(&schemas));
            Ok(())
        }
        Command::Health => {
            let backend = http_backend(&settings)?;
            let health = backend.health_check().await;
            print!("{}", report::health_text(&health));
            Ok(())
        }
        Command::RequestSchema => {
            let schema = schema_for!(GenerationRequest);
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(())
        }
    }
}

fn http_backend(settings: &Settings) -> Result<Arc<dyn GenerationBackend>, CliError> {
    let backend = HttpBackend::new(
        &settings.backend_url,
        Duration::from_secs(settings.timeout_secs),
    )?;
    Ok(Arc::new(backend))
}

fn build_config(settings: &Settings, args: ConfigArgs) -> Result<GeneratorConfig, CliError> {
    let mut config = GeneratorConfig::from_preset(&settings.defaults);

    let inline_schema = match &args.schema_file {
        Some(path) => Some(std::fs::read_to_string(path)?),
        None => None,
    };
    let entity = match (&args.custom_name, args.entity) {
        (Some(_), Some(entity)) if entity != datamint_core::CUSTOM_ENTITY => {
            return Err(CliError::InvalidConfig(
                "--custom-name requires the custom entity".to_string(),
            ));
        }
        (Some(_), _) => Some(datamint_core::CUSTOM_ENTITY.to_string()),
        (None, entity) => entity,
    };

    let preset = ConfigPreset {
        domain: args.domain,
        entity,
        custom_entity_name: args.custom_name,
        count: args.count,
        context: args.context,
        scenarios: if args.scenarios.is_empty() {
            None
        } else {
            Some(args.scenarios)
        },
        options: None,
        generation_path: args.path,
        output_format: args.format,
        inline_schema,
    };
    config.apply_preset(&preset);

    for key in args.options {
        if !config.options().get(key) {
            config.toggle_option(key);
        }
    }
    Ok(config)
}

fn run_request(settings: &Settings, args: ConfigArgs) -> Result<(), CliError> {
    let config = build_config(settings, args)?;
    config.validate()?;
    let request = config.build_request();
    println!("{}", serde_json::to_string_pretty(&request)?);
    let summary = config.scenario_summary();
    if !summary.is_balanced() {
        eprintln!("warning: {}", summary.message());
    }
    Ok(())
}

async fn run_generate(
    paths: &WorkspacePaths,
    settings: &Settings,
    args: GenerateArgs,
) -> Result<(), CliError> {
    let GenerateArgs { config, view, out } = args;
    let config = build_config(settings, config)?;
    let backend = http_backend(settings)?;

    let mut session = Session::new(config);
    let submission = session.submit()?;
    let timer = Instant::now();
    let outcome = backend.generate(&submission.request).await;
    session.complete(submission.seq, outcome);
    tracing::info!(
        event = "generate_finished",
        elapsed_ms = timer.elapsed().as_millis() as u64,
        workspace = %paths.root.display(),
    );

    if let Some(error) = session.error() {
        return Err(CliError::Generation(error.to_string()));
    }
    let Some(result) = session.result() else {
        return Err(CliError::Generation("no result received".to_string()));
    };

    match view {
        View::Json => println!("{}", export_json(&result.data)?),
        View::Table => print!("{}", report::table_text(&TableView::from_value(&result.data))),
        View::Stats => print!("{}", report::stats_text(&ResultStats::from_result(result))),
        View::Csv => print!("{}", export_csv(&result.data)?),
    }

    if let Some(out) = out {
        let is_csv = out
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        let content = if is_csv {
            export_csv(&result.data)?
        } else {
            export_json(&result.data)?
        };
        write_bytes_atomic(&out, content.as_bytes())?;
        tracing::info!(event = "result_exported", path = %out.display());
        eprintln!("wrote {}", out.display());
    }
    Ok(())
}
