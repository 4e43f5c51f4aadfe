use std::sync::Arc;

use datamint_client::GenerationBackend;
use datamint_core::{
    ConfigError, GenerationResult, GeneratorConfig, HealthReport, SchemaInfo, Session,
};
use datamint_render::{PreviewState, TreeLine, render_tree};

use crate::workspace::{Settings, WorkspacePaths};

pub const MAX_MESSAGES: usize = 1000;

#[derive(Debug, Clone)]
pub struct PaletteEntry {
    pub command: &'static str,
    pub description: &'static str,
}

pub enum AppEvent {
    GenerationFinished {
        seq: u64,
        outcome: Result<GenerationResult, String>,
    },
    SchemasLoaded(Result<Vec<SchemaInfo>, String>),
    HealthChecked(HealthReport),
}

pub struct App {
    pub runtime: tokio::runtime::Handle,
    pub tx: tokio::sync::mpsc::UnboundedSender<AppEvent>,
    pub backend: Arc<dyn GenerationBackend>,
    pub paths: WorkspacePaths,
    pub settings: Settings,
    pub session: Session,
    pub preview: PreviewState,
    pub schemas: Vec<SchemaInfo>,
    pub health: Option<HealthReport>,
    /// Last validation failure, shown next to the offending field.
    pub field_error: Option<ConfigError>,
    pub input: String,
    pub messages: Vec<String>,
    pub should_quit: bool,
    pub scroll_offset: u16,
    pub palette_select: usize,
    pub spinner_idx: usize,
}

impl App {
    pub fn new(
        runtime: tokio::runtime::Handle,
        tx: tokio::sync::mpsc::UnboundedSender<AppEvent>,
        backend: Arc<dyn GenerationBackend>,
        paths: WorkspacePaths,
        settings: Settings,
    ) -> Self {
        let config = GeneratorConfig::from_preset(&settings.defaults);
        Self {
            runtime,
            tx,
            backend,
            paths,
            settings,
            session: Session::new(config),
            preview: PreviewState::default(),
            schemas: Vec::new(),
            health: None,
            field_error: None,
            input: String::new(),
            messages: Vec::new(),
            should_quit: false,
            scroll_offset: 0,
            palette_select: 0,
            spinner_idx: 0,
        }
    }

    pub fn push_message(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
        if self.messages.len() > MAX_MESSAGES {
            let overflow = self.messages.len() - MAX_MESSAGES;
            self.messages.drain(0..overflow);
        }
    }

    pub fn record_command(&mut self, command: &str) {
        if !self.messages.is_empty() {
            self.push_message("");
        }
        self.push_message(format!("► {}", command));
    }

    /// Visible lines of the JSON tree for the current result.
    pub fn tree_lines(&self) -> Vec<TreeLine> {
        self.session
            .result()
            .map(|result| render_tree(&result.data, &self.preview.expansion))
            .unwrap_or_default()
    }

    /// Validate, then dispatch the current configuration to the backend.
    pub fn submit(&mut self) {
        let submission = match self.session.submit() {
            Ok(submission) => submission,
            Err(err) => {
                self.push_message(format!("error: {err}"));
                self.field_error = Some(err);
                return;
            }
        };
        self.field_error = None;
        self.push_message(format!(
            "generating {} {} record(s)...",
            submission.request.count, submission.request.entity
        ));

        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let outcome = backend
                .generate(&submission.request)
                .await
                .map_err(|err| err.to_string());
            let _ = tx.send(AppEvent::GenerationFinished {
                seq: submission.seq,
                outcome,
            });
        });
    }

    pub fn request_schemas(&mut self, domain: Option<String>) {
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let outcome = backend
                .list_schemas(domain.as_deref())
                .await
                .map_err(|err| err.to_string());
            let _ = tx.send(AppEvent::SchemasLoaded(outcome));
        });
    }

    pub fn request_health(&mut self) {
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let report = backend.health_check().await;
            let _ = tx.send(AppEvent::HealthChecked(report));
        });
    }

    pub fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::GenerationFinished { seq, outcome } => {
                if !self.session.complete(seq, outcome) {
                    return;
                }
                if let Some(error) = self.session.error().map(str::to_string) {
                    self.push_message(format!("error: {error}"));
                }
                if let Some(result) = self.session.result() {
                    let summary = format!(
                        "received {} record(s), request {}",
                        result.record_count, result.request_id
                    );
                    self.preview.reset_for(&result.data);
                    self.push_message(summary);
                }
            }
            AppEvent::SchemasLoaded(Ok(schemas)) => {
                self.push_message(format!("{} schema(s) available:", schemas.len()));
                for schema in &schemas {
                    let line = format!(
                        "  {:<16} {} ({} fields)",
                        schema.name,
                        schema.description,
                        schema.fields.len()
                    );
                    self.push_message(line);
                }
                self.schemas = schemas;
            }
            AppEvent::SchemasLoaded(Err(err)) => {
                self.push_message(format!("error fetching schemas: {err}"));
            }
            AppEvent::HealthChecked(report) => {
                self.push_message(format!(
                    "backend {} ({})",
                    report.status.as_str(),
                    report.service_status
                ));
                self.health = Some(report);
            }
        }
    }

    pub fn health_display(&self) -> &'static str {
        match &self.health {
            Some(report) => report.status.as_str(),
            None => "unknown",
        }
    }
}
