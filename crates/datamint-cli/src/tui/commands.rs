use std::path::Path;

use chrono::Utc;
use datamint_core::{
    CUSTOM_ENTITY, DEFAULT_COUNT, Domain, ENTITIES, GenerationPath, OptionKey, OutputFormat,
    Scenario, ScenarioPatch, normalize_scenario_name,
};
use datamint_render::{PreviewTab, export_csv, export_json};

use crate::CliError;
use crate::tui::state::{App, PaletteEntry};
use crate::tui::utils::export_file_name;
use crate::workspace::write_bytes_atomic;

const TOP_LEVEL: &[PaletteEntry] = &[
    PaletteEntry {
        command: "/help",
        description: "list commands",
    },
    PaletteEntry {
        command: "/generate",
        description: "submit the current configuration",
    },
    PaletteEntry {
        command: "/domain",
        description: "set business domain",
    },
    PaletteEntry {
        command: "/entity",
        description: "set entity type",
    },
    PaletteEntry {
        command: "/custom",
        description: "use a custom entity name",
    },
    PaletteEntry {
        command: "/schema-file",
        description: "load inline JSON schema from a file",
    },
    PaletteEntry {
        command: "/schema-clear",
        description: "drop the inline schema",
    },
    PaletteEntry {
        command: "/count",
        description: "set record count (1-1000)",
    },
    PaletteEntry {
        command: "/context",
        description: "set or clear the context description",
    },
    PaletteEntry {
        command: "/path",
        description: "set generation path",
    },
    PaletteEntry {
        command: "/format",
        description: "set output format",
    },
    PaletteEntry {
        command: "/option",
        description: "toggle a generation option",
    },
    PaletteEntry {
        command: "/scenario",
        description: "manage scenarios",
    },
    PaletteEntry {
        command: "/request",
        description: "show the request payload",
    },
    PaletteEntry {
        command: "/schemas",
        description: "list backend schemas",
    },
    PaletteEntry {
        command: "/health",
        description: "check backend health",
    },
    PaletteEntry {
        command: "/tab",
        description: "switch preview tab",
    },
    PaletteEntry {
        command: "/expand",
        description: "expand the whole JSON tree",
    },
    PaletteEntry {
        command: "/collapse",
        description: "collapse the whole JSON tree",
    },
    PaletteEntry {
        command: "/export",
        description: "write the result to the exports directory",
    },
    PaletteEntry {
        command: "/reset",
        description: "restore the default configuration",
    },
    PaletteEntry {
        command: "/exit",
        description: "quit",
    },
];

const SCENARIO: &[PaletteEntry] = &[
    PaletteEntry {
        command: "/scenario list",
        description: "list scenarios",
    },
    PaletteEntry {
        command: "/scenario add",
        description: "add <name> [count]",
    },
    PaletteEntry {
        command: "/scenario rm",
        description: "remove <n>",
    },
    PaletteEntry {
        command: "/scenario set",
        description: "set <n> <count>",
    },
    PaletteEntry {
        command: "/scenario describe",
        description: "describe <n> <text>",
    },
];

const PATHS: &[PaletteEntry] = &[
    PaletteEntry {
        command: "/path auto",
        description: "let the backend decide",
    },
    PaletteEntry {
        command: "/path traditional",
        description: "fast rule-based generation",
    },
    PaletteEntry {
        command: "/path llm",
        description: "LLM-driven generation",
    },
    PaletteEntry {
        command: "/path rag",
        description: "retrieval-augmented generation",
    },
    PaletteEntry {
        command: "/path hybrid",
        description: "combine strategies",
    },
];

const OPTIONS: &[PaletteEntry] = &[
    PaletteEntry {
        command: "/option use_cache",
        description: "toggle cached patterns",
    },
    PaletteEntry {
        command: "/option learn_from_history",
        description: "toggle history learning",
    },
    PaletteEntry {
        command: "/option defect_triggering",
        description: "toggle edge cases",
    },
    PaletteEntry {
        command: "/option production_like",
        description: "toggle production distributions",
    },
];

const TABS: &[PaletteEntry] = &[
    PaletteEntry {
        command: "/tab json",
        description: "tree view",
    },
    PaletteEntry {
        command: "/tab table",
        description: "table view",
    },
    PaletteEntry {
        command: "/tab stats",
        description: "statistics view",
    },
];

const EXPORTS: &[PaletteEntry] = &[
    PaletteEntry {
        command: "/export json",
        description: "pretty JSON of the data",
    },
    PaletteEntry {
        command: "/export csv",
        description: "CSV of every record",
    },
];

pub fn execute_command(app: &mut App, input: &str) -> Result<(), CliError> {
    let mut parts = input.split_whitespace();
    let command = match parts.next() {
        Some(cmd) => cmd,
        None => return Ok(()),
    };
    let args: Vec<&str> = parts.collect();

    match command {
        "/help" => cmd_help(app),
        "/exit" => {
            app.should_quit = true;
            Ok(())
        }
        "/generate" => {
            app.submit();
            Ok(())
        }
        "/domain" => cmd_domain(app, &args),
        "/entity" => cmd_entity(app, &args),
        "/custom" => cmd_custom(app, &args),
        "/schema-file" => cmd_schema_file(app, &args),
        "/schema-clear" => {
            app.session.config_mut().set_inline_schema("");
            app.push_message("inline schema cleared");
            Ok(())
        }
        "/count" => cmd_count(app, &args),
        "/context" => {
            set_context(app, &args.join(" "));
            Ok(())
        }
        "/path" => cmd_path(app, &args),
        "/format" => cmd_format(app, &args),
        "/option" => cmd_option(app, &args),
        "/scenario" => cmd_scenario(app, &args),
        "/request" => cmd_request(app),
        "/schemas" => {
            let domain = args.first().map(|value| value.to_string());
            app.request_schemas(domain);
            Ok(())
        }
        "/health" => {
            app.request_health();
            Ok(())
        }
        "/tab" => cmd_tab(app, &args),
        "/expand" => {
            if let Some(result) = app.session.result() {
                app.preview.expansion.expand_all(&result.data);
            }
            Ok(())
        }
        "/collapse" => {
            app.preview.expansion.collapse_all();
            app.preview.cursor = 0;
            Ok(())
        }
        "/export" => cmd_export(app, &args),
        "/reset" => {
            app.session.config_mut().reset();
            app.field_error = None;
            app.push_message("configuration reset to defaults");
            Ok(())
        }
        _ => {
            app.push_message(format!("unknown command: {command}"));
            Ok(())
        }
    }
}

/// Plain text typed without a leading slash becomes the context.
pub fn set_context(app: &mut App, text: &str) {
    let text = text.trim();
    app.session.config_mut().set_context(text);
    if text.is_empty() {
        app.push_message("context cleared");
    } else if !app.session.config().generation_path().accepts_context() {
        app.push_message("context saved; the traditional path does not send it");
    } else {
        app.push_message("context updated");
    }
}

fn cmd_help(app: &mut App) -> Result<(), CliError> {
    app.push_message("COMMANDS");
    for entry in TOP_LEVEL {
        app.push_message(format!("  {:<14} {}", entry.command, entry.description));
    }
    app.push_message("keys: TAB switch preview, UP/DOWN move, ENTER on empty input toggles node");
    Ok(())
}

fn cmd_domain(app: &mut App, args: &[&str]) -> Result<(), CliError> {
    let Some(value) = args.first() else {
        let names: Vec<&str> = Domain::ALL.iter().map(|domain| domain.as_str()).collect();
        app.push_message(format!("domains: {}", names.join(", ")));
        return Ok(());
    };
    match value.parse::<Domain>() {
        Ok(domain) => {
            app.session.config_mut().set_domain(domain);
            app.push_message(format!("domain set to {}", domain.label()));
        }
        Err(err) => app.push_message(format!("error: {err}")),
    }
    Ok(())
}

fn cmd_entity(app: &mut App, args: &[&str]) -> Result<(), CliError> {
    let Some(value) = args.first() else {
        let names: Vec<&str> = ENTITIES.iter().map(|(name, _)| *name).collect();
        app.push_message(format!("entities: {}", names.join(", ")));
        return Ok(());
    };
    if !ENTITIES.iter().any(|(name, _)| name == value) {
        app.push_message(format!("unknown entity: {value} (use /custom for others)"));
        return Ok(());
    }
    app.session.config_mut().set_entity(*value);
    app.field_error = None;
    app.push_message(format!("entity set to {value}"));
    Ok(())
}

fn cmd_custom(app: &mut App, args: &[&str]) -> Result<(), CliError> {
    let name = args.join(" ");
    let config = app.session.config_mut();
    config.set_entity(CUSTOM_ENTITY);
    config.set_custom_entity_name(name.trim());
    app.push_message(format!("custom entity: {}", name.trim()));
    if app.session.config().inline_schema().trim().is_empty() {
        app.push_message("provide a schema with /schema-file <path>");
    }
    Ok(())
}

fn cmd_schema_file(app: &mut App, args: &[&str]) -> Result<(), CliError> {
    let Some(path) = args.first() else {
        app.push_message("usage: /schema-file <path>");
        return Ok(());
    };
    match std::fs::read_to_string(Path::new(path)) {
        Ok(schema) => {
            app.session.config_mut().set_inline_schema(schema);
            app.push_message(format!("inline schema loaded from {path}"));
            if let Err(err) = app.session.config().validate() {
                app.push_message(format!("warning: {err}"));
                app.field_error = Some(err);
            } else {
                app.field_error = None;
            }
        }
        Err(err) => app.push_message(format!("error reading {path}: {err}")),
    }
    Ok(())
}

fn cmd_count(app: &mut App, args: &[&str]) -> Result<(), CliError> {
    match args.first().map(|value| value.parse::<u32>()) {
        Some(Ok(count)) => {
            app.session.config_mut().set_count(count);
            let clamped = app.session.config().count();
            app.push_message(format!("count set to {clamped}"));
            warn_on_mismatch(app);
        }
        _ => app.push_message("usage: /count <1-1000>"),
    }
    Ok(())
}

fn cmd_path(app: &mut App, args: &[&str]) -> Result<(), CliError> {
    let Some(value) = args.first() else {
        for path in GenerationPath::ALL {
            app.push_message(format!("  {:<12} {}", path.as_str(), path.description()));
        }
        return Ok(());
    };
    match value.parse::<GenerationPath>() {
        Ok(path) => {
            app.session.config_mut().set_generation_path(path);
            app.push_message(format!("generation path set to {}", path.label()));
        }
        Err(err) => app.push_message(format!("error: {err}")),
    }
    Ok(())
}

fn cmd_format(app: &mut App, args: &[&str]) -> Result<(), CliError> {
    match args.first().map(|value| value.parse::<OutputFormat>()) {
        Some(Ok(format)) => {
            app.session.config_mut().set_output_format(format);
            app.push_message(format!("output format set to {format}"));
        }
        Some(Err(err)) => app.push_message(format!("error: {err}")),
        None => app.push_message("usage: /format <json|csv|sql|yaml|xml>"),
    }
    Ok(())
}

fn cmd_option(app: &mut App, args: &[&str]) -> Result<(), CliError> {
    match args.first().map(|value| value.parse::<OptionKey>()) {
        Some(Ok(key)) => {
            app.session.config_mut().toggle_option(key);
            let state = if app.session.config().options().get(key) {
                "on"
            } else {
                "off"
            };
            app.push_message(format!("{}: {state}", key.label()));
        }
        Some(Err(err)) => app.push_message(format!("error: {err}")),
        None => {
            let options = app.session.config().options();
            for key in OptionKey::ALL {
                let state = if options.get(key) { "on" } else { "off" };
                app.push_message(format!("  {:<20} {state}", key.label()));
            }
        }
    }
    Ok(())
}

fn cmd_scenario(app: &mut App, args: &[&str]) -> Result<(), CliError> {
    match args.first().copied() {
        None | Some("list") => {
            let lines: Vec<String> = app
                .session
                .config()
                .scenarios()
                .iter()
                .enumerate()
                .map(|(index, scenario)| {
                    let description = scenario.description.as_deref().unwrap_or("");
                    format!(
                        "  {}. {:<20} {:>5}  {description}",
                        index + 1,
                        scenario.name,
                        scenario.count
                    )
                })
                .collect();
            if lines.is_empty() {
                app.push_message("no scenarios");
            }
            for line in lines {
                app.push_message(line);
            }
            let summary = app.session.config().scenario_summary();
            app.push_message(summary.message());
        }
        Some("add") => {
            let Some(name) = args.get(1).and_then(|raw| normalize_scenario_name(raw)) else {
                app.push_message("usage: /scenario add <name> [count]");
                return Ok(());
            };
            let count = match args.get(2).map(|raw| raw.parse::<u32>()) {
                None => DEFAULT_COUNT,
                Some(Ok(count)) => count,
                Some(Err(_)) => {
                    app.push_message("count must be a number");
                    return Ok(());
                }
            };
            app.session
                .config_mut()
                .add_scenario(Scenario::new(name.clone(), count));
            app.push_message(format!("scenario {name} added ({count})"));
            warn_on_mismatch(app);
        }
        Some("rm") => match scenario_index(args.get(1)) {
            Some(index) => match app.session.config_mut().remove_scenario(index) {
                Some(removed) => {
                    app.push_message(format!("scenario {} removed", removed.name));
                    warn_on_mismatch(app);
                }
                None => app.push_message(format!("no scenario #{}", index + 1)),
            },
            None => app.push_message("usage: /scenario rm <n>"),
        },
        Some("set") => {
            let count = args.get(2).and_then(|raw| raw.parse::<u32>().ok());
            match (scenario_index(args.get(1)), count) {
                (Some(index), Some(count)) => {
                    if app
                        .session
                        .config_mut()
                        .update_scenario(index, ScenarioPatch::default().count(count))
                    {
                        warn_on_mismatch(app);
                    } else {
                        app.push_message(format!("no scenario #{}", index + 1));
                    }
                }
                _ => app.push_message("usage: /scenario set <n> <count>"),
            }
        }
        Some("describe") => match scenario_index(args.get(1)) {
            Some(index) => {
                let text = args.get(2..).unwrap_or_default().join(" ");
                if !app
                    .session
                    .config_mut()
                    .update_scenario(index, ScenarioPatch::default().description(text))
                {
                    app.push_message(format!("no scenario #{}", index + 1));
                }
            }
            None => app.push_message("usage: /scenario describe <n> <text>"),
        },
        Some(other) => app.push_message(format!("unknown scenario command: {other}")),
    }
    Ok(())
}

fn scenario_index(raw: Option<&&str>) -> Option<usize> {
    raw.and_then(|value| value.parse::<usize>().ok())
        .and_then(|position| position.checked_sub(1))
}

fn warn_on_mismatch(app: &mut App) {
    let summary = app.session.config().scenario_summary();
    if !summary.is_balanced() {
        app.push_message(format!("warning: {}", summary.message()));
    }
}

fn cmd_request(app: &mut App) -> Result<(), CliError> {
    let request = app.session.config().build_request();
    let json = serde_json::to_string_pretty(&request)?;
    for line in json.lines() {
        app.push_message(line.to_string());
    }
    Ok(())
}

fn cmd_tab(app: &mut App, args: &[&str]) -> Result<(), CliError> {
    let tab = match args.first().copied() {
        Some("json") => PreviewTab::Json,
        Some("table") => PreviewTab::Table,
        Some("stats") => PreviewTab::Stats,
        _ => app.preview.tab.next(),
    };
    app.preview.tab = tab;
    Ok(())
}

fn cmd_export(app: &mut App, args: &[&str]) -> Result<(), CliError> {
    let Some(result) = app.session.result() else {
        app.push_message("nothing to export yet");
        return Ok(());
    };
    let (extension, content) = match args.first().copied().unwrap_or("json") {
        "json" => ("json", export_json(&result.data)?),
        "csv" => ("csv", export_csv(&result.data)?),
        other => {
            app.push_message(format!("unknown export format: {other}"));
            return Ok(());
        }
    };
    let path = app
        .paths
        .exports_dir
        .join(export_file_name(Utc::now(), extension));
    write_bytes_atomic(&path, content.as_bytes())?;
    tracing::info!(event = "result_exported", path = %path.display());
    app.push_message(format!("exported to {}", path.display()));
    Ok(())
}

pub fn command_palette_matches(input: &str) -> Vec<PaletteEntry> {
    if !input.starts_with('/') {
        return Vec::new();
    }

    let nested = [
        ("/scenario ", SCENARIO),
        ("/path ", PATHS),
        ("/option ", OPTIONS),
        ("/tab ", TABS),
        ("/export ", EXPORTS),
    ];
    for (prefix, entries) in nested {
        if input.starts_with(prefix) {
            return entries
                .iter()
                .filter(|entry| entry.command.starts_with(input.trim()))
                .cloned()
                .collect();
        }
    }

    if input.contains(' ') {
        return Vec::new();
    }

    TOP_LEVEL
        .iter()
        .filter(|entry| entry.command.starts_with(input))
        .cloned()
        .collect()
}
