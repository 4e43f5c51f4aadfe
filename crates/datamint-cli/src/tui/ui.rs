use datamint_core::{ConfigField, GeneratorConfig, OptionKey};
use datamint_render::{
    Cell, EMPTY_TABLE_MESSAGE, PreviewTab, ResultStats, TableView, Toggle, TreeLine,
};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Row, Table, Tabs, Wrap};

use crate::tui::commands::command_palette_matches;
use crate::tui::state::{App, PaletteEntry};
use crate::tui::utils::clipped_input;

pub const INPUT_HEIGHT: u16 = 3;
pub const FOOTER_HEIGHT: u16 = 1;
pub const HEADER_HEIGHT: u16 = 4;
pub const MAX_PALETTE_LINES: usize = 8;
const MAX_COLUMN_WIDTH: u16 = 32;
const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn draw_ui(frame: &mut ratatui::Frame, app: &App) {
    let size = frame.size();

    let palette = command_palette_matches(&app.input);
    let palette_height = palette.len().min(MAX_PALETTE_LINES) as u16;
    let bottom_reserved = INPUT_HEIGHT + FOOTER_HEIGHT + palette_height + 1;

    let body_height = size
        .height
        .saturating_sub(HEADER_HEIGHT)
        .saturating_sub(bottom_reserved)
        .max(1);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(body_height),
            Constraint::Length(1),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(FOOTER_HEIGHT),
            Constraint::Length(palette_height),
        ])
        .split(size);

    frame.render_widget(render_header(app), layout[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(layout[1]);

    let config_lines = config_lines(app);
    let config_height = (config_lines.len() as u16 + 2).min(columns[0].height);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(config_height), Constraint::Min(1)])
        .split(columns[0]);

    frame.render_widget(
        Paragraph::new(Text::from(config_lines)).block(panel("Configuration")),
        left[0],
    );
    frame.render_widget(
        render_messages(app, left[1].height as usize),
        left[1],
    );

    draw_preview(frame, app, columns[1]);

    let (input_area, cursor) = render_input_bar(app, layout[3]);
    frame.render_widget(input_area, layout[3]);
    frame.render_widget(render_status_line(app), layout[4]);

    if palette_height > 0 {
        frame.render_widget(render_palette(&palette, app.palette_select), layout[5]);
    }
    if let Some((x, y)) = cursor {
        frame.set_cursor(x, y);
    }
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .border_type(BorderType::Rounded)
        .title(title)
}

fn render_header(app: &App) -> Paragraph<'static> {
    let health_color = match app.health_display() {
        "healthy" => Color::Green,
        "degraded" => Color::Yellow,
        "unhealthy" => Color::Red,
        _ => Color::DarkGray,
    };

    let title = Line::from(vec![
        Span::styled(">_ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Datamint (v{})", env!("CARGO_PKG_VERSION")),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]);

    let line_backend = Line::from(vec![
        Span::styled("backend:   ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.settings.backend_url.clone(),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("  "),
        Span::styled(app.health_display(), Style::default().fg(health_color)),
    ]);

    Paragraph::new(Text::from(vec![title, line_backend])).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .border_type(BorderType::Rounded),
    )
}

fn field(label: &str, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<10} "), Style::default().fg(Color::DarkGray)),
        Span::styled(value.into(), Style::default().fg(Color::White)),
    ])
}

fn field_error_line(app: &App, field: ConfigField) -> Option<Line<'static>> {
    let err = app.field_error.as_ref().filter(|err| err.field() == field)?;
    Some(Line::from(Span::styled(
        format!("           ! {err}"),
        Style::default().fg(Color::Red),
    )))
}

fn config_lines(app: &App) -> Vec<Line<'static>> {
    let config: &GeneratorConfig = app.session.config();
    let mut lines = vec![field("domain:", config.domain().label())];

    if config.is_custom_entity() {
        lines.push(field(
            "entity:",
            format!("custom \"{}\"", config.custom_entity_name()),
        ));
        lines.extend(field_error_line(app, ConfigField::CustomEntityName));
    } else {
        lines.push(field("entity:", config.entity().to_string()));
    }

    let schema = config.inline_schema();
    let schema_label = if schema.trim().is_empty() {
        "none".to_string()
    } else {
        format!("inline ({} bytes)", schema.len())
    };
    lines.push(field("schema:", schema_label));
    lines.extend(field_error_line(app, ConfigField::InlineSchema));

    lines.push(field("count:", config.count().to_string()));
    let path = config.generation_path();
    lines.push(Line::from(vec![
        Span::styled(format!("{:<10} ", "path:"), Style::default().fg(Color::DarkGray)),
        Span::styled(path.label(), Style::default().fg(Color::White)),
        Span::styled(
            format!("  {}", path.description()),
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    lines.push(field("format:", config.output_format().as_str()));

    let context = config.context();
    let context_label = if context.is_empty() {
        "-".to_string()
    } else if path.accepts_context() {
        context.to_string()
    } else {
        format!("{context} (not sent)")
    };
    lines.push(field("context:", context_label));

    let options = config.options();
    let toggles: Vec<String> = OptionKey::ALL
        .into_iter()
        .map(|key| {
            let mark = if options.get(key) { "x" } else { " " };
            format!("[{mark}] {}", key.label())
        })
        .collect();
    lines.push(field("options:", toggles[..2].join("  ")));
    lines.push(field("", toggles[2..].join("  ")));

    lines.push(field("scenarios:", ""));
    for (index, scenario) in config.scenarios().iter().enumerate() {
        lines.push(Line::from(vec![
            Span::raw(format!("  {}. ", index + 1)),
            Span::styled(scenario.name.clone(), Style::default().fg(Color::Yellow)),
            Span::raw(format!("  {}", scenario.count)),
        ]));
    }
    let summary = config.scenario_summary();
    let summary_color = if summary.is_balanced() {
        Color::Green
    } else {
        Color::Red
    };
    lines.push(Line::from(Span::styled(
        format!("  {}", summary.message()),
        Style::default().fg(summary_color),
    )));
    lines
}

fn render_messages(app: &App, height: usize) -> Paragraph<'static> {
    let total_lines = app.messages.len();
    if total_lines == 0 {
        return Paragraph::new("");
    }

    let view_end = total_lines.saturating_sub(app.scroll_offset as usize);
    let view_start = view_end.saturating_sub(height);

    let lines: Vec<Line<'static>> = app.messages[view_start..view_end]
        .iter()
        .map(|line| {
            if line.starts_with("►") {
                let text = line.trim_start_matches(['►', ' ']);
                Line::from(vec![
                    Span::styled("●", Style::default().fg(Color::Green)),
                    Span::raw(" "),
                    Span::styled(
                        text.to_string(),
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            } else if line.starts_with("error") {
                Line::from(Span::styled(line.clone(), Style::default().fg(Color::Red)))
            } else if line.starts_with("warning") {
                Line::from(Span::styled(
                    line.clone(),
                    Style::default().fg(Color::Yellow),
                ))
            } else {
                Line::from(Span::raw(line.clone()))
            }
        })
        .collect();

    Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false })
}

fn draw_preview(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let block = panel("Preview");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    let titles: Vec<&str> = PreviewTab::ALL.iter().map(|tab| tab.title()).collect();
    let tabs = Tabs::new(titles)
        .select(app.preview.tab.index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, layout[0]);

    let mut content = layout[1];
    if app.session.is_loading() {
        let spinner = SPINNER[app.spinner_idx % SPINNER.len()];
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!("{spinner} Generating..."),
                Style::default().fg(Color::Yellow),
            )),
            content,
        );
        return;
    }

    if let Some(error) = app.session.error() {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(content);
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!("Generation failed: {error}"),
                Style::default().fg(Color::Red),
            ))
            .wrap(Wrap { trim: true }),
            split[0],
        );
        content = split[1];
    }

    let Some(result) = app.session.result() else {
        if app.session.error().is_none() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "Configure the request and run /generate to preview data.",
                    Style::default().fg(Color::DarkGray),
                )),
                content,
            );
        }
        return;
    };

    match app.preview.tab {
        PreviewTab::Json => {
            let lines = app.tree_lines();
            frame.render_widget(render_tree(&lines, app.preview.cursor, content), content);
        }
        PreviewTab::Table => {
            let view = TableView::from_value(&result.data);
            draw_table(frame, &view, app.preview.scroll, content);
        }
        PreviewTab::Stats => {
            let stats = ResultStats::from_result(result);
            frame.render_widget(render_stats(&stats, app.preview.scroll), content);
        }
    }
}

fn render_tree(lines: &[TreeLine], cursor: usize, area: Rect) -> Paragraph<'static> {
    let height = area.height.max(1) as usize;
    let start = if cursor >= height {
        cursor + 1 - height
    } else {
        0
    };

    let rendered: Vec<Line<'static>> = lines
        .iter()
        .enumerate()
        .skip(start)
        .take(height)
        .map(|(index, line)| {
            let color = match line.toggle {
                Toggle::None => Color::White,
                Toggle::Collapsed | Toggle::Expanded => Color::Cyan,
            };
            let mut style = Style::default().fg(color);
            if index == cursor {
                style = style.bg(Color::Rgb(40, 40, 60)).add_modifier(Modifier::BOLD);
            }
            Line::from(Span::styled(line.render(), style))
        })
        .collect();

    Paragraph::new(Text::from(rendered))
}

fn draw_table(frame: &mut ratatui::Frame, view: &TableView, scroll: usize, area: Rect) {
    if view.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                EMPTY_TABLE_MESSAGE,
                Style::default().fg(Color::DarkGray),
            )),
            area,
        );
        return;
    }

    let notice = view.notice();
    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(u16::from(notice.is_some())),
        ])
        .split(area);

    let mut widths = vec![Constraint::Length(4)];
    for (index, column) in view.columns.iter().enumerate() {
        let widest = view
            .rows
            .iter()
            .map(|row| row[index].display().chars().count())
            .chain(std::iter::once(column.chars().count()))
            .max()
            .unwrap_or(1);
        widths.push(Constraint::Length((widest as u16).min(MAX_COLUMN_WIDTH)));
    }

    let header = Row::new(
        std::iter::once("#".to_string())
            .chain(view.columns.iter().cloned())
            .collect::<Vec<_>>(),
    )
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = view
        .rows
        .iter()
        .enumerate()
        .skip(scroll)
        .map(|(index, row)| {
            let mut cells = vec![ratatui::widgets::Cell::from((index + 1).to_string())];
            cells.extend(row.iter().map(table_cell));
            Row::new(cells)
        })
        .collect();

    frame.render_widget(Table::new(rows, widths).header(header), split[0]);

    if let Some(notice) = notice {
        frame.render_widget(
            Paragraph::new(Span::styled(notice, Style::default().fg(Color::DarkGray))),
            split[1],
        );
    }
}

fn table_cell(cell: &Cell) -> ratatui::widgets::Cell<'static> {
    let style = match cell {
        Cell::Empty => Style::default().fg(Color::DarkGray),
        Cell::Bool(true) => Style::default().fg(Color::Black).bg(Color::Green),
        Cell::Bool(false) => Style::default().fg(Color::Black).bg(Color::Red),
        Cell::Number(_) => Style::default().fg(Color::Yellow),
        Cell::Text { .. } => Style::default().fg(Color::White),
        Cell::Compound { .. } => Style::default().fg(Color::Magenta),
    };
    ratatui::widgets::Cell::from(cell.display().to_string()).style(style)
}

fn render_stats(stats: &ResultStats, scroll: usize) -> Paragraph<'static> {
    let mut lines = Vec::new();
    for section in stats.sections() {
        lines.push(Line::from(Span::styled(
            section.title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        for (label, value) in section.rows {
            lines.push(Line::from(vec![
                Span::styled(format!("  {label:<22} "), Style::default().fg(Color::DarkGray)),
                Span::styled(value, Style::default().fg(Color::White)),
            ]));
        }
        lines.push(Line::from(""));
    }
    Paragraph::new(Text::from(lines)).scroll((scroll.min(u16::MAX as usize) as u16, 0))
}

fn render_input_bar(app: &App, area: Rect) -> (Paragraph<'static>, Option<(u16, u16)>) {
    let prefix = "> ";
    let prefix_len = prefix.len();
    let (visible, cursor_x) = clipped_input(&app.input, area.width as usize, prefix_len);

    let content = if app.input.is_empty() {
        vec![
            Span::styled(prefix, Style::default().fg(Color::Cyan)),
            Span::styled(
                "Describe the data you need, or type / for commands...",
                Style::default().fg(Color::DarkGray),
            ),
        ]
    } else {
        vec![
            Span::styled(prefix, Style::default().fg(Color::Cyan)),
            Span::raw(visible),
        ]
    };

    let padding_line = Line::from("");
    let paragraph = Paragraph::new(vec![padding_line.clone(), Line::from(content), padding_line])
        .style(Style::default().bg(Color::Rgb(30, 30, 30)));

    let cursor = Some((area.x + cursor_x + prefix_len as u16, area.y + 1));
    (paragraph, cursor)
}

fn render_status_line(app: &App) -> Paragraph<'static> {
    let config = app.session.config();
    let status = format!(
        "{} . {} . {} x {}",
        config.domain().label(),
        config.generation_path().label(),
        config.count(),
        config.effective_entity(),
    );
    Paragraph::new(Line::from(vec![
        Span::styled(
            "Tip: /help lists commands, TAB switches preview.",
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("   "),
        Span::styled(status, Style::default().fg(Color::DarkGray)),
    ]))
}

fn render_palette(entries: &[PaletteEntry], selected_idx: usize) -> Paragraph<'static> {
    let start_idx = if selected_idx >= MAX_PALETTE_LINES {
        selected_idx - MAX_PALETTE_LINES + 1
    } else {
        0
    };
    let end_idx = (start_idx + MAX_PALETTE_LINES).min(entries.len());

    let lines: Vec<Line<'static>> = entries[start_idx..end_idx]
        .iter()
        .enumerate()
        .map(|(offset, entry)| {
            let text = format!("{:<22}  {}", entry.command, entry.description);
            if start_idx + offset == selected_idx {
                Line::from(Span::styled(
                    text,
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)))
            }
        })
        .collect();
    Paragraph::new(Text::from(lines))
}
