use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

use agrofind_core::model::{HealthState, SearchOutcome};
use agrofind_core::present;

use crate::tui::{
    app::{App, InputMode},
    widgets::{badge_color, category_bar::CategoryBar, help_bar::HelpBar, text_field::TextField},
};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let layout = Layout::vertical([
        Constraint::Length(3), // query input
        Constraint::Length(1), // category filter + health
        Constraint::Min(5),    // results table
        Constraint::Length(8), // preview pane
        Constraint::Length(1), // help bar
    ])
    .split(area);

    frame.render_widget(
        TextField {
            text: &app.query_input,
            cursor: app.query_cursor,
            focused: app.input_mode == InputMode::Query,
            title: if app.input_mode == InputMode::Query {
                " Busca (Enter envia, Esc cancela) "
            } else {
                " Busca (pressione /) "
            },
        },
        layout[0],
    );

    render_status_bar(frame, app, layout[1]);
    render_results(frame, app, layout[2]);
    render_preview(frame, app, layout[3]);

    frame.render_widget(
        HelpBar {
            screen: &app.screen,
            input_mode: &app.input_mode,
        },
        layout[4],
    );
}

/// One line: category filter on the left, health indicator on the right.
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let health_width = 24u16;
    let [filter_area, health_area] =
        Layout::horizontal([Constraint::Min(10), Constraint::Length(health_width)]).areas(area);

    frame.render_widget(
        CategoryBar {
            selected_index: app.filter_index,
        },
        filter_area,
    );

    let (dot_color, label) = match app.health {
        HealthState::Healthy => (Color::Green, app.health.label()),
        HealthState::Checking => (Color::Yellow, app.health.label()),
        HealthState::Unhealthy => (Color::Red, app.health.label()),
    };
    let health_line = Line::from(vec![
        Span::styled("● ", Style::default().fg(dot_color)),
        Span::styled(label, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(health_line), health_area);
}

fn render_results(frame: &mut Frame, app: &App, area: Rect) {
    match &app.outcome {
        SearchOutcome::Loading => {
            let loading = Paragraph::new(Line::from(Span::styled(
                "  Buscando documentos relevantes...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
            frame.render_widget(loading, area);
        }
        SearchOutcome::Failure { message } => {
            let error = Paragraph::new(Line::from(Span::styled(
                format!("  ✗ {message}"),
                Style::default().fg(Color::Red),
            )))
            .wrap(Wrap { trim: false });
            frame.render_widget(error, area);
        }
        SearchOutcome::Idle => {
            render_placeholder(
                frame,
                area,
                "Busca Semântica de Documentos",
                "Pressione / e digite uma busca para encontrar documentos relevantes.",
            );
        }
        SearchOutcome::Success {
            results,
            processing_time_ms,
        } => {
            if results.is_empty() {
                render_placeholder(
                    frame,
                    area,
                    "Nenhum resultado encontrado",
                    "Tente reformular sua busca ou usar outros termos.",
                );
                return;
            }
            render_table(frame, app, area, results.len(), *processing_time_ms);
        }
    }
}

fn render_placeholder(frame: &mut Frame, area: Rect, title: &str, hint: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {title}"),
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("  {hint}"),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_table(frame: &mut Frame, app: &App, area: Rect, count: usize, processing_time_ms: f64) {
    let noun = if count == 1 {
        "resultado encontrado"
    } else {
        "resultados encontrados"
    };
    let title = format!(" {count} {noun} · {processing_time_ms:.0}ms ");

    let header = Row::new(vec![
        Cell::from("#"),
        Cell::from("Arquivo"),
        Cell::from("Categoria"),
        Cell::from("Relevância"),
        Cell::from("Data"),
        Cell::from("Pág."),
    ])
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .bottom_margin(1);

    let rows: Vec<Row> = app
        .outcome
        .results()
        .iter()
        .enumerate()
        .map(|(index, result)| {
            let badge = present::category_badge(&result.category);
            let tier = present::relevance_tier(result.similarity_score);
            let percent = present::relevance_percent(result.similarity_score);

            let row = Row::new(vec![
                Cell::from(format!("{}", index + 1)),
                Cell::from(result.filename.clone()),
                Cell::from(Span::styled(
                    format!("{} {}", badge.icon, badge.label),
                    Style::default().fg(badge_color(badge.color)),
                )),
                Cell::from(Line::from(vec![
                    Span::styled("● ", Style::default().fg(badge_color(tier.color()))),
                    Span::raw(format!("{} ({percent})", tier.label())),
                ])),
                Cell::from(present::format_upload_date(&result.upload_date)),
                Cell::from(
                    result
                        .page_number
                        .map(|p| p.to_string())
                        .unwrap_or_else(|| "—".to_string()),
                ),
            ]);
            if index == app.selected {
                row.style(
                    Style::default()
                        .bg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                row
            }
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Min(20),
            Constraint::Length(14),
            Constraint::Length(18),
            Constraint::Length(12),
            Constraint::Length(5),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title),
    );

    frame.render_widget(table, area);
}

/// Preview pane for the selected result: truncated chunk text, word count,
/// and the document link.
fn render_preview(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Trecho ");

    let Some(result) = app.outcome.results().get(app.selected) else {
        frame.render_widget(block, area);
        return;
    };

    let preview = present::truncate_chunk(&result.chunk_text, present::CHUNK_PREVIEW_CHARS);
    let words = present::word_count(&result.chunk_text);

    let lines = vec![
        Line::from(Span::raw(preview)),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("{words} palavras · "),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                result.gcs_url.clone(),
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]),
    ];

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
