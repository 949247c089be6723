use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use agrofind_core::model::{Category, UploadState, ALL_CATEGORIES};

use crate::tui::{
    app::App,
    widgets::{help_bar::HelpBar, text_field::TextField},
};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let layout = Layout::vertical([
        Constraint::Length(3), // path input
        Constraint::Length(3), // category selector
        Constraint::Min(5),    // status message
        Constraint::Length(1), // help bar
    ])
    .split(area);

    frame.render_widget(
        TextField {
            text: &app.path_input,
            cursor: app.path_input.len(),
            focused: app.upload_field == 0,
            title: " Arquivo PDF (Enter seleciona) ",
        },
        layout[0],
    );

    render_category_selector(frame, app, layout[1]);
    render_state(frame, app, layout[2]);

    frame.render_widget(
        HelpBar {
            screen: &app.screen,
            input_mode: &app.input_mode,
        },
        layout[3],
    );
}

fn render_category_selector(frame: &mut Frame, app: &App, area: Rect) {
    let border_style = if app.upload_field == 1 {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Categoria ");

    let spans: Vec<Span> = ALL_CATEGORIES
        .iter()
        .enumerate()
        .flat_map(|(i, category)| {
            let (icon, label, hint) = match category {
                Category::Anuncio => ("📢", "Anúncio", "campanhas publicitárias"),
                Category::Organico => ("🌱", "Orgânico", "análises de redes sociais"),
            };
            let style = if i == app.upload_category_index {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            vec![
                Span::styled(format!(" {icon} {label}"), style),
                Span::styled(
                    format!(" ({hint})  "),
                    Style::default().fg(Color::DarkGray),
                ),
            ]
        })
        .collect();

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_state(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = match &app.upload {
        UploadState::Empty => vec![
            Line::from(""),
            Line::from(Span::styled(
                "  O documento será enviado e automaticamente indexado para busca",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                "  semântica. O processo pode levar alguns segundos.",
                Style::default().fg(Color::DarkGray),
            )),
        ],
        UploadState::Selected { file } => vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  ✓ ", Style::default().fg(Color::Green)),
                Span::styled(
                    file.filename.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" ({:.2} MB)", file.size_mb()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            Line::from(Span::styled(
                "  Ctrl+S para enviar e indexar",
                Style::default().fg(Color::DarkGray),
            )),
        ],
        UploadState::Uploading { file } => vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  Processando {}...", file.filename),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
        ],
        UploadState::Succeeded { message } => vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  {message}"),
                Style::default().fg(Color::Green),
            )),
        ],
        UploadState::Failed { message } => vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  ✗ {message}"),
                Style::default().fg(Color::Red),
            )),
        ],
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Upload de Novo Documento PDF "),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
