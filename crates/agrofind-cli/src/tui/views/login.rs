use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const LOGO: &[&str] = &[
    r"                       __ _           _ ",
    r"  __ _  __ _ _ __ ___ / _(_)_ __   __| |",
    r" / _` |/ _` | '__/ _ \ |_| | '_ \ / _` |",
    r"| (_| | (_| | | | (_) |  _| | | | (_| |",
    r" \__,_|\__, |_|  \___/|_| |_| |_|\__,_|",
    r"       |___/                            ",
];

pub fn render(frame: &mut Frame, area: Rect, base_url_info: &str) {
    let block_height = LOGO.len() as u16 + 7;
    let block_width = 48;

    let [center_y] = Layout::vertical([Constraint::Length(block_height)])
        .flex(Flex::Center)
        .areas(area);
    let [center] = Layout::horizontal([Constraint::Length(block_width)])
        .flex(Flex::Center)
        .areas(center_y);

    let mut lines: Vec<Line> = Vec::new();

    for row in LOGO {
        lines.push(Line::from(Span::styled(
            *row,
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )));
    }

    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        "  🌾 Busca semântica de documentos agro",
        Style::default().fg(Color::DarkGray),
    )));

    lines.push(Line::from(""));

    lines.push(Line::from(vec![
        Span::styled("  api ", Style::default().fg(Color::DarkGray)),
        Span::styled(base_url_info.to_string(), Style::default().fg(Color::Magenta)),
    ]));

    lines.push(Line::from(""));

    lines.push(Line::from(vec![
        Span::styled("  Enter", Style::default().fg(Color::Cyan)),
        Span::styled(" entrar   ", Style::default().fg(Color::DarkGray)),
        Span::styled("q", Style::default().fg(Color::Cyan)),
        Span::styled(" sair", Style::default().fg(Color::DarkGray)),
    ]));

    frame.render_widget(Paragraph::new(lines), center);
}
