use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::tui::app::{InputMode, Screen};

/// Bottom help bar showing context-sensitive key bindings.
pub struct HelpBar<'a> {
    pub screen: &'a Screen,
    pub input_mode: &'a InputMode,
}

impl Widget for HelpBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default().fg(Color::DarkGray);
        let key_style = Style::default().fg(Color::Cyan);

        let spans: Vec<Span> = match (self.screen, self.input_mode) {
            (Screen::Login, _) => vec![
                Span::styled("Enter", key_style),
                Span::styled(" entrar  ", style),
                Span::styled("q", key_style),
                Span::styled(" sair", style),
            ],
            (Screen::Search, InputMode::Normal) => vec![
                Span::styled("/", key_style),
                Span::styled(" buscar  ", style),
                Span::styled("f", key_style),
                Span::styled(" categoria  ", style),
                Span::styled("j/k", key_style),
                Span::styled(" navegar  ", style),
                Span::styled("u", key_style),
                Span::styled(" upload  ", style),
                Span::styled("o", key_style),
                Span::styled(" sair da sessão  ", style),
                Span::styled("q", key_style),
                Span::styled(" sair", style),
            ],
            (Screen::Search, InputMode::Query) => vec![
                Span::styled("Enter", key_style),
                Span::styled(" buscar  ", style),
                Span::styled("Esc", key_style),
                Span::styled(" cancelar", style),
            ],
            (Screen::Upload, _) => vec![
                Span::styled("Enter", key_style),
                Span::styled(" selecionar  ", style),
                Span::styled("Tab", key_style),
                Span::styled(" campo  ", style),
                Span::styled("Ctrl+S", key_style),
                Span::styled(" enviar  ", style),
                Span::styled("Esc", key_style),
                Span::styled(" voltar", style),
            ],
        };

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
