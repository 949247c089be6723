use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use agrofind_core::model::Category;

use crate::tui::app::CATEGORY_FILTERS;

/// Category filter bar for search, cycled with `f`.
pub struct CategoryBar {
    pub selected_index: usize,
}

impl Widget for CategoryBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans: Vec<Span> = Vec::new();
        spans.push(Span::styled(
            "Categoria: ",
            Style::default().fg(Color::DarkGray),
        ));

        for (i, filter) in CATEGORY_FILTERS.iter().enumerate() {
            let label = match filter {
                None => "Todas",
                Some(Category::Anuncio) => "📢 Anúncios",
                Some(Category::Organico) => "🌱 Orgânico",
            };

            let style = if i == self.selected_index {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            spans.push(Span::styled(format!(" {label} "), style));

            if i < CATEGORY_FILTERS.len() - 1 {
                spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
            }
        }

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
