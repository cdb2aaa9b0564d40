use chrono::{Local, NaiveDate};
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::tui::theme;
use crate::utils::date::format_date_key;

pub fn render(frame: &mut Frame, area: Rect, question_date: NaiveDate, storage_available: bool) {
    let local_str = Local::now().format("%A, %b %d, %Y").to_string();

    let title_line = Line::from(vec![
        Span::styled("  每日一题  ", theme::accent().add_modifier(Modifier::BOLD)),
        Span::styled("dailyq", theme::accent()),
    ]);

    let mut date_spans = vec![
        Span::styled(
            format!("question of {}", format_date_key(question_date)),
            theme::amber(),
        ),
        Span::styled("  ·  ", theme::dim()),
        Span::styled(local_str, theme::dim()),
    ];
    if !storage_available {
        date_spans.push(Span::styled("  ·  not saving", theme::red()));
    }

    let text = vec![title_line, Line::from(""), Line::from(date_spans)];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::accent().add_modifier(Modifier::BOLD))
        .style(theme::base());

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
