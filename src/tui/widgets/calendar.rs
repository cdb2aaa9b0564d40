use chrono::{Datelike, Duration, NaiveDate};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use std::collections::BTreeMap;

use crate::models::DailyRecord;
use crate::tui::theme;
use crate::utils::date::format_date_key;
use crate::utils::format::truncate_to_width;

const DAYS_SHOWN: i64 = 14;

/// Two-week strip of answered days, oldest on the left, and the latest titles below.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    records: &BTreeMap<String, DailyRecord>,
    today: NaiveDate,
) {
    let block = Block::default()
        .title(Span::styled(" Last 14 Days ", theme::accent()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(false))
        .style(theme::surface());

    let mut weekday_spans = vec![Span::styled("  ", theme::dim())];
    let mut dot_spans = vec![Span::styled("  ", theme::dim())];
    for offset in (0..DAYS_SHOWN).rev() {
        let day = today - Duration::days(offset);
        let initial = day.weekday().to_string().chars().next().unwrap_or(' ');
        weekday_spans.push(Span::styled(format!("{} ", initial), theme::dim()));

        let (dot, style) = match records.get(&format_date_key(day)).filter(|r| r.answered) {
            Some(rec) if rec.correct => ("●", theme::green()),
            Some(_) => ("✗", theme::red()),
            None => ("○", theme::dim()),
        };
        dot_spans.push(Span::styled(dot, style));
        dot_spans.push(Span::raw(" "));
    }

    let mut lines = vec![
        Line::from(""),
        Line::from(weekday_spans),
        Line::from(dot_spans),
        Line::from(""),
    ];

    let title_width = area.width.saturating_sub(18) as usize;
    let visible = area.height.saturating_sub(6) as usize;
    for (date, rec) in records.iter().rev().take(visible) {
        let style = if rec.correct { theme::green() } else { theme::red() };
        lines.push(Line::from(vec![
            Span::styled(format!("  {}  ", date.get(5..).unwrap_or(date)), style),
            Span::styled(
                truncate_to_width(rec.title.as_deref().unwrap_or("-"), title_width),
                theme::dim(),
            ),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
