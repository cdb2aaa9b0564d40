use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::models::{StreakData, STREAK_BADGES};
use crate::tui::theme;
use crate::utils::format::{format_days, progress_bar};

pub fn render(frame: &mut Frame, area: Rect, streak: &StreakData) {
    let block = Block::default()
        .title(Span::styled(" Streak ", theme::accent()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(false))
        .style(theme::surface());

    // Bar fills toward the top badge
    let bar = progress_bar(streak.current, STREAK_BADGES[2].0, 12);
    let current_style = if streak.current > 0 {
        theme::green().add_modifier(Modifier::BOLD)
    } else {
        theme::dim()
    };

    let streak_line = Line::from(vec![
        Span::styled("  ", theme::dim()),
        Span::styled(bar, theme::green()),
        Span::styled(format!("  {}", format_days(streak.current)), current_style),
    ]);

    let meta_line = Line::from(Span::styled(
        format!("  Best: {}", format_days(streak.best)),
        theme::dim(),
    ));

    let mut badge_spans = vec![Span::styled("  ", theme::dim())];
    for (_, label) in STREAK_BADGES {
        let style = if streak.achievements.iter().any(|a| a == label) {
            theme::amber().add_modifier(Modifier::BOLD)
        } else {
            theme::dim()
        };
        badge_spans.push(Span::styled(format!("[{}] ", label), style));
    }

    let text = vec![
        Line::from(""),
        streak_line,
        meta_line,
        Line::from(""),
        Line::from(badge_spans),
    ];
    frame.render_widget(Paragraph::new(text).block(block), area);
}
