use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::models::question::choice_letter;
use crate::models::{DailyRecord, Question};
use crate::tui::theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    question: Option<&Question>,
    selected: usize,
    answered: Option<&DailyRecord>,
) {
    let block = Block::default()
        .title(Span::styled(" Question ", theme::accent()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(answered.is_none()))
        .style(theme::surface());

    let Some(question) = question else {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled("  No question for today", theme::dim())),
            Line::from(Span::styled(
                "  Add question files and run `dailyq dates` to check them",
                theme::dim(),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).block(block), area);
        return;
    };

    let meta = &question.meta;
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {}", meta.title), theme::bold())),
        Line::from(Span::styled(
            format!("  {}  ·  {}", meta.difficulty, meta.tags.join(", ")),
            theme::dim(),
        )),
        Line::from(""),
        Line::from(Span::styled(format!("  {}", meta.question), theme::bold())),
        Line::from(""),
    ];

    for (i, choice) in meta.choices.iter().enumerate() {
        let letter = choice_letter(i as u8);
        let (marker, style) = match answered {
            Some(_) if i == meta.correct as usize => {
                ("✓", theme::green().add_modifier(Modifier::BOLD))
            }
            Some(rec) if i == rec.selected_answer as usize => ("✗", theme::red()),
            Some(_) => (" ", theme::dim()),
            None if i == selected => ("›", theme::accent().add_modifier(Modifier::BOLD)),
            None => (" ", theme::bold()),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {} ", marker), style),
            Span::styled(format!("{}. {}", letter, choice), style),
        ]));
    }

    if answered.is_some() && !question.body.is_empty() {
        lines.push(Line::from(""));
        for line in question.body.lines() {
            lines.push(Line::from(Span::styled(format!("  {}", line), theme::dim())));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
