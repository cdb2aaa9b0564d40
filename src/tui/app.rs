use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use std::collections::BTreeMap;

use crate::cli::handlers::streak_message;
use crate::config::AppConfig;
use crate::content::QuestionCollection;
use crate::models::question::{parse_choice, CHOICE_LETTERS};
use crate::models::{DailyRecord, Difficulty, Question, StatsData, StreakData};
use crate::progress::ProgressTracker;
use crate::tui::events::{Event, EventSource};
use crate::tui::theme;
use crate::tui::widgets::{calendar, header, question, statusbar, streak};
use crate::utils::date::{format_date_key, today_in_offset};
use crate::utils::format::{format_accuracy, format_days, progress_bar};

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Dashboard,
    Stats,
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub correct: bool,
    pub message: String,
}

pub struct App {
    pub view: View,
    pub config: AppConfig,
    pub should_quit: bool,
    pub selected: usize,
    pub feedback: Option<Feedback>,

    tracker: ProgressTracker,
    collection: Option<QuestionCollection>,

    // Cached state (refreshed on tick/action)
    pub question_date: NaiveDate,
    pub today: NaiveDate,
    pub records: BTreeMap<String, DailyRecord>,
    pub streak: StreakData,
    pub stats: StatsData,
}

impl App {
    pub fn new(
        tracker: ProgressTracker,
        config: AppConfig,
        collection: Option<QuestionCollection>,
    ) -> Self {
        let question_date = today_in_offset(config.content.timezone_offset);
        let today = tracker.today();
        let mut app = App {
            view: View::Dashboard,
            config,
            should_quit: false,
            selected: 0,
            feedback: None,
            tracker,
            collection,
            question_date,
            today,
            records: BTreeMap::new(),
            streak: StreakData::default(),
            stats: StatsData::default(),
        };
        app.load();
        app
    }

    pub fn load(&mut self) {
        let data = self.tracker.store().load();
        self.stats = crate::progress::aggregate_stats(&data.daily_records);
        self.records = data.daily_records;
        self.streak = data.streak;
    }

    /// Roll over to the next question once the content day changes.
    pub fn tick(&mut self) {
        let question_date = today_in_offset(self.config.content.timezone_offset);
        let today = self.tracker.today();
        if question_date != self.question_date || today != self.today {
            self.question_date = question_date;
            self.today = today;
            self.selected = 0;
            self.feedback = None;
            self.load();
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.collection
            .as_ref()
            .and_then(|c| c.daily_question(self.question_date))
    }

    pub fn current_record(&self) -> Option<&DailyRecord> {
        self.records
            .get(&format_date_key(self.question_date))
            .filter(|r| r.answered)
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Some terminals also report release and repeat events
        if key.kind != KeyEventKind::Press {
            return;
        }
        match self.view {
            View::Dashboard => self.handle_dashboard_key(key),
            View::Stats => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('s')) {
                    self.view = View::Dashboard;
                }
            }
            View::Help => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                    self.view = View::Dashboard;
                }
            }
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.view = View::Help;
            }
            KeyCode::Char('s') => {
                self.view = View::Stats;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < CHOICE_LETTERS.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char(c) => {
                if let Some(choice) = parse_choice(&c.to_string()) {
                    self.selected = choice as usize;
                }
            }
            KeyCode::Enter => self.submit(),
            _ => {}
        }
    }

    fn submit(&mut self) {
        if self.current_record().is_some() {
            self.feedback = Some(Feedback {
                correct: false,
                message: "Already answered today. Come back tomorrow".to_string(),
            });
            return;
        }
        let Some(q) = self.current_question() else {
            return;
        };
        let choice = self.selected as u8;
        let correct = q.is_correct(choice);
        let difficulty: Difficulty = q.meta.difficulty;
        let title = Some(q.meta.title.clone());
        let answer = q.correct_letter();

        let outcome = self
            .tracker
            .save_answer(self.question_date, correct, choice, difficulty, title);

        let verdict = if correct {
            "Correct!".to_string()
        } else {
            format!("Wrong, the answer is {}", answer)
        };
        self.feedback = Some(Feedback {
            correct,
            message: format!("{}  ·  {}", verdict, streak_message(&outcome)),
        });
        self.load();
        // Keep the returned streak even when the store dropped the save
        self.streak = outcome.streak;
    }

    pub fn draw(&self, frame: &mut Frame) {
        match self.view {
            View::Dashboard => self.draw_dashboard(frame),
            View::Stats => self.draw_stats(frame),
            View::Help => {
                self.draw_dashboard(frame);
                self.draw_help_overlay(frame);
            }
        }
    }

    fn draw_dashboard(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let outer_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // header
                Constraint::Min(0),    // body
                Constraint::Length(1), // feedback
                Constraint::Length(1), // status bar
            ])
            .split(area);

        header::render(
            frame,
            outer_chunks[0],
            self.question_date,
            self.tracker.store().is_available(),
        );

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(outer_chunks[1]);

        question::render(
            frame,
            columns[0],
            self.current_question(),
            self.selected,
            self.current_record(),
        );

        let right_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(7), Constraint::Min(0)])
            .split(columns[1]);

        streak::render(frame, right_chunks[0], &self.streak);
        calendar::render(frame, right_chunks[1], &self.records, self.today);

        if let Some(feedback) = &self.feedback {
            let style = if feedback.correct {
                theme::green().add_modifier(Modifier::BOLD)
            } else {
                theme::amber()
            };
            let line = Line::from(Span::styled(format!("  {}", feedback.message), style));
            frame.render_widget(Paragraph::new(line), outer_chunks[2]);
        }

        statusbar::render(frame, outer_chunks[3]);
    }

    fn draw_stats(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let title = Paragraph::new(Line::from(vec![
            Span::styled("  Stats  ", theme::accent().add_modifier(Modifier::BOLD)),
            Span::styled("  [Esc] back", theme::dim()),
        ]));
        frame.render_widget(title, chunks[0]);

        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  Streak (current):  ", theme::dim()),
                Span::styled(
                    format_days(self.streak.current),
                    theme::green().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Streak (best):     ", theme::dim()),
                Span::styled(format_days(self.streak.best), theme::green()),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("  Answered:          ", theme::dim()),
                Span::styled(self.stats.total_answered.to_string(), theme::bold()),
            ]),
            Line::from(vec![
                Span::styled("  Correct:           ", theme::dim()),
                Span::styled(self.stats.total_correct.to_string(), theme::bold()),
            ]),
            Line::from(vec![
                Span::styled("  Accuracy:          ", theme::dim()),
                Span::styled(format_accuracy(self.stats.accuracy), theme::amber()),
            ]),
            Line::from(""),
            Line::from(Span::styled("  By Difficulty", theme::accent())),
            Line::from(""),
        ];

        for difficulty in Difficulty::all() {
            let d = self.stats.by_difficulty.get(difficulty);
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<8}", difficulty.display_name()), theme::dim()),
                Span::styled(progress_bar(d.correct, d.answered, 12), theme::green()),
                Span::styled(format!("  {}/{}", d.correct, d.answered), theme::dim()),
            ]));
        }

        frame.render_widget(Paragraph::new(lines), chunks[1]);
    }

    fn draw_help_overlay(&self, frame: &mut Frame) {
        let area = frame.area();
        let popup_area = Rect {
            x: area.width / 4,
            y: area.height / 4,
            width: area.width / 2,
            height: area.height / 2,
        };

        frame.render_widget(Clear, popup_area);

        let bindings = [
            ("  [↑ ↓] / j k  ", "Move between choices"),
            ("  [a-d]        ", "Pick a choice"),
            ("  Enter        ", "Submit today's answer"),
            ("  [s]          ", "Stats view"),
            ("  [?]          ", "Toggle help"),
            ("  [Esc] / q    ", "Quit"),
        ];
        let mut help_text = vec![
            Line::from(Span::styled(
                "  Keybindings",
                theme::accent().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (key, label) in bindings {
            help_text.push(Line::from(vec![
                Span::styled(key, theme::accent()),
                Span::styled(label, theme::dim()),
            ]));
        }

        let block = Block::default()
            .title(Span::styled(" Help ", theme::accent()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::accent())
            .style(theme::surface());

        frame.render_widget(Paragraph::new(help_text).block(block), popup_area);
    }
}

/// Run the TUI event loop.
pub fn run(
    tracker: ProgressTracker,
    config: AppConfig,
    collection: Option<QuestionCollection>,
) -> Result<()> {
    let mut app = App::new(tracker, config, collection);

    let mut terminal = ratatui::init();
    let mut events = EventSource::new(1000);

    let result = (|| -> Result<()> {
        loop {
            terminal.draw(|frame| app.draw(frame))?;
            match events.next()? {
                Event::Key(key) => {
                    app.handle_key(key);
                    if app.should_quit {
                        return Ok(());
                    }
                }
                Event::Tick => app.tick(),
            }
        }
    })();

    ratatui::restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::parser::parse_question_content;
    use crate::db::{MemoryBackend, RecordStore, DEFAULT_STORAGE_KEY};
    use crate::utils::date::FixedClock;
    use crossterm::event::KeyModifiers;

    fn app() -> App {
        let config = AppConfig::default();
        let date = today_in_offset(config.content.timezone_offset);
        let content = format!(
            "---\ntitle: Traits\nquestion: Which keyword declares a trait?\ndate: {}\nchoices: [impl, trait, dyn, type]\ncorrect: 1\ndifficulty: easy\n---\n\n`trait` declares one.\n",
            format_date_key(date)
        );
        let q = parse_question_content("traits", &content).unwrap();
        let tracker = ProgressTracker::with_clock(
            RecordStore::new(MemoryBackend::new(), DEFAULT_STORAGE_KEY),
            FixedClock(date),
        );
        App::new(tracker, config, Some(QuestionCollection::new(vec![q])))
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut app = app();
        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected, 0);
        for _ in 0..6 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.selected, 3);
        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_correct_submission_updates_streak() {
        let mut app = app();
        press(&mut app, KeyCode::Char('b'));
        press(&mut app, KeyCode::Enter);
        let feedback = app.feedback.clone().unwrap();
        assert!(feedback.correct);
        assert!(feedback.message.starts_with("Correct!"));
        assert_eq!(app.streak.current, 1);
        assert_eq!(app.stats.total_answered, 1);
        assert_eq!(app.stats.by_difficulty.easy.correct, 1);
        assert!(app.current_record().is_some());
    }

    #[test]
    fn test_wrong_submission_and_no_second_try() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Enter);
        let feedback = app.feedback.clone().unwrap();
        assert!(!feedback.correct);
        assert!(feedback.message.contains("the answer is B"));
        assert_eq!(app.streak.current, 0);

        press(&mut app, KeyCode::Char('b'));
        press(&mut app, KeyCode::Enter);
        assert!(app.feedback.unwrap().message.starts_with("Already answered"));
        assert!(!app.records.values().next().unwrap().correct);
    }

    #[test]
    fn test_views_and_quit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.view, View::Stats);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.view, View::Dashboard);
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.view, View::Help);
        press(&mut app, KeyCode::Char('?'));
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }
}
