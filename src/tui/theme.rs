use ratatui::style::{Color, Modifier, Style};

pub const BG: Color = Color::Rgb(16, 18, 22);
pub const SURFACE: Color = Color::Rgb(24, 28, 34);
pub const BORDER: Color = Color::Rgb(48, 56, 66);
pub const TEXT: Color = Color::Rgb(220, 226, 232);
pub const TEXT_DIM: Color = Color::Rgb(120, 132, 144);
pub const ACCENT: Color = Color::Rgb(86, 182, 194);
pub const GREEN: Color = Color::Rgb(110, 176, 96);
pub const AMBER: Color = Color::Rgb(214, 160, 72);
pub const RED: Color = Color::Rgb(200, 90, 80);

pub fn base() -> Style {
    Style::default().fg(TEXT).bg(BG)
}

pub fn surface() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub fn border(focused: bool) -> Style {
    if focused {
        accent()
    } else {
        Style::default().fg(BORDER)
    }
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn green() -> Style {
    Style::default().fg(GREEN)
}

pub fn amber() -> Style {
    Style::default().fg(AMBER)
}

pub fn red() -> Style {
    Style::default().fg(RED)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}
