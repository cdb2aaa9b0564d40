pub mod calendar;
pub mod header;
pub mod question;
pub mod statusbar;
pub mod streak;
