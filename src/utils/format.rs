use unicode_width::UnicodeWidthChar;

/// Format an accuracy percentage, dropping a trailing ".0"
pub fn format_accuracy(accuracy: f64) -> String {
    if accuracy == accuracy.floor() {
        format!("{}%", accuracy as i64)
    } else {
        format!("{:.1}%", accuracy)
    }
}

/// Plural-aware day count: "1 day", "4 days"
pub fn format_days(n: u32) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", n)
    }
}

/// Create a simple ASCII progress bar
pub fn progress_bar(filled: u32, total: u32, width: usize) -> String {
    if total == 0 {
        return "░".repeat(width);
    }
    let ratio = (filled as f64 / total as f64).min(1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

/// Cut `s` to at most `max_width` terminal columns, ending with "…" when cut.
/// Question titles are often CJK, where one char takes two columns.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
