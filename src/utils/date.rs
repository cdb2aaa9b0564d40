use chrono::{DateTime, FixedOffset, Local, NaiveDate, Utc};

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// China Standard Time, minutes east of UTC
pub const CHINA_OFFSET_MINUTES: i32 = 8 * 60;

/// Format a calendar date as its `YYYY-MM-DD` key.
pub fn format_date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` key. Only the zero-padded canonical form is accepted.
pub fn parse_date_key(s: &str) -> Option<NaiveDate> {
    if s.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_KEY_FORMAT).ok()
}

/// Whole calendar days from `earlier` to `later`.
pub fn day_gap(later: NaiveDate, earlier: NaiveDate) -> i64 {
    (later - earlier).num_days()
}

/// Today's calendar date at a fixed offset from UTC. Used for content selection,
/// so a question rolls over at the same instant for every reader.
pub fn today_in_offset(offset_minutes: i32) -> NaiveDate {
    let now = Utc::now();
    match offset_minutes.checked_mul(60).and_then(FixedOffset::east_opt) {
        Some(offset) => now.with_timezone(&offset).date_naive(),
        None => now.date_naive(),
    }
}

/// Source of the current instant for streak math and record timestamps.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    fn timestamp_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock stopped at noon of a given day.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        use chrono::TimeZone;
        let noon = self.0.and_hms_opt(12, 0, 0).expect("noon is a valid time");
        Local
            .from_local_datetime(&noon)
            .earliest()
            .expect("noon exists in the local time zone")
    }
}
