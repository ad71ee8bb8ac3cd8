use chrono::{Datelike, Duration, Months, NaiveDate};

/// First day of the calendar month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

/// First day of the following calendar month.
pub fn next_month_start(date: NaiveDate) -> NaiveDate {
    // Day 28 + 4 always lands in the next month
    month_start(month_start(date) + Duration::days(32))
}

/// The current calendar month as a half-open range `[start, end)`.
pub fn current_month(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (month_start(today), next_month_start(today))
}

/// Trailing window of `months` calendar months ending at `today`, inclusive.
/// The start is the same day-of-month `months` months back, clamped to the
/// end of shorter months.
pub fn trailing_months(today: NaiveDate, months: u32) -> (NaiveDate, NaiveDate) {
    let start = today
        .checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN);
    (start, today)
}
