use chrono::NaiveDate;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Three-letter English month abbreviations → month number.
static MONTHS: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    [
        "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
    ]
    .into_iter()
    .zip(1..)
    .collect()
});

/// `"May"` → `Some(5)`; anything that isn't a known abbreviation → `None`.
pub fn month_number(s: &str) -> Option<u32> {
    MONTHS.get(s.to_ascii_lowercase().as_str()).copied()
}

/// Plain decimal day-of-month, digits only; range is checked when the date
/// is built.
pub fn parse_day(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Combine `day` + `month` + `year` into `YYYY-MM-DD`.
///
/// Returns `None` for a missing or unknown component and for dates that don't
/// exist (`feb 30`).
pub fn contact_date(year: i32, month: Option<&str>, day: Option<&str>) -> Option<String> {
    let m = month_number(month?)?;
    let d = parse_day(day?)?;
    NaiveDate::from_ymd_opt(year, m, d).map(|date| date.format("%Y-%m-%d").to_string())
}
