//! Shop-local calendar periods and their UTC instant ranges.
//!
//! The shop runs on a fixed UTC+06:30 offset with no daylight saving, so a
//! local civil day or month maps onto a half-open UTC interval by plain
//! offset subtraction. Nothing here consults the server's local timezone.

use chrono::{DateTime, Datelike, Duration, NaiveDate, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{SHOP_UTC_OFFSET_MINUTES, SHOP_UTC_OFFSET_SUFFIX};
use crate::errors::{AppError, AppResult};

static LOCAL_DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("local date pattern is valid"));

const INVALID_DATE: &str = "Invalid date. Expected YYYY-MM-DD";
const INVALID_MONTH: &str = "Invalid or missing year/month";

/// Years a month report may name. Four-digit years only, like dates.
const YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

fn shop_offset() -> Duration {
    Duration::minutes(i64::from(SHOP_UTC_OFFSET_MINUTES))
}

/// Half-open UTC interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtcRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl UtcRange {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// Range between two shop-local midnights, `start_date` inclusive and
/// `end_date` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalRange {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl LocalRange {
    fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// UTC instant of local midnight starting `date`.
    fn local_midnight_utc(date: NaiveDate) -> DateTime<Utc> {
        let midnight = date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc();
        midnight
            .checked_sub_signed(shop_offset())
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    fn local_midnight_iso(date: NaiveDate) -> String {
        format!("{}T00:00:00{}", date.format("%Y-%m-%d"), SHOP_UTC_OFFSET_SUFFIX)
    }

    pub fn utc(&self) -> UtcRange {
        UtcRange {
            start: Self::local_midnight_utc(self.start_date),
            end: Self::local_midnight_utc(self.end_date),
        }
    }

    /// e.g. `2026-01-15T00:00:00+06:30`
    pub fn start_local(&self) -> String {
        Self::local_midnight_iso(self.start_date)
    }

    pub fn end_local_exclusive(&self) -> String {
        Self::local_midnight_iso(self.end_date)
    }

    /// e.g. `2026-01-14T17:30:00.000Z`
    pub fn start_utc_iso(&self) -> String {
        self.utc().start.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn end_utc_exclusive_iso(&self) -> String {
        self.utc().end.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// A single shop-local calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBounds {
    pub date: NaiveDate,
    pub range: LocalRange,
}

impl DayBounds {
    pub fn for_date(date: NaiveDate) -> AppResult<Self> {
        let next = date
            .succ_opt()
            .ok_or_else(|| AppError::validation(INVALID_DATE))?;
        Ok(Self {
            date,
            range: LocalRange::new(date, next),
        })
    }

    /// Parse `YYYY-MM-DD` and build the day's bounds.
    pub fn parse(date: &str) -> AppResult<Self> {
        Self::for_date(parse_local_date(date)?)
    }

    /// Bounds of the shop-local day containing `now`.
    pub fn today(now: DateTime<Utc>) -> AppResult<Self> {
        Self::for_date(today_local(now))
    }

    pub fn date_local(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// A shop-local calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthBounds {
    pub year: i32,
    pub month: u32,
    pub range: LocalRange,
}

impl MonthBounds {
    pub fn new(year: i32, month: u32) -> AppResult<Self> {
        let (start, end) = month_start_dates(year, month)?;
        Ok(Self {
            year,
            month,
            range: LocalRange::new(start, end),
        })
    }

    /// e.g. `2026-01`
    pub fn label(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }
}

/// First day of `month` and first day of the following month.
fn month_start_dates(year: i32, month: u32) -> AppResult<(NaiveDate, NaiveDate)> {
    if !(1..=12).contains(&month) || !YEARS.contains(&year) {
        return Err(AppError::validation(INVALID_MONTH));
    }
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1).ok_or_else(|| AppError::validation(INVALID_MONTH))?, 1)
    } else {
        (year, month + 1)
    };

    let start = NaiveDate::from_ymd_opt(year, month, 1);
    let end = NaiveDate::from_ymd_opt(next_year, next_month, 1);
    match (start, end) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(AppError::validation(INVALID_MONTH)),
    }
}

/// Calendar month bounded by UTC midnights, as the legacy summary computes it.
pub fn utc_month_range(year: i32, month: u32) -> AppResult<UtcRange> {
    let (start, end) = month_start_dates(year, month)?;
    Ok(UtcRange {
        start: start.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc(),
        end: end.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc(),
    })
}

/// Parse a strict `YYYY-MM-DD` civil date.
///
/// Rejects anything the pattern does not match and any day that does not
/// exist in the calendar (`2026-02-30`).
pub fn parse_local_date(value: &str) -> AppResult<NaiveDate> {
    let caps = LOCAL_DATE_PATTERN
        .captures(value)
        .ok_or_else(|| AppError::validation(INVALID_DATE))?;

    let field = |i: usize| caps[i].parse::<u32>().ok();
    let (Some(year), Some(month), Some(day)) = (field(1), field(2), field(3)) else {
        return Err(AppError::validation(INVALID_DATE));
    };
    if !(1..=12).contains(&month) {
        return Err(AppError::validation(INVALID_DATE));
    }

    let date = NaiveDate::from_ymd_opt(year as i32, month, day)
        .ok_or_else(|| AppError::validation(INVALID_DATE))?;

    // Reconstructed fields must match the input exactly.
    if date.year() as u32 != year || date.month() != month || date.day() != day {
        return Err(AppError::validation(INVALID_DATE));
    }
    Ok(date)
}

/// Parse `year` and `month` query values.
///
/// Missing or non-numeric values and years outside `1..=9999` fail with the
/// same message as an out-of-range month.
pub fn parse_year_month(year: Option<&str>, month: Option<&str>) -> AppResult<(i32, u32)> {
    let year = year.and_then(|y| y.trim().parse::<i32>().ok());
    let month = month.and_then(|m| m.trim().parse::<u32>().ok());
    match (year, month) {
        (Some(year), Some(month)) if YEARS.contains(&year) && (1..=12).contains(&month) => {
            Ok((year, month))
        }
        _ => Err(AppError::validation(INVALID_MONTH)),
    }
}

/// Shop-local calendar date at `now`.
pub fn today_local(now: DateTime<Utc>) -> NaiveDate {
    (now + shop_offset()).date_naive()
}
