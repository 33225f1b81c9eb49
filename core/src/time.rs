use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{time_error, PlaybookError, Result};

const MINUTES_PER_DAY: u16 = 24 * 60;

/// Minutes since midnight, always within a single day (0..=1439).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);
    pub const LAST_MINUTE: TimeOfDay = TimeOfDay(MINUTES_PER_DAY - 1);

    pub fn from_minutes(minutes: u16) -> Result<Self> {
        if minutes >= MINUTES_PER_DAY {
            return Err(time_error(format!("{} minutes is past the end of the day", minutes)));
        }
        Ok(TimeOfDay(minutes))
    }

    pub fn from_hm(hour: u32, minute: u32) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(time_error(format!("{}:{:02} is not a time of day", hour, minute)));
        }
        Ok(TimeOfDay((hour * 60 + minute) as u16))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u32 {
        u32::from(self.0 / 60)
    }

    pub fn minute(self) -> u32 {
        u32::from(self.0 % 60)
    }

    /// Compact playbook label: `9A`, `930A`, `12P`, `1230A`.
    pub fn format_short(self) -> String {
        let hour = self.hour();
        let (display_hour, suffix) = match hour {
            0 => (12, 'A'),
            1..=11 => (hour, 'A'),
            12 => (12, 'P'),
            _ => (hour - 12, 'P'),
        };
        match self.minute() {
            0 => format!("{}{}", display_hour, suffix),
            m => format!("{}{:02}{}", display_hour, m, suffix),
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = PlaybookError;

    fn from_str(s: &str) -> Result<Self> {
        parse_clock(s)
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(time: NaiveTime) -> Self {
        TimeOfDay((time.hour() * 60 + time.minute()) as u16)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_clock(&raw).map_err(serde::de::Error::custom)
    }
}

/// Half-open `[start, end)` span within one day. `start == end` means "nothing".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "IntervalRepr", into = "IntervalRepr")]
pub struct Interval {
    start: TimeOfDay,
    end: TimeOfDay,
}

#[derive(Serialize, Deserialize)]
struct IntervalRepr {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TryFrom<IntervalRepr> for Interval {
    type Error = PlaybookError;

    fn try_from(repr: IntervalRepr) -> Result<Self> {
        Interval::new(repr.start, repr.end)
    }
}

impl From<Interval> for IntervalRepr {
    fn from(interval: Interval) -> Self {
        IntervalRepr { start: interval.start, end: interval.end }
    }
}

impl Interval {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self> {
        if end < start {
            return Err(time_error(format!(
                "{} - {} crosses midnight, which is not supported",
                start.format_short(),
                end.format_short()
            )));
        }
        Ok(Interval { start, end })
    }

    pub fn empty_at(at: TimeOfDay) -> Self {
        Interval { start: at, end: at }
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn duration_minutes(&self) -> u16 {
        self.end.minutes() - self.start.minutes()
    }

    pub fn contains(&self, at: TimeOfDay) -> bool {
        self.start <= at && at < self.end
    }

    /// Half-open overlap; empty intervals overlap nothing.
    pub fn overlaps(&self, other: &Interval) -> bool {
        !self.is_empty() && !other.is_empty() && self.start < other.end && other.start < self.end
    }

    /// Minutes shared by both intervals.
    pub fn overlap_minutes(&self, other: &Interval) -> u16 {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        end.minutes().saturating_sub(start.minutes())
    }

    pub fn format_short(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        format!("{}-{}", self.start.format_short(), self.end.format_short())
    }
}

/// Parse a clock reading such as `9:00 AM`, `9A`, `930A`, `17:30` or `0900`.
pub fn parse_clock(input: &str) -> Result<TimeOfDay> {
    let cleaned: String = input
        .trim()
        .to_uppercase()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .collect();
    if cleaned.is_empty() {
        return Err(time_error("empty time"));
    }

    let (digits, meridiem) = split_meridiem(&cleaned);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit() || c == ':') {
        return Err(time_error(format!("could not read '{}'", input.trim())));
    }

    let (hour_str, minute_str) = match digits.split_once(':') {
        Some((h, m)) if m.len() == 2 => (h, m),
        Some(_) => return Err(time_error(format!("could not read '{}'", input.trim()))),
        None => match digits.len() {
            1 | 2 => (digits, "0"),
            3 => digits.split_at(1),
            4 => digits.split_at(2),
            _ => return Err(time_error(format!("could not read '{}'", input.trim()))),
        },
    };
    let hour: u32 = hour_str
        .parse()
        .map_err(|_| time_error(format!("invalid hour in '{}'", input.trim())))?;
    let minute: u32 = minute_str
        .parse()
        .map_err(|_| time_error(format!("invalid minute in '{}'", input.trim())))?;

    match meridiem {
        Some(is_pm) => {
            if hour == 0 || hour > 12 {
                return Err(time_error(format!("hour out of range in '{}'", input.trim())));
            }
            let hour = match (hour, is_pm) {
                (12, false) => 0,
                (12, true) => 12,
                (h, true) => h + 12,
                (h, false) => h,
            };
            TimeOfDay::from_hm(hour, minute)
        }
        None => {
            // A bare "9" or "930" is ambiguous without AM/PM.
            if !digits.contains(':') && digits.len() != 4 {
                return Err(time_error(format!("'{}' needs AM/PM or HH:MM", input.trim())));
            }
            TimeOfDay::from_hm(hour, minute)
        }
    }
}

fn split_meridiem(cleaned: &str) -> (&str, Option<bool>) {
    for (suffix, is_pm) in [("AM", false), ("PM", true), ("A", false), ("P", true)] {
        if let Some(rest) = cleaned.strip_suffix(suffix) {
            return (rest, Some(is_pm));
        }
    }
    (cleaned, None)
}

/// Parse `START - END` (hyphen or en dash) into an interval.
pub fn parse_range(input: &str) -> Result<Interval> {
    let parts: Vec<&str> = input.split(|c| c == '-' || c == '–').collect();
    if parts.len() != 2 {
        return Err(time_error(format!("'{}' is not a START - END range", input.trim())));
    }
    let start = parse_clock(parts[0])?;
    let end = parse_clock(parts[1])?;
    Interval::new(start, end)
}

/// A parsed shift cell: the overall span plus the gap between its first two
/// segments, if it was written as `10A-2P / 3P-7P`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftText {
    pub shift: Interval,
    pub gap: Interval,
}

pub fn parse_shift(input: &str) -> Result<ShiftText> {
    let mut segments = input
        .split('/')
        .filter(|part| !part.trim().is_empty())
        .map(parse_range)
        .collect::<Result<Vec<_>>>()?;
    if segments.is_empty() {
        return Err(time_error("empty shift"));
    }
    segments.sort_by_key(|s| s.start());

    let first = segments[0];
    let end = segments.iter().map(|s| s.end()).max().unwrap_or(first.end());
    let shift = Interval::new(first.start(), end)?;

    let gap = match segments.get(1) {
        Some(second) if second.start() > first.end() => Interval::new(first.end(), second.start())?,
        _ => Interval::empty_at(shift.start()),
    };
    Ok(ShiftText { shift, gap })
}

pub fn parse_weekday(s: &str) -> Option<Weekday> {
    match s.trim().to_lowercase().as_str() {
        "mon" | "monday" => Some(Weekday::Mon),
        "tue" | "tues" | "tuesday" => Some(Weekday::Tue),
        "wed" | "wednesday" => Some(Weekday::Wed),
        "thu" | "thur" | "thurs" | "thursday" => Some(Weekday::Thu),
        "fri" | "friday" => Some(Weekday::Fri),
        "sat" | "saturday" => Some(Weekday::Sat),
        "sun" | "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        parse_clock(s).unwrap()
    }

    #[test]
    fn test_parse_clock_forms() {
        assert_eq!(t("9:00 AM").minutes(), 9 * 60);
        assert_eq!(t("9 am").minutes(), 9 * 60);
        assert_eq!(t("9:30PM").minutes(), 21 * 60 + 30);
        assert_eq!(t("930A").minutes(), 9 * 60 + 30);
        assert_eq!(t("1230P").minutes(), 12 * 60 + 30);
        assert_eq!(t("12A").minutes(), 0);
        assert_eq!(t("12:00 PM").minutes(), 12 * 60);
        assert_eq!(t("17:30").minutes(), 17 * 60 + 30);
        assert_eq!(t("0900").minutes(), 9 * 60);
        assert_eq!(t("5 p.m.").minutes(), 17 * 60);
    }

    #[test]
    fn test_parse_clock_rejects_garbage() {
        assert!(parse_clock("").is_err());
        assert!(parse_clock("noon").is_err());
        assert!(parse_clock("13 PM").is_err());
        assert!(parse_clock("9").is_err());
        assert!(parse_clock("25:00").is_err());
        assert!(parse_clock("9:7 AM").is_err());
        assert!(parse_clock("+9 AM").is_err());
    }

    #[test]
    fn test_format_short() {
        assert_eq!(t("9:00 AM").format_short(), "9A");
        assert_eq!(t("9:30 AM").format_short(), "930A");
        assert_eq!(t("12:00 PM").format_short(), "12P");
        assert_eq!(t("00:30").format_short(), "1230A");
        assert_eq!(t("17:00").format_short(), "5P");
    }

    #[test]
    fn test_parse_range() {
        let range = parse_range("10:00 AM - 2:00 PM").unwrap();
        assert_eq!(range.start(), t("10A"));
        assert_eq!(range.end(), t("2P"));
        assert_eq!(parse_range("09:00–17:00").unwrap().format_short(), "9A-5P");
        assert!(parse_range("10:00 AM").is_err());
        // Ends before it starts: an overnight shift.
        assert!(parse_range("10 PM - 6 AM").is_err());
    }

    #[test]
    fn test_parse_shift_segments() {
        let parsed = parse_shift("3P-7P / 10A-2P").unwrap();
        assert_eq!(parsed.shift.format_short(), "10A-7P");
        assert_eq!(parsed.gap.format_short(), "2P-3P");

        let single = parse_shift("9A-5P").unwrap();
        assert!(single.gap.is_empty());
        assert!(parse_shift("  ").is_err());
    }

    #[test]
    fn test_interval_overlap_is_half_open() {
        let shift = parse_range("9A-5P").unwrap();
        let before = parse_range("830A-9A").unwrap();
        let first = parse_range("9A-930A").unwrap();
        let last = parse_range("430P-5P").unwrap();
        let after = parse_range("5P-530P").unwrap();
        assert!(!shift.overlaps(&before));
        assert!(shift.overlaps(&first));
        assert!(shift.overlaps(&last));
        assert!(!shift.overlaps(&after));
        assert!(!Interval::empty_at(t("10A")).overlaps(&shift));

        assert_eq!(shift.overlap_minutes(&parse_range("830A-915A").unwrap()), 15);
        assert_eq!(shift.overlap_minutes(&after), 0);
        assert_eq!(before.overlap_minutes(&after), 0);
    }

    #[test]
    fn test_time_of_day_serde_round_trip() {
        let json = serde_json::to_string(&t("6:30 AM")).unwrap();
        assert_eq!(json, "\"06:30\"");
        let back: TimeOfDay = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t("06:30"));

        let bad: std::result::Result<Interval, _> =
            serde_json::from_str(r#"{"start":"17:00","end":"09:00"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_parse_weekday() {
        assert_eq!(parse_weekday("Mon"), Some(Weekday::Mon));
        assert_eq!(parse_weekday(" thursday "), Some(Weekday::Thu));
        assert_eq!(parse_weekday("someday"), None);
        assert_eq!(weekday_name(Weekday::Sat), "Saturday");
    }
}
