use std::sync::LazyLock;

use regex::Regex;

use crate::entity::sea_orm_active_enums::Weekday;
use crate::models::TimeSlot;

/// `월(09:00~10:15)` or `Mon(09:00-10:15)`, anchored at the token start
static RANGE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<day>[월화수목금토일]|[A-Za-z]{3})\s*\(\s*(?P<sh>\d{1,2}):(?P<sm>\d{2})\s*[~\-]\s*(?P<eh>\d{1,2}):(?P<em>\d{2})\s*\)",
    )
    .expect("schedule token regex is valid")
});

/// Parser for the free-text schedule column of the course export
pub struct ScheduleParser;

impl ScheduleParser {
    /// Parse a schedule string like `월(09:00~10:15)/수(09:00~10:15)` into slots.
    ///
    /// Malformed tokens and empty ranges are dropped; the rest of the string
    /// is still parsed. The Nth slot takes the Nth token of `rooms`.
    pub fn parse(text: &str, rooms: Option<&str>) -> Vec<TimeSlot> {
        let rooms = Self::split_rooms(rooms.unwrap_or(""));

        Self::split_ranges(text)
            .into_iter()
            .filter_map(Self::parse_token)
            .enumerate()
            .map(|(idx, (day, start_min, end_min))| TimeSlot {
                day,
                start_min,
                end_min,
                place: rooms.get(idx).map(|r| r.to_string()),
            })
            .collect()
    }

    /// Parse the primary-language schedule, falling back to the parallel
    /// text from the other language export when the primary yields nothing
    pub fn parse_bilingual(primary: &str, secondary: &str, rooms: Option<&str>) -> Vec<TimeSlot> {
        let slots = Self::parse(primary, rooms);
        if !slots.is_empty() {
            return slots;
        }
        Self::parse(secondary, rooms)
    }

    /// Split on `/`, ` / ` and ` , ` separators, dropping blank tokens
    fn split_ranges(text: &str) -> Vec<&str> {
        text.split(" , ")
            .flat_map(|part| part.split('/'))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }

    fn split_rooms(text: &str) -> Vec<&str> {
        text.split('/')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }

    fn parse_token(token: &str) -> Option<(Weekday, i32, i32)> {
        let caps = RANGE_TOKEN.captures(token)?;

        let day_token = &caps["day"];
        let day = match day_token.chars().next() {
            Some(c) if day_token.chars().count() == 1 => Weekday::from_korean(c)?,
            _ => Weekday::from_english(day_token)?,
        };

        let start = Self::hm_to_min(&caps["sh"], &caps["sm"])?;
        let end = Self::hm_to_min(&caps["eh"], &caps["em"])?;
        if start >= end {
            return None;
        }

        Some((day, start, end))
    }

    fn hm_to_min(hour: &str, minute: &str) -> Option<i32> {
        let h: i32 = hour.parse().ok()?;
        let m: i32 = minute.parse().ok()?;
        if !(0..24).contains(&h) || !(0..60).contains(&m) {
            return None;
        }
        Some(h * 60 + m)
    }
}
