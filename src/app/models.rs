use chrono::{Local, NaiveDate, NaiveTime};
use now::DateTimeNow;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::app::error::{Result, TaskError};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

// Task priority. On disk and on screen a priority is its colored marker,
// a single blank cell with an ANSI background color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "\u{1b}[101m \u{1b}[0m")]
    Critical,
    #[serde(rename = "\u{1b}[103m \u{1b}[0m")]
    High,
    #[serde(rename = "\u{1b}[102m \u{1b}[0m")]
    Normal,
    #[serde(rename = "\u{1b}[104m \u{1b}[0m")]
    Low,
}

impl Priority {
    pub fn marker(&self) -> &'static str {
        match self {
            Priority::Critical => "\u{1b}[101m \u{1b}[0m",
            Priority::High => "\u{1b}[103m \u{1b}[0m",
            Priority::Normal => "\u{1b}[102m \u{1b}[0m",
            Priority::Low => "\u{1b}[104m \u{1b}[0m",
        }
    }
}

// Accepts the single letter codes C, H, N and L in any case
impl FromStr for Priority {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "c" => Ok(Priority::Critical),
            "h" => Ok(Priority::High),
            "n" => Ok(Priority::Normal),
            "l" => Ok(Priority::Low),
            _ => Err(TaskError::InvalidPriority),
        }
    }
}

// Where a task's date stands relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DueTag {
    #[serde(rename = "\u{1b}[102m \u{1b}[0m")]
    Intime,
    #[serde(rename = "\u{1b}[103m \u{1b}[0m")]
    Today,
    #[serde(rename = "\u{1b}[101m \u{1b}[0m")]
    Overdue,
}

impl DueTag {
    pub fn from_dates(date: NaiveDate, today: NaiveDate) -> DueTag {
        match date.cmp(&today) {
            Ordering::Less => DueTag::Overdue,
            Ordering::Equal => DueTag::Today,
            Ordering::Greater => DueTag::Intime,
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            DueTag::Intime => "\u{1b}[102m \u{1b}[0m",
            DueTag::Today => "\u{1b}[103m \u{1b}[0m",
            DueTag::Overdue => "\u{1b}[101m \u{1b}[0m",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub index: usize,
    pub date: NaiveDate,
    #[serde(with = "hh_mm")]
    pub time: NaiveTime,
    pub priority: Priority,
    #[serde(rename = "tasks")]
    pub lines: Vec<String>,
    #[serde(rename = "due")]
    pub due_tag: DueTag,
}

impl Task {
    // Changing the date always drags the due tag along with it
    pub fn set_date(&mut self, date: NaiveDate, today: NaiveDate) {
        self.date = date;
        self.due_tag = DueTag::from_dates(date, today);
    }
}

// Times are stored without seconds, the same way they are typed in
mod hh_mm {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::TIME_FORMAT;

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(TIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, TIME_FORMAT).map_err(de::Error::custom)
    }
}

// The local calendar date at the moment of the call
pub fn today() -> NaiveDate {
    Local::now().beginning_of_day().date_naive()
}

// Parse a date typed as year-month-day. Unpadded parts like 2024-1-5 are fine,
// anything that is not exactly three numbers or not a real day is rejected.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let parts = input
        .trim()
        .split('-')
        .map(|part| part.parse::<u32>().map_err(|_| TaskError::InvalidDate))
        .collect::<Result<Vec<u32>>>()?;

    match parts.as_slice() {
        [year, month, day] => {
            let year = i32::try_from(*year).map_err(|_| TaskError::InvalidDate)?;
            NaiveDate::from_ymd_opt(year, *month, *day).ok_or(TaskError::InvalidDate)
        }
        _ => Err(TaskError::InvalidDate),
    }
}

// Parse a 24 hour hour:minute time, e.g. 9:30 or 23:05
pub fn parse_time(input: &str) -> Result<NaiveTime> {
    let parts = input
        .trim()
        .split(':')
        .map(|part| part.parse::<u32>().map_err(|_| TaskError::InvalidTime))
        .collect::<Result<Vec<u32>>>()?;

    match parts.as_slice() {
        [hour, minute] => NaiveTime::from_hms_opt(*hour, *minute, 0).ok_or(TaskError::InvalidTime),
        _ => Err(TaskError::InvalidTime),
    }
}

// Break every line longer than max_chars into max_chars wide chunks.
// Chunks are trimmed, short lines are kept as they are, order is preserved.
pub fn wrap_lines<S: AsRef<str>>(lines: &[S], max_chars: usize) -> Vec<String> {
    let mut wrapped = Vec::new();
    for line in lines {
        let line = line.as_ref();
        let chars = line.chars().collect::<Vec<char>>();
        if chars.len() <= max_chars {
            wrapped.push(line.to_string());
        } else {
            wrapped.extend(
                chars
                    .chunks(max_chars)
                    .map(|chunk| chunk.iter().collect::<String>().trim().to_string()),
            );
        }
    }
    wrapped
}

pub fn is_blank<S: AsRef<str>>(lines: &[S]) -> bool {
    lines.iter().all(|line| line.as_ref().trim().is_empty())
}
