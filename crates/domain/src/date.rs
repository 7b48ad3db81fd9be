use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

use crate::DomainError;

/// Two-digit years at or below this value land in the 2000s, the rest in the 1900s.
const TWO_DIGIT_YEAR_PIVOT: i32 = 49;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `M/d/yy`
    ShortYear,
    /// `M/d/yyyy`
    LongYear,
    /// `MM/dd/yy`
    PaddedShortYear,
    /// `MM/dd/yyyy`
    PaddedLongYear,
}

/// Formats tried in order; the first one that matches wins.
pub const ACCEPTED_FORMATS: [DateFormat; 4] = [
    DateFormat::ShortYear,
    DateFormat::LongYear,
    DateFormat::PaddedShortYear,
    DateFormat::PaddedLongYear,
];

impl DateFormat {
    pub fn pattern(self) -> &'static str {
        match self {
            Self::ShortYear => "M/d/yy",
            Self::LongYear => "M/d/yyyy",
            Self::PaddedShortYear => "MM/dd/yy",
            Self::PaddedLongYear => "MM/dd/yyyy",
        }
    }

    fn month_and_day_digits(self) -> RangeInclusive<usize> {
        match self {
            Self::ShortYear | Self::LongYear => 1..=2,
            Self::PaddedShortYear | Self::PaddedLongYear => 2..=2,
        }
    }

    fn year_digits(self) -> usize {
        match self {
            Self::ShortYear | Self::PaddedShortYear => 2,
            Self::LongYear | Self::PaddedLongYear => 4,
        }
    }

    pub fn parse(self, raw: &str) -> Option<NaiveDate> {
        let mut parts = raw.split('/');
        let (month, day, year) = (parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() {
            return None;
        }

        let widths = self.month_and_day_digits();
        let month = parse_digits(month, &widths)?;
        let day = parse_digits(day, &widths)?;
        let year = parse_digits(year, &(self.year_digits()..=self.year_digits()))?;
        let year = if self.year_digits() == 2 {
            expand_two_digit_year(year as i32)
        } else {
            year as i32
        };

        NaiveDate::from_ymd_opt(year, month, day)
    }
}

/// Accepted patterns in trial order, comma separated.
pub fn accepted_patterns() -> String {
    ACCEPTED_FORMATS
        .iter()
        .map(|format| format.pattern())
        .collect::<Vec<_>>()
        .join(", ")
}

fn parse_digits(part: &str, widths: &RangeInclusive<usize>) -> Option<u32> {
    if !widths.contains(&part.len()) || !part.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

fn expand_two_digit_year(year: i32) -> i32 {
    if year <= TWO_DIGIT_YEAR_PIVOT {
        2000 + year
    } else {
        1900 + year
    }
}

/// Calendar date an image was taken on, as carried by an input record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CaptureDate(NaiveDate);

impl CaptureDate {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        ACCEPTED_FORMATS
            .iter()
            .find_map(|format| format.parse(raw))
            .map(Self)
            .ok_or_else(|| DomainError::UnparseableDate(raw.to_string()))
    }

    pub fn get(self) -> NaiveDate {
        self.0
    }

    /// `YYYY-MM-DD`, before any collision suffix.
    pub fn base_filename(self) -> String {
        format!(
            "{:04}-{:02}-{:02}",
            self.0.year(),
            self.0.month(),
            self.0.day()
        )
    }

    pub fn at_midnight(self) -> NaiveDateTime {
        self.0.and_time(NaiveTime::MIN)
    }

    /// `YYYY:MM:DD HH:MM:SS`, the layout EXIF date tags require.
    pub fn exif_timestamp(self) -> String {
        self.at_midnight().format("%Y:%m:%d %H:%M:%S").to_string()
    }
}
