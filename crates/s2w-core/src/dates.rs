//! Post date parsing and the two WXR renderings.
//!
//! A Substack `post_date` is ISO-8601, with or without an offset. Naive values
//! are read as UTC. Each post carries its original timestamp (rendered as the
//! `*_gmt` fields) and the same instant shifted into the publishing zone.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

/// `pubDate` layout (RFC-822 style, numeric offset).
const PUB_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";
/// `wp:post_date` layout.
const WP_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const AWARE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M%z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, thiserror::Error)]
pub enum DateParseError {
    #[error("invalid post_date {value:?}: not an ISO-8601 timestamp")]
    Unrecognized { value: String },
    #[error("invalid UTC offset of {minutes} minutes")]
    Offset { minutes: i32 },
}

/// Builds the publishing zone from a minute offset.
pub fn target_offset(minutes: i32) -> Result<FixedOffset, DateParseError> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or(DateParseError::Offset { minutes })
}

/// Parses an aware or naive ISO-8601 timestamp. Naive input is taken as UTC.
pub fn parse_post_date(raw: &str) -> Result<DateTime<FixedOffset>, DateParseError> {
    let value = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt);
    }

    // chrono's %z does not take a bare `Z`.
    let zulu = value
        .strip_suffix(['Z', 'z'])
        .map(|head| format!("{head}+00:00"));
    let aware = zulu.as_deref().unwrap_or(value);
    for fmt in AWARE_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(aware, fmt) {
            return Ok(dt);
        }
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, fmt) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc().fixed_offset());
    }

    Err(DateParseError::Unrecognized {
        value: raw.to_string(),
    })
}

/// A post timestamp as written and as seen from the publishing zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostDates {
    pub original: DateTime<FixedOffset>,
    pub local: DateTime<FixedOffset>,
}

impl PostDates {
    pub fn new(original: DateTime<FixedOffset>, zone: FixedOffset) -> Self {
        Self {
            original,
            local: original.with_timezone(&zone),
        }
    }

    pub fn parse(raw: &str, zone: FixedOffset) -> Result<Self, DateParseError> {
        Ok(Self::new(parse_post_date(raw)?, zone))
    }

    /// `pubDate`, in the publishing zone.
    pub fn pub_date(&self) -> String {
        self.local.format(PUB_DATE_FORMAT).to_string()
    }

    /// `wp:post_date` / `wp:post_modified`, in the publishing zone.
    pub fn wp_local(&self) -> String {
        self.local.format(WP_DATE_FORMAT).to_string()
    }

    /// `wp:post_date_gmt` / `wp:post_modified_gmt`: the original wall time, unconverted.
    pub fn wp_gmt(&self) -> String {
        self.original.format(WP_DATE_FORMAT).to_string()
    }
}
