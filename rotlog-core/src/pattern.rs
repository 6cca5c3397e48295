//! Rotation path templates.
//!
//! A template is literal text interleaved with the placeholders `%Y` (year),
//! `%M` (month), `%D` (day), `%H` (hour) and `%m` (minute). Compiling it yields
//! the time fields that drive rotation and a renderer producing the archive
//! path for a given set of field values: the year is written as a plain
//! integer, every other field is zero-padded to two digits.

use std::{fmt::Write, str::FromStr};

use chrono::{Datelike, Timelike};

use crate::error::LogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeField {
    Year,
    Month,
    Day,
    Hour,
    Minute,
}

impl TimeField {
    fn from_placeholder(c: char) -> Option<Self> {
        match c {
            'Y' => Some(TimeField::Year),
            'M' => Some(TimeField::Month),
            'D' => Some(TimeField::Day),
            'H' => Some(TimeField::Hour),
            'm' => Some(TimeField::Minute),
            _ => None,
        }
    }

    pub fn extract<T: Datelike + Timelike>(self, time: &T) -> i32 {
        match self {
            TimeField::Year => time.year(),
            TimeField::Month => time.month() as i32,
            TimeField::Day => time.day() as i32,
            TimeField::Hour => time.hour() as i32,
            TimeField::Minute => time.minute() as i32,
        }
    }

    fn printf_directive(self) -> &'static str {
        match self {
            TimeField::Year => "%d",
            _ => "%02d",
        }
    }

    fn render(self, value: i32, out: &mut String) {
        let _ = match self {
            TimeField::Year => write!(out, "{value}"),
            _ => write!(out, "{value:02}"),
        };
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(TimeField),
}

/// A compiled rotation template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    template: String,
    segments: Vec<Segment>,
    fields: Vec<TimeField>,
}

impl PathPattern {
    /// Fails with [`LogError::InvalidPattern`] when a `%` is not followed by a
    /// known placeholder character.
    pub fn compile(template: &str) -> Result<Self, LogError> {
        let mut segments = Vec::new();
        let mut fields = Vec::new();
        let mut literal = String::new();
        let mut chars = template.chars();
        while let Some(c) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }
            let field = chars
                .next()
                .and_then(TimeField::from_placeholder)
                .ok_or_else(|| LogError::InvalidPattern(template.to_string()))?;
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Field(field));
            fields.push(field);
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Ok(Self {
            template: template.to_string(),
            segments,
            fields,
        })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Placeholder fields in template order, one per occurrence.
    pub fn fields(&self) -> &[TimeField] {
        &self.fields
    }

    /// A template without placeholders never triggers rotation.
    pub fn is_fixed(&self) -> bool {
        self.fields.is_empty()
    }

    /// Evaluates every placeholder against `time`.
    pub fn sample<T: Datelike + Timelike>(&self, time: &T) -> Vec<i32> {
        self.fields.iter().map(|field| field.extract(time)).collect()
    }

    /// Renders the template with one value per placeholder, in order.
    pub fn render(&self, values: &[i32]) -> String {
        debug_assert_eq!(values.len(), self.fields.len());
        let mut out = String::with_capacity(self.template.len() + 8);
        let mut values = values.iter();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(field) => {
                    if let Some(value) = values.next() {
                        field.render(*value, &mut out);
                    }
                }
            }
        }
        out
    }

    pub fn render_at<T: Datelike + Timelike>(&self, time: &T) -> String {
        self.render(&self.sample(time))
    }

    /// The template in printf notation, e.g. `app.log.%d%02d%02d`.
    pub fn print_format(&self) -> String {
        let mut out = String::with_capacity(self.template.len() + 8);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(field) => out.push_str(field.printf_directive()),
            }
        }
        out
    }
}

impl FromStr for PathPattern {
    type Err = LogError;

    fn from_str(template: &str) -> Result<Self, Self::Err> {
        Self::compile(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn test_daily_pattern() {
        let pattern = PathPattern::compile("app.log.%Y%M%D").unwrap();
        assert_eq!(pattern.template(), "app.log.%Y%M%D");
        assert_eq!(
            pattern.fields(),
            &[TimeField::Year, TimeField::Month, TimeField::Day]
        );
        assert_eq!(pattern.print_format(), "app.log.%d%02d%02d");
        assert_eq!(pattern.render_at(&at(2024, 5, 10, 13, 7)), "app.log.20240510");
    }

    #[test]
    fn test_minute_pattern_with_separators() {
        let pattern = PathPattern::compile("/var/log/%Y-%M/app_%D.%H%m.log").unwrap();
        assert_eq!(
            pattern.render_at(&at(2023, 12, 1, 9, 5)),
            "/var/log/2023-12/app_01.0905.log"
        );
    }

    #[test]
    fn test_year_is_not_padded() {
        let pattern = PathPattern::compile("%Y").unwrap();
        assert_eq!(pattern.render(&[987]), "987");
        let pattern = PathPattern::compile("%M").unwrap();
        assert_eq!(pattern.render(&[3]), "03");
    }

    #[test]
    fn test_fixed_pattern() {
        let pattern = PathPattern::compile("./logs/app.log").unwrap();
        assert!(pattern.is_fixed());
        assert!(pattern.sample(&at(2024, 1, 1, 0, 0)).is_empty());
        assert_eq!(pattern.render(&[]), "./logs/app.log");
        assert_eq!(pattern.print_format(), "./logs/app.log");

        let empty = PathPattern::compile("").unwrap();
        assert!(empty.is_fixed());
        assert_eq!(empty.render(&[]), "");
    }

    #[test]
    fn test_repeated_placeholder() {
        let pattern = PathPattern::compile("%D/%D").unwrap();
        assert_eq!(pattern.fields().len(), 2);
        assert_eq!(pattern.render_at(&at(2024, 2, 29, 0, 0)), "29/29");
    }

    #[test]
    fn test_invalid_patterns() {
        for template in ["app.%S", "app.%", "100%%", "%y"] {
            let err = PathPattern::compile(template).unwrap_err();
            assert!(
                matches!(&err, LogError::InvalidPattern(t) if t == template),
                "unexpected result for {template}: {err}"
            );
        }
    }

    #[test]
    fn test_sample_changes_only_on_field_boundary() {
        let pattern = PathPattern::compile("log.%Y%M%D").unwrap();
        assert_eq!(
            pattern.sample(&at(2024, 5, 10, 0, 1)),
            pattern.sample(&at(2024, 5, 10, 23, 59))
        );
        assert_ne!(
            pattern.sample(&at(2024, 5, 10, 23, 59)),
            pattern.sample(&at(2024, 5, 11, 0, 0))
        );
    }
}
