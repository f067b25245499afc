//! Entry parser: turns the text of one chat message into a [`Record`].
//!
//! Two layouts are accepted, chosen by the presence of `:` anywhere in the
//! text.
//!
//! Keyed, one `key:value` pair per line:
//!
//! ```text
//! title:Lunch
//! amount:50
//! category:Snack
//! ```
//!
//! Positional, one value per line, see [`POSITIONAL_LAYOUT`]:
//!
//! ```text
//! Lunch
//! 50
//! 2024-01-01
//! In
//! Snack
//! note
//! ```
//!
//! Fields the message does not provide take the defaults of [`Record`].
use std::ops::RangeInclusive;

use chrono::{Local, NaiveDate};
use unicode_normalization::UnicodeNormalization;

use crate::{
    Field, ParseError, Record,
    record::{DEFAULT_AMOUNT, DEFAULT_CATEGORY, DEFAULT_COMMENT, DEFAULT_IN_OUT, DEFAULT_TITLE},
};

/// When a positional line is read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guard {
    Always,
    /// Only when the message has more than this many lines.
    MoreThan(usize),
}

/// Positional layout as `(field, guard, line index)`, evaluated in order.
///
/// Guards and indexes do not line up (category sits on line 4 but is read as
/// soon as there are 3 lines). Existing senders rely on this exact table.
pub const POSITIONAL_LAYOUT: [(Field, Guard, usize); 6] = [
    (Field::Title, Guard::Always, 0),
    (Field::Amount, Guard::Always, 1),
    (Field::Category, Guard::MoreThan(2), 4),
    (Field::Date, Guard::MoreThan(3), 2),
    (Field::InOut, Guard::MoreThan(4), 3),
    (Field::Comment, Guard::MoreThan(5), 5),
];

/// Parses a message, defaulting the date to today's local date.
pub fn parse(text: &str) -> Result<Record, ParseError> {
    parse_at(text, Local::now().date_naive())
}

/// Parses a message, defaulting the date to `today`.
pub fn parse_at(text: &str, today: NaiveDate) -> Result<Record, ParseError> {
    let lines: Vec<&str> = text.split('\n').collect();

    let fields = if text.contains(':') {
        keyed_fields(&lines)?
    } else {
        positional_fields(&lines)?
    };

    fields.into_record(today)
}

/// Raw, unconverted values picked out of the message.
#[derive(Debug, Default)]
struct RawFields<'a> {
    title: Option<&'a str>,
    in_out: Option<&'a str>,
    category: Option<&'a str>,
    amount: Option<&'a str>,
    date: Option<&'a str>,
    comment: Option<&'a str>,
}

impl<'a> RawFields<'a> {
    fn slot_mut(&mut self, field: Field) -> &mut Option<&'a str> {
        match field {
            Field::Title => &mut self.title,
            Field::InOut => &mut self.in_out,
            Field::Category => &mut self.category,
            Field::Amount => &mut self.amount,
            Field::Date => &mut self.date,
            Field::Comment => &mut self.comment,
        }
    }

    fn into_record(self, today: NaiveDate) -> Result<Record, ParseError> {
        let amount = match self.amount {
            Some(raw) => parse_amount(raw)?,
            None => DEFAULT_AMOUNT,
        };
        let date = match self.date {
            Some(raw) => parse_date(raw)?,
            None => today,
        };

        Ok(Record {
            title: self.title.unwrap_or(DEFAULT_TITLE).to_string(),
            in_out: self.in_out.unwrap_or(DEFAULT_IN_OUT).to_string(),
            category: self.category.unwrap_or(DEFAULT_CATEGORY).to_string(),
            amount,
            date,
            comment: self.comment.unwrap_or(DEFAULT_COMMENT).to_string(),
        })
    }
}

fn keyed_fields<'a>(lines: &[&'a str]) -> Result<RawFields<'a>, ParseError> {
    let mut fields = RawFields::default();

    for line in lines.iter().copied().filter(|line| line.contains(':')) {
        // A value holding its own ':' is rejected, not re-joined.
        let mut parts = line.split(':');
        let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ParseError::MalformedPair(line.to_string()));
        };

        match Field::from_key(key) {
            Some(field) => *fields.slot_mut(field) = Some(value),
            None => tracing::trace!("ignoring unknown key \"{key}\""),
        }
    }

    Ok(fields)
}

fn positional_fields<'a>(lines: &[&'a str]) -> Result<RawFields<'a>, ParseError> {
    let mut fields = RawFields::default();

    for (field, guard, index) in POSITIONAL_LAYOUT {
        let taken = match guard {
            Guard::Always => true,
            Guard::MoreThan(count) => lines.len() > count,
        };
        if !taken {
            continue;
        }

        let line = lines
            .get(index)
            .ok_or(ParseError::MissingRequiredField { field, line: index })?;
        *fields.slot_mut(field) = Some(*line);
    }

    Ok(fields)
}

/// Integer coercion in the way chat clients type numbers: full-width digits are
/// folded to ASCII and single `_` separators between digits are accepted.
fn parse_amount(raw: &str) -> Result<i64, ParseError> {
    let invalid = || ParseError::InvalidAmount(raw.to_string());

    let normalized: String = raw.nfkc().collect();
    let normalized = normalized.trim();
    let unsigned = normalized.strip_prefix(['+', '-']).unwrap_or(normalized);
    if unsigned.starts_with('_') || unsigned.ends_with('_') || unsigned.contains("__") {
        return Err(invalid());
    }

    normalized.replace('_', "").parse().map_err(|_| invalid())
}

/// Accepts `YYYY-M-D` with a four digit year and one or two digit month and
/// day, nothing around it.
fn parse_date(raw: &str) -> Result<NaiveDate, ParseError> {
    let invalid = || ParseError::InvalidDate(raw.to_string());

    let mut parts = raw.split('-');
    let (Some(year), Some(month), Some(day), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };
    if !all_digits(year, 4..=4) || !all_digits(month, 1..=2) || !all_digits(day, 1..=2) {
        return Err(invalid());
    }

    let (Ok(year), Ok(month), Ok(day)) = (
        year.parse::<i32>(),
        month.parse::<u32>(),
        day.parse::<u32>(),
    ) else {
        return Err(invalid());
    };
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

fn all_digits(part: &str, len: RangeInclusive<usize>) -> bool {
    len.contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn colon_anywhere_selects_keyed_layout() {
        let record = parse_at("Lunch\n50\nnote: paid cash", today()).unwrap();
        // Keyed layout ignores lines without ':' and unknown keys.
        assert_eq!(record, Record::with_defaults(today()));
    }

    #[test]
    fn keyed_values_are_not_trimmed() {
        let record = parse_at("title: Coffee\ncategory:Drinks \namount: 5", today()).unwrap();
        assert_eq!(record.title, " Coffee");
        assert_eq!(record.category, "Drinks ");
        assert_eq!(record.amount, 5);
    }

    #[test]
    fn keyed_keys_are_case_sensitive() {
        let record = parse_at("Title:Coffee\namount:5", today()).unwrap();
        assert_eq!(record.title, DEFAULT_TITLE);
    }

    #[test]
    fn keyed_later_line_overrides_earlier() {
        let record = parse_at("amount:5\namount:7", today()).unwrap();
        assert_eq!(record.amount, 7);
    }

    #[test]
    fn keyed_value_with_colon_is_rejected() {
        let err = parse_at("title:Coffee\ncomment:at 12:30", today()).unwrap_err();
        assert_eq!(err, ParseError::MalformedPair("comment:at 12:30".to_string()));
    }

    #[test]
    fn keyed_unknown_key_with_extra_colon_is_still_rejected() {
        let err = parse_at("title:Coffee\ntime:12:30", today()).unwrap_err();
        assert!(matches!(err, ParseError::MalformedPair(_)));
    }

    #[test]
    fn keyed_empty_value_is_kept() {
        let record = parse_at("title:\namount:1", today()).unwrap();
        assert_eq!(record.title, "");
    }

    #[test]
    fn positional_five_lines_defaults_comment() {
        let record = parse_at("Lunch\n50\n2024-01-01\nIn\nSnack", today()).unwrap();
        assert_eq!(record.category, "Snack");
        assert_eq!(record.in_out, "In");
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(record.comment, DEFAULT_COMMENT);
    }

    #[test]
    fn positional_three_lines_needs_category_line() {
        let err = parse_at("Lunch\n50\n2024-01-01", today()).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingRequiredField {
                field: Field::Category,
                line: 4
            }
        );
    }

    #[test]
    fn positional_four_lines_needs_category_line() {
        let err = parse_at("Lunch\n50\n2024-01-01\nIn", today()).unwrap_err();
        assert!(matches!(
            err,
            ParseError::MissingRequiredField {
                field: Field::Category,
                ..
            }
        ));
    }

    #[test]
    fn positional_single_line_misses_amount() {
        let err = parse_at("Lunch", today()).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingRequiredField {
                field: Field::Amount,
                line: 1
            }
        );
    }

    #[test]
    fn empty_text_misses_amount() {
        let err = parse_at("", today()).unwrap_err();
        assert!(matches!(
            err,
            ParseError::MissingRequiredField {
                field: Field::Amount,
                ..
            }
        ));
    }

    #[test]
    fn amount_tolerates_surrounding_whitespace_and_sign() {
        assert_eq!(parse_at("Lunch\n 50 ", today()).unwrap().amount, 50);
        assert_eq!(parse_at("Refund\n-12", today()).unwrap().amount, -12);
        assert_eq!(parse_at("Salary\n+1000", today()).unwrap().amount, 1000);
    }

    #[test]
    fn amount_rejects_decimals() {
        let err = parse_at("Lunch\n12.5", today()).unwrap_err();
        assert_eq!(err, ParseError::InvalidAmount("12.5".to_string()));
    }

    #[test]
    fn amount_accepts_full_width_digits() {
        assert_eq!(parse_at("Lunch\n５０", today()).unwrap().amount, 50);
        assert_eq!(parse_at("title:x\namount:１２０", today()).unwrap().amount, 120);
    }

    #[test]
    fn amount_accepts_digit_separators() {
        assert_eq!(parse_at("Rent\n1_000", today()).unwrap().amount, 1000);
        assert_eq!(parse_at("Rent\n-1_000_000", today()).unwrap().amount, -1_000_000);
    }

    #[test]
    fn amount_rejects_misplaced_separators() {
        for raw in ["_100", "100_", "1__000", "-_5", "_"] {
            let err = parse_at(&format!("Lunch\n{raw}"), today()).unwrap_err();
            assert_eq!(err, ParseError::InvalidAmount(raw.to_string()));
        }
    }

    #[test]
    fn date_requires_four_digit_year() {
        for raw in ["24-01-01", "+2024-01-01", "02024-01-01", "2024- 1-01", "2024-001-01"] {
            let err = parse_at(&format!("title:x\ndate:{raw}"), today()).unwrap_err();
            assert_eq!(err, ParseError::InvalidDate(raw.to_string()));
        }
    }

    #[test]
    fn date_accepts_unpadded_month_and_day() {
        let record = parse_at("title:x\ndate:2024-1-1", today()).unwrap();
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(record.date_string(), "2024-01-01");
    }

    #[test]
    fn date_rejects_surrounding_whitespace() {
        let err = parse_at("date: 2024-01-01", today()).unwrap_err();
        assert_eq!(err, ParseError::InvalidDate(" 2024-01-01".to_string()));
    }

    #[test]
    fn date_rejects_other_formats() {
        for raw in ["01/02/2024", "2024-02-30", "2024-01-01T10:00"] {
            let err = parse_at(&format!("title:x\ndate:{raw}"), today());
            assert!(err.is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn missing_line_reported_before_bad_amount() {
        let err = parse_at("Lunch\nabc\n2024-01-01", today()).unwrap_err();
        assert!(matches!(err, ParseError::MissingRequiredField { .. }));
    }

    #[test]
    fn bad_amount_reported_before_bad_date() {
        let err = parse_at("title:x\namount:abc\ndate:nope", today()).unwrap_err();
        assert!(matches!(err, ParseError::InvalidAmount(_)));
    }
}
