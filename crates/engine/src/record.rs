//! The module contains the `Record` type, the structured form of one entry
//! message, and the `Field` names used to address its columns.
use core::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "No title";
pub const DEFAULT_IN_OUT: &str = "Out";
pub const DEFAULT_CATEGORY: &str = "Food";
pub const DEFAULT_AMOUNT: i64 = 0;
pub const DEFAULT_COMMENT: &str = "";

/// Format used to read and write `Record::date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One expense or income entry.
///
/// A record is always fully populated: every field either comes from the
/// message or from its default.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub title: String,
    pub in_out: String,
    pub category: String,
    pub amount: i64,
    pub date: NaiveDate,
    pub comment: String,
}

impl Record {
    /// Record made only of defaults, dated `today`.
    pub fn with_defaults(today: NaiveDate) -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            in_out: DEFAULT_IN_OUT.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
            amount: DEFAULT_AMOUNT,
            date: today,
            comment: DEFAULT_COMMENT.to_string(),
        }
    }

    /// `date` as `YYYY-MM-DD`.
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} ({})",
            self.date_string(),
            self.in_out,
            self.amount,
            self.title,
            self.category
        )
    }
}

/// Column of a [`Record`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    InOut,
    Category,
    Amount,
    Date,
    Comment,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Title,
        Field::InOut,
        Field::Category,
        Field::Amount,
        Field::Date,
        Field::Comment,
    ];

    /// Key used for the field in keyed messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::InOut => "in_out",
            Self::Category => "category",
            Self::Amount => "amount",
            Self::Date => "date",
            Self::Comment => "comment",
        }
    }

    /// Exact, case-sensitive lookup of a keyed-message key.
    pub fn from_key(key: &str) -> Option<Field> {
        Self::ALL.into_iter().find(|field| field.as_str() == key)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_from_key() {
        for field in Field::ALL {
            assert_eq!(Field::from_key(field.as_str()), Some(field));
        }
    }

    #[test]
    fn from_key_is_exact() {
        assert_eq!(Field::from_key("Title"), None);
        assert_eq!(Field::from_key(" title"), None);
        assert_eq!(Field::from_key("note"), None);
    }

    #[test]
    fn serializes_date_as_plain_day() {
        let record = Record::with_defaults(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["date"], "2024-03-09");
        assert_eq!(json["title"], "No title");
        assert_eq!(json["amount"], 0);
    }
}
