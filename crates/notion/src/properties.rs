use engine::Record;
use serde_json::{Value, json};

/// Maps a record onto the columns of the ledger database.
///
/// | record     | column     | type      |
/// |------------|------------|-----------|
/// | `title`    | `title`    | title     |
/// | `in_out`   | `In/Out`   | select    |
/// | `category` | `Category` | select    |
/// | `date`     | `Date`     | date      |
/// | `amount`   | `Amount`   | number    |
/// | `comment`  | `Comment`  | rich text |
pub fn row_properties(record: &Record) -> Value {
    json!({
        "title": {
            "title": [{ "text": { "content": record.title } }]
        },
        "In/Out": { "select": { "name": record.in_out } },
        "Category": { "select": { "name": record.category } },
        "Date": { "date": { "start": record.date_string() } },
        "Amount": { "number": record.amount },
        "Comment": {
            "rich_text": [{ "text": { "content": record.comment } }]
        },
    })
}
