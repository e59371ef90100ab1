use thiserror::Error;

/// Structural failures. Any of these aborts the table being built; sibling
/// tables and other matches are unaffected.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("element not found: {context}")]
    ElementNotFound { context: &'static str },

    #[error("attribute `{attr}` missing on {context}")]
    MissingAttribute {
        context: &'static str,
        attr: &'static str,
    },

    #[error("no digits in {context}: {text:?}")]
    MissingDigits { context: &'static str, text: String },

    #[error("{table}: expected {expected} rows, found {found}")]
    RowCount {
        table: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{table} row {row}: expected {expected} cells, found {found}")]
    CellCount {
        table: &'static str,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("{table} row {row}, column `{column}`: expected {expected} values, found {found}")]
    ValueCount {
        table: &'static str,
        row: usize,
        column: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("ability `{ability}` chosen at level {level}, outside 1..=25")]
    LevelOutOfRange { ability: String, level: i64 },

    #[error("draft sequence {0} appears more than once")]
    DuplicateSequence(u64),

    #[error("document header says match {found}, expected {expected}")]
    MatchIdMismatch { expected: u64, found: u64 },

    #[error("no {0} document supplied")]
    MissingDocument(&'static str),

    #[error("chart payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("start timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),
}

pub type Result<T> = std::result::Result<T, ParseError>;
