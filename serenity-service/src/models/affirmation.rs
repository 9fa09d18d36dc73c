use serde::Serialize;
use serde_json::{Map, Value};

/// One row of the `affirmations` table, keyed by column name.
///
/// The column set is whatever the table reports; nothing here assumes
/// specific columns.
pub type AffirmationRecord = Map<String, Value>;

/// Body of `GET /affirm`.
#[derive(Debug, Serialize)]
pub struct AffirmationsResponse {
    pub affirmations: Vec<AffirmationRecord>,
}
