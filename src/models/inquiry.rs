use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Listing an inquiry was sent about. The name is a snapshot taken at
/// submission time and is not kept in sync with later edits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListingRef {
    pub id: String,
    pub name: String,
}

/// A customer contact submission. Immutable once stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Inquiry {
    pub id: String,
    pub listing: Option<ListingRef>,
    pub name: String,
    pub phone: String,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
}

/// Validated inquiry ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewInquiry {
    pub listing: Option<ListingRef>,
    pub name: String,
    pub phone: String,
    pub message: String,
}
