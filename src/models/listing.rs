use serde::{Deserialize, Serialize};
use std::fmt;

/// Gearbox type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Transmission {
    Automatic,
    Manual,
}

/// Fuel type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FuelType {
    Petrol,
    Diesel,
    Hybrid,
    Electric,
}

/// Condition of the vehicle as advertised
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Condition {
    New,
    Used,
    #[serde(rename = "Foreign Used")]
    ForeignUsed,
    #[serde(rename = "Locally Used")]
    LocallyUsed,
}

impl Condition {
    pub const ALL: [Condition; 4] = [
        Condition::New,
        Condition::Used,
        Condition::ForeignUsed,
        Condition::LocallyUsed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Condition::New => "New",
            Condition::Used => "Used",
            Condition::ForeignUsed => "Foreign Used",
            Condition::LocallyUsed => "Locally Used",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sales lifecycle state, only changed by an explicit admin edit
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ListingStatus {
    #[default]
    Available,
    Reserved,
    Sold,
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ListingStatus::Available => "Available",
            ListingStatus::Reserved => "Reserved",
            ListingStatus::Sold => "Sold",
        };
        f.write_str(label)
    }
}

/// One vehicle for sale.
///
/// `id` and `created_at` are assigned by the repository on creation and never
/// change afterwards. `images` keeps display order, the first entry is the
/// thumbnail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    /// Kenyan shillings
    pub price: u64,
    /// Kilometers
    pub mileage: u64,
    pub transmission: Transmission,
    pub fuel_type: FuelType,
    pub condition: Condition,
    pub status: ListingStatus,
    pub images: Vec<String>,
    pub video_url: Option<String>,
    pub description: String,
    pub color: String,
    pub engine_size: String,
    pub features: Vec<String>,
    pub is_featured: bool,
    /// Epoch millis
    pub created_at: i64,
}

impl Listing {
    /// Name used in headings and as the inquiry snapshot
    pub fn display_name(&self) -> String {
        format!("{} {}", self.make, self.model)
    }

    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Fields supplied by the admin when creating a listing. Media is passed
/// separately as files and the repository fills in the URLs.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: u64,
    pub mileage: u64,
    pub transmission: Transmission,
    pub fuel_type: FuelType,
    pub condition: Condition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ListingStatus>,
    pub description: String,
    pub color: String,
    pub engine_size: String,
    pub features: Vec<String>,
    pub is_featured: bool,
}

/// Partial update. Fields left as `None` are not written; `id` and
/// `created_at` cannot be patched.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListingPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mileage: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transmission: Option<Transmission>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<FuelType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ListingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    /// `Some(None)` removes the stored video
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
}

impl ListingPatch {
    pub fn status(status: ListingStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn clear_video() -> Self {
        Self {
            video_url: Some(None),
            ..Self::default()
        }
    }
}
