use crate::models::{Inquiry, Listing, ListingStatus};
use serde::Serialize;

/// Figures shown at the top of the admin screen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_listings: usize,
    pub available: usize,
    pub reserved: usize,
    pub sold: usize,
    pub total_inquiries: usize,
    /// Sum of every listing's price, KES
    pub inventory_value: u64,
}

impl DashboardStats {
    pub fn collect(listings: &[Listing], inquiries: &[Inquiry]) -> Self {
        let mut stats = DashboardStats {
            total_listings: listings.len(),
            total_inquiries: inquiries.len(),
            ..Self::default()
        };

        for listing in listings {
            match listing.status {
                ListingStatus::Available => stats.available += 1,
                ListingStatus::Reserved => stats.reserved += 1,
                ListingStatus::Sold => stats.sold += 1,
            }
            stats.inventory_value = stats.inventory_value.saturating_add(listing.price);
        }

        stats
    }
}
