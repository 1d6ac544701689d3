use crate::models::{Condition, Listing};

/// Upper end of the inventory price slider, KES
pub const PRICE_SLIDER_MAX: u64 = 10_000_000;

/// Inventory filter selections. `None` means "any" for make and condition and
/// "no ceiling" for price.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub search: String,
    pub make: Option<String>,
    pub condition: Option<Condition>,
    pub max_price: Option<u64>,
}

impl FilterState {
    /// Initial state of the inventory page: nothing selected, price slider at
    /// its maximum
    pub fn inventory_default() -> Self {
        Self {
            max_price: Some(PRICE_SLIDER_MAX),
            ..Self::default()
        }
    }

    /// All dimensions must hold
    pub fn matches(&self, listing: &Listing) -> bool {
        self.matches_search(listing)
            && self.make.as_ref().map_or(true, |make| &listing.make == make)
            && self.condition.map_or(true, |condition| listing.condition == condition)
            && self.max_price.map_or(true, |ceiling| listing.price <= ceiling)
    }

    fn matches_search(&self, listing: &Listing) -> bool {
        let term = self.search.to_lowercase();
        listing.make.to_lowercase().contains(&term) || listing.model.to_lowercase().contains(&term)
    }
}

/// Listings matching `state`, in their original order
pub fn filter<'a>(listings: &'a [Listing], state: &FilterState) -> Vec<&'a Listing> {
    listings.iter().filter(|listing| state.matches(listing)).collect()
}

/// Homepage curation: the first `limit` featured listings in catalog order
pub fn featured(listings: &[Listing], limit: usize) -> Vec<&Listing> {
    listings
        .iter()
        .filter(|listing| listing.is_featured)
        .take(limit)
        .collect()
}
