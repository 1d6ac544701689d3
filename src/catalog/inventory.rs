use crate::catalog::filter::{filter, FilterState};
use crate::models::{Condition, Listing};
use crate::repository::ListingRepository;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Loading,
    Loaded,
}

/// State behind the inventory page.
///
/// Listings are fetched once by [`load`](Self::load); filter changes only
/// recompute the visible view and never go back to the repository.
#[derive(Debug, Clone)]
pub struct InventoryPage {
    phase: LoadPhase,
    listings: Vec<Listing>,
    filter: FilterState,
}

impl Default for InventoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryPage {
    pub fn new() -> Self {
        Self {
            phase: LoadPhase::Loading,
            listings: Vec::new(),
            filter: FilterState::inventory_default(),
        }
    }

    /// Fetch the catalog if it has not been fetched yet
    pub async fn load(&mut self, repository: &ListingRepository) {
        if self.phase == LoadPhase::Loaded {
            return;
        }
        self.listings = repository.list_all().await;
        self.phase = LoadPhase::Loaded;
        debug!("Inventory loaded with {} listings", self.listings.len());
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
    }

    /// `None` selects every make
    pub fn set_make(&mut self, make: Option<String>) {
        self.filter.make = make;
    }

    pub fn set_condition(&mut self, condition: Option<Condition>) {
        self.filter.condition = condition;
    }

    pub fn set_max_price(&mut self, max_price: Option<u64>) {
        self.filter.max_price = max_price;
    }

    /// Listings matching the current filter. Empty while loading.
    pub fn visible(&self) -> Vec<&Listing> {
        filter(&self.listings, &self.filter)
    }
}
