pub mod display;
pub mod filter;
pub mod inventory;
pub mod stats;

pub use display::{format_price, listing_enquiry_text, whatsapp_link, KNOWN_MAKES};
pub use filter::{featured, filter, FilterState, PRICE_SLIDER_MAX};
pub use inventory::{InventoryPage, LoadPhase};
pub use stats::DashboardStats;
