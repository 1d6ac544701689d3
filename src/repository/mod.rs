pub mod codec;
pub mod listings;
pub mod site_content;

pub use listings::{ListingRepository, INQUIRIES_COLLECTION, LISTINGS_COLLECTION};
pub use site_content::{SiteContentRepository, SITE_CONTENT_COLLECTION, SITE_CONTENT_KEY};
