pub mod inquiry;
pub mod listing;
pub mod site_content;

pub use inquiry::{Inquiry, ListingRef, NewInquiry};
pub use listing::{
    Condition, FuelType, Listing, ListingPatch, ListingStatus, NewListing, Transmission,
};
pub use site_content::{
    AboutContent, AboutContentPatch, ContactContent, ContactContentPatch, HomeContent,
    HomeContentPatch, ShowroomContent, ShowroomContentPatch, SiteContent, SiteContentPatch,
};
