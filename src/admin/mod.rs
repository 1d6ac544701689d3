pub mod inquiry_form;
pub mod session;

pub use inquiry_form::InquiryForm;
pub use session::{
    join_features, parse_features, EditPhase, EditSession, ListingForm, Notice, PendingDelete,
    SaveOutcome, SAVE_FAILED_NOTICE,
};
