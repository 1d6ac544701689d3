use crate::error::WorkflowError;
use crate::models::{Inquiry, Listing, ListingRef, NewInquiry};
use crate::repository::ListingRepository;

/// Contact form on the contact page and on each listing page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InquiryForm {
    pub name: String,
    pub phone: String,
    pub message: String,
    listing: Option<ListingRef>,
}

impl InquiryForm {
    /// General inquiry, not tied to a listing
    pub fn general() -> Self {
        Self::default()
    }

    /// Inquiry about a listing; its name is captured now
    pub fn about(listing: &Listing) -> Self {
        Self {
            listing: Some(ListingRef {
                id: listing.id.clone(),
                name: listing.display_name(),
            }),
            ..Self::default()
        }
    }

    pub fn listing(&self) -> Option<&ListingRef> {
        self.listing.as_ref()
    }

    pub fn validate(&self) -> Result<NewInquiry, WorkflowError> {
        let name = self.name.trim();
        let phone = self.phone.trim();
        let message = self.message.trim();

        if name.is_empty() {
            return Err(WorkflowError::Validation("name"));
        }
        if phone.is_empty() {
            return Err(WorkflowError::Validation("phone"));
        }
        if message.is_empty() {
            return Err(WorkflowError::Validation("message"));
        }

        Ok(NewInquiry {
            listing: self.listing.clone(),
            name: name.to_string(),
            phone: phone.to_string(),
            message: message.to_string(),
        })
    }

    pub async fn submit(&self, repository: &ListingRepository) -> Result<Inquiry, WorkflowError> {
        let inquiry = self.validate()?;
        Ok(repository.add_inquiry(inquiry).await?)
    }
}
