use crate::catalog::KNOWN_MAKES;
use crate::error::{RepositoryError, WorkflowError};
use crate::media::MediaFile;
use crate::models::{
    Condition, FuelType, Listing, ListingPatch, ListingStatus, NewListing, Transmission,
};
use crate::repository::ListingRepository;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

pub const SAVE_FAILED_NOTICE: &str = "Failed to save listing.";

/// Split the comma separated features field, trimming and dropping empties
pub fn parse_features(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|feature| !feature.is_empty())
        .map(str::to_string)
        .collect()
}

/// Inverse of [`parse_features`], used to seed the editable field
pub fn join_features(features: &[String]) -> String {
    features.join(", ")
}

/// Editable listing fields. Features are edited as text in
/// [`EditSession::features_input`] and parsed on submit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListingForm {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: u64,
    pub mileage: u64,
    pub transmission: Transmission,
    pub fuel_type: FuelType,
    pub condition: Condition,
    pub status: ListingStatus,
    /// Media already stored for the listing, shown read-only
    pub images: Vec<String>,
    pub video_url: Option<String>,
    pub description: String,
    pub color: String,
    pub engine_size: String,
    pub is_featured: bool,
}

impl ListingForm {
    pub fn blank() -> Self {
        Self {
            make: KNOWN_MAKES[0].to_string(),
            model: String::new(),
            year: 2020,
            price: 0,
            mileage: 0,
            transmission: Transmission::Automatic,
            fuel_type: FuelType::Petrol,
            condition: Condition::ForeignUsed,
            status: ListingStatus::Available,
            images: Vec::new(),
            video_url: None,
            description: String::new(),
            color: String::new(),
            engine_size: String::new(),
            is_featured: false,
        }
    }

    pub fn from_listing(listing: &Listing) -> Self {
        Self {
            make: listing.make.clone(),
            model: listing.model.clone(),
            year: listing.year,
            price: listing.price,
            mileage: listing.mileage,
            transmission: listing.transmission,
            fuel_type: listing.fuel_type,
            condition: listing.condition,
            status: listing.status,
            images: listing.images.clone(),
            video_url: listing.video_url.clone(),
            description: listing.description.clone(),
            color: listing.color.clone(),
            engine_size: listing.engine_size.clone(),
            is_featured: listing.is_featured,
        }
    }

    /// Required fields, checked before any repository call
    pub fn validate(&self) -> Result<(), WorkflowError> {
        let required = [
            ("make", &self.make),
            ("model", &self.model),
            ("color", &self.color),
            ("engine size", &self.engine_size),
        ];
        if let Some((name, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(WorkflowError::Validation(*name));
        }
        if self.year <= 0 {
            return Err(WorkflowError::Validation("year"));
        }
        Ok(())
    }

    fn to_new_listing(&self, features: Vec<String>) -> NewListing {
        NewListing {
            make: self.make.trim().to_string(),
            model: self.model.trim().to_string(),
            year: self.year,
            price: self.price,
            mileage: self.mileage,
            transmission: self.transmission,
            fuel_type: self.fuel_type,
            condition: self.condition,
            status: Some(self.status),
            description: self.description.clone(),
            color: self.color.trim().to_string(),
            engine_size: self.engine_size.trim().to_string(),
            features,
            is_featured: self.is_featured,
        }
    }

    /// Every form field, with the current gallery passed back so uploads are
    /// appended to it
    fn to_patch(&self, features: Vec<String>) -> ListingPatch {
        ListingPatch {
            make: Some(self.make.trim().to_string()),
            model: Some(self.model.trim().to_string()),
            year: Some(self.year),
            price: Some(self.price),
            mileage: Some(self.mileage),
            transmission: Some(self.transmission),
            fuel_type: Some(self.fuel_type),
            condition: Some(self.condition),
            status: Some(self.status),
            images: Some(self.images.clone()),
            video_url: self.video_url.clone().filter(|url| !url.is_empty()).map(Some),
            description: Some(self.description.clone()),
            color: Some(self.color.trim().to_string()),
            engine_size: Some(self.engine_size.trim().to_string()),
            features: Some(features),
            is_featured: Some(self.is_featured),
        }
    }
}

impl Default for ListingForm {
    fn default() -> Self {
        Self::blank()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EditPhase {
    Idle,
    Editing,
    Submitting,
}

/// Message shown to the admin after a save attempt
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Notice {
    Saved,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Created(Listing),
    Updated(String),
}

/// One admin create/edit session.
///
/// `Idle -> Editing -> Submitting -> Idle` on success, back to `Editing` with
/// the form intact on failure or when the save is dropped before it finishes.
/// `submit` is refused outside `Editing`, so at most one save is in flight per
/// session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditSession {
    phase: EditPhase,
    editing_id: Option<String>,
    pub form: ListingForm,
    pub features_input: String,
    pending_images: Vec<MediaFile>,
    pending_video: Option<MediaFile>,
    notice: Option<Notice>,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSession {
    pub fn new() -> Self {
        Self {
            phase: EditPhase::Idle,
            editing_id: None,
            form: ListingForm::blank(),
            features_input: String::new(),
            pending_images: Vec::new(),
            pending_video: None,
            notice: None,
        }
    }

    pub fn phase(&self) -> EditPhase {
        self.phase
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn pending_images(&self) -> &[MediaFile] {
        &self.pending_images
    }

    pub fn pending_video(&self) -> Option<&MediaFile> {
        self.pending_video.as_ref()
    }

    pub fn can_submit(&self) -> bool {
        self.phase == EditPhase::Editing
    }

    fn ensure_not_submitting(&self) -> Result<(), WorkflowError> {
        if self.phase == EditPhase::Submitting {
            return Err(WorkflowError::AlreadySubmitting);
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.editing_id = None;
        self.form = ListingForm::blank();
        self.features_input.clear();
        self.pending_images.clear();
        self.pending_video = None;
    }

    /// Start a new listing from the blank template
    pub fn begin_create(&mut self) -> Result<(), WorkflowError> {
        self.ensure_not_submitting()?;
        self.reset();
        self.notice = None;
        self.phase = EditPhase::Editing;
        Ok(())
    }

    /// Seed the form from a stored listing. Pending files start empty.
    pub fn begin_edit(&mut self, listing: &Listing) -> Result<(), WorkflowError> {
        self.ensure_not_submitting()?;
        self.reset();
        self.editing_id = Some(listing.id.clone());
        self.form = ListingForm::from_listing(listing);
        self.features_input = join_features(&listing.features);
        self.notice = None;
        self.phase = EditPhase::Editing;
        Ok(())
    }

    /// Abandon the edit and return to the listing table
    pub fn cancel(&mut self) -> Result<(), WorkflowError> {
        self.ensure_not_submitting()?;
        self.reset();
        self.phase = EditPhase::Idle;
        Ok(())
    }

    pub fn add_images(&mut self, files: impl IntoIterator<Item = MediaFile>) {
        self.pending_images.extend(files);
    }

    pub fn set_video(&mut self, file: Option<MediaFile>) {
        self.pending_video = file;
    }

    /// Parse features, then create or update depending on whether an existing
    /// listing is being edited
    pub async fn submit(
        &mut self,
        repository: &ListingRepository,
    ) -> Result<SaveOutcome, WorkflowError> {
        match self.phase {
            EditPhase::Editing => {}
            EditPhase::Submitting => return Err(WorkflowError::AlreadySubmitting),
            EditPhase::Idle => return Err(WorkflowError::NotEditing),
        }

        self.form.validate()?;
        let features = parse_features(&self.features_input);

        self.phase = EditPhase::Submitting;
        self.notice = None;

        let result = {
            let _restore = RestoreEditing(&mut self.phase);
            match self.editing_id.clone() {
                Some(id) => repository
                    .update(
                        &id,
                        self.form.to_patch(features),
                        &self.pending_images,
                        self.pending_video.as_ref(),
                    )
                    .await
                    .map(|()| SaveOutcome::Updated(id.clone())),
                None => repository
                    .create(
                        self.form.to_new_listing(features),
                        &self.pending_images,
                        self.pending_video.as_ref(),
                    )
                    .await
                    .map(SaveOutcome::Created),
            }
        };

        match result {
            Ok(outcome) => {
                info!("Saved listing: {:?}", outcome_id(&outcome));
                self.reset();
                self.notice = Some(Notice::Saved);
                self.phase = EditPhase::Idle;
                Ok(outcome)
            }
            Err(e) => {
                error!("Failed to save listing: {}", e);
                self.notice = Some(Notice::Failed(SAVE_FAILED_NOTICE.to_string()));
                self.phase = EditPhase::Editing;
                Err(e.into())
            }
        }
    }

    /// First step of a delete. Nothing is removed until the returned request
    /// is confirmed.
    pub fn request_delete(&self, listing_id: impl Into<String>) -> PendingDelete {
        PendingDelete {
            listing_id: listing_id.into(),
        }
    }
}

/// Puts a session back into `Editing` when a save is dropped before it
/// completes, so the form stays usable
struct RestoreEditing<'a>(&'a mut EditPhase);

impl Drop for RestoreEditing<'_> {
    fn drop(&mut self) {
        *self.0 = EditPhase::Editing;
    }
}

fn outcome_id(outcome: &SaveOutcome) -> &str {
    match outcome {
        SaveOutcome::Created(listing) => &listing.id,
        SaveOutcome::Updated(id) => id,
    }
}

/// A delete awaiting confirmation. There is no undo once confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a delete request does nothing until confirmed"]
pub struct PendingDelete {
    listing_id: String,
}

impl PendingDelete {
    pub fn listing_id(&self) -> &str {
        &self.listing_id
    }

    pub async fn confirm(self, repository: &ListingRepository) -> Result<(), RepositoryError> {
        repository.delete(&self.listing_id).await
    }

    pub fn cancel(self) {}
}
