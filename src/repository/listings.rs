use crate::error::{RepositoryError, StoreError, UploadError};
use crate::media::{MediaFile, MediaUploader};
use crate::models::{Inquiry, Listing, ListingPatch, NewInquiry, NewListing};
use crate::repository::codec;
use crate::store::{field_writes_of, Document, DocumentStore, WriteMode};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub const LISTINGS_COLLECTION: &str = "cars";
pub const INQUIRIES_COLLECTION: &str = "inquiries";

/// Sole sort key for every collection read
const ORDER_FIELD: &str = "createdAt";

/// Vehicle listings and customer inquiries.
///
/// Media is uploaded before the record that references it is written, so a
/// stored listing never points at a local file.
#[derive(Clone)]
pub struct ListingRepository {
    store: Arc<dyn DocumentStore>,
    uploader: Arc<dyn MediaUploader>,
}

impl ListingRepository {
    pub fn new(store: Arc<dyn DocumentStore>, uploader: Arc<dyn MediaUploader>) -> Self {
        Self { store, uploader }
    }

    /// Every listing, newest first. Failures are logged and read as an empty
    /// catalog so the public pages keep rendering.
    pub async fn list_all(&self) -> Vec<Listing> {
        match self.try_list_all().await {
            Ok(listings) => listings,
            Err(e) => {
                error!("Error fetching listings: {}", e);
                Vec::new()
            }
        }
    }

    /// Like [`list_all`](Self::list_all) but reports transport failures.
    /// Documents that fail to decode are skipped.
    pub async fn try_list_all(&self) -> Result<Vec<Listing>, RepositoryError> {
        let documents = self.store.list(LISTINGS_COLLECTION, ORDER_FIELD).await?;
        let now = Utc::now().timestamp_millis();

        let mut listings: Vec<Listing> = documents
            .into_iter()
            .filter_map(|doc| match codec::decode_listing(doc, now) {
                Ok(listing) => Some(listing),
                Err(e) => {
                    warn!("Skipping listing: {}", e);
                    None
                }
            })
            .collect();

        // Stored timestamps come in mixed shapes; order on the normalized value.
        listings.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        debug!("Loaded {} listings", listings.len());
        Ok(listings)
    }

    /// Point lookup. A missing listing is `Ok(None)`.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Listing>, RepositoryError> {
        let Some(doc) = self.store.get(LISTINGS_COLLECTION, id).await? else {
            return Ok(None);
        };
        codec::decode_listing(doc, Utc::now().timestamp_millis()).map(Some)
    }

    /// Upload the media, then write the record. Any failed upload aborts the
    /// create before anything is stored.
    pub async fn create(
        &self,
        listing: NewListing,
        image_files: &[MediaFile],
        video_file: Option<&MediaFile>,
    ) -> Result<Listing, RepositoryError> {
        let images = self.upload_all(image_files).await?;
        let video_url = match video_file {
            Some(file) => Some(self.uploader.upload(file).await?.url),
            None => None,
        };

        let created_at = Utc::now().timestamp_millis();
        let fields = codec::encode_new_listing(&listing, images, video_url, created_at)?;
        let id = self.store.insert(LISTINGS_COLLECTION, fields.clone()).await?;

        info!("Created listing {} ({} {})", id, listing.make, listing.model);
        codec::decode_listing(Document { id, fields }, created_at)
    }

    /// Merge `patch` into the stored listing.
    ///
    /// Uploaded images are appended to `patch.images` (not to the stored list),
    /// so callers growing a gallery pass the current list back in the patch.
    /// A new video always replaces the stored one.
    pub async fn update(
        &self,
        id: &str,
        mut patch: ListingPatch,
        new_image_files: &[MediaFile],
        new_video_file: Option<&MediaFile>,
    ) -> Result<(), RepositoryError> {
        if !new_image_files.is_empty() {
            let uploaded = self.upload_all(new_image_files).await?;
            let mut images = patch.images.take().unwrap_or_default();
            images.extend(uploaded);
            patch.images = Some(images);
        }

        if let Some(file) = new_video_file {
            patch.video_url = Some(Some(self.uploader.upload(file).await?.url));
        }

        let writes = field_writes_of(&patch, 0)?;

        if writes.is_empty() {
            // Nothing to write, but the listing still has to exist.
            return match self.store.get(LISTINGS_COLLECTION, id).await? {
                Some(_) => Ok(()),
                None => Err(StoreError::NotFound {
                    collection: LISTINGS_COLLECTION.to_string(),
                    id: id.to_string(),
                }
                .into()),
            };
        }

        self.store
            .update(LISTINGS_COLLECTION, id, writes, WriteMode::MustExist)
            .await?;

        info!("Updated listing {}", id);
        Ok(())
    }

    /// Hard delete. Inquiries referencing the listing are kept.
    pub async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        self.store.delete(LISTINGS_COLLECTION, id).await?;
        info!("Deleted listing {}", id);
        Ok(())
    }

    pub async fn add_inquiry(&self, inquiry: NewInquiry) -> Result<Inquiry, RepositoryError> {
        let submitted_at = Utc::now();
        let fields = codec::encode_new_inquiry(&inquiry, submitted_at);
        let id = self.store.insert(INQUIRIES_COLLECTION, fields).await?;

        info!("Recorded inquiry {} from {}", id, inquiry.name);
        Ok(Inquiry {
            id,
            listing: inquiry.listing,
            name: inquiry.name,
            phone: inquiry.phone,
            message: inquiry.message,
            submitted_at,
        })
    }

    /// Inquiries newest first, for the admin screen
    pub async fn list_inquiries(&self) -> Result<Vec<Inquiry>, RepositoryError> {
        let documents = self.store.list(INQUIRIES_COLLECTION, ORDER_FIELD).await?;
        let now = Utc::now();

        let mut inquiries: Vec<Inquiry> = documents
            .into_iter()
            .map(|doc| codec::decode_inquiry(doc, now))
            .collect();
        inquiries.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));

        Ok(inquiries)
    }

    /// Upload in selection order; the first failure aborts the batch
    async fn upload_all(&self, files: &[MediaFile]) -> Result<Vec<String>, UploadError> {
        let mut urls = Vec::with_capacity(files.len());
        for file in files {
            match self.uploader.upload(file).await {
                Ok(uploaded) => urls.push(uploaded.url),
                Err(e) => {
                    error!(
                        "Failed to upload {} to {}: {}",
                        file.file_name,
                        self.uploader.provider_name(),
                        e
                    );
                    return Err(e);
                }
            }
        }
        debug!("Uploaded {} files: {:?}", urls.len(), urls);
        Ok(urls)
    }
}
