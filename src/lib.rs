pub mod admin;
pub mod catalog;
pub mod config;
pub mod error;
pub mod media;
pub mod models;
pub mod repository;
pub mod store;

pub use config::AppConfig;
pub use error::{RepositoryError, StoreError, UploadError, WorkflowError};
pub use repository::{ListingRepository, SiteContentRepository};
