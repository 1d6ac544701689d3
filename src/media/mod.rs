pub mod cloudinary;
pub mod memory;
pub mod traits;
pub mod types;

pub use cloudinary::CloudinaryUploader;
pub use memory::MemoryUploader;
pub use traits::MediaUploader;
pub use types::{MediaFile, MediaKind, UploadedMedia};
