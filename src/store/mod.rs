pub mod firestore;
pub mod memory;
pub mod traits;
pub mod types;

pub use firestore::FirestoreStore;
pub use memory::MemoryStore;
pub use traits::DocumentStore;
pub use types::{field_writes, field_writes_of, Document, FieldWrites, Fields, WriteMode};
