pub mod editing_session;
pub mod image;
pub mod product;

pub use editing_session::{EditingMode, EditingSession, RemovalDecision};
pub use image::{ImageDeletionResult, ImageFile, StoredImage, UploadFailure, UploadProgress, UploadedImage};
pub use product::{removed_images, Product, ProductDeletion, ProductDraft, ProductFields};
