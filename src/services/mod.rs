mod image_lifecycle;
mod image_storage_service_impl;
mod product_service_impl;

pub use image_lifecycle::{
    ImageLifecycleCoordinator, ImageRemoval, RemovalAction, TemporaryRemovalPolicy,
};
pub use image_storage_service_impl::{delete_images_concurrently, ImageStorageServiceImpl};
pub use product_service_impl::{ProductServiceBuilder, ProductServiceImpl};
