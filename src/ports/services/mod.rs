mod image_storage_service;
mod product_service;

pub use image_storage_service::ImageStorageService;
pub use product_service::ProductService;
