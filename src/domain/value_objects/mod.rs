mod bucket_name;
mod object_name;
mod product_id;

pub use bucket_name::BucketName;
pub use object_name::ObjectName;
pub use product_id::ProductId;
