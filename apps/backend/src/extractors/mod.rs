pub mod identity;
pub mod product_id;
pub mod validated_json;

pub use product_id::ProductId;
pub use validated_json::ValidatedJson;
