//! Repository traits and domain models.
//!
//! Services depend on these traits only; SeaORM and in-memory
//! implementations live under `crate::adapters`.

pub mod products;
pub mod users;

pub use products::{Product, ProductDraft, ProductRepository};
pub use users::{NewUser, User, UserRepository};
