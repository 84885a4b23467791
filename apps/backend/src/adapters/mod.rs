//! Repository implementations.

pub mod memory;
pub mod products_sea;
pub mod users_sea;

pub use memory::{MemoryProductRepository, MemoryUserRepository};
pub use products_sea::SeaProductRepository;
pub use users_sea::SeaUserRepository;
