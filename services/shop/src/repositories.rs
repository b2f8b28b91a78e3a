//! Repositories for database operations
//!
//! Each repository wraps the collection handle for one resource and issues
//! exactly one database call per method.

pub mod cart;
pub mod order;
pub mod product;

pub use cart::CartRepository;
pub use order::OrderRepository;
pub use product::ProductRepository;

/// Collections owned by the shop service
pub const COLLECTIONS: [&str; 3] = [product::COLLECTION, cart::COLLECTION, order::COLLECTION];
