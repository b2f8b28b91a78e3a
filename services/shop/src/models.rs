//! Shop records and request payloads

pub mod cart;
pub mod order;
pub mod product;

pub use cart::{CartItem, NewCartItem};
pub use order::{NewOrder, Order};
pub use product::{Product, ProductInput};
