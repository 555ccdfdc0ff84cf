//! Domain definitions.

pub mod order;
pub mod product;
pub mod recipe;
pub mod store;

pub use self::{order::Order, product::Product, recipe::Recipe, store::Store};
