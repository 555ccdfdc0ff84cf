//! [`Command`] definition.

pub mod add_order;
pub mod add_product;
pub mod add_store;
pub mod change_payment_status;
pub mod remove_order;
pub mod remove_product;
pub mod remove_store;
pub mod seed;
pub mod update_order;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    add_order::AddOrder, add_product::AddProduct, add_store::AddStore,
    change_payment_status::ChangePaymentStatus, remove_order::RemoveOrder,
    remove_product::RemoveProduct, remove_store::RemoveStore, seed::Seed,
    update_order::UpdateOrder,
};
