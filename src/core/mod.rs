pub mod cart;
pub mod notification;
pub mod order;

pub use crate::domain::model::{BadgeView, Cart, LineItem, OrderTotals, Toast};
pub use crate::domain::ports::{CartPresenter, KeyValueStore, OrderChannel};
pub use crate::utils::error::Result;
