pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{
    presenter::ConsolePresenter,
    storage::{FileStore, MemoryStore},
    telegram::TelegramChannel,
};
pub use config::CartConfig;
pub use core::{
    cart::CartStore,
    notification::{NotificationCenter, ToastTiming},
    order::{format_order_summary, OrderDispatcher, OrderMessages, PricingPolicy},
};
pub use domain::model::{BadgeView, Cart, LineItem, OrderTotals, Toast};
pub use domain::ports::{CartPresenter, KeyValueStore, OrderChannel};
pub use utils::error::{CartError, Result};
