use crate::config::toml_config::{CartConfig, MessagesConfig};
use crate::core::notification::{NotificationCenter, ToastTiming};
use crate::core::order::{format_order_summary, OrderMessages, PricingPolicy};
use crate::domain::model::{BadgeView, Cart, LineItem, Toast};
use crate::domain::ports::{CartPresenter, KeyValueStore};
use crate::utils::error::{CartError, Result};
use crate::utils::validation::Validate;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Cart state kept in a [`KeyValueStore`]. Nothing is cached: every call re-reads the store.
pub struct CartStore<S: KeyValueStore, P: CartPresenter + 'static> {
    storage: S,
    presenter: Arc<P>,
    notifications: NotificationCenter<P>,
    key: String,
    surfaces: Vec<String>,
    policy: PricingPolicy,
    messages: MessagesConfig,
    order_messages: OrderMessages,
}

impl<S: KeyValueStore, P: CartPresenter + 'static> CartStore<S, P> {
    pub fn new(storage: S, presenter: Arc<P>, config: &CartConfig) -> Self {
        let timing = ToastTiming {
            display: config.notifications.display(),
            exit: config.notifications.exit(),
        };
        Self {
            storage,
            notifications: NotificationCenter::new(Arc::clone(&presenter), timing),
            presenter,
            key: config.storage.key.clone(),
            surfaces: config.badge.surfaces.clone(),
            policy: config.pricing.policy(),
            messages: config.messages.clone(),
            order_messages: config.messages.order_messages(&config.pricing.currency_symbol),
        }
    }

    pub async fn load(&self) -> Result<Cart> {
        match self.storage.get(&self.key).await? {
            None => Ok(Cart::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|source| {
                tracing::error!(key = %self.key, "Stored cart is corrupt: {}", source);
                CartError::CorruptCart {
                    key: self.key.clone(),
                    source,
                }
            }),
        }
    }

    pub async fn save(&self, cart: &Cart) -> Result<()> {
        let serialized = serde_json::to_string(cart)?;
        self.storage.set(&self.key, &serialized).await?;
        tracing::debug!(entries = cart.len(), "Cart saved");
        self.refresh_badge().await?;
        Ok(())
    }

    pub async fn add(&self, item: LineItem) -> Result<()> {
        item.validate()?;

        let mut cart = self.load().await?;
        let message = self.messages.added_to_cart(&item.name);
        tracing::info!(name = %item.name, size = %item.size, quantity = item.quantity, "Adding to cart");
        cart.merge(item);
        self.save(&cart).await?;

        self.notify(message);
        Ok(())
    }

    pub async fn remove(&self, index: usize) -> Result<LineItem> {
        let mut cart = self.load().await?;
        let removed = cart.remove(index)?;
        tracing::info!(index, name = %removed.name, size = %removed.size, "Removed from cart");
        self.save(&cart).await?;
        Ok(removed)
    }

    pub async fn clear(&self) -> Result<()> {
        self.storage.remove(&self.key).await?;
        tracing::info!("Cart cleared");
        self.refresh_badge().await?;
        Ok(())
    }

    pub async fn total(&self) -> Result<Decimal> {
        self.load().await?.subtotal()
    }

    pub async fn item_count(&self) -> Result<u64> {
        Ok(self.load().await?.item_count())
    }

    /// Pushes the current item count to every badge surface.
    pub async fn refresh_badge(&self) -> Result<BadgeView> {
        let badge = BadgeView::for_count(self.item_count().await?);
        for surface in &self.surfaces {
            self.presenter.render_badge(surface, &badge);
        }
        Ok(badge)
    }

    pub fn notify(&self, message: impl Into<String>) -> Toast {
        self.notifications.notify(message)
    }

    pub async fn order_summary(&self) -> Result<String> {
        let cart = self.load().await?;
        format_order_summary(&cart, &self.policy, &self.order_messages)
    }
}
