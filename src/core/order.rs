use crate::domain::model::{Cart, OrderTotals};
use crate::domain::ports::OrderChannel;
use crate::utils::error::{CartError, Result};
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Flat shipping unless the subtotal is strictly above the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingPolicy {
    pub shipping_fee: Decimal,
    pub free_shipping_threshold: Decimal,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            shipping_fee: Decimal::from(15),
            free_shipping_threshold: Decimal::from(200),
        }
    }
}

impl PricingPolicy {
    pub fn quote(&self, subtotal: Decimal) -> Result<OrderTotals> {
        let shipping = if subtotal > self.free_shipping_threshold {
            Decimal::ZERO
        } else {
            self.shipping_fee
        };
        let total = subtotal
            .checked_add(shipping)
            .ok_or_else(|| CartError::AmountOverflow {
                context: "order total with shipping".to_string(),
            })?;
        Ok(OrderTotals {
            subtotal,
            shipping,
            total,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderMessages {
    pub greeting: String,
    pub total_label: String,
    pub currency_symbol: String,
}

impl Default for OrderMessages {
    fn default() -> Self {
        Self {
            greeting: "Hi! I'd like to order:".to_string(),
            total_label: "💰 Total:".to_string(),
            currency_symbol: "$".to_string(),
        }
    }
}

/// Renders the numbered order listing followed by the shipping-inclusive total.
///
/// The text is plain; markup escaping is left to the channel that sends it.
pub fn format_order_summary(
    cart: &Cart,
    policy: &PricingPolicy,
    messages: &OrderMessages,
) -> Result<String> {
    let mut text = format!("{}\n\n", messages.greeting);

    for (index, item) in cart.items().iter().enumerate() {
        let line = if item.quantity > 1 {
            format!("{}. {} size {} (x{})\n", index + 1, item.name, item.size, item.quantity)
        } else {
            format!("{}. {} size {}\n", index + 1, item.name, item.size)
        };
        text.push_str(&line);
    }

    let totals = policy.quote(cart.subtotal()?)?;
    text.push_str(&format!(
        "\n{} {}{}",
        messages.total_label,
        messages.currency_symbol,
        totals.total.normalize()
    ));

    Ok(text)
}

/// Sends finished order summaries through an [`OrderChannel`]. One attempt, no retry.
pub struct OrderDispatcher<C: OrderChannel> {
    channel: C,
    header: String,
}

impl<C: OrderChannel + 'static> OrderDispatcher<C> {
    pub fn new(channel: C, header: impl Into<String>) -> Self {
        Self {
            channel,
            header: header.into(),
        }
    }

    pub fn compose(&self, summary: &str) -> String {
        format!("{}\n\n{}", self.header, summary)
    }

    pub async fn submit_order(&self, summary: &str) -> Result<()> {
        let text = self.compose(summary);
        match self.channel.send_order(&text).await {
            Ok(()) => {
                tracing::info!("✅ Order sent successfully");
                Ok(())
            }
            Err(e) => {
                tracing::error!("❌ Error sending order: {}", e);
                Err(e)
            }
        }
    }

    /// Fire-and-forget variant: the outcome is only logged.
    pub fn dispatch(self: Arc<Self>, summary: String) -> JoinHandle<()> {
        tokio::spawn(async move {
            let _ = self.submit_order(&summary).await;
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::LineItem;
    use crate::utils::error::CartError;
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    struct RecordingChannel {
        sent: Mutex<Vec<String>>,
        fail: bool,
    }

    impl RecordingChannel {
        fn new(fail: bool) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail,
            }
        }
    }

    #[async_trait]
    impl OrderChannel for RecordingChannel {
        async fn send_order(&self, text: &str) -> Result<()> {
            self.sent.lock().await.push(text.to_string());
            if self.fail {
                return Err(CartError::DeliveryError {
                    message: "Bad Request: chat not found".to_string(),
                });
            }
            Ok(())
        }
    }

    #[test]
    fn test_shipping_charged_below_threshold() {
        let totals = PricingPolicy::default().quote(Decimal::from(180)).unwrap();
        assert_eq!(totals.shipping, Decimal::from(15));
        assert_eq!(totals.total, Decimal::from(195));
    }

    #[test]
    fn test_free_shipping_above_threshold() {
        let totals = PricingPolicy::default().quote(Decimal::from(250)).unwrap();
        assert_eq!(totals.shipping, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::from(250));
    }

    #[test]
    fn test_threshold_itself_still_pays_shipping() {
        let totals = PricingPolicy::default().quote(Decimal::from(200)).unwrap();
        assert_eq!(totals.total, Decimal::from(215));
    }

    #[test]
    fn test_format_order_summary() {
        let cart: Cart = vec![
            LineItem::new("Tee", "M", 3, Decimal::from(20)),
            LineItem::new("Cap", "One", 1, Decimal::new(2450, 2)),
        ]
        .into_iter()
        .collect();

        let text = format_order_summary(&cart, &PricingPolicy::default(), &OrderMessages::default())
            .unwrap();

        assert_eq!(
            text,
            "Hi! I'd like to order:\n\n1. Tee size M (x3)\n2. Cap size One\n\n💰 Total: $99.5"
        );
    }

    #[test]
    fn test_format_empty_cart_charges_shipping() {
        let text =
            format_order_summary(&Cart::new(), &PricingPolicy::default(), &OrderMessages::default())
                .unwrap();
        assert_eq!(text, "Hi! I'd like to order:\n\n\n💰 Total: $15");
    }

    #[test]
    fn test_total_overflow_is_reported() {
        let err = PricingPolicy::default().quote(Decimal::MAX).unwrap_err();
        assert!(matches!(err, CartError::AmountOverflow { .. }));

        let cart: Cart = std::iter::once(LineItem::new("Gold", "M", 10, Decimal::MAX)).collect();
        assert!(format_order_summary(&cart, &PricingPolicy::default(), &OrderMessages::default())
            .is_err());
    }

    #[tokio::test]
    async fn test_submit_prefixes_header() {
        let channel = Arc::new(RecordingChannel::new(false));
        let dispatcher = OrderDispatcher::new(Arc::clone(&channel), "🛍 New order!");

        dispatcher.submit_order("1. Tee size M").await.unwrap();

        let sent = channel.sent.lock().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], "🛍 New order!\n\n1. Tee size M");
    }

    #[tokio::test]
    async fn test_dispatch_swallows_failure_and_does_not_retry() {
        let channel = Arc::new(RecordingChannel::new(true));
        let dispatcher = Arc::new(OrderDispatcher::new(Arc::clone(&channel), "🛍 New order!"));

        dispatcher.dispatch("1. Tee size M".to_string()).await.unwrap();

        assert_eq!(channel.sent.lock().await.len(), 1);
    }
}
