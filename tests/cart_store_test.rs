use anyhow::Result;
use rightway_cart::{
    BadgeView, CartConfig, CartError, CartPresenter, CartStore, FileStore, KeyValueStore,
    LineItem, Toast,
};
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

#[derive(Default)]
struct RecordingPresenter {
    badges: Mutex<Vec<(String, BadgeView)>>,
    toasts: Mutex<Vec<String>>,
}

impl RecordingPresenter {
    fn last_badge(&self) -> Option<BadgeView> {
        self.badges.lock().unwrap().last().map(|(_, badge)| *badge)
    }
}

impl CartPresenter for RecordingPresenter {
    fn render_badge(&self, surface: &str, badge: &BadgeView) {
        self.badges.lock().unwrap().push((surface.to_string(), *badge));
    }

    fn show_toast(&self, toast: &Toast) {
        self.toasts.lock().unwrap().push(toast.message.clone());
    }

    fn begin_toast_exit(&self, _toast: &Toast) {}

    fn remove_toast(&self, _toast: &Toast) {}
}

fn tee(size: &str, quantity: u32) -> LineItem {
    LineItem::new("Tee", size, quantity, Decimal::from(20))
}

fn file_cart(
    temp_dir: &TempDir,
) -> (CartStore<FileStore, RecordingPresenter>, Arc<RecordingPresenter>) {
    let mut config = CartConfig::default();
    config.storage.path = temp_dir.path().join("store.json").display().to_string();

    let presenter = Arc::new(RecordingPresenter::default());
    let cart = CartStore::new(
        FileStore::new(&config.storage.path),
        Arc::clone(&presenter),
        &config,
    );
    (cart, presenter)
}

#[tokio::test]
async fn test_tee_example_persists_across_store_instances() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let (cart, presenter) = file_cart(&temp_dir);

    cart.add(tee("M", 1)).await?;
    cart.add(tee("M", 2)).await?;

    let (reopened, _) = file_cart(&temp_dir);
    let loaded = reopened.load().await?;
    assert_eq!(loaded.items(), &[tee("M", 3)]);
    assert_eq!(reopened.total().await?, Decimal::from(60));

    assert_eq!(presenter.last_badge(), Some(BadgeView::for_count(3)));
    assert_eq!(
        presenter.toasts.lock().unwrap().as_slice(),
        ["Tee added to cart!".to_string(), "Tee added to cart!".to_string()]
    );
    Ok(())
}

#[tokio::test]
async fn test_stored_value_is_plain_json_array() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let (cart, _) = file_cart(&temp_dir);

    cart.add(LineItem::new("Cap", "One", 1, Decimal::new(1999, 2)))
        .await?;

    let store = FileStore::new(temp_dir.path().join("store.json"));
    let raw = store.get("rightway_cart").await?.expect("cart key written");
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    assert_eq!(
        value,
        serde_json::json!([{"name": "Cap", "size": "One", "quantity": 1, "price": 19.99}])
    );
    Ok(())
}

#[tokio::test]
async fn test_total_matches_sum_over_mixed_adds() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let (cart, _) = file_cart(&temp_dir);

    let items = [
        LineItem::new("Tee", "M", 2, Decimal::from(20)),
        LineItem::new("Hoodie", "L", 1, Decimal::new(5550, 2)),
        LineItem::new("Tee", "L", 1, Decimal::from(20)),
        LineItem::new("Hoodie", "L", 2, Decimal::new(5550, 2)),
    ];
    let expected: Decimal = items
        .iter()
        .map(|item| item.line_total().unwrap())
        .sum();

    for item in items {
        cart.add(item).await?;
    }

    assert_eq!(cart.total().await?, expected);
    assert_eq!(cart.load().await?.len(), 3);
    assert_eq!(cart.item_count().await?, 6);
    Ok(())
}

#[tokio::test]
async fn test_remove_then_clear() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let (cart, presenter) = file_cart(&temp_dir);

    for size in ["S", "M", "L", "XL"] {
        cart.add(tee(size, 1)).await?;
    }

    cart.remove(2).await?;
    let sizes: Vec<String> = cart
        .load()
        .await?
        .items()
        .iter()
        .map(|item| item.size.clone())
        .collect();
    assert_eq!(sizes, vec!["S", "M", "XL"]);

    assert!(matches!(
        cart.remove(3).await,
        Err(CartError::IndexOutOfRange { index: 3, len: 3 })
    ));

    cart.clear().await?;
    assert!(cart.load().await?.is_empty());
    assert_eq!(presenter.last_badge(), Some(BadgeView::for_count(0)));
    Ok(())
}

#[tokio::test]
async fn test_summary_applies_free_shipping_threshold() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let (cart, _) = file_cart(&temp_dir);

    cart.add(LineItem::new("Jacket", "M", 1, Decimal::from(180)))
        .await?;
    assert!(cart.order_summary().await?.ends_with("$195"));

    cart.add(LineItem::new("Tee", "S", 1, Decimal::from(70)))
        .await?;
    let summary = cart.order_summary().await?;
    assert_eq!(
        summary,
        "Hi! I'd like to order:\n\n1. Jacket size M\n2. Tee size S\n\n💰 Total: $250"
    );
    Ok(())
}
