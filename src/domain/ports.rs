use crate::domain::model::{BadgeView, Toast};
use crate::utils::error::Result;
use async_trait::async_trait;

/// String key-value persistence, the shape of a browser's localStorage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
    fn set(&self, key: &str, value: &str) -> impl std::future::Future<Output = Result<()>> + Send;
    fn remove(&self, key: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Where the cart badge and transient notifications are drawn.
pub trait CartPresenter: Send + Sync {
    fn render_badge(&self, surface: &str, badge: &BadgeView);
    fn show_toast(&self, toast: &Toast);
    /// The toast has started its exit transition.
    fn begin_toast_exit(&self, toast: &Toast);
    fn remove_toast(&self, toast: &Toast);
}

#[async_trait]
pub trait OrderChannel: Send + Sync {
    async fn send_order(&self, text: &str) -> Result<()>;
}

#[async_trait]
impl<T: OrderChannel + ?Sized> OrderChannel for std::sync::Arc<T> {
    async fn send_order(&self, text: &str) -> Result<()> {
        (**self).send_order(text).await
    }
}
