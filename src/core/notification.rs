use crate::domain::model::Toast;
use crate::domain::ports::CartPresenter;
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastTiming {
    pub display: Duration,
    pub exit: Duration,
}

impl Default for ToastTiming {
    fn default() -> Self {
        Self {
            display: Duration::from_millis(3000),
            exit: Duration::from_millis(300),
        }
    }
}

struct ActiveToast {
    toast: Toast,
    dismiss: JoinHandle<()>,
}

/// Keeps at most one toast on screen and owns its dismissal timer.
///
/// Must be used from inside a tokio runtime: every toast spawns its own timer task.
pub struct NotificationCenter<P: CartPresenter> {
    presenter: Arc<P>,
    timing: ToastTiming,
    active: Arc<Mutex<Option<ActiveToast>>>,
    next_id: AtomicU64,
}

impl<P: CartPresenter + 'static> NotificationCenter<P> {
    pub fn new(presenter: Arc<P>, timing: ToastTiming) -> Self {
        Self {
            presenter,
            timing,
            active: Arc::new(Mutex::new(None)),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn notify(&self, message: impl Into<String>) -> Toast {
        let toast = Toast {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            message: message.into(),
            shown_at: Utc::now(),
        };

        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = active.take() {
            previous.dismiss.abort();
            self.presenter.remove_toast(&previous.toast);
        }

        self.presenter.show_toast(&toast);
        tracing::debug!(toast_id = toast.id, "Toast shown: {}", toast.message);

        let dismiss = tokio::spawn(Self::dismiss_later(
            Arc::clone(&self.presenter),
            Arc::clone(&self.active),
            toast.clone(),
            self.timing,
        ));
        *active = Some(ActiveToast {
            toast: toast.clone(),
            dismiss,
        });

        toast
    }

    pub fn current(&self) -> Option<Toast> {
        let active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        active.as_ref().map(|a| a.toast.clone())
    }

    async fn dismiss_later(
        presenter: Arc<P>,
        active: Arc<Mutex<Option<ActiveToast>>>,
        toast: Toast,
        timing: ToastTiming,
    ) {
        tokio::time::sleep(timing.display).await;
        presenter.begin_toast_exit(&toast);
        tokio::time::sleep(timing.exit).await;

        let mut slot = active.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.as_ref().is_some_and(|a| a.toast.id == toast.id) {
            *slot = None;
            presenter.remove_toast(&toast);
        }
    }
}
