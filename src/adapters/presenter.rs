use crate::domain::model::{BadgeView, Toast};
use crate::domain::ports::CartPresenter;

/// Terminal rendering for the CLI. Toasts go to stdout; badges only when asked for.
#[derive(Debug, Default)]
pub struct ConsolePresenter {
    show_badges: bool,
}

impl ConsolePresenter {
    pub fn new(show_badges: bool) -> Self {
        Self { show_badges }
    }

    pub fn badge_line(surface: &str, badge: &BadgeView) -> String {
        match badge.state_class() {
            Some(class) => format!("🛒 {} {} ({})", surface, badge.count, class),
            None => format!("🛒 {} hidden", surface),
        }
    }
}

impl CartPresenter for ConsolePresenter {
    fn render_badge(&self, surface: &str, badge: &BadgeView) {
        tracing::debug!(surface, count = badge.count, visible = badge.visible, "Badge rendered");
        if self.show_badges {
            println!("{}", Self::badge_line(surface, badge));
        }
    }

    fn show_toast(&self, toast: &Toast) {
        println!("✅ {}", toast.message);
    }

    fn begin_toast_exit(&self, toast: &Toast) {
        tracing::debug!(toast_id = toast.id, "Toast exiting");
    }

    fn remove_toast(&self, toast: &Toast) {
        tracing::debug!(toast_id = toast.id, "Toast removed");
    }
}
