// Transient user feedback: button loading states and the alert banner

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::format::escape_html;
use crate::view::{Button, View};

/// Label shown on a button while its request is in flight.
pub const LOADING_LABEL: &str = r#"<div class="loading"></div> Loading..."#;

static NEXT_ALERT_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
    Warning,
    Info,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Success => "success",
            AlertKind::Error => "error",
            AlertKind::Warning => "warning",
            AlertKind::Info => "info",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            AlertKind::Success => "check",
            AlertKind::Error => "exclamation-triangle",
            AlertKind::Warning | AlertKind::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub id: u64,
    pub kind: AlertKind,
    pub message: String,
}

impl Alert {
    pub fn new(message: impl Into<String>, kind: AlertKind) -> Self {
        Self {
            id: NEXT_ALERT_ID.fetch_add(1, Ordering::Relaxed),
            kind,
            message: message.into(),
        }
    }

    pub fn to_html(&self) -> String {
        format!(
            r#"<div class="alert alert-{kind}"><div style="display: flex; align-items: center; gap: 0.5rem;"><i class="fas fa-{icon}-circle"></i><span>{message}</span></div></div>"#,
            kind = self.kind.as_str(),
            icon = self.kind.icon(),
            message = escape_html(&self.message),
        )
    }
}

/// Restores a button's label and enabled state when dropped, so every exit
/// path of a controller (including `?` and early returns) hands it back.
pub struct LoadingGuard<V: View + 'static> {
    view: Arc<V>,
    button: Button,
    original: String,
}

impl<V: View + 'static> Drop for LoadingGuard<V> {
    fn drop(&mut self) {
        self.view
            .set_button(self.button, std::mem::take(&mut self.original), true);
    }
}

pub struct Feedback<V: View + 'static> {
    view: Arc<V>,
    alert_timeout: Duration,
}

impl<V: View + 'static> Clone for Feedback<V> {
    fn clone(&self) -> Self {
        Self {
            view: Arc::clone(&self.view),
            alert_timeout: self.alert_timeout,
        }
    }
}

impl<V: View + 'static> Feedback<V> {
    pub fn new(view: Arc<V>, config: &ClientConfig) -> Self {
        Self {
            view,
            alert_timeout: config.alert_timeout,
        }
    }

    pub fn view(&self) -> &Arc<V> {
        &self.view
    }

    /// Disable `button` and swap its label for a progress indicator.
    pub fn loading(&self, button: Button) -> LoadingGuard<V> {
        let original = self.view.button_label(button);
        self.view.set_button(button, LOADING_LABEL.to_string(), false);

        LoadingGuard {
            view: Arc::clone(&self.view),
            button,
            original,
        }
    }

    /// Replace whatever alert is showing and schedule this one's removal.
    pub fn alert(&self, message: impl Into<String>, kind: AlertKind) -> u64 {
        let alert = Alert::new(message, kind);
        let id = alert.id;
        debug!(id, kind = kind.as_str(), message = %alert.message, "Showing alert");

        self.view.clear_alerts();
        self.view.insert_alert(alert);

        let view = Arc::clone(&self.view);
        self.after(self.alert_timeout, move || view.remove_alert(id));

        id
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.alert(message, AlertKind::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.alert(message, AlertKind::Error)
    }

    pub fn warning(&self, message: impl Into<String>) -> u64 {
        self.alert(message, AlertKind::Warning)
    }

    /// Navigate to `path` once `delay` has elapsed.
    pub fn redirect_after(&self, path: &str, delay: Duration) {
        let view = Arc::clone(&self.view);
        let path = path.to_string();
        self.after(delay, move || view.navigate(&path));
    }

    fn after<F>(&self, delay: Duration, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    action();
                });
            }
            Err(_) => warn!("No async runtime, delayed UI update dropped"),
        }
    }
}
