/// Blocking user notification (an alert dialog, a status line, ...).
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}
