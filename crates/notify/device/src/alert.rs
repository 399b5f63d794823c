//! One-shot user-visible alerts.

/// Shows a title/body alert to the user.
pub trait Alerter: Send + Sync {
    fn alert(&self, title: &str, body: &str);
}

impl<F> Alerter for F
where
    F: Fn(&str, &str) + Send + Sync,
{
    fn alert(&self, title: &str, body: &str) {
        self(title, body)
    }
}
