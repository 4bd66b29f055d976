/// Where user-facing messages from the row operations end up.
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

impl<F: FnMut(&str)> Notifier for F {
    fn notify(&mut self, message: &str) {
        self(message)
    }
}

/// Keeps every message, in order. Stands in for `window.alert` when the
/// rows are driven outside a browser.
#[derive(Debug, Default, Clone)]
pub struct AlertLog {
    messages: Vec<String>,
}

impl AlertLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn take_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }
}

impl Notifier for AlertLog {
    fn notify(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}
