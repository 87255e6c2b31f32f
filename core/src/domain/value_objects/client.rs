//! Client request context forwarded by the transport layer.

/// Per-request client metadata used to label device sessions
#[derive(Debug, Clone, Default)]
pub struct ClientContext {
    /// Free-text device label, typically the User-Agent header
    pub device: Option<String>,
}

impl ClientContext {
    /// Creates a context with a known device label
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            device: Some(device.into()),
        }
    }

    /// Label stored on refresh-token records
    pub fn device_label(&self) -> &str {
        self.device.as_deref().unwrap_or("unknown")
    }
}
