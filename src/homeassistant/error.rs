/// Failures of a single notification call. Never retried.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// Connection, timeout or body encoding failure.
    #[error("request to Home Assistant failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Home Assistant answered outside 2xx.
    #[error("unexpected response from Home Assistant [{status}]: {body}")]
    Status { status: u16, body: String },
}
