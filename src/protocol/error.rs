/// Errors raised while reading frames off a satellite connection.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The peer closed the stream between frames.
    #[error("connection closed by peer")]
    Closed,

    /// Underlying stream failure, including EOF in the middle of a frame.
    #[error("failed to read from connection: {0}")]
    Io(#[from] std::io::Error),

    /// The header line was not a valid `{"type", "data_length"}` object.
    #[error("failed to decode event header {line:?}: {source}")]
    Header {
        /// Raw header line, without the trailing newline.
        line: String,
        #[source]
        source: serde_json::Error,
    },

    /// No newline within the header size limit.
    #[error("event header exceeds {max} bytes")]
    HeaderTooLong { max: usize },

    /// Declared payload is larger than we are willing to buffer. The body
    /// has been skipped.
    #[error("event {event_type} declares {length} bytes of data (max {max})")]
    PayloadTooLarge {
        event_type: String,
        length: i64,
        max: usize,
    },

    /// The payload bytes were read but are not a JSON object.
    #[error("failed to decode data for event {event_type}: {source}")]
    Payload {
        event_type: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FrameError {
    /// Whether the connection must be dropped.
    ///
    /// Payload errors leave the stream positioned at the next header;
    /// every other error loses framing.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            FrameError::Payload { .. } | FrameError::PayloadTooLarge { .. }
        )
    }
}

/// A frame was read fine but its payload does not fit the event type.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("invalid data for event {event_type}: {source}")]
    InvalidPayload {
        event_type: String,
        #[source]
        source: serde_json::Error,
    },
}
