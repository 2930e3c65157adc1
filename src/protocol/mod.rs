//! Satellite event protocol
//!
//! A frame is one JSON header line terminated by `\n`, optionally followed
//! by exactly `data_length` bytes of a JSON object:
//!
//! ```text
//! {"type":"synthesize","data_length":17}\n{"text":"Hello, world!!!!"}
//! ```

mod error;
mod event;
mod frame;

pub use error::{EventError, FrameError};
pub use event::Event;
pub use frame::{FrameHeader, FrameReader, Message, MAX_HEADER_BYTES, MAX_PAYLOAD_BYTES};
