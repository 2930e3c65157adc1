use super::error::FrameError;
use futures::stream::{self, Stream};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncReadExt};
use tracing::debug;

/// Largest payload body we will buffer for a single event
pub const MAX_PAYLOAD_BYTES: usize = 1024 * 1024;

/// Longest header line accepted, newline included
pub const MAX_HEADER_BYTES: usize = 64 * 1024;

/// Header line of a frame: `{"type": "...", "data_length": N}\n`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameHeader {
    #[serde(rename = "type")]
    pub event_type: String,

    /// Byte count of the JSON body that follows, zero or negative for none
    #[serde(default)]
    pub data_length: i64,
}

/// One decoded event with its JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub event_type: String,
    pub data_length: i64,
    pub payload: Map<String, Value>,
}

/// Reads frames from a buffered byte stream
///
/// Each call to [`FrameReader::read_message`] blocks until one complete
/// frame carrying a payload is available. Header-only frames are skipped.
pub struct FrameReader<R> {
    reader: R,
    line: Vec<u8>,
}

impl<R> FrameReader<R>
where
    R: AsyncBufRead + Unpin,
{
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::with_capacity(256),
        }
    }

    /// Read and decode the next header line
    pub async fn read_header(&mut self) -> Result<FrameHeader, FrameError> {
        self.line.clear();
        let n = (&mut self.reader)
            .take(MAX_HEADER_BYTES as u64)
            .read_until(b'\n', &mut self.line)
            .await?;
        if n == 0 {
            return Err(FrameError::Closed);
        }
        if self.line.last() != Some(&b'\n') {
            if n >= MAX_HEADER_BYTES {
                return Err(FrameError::HeaderTooLong {
                    max: MAX_HEADER_BYTES,
                });
            }
            return Err(FrameError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stream ended inside an event header",
            )));
        }

        debug!("Received event: {}", String::from_utf8_lossy(&self.line).trim_end());

        serde_json::from_slice(&self.line).map_err(|source| FrameError::Header {
            line: String::from_utf8_lossy(&self.line).trim_end().to_string(),
            source,
        })
    }

    /// Read the next frame that carries a payload
    pub async fn read_message(&mut self) -> Result<Message, FrameError> {
        loop {
            let header = self.read_header().await?;

            if header.data_length <= 0 {
                debug!("Event {} has no data, skipping", header.event_type);
                continue;
            }

            let length = match usize::try_from(header.data_length) {
                Ok(length) if length <= MAX_PAYLOAD_BYTES => length,
                _ => {
                    self.discard(header.data_length.unsigned_abs()).await?;
                    return Err(FrameError::PayloadTooLarge {
                        event_type: header.event_type,
                        length: header.data_length,
                        max: MAX_PAYLOAD_BYTES,
                    });
                }
            };

            debug!("Reading {} bytes", length);
            let mut body = vec![0u8; length];
            self.reader.read_exact(&mut body).await?;

            let payload: Map<String, Value> =
                serde_json::from_slice(&body).map_err(|source| FrameError::Payload {
                    event_type: header.event_type.clone(),
                    source,
                })?;

            return Ok(Message {
                event_type: header.event_type,
                data_length: header.data_length,
                payload,
            });
        }
    }

    /// Skip `length` body bytes so the stream stays aligned on the next header
    async fn discard(&mut self, length: u64) -> Result<(), FrameError> {
        debug!("Discarding {} bytes", length);
        let skipped = io::copy(&mut (&mut self.reader).take(length), &mut io::sink()).await?;
        if skipped < length {
            return Err(FrameError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stream ended inside an event body",
            )));
        }
        Ok(())
    }

    /// Turn the reader into a stream of messages
    ///
    /// The stream ends right after yielding a fatal error; non-fatal payload
    /// errors are yielded and reading continues with the next header.
    pub fn into_stream(self) -> impl Stream<Item = Result<Message, FrameError>> {
        stream::unfold(Some(self), |state| async move {
            let mut reader = state?;
            match reader.read_message().await {
                Err(e) if e.is_fatal() => Some((Err(e), None)),
                result => Some((result, Some(reader))),
            }
        })
    }
}
