//! Satellite-facing TCP server
//!
//! - `acceptor`: listens and spawns one task per connection
//! - `connection`: frame reading loop for a single client
//! - `dispatcher`: event handling shared by all connections

mod acceptor;
mod connection;
mod dispatcher;

pub use acceptor::Server;
pub use connection::serve_connection;
pub use dispatcher::{Dispatcher, WallClock};
