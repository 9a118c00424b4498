//! Code shared between the Realm chat server and client.
//!
//! - `dto`: the JSON wire format exchanged over the WebSocket
//! - `logger`: tracing subscriber setup
//! - `time`: clock abstraction and display-time helpers

pub mod dto;
pub mod logger;
pub mod time;
