//! Data Transfer Objects (DTOs) for the chat server.
//!
//! - `websocket`: the wire message shared with the client crate
//! - `http`: HTTP API response DTOs
//! - `conversion`: DTO ⇔ domain entity conversion

pub mod conversion;
pub mod http;

pub use realm_shared::dto as websocket;
