//! Realm: single-room WebSocket chat relay.
//!
//! Clients connect to `/ws`, receive up to 50 recent messages, then receive
//! every message sent by any connected client in the order the server
//! received them. A single broadcast loop persists each message to SQLite and
//! then fans it out to every registered connection.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
