//! Terminal chat client for the Realm chat relay.

mod domain;
mod error;
mod formatter;
mod history;
mod profile;
mod runner;
mod session;
mod ui;

pub use domain::default_username;
pub use error::ClientError;
pub use profile::UsernameStore;
pub use runner::run_client;
