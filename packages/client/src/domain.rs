//! Client-side message composition.

use realm_shared::{
    dto::ChatMessage,
    time::{Clock, current_time_label},
};
use uuid::Uuid;

/// Build the outgoing message for a line typed by the user.
///
/// The timestamp is the local `HH:MM` label; the server relays it verbatim.
pub fn compose_message(username: &str, content: &str, clock: &dyn Clock) -> ChatMessage {
    ChatMessage {
        username: username.to_string(),
        content: content.to_string(),
        timestamp: current_time_label(clock),
    }
}

/// Generate an `Anon-NNNN` username with a random suffix
pub fn default_username() -> String {
    let suffix = Uuid::new_v4().as_u128() % 10_000;
    format!("Anon-{}", suffix)
}
