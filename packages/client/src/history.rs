//! Tracks what has already been printed, so that the history replayed after
//! a reconnect does not show the same lines twice.

use std::collections::VecDeque;

use realm_shared::dto::ChatMessage;

/// The server replays at most this many messages on connect
const REPLAY_WINDOW: usize = 50;

#[derive(Debug, Default)]
pub struct SeenMessages {
    shown: VecDeque<ChatMessage>,
    pending: VecDeque<ChatMessage>,
}

impl SeenMessages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call when a new connection is established, before its replay arrives
    pub fn begin_replay(&mut self) {
        self.pending = self.shown.clone();
    }

    /// Returns `true` if `message` should be printed.
    ///
    /// While replaying, messages that match the previously shown tail are
    /// skipped. The first message with no match ends the overlap.
    pub fn observe(&mut self, message: &ChatMessage) -> bool {
        if let Some(pos) = self.pending.iter().position(|m| m == message) {
            self.pending.drain(..=pos);
            return false;
        }
        self.pending.clear();

        if self.shown.len() == REPLAY_WINDOW {
            self.shown.pop_front();
        }
        self.shown.push_back(message.clone());
        true
    }
}
