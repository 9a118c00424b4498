//! 接続ごとのセッション状態
//!
//! ```text
//! Connecting -> Replaying -> Active -> Closed
//!      |            |
//!      +------------+------------------> Closed
//! ```
//!
//! `Closed` は終端状態で、一度だけ遷移できる。

use super::SessionStateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// ハンドシェイク完了直後
    #[default]
    Connecting,
    /// 履歴を送信中（まだ Registry に登録されていない）
    Replaying,
    /// Registry に登録済みで、受信ループ中
    Active,
    /// 切断済み
    Closed,
}

impl SessionState {
    /// `next` へ遷移する
    pub fn transition(&mut self, next: SessionState) -> Result<(), SessionStateError> {
        use SessionState::*;

        let allowed = matches!(
            (*self, next),
            (Connecting, Replaying)
                | (Connecting, Closed)
                | (Replaying, Active)
                | (Replaying, Closed)
                | (Active, Closed)
        );
        if !allowed {
            return Err(SessionStateError {
                from: *self,
                to: next,
            });
        }
        *self = next;
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        *self == SessionState::Closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        // テスト項目: Connecting -> Replaying -> Active -> Closed の順に遷移できる
        // given (前提条件):
        let mut state = SessionState::default();

        // when (操作):
        let results = [
            state.transition(SessionState::Replaying),
            state.transition(SessionState::Active),
            state.transition(SessionState::Closed),
        ];

        // then (期待する結果):
        assert!(results.iter().all(Result::is_ok));
        assert!(state.is_closed());
    }

    #[test]
    fn test_replaying_can_close() {
        // テスト項目: 履歴送信中の失敗で Closed に遷移できる
        // given (前提条件):
        let mut state = SessionState::Replaying;

        // when (操作):
        let result = state.transition(SessionState::Closed);

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(state, SessionState::Closed);
    }

    #[test]
    fn test_closed_is_terminal() {
        // テスト項目: Closed からはどの状態にも遷移できない
        // given (前提条件):
        let mut state = SessionState::Closed;

        // when (操作):
        let to_active = state.transition(SessionState::Active);
        let to_closed = state.transition(SessionState::Closed);

        // then (期待する結果):
        assert_eq!(
            to_active,
            Err(SessionStateError {
                from: SessionState::Closed,
                to: SessionState::Active,
            })
        );
        assert!(to_closed.is_err());
        assert_eq!(state, SessionState::Closed);
    }

    #[test]
    fn test_cannot_skip_replay() {
        // テスト項目: 履歴送信を飛ばして Active にはなれない
        // given (前提条件):
        let mut state = SessionState::Connecting;

        // when (操作):
        let result = state.transition(SessionState::Active);

        // then (期待する結果):
        assert!(result.is_err());
        assert_eq!(state, SessionState::Connecting);
    }
}
