//! SQLite Message Repository 実装
//!
//! rusqlite は同期 API のため、接続を `Arc<Mutex<Connection>>` で共有し、
//! 各操作は `tokio::task::spawn_blocking` 上で実行します。
//!
//! ## スキーマ
//!
//! ```text
//! messages(id INTEGER PRIMARY KEY AUTOINCREMENT, username, content, timestamp)
//! ```
//!
//! `id` はサーバーが採番し、履歴の並び順にのみ使用します。
//! 更新・削除は行いません。

use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use rusqlite::{Connection, params};

use crate::domain::{ChatMessage, MessageRepository, RepositoryError};

/// インメモリ DB を指定するためのパス
pub const IN_MEMORY_PATH: &str = ":memory:";

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS messages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL,
    content TEXT NOT NULL,
    timestamp TEXT NOT NULL
);";

const INSERT_SQL: &str = "INSERT INTO messages (username, content, timestamp) VALUES (?1, ?2, ?3)";

const SELECT_LATEST_SQL: &str = "SELECT username, content, timestamp FROM (
    SELECT id, username, content, timestamp FROM messages ORDER BY id DESC LIMIT ?1
) ORDER BY id ASC";

/// SQLite Message Repository 実装
pub struct SqliteMessageRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteMessageRepository {
    /// データベースを開き（なければ作成し）、テーブルを用意する
    ///
    /// `path` に `:memory:` を渡すとインメモリ DB を使用する。
    /// ここでの失敗は起動時の致命的エラーとして扱われる。
    pub fn open(path: &str) -> Result<Self, RepositoryError> {
        let conn = if path == IN_MEMORY_PATH {
            Connection::open_in_memory().map_err(unavailable)?
        } else {
            if let Some(parent) = Path::new(path)
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
            {
                std::fs::create_dir_all(parent)
                    .map_err(|e| RepositoryError::Unavailable(e.to_string()))?;
            }
            let conn = Connection::open(path).map_err(unavailable)?;
            conn.pragma_update(None, "journal_mode", "WAL")
                .map_err(unavailable)?;
            conn
        };

        conn.execute_batch(CREATE_TABLE_SQL).map_err(unavailable)?;
        tracing::info!("Message store initialized at {}", path);

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 接続ロックを取得して同期処理をブロッキングスレッドで実行する
    async fn with_conn<T, F>(&self, f: F) -> Result<T, RepositoryError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, RepositoryError> + Send + 'static,
    {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| RepositoryError::Unavailable(e.to_string()))?;
            f(&conn)
        })
        .await
        .map_err(|e| RepositoryError::Unavailable(e.to_string()))?
    }
}

fn unavailable(e: rusqlite::Error) -> RepositoryError {
    RepositoryError::Unavailable(e.to_string())
}

fn query_failed(e: rusqlite::Error) -> RepositoryError {
    RepositoryError::Query(e.to_string())
}

#[async_trait]
impl MessageRepository for SqliteMessageRepository {
    async fn append(&self, message: &ChatMessage) -> Result<i64, RepositoryError> {
        let message = message.clone();
        self.with_conn(move |conn| {
            conn.execute(
                INSERT_SQL,
                params![message.username, message.content, message.timestamp],
            )
            .map_err(query_failed)?;
            Ok(conn.last_insert_rowid())
        })
        .await
    }

    async fn latest(&self, limit: usize) -> Result<Vec<ChatMessage>, RepositoryError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(SELECT_LATEST_SQL).map_err(query_failed)?;
            let rows = stmt
                .query_map(params![limit], |row| {
                    Ok(ChatMessage {
                        username: row.get(0)?,
                        content: row.get(1)?,
                        timestamp: row.get(2)?,
                    })
                })
                .map_err(query_failed)?;
            rows.collect::<Result<Vec<_>, _>>().map_err(query_failed)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - 追記と直近 N 件の取得
    // - ID の単調増加と、取得結果が ID の昇順であること
    // - ファイル DB を開き直しても内容が残ること
    // ========================================

    fn message(n: usize) -> ChatMessage {
        ChatMessage::new(format!("user{}", n % 3), format!("message {}", n), format!("t{}", n))
    }

    #[tokio::test]
    async fn test_append_assigns_monotonic_ids() {
        // テスト項目: 追記ごとに単調増加する ID が採番される
        // given (前提条件):
        let repository = SqliteMessageRepository::open(IN_MEMORY_PATH).unwrap();

        // when (操作):
        let first = repository.append(&message(1)).await.unwrap();
        let second = repository.append(&message(2)).await.unwrap();
        let third = repository.append(&message(3)).await.unwrap();

        // then (期待する結果):
        assert!(first < second && second < third);
    }

    #[tokio::test]
    async fn test_latest_on_empty_store() {
        // テスト項目: 空のストアからは空のリストが返される
        // given (前提条件):
        let repository = SqliteMessageRepository::open(IN_MEMORY_PATH).unwrap();

        // when (操作):
        let result = repository.latest(50).await.unwrap();

        // then (期待する結果):
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_latest_returns_most_recent_in_ascending_order() {
        // テスト項目: 直近 N 件が古い順に返される
        // given (前提条件):
        let repository = SqliteMessageRepository::open(IN_MEMORY_PATH).unwrap();
        for n in 1..=60 {
            repository.append(&message(n)).await.unwrap();
        }

        // when (操作):
        let result = repository.latest(50).await.unwrap();

        // then (期待する結果):
        assert_eq!(result.len(), 50);
        assert_eq!(result.first(), Some(&message(11)));
        assert_eq!(result.last(), Some(&message(60)));
        let expected: Vec<ChatMessage> = (11..=60).map(message).collect();
        assert_eq!(result, expected);
    }

    #[tokio::test]
    async fn test_history_order_ignores_client_timestamps() {
        // テスト項目: 履歴の順序はクライアントのタイムスタンプではなく到着順で決まる
        // given (前提条件):
        let repository = SqliteMessageRepository::open(IN_MEMORY_PATH).unwrap();
        let late = ChatMessage::new("a", "first arrival", "23:59");
        let early = ChatMessage::new("b", "second arrival", "00:01");
        repository.append(&late).await.unwrap();
        repository.append(&early).await.unwrap();

        // when (操作):
        let result = repository.latest(50).await.unwrap();

        // then (期待する結果):
        assert_eq!(result, vec![late, early]);
    }

    #[tokio::test]
    async fn test_messages_survive_reopen() {
        // テスト項目: ファイル DB を開き直しても保存済みメッセージが残る
        // given (前提条件):
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("realm.db");
        let path = path.to_str().unwrap().to_string();
        {
            let repository = SqliteMessageRepository::open(&path).unwrap();
            repository.append(&message(1)).await.unwrap();
            repository.append(&message(2)).await.unwrap();
        }

        // when (操作):
        let reopened = SqliteMessageRepository::open(&path).unwrap();
        let result = reopened.latest(50).await.unwrap();

        // then (期待する結果):
        assert_eq!(result, vec![message(1), message(2)]);
    }

    #[test]
    fn test_open_fails_for_unusable_path() {
        // テスト項目: 開けないパスを指定するとエラーになる
        // given (前提条件):
        let dir = tempfile::tempdir().unwrap();

        // when (操作): ディレクトリそのものを DB ファイルとして開く
        let result = SqliteMessageRepository::open(dir.path().to_str().unwrap());

        // then (期待する結果):
        assert!(matches!(result, Err(RepositoryError::Unavailable(_))));
    }
}
