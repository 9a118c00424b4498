//! MessageRepository の実装
//!
//! - `sqlite`: SQLite を使った永続化（本番用）
//! - `inmemory`: Vec を使ったインメモリ実装（テスト用）

pub mod inmemory;
pub mod sqlite;

pub use inmemory::InMemoryMessageRepository;
pub use sqlite::SqliteMessageRepository;
