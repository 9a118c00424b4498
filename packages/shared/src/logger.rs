//! Logging setup utilities for the Realm binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// This function sets up logging for the shared crate, the binary crate and
/// `tower_http` request traces. The log level can be overridden using the
/// `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "realm-server", "realm-client")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use realm_shared::logger::setup_logger;
///
/// setup_logger("realm-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the fallback filter directive used when `RUST_LOG` is not set.
///
/// Binary names use hyphens while tracing targets use the crate name, so
/// hyphens are replaced with underscores.
fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    format!(
        "{}={},{}={},tower_http={}",
        env!("CARGO_PKG_NAME").replace('-', "_"),
        default_log_level,
        binary_name.replace('-', "_"),
        default_log_level,
        default_log_level
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_uses_crate_targets() {
        // テスト項目: バイナリ名のハイフンがアンダースコアに変換される
        // given (前提条件):
        let binary_name = "realm-server";

        // when (操作):
        let filter = default_filter(binary_name, "debug");

        // then (期待する結果):
        assert_eq!(
            filter,
            "realm_shared=debug,realm_server=debug,tower_http=debug"
        );
    }

    #[test]
    fn test_default_filter_is_parseable() {
        // テスト項目: 生成したフィルタが EnvFilter として解釈できる
        // given (前提条件):
        let filter = default_filter("realm-client", "info");

        // when (操作):
        let parsed = tracing_subscriber::EnvFilter::try_new(&filter);

        // then (期待する結果):
        assert!(parsed.is_ok());
    }
}
