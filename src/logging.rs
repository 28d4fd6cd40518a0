//! tracing の初期化

use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "report_schema_compare=info,report_compare_common=info";
const VERBOSE_LOG_FILTER: &str = "report_schema_compare=debug,report_compare_common=debug";

/// stderr へのログ出力を初期化（RUST_LOG があればそれを優先）
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { VERBOSE_LOG_FILTER } else { DEFAULT_LOG_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // 二重初期化（テストなど）は無視する
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
