use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

const FALLBACK_LOG_LEVEL: &str = "info";

/// 解析日志过滤规则，无法解析时退回 info
pub fn build_env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_new(log_level).unwrap_or_else(|e| {
        eprintln!("Invalid log level {log_level:?} ({e}), falling back to {FALLBACK_LOG_LEVEL}");
        EnvFilter::new(FALLBACK_LOG_LEVEL)
    })
}

/// 初始化全局日志订阅者
///
/// 开发环境输出带文件名与行号的文本日志，其余环境输出 JSON。
/// 返回的 guard 必须存活到进程结束，否则缓冲中的日志会丢失。
pub fn init_tracing(config: &AppConfig) -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
    let event_format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_ansi(true);

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(&config.app.log_level))
        .with_writer(writer)
        .event_format(event_format);

    if config.is_development() {
        subscriber.with_file(true).with_line_number(true).init();
    } else {
        subscriber.json().init();
    }

    guard
}
