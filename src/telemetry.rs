//! 日志与追踪系统
//! 初始化结构化日志

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LoggingConfig;

/// 初始化日志系统
///
/// RUST_LOG 环境变量优先于配置中的级别。
pub fn init_telemetry(config: &LoggingConfig) {
    // 从环境变量构建过滤器
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    // 根据配置选择日志格式
    let log_layer = match config.format.to_lowercase().as_str() {
        "json" => {
            // JSON 格式（生产环境）
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(false)
                .with_current_span(true)
                .boxed()
        }
        "pretty" => {
            // 美化格式（开发环境）
            tracing_subscriber::fmt::layer()
                .pretty()
                .with_target(false)
                .boxed()
        }
        _ => tracing_subscriber::fmt::layer().with_target(false).boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(log_layer)
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        level = %config.level,
        format = %config.format,
        "Telemetry initialized"
    );
}
