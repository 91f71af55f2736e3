//! 日志工具模块

use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化全局日志订阅器
///
/// 默认 info 级别，可用 RUST_LOG 覆盖；重复调用安全（测试场景）。
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(provider: &str) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 题库答案解析启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("📚 题库 provider: {}", provider);
    info!("{}", "=".repeat(60));
}
