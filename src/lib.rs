pub mod api;
pub mod http;

use once_cell::sync::OnceCell;

/// 默认 User-Agent（未初始化时使用）
const DEFAULT_USER_AGENT: &str = concat!("stumbler-http/", env!("CARGO_PKG_VERSION"));

/// 全局 User-Agent
static USER_AGENT: OnceCell<String> = OnceCell::new();

/// 获取全局 User-Agent
pub fn get_user_agent() -> &'static str {
    USER_AGENT
        .get()
        .map(|ua| ua.as_str())
        .unwrap_or(DEFAULT_USER_AGENT)
}

/// 应用是否已初始化
pub fn is_initialized() -> bool {
    USER_AGENT.get().is_some()
}

/// 初始化应用
///
/// 初始化日志并设置全局 User-Agent。只能调用一次。
pub fn init_application(user_agent: Option<String>) -> anyhow::Result<()> {
    // 初始化日志（只初始化一次）
    let _ = tracing_subscriber::fmt()
        .with_env_filter("info")
        .try_init();

    if let Some(ua) = user_agent {
        USER_AGENT
            .set(ua)
            .map_err(|_| anyhow::anyhow!("User agent already set"))?;
    }

    tracing::info!("Application initialized, user agent: {}", get_user_agent());

    Ok(())
}
