/// 初始化应用
///
/// 在使用 HTTP 客户端前调用，可传入全局 User-Agent
pub fn init_application(user_agent: Option<String>) -> anyhow::Result<()> {
    crate::init_application(user_agent)
}

/// 获取应用是否已初始化
pub fn is_initialized() -> bool {
    crate::is_initialized()
}

/// 获取当前 User-Agent
pub fn get_user_agent() -> String {
    crate::get_user_agent().to_string()
}
