use crate::http::proxy::ProxyManager;

/// 设置代理
///
/// # 参数
/// - `url`: 代理 URL，支持 http:// 和 socks5:// 协议。如果为空字符串或 None，则清除代理。
pub fn set_proxy(url: Option<String>) -> anyhow::Result<()> {
    let proxy_url = url
        .as_ref()
        .map(|s| s.trim())
        .and_then(|s| if s.is_empty() { None } else { Some(s.to_string()) });

    ProxyManager::instance().set_proxy(proxy_url.clone())?;

    tracing::info!("代理设置已保存: {:?}", proxy_url);
    Ok(())
}

/// 获取当前代理设置
pub fn get_proxy() -> Option<String> {
    ProxyManager::instance().get_proxy().map(|config| config.url)
}

/// 清除代理设置
pub fn clear_proxy() -> anyhow::Result<()> {
    ProxyManager::instance().clear_proxy()?;
    tracing::info!("代理设置已清除");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // 注意：这里只做不写入有效代理的用例，避免影响
    // 同进程内其他测试的全局代理配置

    #[test]
    fn test_set_proxy_empty_clears() {
        set_proxy(Some("   ".to_string())).unwrap();
        assert!(get_proxy().is_none());

        set_proxy(None).unwrap();
        assert!(get_proxy().is_none());
    }

    #[test]
    fn test_set_proxy_invalid_scheme() {
        assert!(set_proxy(Some("ftp://127.0.0.1:8080".to_string())).is_err());
        assert!(get_proxy().is_none());
    }

    #[test]
    fn test_clear_proxy() {
        clear_proxy().unwrap();
        assert!(get_proxy().is_none());
    }
}
