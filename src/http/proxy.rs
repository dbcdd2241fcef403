use once_cell::sync::Lazy;
use reqwest::blocking::ClientBuilder;
use reqwest::Proxy as ReqwestProxy;
use std::sync::RwLock;

/// 代理配置
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyConfig {
    pub url: String,
}

impl ProxyConfig {
    /// 从字符串创建代理配置
    /// 支持 http:// 和 socks5:// 协议
    pub fn from_str(url: &str) -> anyhow::Result<Self> {
        let url = url.trim();
        if url.is_empty() {
            return Err(anyhow::anyhow!("代理 URL 不能为空"));
        }

        if !url.starts_with("http://") && !url.starts_with("socks5://") {
            return Err(anyhow::anyhow!("代理 URL 必须以 http:// 或 socks5:// 开头"));
        }

        Ok(Self {
            url: url.to_string(),
        })
    }

    /// 转换为 reqwest::Proxy
    pub fn to_reqwest_proxy(&self) -> anyhow::Result<ReqwestProxy> {
        ReqwestProxy::all(&self.url)
            .map_err(|e| anyhow::anyhow!("创建代理失败: {}", e))
    }
}

/// 代理管理器（单例模式）
///
/// 保存进程级的代理覆盖配置。未设置覆盖时，客户端沿用
/// 系统环境变量中的代理配置（reqwest 的默认解析行为）。
pub struct ProxyManager {
    config: RwLock<Option<ProxyConfig>>,
}

impl ProxyManager {
    fn new() -> Self {
        Self {
            config: RwLock::new(None),
        }
    }

    /// 获取全局代理管理器实例
    pub fn instance() -> &'static ProxyManager {
        static INSTANCE: Lazy<ProxyManager> = Lazy::new(ProxyManager::new);
        &INSTANCE
    }

    /// 设置代理覆盖
    pub fn set_proxy(&self, url: Option<String>) -> anyhow::Result<()> {
        let mut config = self.config.write()
            .map_err(|e| anyhow::anyhow!("获取代理配置锁失败: {}", e))?;

        *config = match url {
            Some(url) if !url.trim().is_empty() => {
                Some(ProxyConfig::from_str(&url)?)
            }
            _ => None,
        };

        tracing::info!("代理设置已更新: {:?}", config);
        Ok(())
    }

    /// 获取当前代理覆盖
    pub fn get_proxy(&self) -> Option<ProxyConfig> {
        let config = self.config.read().ok()?;
        config.clone()
    }

    /// 清除代理覆盖
    pub fn clear_proxy(&self) -> anyhow::Result<()> {
        self.set_proxy(None)
    }

    /// 将代理覆盖应用到客户端构建器
    ///
    /// 未设置覆盖时原样返回，保持系统代理解析；覆盖无效时
    /// 记录警告并退回直连。
    pub fn apply(&self, builder: ClientBuilder) -> ClientBuilder {
        match self.get_proxy().map(|config| config.to_reqwest_proxy()) {
            Some(Ok(proxy)) => builder.proxy(proxy),
            Some(Err(e)) => {
                tracing::warn!("配置代理失败，将不使用代理: {}", e);
                builder
            }
            None => builder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::blocking::Client;

    #[test]
    fn test_proxy_config_from_str() {
        // 测试 HTTP 代理
        let config = ProxyConfig::from_str("http://127.0.0.1:8080").unwrap();
        assert_eq!(config.url, "http://127.0.0.1:8080");

        // 测试 SOCKS5 代理
        let config = ProxyConfig::from_str("socks5://127.0.0.1:1080").unwrap();
        assert_eq!(config.url, "socks5://127.0.0.1:1080");

        // 测试无效协议
        assert!(ProxyConfig::from_str("ftp://127.0.0.1:8080").is_err());

        // 测试空字符串
        assert!(ProxyConfig::from_str("").is_err());
    }

    #[test]
    fn test_proxy_manager_set_and_clear() {
        // 使用局部实例，避免污染全局配置
        let manager = ProxyManager::new();

        manager.set_proxy(Some("http://127.0.0.1:8080".to_string())).unwrap();
        assert_eq!(manager.get_proxy().unwrap().url, "http://127.0.0.1:8080");

        // 空白字符串等同于清除
        manager.set_proxy(Some("   ".to_string())).unwrap();
        assert!(manager.get_proxy().is_none());

        manager.set_proxy(Some("socks5://127.0.0.1:1080".to_string())).unwrap();
        manager.clear_proxy().unwrap();
        assert!(manager.get_proxy().is_none());

        // 无效配置不生效
        assert!(manager.set_proxy(Some("ftp://127.0.0.1:8080".to_string())).is_err());
    }

    #[test]
    fn test_proxy_manager_apply() {
        let manager = ProxyManager::new();
        manager.set_proxy(Some("http://127.0.0.1:8080".to_string())).unwrap();

        // 应用覆盖后的构建器仍可构建客户端
        let builder = manager.apply(Client::builder());
        assert!(builder.build().is_ok());
    }

    #[test]
    fn test_proxy_manager_instance() {
        assert!(std::ptr::eq(ProxyManager::instance(), ProxyManager::instance()));
    }
}
