use reqwest::blocking::ClientBuilder;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_ENCODING, CONTENT_TYPE, USER_AGENT};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::http::proxy::ProxyManager;
use crate::http::zipper;

/// HTTP POST 请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpRequest {
    pub url: String,
    #[serde(default)]
    pub payload: Option<Vec<u8>>,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub precompressed: bool,
}

/// HTTP 响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
    pub bytes_sent: usize,
}

impl HttpResponse {
    /// 状态码是否为 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP 客户端
///
/// 每次请求构建新的连接，客户端自身只持有 User-Agent。
pub struct HttpClient {
    user_agent: String,
}

impl HttpClient {
    /// 使用全局 User-Agent 创建客户端
    pub fn new() -> Self {
        Self {
            user_agent: crate::get_user_agent().to_string(),
        }
    }

    /// 使用指定 User-Agent 创建客户端
    pub fn with_user_agent(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
        }
    }

    // 走代理的构建器，未配置代理时直连
    fn proxied_builder(&self) -> ClientBuilder {
        let builder = reqwest::blocking::Client::builder().user_agent(self.user_agent.as_str());
        ProxyManager::instance().apply(builder)
    }

    // 直连构建器，不经过任何代理
    fn direct_builder(&self) -> ClientBuilder {
        reqwest::blocking::Client::builder()
            .user_agent(self.user_agent.as_str())
            .no_proxy()
    }

    /// GET 请求，返回响应体的第一行（不含行结束符）
    pub fn get_as_string(&self, url: &str) -> anyhow::Result<String> {
        let client = self.proxied_builder().build()?;
        let response = client.get(url).send()?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!("GET failed with status: {}", response.status()));
        }

        let text = response.text()?;
        Ok(text.lines().next().unwrap_or_default().to_string())
    }

    /// GET 请求，返回原始字节流（直连）
    ///
    /// 调用方持有流并负责读取，drop 即关闭连接。
    pub fn get_as_stream(&self, url: &str) -> anyhow::Result<impl Read> {
        let client = self.direct_builder().build()?;
        let response = client.get(url).send()?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!("GET failed with status: {}", response.status()));
        }

        Ok(response)
    }

    /// GET 请求并把响应体写入目标文件，返回文件句柄
    ///
    /// 失败时可能留下不完整的文件，不做清理。
    pub fn get_as_file(&self, url: &str, path: impl AsRef<Path>) -> anyhow::Result<File> {
        let client = self.proxied_builder().build()?;
        let mut response = client.get(url).send()?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!("GET failed with status: {}", response.status()));
        }

        let mut file = File::create(path.as_ref())?;
        io::copy(&mut response, &mut file)?;
        Ok(file)
    }

    /// POST 请求（直连）
    ///
    /// `precompressed` 为 false 时先对 payload 做 gzip 压缩，
    /// 压缩失败则记录警告并回退为发送原始数据（此时不带 gzip 头）。
    /// URL 非法或缺少 payload 返回 Err 且不发起网络请求；
    /// 连接、写入或读取响应失败时记录日志并返回 Ok(None)。
    pub fn post(&self, request: HttpRequest) -> anyhow::Result<Option<HttpResponse>> {
        let url = Url::parse(&request.url)
            .map_err(|e| anyhow::anyhow!("Invalid URL {}: {}", request.url, e))?;
        let payload = request
            .payload
            .ok_or_else(|| anyhow::anyhow!("Missing POST payload"))?;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_str(&self.user_agent)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let wire_data = if request.precompressed {
            headers.insert(CONTENT_ENCODING, HeaderValue::from_static("gzip"));
            payload
        } else {
            match zipper::zip_data(&payload) {
                Ok(zipped) => {
                    headers.insert(CONTENT_ENCODING, HeaderValue::from_static("gzip"));
                    zipped
                }
                Err(e) => {
                    tracing::warn!("压缩失败，回退为发送原始数据: {}", e);
                    payload
                }
            }
        };

        // 调用方自定义 header 在内置 header 之后写入，键冲突时覆盖内置值
        for (key, value) in &request.headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| anyhow::anyhow!("Invalid header name {}: {}", key, e))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| anyhow::anyhow!("Invalid header value for {}: {}", key, e))?;
            headers.insert(name, value);
        }

        let client = match self.direct_builder().build() {
            Ok(client) => client,
            Err(e) => {
                tracing::error!("无法打开连接: {}", e);
                return Ok(None);
            }
        };

        // 请求体按精确字节长度发送（非分块）
        let bytes_sent = wire_data.len();
        let response = match client.post(url).headers(headers).body(wire_data).send() {
            Ok(response) => response,
            Err(e) => {
                tracing::info!("POST 请求失败: {}", e);
                return Ok(None);
            }
        };

        let status = response.status().as_u16();
        // 响应体逐行读取后拼接，不保留行结束符
        let body = match response.text() {
            Ok(text) => text.lines().collect::<String>(),
            Err(e) => {
                tracing::info!("读取响应失败: {}", e);
                return Ok(None);
            }
        };

        Ok(Some(HttpResponse {
            status,
            body,
            bytes_sent,
        }))
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}
