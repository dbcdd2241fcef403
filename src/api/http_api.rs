use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::http::{HttpClient, HttpRequest, HttpResponse};

/// 发送 HTTP GET 请求，返回响应体第一行
pub fn http_get_string(url: &str) -> anyhow::Result<String> {
    HttpClient::new().get_as_string(url)
}

/// 发送 HTTP GET 请求，返回原始字节流
///
/// 调用方持有流并负责读取，drop 即关闭连接。
pub fn http_get_stream(url: &str) -> anyhow::Result<impl Read> {
    HttpClient::new().get_as_stream(url)
}

/// 下载到文件，返回文件句柄
pub fn http_get_file(url: &str, path: impl AsRef<Path>) -> anyhow::Result<File> {
    HttpClient::new().get_as_file(url, path)
}

/// 发送 HTTP POST 请求
pub fn http_post(request: HttpRequest) -> anyhow::Result<Option<HttpResponse>> {
    HttpClient::new().post(request)
}

/// 发送 HTTP POST 请求（直接传参）
pub fn http_post_bytes(
    url: &str,
    payload: Vec<u8>,
    headers: HashMap<String, String>,
    precompressed: bool,
) -> anyhow::Result<Option<HttpResponse>> {
    HttpClient::new().post(HttpRequest {
        url: url.to_string(),
        payload: Some(payload),
        headers,
        precompressed,
    })
}
