pub mod client;
pub mod proxy;
pub mod zipper;

pub use client::{HttpClient, HttpRequest, HttpResponse};
pub use proxy::{ProxyConfig, ProxyManager};
