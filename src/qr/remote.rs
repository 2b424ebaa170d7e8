//! # 远程渲染兜底
//!
//! 仅做 URL 模板拼接，不发起网络请求，因此不存在失败路径。
//! 载荷按 `application/x-www-form-urlencoded` 规则编码进 `chl` 参数。

use once_cell::sync::Lazy;

use super::config::DEFAULT_REMOTE_ENDPOINT;

/// 预解析的默认远程渲染端点。
pub(crate) static DEFAULT_ENDPOINT_URL: Lazy<reqwest::Url> =
    Lazy::new(|| reqwest::Url::parse(DEFAULT_REMOTE_ENDPOINT).unwrap());

/// 远程渲染 URL 构造器。
///
/// 端点在构造时解析一次，之后的拼接不会失败。
#[derive(Debug, Clone)]
pub struct RemoteRenderer {
    endpoint: reqwest::Url,
    size: u32,
}

impl RemoteRenderer {
    pub fn new(endpoint: reqwest::Url, size: u32) -> Self {
        Self { endpoint, size }
    }

    /// 生成远程渲染地址：`<endpoint>?cht=qr&chs=<size>x<size>&chl=<payload>`。
    pub fn render_url(&self, payload: &str) -> String {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("cht", "qr")
            .append_pair("chs", &format!("{0}x{0}", self.size))
            .append_pair("chl", payload);
        url.into()
    }
}
