//! # 消息网关客户端
//!
//! ## 设计思路
//!
//! 设备关联时前端需要向 WhatsApp 网关请求二维码。网关返回的 JSON 结构不固定，
//! 这里只负责“取回响应”，提取与规范化交给 [`crate::qr`]。
//!
//! ## 实现思路
//!
//! - 复用单个 `reqwest::Client`，设置连接超时与总超时。
//! - 请求路径由模板 `qr_path` 生成，`{instance}` 会被替换为实例名。
//! - 非 2xx 状态与非 JSON 响应都映射为 `GatewayError`。
//! - 日志中的 URL 会去掉查询参数与片段，避免泄露令牌。
//!
//! 与规范化器不同，这里的失败会返回给调用方：取不到响应是真实的错误。

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::qr::QrNormalizer;

/// 网关错误类型。
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("网关网络错误：{0}")]
    Network(String),

    #[error("网关请求超时（{0}秒）")]
    Timeout(u64),

    #[error("网关返回异常状态：{status} {message}")]
    Status { status: u16, message: String },

    #[error("网关响应无效：{0}")]
    InvalidResponse(String),

    #[error("网关配置无效：{0}")]
    Config(String),
}

/// 网关连接配置。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GatewayConfig {
    /// 网关根地址，例如 `https://gateway.example.com`。
    pub base_url: String,
    /// 二维码接口路径模板，`{instance}` 为实例名占位符。
    pub qr_path: String,
    /// 实例名。
    pub instance: String,
    /// 通过 `apikey` 请求头发送的密钥。
    pub api_key: Option<String>,
    /// 请求总超时（秒）。
    pub request_timeout: u64,
    /// 建立连接超时（秒）。
    pub connect_timeout: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            qr_path: "/instance/connect/{instance}".to_string(),
            instance: String::new(),
            api_key: None,
            request_timeout: 20,
            connect_timeout: 8,
        }
    }
}

impl GatewayConfig {
    /// 生成二维码接口的完整地址。
    pub fn qr_endpoint(&self) -> Result<reqwest::Url, GatewayError> {
        if self.instance.trim().is_empty() && self.qr_path.contains("{instance}") {
            return Err(GatewayError::Config("instance 不能为空".to_string()));
        }
        if !(1..=300).contains(&self.request_timeout) {
            return Err(GatewayError::Config("requestTimeout 必须在 1~300 秒之间".to_string()));
        }
        if !(1..=120).contains(&self.connect_timeout) {
            return Err(GatewayError::Config("connectTimeout 必须在 1~120 秒之间".to_string()));
        }

        let base = reqwest::Url::parse(&self.base_url)
            .map_err(|e| GatewayError::Config(format!("baseUrl 无法解析：{}", e)))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(GatewayError::Config(format!("baseUrl 协议不受支持：{}", base.scheme())));
        }

        let instance = self.instance.trim();
        let mut endpoint = base;
        endpoint
            .path_segments_mut()
            .map_err(|_| GatewayError::Config("baseUrl 不能作为根地址".to_string()))?
            .pop_if_empty()
            .extend(
                self.qr_path
                    .split('/')
                    .filter(|seg| !seg.is_empty())
                    .map(|seg| seg.replace("{instance}", instance)),
            );

        Ok(endpoint)
    }
}

/// 网关客户端。
pub struct GatewayClient {
    config: GatewayConfig,
    endpoint: reqwest::Url,
    client: reqwest::Client,
}

impl GatewayClient {
    /// 校验配置并构建复用型 HTTP 客户端。
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let endpoint = config.qr_endpoint()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .build()
            .map_err(|e| GatewayError::Network(format!("无法创建 HTTP 客户端：{}", e)))?;

        Ok(Self {
            config,
            endpoint,
            client,
        })
    }

    pub fn endpoint(&self) -> &reqwest::Url {
        &self.endpoint
    }

    /// 请求网关二维码接口并返回 JSON 响应。
    pub async fn fetch_qr_response(&self) -> Result<Value, GatewayError> {
        log::info!("📡 请求网关二维码 - URL: {}", redact_url_for_log(self.endpoint.as_str()));

        let mut request = self
            .client
            .get(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(key) = self.config.api_key.as_deref() {
            request = request.header("apikey", key);
        }

        let response = request.send().await.map_err(|e| self.map_reqwest_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.bytes().await.map_err(|e| self.map_reqwest_error(e))?;
        serde_json::from_slice(&body)
            .map_err(|e| GatewayError::InvalidResponse(format!("JSON 解析失败：{}", e)))
    }

    /// 请求网关并规范化为可展示的图片地址。
    ///
    /// 返回空串表示网关暂未提供二维码。
    pub async fn fetch_qr_image(&self, normalizer: &QrNormalizer) -> Result<String, GatewayError> {
        let response = self.fetch_qr_response().await?;
        let source = normalizer.normalize_response(Some(&response)).await;
        if source.is_empty() {
            log::info!("网关响应中没有二维码载荷");
        }
        Ok(source)
    }

    /// 统一映射 reqwest 错误，并脱敏错误消息中的 URL。
    fn map_reqwest_error(&self, e: reqwest::Error) -> GatewayError {
        if e.is_timeout() {
            return GatewayError::Timeout(self.config.request_timeout);
        }

        let raw = self.endpoint.as_str();
        let msg = e.to_string().replace(raw, &redact_url_for_log(raw));
        if e.is_connect() {
            GatewayError::Network(format!("无法连接：{}", msg))
        } else {
            GatewayError::Network(format!("请求失败：{}", msg))
        }
    }
}

/// 去掉 URL 中的查询参数、片段与用户信息。
pub(crate) fn redact_url_for_log(url: &str) -> String {
    let Ok(parsed) = reqwest::Url::parse(url) else {
        return "<invalid-url>".to_string();
    };

    let host = parsed.host_str().unwrap_or("<unknown-host>");
    let port = parsed.port().map(|p| format!(":{}", p)).unwrap_or_default();

    format!("{}://{}{}{}", parsed.scheme(), host, port, parsed.path())
}
