//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `QrNormalizer` 把任意编码的网关载荷统一转换为浏览器可直接展示的图片地址，
//! 对调用方没有失败路径：最坏情况返回远程渲染地址。处理链路固定为：
//! 1. 分类（`classify_payload`）
//! 2. 按编码标签分派
//! 3. URL 分支走“本地渲染 → 失败替换为远程渲染”的两步流水线
//!
//! ## 实现思路
//!
//! - 本地渲染是 CPU 密集任务，放到 `spawn_blocking` 中执行并等待结果。
//! - URL 分支的结果显式建模为 `RenderOutcome`，兜底路径可以被单独断言。
//! - 规范化器本身不持有跨调用的可变状态，并发调用互不影响。

use base64::{Engine as _, engine::general_purpose};
use serde_json::Value;

use super::classify::{ClassifiedPayload, PayloadEncoding, classify_payload};
use super::extract::extract_payload;
use super::remote::{DEFAULT_ENDPOINT_URL, RemoteRenderer};
use super::render::render_url_to_data_uri;
use super::{QrConfig, QrError};

/// URL 分支的处理结果。
#[derive(Debug)]
pub enum RenderOutcome {
    /// 本地渲染成功，值为 `data:image/png;base64,...`。
    Local(String),
    /// 本地渲染失败，已替换为远程渲染地址。
    Fallback { url: String, reason: QrError },
}

impl RenderOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    /// 取出可展示的图片地址。
    pub fn into_image_source(self) -> String {
        match self {
            Self::Local(uri) => uri,
            Self::Fallback { url, .. } => url,
        }
    }
}

/// 二维码载荷规范化器。
#[derive(Debug, Clone)]
pub struct QrNormalizer {
    config: QrConfig,
    remote: RemoteRenderer,
}

impl QrNormalizer {
    /// 校验配置并创建规范化器。
    ///
    /// # 示例
    /// ```rust
    /// use gateway_qr::qr::{QrConfig, QrNormalizer};
    ///
    /// let normalizer = QrNormalizer::new(QrConfig::default())?;
    /// assert!(normalizer.config().local_render_enabled);
    /// # Ok::<(), gateway_qr::qr::QrError>(())
    /// ```
    pub fn new(config: QrConfig) -> Result<Self, QrError> {
        config.validate()?;
        let endpoint = reqwest::Url::parse(&config.remote_endpoint)
            .map_err(|e| QrError::InvalidConfig(format!("remoteEndpoint 无法解析：{}", e)))?;
        let remote = RemoteRenderer::new(endpoint, config.remote_render_size);

        Ok(Self { config, remote })
    }

    pub fn config(&self) -> &QrConfig {
        &self.config
    }

    /// 规范化入口：原始载荷 → 可展示的图片地址。
    ///
    /// 载荷缺失或为空白时返回空串；其余情况总是返回非空字符串。
    ///
    /// # 示例
    /// ```rust
    /// use gateway_qr::qr::QrNormalizer;
    ///
    /// # async fn demo() {
    /// let normalizer = QrNormalizer::default();
    /// let source = normalizer.normalize(Some("  SGVsbG8=  ")).await;
    /// assert_eq!(source, "data:image/png;base64,SGVsbG8=");
    /// # }
    /// ```
    pub async fn normalize(&self, raw: Option<&str>) -> String {
        let Some(classified) = raw.and_then(classify_payload) else {
            log::debug!("二维码载荷为空，跳过渲染");
            return String::new();
        };

        log::debug!("二维码载荷分类：{}", classified.encoding.as_str());
        self.render_classified(classified).await
    }

    /// 从网关响应中提取载荷并规范化。
    pub async fn normalize_response(&self, response: Option<&Value>) -> String {
        let payload = extract_payload(response);
        self.normalize(Some(&payload)).await
    }

    async fn render_classified(&self, classified: ClassifiedPayload) -> String {
        let ClassifiedPayload {
            encoding,
            value,
            trimmed,
        } = classified;
        match encoding {
            PayloadEncoding::DataUri => value,
            PayloadEncoding::HttpUrl => self.render_url(&value).await.into_image_source(),
            PayloadEncoding::Base64 => self.render_base64(value, &trimmed),
            PayloadEncoding::Opaque => self.remote.render_url(&value),
        }
    }

    /// URL 分支：先尝试本地渲染，失败时替换为远程渲染地址。
    pub async fn render_url(&self, url: &str) -> RenderOutcome {
        match self.attempt_local_render(url).await {
            Ok(uri) => RenderOutcome::Local(uri),
            Err(reason) => {
                log::warn!("本地二维码渲染失败，改用远程渲染：{}", reason);
                RenderOutcome::Fallback {
                    url: self.remote.render_url(url),
                    reason,
                }
            }
        }
    }

    async fn attempt_local_render(&self, url: &str) -> Result<String, QrError> {
        if !self.config.local_render_enabled {
            return Err(QrError::Disabled);
        }

        let config = self.config.clone();
        let url = url.to_string();
        tokio::task::spawn_blocking(move || render_url_to_data_uri(&url, &config))
            .await
            .map_err(|e| QrError::Worker(e.to_string()))?
    }

    /// Base64 分支：默认只包装为 PNG Data URI。
    ///
    /// 开启 `verify_base64_image` 后会解码并校验图片签名，
    /// 校验不通过的载荷按不透明载荷处理（远程渲染去除首尾空白后的原始载荷）。
    fn render_base64(&self, compact: String, trimmed: &str) -> String {
        if !self.config.verify_base64_image {
            return format!("data:image/png;base64,{}", compact);
        }

        match sniff_image_mime(&compact) {
            Some(mime) => format!("data:{};base64,{}", mime, compact),
            None => {
                log::warn!("Base64 载荷不是可识别的图片，改用远程渲染");
                self.remote.render_url(trimmed)
            }
        }
    }
}

impl Default for QrNormalizer {
    fn default() -> Self {
        let config = QrConfig::default();
        let remote = RemoteRenderer::new(DEFAULT_ENDPOINT_URL.clone(), config.remote_render_size);
        Self { config, remote }
    }
}

/// 解码 Base64 并通过文件签名（magic bytes）识别图片 MIME 类型。
fn sniff_image_mime(compact: &str) -> Option<&'static str> {
    let bytes = general_purpose::STANDARD.decode(compact).ok()?;
    let kind = infer::get(&bytes)?;
    (kind.matcher_type() == infer::MatcherType::Image).then(|| kind.mime_type())
}

/// 使用默认配置规范化载荷。
pub async fn normalize_qr_payload(raw: Option<&str>) -> String {
    QrNormalizer::default().normalize(raw).await
}
