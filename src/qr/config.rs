//! # 配置模块
//!
//! ## 设计思路
//!
//! 所有可调策略集中在 `QrConfig`：本地渲染尺寸、纠错等级、边距、远程渲染服务地址等。
//! `Default` 即为线上行为（中等纠错、1 模块边距、PNG、512 像素方图、Google Chart 兜底）。
//!
//! ## 实现思路
//!
//! - `Default` 提供生产可用配置，设置文件中缺省的字段回落到默认值。
//! - `ErrorCorrection` 负责纠错等级字符串解析与反向输出。
//! - `validate` 在构建规范化器前做范围校验，避免运行中才暴露问题。

use serde::{Deserialize, Serialize};

use super::QrError;

/// 远程二维码渲染服务的默认地址。
pub const DEFAULT_REMOTE_ENDPOINT: &str = "https://chart.googleapis.com/chart";

/// 二维码规范化配置。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QrConfig {
    /// 是否尝试把 URL 载荷在本地渲染为二维码图片。
    ///
    /// 关闭后 URL 载荷直接走远程渲染。
    pub local_render_enabled: bool,
    /// 本地渲染输出的方图边长（像素）。
    pub local_render_width: u32,
    /// 本地渲染的纠错等级。
    pub error_correction: ErrorCorrection,
    /// 二维码四周留白（模块数）。
    pub margin_modules: u32,
    /// 远程渲染服务地址（不含查询参数）。
    pub remote_endpoint: String,
    /// 远程渲染请求的方图边长（像素）。
    pub remote_render_size: u32,
    /// 是否对 Base64 载荷做解码 + 图片签名校验。
    ///
    /// 默认关闭：仅做字符集层面的语法校验。
    pub verify_base64_image: bool,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            local_render_enabled: true,
            local_render_width: 512,
            error_correction: ErrorCorrection::Medium,
            margin_modules: 1,
            remote_endpoint: DEFAULT_REMOTE_ENDPOINT.to_string(),
            remote_render_size: 512,
            verify_base64_image: false,
        }
    }
}

impl QrConfig {
    /// 校验配置取值范围。
    pub fn validate(&self) -> Result<(), QrError> {
        if !(64..=4096).contains(&self.local_render_width) {
            return Err(QrError::InvalidConfig(
                "localRenderWidth 必须在 64~4096 像素之间".to_string(),
            ));
        }
        if self.margin_modules > 16 {
            return Err(QrError::InvalidConfig("marginModules 不能大于 16".to_string()));
        }
        if !(64..=1000).contains(&self.remote_render_size) {
            return Err(QrError::InvalidConfig(
                "remoteRenderSize 必须在 64~1000 像素之间".to_string(),
            ));
        }

        let endpoint = reqwest::Url::parse(&self.remote_endpoint)
            .map_err(|e| QrError::InvalidConfig(format!("remoteEndpoint 无法解析：{}", e)))?;
        if endpoint.scheme() != "https" {
            return Err(QrError::InvalidConfig(
                "remoteEndpoint 必须使用 https 协议".to_string(),
            ));
        }
        if endpoint.query().is_some() || endpoint.fragment().is_some() {
            return Err(QrError::InvalidConfig(
                "remoteEndpoint 不能携带查询参数或片段".to_string(),
            ));
        }

        Ok(())
    }
}

/// 二维码纠错等级。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCorrection {
    Low,
    Medium,
    Quartile,
    High,
}

impl ErrorCorrection {
    /// 从外部字符串解析纠错等级，兼容 `L/M/Q/H` 简写。
    ///
    /// # 示例
    /// ```rust
    /// use gateway_qr::qr::ErrorCorrection;
    ///
    /// let level = ErrorCorrection::from_str("m")?;
    /// assert_eq!(level.as_str(), "medium");
    /// # Ok::<(), gateway_qr::qr::QrError>(())
    /// ```
    pub fn from_str(level: &str) -> Result<Self, QrError> {
        match level.trim().to_lowercase().as_str() {
            "low" | "l" => Ok(Self::Low),
            "medium" | "m" => Ok(Self::Medium),
            "quartile" | "q" => Ok(Self::Quartile),
            "high" | "h" => Ok(Self::High),
            other => Err(QrError::InvalidConfig(format!(
                "未知纠错等级：{}（可选：low / medium / quartile / high）",
                other
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::Quartile => "quartile",
            Self::High => "high",
        }
    }

    pub(crate) fn to_qrcodegen(self) -> qrcodegen::QrCodeEcc {
        match self {
            Self::Low => qrcodegen::QrCodeEcc::Low,
            Self::Medium => qrcodegen::QrCodeEcc::Medium,
            Self::Quartile => qrcodegen::QrCodeEcc::Quartile,
            Self::High => qrcodegen::QrCodeEcc::High,
        }
    }
}
