//! # 载荷分类模块
//!
//! ## 设计思路
//!
//! 网关下发的“扫码关联设备”载荷编码方式不统一。分类与处理拆成两步：
//! 先打上互斥的编码标签（`PayloadEncoding`），再由规范化器按标签分派处理，
//! 每个分支的约定都可以单独测试。
//!
//! ## 实现思路
//!
//! 判定顺序固定（先匹配先得）：Data URI → HTTP(S) URL → Base64 → 不透明载荷。
//! Base64 只做字符集语法校验，判定前会去掉所有空白字符。

use once_cell::sync::Lazy;
use regex::Regex;

/// Data URI 图片前缀。
pub const DATA_IMAGE_PREFIX: &str = "data:image";

/// 预编译的 Base64 字符集校验（RFC 4648 标准字母表，0~2 个 `=` 填充，整串锚定）。
///
/// 字母表显式写出大小写，避免 Unicode 大小写折叠把 `ſ`、`K` 等字符匹配进来。
static BASE64_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9+/]+={0,2}$").unwrap());

/// 载荷编码类型，互斥。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadEncoding {
    /// 已是可直接展示的 `data:image...`。
    DataUri,
    /// `http://` 或 `https://` 链接。
    HttpUrl,
    /// 语法合法的 Base64 串。
    Base64,
    /// 其他内容（配对码、私有令牌等）。
    Opaque,
}

impl PayloadEncoding {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DataUri => "data-uri",
            Self::HttpUrl => "http-url",
            Self::Base64 => "base64",
            Self::Opaque => "opaque",
        }
    }
}

/// 分类结果：编码标签 + 该分支使用的载荷值。
///
/// - `value`：`DataUri` / `HttpUrl` / `Opaque` 为去除首尾空白后的载荷，
///   `Base64` 为去除全部空白后的载荷
/// - `trimmed`：始终是去除首尾空白后的载荷，供远程渲染兜底使用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedPayload {
    pub encoding: PayloadEncoding,
    pub value: String,
    pub trimmed: String,
}

/// 对原始载荷分类。
///
/// 空串或仅含空白时返回 `None`（调用方视为“暂无二维码”）。
///
/// # 示例
/// ```rust
/// use gateway_qr::qr::{classify_payload, PayloadEncoding};
///
/// let classified = classify_payload("  SGVsbG8=  ").unwrap();
/// assert_eq!(classified.encoding, PayloadEncoding::Base64);
/// assert_eq!(classified.value, "SGVsbG8=");
/// ```
pub fn classify_payload(raw: &str) -> Option<ClassifiedPayload> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.starts_with(DATA_IMAGE_PREFIX) {
        return Some(ClassifiedPayload {
            encoding: PayloadEncoding::DataUri,
            value: trimmed.to_string(),
            trimmed: trimmed.to_string(),
        });
    }

    if is_http_url(trimmed) {
        return Some(ClassifiedPayload {
            encoding: PayloadEncoding::HttpUrl,
            value: trimmed.to_string(),
            trimmed: trimmed.to_string(),
        });
    }

    let compact = strip_whitespace(trimmed);
    if is_base64_syntax(&compact) {
        return Some(ClassifiedPayload {
            encoding: PayloadEncoding::Base64,
            value: compact,
            trimmed: trimmed.to_string(),
        });
    }

    Some(ClassifiedPayload {
        encoding: PayloadEncoding::Opaque,
        value: trimmed.to_string(),
        trimmed: trimmed.to_string(),
    })
}

fn is_http_url(payload: &str) -> bool {
    payload.starts_with("http://") || payload.starts_with("https://")
}

/// 去掉字符串中的全部空白字符（含中间的换行、制表符）。
pub(crate) fn strip_whitespace(payload: &str) -> String {
    payload.chars().filter(|c| !c.is_whitespace()).collect()
}

/// 仅做字符集层面的 Base64 语法校验。
pub(crate) fn is_base64_syntax(payload: &str) -> bool {
    BASE64_PATTERN.is_match(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoding_of(raw: &str) -> Option<PayloadEncoding> {
        classify_payload(raw).map(|c| c.encoding)
    }

    #[test]
    fn blank_payload_is_unclassified() {
        assert_eq!(classify_payload(""), None);
        assert_eq!(classify_payload("   \n\t "), None);
    }

    #[test]
    fn data_uri_is_detected_before_anything_else() {
        let raw = " data:image/png;base64,iVBORw0KGgo= ";
        let classified = classify_payload(raw).unwrap();
        assert_eq!(classified.encoding, PayloadEncoding::DataUri);
        assert_eq!(classified.value, "data:image/png;base64,iVBORw0KGgo=");
    }

    #[test]
    fn data_uri_prefix_is_case_sensitive() {
        assert_eq!(encoding_of("DATA:IMAGE/png;base64,AAAA"), Some(PayloadEncoding::Opaque));
    }

    #[test]
    fn http_and_https_urls_are_detected() {
        assert_eq!(encoding_of("http://wa.me/qr/ABC"), Some(PayloadEncoding::HttpUrl));
        assert_eq!(encoding_of("https://wa.me/qr/ABC"), Some(PayloadEncoding::HttpUrl));
        assert_eq!(encoding_of("ftp://wa.me/qr/ABC"), Some(PayloadEncoding::Opaque));
    }

    #[test]
    fn base64_ignores_interior_whitespace() {
        let classified = classify_payload("SGVs\nbG8g d29y bGQ=").unwrap();
        assert_eq!(classified.encoding, PayloadEncoding::Base64);
        assert_eq!(classified.value, "SGVsbG8gd29ybGQ=");
        assert_eq!(classified.trimmed, "SGVs\nbG8g d29y bGQ=");
    }

    #[test]
    fn non_ascii_case_folds_are_not_base64() {
        assert_eq!(encoding_of("SGV\u{17F}bG8="), Some(PayloadEncoding::Opaque));
        assert_eq!(encoding_of("\u{212A}AAA"), Some(PayloadEncoding::Opaque));
        assert!(!is_base64_syntax("\u{212A}AAA"));
    }

    #[test]
    fn base64_padding_is_limited_to_two() {
        assert!(is_base64_syntax("SGVsbA=="));
        assert!(!is_base64_syntax("SGVsbA==="));
        assert!(!is_base64_syntax("=="));
        assert!(!is_base64_syntax("SGV=sbA"));
    }

    #[test]
    fn pairing_codes_with_separators_are_opaque() {
        assert_eq!(encoding_of("ABCD-1234-PAIR"), Some(PayloadEncoding::Opaque));
        assert_eq!(
            encoding_of("2@abc,def,ghi=="),
            Some(PayloadEncoding::Opaque)
        );
    }
}
