//! # 载荷提取模块
//!
//! 网关返回的对象结构不固定，二维码内容可能出现在多个字段里。
//! 这里用显式的优先级列表做查找，而不是逐个字段试探。

use serde_json::Value;

/// 载荷字段优先级（从高到低）。
pub const PAYLOAD_FIELD_PRIORITY: [&str; 4] = ["qr", "qrCode", "qr_code", "code"];

/// 从网关响应中提取原始载荷。
///
/// 按 [`PAYLOAD_FIELD_PRIORITY`] 顺序返回第一个字符串类型的字段值；
/// 输入缺失、不是对象、或没有任何候选字段是字符串时返回空串。
///
/// # 示例
/// ```rust
/// use gateway_qr::qr::extract_payload;
/// use serde_json::json;
///
/// let response = json!({ "qrCode": "XYZ", "code": "ABC" });
/// assert_eq!(extract_payload(Some(&response)), "XYZ");
/// assert_eq!(extract_payload(None), "");
/// ```
pub fn extract_payload(response: Option<&Value>) -> String {
    let Some(Value::Object(fields)) = response else {
        return String::new();
    };

    PAYLOAD_FIELD_PRIORITY
        .iter()
        .find_map(|key| fields.get(*key).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn priority_order_is_stable() {
        assert_eq!(PAYLOAD_FIELD_PRIORITY, ["qr", "qrCode", "qr_code", "code"]);
    }

    #[test]
    fn picks_highest_priority_string_field() {
        let response = json!({ "qrCode": "XYZ", "code": "ABC" });
        assert_eq!(extract_payload(Some(&response)), "XYZ");

        let response = json!({ "code": "C", "qr_code": "B", "qr": "A" });
        assert_eq!(extract_payload(Some(&response)), "A");
    }

    #[test]
    fn skips_non_string_candidates() {
        let response = json!({ "qr": 42, "qrCode": null, "qr_code": ["x"], "code": "2@pairing" });
        assert_eq!(extract_payload(Some(&response)), "2@pairing");
    }

    #[test]
    fn empty_string_candidate_still_wins() {
        let response = json!({ "qr": "", "code": "ABC" });
        assert_eq!(extract_payload(Some(&response)), "");
    }

    #[test]
    fn unknown_shapes_degrade_to_empty() {
        assert_eq!(extract_payload(Some(&json!({ "foo": 123 }))), "");
        assert_eq!(extract_payload(Some(&Value::Null)), "");
        assert_eq!(extract_payload(Some(&json!("qr"))), "");
        assert_eq!(extract_payload(Some(&json!(["qr", "code"]))), "");
        assert_eq!(extract_payload(None), "");
    }
}
