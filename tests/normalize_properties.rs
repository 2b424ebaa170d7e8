// Property tests for QR payload normalization
use base64::{Engine as _, engine::general_purpose};
use gateway_qr::qr::{QrNormalizer, extract_payload};
use proptest::prelude::*;
use serde_json::json;

const CHART_PREFIX: &str = "https://chart.googleapis.com/chart?cht=qr";

fn normalize(raw: &str) -> String {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime init failed");
    runtime.block_on(QrNormalizer::default().normalize(Some(raw)))
}

fn decoded_chl(url: &str) -> String {
    reqwest::Url::parse(url)
        .expect("invalid remote url")
        .query_pairs()
        .find(|(k, _)| k == "chl")
        .map(|(_, v)| v.into_owned())
        .expect("chl parameter missing")
}

proptest! {
    #[test]
    fn blank_payloads_normalize_to_empty(raw in "[ \t\r\n]{0,16}") {
        prop_assert_eq!(normalize(&raw), "");
    }

    #[test]
    fn data_uris_are_unchanged_and_idempotent(suffix in "[a-zA-Z0-9/;,+=]{0,40}") {
        let uri = format!("data:image{}", suffix);
        let once = normalize(&uri);
        prop_assert_eq!(&once, &uri);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn valid_base64_is_wrapped_as_png(bytes in prop::collection::vec(any::<u8>(), 1..64)) {
        let encoded = general_purpose::STANDARD.encode(&bytes);
        prop_assert_eq!(normalize(&encoded), format!("data:image/png;base64,{}", encoded));
    }

    #[test]
    fn interior_whitespace_in_base64_is_not_significant(
        bytes in prop::collection::vec(any::<u8>(), 3..48),
        gaps in prop::collection::vec((0usize..64, prop::sample::select(vec![" ", "\n", "\t", "\r\n"])), 0..6),
    ) {
        let encoded = general_purpose::STANDARD.encode(&bytes);
        let mut spaced = encoded.clone();
        for (pos, gap) in gaps {
            let at = pos % (spaced.len() + 1);
            if spaced.is_char_boundary(at) {
                spaced.insert_str(at, gap);
            }
        }

        prop_assert_eq!(normalize(&spaced), format!("data:image/png;base64,{}", encoded));
    }

    #[test]
    fn opaque_payloads_round_trip_through_remote_url(
        head in "[A-Z0-9]{1,8}",
        tail in "[A-Za-z0-9@,.:_ -]{0,24}",
    ) {
        let raw = format!("  {}-{}  ", head, tail);
        let expected = raw.trim();

        let result = normalize(&raw);
        prop_assert!(result.starts_with(CHART_PREFIX));
        prop_assert!(result.contains("&chs=512x512&"));
        prop_assert_eq!(decoded_chl(&result), expected);
    }

    #[test]
    fn short_urls_render_locally(path in "[a-z0-9]{0,30}", secure in any::<bool>()) {
        let scheme = if secure { "https" } else { "http" };
        let url = format!("{}://example.com/{}", scheme, path);
        prop_assert!(normalize(&url).starts_with("data:image/png;base64,"));
    }
}

#[test]
fn hello_base64_with_surrounding_whitespace() {
    assert_eq!(normalize("  SGVsbG8=  "), "data:image/png;base64,SGVsbG8=");
}

#[test]
fn unrenderable_url_falls_back_with_encoded_original() {
    let url = format!("https://example.com/{}", "q".repeat(3000));
    let result = normalize(&url);

    assert!(result.starts_with(CHART_PREFIX));
    assert_eq!(decoded_chl(&result), url);
}

#[test]
fn extractor_priority_end_to_end() {
    let response = json!({ "qrCode": "XYZ", "code": "ABC" });
    assert_eq!(extract_payload(Some(&response)), "XYZ");
    assert_eq!(extract_payload(Some(&json!({ "foo": 123 }))), "");
    assert_eq!(extract_payload(Some(&serde_json::Value::Null)), "");
}
