//! # 二维码载荷规范化模块（qr）
//!
//! ## 设计思路
//!
//! 消息网关返回“扫码关联设备”载荷的方式并不统一：有时是现成的图片 Data URI，
//! 有时是链接，有时是 Base64，有时只是一段配对码。本模块把这些差异收敛为
//! 一个输出类型：浏览器可直接作为图片来源的字符串。
//!
//! - `extract`：从结构不固定的网关响应中按优先级取出载荷
//! - `classify`：给载荷打上互斥的编码标签
//! - `render`：URL 载荷的本地二维码渲染
//! - `remote`：远程渲染服务地址拼接（兜底）
//! - `normalizer`：编排整条链路
//! - `config/error`：配置与错误
//!
//! ## 新同事快速上手
//!
//! ```text
//! 网关响应 (serde_json::Value)
//!    ↓
//! extract.rs（qr > qrCode > qr_code > code）
//!    ↓
//! classify.rs（DataUri / HttpUrl / Base64 / Opaque）
//!    ↓
//! normalizer.rs（按标签分派）
//!    ├─ DataUri → 原样返回
//!    ├─ HttpUrl → render.rs（本地渲染）──失败──→ remote.rs
//!    ├─ Base64  → data:image/png;base64,...
//!    └─ Opaque  → remote.rs
//!    ↓
//! 可展示的图片地址（空串表示暂无二维码）
//! ```

mod classify;
pub(crate) mod config;
mod error;
mod extract;
mod normalizer;
mod remote;
mod render;

pub use classify::{ClassifiedPayload, DATA_IMAGE_PREFIX, PayloadEncoding, classify_payload};
pub use config::{DEFAULT_REMOTE_ENDPOINT, ErrorCorrection, QrConfig};
pub use error::QrError;
pub use extract::{PAYLOAD_FIELD_PRIORITY, extract_payload};
pub use normalizer::{QrNormalizer, RenderOutcome, normalize_qr_payload};
pub use remote::RemoteRenderer;
