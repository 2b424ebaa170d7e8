//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 各子系统保留自己的错误枚举（`QrError`、`GatewayError`），
//! 对外入口（命令行、上层服务）统一返回 `Result<T, AppError>`。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为子系统错误提供 `From` 转换，调用侧直接 `?`。
//! - 实现 `Serialize` 将错误序列化为字符串，方便以 JSON 形式返回给前端。

use serde::Serialize;

use crate::gateway::GatewayError;
use crate::qr::QrError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 二维码配置或渲染错误
    #[error("{0}")]
    Qr(#[from] QrError),

    /// 消息网关请求错误
    #[error("{0}")]
    Gateway(#[from] GatewayError),

    /// 设置文件读写或解析失败
    #[error("设置错误: {0}")]
    Settings(String),

    /// 输入内容无法解析
    #[error("输入无效: {0}")]
    Input(String),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
