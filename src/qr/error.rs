//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 本地渲染链路（URL 校验 → 二维码编码 → PNG 编码 → 工作线程）中所有可能的失败
//! 都收敛到 `QrError`。规范化入口不会把它抛给调用方，而是记录日志后转入远程渲染兜底，
//! 因此这里的错误主要用于日志与 `RenderOutcome::Fallback` 中的诊断信息。

/// 本地二维码渲染错误。
#[derive(Debug, thiserror::Error)]
pub enum QrError {
    #[error("URL 结构无效：{0}")]
    InvalidUrl(String),

    #[error("二维码编码失败：{0}")]
    Encode(String),

    #[error("图片编码失败：{0}")]
    Image(String),

    #[error("渲染任务异常：{0}")]
    Worker(String),

    #[error("本地渲染已关闭")]
    Disabled,

    #[error("配置无效：{0}")]
    InvalidConfig(String),
}

impl From<QrError> for String {
    fn from(error: QrError) -> Self {
        error.to_string()
    }
}
