//! # 网关二维码规范化 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │           前端 (React)：<img src={qrSource} />           │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↕ 可展示的图片地址（data: URI / https: URL / 空串）
//! ┌───────┼──────────────────────────────────────────────────┐
//! │       ↕            后端 (Rust)                           │
//! │                                                          │
//! │  ┌─ error ────── AppError (统一错误类型)                 │
//! │  │                                                       │
//! │  ├─ gateway ──── WhatsApp 网关二维码接口 (reqwest)        │
//! │  │                                                       │
//! │  ├─ qr ───────── 载荷提取 · 分类 · 本地渲染 · 远程兜底     │
//! │  │                                                       │
//! │  └─ settings ─── JSON 设置文件                            │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError` |
//! | [`gateway`] | 请求消息网关的二维码接口 |
//! | [`qr`] | 把任意编码的载荷规范化为可展示的图片地址 |
//! | [`settings`] | 设置文件的读取与保存 |

pub mod error;
pub mod gateway;
pub mod qr;
pub mod settings;
