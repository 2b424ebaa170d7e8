//! # 本地渲染模块
//!
//! ## 设计思路
//!
//! 把 URL 载荷在本地编码成二维码 PNG，并包装为 `data:image/png;base64,...`。
//! 该阶段是整条链路里唯一可能失败的环节，失败由规范化器转入远程渲染兜底。
//!
//! ## 实现思路
//!
//! 1. 校验 URL 结构（协议 + 主机）
//! 2. `qrcodegen` 按配置纠错等级编码
//! 3. 按“模块数 + 双侧边距”把模块映射到固定边长的灰度方图
//! 4. PNG 编码后做 Base64 包装

use base64::{Engine as _, engine::general_purpose};
use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use qrcodegen::QrCode;
use std::io::Cursor;

use super::{QrConfig, QrError};

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// 将 URL 渲染为二维码 Data URI（同步，CPU 密集）。
pub(crate) fn render_url_to_data_uri(url: &str, config: &QrConfig) -> Result<String, QrError> {
    validate_url_structure(url)?;

    let code = QrCode::encode_text(url, config.error_correction.to_qrcodegen())
        .map_err(|e| QrError::Encode(e.to_string()))?;
    let image = rasterize(&code, config.local_render_width, config.margin_modules);
    let png = encode_png(image)?;

    Ok(format!(
        "data:image/png;base64,{}",
        general_purpose::STANDARD.encode(png)
    ))
}

fn validate_url_structure(url: &str) -> Result<(), QrError> {
    let parsed = reqwest::Url::parse(url).map_err(|e| QrError::InvalidUrl(e.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(QrError::InvalidUrl(format!("不支持的协议：{}", parsed.scheme())));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(QrError::InvalidUrl("缺少主机名".to_string()));
    }

    Ok(())
}

/// 将二维码模块映射到 `width x width` 的灰度图。
///
/// 边长小于“模块总数”时以模块总数为准，保证每个模块至少 1 像素。
fn rasterize(code: &QrCode, width: u32, margin: u32) -> GrayImage {
    let modules = code.size() as u32;
    let total = modules + margin * 2;
    let side = width.max(total);

    let mut image = GrayImage::from_pixel(side, side, LIGHT);
    for py in 0..side {
        let my = (py as u64 * total as u64 / side as u64) as u32;
        for px in 0..side {
            let mx = (px as u64 * total as u64 / side as u64) as u32;
            if is_dark(code, mx, my, margin, modules) {
                image.put_pixel(px, py, DARK);
            }
        }
    }

    image
}

fn is_dark(code: &QrCode, mx: u32, my: u32, margin: u32, modules: u32) -> bool {
    if mx < margin || my < margin {
        return false;
    }
    let (x, y) = (mx - margin, my - margin);
    if x >= modules || y >= modules {
        return false;
    }
    code.get_module(x as i32, y as i32)
}

fn encode_png(image: GrayImage) -> Result<Vec<u8>, QrError> {
    let mut buf = Vec::new();
    DynamicImage::ImageLuma8(image)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|e| QrError::Image(e.to_string()))?;
    Ok(buf)
}
