//! # 网关二维码规范化 — 命令行入口
//!
//! 本文件仅负责参数解析、日志初始化与子命令分派，逻辑见 `lib.rs`。

use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use gateway_qr::error::AppError;
use gateway_qr::gateway::{GatewayClient, GatewayError};
use gateway_qr::qr::{QrNormalizer, classify_payload};
use gateway_qr::settings::AppSettings;

#[derive(Parser)]
#[command(name = "gateway-qr", version, about = "把消息网关的二维码载荷转换为可展示的图片地址")]
struct Cli {
    /// 设置文件路径
    #[arg(long, default_value = "settings.json")]
    settings: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 规范化原始载荷
    Payload { text: String },
    /// 从网关 JSON 响应中提取并规范化（`-` 表示从标准输入读取）
    Response { json: String },
    /// 请求网关并规范化
    Fetch,
    /// 只输出载荷的编码类型
    Classify { text: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{}", err);
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<String, AppError> {
    let settings = AppSettings::load(&cli.settings)?;
    let normalizer = QrNormalizer::new(settings.qr.clone())?;

    match cli.command {
        Command::Payload { text } => Ok(normalizer.normalize(Some(&text)).await),
        Command::Response { json } => {
            let content = if json == "-" {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            } else {
                json
            };
            let response = serde_json::from_str::<serde_json::Value>(&content)
                .map_err(|e| AppError::Input(format!("JSON 解析失败: {}", e)))?;
            Ok(normalizer.normalize_response(Some(&response)).await)
        }
        Command::Fetch => {
            let config = settings
                .gateway
                .ok_or_else(|| GatewayError::Config("设置文件缺少 gateway 配置".to_string()))?;
            let client = GatewayClient::new(config)?;
            Ok(client.fetch_qr_image(&normalizer).await?)
        }
        Command::Classify { text } => Ok(classify_payload(&text)
            .map(|c| c.encoding.as_str())
            .unwrap_or("empty")
            .to_string()),
    }
}
