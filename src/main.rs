//! Local invoker for the target group bridge.
//!
//! Feeds a recorded load balancer event through the bridge and a built-in
//! echo router, then prints the reply JSON the function would return.
//!
//! ```text
//! lambda-http-bridge --event event.json [--config bridge.toml] [--multi-value-headers]
//! cat event.json | lambda-http-bridge
//! ```

use std::collections::BTreeMap;
use std::io::Read;
use std::path::PathBuf;

use axum::http::{HeaderMap, Method, Uri};
use axum::{Json, Router};
use clap::Parser;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;

use lambda_http_bridge::config::{load_config, BridgeConfig};
use lambda_http_bridge::handler::{AlbHandler, InvocationContext, ServiceAdapter};
use lambda_http_bridge::observability::init_logging;
use lambda_http_bridge::AlbTargetGroupRequest;

#[derive(Parser)]
#[command(name = "lambda-http-bridge")]
#[command(about = "Run a target group event through the HTTP bridge locally", long_about = None)]
struct Cli {
    /// Event JSON file; reads stdin when omitted.
    #[arg(short, long)]
    event: Option<PathBuf>,

    /// Bridge configuration (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reply with multiValueHeaders regardless of the config file.
    #[arg(long)]
    multi_value_headers: bool,

    /// Request ID for the invocation; generated when omitted.
    #[arg(long)]
    request_id: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => BridgeConfig::default(),
    };
    if cli.multi_value_headers {
        config.multi_value_headers = true;
    }

    init_logging(&config.observability)?;

    let raw = match &cli.event {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let event: AlbTargetGroupRequest = serde_json::from_str(&raw)?;

    let cx = match cli.request_id {
        Some(id) => InvocationContext::new(id, CancellationToken::new()),
        None => InvocationContext::detached(),
    };

    let token = cx.cancellation().clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, cancelling invocation");
            token.cancel();
        }
    });

    tracing::info!(
        request_id = %cx.request_id(),
        multi_value_headers = config.multi_value_headers,
        "Invoking echo router"
    );

    let router = Router::new().fallback(echo);
    let handler = AlbHandler::new(ServiceAdapter::new(router), config);
    let reply = handler.handle(&cx, event).await?;

    println!("{}", serde_json::to_string_pretty(&reply)?);
    Ok(())
}

/// Describe the request as the delegate saw it.
async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: String) -> Json<Value> {
    let headers: BTreeMap<String, Vec<String>> = headers
        .keys()
        .map(|name| {
            let values = headers
                .get_all(name)
                .iter()
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
                .collect();
            (name.to_string(), values)
        })
        .collect();

    Json(json!({
        "method": method.as_str(),
        "url": uri.to_string(),
        "headers": headers,
        "body": body,
    }))
}
