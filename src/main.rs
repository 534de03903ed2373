//! swagger-mcp CLI entrypoint
//! Loads the API description and serves its operations as MCP tools.
#![deny(unsafe_code)]

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use url::Url;

use swagger_mcp::bridge::Bridge;
use swagger_mcp::core::config::{
    Config, DEFAULT_FETCH_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, DEFAULT_SERVER_NAME, TransportKind,
};
use swagger_mcp::infrastructure::openapi::{CompositeOpenApiLoader, OpenApiLoader};
use swagger_mcp::mcp::{SwaggerMcpServer, serve_http, serve_stdio};

#[derive(Parser, Debug)]
#[command(name = "swagger-mcp")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// URL or file path of the OpenAPI/Swagger document (JSON or YAML)
    #[arg(long = "spec", env = "SWAGGER_URL")]
    spec: String,

    /// API key sent as `Authorization: Bearer <key>`
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Base URL of the API, overriding the one in the document
    #[arg(long, env = "SWAGGER_BASE_URL")]
    base_url: Option<Url>,

    /// MCP transport
    #[arg(long, env = "MCP_TRANSPORT", value_enum, default_value_t = TransportKind::Http)]
    transport: TransportKind,

    /// Host to bind for the HTTP transport
    #[arg(long, env = "MCP_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to bind for the HTTP transport
    #[arg(long, env = "MCP_PORT", default_value_t = 8000)]
    port: u16,

    /// Timeout for calls to the API, in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT.as_secs())]
    timeout_secs: u64,

    /// Timeout for fetching the document, in seconds
    #[arg(long, env = "SPEC_FETCH_TIMEOUT_SECS", default_value_t = DEFAULT_FETCH_TIMEOUT.as_secs())]
    fetch_timeout_secs: u64,

    /// Name reported to MCP clients
    #[arg(long, env = "MCP_SERVER_NAME", default_value = DEFAULT_SERVER_NAME)]
    server_name: String,
}

impl Cli {
    fn into_config(self) -> swagger_mcp::Result<Config> {
        Config::builder()
            .spec_source(self.spec)
            .api_key(self.api_key)
            .base_url(self.base_url)
            .transport(self.transport)
            .host(self.host)
            .port(self.port)
            .request_timeout(Duration::from_secs(self.timeout_secs))
            .fetch_timeout(Duration::from_secs(self.fetch_timeout_secs))
            .server_name(self.server_name)
            .build()
    }
}

fn load_failure_message(err: &swagger_mcp::Error) -> &'static str {
    if err.is_parse_error() {
        "API description is not a valid OpenAPI document"
    } else {
        "Failed to load API description"
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays free for the stdio transport
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Cli::parse()
        .into_config()
        .context("Invalid configuration")?;

    let loader = CompositeOpenApiLoader::new(config.fetch_timeout())?
        .with_base_url(config.base_url().map(|url| url.to_string()));

    let spec = match loader.load(config.spec_source()).await {
        Ok(spec) => spec,
        Err(e) => {
            error!(source = %config.spec_source(), error = %e, "{}", load_failure_message(&e));
            std::process::exit(1);
        }
    };

    info!(
        title = %spec.info.title,
        version = %spec.info.version,
        base_url = %spec.base_url,
        "Loaded API description"
    );

    let bridge = Bridge::new(spec, &config).context("Failed to build tools")?;
    info!(tools = bridge.registry().len(), "Tools ready");

    let server = SwaggerMcpServer::new(Arc::new(bridge), config.server_name());

    match config.transport() {
        TransportKind::Http => serve_http(server, &config.bind_address()).await,
        TransportKind::Stdio => serve_stdio(server).await,
    }
}
