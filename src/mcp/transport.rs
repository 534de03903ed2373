//! Transports for serving the MCP server

use anyhow::Context;
use rmcp::ServiceExt;
use rmcp::transport::streamable_http_server::{
    StreamableHttpService, session::local::LocalSessionManager,
};

use super::server::SwaggerMcpServer;

/// Path the streamable HTTP endpoint is mounted at
pub const MCP_HTTP_PATH: &str = "/mcp";

/// Serve over stdin/stdout until the client disconnects
pub async fn serve_stdio(server: SwaggerMcpServer) -> anyhow::Result<()> {
    tracing::info!("Serving MCP over stdio");

    let service = server
        .serve(rmcp::transport::stdio())
        .await
        .context("Failed to start MCP server on stdio")?;
    let reason = service.waiting().await?;

    tracing::info!(?reason, "MCP stdio session ended");
    Ok(())
}

/// Serve streamable HTTP on `bind_address` until Ctrl-C
pub async fn serve_http(server: SwaggerMcpServer, bind_address: &str) -> anyhow::Result<()> {
    let service = StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        Default::default(),
    );
    let router = axum::Router::new().nest_service(MCP_HTTP_PATH, service);

    let listener = tokio::net::TcpListener::bind(bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;
    let local_addr = listener.local_addr()?;
    tracing::info!(
        address = %local_addr,
        "MCP server listening on http://{local_addr}{MCP_HTTP_PATH}"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            }
            tracing::info!("Shutting down");
        })
        .await
        .context("HTTP server error")?;

    Ok(())
}
