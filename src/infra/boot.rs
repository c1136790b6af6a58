use std::net::SocketAddr;
use std::sync::Arc;

use crate::infra::config::{Config, Mode};
use crate::tools::database::build_database_server;

pub async fn run_server() -> anyhow::Result<()> {
    let cfg = Config::load()?;
    let mode = cfg.validate()?;
    tracing::info!(mode = %mode, port = cfg.port, "BOOT database-mcp-server");
    run_mode(mode, cfg.port).await
}

pub async fn run_mode(mode: Mode, port: u16) -> anyhow::Result<()> {
    let server = Arc::new(build_database_server()?);

    match mode {
        Mode::Stdio => crate::api::stdio::serve_stdio(&server).await,
        Mode::Demo => crate::api::demo::run_demo(&server, &mut std::io::stdout()).await,
        Mode::Server => {
            let app = crate::infra::http_app::build_app(server);
            let addr: SocketAddr = ([0, 0, 0, 0], port).into();
            tracing::info!(%addr, "listening");
            axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
            Ok(())
        }
    }
}
