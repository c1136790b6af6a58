use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    database_mcp_server::infra::logging::init();
    database_mcp_server::cli::run().await
}
