use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::api::mcp::McpServer;
use crate::core::Response;

/// Line-delimited JSON loop: one request per line in, one response per line out.
pub async fn serve_lines<R, W>(server: &McpServer, reader: R, mut writer: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let resp = match serde_json::from_str::<serde_json::Value>(&line) {
            Ok(raw) => server.handle_value(raw).await,
            Err(e) => Response::error(format!("parse error: {e}")),
        };
        let mut out = serde_json::to_string(&resp)?;
        out.push('\n');
        writer.write_all(out.as_bytes()).await?;
        writer.flush().await?;
    }
    tracing::info!("stdin closed; stdio loop finished");
    Ok(())
}

pub async fn serve_stdio(server: &McpServer) -> anyhow::Result<()> {
    tracing::info!("mode=stdio");
    serve_lines(server, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::database::build_database_server;
    use serde_json::Value;

    async fn run(input: &str) -> Vec<Value> {
        let server = build_database_server().unwrap();
        let mut out: Vec<u8> = Vec::new();
        serve_lines(&server, input.as_bytes(), &mut out).await.unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn answers_each_line_in_order_and_skips_blanks() {
        let input = "{\"type\":\"initialize\"}\n\n   \n{\"type\":\"tools/list\"}\n";
        let out = run(input).await;
        assert_eq!(out.len(), 2);
        assert_eq!(out[0]["type"], "initialize_response");
        assert_eq!(out[1]["type"], "tools_response");
    }

    #[tokio::test]
    async fn parse_errors_do_not_stop_the_loop() {
        let input = "{ not-json }\n{\"type\":\"resources/get\",\"uri\":\"database://schema\"}\n";
        let out = run(input).await;
        assert!(out[0]["error"].as_str().unwrap().starts_with("parse error:"));
        assert_eq!(out[1]["type"], "resource_response");
    }

    #[tokio::test]
    async fn empty_input_produces_no_output() {
        assert!(run("").await.is_empty());
    }
}
