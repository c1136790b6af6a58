use std::io::Write;

use serde_json::json;

use crate::api::mcp::McpServer;
use crate::core::{MessageType, Request};
use crate::tools::database::{BEST_PRACTICES_URI, SCHEMA_URI};

const DEMO_QUERY: &str = "SELECT * FROM products LEFT JOIN categories ON products.category_id = categories.id LEFT JOIN suppliers ON categories.supplier_id = suppliers.id";

/// The scripted walkthrough: one titled step per request.
pub fn script() -> Vec<(&'static str, Request)> {
    vec![
        ("Initialize Server", Request::new(MessageType::Initialize)),
        ("List Available Tools", Request::new(MessageType::ListTools)),
        ("List Available Resources", Request::new(MessageType::ListResources)),
        ("Call Tool - Optimize Query", Request::call_tool("optimize_query", json!({ "sql": DEMO_QUERY }))),
        ("Get Resource - Database Schema", Request::get_resource(SCHEMA_URI)),
        ("Get Resource - Best Practices", Request::get_resource(BEST_PRACTICES_URI)),
    ]
}

pub async fn run_demo<W: Write>(server: &McpServer, out: &mut W) -> anyhow::Result<()> {
    let rule = "=".repeat(70);
    writeln!(out, "{rule}\nMCP (Model Context Protocol) Server Demonstration\n{rule}")?;
    for (i, (title, req)) in script().into_iter().enumerate() {
        let resp = server.handle_message(req).await;
        writeln!(out, "\n{}. {title}:", i + 1)?;
        writeln!(out, "{}", serde_json::to_string_pretty(&resp)?)?;
    }
    writeln!(out, "\n{rule}\nDemonstration Complete!\n{rule}")?;
    Ok(())
}
