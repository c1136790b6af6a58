//! The database assistant: query tools plus schema and best-practice documents.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::api::mcp::McpServer;
use crate::core::{Arguments, JsonObject, RegistryError, Resource, StaticText, Tool, ToolError, ToolHandler};
use crate::domain::{OptimizationReport, QueryOutcome};

pub const SERVER_NAME: &str = "database-mcp-server";
pub const SERVER_VERSION: &str = "1.0.0";

pub const SCHEMA_URI: &str = "database://schema";
pub const BEST_PRACTICES_URI: &str = "database://best-practices";

const QUERY_PREVIEW_CHARS: usize = 50;

#[derive(Clone, Default)]
pub struct ExecuteQuery;

impl ExecuteQuery {
    pub fn spec() -> Tool {
        Tool::new(
            "execute_query",
            "Execute SQL query against the database",
            json!({
                "type": "object",
                "properties": {
                    "sql": { "type": "string", "description": "SQL query to execute" },
                    "params": { "type": "array", "description": "Query parameters" }
                },
                "required": ["sql"]
            }),
        )
    }
}

#[async_trait]
impl ToolHandler for ExecuteQuery {
    async fn call(&self, arguments: JsonObject) -> Result<Value, ToolError> {
        let args = Arguments(&arguments);
        let sql = args.required_str("sql")?;
        let params = args.optional_array("params")?;
        tracing::info!(params = params.map(Vec::len).unwrap_or(0), "execute_query (no backing database)");

        let preview: String = sql.chars().take(QUERY_PREVIEW_CHARS).collect();
        let outcome = QueryOutcome {
            success: true,
            rows_affected: 0,
            message: format!("Query executed: {preview}..."),
        };
        serde_json::to_value(outcome).map_err(|e| ToolError::Message(e.to_string()))
    }
}

#[derive(Clone, Default)]
pub struct OptimizeQuery;

impl OptimizeQuery {
    pub fn spec() -> Tool {
        Tool::new(
            "optimize_query",
            "Analyze and optimize SQL query performance",
            json!({
                "type": "object",
                "properties": {
                    "sql": { "type": "string", "description": "SQL query to optimize" }
                },
                "required": ["sql"]
            }),
        )
    }
}

/// Case-sensitive heuristics over the raw query text.
pub fn suggest(sql: &str) -> Vec<String> {
    let mut suggestions = Vec::new();
    if sql.contains("SELECT *") {
        suggestions.push("Use specific columns instead of SELECT *".to_string());
    }
    if sql.contains("JOIN") && !sql.contains("INDEX") {
        suggestions.push("Ensure proper indexes on JOIN columns".to_string());
    }
    if sql.matches("LEFT JOIN").count() > 2 {
        suggestions.push("Consider query restructuring with multiple JOINs".to_string());
    }
    suggestions
}

#[async_trait]
impl ToolHandler for OptimizeQuery {
    async fn call(&self, arguments: JsonObject) -> Result<Value, ToolError> {
        let sql = Arguments(&arguments).required_str("sql")?;
        let report = OptimizationReport {
            original_query: sql.to_string(),
            suggestions: suggest(sql),
            potential_improvement: "15-30% performance improvement".to_string(),
        };
        serde_json::to_value(report).map_err(|e| ToolError::Message(e.to_string()))
    }
}

pub const SCHEMA_DOC: &str = r#"
# Database Schema

## Tables

### Users
- id (INT, PRIMARY KEY)
- username (VARCHAR(100))
- email (VARCHAR(100))
- created_at (DATETIME)

### Products
- id (INT, PRIMARY KEY)
- name (VARCHAR(200))
- price (DECIMAL)
- stock (INT)
- category_id (INT, FK)

### Orders
- id (INT, PRIMARY KEY)
- user_id (INT, FK)
- product_id (INT, FK)
- quantity (INT)
- order_date (DATETIME)

## Indexes
- Users.email (UNIQUE)
- Products.category_id
- Orders.user_id
- Orders.order_date
"#;

pub const BEST_PRACTICES_DOC: &str = r#"
# Database Best Practices

## Query Optimization
1. Use specific columns, avoid SELECT *
2. Add WHERE clauses to filter data early
3. Create indexes on frequently filtered columns
4. Use EXPLAIN PLAN to analyze queries
5. Batch multiple operations when possible

## Schema Design
1. Normalize to 3NF for OLTP systems
2. Use appropriate data types
3. Add meaningful constraints
4. Document all columns and relationships
5. Plan for growth and scalability

## Performance Tips
1. Use parameterized queries (prevents SQL injection)
2. Connection pooling for multiple requests
3. Cache frequently accessed data
4. Archive old data periodically
5. Monitor query performance regularly
"#;

/// Assemble the database assistant with its tools and resources registered.
pub fn build_database_server() -> Result<McpServer, RegistryError> {
    let mut server = McpServer::new(SERVER_NAME, SERVER_VERSION);

    server.register_tool(ExecuteQuery::spec(), ExecuteQuery)?;
    server.register_tool(OptimizeQuery::spec(), OptimizeQuery)?;

    server.register_resource(
        Resource::new(SCHEMA_URI, "Database Schema", "Current database schema and table definitions")
            .with_mime_type("text/plain"),
        StaticText(SCHEMA_DOC),
    )?;
    server.register_resource(
        Resource::new(
            BEST_PRACTICES_URI,
            "Database Best Practices",
            "Best practices for query optimization and database design",
        )
        .with_mime_type("text/markdown"),
        StaticText(BEST_PRACTICES_DOC),
    )?;

    tracing::info!(
        tools = server.tools().len(),
        resources = server.resources().len(),
        "database server assembled"
    );
    Ok(server)
}
