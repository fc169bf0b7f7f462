//! Stdio transport for MCP protocol.
//!
//! Newline-delimited JSON-RPC 2.0. One message is read, handled to
//! completion and answered before the next is read. Logs go to stderr via
//! `tracing`, so stdout carries only responses.

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::McpServer;
use super::protocol::{
    INTERNAL_ERROR, JsonRpcRequest, JsonRpcResponse, McpToolInfo, PROTOCOL_VERSION, SERVER_NAME,
};
use crate::error::{ToolError, ToolResult};

/// Serve requests from `reader` until EOF, writing responses to `writer`.
///
/// Undecodable lines are logged and skipped.
pub async fn serve<R, W>(server: &McpServer, mut reader: R, mut writer: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();

    tracing::info!("MCP stdio server ready, waiting for requests...");

    loop {
        buf.clear();
        let bytes_read = reader.read_until(b'\n', &mut buf).await?;

        if bytes_read == 0 {
            tracing::info!("Stdin closed, shutting down");
            break;
        }

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim(),
            Err(e) => {
                tracing::error!(error = %e, "Input line is not valid UTF-8");
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }

        let message: Value = match serde_json::from_str(line) {
            Ok(message) => message,
            Err(e) => {
                tracing::error!(error = %e, "Failed to decode JSON");
                continue;
            }
        };

        if let Some(response) = handle_message(server, message).await {
            let response_json = serde_json::to_string(&response)?;
            writer.write_all(response_json.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
    }

    Ok(())
}

/// Handle one decoded message, returning the response to write, if any.
pub async fn handle_message(server: &McpServer, message: Value) -> Option<JsonRpcResponse> {
    if message.get("method").is_none() {
        tracing::debug!("Ignoring message without method");
        return None;
    }

    let id = message.get("id").cloned().filter(|id| !id.is_null());
    let request: JsonRpcRequest = match serde_json::from_value(message) {
        Ok(req) => req,
        Err(e) => {
            tracing::error!(error = %e, "Malformed request");
            return id.map(|id| JsonRpcResponse::error(Some(id), INTERNAL_ERROR, format!("Invalid request: {e}")));
        }
    };

    tracing::debug!(method = %request.method, "Received request");

    let response = handle_request(server, &request).await?;
    if request.is_notification() {
        return None;
    }
    Some(response)
}

async fn handle_request(server: &McpServer, req: &JsonRpcRequest) -> Option<JsonRpcResponse> {
    match req.method.as_str() {
        "initialize" => Some(handle_initialize(req.id.clone(), &req.params)),
        "tools/list" => Some(handle_tools_list(req.id.clone(), server)),
        "tools/call" => Some(handle_tools_call(req.id.clone(), &req.params, server).await),
        "notifications/initialized" => None,
        other => {
            tracing::debug!(method = %other, "Ignoring unsupported method");
            None
        }
    }
}

fn handle_initialize(id: Option<Value>, params: &Value) -> JsonRpcResponse {
    let requested = params
        .get("protocolVersion")
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    tracing::info!("MCP initialize: client protocol version {}", requested);

    JsonRpcResponse::success(
        id,
        serde_json::json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            }
        }),
    )
}

fn handle_tools_list(id: Option<Value>, server: &McpServer) -> JsonRpcResponse {
    let tool_list: Vec<McpToolInfo> = server
        .tools()
        .iter()
        .map(|t| McpToolInfo {
            name: t.name().to_string(),
            description: t.description().to_string(),
            input_schema: t.input_schema(),
        })
        .collect();

    JsonRpcResponse::success(
        id,
        serde_json::json!({
            "tools": tool_list
        }),
    )
}

async fn handle_tools_call(id: Option<Value>, params: &Value, server: &McpServer) -> JsonRpcResponse {
    match call_tool(params, server).await {
        Ok(text) => JsonRpcResponse::tool_text(id, text),
        Err(e) => {
            tracing::error!(error = %e, "Tool call failed");
            JsonRpcResponse::error(id, INTERNAL_ERROR, e.to_user_message())
        }
    }
}

async fn call_tool(params: &Value, server: &McpServer) -> ToolResult<String> {
    let tool_name = params
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| ToolError::validation("name", "missing tool name"))?;

    let arguments = match params.get("arguments") {
        Some(Value::Null) | None => serde_json::json!({}),
        Some(args) => args.clone(),
    };

    let tool = server
        .get_tool(tool_name)
        .ok_or_else(|| ToolError::UnknownTool(tool_name.to_string()))?;

    tracing::info!(tool = %tool_name, "Executing tool");

    tool.execute(server.context(), arguments).await
}
