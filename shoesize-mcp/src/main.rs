//! Shoesize MCP Server
//!
//! Line-delimited JSON-RPC 2.0 over stdin/stdout. Logs go to stderr.
//!
//! Tools:
//! - convert: Convert one size between standards
//! - convert_all: Express one size in every standard
//! - size_chart: Build a conversion chart over a range
//! - list_units: List supported units and categories

mod config;

use std::io::{self, BufRead, Write};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use shoesize_core::{Category, SizeError, SizeUnit, SizeValue};
use shoesize_units::{parse_size, ConversionEngine, SizeRow};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

const PROTOCOL_VERSION: &str = "2025-11-25";
const SERVER_NAME: &str = "shoesize";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

// JSON-RPC error codes
const PARSE_ERROR: i32 = -32700;
const INVALID_REQUEST: i32 = -32600;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;

// MCP Protocol types
#[derive(Debug, Deserialize)]
struct McpRequest {
    jsonrpc: String,
    id: Option<JsonValue>,
    method: String,
    #[serde(default)]
    params: Option<JsonValue>,
}

#[derive(Debug, Serialize)]
struct McpResponse {
    jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<McpError>,
}

#[derive(Debug, Serialize)]
struct McpError {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<JsonValue>,
}

impl McpError {
    fn invalid_params(message: impl Into<String>) -> Self {
        Self { code: INVALID_PARAMS, message: message.into(), data: None }
    }
}

/// Why a tool call failed: bad protocol params, or a conversion error
enum ToolError {
    Params(McpError),
    Size(SizeError),
}

impl From<McpError> for ToolError {
    fn from(err: McpError) -> Self {
        ToolError::Params(err)
    }
}

impl From<SizeError> for ToolError {
    fn from(err: SizeError) -> Self {
        ToolError::Size(err)
    }
}

struct Server {
    config: Config,
    engine: ConversionEngine,
}

impl Server {
    fn new(config: Config) -> Self {
        Self {
            config,
            engine: ConversionEngine::new().with_precision(config.precision),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let config = Config::from_env();
    let server = Server::new(config);

    info!(version = SERVER_VERSION, protocol = PROTOCOL_VERSION, "shoesize MCP server started");
    info!(precision = config.precision, category = %config.default_category, "configuration loaded");

    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin.lock());

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => {
                info!("client disconnected (EOF)");
                break;
            }
            Ok(_) => {
                let Some(response) = process_line(&server, &line) else {
                    continue;
                };

                let mut stdout = io::stdout().lock();
                if let Err(e) = writeln!(stdout, "{}", response).and_then(|_| stdout.flush()) {
                    error!(error = %e, "error writing response");
                    break;
                }
            }
            Err(e) => {
                error!(error = %e, "error reading input");
                break;
            }
        }
    }

    info!("server shutting down");
}

/// Handle one input line; `None` when nothing should be written back
fn process_line(server: &Server, line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    debug!(bytes = line.len(), "received request");

    let response = match serde_json::from_str::<McpRequest>(line) {
        Ok(request) => {
            debug!(method = %request.method, "processing");
            let response = handle_request(server, &request);
            // Notifications (no id) never receive a response
            if request.id.is_none() {
                debug!(method = %request.method, "notification processed");
                return None;
            }
            response
        }
        Err(e) => {
            warn!(error = %e, "error parsing request");
            McpResponse {
                jsonrpc: "2.0".to_string(),
                id: None,
                result: None,
                error: Some(McpError {
                    code: PARSE_ERROR,
                    message: format!("Parse error: {}", e),
                    data: None,
                }),
            }
        }
    };

    match serde_json::to_string(&response) {
        Ok(json) => Some(json),
        Err(e) => {
            error!(error = %e, "error serializing response");
            None
        }
    }
}

fn handle_request(server: &Server, request: &McpRequest) -> McpResponse {
    let result = if request.jsonrpc != "2.0" {
        Err(McpError {
            code: INVALID_REQUEST,
            message: format!("Unsupported jsonrpc version: {}", request.jsonrpc),
            data: None,
        })
    } else {
        match request.method.as_str() {
            // Lifecycle
            "initialize" => handle_initialize(&request.params),
            "initialized" | "notifications/initialized" => Ok(json!({})),
            "ping" => Ok(json!({})),

            // Tools
            "tools/list" => handle_tools_list(),
            "tools/call" => handle_tool_call(server, &request.params),

            _ => Err(McpError {
                code: METHOD_NOT_FOUND,
                message: format!("Method not found: {}", request.method),
                data: None,
            }),
        }
    };

    match result {
        Ok(r) => McpResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id.clone(),
            result: Some(r),
            error: None,
        },
        Err(e) => McpResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id.clone(),
            result: None,
            error: Some(e),
        },
    }
}

fn handle_initialize(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let client_info = params.as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    // Use client's protocol version for compatibility
    let client_protocol = params.as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    info!(client = client_info, protocol = client_protocol, "client connected");

    Ok(json!({
        "protocolVersion": client_protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Shoe size conversion between EU, US, UK, centimeters and inches"
        },
        "capabilities": {
            "tools": {
                "listChanged": false
            }
        },
        "instructions": "Convert shoe sizes with 'convert'. US and UK sizes depend on the category (men, women, kids). Use 'size_chart' for a table over a range."
    }))
}

fn handle_tools_list() -> Result<JsonValue, McpError> {
    let units: Vec<&str> = SizeUnit::ALL.iter().map(|u| u.as_str()).collect();
    let categories: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();

    Ok(json!({
        "tools": [
            {
                "name": "convert",
                "description": "Convert a shoe size from one standard to another.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "value": {
                            "type": ["number", "string"],
                            "description": "Size value, e.g. 42 or \"42 eu\""
                        },
                        "from": { "type": "string", "enum": units, "description": "Source unit (optional if value names one)" },
                        "to": { "type": "string", "enum": units, "description": "Target unit" },
                        "category": { "type": "string", "enum": categories, "description": "Wearer category" }
                    },
                    "required": ["value", "to"]
                }
            },
            {
                "name": "convert_all",
                "description": "Express a shoe size in every supported standard.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "value": { "type": ["number", "string"], "description": "Size value" },
                        "from": { "type": "string", "enum": units, "description": "Source unit" },
                        "category": { "type": "string", "enum": categories, "description": "Wearer category" }
                    },
                    "required": ["value"]
                }
            },
            {
                "name": "size_chart",
                "description": "Build a conversion chart for an inclusive range of sizes.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "from": { "type": "string", "enum": units, "description": "Unit of start/end (default: eu)" },
                        "start": { "type": "number", "description": "First size" },
                        "end": { "type": "number", "description": "Last size" },
                        "step": { "type": "number", "description": "Increment (default: the unit's input step)" },
                        "category": { "type": "string", "enum": categories, "description": "Wearer category" }
                    },
                    "required": ["start", "end"]
                }
            },
            {
                "name": "list_units",
                "description": "List supported units and categories.",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            }
        ]
    }))
}

fn handle_tool_call(server: &Server, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let params = params.as_ref().ok_or_else(|| McpError::invalid_params("Missing params"))?;

    let name = params.get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

    let args = params.get("arguments").cloned().unwrap_or(json!({}));

    let result = match name {
        "convert" => tool_convert(server, &args),
        "convert_all" => tool_convert_all(server, &args),
        "size_chart" => tool_size_chart(server, &args),
        "list_units" => tool_list_units(),
        _ => Err(ToolError::Params(McpError::invalid_params(format!("Unknown tool: {}", name)))),
    };

    match result {
        Ok(r) => Ok(r),
        Err(ToolError::Params(e)) => Err(e),
        Err(ToolError::Size(e)) => {
            debug!(tool = name, error = %e, "tool call failed");
            Ok(tool_error(&e))
        }
    }
}

fn tool_convert(server: &Server, args: &JsonValue) -> Result<JsonValue, ToolError> {
    let (value, embedded_unit) = size_input(args)?;
    let from = match arg_unit(args, "from")?.or(embedded_unit) {
        Some(u) => u,
        None => return Err(McpError::invalid_params("Missing from unit").into()),
    };
    let to = arg_unit(args, "to")?
        .ok_or_else(|| McpError::invalid_params("Missing to unit"))?;
    let category = arg_category(server, args)?;

    let input = SizeValue::new(value, from, category);
    let output = server.engine.convert_value(input, to)?;

    Ok(json!({
        "content": [{ "type": "text", "text": format!("{} = {} {}", input, output.value, output.unit) }],
        "value": output.value,
        "from": from,
        "to": to,
        "category": category
    }))
}

fn tool_convert_all(server: &Server, args: &JsonValue) -> Result<JsonValue, ToolError> {
    let (value, embedded_unit) = size_input(args)?;
    let from = arg_unit(args, "from")?.or(embedded_unit).unwrap_or(SizeUnit::Eu);
    let category = arg_category(server, args)?;

    let row = server.engine.convert_all(value, from, category)?;

    Ok(json!({
        "content": [{ "type": "text", "text": render_chart(&[row], server.config.precision) }],
        "row": row
    }))
}

fn tool_size_chart(server: &Server, args: &JsonValue) -> Result<JsonValue, ToolError> {
    let from = arg_unit(args, "from")?.unwrap_or(SizeUnit::Eu);
    let category = arg_category(server, args)?;
    let start = arg_number(args, "start")?.ok_or_else(|| McpError::invalid_params("Missing start"))?;
    let end = arg_number(args, "end")?.ok_or_else(|| McpError::invalid_params("Missing end"))?;
    let step = arg_number(args, "step")?.unwrap_or_else(|| from.step());

    let rows = server.engine.size_chart(category, from, start, end, step)?;

    Ok(json!({
        "content": [{ "type": "text", "text": render_chart(&rows, server.config.precision) }],
        "category": category,
        "rows": rows
    }))
}

fn tool_list_units() -> Result<JsonValue, ToolError> {
    let units: Vec<JsonValue> = SizeUnit::ALL.iter()
        .map(|u| json!({ "unit": u, "label": u.label(), "step": u.step(), "length": u.is_length() }))
        .collect();

    let text = SizeUnit::ALL.iter().map(|u| u.as_str()).collect::<Vec<_>>().join(", ");

    Ok(json!({
        "content": [{ "type": "text", "text": format!("Units: {}", text) }],
        "units": units,
        "categories": Category::ALL
    }))
}

fn tool_error(err: &SizeError) -> JsonValue {
    let report = err.report();
    json!({
        "content": [{ "type": "text", "text": format!("Error: {}", report) }],
        "error": report,
        "isError": true
    })
}

/// Markdown table, one column per unit
fn render_chart(rows: &[SizeRow], precision: u32) -> String {
    let precision = precision as usize;
    let mut out = String::new();

    let header: Vec<&str> = SizeUnit::ALL.iter().map(|u| u.label()).collect();
    out.push_str(&format!("| {} |\n", header.join(" | ")));
    out.push_str(&format!("|{}\n", "---|".repeat(header.len())));

    for row in rows {
        let cells: Vec<String> = SizeUnit::ALL.iter()
            .map(|u| format!("{:.*}", precision, row.get(*u)))
            .collect();
        out.push_str(&format!("| {} |\n", cells.join(" | ")));
    }
    out
}

/// `value` as a number, numeric string, or sized string like "42 eu"
fn size_input(args: &JsonValue) -> Result<(f64, Option<SizeUnit>), ToolError> {
    match args.get("value") {
        Some(JsonValue::Number(n)) => n.as_f64()
            .map(|v| (v, None))
            .ok_or_else(|| McpError::invalid_params("value is not a representable number").into()),
        Some(JsonValue::String(s)) => match s.trim().replace(',', ".").parse::<f64>() {
            Ok(v) => Ok((v, None)),
            Err(_) => {
                let (v, unit) = parse_size(s)?;
                Ok((v, Some(unit)))
            }
        },
        Some(_) => Err(McpError::invalid_params("value must be a number or string").into()),
        None => Err(McpError::invalid_params("Missing value").into()),
    }
}

fn arg_number(args: &JsonValue, name: &str) -> Result<Option<f64>, McpError> {
    match args.get(name) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(v) => v.as_f64()
            .map(Some)
            .ok_or_else(|| McpError::invalid_params(format!("{} must be a number", name))),
    }
}

fn arg_unit(args: &JsonValue, name: &str) -> Result<Option<SizeUnit>, SizeError> {
    args.get(name)
        .and_then(|v| v.as_str())
        .map(str::parse::<SizeUnit>)
        .transpose()
}

fn arg_category(server: &Server, args: &JsonValue) -> Result<Category, SizeError> {
    Ok(args.get("category")
        .and_then(|v| v.as_str())
        .map(str::parse::<Category>)
        .transpose()?
        .unwrap_or(server.config.default_category))
}
