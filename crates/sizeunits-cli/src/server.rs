//! JSON-RPC 2.0 server mode for sizeunits
//!
//! Lets bots and other tools use sizeunits as a unit backend.
//! Reads JSON-RPC requests from stdin, writes responses to stdout.

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sizeunits_core::{Change, Decimal, Dimension, UnitCatalog};
use std::io::{self, BufRead, Write};

use crate::convert;

/// JSON-RPC 2.0 request
#[derive(Deserialize)]
struct Request {
    jsonrpc: String,
    method: String,
    #[serde(default)]
    params: Option<serde_json::Value>,
    id: serde_json::Value,
}

/// JSON-RPC 2.0 response
#[derive(Serialize)]
struct Response {
    jsonrpc: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<RpcError>,
    id: serde_json::Value,
}

/// JSON-RPC error object
#[derive(Serialize)]
struct RpcError {
    code: i32,
    message: String,
}

#[derive(Deserialize)]
struct ParseParams {
    dimension: String,
    text: String,
}

#[derive(Deserialize)]
struct FormatParams {
    dimension: String,
    value: Decimal,
    #[serde(default)]
    spec: String,
}

#[derive(Deserialize)]
struct ConvertParams {
    dimension: String,
    text: String,
    #[serde(default)]
    spec: String,
}

#[derive(Deserialize)]
struct GoodUnitParams {
    dimension: String,
    text: String,
    system: String,
    #[serde(default)]
    spec: String,
}

#[derive(Deserialize)]
struct ChangeParams {
    text: String,
}

// JSON-RPC error codes
const PARSE_ERROR: i32 = -32700;
const INVALID_REQUEST: i32 = -32600;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;
/// Input text or value the engine rejected
const UNIT_ERROR: i32 = -32000;

impl Response {
    fn success(id: serde_json::Value, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0",
            result: Some(result),
            error: None,
            id,
        }
    }

    fn error(id: serde_json::Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
            }),
            id,
        }
    }
}

/// Deserialize method params, or build the error response
fn params<T: for<'de> Deserialize<'de>>(
    id: &serde_json::Value,
    params: Option<serde_json::Value>,
) -> Result<T, Response> {
    match params {
        Some(p) => serde_json::from_value(p)
            .map_err(|e| Response::error(id.clone(), INVALID_PARAMS, format!("Invalid params: {e}"))),
        None => Err(Response::error(id.clone(), INVALID_PARAMS, "Missing params")),
    }
}

fn dimension(id: &serde_json::Value, name: &str) -> Result<Dimension, Response> {
    name.parse()
        .map_err(|e: sizeunits_core::ParseError| Response::error(id.clone(), INVALID_PARAMS, e.to_string()))
}

/// Handle a single JSON-RPC request
fn handle_request(catalog: &UnitCatalog, input: &str) -> Response {
    let request: Request = match serde_json::from_str(input) {
        Ok(r) => r,
        Err(e) => {
            return Response::error(
                serde_json::Value::Null,
                PARSE_ERROR,
                format!("Parse error: {e}"),
            );
        }
    };

    if request.jsonrpc != "2.0" {
        return Response::error(request.id, INVALID_REQUEST, "Invalid JSON-RPC version");
    }

    debug!("rpc {} {:?}", request.method, request.params);
    let id = request.id;
    let handled = match request.method.as_str() {
        "parse" => handle_parse(catalog, &id, request.params),
        "format" => handle_format(catalog, &id, request.params),
        "convert" => handle_convert(catalog, &id, request.params),
        "good_unit" => handle_good_unit(catalog, &id, request.params),
        "parse_change" => handle_parse_change(catalog, &id, request.params),
        _ => {
            return Response::error(
                id,
                METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            )
        }
    };
    match handled {
        Ok(result) => Response::success(id, result),
        Err(response) => response,
    }
}

fn unit_error(id: &serde_json::Value, e: impl ToString) -> Response {
    Response::error(id.clone(), UNIT_ERROR, e.to_string())
}

/// Handle parse method - text to base-unit value
fn handle_parse(
    catalog: &UnitCatalog,
    id: &serde_json::Value,
    raw: Option<serde_json::Value>,
) -> Result<serde_json::Value, Response> {
    let p: ParseParams = params(id, raw)?;
    let dimension = dimension(id, &p.dimension)?;
    let value = convert::parse(dimension, &p.text, catalog).map_err(|e| unit_error(id, e))?;
    Ok(json!({"dimension": dimension.kind(), "value": value}))
}

/// Handle format method - base-unit value to display text
fn handle_format(
    catalog: &UnitCatalog,
    id: &serde_json::Value,
    raw: Option<serde_json::Value>,
) -> Result<serde_json::Value, Response> {
    let p: FormatParams = params(id, raw)?;
    let dimension = dimension(id, &p.dimension)?;
    let formatted =
        convert::format(dimension, p.value, &p.spec, catalog).map_err(|e| unit_error(id, e))?;
    Ok(json!({"formatted": formatted}))
}

/// Handle convert method - parse then format in one call
fn handle_convert(
    catalog: &UnitCatalog,
    id: &serde_json::Value,
    raw: Option<serde_json::Value>,
) -> Result<serde_json::Value, Response> {
    let p: ConvertParams = params(id, raw)?;
    let dimension = dimension(id, &p.dimension)?;
    let value = convert::parse(dimension, &p.text, catalog).map_err(|e| unit_error(id, e))?;
    let formatted = convert::format(dimension, value.clone(), &p.spec, catalog)
        .map_err(|e| unit_error(id, e))?;
    Ok(json!({"value": value, "formatted": formatted}))
}

/// Handle good_unit method - random close unit of a system
fn handle_good_unit(
    catalog: &UnitCatalog,
    id: &serde_json::Value,
    raw: Option<serde_json::Value>,
) -> Result<serde_json::Value, Response> {
    let p: GoodUnitParams = params(id, raw)?;
    let dimension = dimension(id, &p.dimension)?;
    let value = convert::parse(dimension, &p.text, catalog).map_err(|e| unit_error(id, e))?;
    let formatted = convert::good_unit(dimension, value, &p.system, &p.spec, catalog)
        .map_err(|e| unit_error(id, e))?;
    Ok(json!({"formatted": formatted}))
}

/// Handle parse_change method - change expression to its stored form
fn handle_parse_change(
    catalog: &UnitCatalog,
    id: &serde_json::Value,
    raw: Option<serde_json::Value>,
) -> Result<serde_json::Value, Response> {
    let p: ChangeParams = params(id, raw)?;
    let change = Change::parse(&p.text, catalog).map_err(|e| unit_error(id, e))?;
    serde_json::to_value(&change).map_err(|e| unit_error(id, e))
}

/// Run the JSON-RPC server loop
pub fn run_server(catalog: &UnitCatalog) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }

        let response = handle_request(catalog, &line);
        let json = serde_json::to_string(&response)?;
        writeln!(stdout, "{json}")?;
        stdout.flush()?;
    }

    Ok(())
}
