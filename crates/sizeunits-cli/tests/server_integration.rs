//! Integration tests for JSON-RPC server mode
//!
//! These tests drive the built binary the way a chat bot would: one
//! long-lived server, many small requests.

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

/// Helper to send a JSON-RPC request and get response
fn send_request(stdin: &mut impl Write, stdout: &mut impl BufRead, request: Value) -> Value {
    writeln!(stdin, "{}", request).unwrap();
    stdin.flush().unwrap();

    let mut response = String::new();
    stdout.read_line(&mut response).unwrap();
    serde_json::from_str(&response).unwrap()
}

/// Helper to create a request
fn request(method: &str, params: Value, id: u32) -> Value {
    json!({
        "jsonrpc": "2.0",
        "method": method,
        "params": params,
        "id": id
    })
}

/// Helper to extract result from response
fn get_result(response: &Value) -> &Value {
    response.get("result").expect("expected result in response")
}

/// Helper to extract error code from response
fn get_error_code(response: &Value) -> i64 {
    response
        .get("error")
        .and_then(|e| e.get("code"))
        .and_then(|c| c.as_i64())
        .expect("expected error in response")
}

/// Spawn server process
fn spawn_server() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_sizeunits"))
        .arg("--server")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to spawn server");
    let stdin = child.stdin.take().unwrap();
    let stdout = BufReader::new(child.stdout.take().unwrap());
    (child, stdin, stdout)
}

#[test]
fn test_parse_each_dimension() {
    let (mut child, mut stdin, mut stdout) = spawn_server();

    let cases = [
        ("size", "5ft8in", "1.7272"),
        ("size", "1,000 km", "1000000"),
        ("weight", "2 kg", "2000"),
        ("time", "2 hours", "7200"),
        ("size", "infinity", "∞"),
        ("weight", "no", "0"),
    ];
    for (i, (dimension, text, value)) in cases.iter().enumerate() {
        let response = send_request(
            &mut stdin,
            &mut stdout,
            request("parse", json!({"dimension": dimension, "text": text}), i as u32),
        );
        assert_eq!(
            get_result(&response),
            &json!({"dimension": dimension, "value": value}),
            "{text}"
        );
        assert_eq!(response["id"], i);
    }

    drop(stdin);
    child.wait().unwrap();
}

#[test]
fn test_format_from_value() {
    let (mut child, mut stdin, mut stdout) = spawn_server();

    let response = send_request(
        &mut stdin,
        &mut stdout,
        request(
            "format",
            json!({"dimension": "size", "value": "1000000", "spec": "M"}),
            1,
        ),
    );
    assert_eq!(get_result(&response)["formatted"], "1 megameter");

    // Numbers are accepted as well as strings
    let response = send_request(
        &mut stdin,
        &mut stdout,
        request("format", json!({"dimension": "time", "value": 5400, "spec": "m"}), 2),
    );
    assert_eq!(get_result(&response)["formatted"], "1.5h");

    drop(stdin);
    child.wait().unwrap();
}

#[test]
fn test_convert_multi_system() {
    let (mut child, mut stdin, mut stdout) = spawn_server();

    let response = send_request(
        &mut stdin,
        &mut stdout,
        request(
            "convert",
            json!({"dimension": "weight", "text": "2 lb", "spec": ",.2mu"}),
            1,
        ),
    );
    assert_eq!(get_result(&response)["formatted"], "907.18g / 2lb");

    let response = send_request(
        &mut stdin,
        &mut stdout,
        request("convert", json!({"dimension": "size", "text": "5'8\"", "spec": "u"}), 2),
    );
    assert_eq!(get_result(&response)["formatted"], "5'8\"");

    drop(stdin);
    child.wait().unwrap();
}

#[test]
fn test_good_unit_picks_close_object() {
    let (mut child, mut stdin, mut stdout) = spawn_server();

    for id in 0..5 {
        let response = send_request(
            &mut stdin,
            &mut stdout,
            request(
                "good_unit",
                json!({"dimension": "size", "text": "2m", "system": "o"}),
                id,
            ),
        );
        let formatted = get_result(&response)["formatted"].as_str().unwrap().to_string();
        assert!(
            formatted == "2 guitars" || formatted == "0.99 doors",
            "{formatted}"
        );
    }

    drop(stdin);
    child.wait().unwrap();
}

#[test]
fn test_parse_change_shapes() {
    let (mut child, mut stdin, mut stdout) = spawn_server();

    let response = send_request(
        &mut stdin,
        &mut stdout,
        request("parse_change", json!({"text": "2m/3s until 12m"}), 1),
    );
    let result = get_result(&response);
    assert_eq!(result["stoptype"], "SV");
    assert_eq!(result["stop"], "12");
    assert_eq!(result["rate"]["time"], "3");
    assert_eq!(result["rate"]["diff"]["changetype"], "add");
    assert_eq!(result["rate"]["diff"]["amount"], "2");

    let response = send_request(
        &mut stdin,
        &mut stdout,
        request("parse_change", json!({"text": "x2"}), 2),
    );
    let result = get_result(&response);
    assert_eq!(result["changetype"], "multiply");
    assert_eq!(result["amount"], "2");

    drop(stdin);
    child.wait().unwrap();
}

#[test]
fn test_errors() {
    let (mut child, mut stdin, mut stdout) = spawn_server();

    // Unrecognized value keeps the engine's wording
    let response = send_request(
        &mut stdin,
        &mut stdout,
        request("parse", json!({"dimension": "size", "text": "five bananas and a bit"}), 1),
    );
    assert_eq!(get_error_code(&response), -32000);
    assert_eq!(
        response["error"]["message"],
        "'five bananas and a bit' is an unrecognized size value."
    );

    let response = send_request(
        &mut stdin,
        &mut stdout,
        request("parse_change", json!({"text": "banana"}), 2),
    );
    assert_eq!(get_error_code(&response), -32000);
    assert_eq!(response["error"]["message"], "Could not parse banana into a Diff.");

    let response = send_request(
        &mut stdin,
        &mut stdout,
        request("good_unit", json!({"dimension": "size", "text": "2m", "system": "q"}), 3),
    );
    assert_eq!(get_error_code(&response), -32000);

    // Missing params
    let response = send_request(
        &mut stdin,
        &mut stdout,
        json!({"jsonrpc": "2.0", "method": "parse", "id": 4}),
    );
    assert_eq!(get_error_code(&response), -32602);

    // Wrong params shape
    let response = send_request(
        &mut stdin,
        &mut stdout,
        request("convert", json!({"text": 5}), 5),
    );
    assert_eq!(get_error_code(&response), -32602);

    let response = send_request(&mut stdin, &mut stdout, request("explode", json!({}), 6));
    assert_eq!(get_error_code(&response), -32601);

    writeln!(stdin, "not json").unwrap();
    stdin.flush().unwrap();
    let mut line = String::new();
    stdout.read_line(&mut line).unwrap();
    let response: Value = serde_json::from_str(&line).unwrap();
    assert_eq!(get_error_code(&response), -32700);
    assert_eq!(response["id"], Value::Null);

    // Server survives every error above
    let response = send_request(
        &mut stdin,
        &mut stdout,
        request("parse", json!({"dimension": "time", "text": "1 day"}), 7),
    );
    assert_eq!(get_result(&response)["value"], "86400");

    drop(stdin);
    child.wait().unwrap();
}

#[test]
fn test_single_input_mode() {
    let output = Command::new(env!("CARGO_BIN_EXE_sizeunits"))
        .args(["-d", "size", "-s", "m", "1,000,000m"])
        .output()
        .expect("failed to run");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "1Mm");

    let output = Command::new(env!("CARGO_BIN_EXE_sizeunits"))
        .args(["-d", "weight", "5 parsecs"])
        .output()
        .expect("failed to run");
    assert!(!output.status.success());
}

#[test]
fn test_pipe_mode() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_sizeunits"))
        .args(["-q", "-s", "u"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to spawn");
    {
        let mut stdin = child.stdin.take().unwrap();
        writeln!(stdin, "5ft8in").unwrap();
        writeln!(stdin).unwrap();
        writeln!(stdin, "not a size").unwrap();
        writeln!(stdin, "1 mile").unwrap();
    }
    let output = child.wait_with_output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["5'8\"", "1mi"]);
}
