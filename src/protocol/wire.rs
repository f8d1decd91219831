//! Wire document exchanged between a registering plugin and the bootstrapping parent.
//!
//! The child writes exactly one JSON object to standard output:
//!
//! ```json
//! {"version":1,"letter":"T","long":"time","description":"Time tracking",
//!  "script":"/plugins/time.sh",
//!  "flags":[{"short":"o","long":"offline","description":"Offline mode"}],
//!  "sub_contexts":{"O":{"letter":"O", ...}}}
//! ```

use crate::context::ContextNode;
use crate::error::WshError;
use serde_json::Value;

pub const PROTOCOL_VERSION: u64 = 1;

/// Serialize a context tree as a single-line self-description document.
pub fn encode(node: &ContextNode) -> Result<String, WshError> {
    let mut value = serde_json::to_value(node)?;
    if let Value::Object(map) = &mut value {
        map.insert("version".to_string(), Value::from(PROTOCOL_VERSION));
    }
    Ok(serde_json::to_string(&value)?)
}

/// Parse and validate a self-description document captured from a plugin.
///
/// Anything besides a single JSON object (plus surrounding whitespace) is rejected.
pub fn decode(output: &str) -> Result<ContextNode, WshError> {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        return Err(WshError::Protocol("plugin produced no output".to_string()));
    }

    let value: Value = serde_json::from_str(trimmed)
        .map_err(|e| WshError::Protocol(format!("failed to parse plugin output: {}", e)))?;

    let version = match value.get("version") {
        None => PROTOCOL_VERSION,
        Some(v) => v.as_u64().ok_or_else(|| {
            WshError::Protocol(format!("invalid protocol version: {}", v))
        })?,
    };
    if version != PROTOCOL_VERSION {
        return Err(WshError::Protocol(format!(
            "unsupported protocol version {} (expected {})",
            version, PROTOCOL_VERSION
        )));
    }

    let node: ContextNode = serde_json::from_value(value)
        .map_err(|e| WshError::Protocol(format!("invalid context document: {}", e)))?;
    node.validate()
        .map_err(|e| WshError::Protocol(format!("invalid context document: {}", e)))?;
    Ok(node)
}
