use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
    #[serde(default)]
    pub id: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn error(id: Option<Value>, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
                data: None,
            }),
            id,
        }
    }

    pub fn invalid_params(id: Option<Value>, message: impl Into<String>) -> Self {
        Self::error(id, -32602, message)
    }

    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::error(None, -32700, message)
    }

    pub fn method_not_found(id: Option<Value>, method: &str) -> Self {
        Self::error(
            id,
            -32601,
            format!("Method '{method}' is not supported by this server."),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_skips_error_field() {
        let response = RpcResponse::success(Some(json!(1)), json!({"ok": true}));
        let encoded = serde_json::to_string(&response).unwrap();
        assert!(encoded.contains("\"result\""));
        assert!(!encoded.contains("\"error\""));
        assert!(encoded.contains("\"jsonrpc\":\"2.0\""));
    }

    #[test]
    fn test_error_skips_result_field() {
        let response = RpcResponse::method_not_found(Some(json!("a")), "bogus");
        let encoded = serde_json::to_string(&response).unwrap();
        assert!(encoded.contains("-32601"));
        assert!(encoded.contains("bogus"));
        assert!(!encoded.contains("\"result\""));
    }

    #[test]
    fn test_request_without_params_parses() {
        let request: RpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"ping","id":7}"#).unwrap();
        assert_eq!(request.method, "ping");
        assert!(request.params.is_none());
        assert_eq!(request.id, Some(json!(7)));
    }
}
