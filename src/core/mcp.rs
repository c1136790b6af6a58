//! Message surface shared by every transport: requests, responses and the
//! closed set of message types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value as J;

use super::error::DispatchError;
use super::resource::Resource;
use super::tool::Tool;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    Initialize,
    ListTools,
    CallTool,
    ListResources,
    GetResource,
}

impl MessageType {
    pub const ALL: [MessageType; 5] = [
        MessageType::Initialize,
        MessageType::ListTools,
        MessageType::CallTool,
        MessageType::ListResources,
        MessageType::GetResource,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Initialize => "initialize",
            MessageType::ListTools => "tools/list",
            MessageType::CallTool => "tools/call",
            MessageType::ListResources => "resources/list",
            MessageType::GetResource => "resources/get",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "initialize" => Ok(MessageType::Initialize),
            "tools/list" => Ok(MessageType::ListTools),
            "tools/call" => Ok(MessageType::CallTool),
            "resources/list" => Ok(MessageType::ListResources),
            "resources/get" => Ok(MessageType::GetResource),
            other => Err(DispatchError::UnknownMessageType(other.to_string())),
        }
    }
}

/// Incoming request. Addressing fields stay raw JSON so a tag or key of the
/// wrong type is reported back as a lookup miss instead of failing decoding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Request {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<J>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<J>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<J>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<J>,
}

impl Request {
    pub fn new(kind: MessageType) -> Self {
        Self { kind: Some(J::from(kind.as_str())), ..Self::default() }
    }

    pub fn call_tool(name: impl Into<String>, arguments: J) -> Self {
        Self {
            tool_name: Some(J::String(name.into())),
            arguments: Some(arguments),
            ..Self::new(MessageType::CallTool)
        }
    }

    pub fn get_resource(uri: impl Into<String>) -> Self {
        Self { uri: Some(J::String(uri.into())), ..Self::new(MessageType::GetResource) }
    }

    pub fn message_type(&self) -> Result<MessageType, DispatchError> {
        match self.kind.as_ref().and_then(J::as_str) {
            Some(tag) => tag.parse(),
            None => Err(DispatchError::UnknownMessageType(label(self.kind.as_ref()))),
        }
    }
}

/// Text for a request field in error messages: strings verbatim, anything
/// else (including an absent field) in its JSON form.
pub(crate) fn label(field: Option<&J>) -> String {
    match field {
        Some(J::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "null".to_string(),
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

/// Successful reply, tagged by `type`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reply {
    InitializeResponse { server: ServerInfo },
    ToolsResponse { tools: Vec<Tool> },
    ToolResponse { content: J },
    ResourcesResponse { resources: Vec<Resource> },
    ResourceResponse { uri: String, content: J },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Response {
    Ok(Reply),
    Error { error: String },
}

impl Response {
    pub fn error(message: impl Into<String>) -> Self {
        Response::Error { error: message.into() }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error { .. })
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Response::Error { error } => Some(error),
            Response::Ok(_) => None,
        }
    }

    pub fn to_json(&self) -> J {
        serde_json::to_value(self).unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() }))
    }
}

impl From<Reply> for Response {
    fn from(r: Reply) -> Self {
        Response::Ok(r)
    }
}

impl From<DispatchError> for Response {
    fn from(e: DispatchError) -> Self {
        Response::error(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_types_round_trip_through_their_tags() {
        for t in MessageType::ALL {
            assert_eq!(t.as_str().parse::<MessageType>().unwrap(), t);
        }
        let err = "tools.call".parse::<MessageType>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown message type: tools.call");
    }

    #[test]
    fn unknown_tag_is_reported_verbatim() {
        let err = "tools/delete".parse::<MessageType>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown message type: tools/delete");
    }

    #[test]
    fn request_without_type_is_unknown_null() {
        let req: Request = serde_json::from_value(json!({})).unwrap();
        let err = req.message_type().unwrap_err();
        assert_eq!(err.to_string(), "Unknown message type: null");
    }

    #[test]
    fn non_string_tag_is_unknown_in_its_json_form() {
        let req: Request = serde_json::from_value(json!({"type": 5})).unwrap();
        assert_eq!(req.message_type().unwrap_err().to_string(), "Unknown message type: 5");
        let req: Request = serde_json::from_value(json!({"type": ["initialize"]})).unwrap();
        assert_eq!(
            req.message_type().unwrap_err().to_string(),
            r#"Unknown message type: ["initialize"]"#
        );
    }

    #[test]
    fn request_deserializes_optional_fields() {
        let req: Request = serde_json::from_value(json!({
            "type": "tools/call",
            "tool_name": "echo",
            "arguments": {"text": "hi"},
            "extra": true
        }))
        .unwrap();
        assert_eq!(req.tool_name, Some(json!("echo")));
        assert_eq!(req.arguments, Some(json!({"text": "hi"})));
        assert!(req.uri.is_none());
    }

    #[test]
    fn replies_serialize_with_snake_case_type_tags() {
        let r: Response = Reply::ToolResponse { content: json!("hi") }.into();
        assert_eq!(r.to_json(), json!({"type": "tool_response", "content": "hi"}));

        let init: Response = Reply::InitializeResponse {
            server: ServerInfo { name: "gw".into(), version: "0.1".into() },
        }
        .into();
        assert_eq!(
            init.to_json(),
            json!({"type": "initialize_response", "server": {"name": "gw", "version": "0.1"}})
        );
    }

    #[test]
    fn error_response_is_a_bare_error_object() {
        let r: Response = DispatchError::ToolNotFound("missing".into()).into();
        assert!(r.is_error());
        assert_eq!(r.to_json(), json!({"error": "Tool not found: missing"}));
    }

    #[test]
    fn responses_deserialize_back_into_the_right_variant() {
        let ok: Response = serde_json::from_value(json!({"type": "tool_response", "content": 1})).unwrap();
        assert_eq!(ok, Response::Ok(Reply::ToolResponse { content: json!(1) }));
        let err: Response = serde_json::from_value(json!({"error": "x"})).unwrap();
        assert_eq!(err.error_message(), Some("x"));
    }
}
