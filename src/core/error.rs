use thiserror::Error;

/// Failures the dispatcher recovers into `{"error": ...}` responses.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Unknown message type: {0}")]
    UnknownMessageType(String),
    #[error("Tool not found: {0}")]
    ToolNotFound(String),
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("arguments must be an object")]
    ArgumentsNotObject,
    #[error("{0}")]
    Handler(#[from] ToolError),
}

/// Registration-time failures. Raised while the server is being assembled.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("tool already registered: {0}")]
    DuplicateTool(String),
    #[error("resource already registered: {0}")]
    DuplicateResource(String),
}

/// Faults raised by tool and resource handlers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ToolError {
    #[error("missing required argument: {0}")]
    MissingArgument(String),
    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),
    #[error("argument '{name}' must be {expected}")]
    InvalidArgument { name: String, expected: &'static str },
    #[error("{0}")]
    Message(String),
}

impl From<anyhow::Error> for ToolError {
    fn from(e: anyhow::Error) -> Self {
        ToolError::Message(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_misses_render_like_the_wire_format() {
        assert_eq!(
            DispatchError::ToolNotFound("missing".into()).to_string(),
            "Tool not found: missing"
        );
        assert_eq!(
            DispatchError::ResourceNotFound("db://x".into()).to_string(),
            "Resource not found: db://x"
        );
        assert_eq!(
            DispatchError::UnknownMessageType("bogus".into()).to_string(),
            "Unknown message type: bogus"
        );
    }

    #[test]
    fn handler_error_displays_bare_message() {
        let e: DispatchError = ToolError::Message("boom".into()).into();
        assert_eq!(e.to_string(), "boom");
    }

    #[test]
    fn it_converts_from_anyhow() {
        let any: anyhow::Error = anyhow::anyhow!("nope");
        let te: ToolError = any.into();
        assert_eq!(te.to_string(), "nope");
    }

    #[test]
    fn invalid_argument_names_the_expected_type() {
        let e = ToolError::InvalidArgument { name: "sql".into(), expected: "a string" };
        assert_eq!(e.to_string(), "argument 'sql' must be a string");
    }
}
