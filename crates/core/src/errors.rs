use std::io;

/// Result type alias for ravel operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for ravel operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Setup-time contract violations (empty middleware chain, bad settings)
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// A component contract requires an attribute the node does not carry
    #[error("element <{tag}> is missing required attribute '{attribute}'")]
    MissingAttribute { tag: String, attribute: String },

    /// An attribute is present but does not parse as the expected type
    #[error("attribute '{attribute}' has invalid value '{value}': {message}")]
    InvalidAttribute {
        attribute: String,
        value: String,
        message: String,
    },

    /// No middleware in the chain handled the node
    #[error("no middleware handled node {node}")]
    UnhandledNode { node: String },

    /// A middleware could not build a renderable for an otherwise handled node
    #[error("translation failed: {message}")]
    Translation { message: String },

    /// A dispatch request was rejected before reaching the framework
    #[error("invalid dispatch: {message}")]
    InvalidDispatch { message: String },

    /// The framework failed while executing a handler
    #[error("dispatch of '{event}' failed: {message}")]
    Dispatch { event: String, message: String },

    /// Terminal read or write failures
    #[error("terminal {operation} failed: {source}")]
    Terminal {
        operation: String,
        #[source]
        source: io::Error,
    },

    /// Encoded payloads carried in attributes that fail to decode
    #[error("invalid payload: {message}")]
    Payload { message: String },

    /// The governing cancellation signal fired
    #[error("operation cancelled")]
    Cancelled,
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Payload {
            message: error.to_string(),
        }
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::Terminal {
            operation: "io".to_string(),
            source: error,
        }
    }
}

// Helper methods for creating errors with context
impl Error {
    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create a missing attribute error
    #[must_use]
    pub fn missing_attribute(tag: impl Into<String>, attribute: impl Into<String>) -> Self {
        Error::MissingAttribute {
            tag: tag.into(),
            attribute: attribute.into(),
        }
    }

    /// Create an invalid attribute error
    #[must_use]
    pub fn invalid_attribute(
        attribute: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Error::InvalidAttribute {
            attribute: attribute.into(),
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create an unhandled node error from a short node description
    #[must_use]
    pub fn unhandled_node(node: impl Into<String>) -> Self {
        Error::UnhandledNode { node: node.into() }
    }

    /// Create a translation error
    #[must_use]
    pub fn translation(message: impl Into<String>) -> Self {
        Error::Translation {
            message: message.into(),
        }
    }

    /// Create an invalid dispatch error
    #[must_use]
    pub fn invalid_dispatch(message: impl Into<String>) -> Self {
        Error::InvalidDispatch {
            message: message.into(),
        }
    }

    /// Create a dispatch error for the given event name
    #[must_use]
    pub fn dispatch(event: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Dispatch {
            event: event.into(),
            message: message.into(),
        }
    }

    /// Create a terminal error with context
    #[must_use]
    pub fn terminal(operation: impl Into<String>, source: io::Error) -> Self {
        Error::Terminal {
            operation: operation.into(),
            source,
        }
    }

    /// Create a payload error
    #[must_use]
    pub fn payload(message: impl Into<String>) -> Self {
        Error::Payload {
            message: message.into(),
        }
    }

    /// Whether this error carries the cancellation signal and must be re-raised
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }

    /// Whether a terminal failure is worth retrying.
    ///
    /// A closed input stream ends the input loop; anything else the operating
    /// system reports is treated as transient.
    pub fn is_transient_io(&self) -> bool {
        match self {
            Error::Terminal { source, .. } => !matches!(
                source.kind(),
                io::ErrorKind::UnexpectedEof
                    | io::ErrorKind::BrokenPipe
                    | io::ErrorKind::ConnectionReset
                    | io::ErrorKind::NotConnected
            ),
            _ => false,
        }
    }
}
