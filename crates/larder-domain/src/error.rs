//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error used as an optional cause
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for the Larder resource registry
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (simple form)
    #[error("I/O error: {source}")]
    IoSimple {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// I/O operation error (with context)
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// A configuration source could not be parsed into resource definitions
    #[error("Cannot parse source {source_key}: {message}")]
    Parse {
        /// Key of the offending source
        source_key: String,
        /// What was wrong with the document
        message: String,
        /// Optional syntax error
        #[source]
        source: Option<BoxError>,
    },

    /// A resource failed to initialize
    #[error("Cannot initialize resource '{name}' of type '{type_tag}': {message}")]
    Initialization {
        /// Name of the resource
        name: String,
        /// Type tag of the resource
        type_tag: String,
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// No constructor is registered for a type tag
    #[error("Unknown resource type '{type_tag}'. Available types: {available:?}")]
    UnknownResourceType {
        /// The requested type tag
        type_tag: String,
        /// Registered type tags
        available: Vec<String>,
    },

    /// A constructor is already registered for a type tag
    #[error("Resource type '{type_tag}' is already registered")]
    DuplicateResourceType {
        /// The duplicated type tag
        type_tag: String,
    },

    /// The registry was started twice
    #[error("Resource registry already started")]
    AlreadyStarted,

    /// The registry has been closed and accepts no more updates
    #[error("Resource registry is closed")]
    RegistryClosed,

    /// Resource not found error
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// A resource exists but is not of the requested type
    #[error("Resource '{name}' is not a {expected}")]
    TypeMismatch {
        /// Name of the resource
        name: String,
        /// Requested Rust type
        expected: &'static str,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },
}

// Basic error creation methods
impl Error {
    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Create an internal error keeping its cause
    pub fn internal_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Internal {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a type mismatch error for a named resource
    pub fn type_mismatch<S: Into<String>>(name: S, expected: &'static str) -> Self {
        Self::TypeMismatch {
            name: name.into(),
            expected,
        }
    }
}

// I/O error creation methods
impl Error {
    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Source parsing error creation methods
impl Error {
    /// Create a parse error for a source
    pub fn parse<K: Into<String>, S: Into<String>>(source_key: K, message: S) -> Self {
        Self::Parse {
            source_key: source_key.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a parse error for a source with the underlying syntax error
    pub fn parse_with_source<K, S, E>(source_key: K, message: S, source: E) -> Self
    where
        K: Into<String>,
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Parse {
            source_key: source_key.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Resource initialization error creation methods
impl Error {
    /// Create an initialization error
    pub fn initialization<N, T, S>(name: N, type_tag: T, message: S) -> Self
    where
        N: Into<String>,
        T: Into<String>,
        S: Into<String>,
    {
        Self::Initialization {
            name: name.into(),
            type_tag: type_tag.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create an initialization error with source
    pub fn initialization_with_source<N, T, S, E>(
        name: N,
        type_tag: T,
        message: S,
        source: E,
    ) -> Self
    where
        N: Into<String>,
        T: Into<String>,
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Initialization {
            name: name.into(),
            type_tag: type_tag.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl Error {
    /// Whether this error is the "not found" outcome of a lookup
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
