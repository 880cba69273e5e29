//! Error types for valstore
//!
//! Errors are structured: a kind, the config path being resolved when the
//! error happened, an optional cause and an actionable help message.

use std::fmt;

/// Result type alias for valstore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for valstore operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// The kind of error that occurred
    pub kind: ErrorKind,
    /// Config path of the field being resolved (e.g., "service.port")
    pub path: Option<String>,
    /// Actionable help message
    pub help: Option<String>,
    /// Underlying cause (as string for Clone compatibility)
    pub cause: Option<String>,
}

/// Categories of errors that can occur
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Error parsing YAML/JSON
    Parse,
    /// The reference resolver failed
    Resolver(ResolverErrorKind),
    /// The resolver produced a value the target type does not accept
    TypeMismatch { expected: String, got: String },
    /// I/O error (file not readable, etc.)
    Io,
}

/// Specific resolver error categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolverErrorKind {
    /// Referenced object does not exist
    NotFound { resource: String },
    /// No resolver handles the referenced object kind
    UnknownResolver { name: String },
    /// Resolver already registered
    AlreadyRegistered { name: String },
    /// The caller cancelled the resolution
    Cancelled,
    /// The caller's deadline passed before the resolver finished
    DeadlineExceeded,
    /// Resolver returned an error
    Custom { resolver: String, message: String },
}

impl Error {
    fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            path: None,
            help: None,
            cause: None,
        }
    }

    /// Create a new parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self {
            cause: Some(message.into()),
            ..Self::new(ErrorKind::Parse)
        }
    }

    /// Create an I/O error
    pub fn io(file: impl Into<String>, message: impl Into<String>) -> Self {
        let file = file.into();
        Self {
            help: Some(format!("Check that '{}' exists and is readable", file)),
            cause: Some(message.into()),
            ..Self::new(ErrorKind::Io)
        }
    }

    /// Create a not found error for a referenced object
    pub fn not_found(resource: impl Into<String>, config_path: Option<String>) -> Self {
        let resource = resource.into();
        Self {
            path: config_path,
            help: Some(format!(
                "Check that '{}' exists in the object graph",
                resource
            )),
            ..Self::new(ErrorKind::Resolver(ResolverErrorKind::NotFound { resource }))
        }
    }

    /// Create an unknown resolver error
    pub fn unknown_resolver(name: impl Into<String>, config_path: Option<String>) -> Self {
        let name = name.into();
        Self {
            path: config_path,
            help: Some(format!(
                "Register a resolver for kind '{}' or set a default resolver",
                name
            )),
            ..Self::new(ErrorKind::Resolver(ResolverErrorKind::UnknownResolver { name }))
        }
    }

    /// Create a resolver already registered error
    pub fn resolver_already_registered(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            help: Some(format!(
                "Use register_with_force(..., true) to override the '{}' resolver",
                name
            )),
            ..Self::new(ErrorKind::Resolver(ResolverErrorKind::AlreadyRegistered { name }))
        }
    }

    /// Create a cancellation error
    pub fn cancelled(config_path: Option<String>) -> Self {
        Self {
            path: config_path,
            ..Self::new(ErrorKind::Resolver(ResolverErrorKind::Cancelled))
        }
    }

    /// Create a deadline exceeded error
    pub fn deadline_exceeded(config_path: Option<String>) -> Self {
        Self {
            path: config_path,
            help: Some("Increase the resolution timeout or check resolver latency".into()),
            ..Self::new(ErrorKind::Resolver(ResolverErrorKind::DeadlineExceeded))
        }
    }

    /// Create a custom resolver error
    pub fn resolver_custom(resolver: impl Into<String>, message: impl Into<String>) -> Self {
        let resolver = resolver.into();
        Self {
            help: Some(format!("Check the '{}' resolver implementation", resolver)),
            ..Self::new(ErrorKind::Resolver(ResolverErrorKind::Custom {
                resolver,
                message: message.into(),
            }))
        }
    }

    /// Create a type mismatch error naming the unexpected runtime type
    pub fn type_mismatch(expected: impl Into<String>, got: impl Into<String>) -> Self {
        let expected = expected.into();
        Self {
            help: Some(format!(
                "Point the reference at a field holding {}",
                expected
            )),
            ..Self::new(ErrorKind::TypeMismatch {
                expected,
                got: got.into(),
            })
        }
    }

    /// Add path context to the error
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add help message to the error
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Whether this error came from the reference resolver
    pub fn is_resolver_failure(&self) -> bool {
        matches!(self.kind, ErrorKind::Resolver(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::Parse => write!(f, "Parse error")?,
            ErrorKind::Io => write!(f, "I/O error")?,
            ErrorKind::TypeMismatch { expected, got } => {
                write!(f, "Type mismatch: expected {}, got {}", expected, got)?
            }
            ErrorKind::Resolver(r) => match r {
                ResolverErrorKind::NotFound { resource } => {
                    write!(f, "Referenced object not found: {}", resource)?
                }
                ResolverErrorKind::UnknownResolver { name } => {
                    write!(f, "No resolver for kind: {}", name)?
                }
                ResolverErrorKind::AlreadyRegistered { name } => {
                    write!(f, "Resolver '{}' is already registered", name)?
                }
                ResolverErrorKind::Cancelled => write!(f, "Resolution cancelled")?,
                ResolverErrorKind::DeadlineExceeded => write!(f, "Resolution deadline exceeded")?,
                ResolverErrorKind::Custom { resolver, message } => {
                    write!(f, "Resolver '{}' error: {}", resolver, message)?
                }
            },
        }

        if let Some(path) = &self.path {
            write!(f, "\n  Path: {}", path)?;
        }

        if let Some(cause) = &self.cause {
            write!(f, "\n  {}", cause)?;
        }

        if let Some(help) = &self.help {
            write!(f, "\n  Help: {}", help)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {}
