//! Everything related to errors.

use std::{error::Error as StdErr, fmt, sync::Arc};

use thiserror::Error;

/// Alias that is used for most `Result`s in this crate.
pub type VelarsResult<T> = Result<T, Box<VelarsError>>;

/// Runtime errors.
#[derive(Debug, Error, Clone)]
pub enum RuntimeError {
    #[error("an interpreter is already active in this process")]
    AlreadyActive,
}

/// Registration errors.
///
/// These errors are fatal to a module load: when one is returned the environment is left
/// exactly as it was before the load started.
#[derive(Debug, Error, Clone)]
pub enum RegistrationError {
    #[error("{name} is registered twice in module {module}")]
    DuplicateRegistration { module: String, name: String },
    #[error("a module named {module} already exists")]
    DuplicateModule { module: String },
    #[error("{type_name} is already registered as {registered_as}")]
    TypeAlreadyRegistered {
        type_name: String,
        registered_as: String,
    },
}

/// Type errors.
#[derive(Debug, Error, Clone)]
pub enum TypeError {
    #[error("expected a function, {name} is a {ty}")]
    NotAFunction { name: String, ty: String },
    #[error("expected a class, {name} is a {ty}")]
    NotAClass { name: String, ty: String },
    #[error("{class} has no constructor")]
    NotConstructible { class: String },
}

/// Call errors.
#[derive(Debug, Error, Clone)]
pub enum CallError {
    #[error("{callable} expects {expected} argument(s), got {got}")]
    ArgumentMismatch {
        callable: String,
        expected: usize,
        got: usize,
    },
    #[error("a {ty} is not callable")]
    NotCallable { ty: String },
}

/// Conversion errors.
#[derive(Debug, Error, Clone)]
pub enum ConversionError {
    #[error("cannot convert {from} to {to}")]
    Unsupported { from: String, to: String },
    #[error("expected a shape for {expected} elements, got data for {got}")]
    SizeMismatch { expected: usize, got: usize },
    #[error("{value} is out of range for {to}")]
    OutOfRange { value: String, to: String },
}

/// Data access errors.
#[derive(Debug, Error, Clone)]
pub enum AccessError {
    #[error("no value named {name} in {module}")]
    GlobalNotFound { name: String, module: String },
    #[error("module named {module} not found")]
    ModuleNotFound { module: String },
    #[error("index {idx} is out of bounds for length {len}")]
    OutOfBounds { idx: usize, len: usize },
}

/// The class of a Vela exception.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptionKind {
    TypeError,
    ArgumentError,
    DomainError,
    AttributeError,
    BorrowError,
    NativeError,
}

impl fmt::Display for ExceptionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExceptionKind::TypeError => f.write_str("TypeError"),
            ExceptionKind::ArgumentError => f.write_str("ArgumentError"),
            ExceptionKind::DomainError => f.write_str("DomainError"),
            ExceptionKind::AttributeError => f.write_str("AttributeError"),
            ExceptionKind::BorrowError => f.write_str("BorrowError"),
            ExceptionKind::NativeError => f.write_str("NativeError"),
        }
    }
}

/// Vela exception converted to a kind and a message.
///
/// Exceptions raised on the Vela side of the boundary are represented by this type, as are
/// native faults that have been caught at the boundary and re-raised. A native fault is
/// always reported with the [`ExceptionKind::NativeError`] kind and carries the original
/// message.
#[derive(Debug, Error, Clone)]
#[error("{kind}: {msg}")]
pub struct Exception {
    kind: ExceptionKind,
    msg: String,
}

impl Exception {
    /// Create a new exception with the given kind and message.
    pub fn new<S: Into<String>>(kind: ExceptionKind, msg: S) -> Self {
        Exception {
            kind,
            msg: msg.into(),
        }
    }

    /// Returns the kind of this exception.
    pub fn kind(&self) -> ExceptionKind {
        self.kind
    }

    /// Returns a reference to the error message.
    pub fn get_message(&self) -> &str {
        &self.msg
    }
}

/// All different errors.
#[derive(Debug, Error, Clone)]
pub enum VelarsError {
    #[error("Other: {0}")]
    Other(Arc<dyn StdErr + 'static + Send + Sync>),
    #[error("Exception: {0}")]
    Exception(Exception),
    #[error("Runtime error: {0}")]
    RuntimeError(RuntimeError),
    #[error("Registration error: {0}")]
    RegistrationError(RegistrationError),
    #[error("Type error: {0}")]
    TypeError(TypeError),
    #[error("Call error: {0}")]
    CallError(CallError),
    #[error("Conversion error: {0}")]
    ConversionError(ConversionError),
    #[error("Access error: {0}")]
    AccessError(AccessError),
}

impl VelarsError {
    /// Convert an arbitrary error to `VelarsError::Other`.
    #[inline]
    pub fn other<E: StdErr + 'static + Send + Sync>(reason: E) -> Self {
        VelarsError::Other(Arc::new(reason))
    }

    /// Convert a kind and a message to `VelarsError::Exception`.
    #[inline]
    pub fn exception<S: Into<String>>(kind: ExceptionKind, msg: S) -> Self {
        VelarsError::Exception(Exception::new(kind, msg))
    }

    /// Convert an arbitrary error to `Err(VelarsError::Other)`.
    #[inline]
    pub fn other_error<T, E: StdErr + 'static + Send + Sync>(reason: E) -> Result<T, Self> {
        Err(Self::other(reason))
    }

    /// Returns the exception if this error is `VelarsError::Exception`.
    pub fn as_exception(&self) -> Option<&Exception> {
        match self {
            VelarsError::Exception(e) => Some(e),
            _ => None,
        }
    }
}

macro_rules! impl_from {
    ($type:ident) => {
        impl From<$type> for VelarsError {
            #[inline]
            fn from(e: $type) -> Self {
                VelarsError::$type(e)
            }
        }

        impl From<$type> for Box<VelarsError> {
            #[inline]
            fn from(e: $type) -> Self {
                Box::new(VelarsError::from(e))
            }
        }
    };
}

impl_from!(Exception);
impl_from!(RuntimeError);
impl_from!(RegistrationError);
impl_from!(TypeError);
impl_from!(CallError);
impl_from!(ConversionError);
impl_from!(AccessError);
