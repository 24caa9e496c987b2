//! Vela data in Rust code. A [`Value`] is the boundary representation of everything that can
//! cross between Rust and the Vela environment.

use std::fmt;

use crate::{
    array::ArrayRef,
    class::Class,
    convert::unbox::Unbox,
    error::VelarsResult,
    function::Function,
    instance::Instance,
    list::List,
};

/// The type of a [`Value`], used by declared signatures and conversion diagnostics.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TypeTag {
    Nothing,
    Bool,
    Int,
    Float,
    Str,
    List,
    Array,
    Class,
    Instance,
    Function,
    Any,
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TypeTag::Nothing => f.write_str("Nothing"),
            TypeTag::Bool => f.write_str("Bool"),
            TypeTag::Int => f.write_str("Int64"),
            TypeTag::Float => f.write_str("Float64"),
            TypeTag::Str => f.write_str("String"),
            TypeTag::List => f.write_str("List"),
            TypeTag::Array => f.write_str("Array"),
            TypeTag::Class => f.write_str("Class"),
            TypeTag::Instance => f.write_str("Instance"),
            TypeTag::Function => f.write_str("Function"),
            TypeTag::Any => f.write_str("Any"),
        }
    }
}

/// A value that can cross the boundary in either direction.
///
/// Scalars are stored inline. Lists, arrays, and instances are shared handles: cloning a
/// `Value` clones the handle, not the data, so mutation through one handle is visible
/// through every handle referencing the same data.
#[derive(Clone, Debug)]
pub enum Value {
    /// The absence of a value, `nothing`.
    Nothing,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(List),
    Array(ArrayRef),
    Class(Class),
    Instance(Instance),
    Function(Function),
}

impl Value {
    /// The name of this value's type on the Vela side.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nothing => "Nothing",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int64",
            Value::Float(_) => "Float64",
            Value::Str(_) => "String",
            Value::List(_) => "List",
            Value::Array(_) => "Array",
            Value::Class(_) => "Class",
            Value::Instance(instance) => instance.class_name().as_str(),
            Value::Function(_) => "Function",
        }
    }

    /// The [`TypeTag`] of this value.
    pub fn tag(&self) -> TypeTag {
        match self {
            Value::Nothing => TypeTag::Nothing,
            Value::Bool(_) => TypeTag::Bool,
            Value::Int(_) => TypeTag::Int,
            Value::Float(_) => TypeTag::Float,
            Value::Str(_) => TypeTag::Str,
            Value::List(_) => TypeTag::List,
            Value::Array(_) => TypeTag::Array,
            Value::Class(_) => TypeTag::Class,
            Value::Instance(_) => TypeTag::Instance,
            Value::Function(_) => TypeTag::Function,
        }
    }

    /// Returns true if this value is `nothing`.
    pub fn is_nothing(&self) -> bool {
        matches!(self, Value::Nothing)
    }

    /// Convert this value back to native data.
    ///
    /// Returns a `ConversionError` if `T` has no defined mapping for this value.
    pub fn unbox<T: Unbox>(&self) -> VelarsResult<T> {
        T::unbox(self)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Nothing => f.write_str("nothing"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::Str(s) => f.write_str(s),
            Value::List(list) => fmt::Display::fmt(list, f),
            Value::Array(array) => fmt::Display::fmt(array, f),
            Value::Class(class) => write!(f, "<class {}>", class.name()),
            Value::Instance(instance) => write!(f, "<{} object>", instance.class_name()),
            Value::Function(function) => write!(f, "<function {}>", function.name()),
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Nothing
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<List> for Value {
    fn from(value: List) -> Self {
        Value::List(value)
    }
}

impl From<ArrayRef> for Value {
    fn from(value: ArrayRef) -> Self {
        Value::Array(value)
    }
}

impl From<Class> for Value {
    fn from(value: Class) -> Self {
        Value::Class(value)
    }
}

impl From<Instance> for Value {
    fn from(value: Instance) -> Self {
        Value::Instance(value)
    }
}

impl From<Function> for Value {
    fn from(value: Function) -> Self {
        Value::Function(value)
    }
}
