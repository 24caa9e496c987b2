//! Convert data from Vela back to Rust.

use std::{any::Any, convert::TryFrom};

use crate::{
    array::{ArrayRef, NArray},
    class::Class,
    convert::Exposed,
    error::{ConversionError, VelarsResult},
    function::Function,
    instance::Instance,
    list::List,
    value::{TypeTag, Value},
};

/// Trait implemented by types that can be converted from a [`Value`]. Parameters of an
/// exposed function, method, or constructor must implement this trait, arguments are
/// unboxed before the native code runs.
///
/// Unboxing is strict about shape: requesting an `i64` from a `Float64` fails with a
/// `ConversionError`, only the `Int64` to `Float64` direction widens implicitly.
pub trait Unbox: Sized {
    /// The type tag a declared signature reports for this parameter type.
    const TAG: TypeTag;

    /// Convert `value` to native data.
    fn unbox(value: &Value) -> VelarsResult<Self>;
}

#[inline]
fn unsupported<T>(value: &Value, to: TypeTag) -> VelarsResult<T> {
    Err(ConversionError::Unsupported {
        from: value.type_name().to_string(),
        to: to.to_string(),
    })?
}

macro_rules! impl_unbox_int {
    ($type:ty) => {
        impl Unbox for $type {
            const TAG: TypeTag = TypeTag::Int;

            fn unbox(value: &Value) -> VelarsResult<Self> {
                match value {
                    Value::Int(i) => match <$type>::try_from(*i) {
                        Ok(converted) => Ok(converted),
                        Err(_) => Err(ConversionError::OutOfRange {
                            value: i.to_string(),
                            to: std::any::type_name::<$type>().to_string(),
                        })?,
                    },
                    other => unsupported(other, TypeTag::Int),
                }
            }
        }
    };
}

impl_unbox_int!(i8);
impl_unbox_int!(i16);
impl_unbox_int!(i32);
impl_unbox_int!(i64);
impl_unbox_int!(isize);
impl_unbox_int!(u8);
impl_unbox_int!(u16);
impl_unbox_int!(u32);
impl_unbox_int!(u64);
impl_unbox_int!(usize);

impl Unbox for f64 {
    const TAG: TypeTag = TypeTag::Float;

    fn unbox(value: &Value) -> VelarsResult<Self> {
        match value {
            Value::Float(v) => Ok(*v),
            // Int64 widens to Float64, the only implicit numeric conversion.
            Value::Int(i) => Ok(*i as f64),
            other => unsupported(other, TypeTag::Float),
        }
    }
}

impl Unbox for f32 {
    const TAG: TypeTag = TypeTag::Float;

    fn unbox(value: &Value) -> VelarsResult<Self> {
        f64::unbox(value).map(|v| v as f32)
    }
}

impl Unbox for bool {
    const TAG: TypeTag = TypeTag::Bool;

    fn unbox(value: &Value) -> VelarsResult<Self> {
        match value {
            Value::Bool(b) => Ok(*b),
            other => unsupported(other, TypeTag::Bool),
        }
    }
}

impl Unbox for String {
    const TAG: TypeTag = TypeTag::Str;

    fn unbox(value: &Value) -> VelarsResult<Self> {
        match value {
            Value::Str(s) => Ok(s.clone()),
            other => unsupported(other, TypeTag::Str),
        }
    }
}

impl Unbox for () {
    const TAG: TypeTag = TypeTag::Nothing;

    fn unbox(value: &Value) -> VelarsResult<Self> {
        match value {
            Value::Nothing => Ok(()),
            other => unsupported(other, TypeTag::Nothing),
        }
    }
}

impl Unbox for Value {
    const TAG: TypeTag = TypeTag::Any;

    #[inline]
    fn unbox(value: &Value) -> VelarsResult<Self> {
        Ok(value.clone())
    }
}

macro_rules! impl_unbox_handle {
    ($type:ty, $tag:ident) => {
        impl Unbox for $type {
            const TAG: TypeTag = TypeTag::$tag;

            fn unbox(value: &Value) -> VelarsResult<Self> {
                match value {
                    Value::$tag(handle) => Ok(handle.clone()),
                    other => unsupported(other, TypeTag::$tag),
                }
            }
        }
    };
}

impl_unbox_handle!(List, List);
impl_unbox_handle!(ArrayRef, Array);
impl_unbox_handle!(Class, Class);
impl_unbox_handle!(Instance, Instance);
impl_unbox_handle!(Function, Function);

/// An `NArray` parameter copies the argument's data, mutations made by the callee are
/// invisible to the caller. Use [`ArrayRef`] to share the caller's storage instead.
impl Unbox for NArray {
    const TAG: TypeTag = TypeTag::Array;

    fn unbox(value: &Value) -> VelarsResult<Self> {
        match value {
            Value::Array(array) => Ok(array.to_narray()),
            other => unsupported(other, TypeTag::Array),
        }
    }
}

impl<T: Unbox> Unbox for Vec<T> {
    const TAG: TypeTag = TypeTag::List;

    fn unbox(value: &Value) -> VelarsResult<Self> {
        match value {
            Value::List(list) => list.to_vec().iter().map(T::unbox).collect(),
            other => unsupported(other, TypeTag::List),
        }
    }
}

/// Taking `Exposed<T>` as a parameter copies the native value out of the argument's
/// handle, the callee works on its own copy.
impl<T: Any + Clone> Unbox for Exposed<T> {
    const TAG: TypeTag = TypeTag::Instance;

    fn unbox(value: &Value) -> VelarsResult<Self> {
        match value {
            Value::Instance(instance) => {
                let data = instance.borrow::<T>()?;
                Ok(Exposed((*data).clone()))
            }
            other => unsupported(other, TypeTag::Instance),
        }
    }
}
