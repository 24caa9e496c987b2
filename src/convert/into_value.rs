//! Convert data from Rust to Vela.

use std::{
    any::{type_name, Any},
    convert::TryFrom,
};

use crate::{
    array::{ArrayRef, NArray},
    class::Class,
    convert::Exposed,
    error::{ConversionError, VelarsResult},
    function::Function,
    instance::Instance,
    list::List,
    registry,
    value::{TypeTag, Value},
};

/// Trait implemented by types that can be converted to a [`Value`]. Data returned from an
/// exposed function, method, or property getter must implement this trait.
///
/// The conversion is fallible. Unsigned integers that don't fit in Vela's signed integers
/// and [`Exposed`] types that haven't been registered with the active interpreter are
/// rejected with a `ConversionError` rather than converted lossily.
pub trait IntoValue {
    /// The type tag a declared signature reports for this type.
    const TAG: TypeTag;

    /// Convert `self` to a `Value`.
    fn into_value(self) -> VelarsResult<Value>;
}

macro_rules! impl_into_value_int {
    ($type:ty) => {
        impl IntoValue for $type {
            const TAG: TypeTag = TypeTag::Int;

            #[inline]
            fn into_value(self) -> VelarsResult<Value> {
                Ok(Value::Int(self as i64))
            }
        }
    };
}

impl_into_value_int!(i8);
impl_into_value_int!(i16);
impl_into_value_int!(i32);
impl_into_value_int!(i64);
impl_into_value_int!(isize);
impl_into_value_int!(u8);
impl_into_value_int!(u16);
impl_into_value_int!(u32);

macro_rules! impl_into_value_checked_int {
    ($type:ty) => {
        impl IntoValue for $type {
            const TAG: TypeTag = TypeTag::Int;

            #[inline]
            fn into_value(self) -> VelarsResult<Value> {
                match i64::try_from(self) {
                    Ok(converted) => Ok(Value::Int(converted)),
                    Err(_) => Err(ConversionError::OutOfRange {
                        value: self.to_string(),
                        to: TypeTag::Int.to_string(),
                    })?,
                }
            }
        }
    };
}

impl_into_value_checked_int!(u64);
impl_into_value_checked_int!(usize);

macro_rules! impl_into_value_float {
    ($type:ty) => {
        impl IntoValue for $type {
            const TAG: TypeTag = TypeTag::Float;

            #[inline]
            fn into_value(self) -> VelarsResult<Value> {
                Ok(Value::Float(self as f64))
            }
        }
    };
}

impl_into_value_float!(f32);
impl_into_value_float!(f64);

macro_rules! impl_into_value_handle {
    ($type:ty, $tag:ident) => {
        impl IntoValue for $type {
            const TAG: TypeTag = TypeTag::$tag;

            #[inline]
            fn into_value(self) -> VelarsResult<Value> {
                Ok(Value::$tag(self))
            }
        }
    };
}

impl_into_value_handle!(List, List);
impl_into_value_handle!(ArrayRef, Array);
impl_into_value_handle!(Class, Class);
impl_into_value_handle!(Instance, Instance);
impl_into_value_handle!(Function, Function);

impl IntoValue for bool {
    const TAG: TypeTag = TypeTag::Bool;

    #[inline]
    fn into_value(self) -> VelarsResult<Value> {
        Ok(Value::Bool(self))
    }
}

impl IntoValue for () {
    const TAG: TypeTag = TypeTag::Nothing;

    #[inline]
    fn into_value(self) -> VelarsResult<Value> {
        Ok(Value::Nothing)
    }
}

impl IntoValue for String {
    const TAG: TypeTag = TypeTag::Str;

    #[inline]
    fn into_value(self) -> VelarsResult<Value> {
        Ok(Value::Str(self))
    }
}

impl IntoValue for &str {
    const TAG: TypeTag = TypeTag::Str;

    #[inline]
    fn into_value(self) -> VelarsResult<Value> {
        Ok(Value::Str(self.to_string()))
    }
}

impl IntoValue for Value {
    const TAG: TypeTag = TypeTag::Any;

    #[inline]
    fn into_value(self) -> VelarsResult<Value> {
        Ok(self)
    }
}

/// An `NArray` returned by value is moved into a fresh [`ArrayRef`] handle.
impl IntoValue for NArray {
    const TAG: TypeTag = TypeTag::Array;

    #[inline]
    fn into_value(self) -> VelarsResult<Value> {
        Ok(Value::Array(ArrayRef::new(self)))
    }
}

impl<T: IntoValue> IntoValue for Vec<T> {
    const TAG: TypeTag = TypeTag::List;

    fn into_value(self) -> VelarsResult<Value> {
        let elements = self
            .into_iter()
            .map(IntoValue::into_value)
            .collect::<VelarsResult<Vec<Value>>>()?;
        Ok(Value::List(List::from_vec(elements)))
    }
}

/// Returning `Exposed(data)` wraps `data` in a fresh instance of the class `T` was
/// registered as.
impl<T: Any> IntoValue for Exposed<T> {
    const TAG: TypeTag = TypeTag::Instance;

    fn into_value(self) -> VelarsResult<Value> {
        match registry::registered_class::<T>() {
            Some(class) => Ok(Value::Instance(Instance::new(class, Box::new(self.0)))),
            None => Err(ConversionError::Unsupported {
                from: type_name::<T>().to_string(),
                to: String::from("an instance of a registered class"),
            })?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VelarsError;

    #[test]
    fn integers_convert_to_int() {
        assert!(matches!(42i32.into_value().unwrap(), Value::Int(42)));
        assert!(matches!(42u8.into_value().unwrap(), Value::Int(42)));
        assert!(matches!((-7i64).into_value().unwrap(), Value::Int(-7)));
    }

    #[test]
    fn oversized_unsigned_is_rejected() {
        let err = u64::MAX.into_value().unwrap_err();
        assert!(matches!(
            *err,
            VelarsError::ConversionError(ConversionError::OutOfRange { .. })
        ));
    }

    #[test]
    fn floats_convert_to_float() {
        assert!(matches!(2.5f32.into_value().unwrap(), Value::Float(v) if v == 2.5));
        assert!(matches!(2.5f64.into_value().unwrap(), Value::Float(v) if v == 2.5));
    }

    #[test]
    fn vec_converts_to_list() {
        let value = vec![1i64, 2, 3].into_value().unwrap();
        match value {
            Value::List(list) => assert_eq!(list.len(), 3),
            other => panic!("expected a list, got {}", other.type_name()),
        }
    }

    #[test]
    fn unregistered_exposed_type_is_rejected() {
        struct Unregistered;

        let err = Exposed(Unregistered).into_value().unwrap_err();
        assert!(matches!(
            *err,
            VelarsError::ConversionError(ConversionError::Unsupported { .. })
        ));
    }
}
