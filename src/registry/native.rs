//! Native implementations of exposed callables.
//!
//! The traits in this module turn plain Rust functions and closures into the thunks the
//! dispatcher calls. They're implemented for functions of zero to three arguments whose
//! parameters implement [`Unbox`] and whose return type implements [`IntoValue`], in two
//! flavors each: infallible functions that return their result directly, and fallible
//! functions that return a [`VelarsResult`]. Registration methods like
//! [`ModuleBuilder::function`] are generic over these traits, the caller just provides a
//! closure.
//!
//! [`ModuleBuilder::function`]: crate::registry::ModuleBuilder::function

use std::{any::Any, marker::PhantomData};

use smallvec::smallvec;

use crate::{
    class::{CtorThunk, FnThunk, MethodThunk, Signature},
    convert::{into_value::IntoValue, unbox::Unbox},
    error::{ExceptionKind, VelarsError, VelarsResult},
    instance::Instance,
    value::{TypeTag, Value},
};

/// Marker for native callables that return their result directly.
pub struct Plain<R>(PhantomData<R>);

/// Marker for native callables that return a [`VelarsResult`].
pub struct Fallible<R>(PhantomData<R>);

/// A native implementation of a free function with argument tuple `A`.
pub trait NativeFn<A, M> {
    /// The signature resolved from the native parameter and return types.
    fn signature() -> Signature;

    /// Box `self` as a dispatchable thunk.
    fn into_thunk(self) -> FnThunk;
}

/// A native implementation of a constructor for `T` with argument tuple `A`.
pub trait NativeCtor<T, A, M> {
    /// The signature resolved from the native parameter types.
    fn signature() -> Signature;

    /// Box `self` as a dispatchable thunk.
    fn into_thunk(self) -> CtorThunk;
}

/// A native implementation of a method on `T` that takes its receiver by shared
/// reference.
pub trait NativeMethod<T, A, M> {
    /// The signature resolved from the native parameter and return types. The receiver is
    /// not part of the signature.
    fn signature() -> Signature;

    /// Box `self` as a dispatchable thunk.
    fn into_thunk(self) -> MethodThunk;
}

/// A native implementation of a method on `T` that mutates its receiver.
pub trait NativeMethodMut<T, A, M> {
    /// The signature resolved from the native parameter and return types. The receiver is
    /// not part of the signature.
    fn signature() -> Signature;

    /// Box `self` as a dispatchable thunk.
    fn into_thunk(self) -> MethodThunk;
}

/// Faults reported by fallible native code are re-raised as `NativeError` exceptions.
/// An exception is passed through unchanged, native code that has called back into the
/// environment may be propagating a host exception that is already tagged.
pub(crate) fn native_fault(err: Box<VelarsError>) -> Box<VelarsError> {
    if matches!(err.as_ref(), VelarsError::Exception(_)) {
        err
    } else {
        Box::new(VelarsError::exception(
            ExceptionKind::NativeError,
            err.to_string(),
        ))
    }
}

macro_rules! impl_native_callables {
    ($(($idx:tt, $A:ident, $a:ident)),*) => {
        impl<F, R, $($A),*> NativeFn<($($A,)*), Plain<R>> for F
        where
            F: Fn($($A),*) -> R + 'static,
            R: IntoValue,
            $($A: Unbox,)*
        {
            fn signature() -> Signature {
                Signature::new(smallvec![$($A::TAG),*], R::TAG)
            }

            fn into_thunk(self) -> FnThunk {
                Box::new(move |_args: &[Value]| {
                    $(let $a = $A::unbox(&_args[$idx])?;)*
                    (self)($($a),*).into_value()
                })
            }
        }

        impl<F, R, $($A),*> NativeFn<($($A,)*), Fallible<R>> for F
        where
            F: Fn($($A),*) -> VelarsResult<R> + 'static,
            R: IntoValue,
            $($A: Unbox,)*
        {
            fn signature() -> Signature {
                Signature::new(smallvec![$($A::TAG),*], R::TAG)
            }

            fn into_thunk(self) -> FnThunk {
                Box::new(move |_args: &[Value]| {
                    $(let $a = $A::unbox(&_args[$idx])?;)*
                    (self)($($a),*).map_err(native_fault)?.into_value()
                })
            }
        }

        impl<F, T, $($A),*> NativeCtor<T, ($($A,)*), Plain<T>> for F
        where
            F: Fn($($A),*) -> T + 'static,
            T: Any,
            $($A: Unbox,)*
        {
            fn signature() -> Signature {
                Signature::new(smallvec![$($A::TAG),*], TypeTag::Instance)
            }

            fn into_thunk(self) -> CtorThunk {
                Box::new(move |_args: &[Value]| {
                    $(let $a = $A::unbox(&_args[$idx])?;)*
                    Ok(Box::new((self)($($a),*)) as Box<dyn Any>)
                })
            }
        }

        impl<F, T, $($A),*> NativeCtor<T, ($($A,)*), Fallible<T>> for F
        where
            F: Fn($($A),*) -> VelarsResult<T> + 'static,
            T: Any,
            $($A: Unbox,)*
        {
            fn signature() -> Signature {
                Signature::new(smallvec![$($A::TAG),*], TypeTag::Instance)
            }

            fn into_thunk(self) -> CtorThunk {
                Box::new(move |_args: &[Value]| {
                    $(let $a = $A::unbox(&_args[$idx])?;)*
                    let data = (self)($($a),*).map_err(native_fault)?;
                    Ok(Box::new(data) as Box<dyn Any>)
                })
            }
        }

        impl<F, T, R, $($A),*> NativeMethod<T, ($($A,)*), Plain<R>> for F
        where
            F: Fn(&T $(, $A)*) -> R + 'static,
            T: Any,
            R: IntoValue,
            $($A: Unbox,)*
        {
            fn signature() -> Signature {
                Signature::new(smallvec![$($A::TAG),*], R::TAG)
            }

            fn into_thunk(self) -> MethodThunk {
                Box::new(move |receiver: &Instance, _args: &[Value]| {
                    $(let $a = $A::unbox(&_args[$idx])?;)*
                    let data = receiver.borrow::<T>()?;
                    let result = (self)(&*data $(, $a)*);
                    drop(data);
                    result.into_value()
                })
            }
        }

        impl<F, T, R, $($A),*> NativeMethod<T, ($($A,)*), Fallible<R>> for F
        where
            F: Fn(&T $(, $A)*) -> VelarsResult<R> + 'static,
            T: Any,
            R: IntoValue,
            $($A: Unbox,)*
        {
            fn signature() -> Signature {
                Signature::new(smallvec![$($A::TAG),*], R::TAG)
            }

            fn into_thunk(self) -> MethodThunk {
                Box::new(move |receiver: &Instance, _args: &[Value]| {
                    $(let $a = $A::unbox(&_args[$idx])?;)*
                    let data = receiver.borrow::<T>()?;
                    let result = (self)(&*data $(, $a)*);
                    drop(data);
                    result.map_err(native_fault)?.into_value()
                })
            }
        }

        impl<F, T, R, $($A),*> NativeMethodMut<T, ($($A,)*), Plain<R>> for F
        where
            F: Fn(&mut T $(, $A)*) -> R + 'static,
            T: Any,
            R: IntoValue,
            $($A: Unbox,)*
        {
            fn signature() -> Signature {
                Signature::new(smallvec![$($A::TAG),*], R::TAG)
            }

            fn into_thunk(self) -> MethodThunk {
                Box::new(move |receiver: &Instance, _args: &[Value]| {
                    $(let $a = $A::unbox(&_args[$idx])?;)*
                    let mut data = receiver.borrow_mut::<T>()?;
                    let result = (self)(&mut *data $(, $a)*);
                    drop(data);
                    result.into_value()
                })
            }
        }

        impl<F, T, R, $($A),*> NativeMethodMut<T, ($($A,)*), Fallible<R>> for F
        where
            F: Fn(&mut T $(, $A)*) -> VelarsResult<R> + 'static,
            T: Any,
            R: IntoValue,
            $($A: Unbox,)*
        {
            fn signature() -> Signature {
                Signature::new(smallvec![$($A::TAG),*], R::TAG)
            }

            fn into_thunk(self) -> MethodThunk {
                Box::new(move |receiver: &Instance, _args: &[Value]| {
                    $(let $a = $A::unbox(&_args[$idx])?;)*
                    let mut data = receiver.borrow_mut::<T>()?;
                    let result = (self)(&mut *data $(, $a)*);
                    drop(data);
                    result.map_err(native_fault)?.into_value()
                })
            }
        }
    };
}

impl_native_callables!();
impl_native_callables!((0, A0, a0));
impl_native_callables!((0, A0, a0), (1, A1, a1));
impl_native_callables!((0, A0, a0), (1, A1, a1), (2, A2, a2));
