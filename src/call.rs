//! Call Vela functions, bound methods, and class constructors.
//!
//! This module provides the [`Call`] trait, which is implemented by [`Function`],
//! [`Class`], and [`Value`]. A call passes positional marshaled arguments and blocks until
//! the callee returns or raises. Exceptions raised on the Vela side surface as
//! `VelarsError::Exception`. A panic in native code is caught at the boundary and
//! re-raised as an exception with the `NativeError` kind, it never crosses the boundary as
//! a native fault.

use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
};

use log::trace;

use crate::{
    builtins,
    class::{Class, MethodDef, PropertyDef},
    error::{CallError, Exception, ExceptionKind, TypeError, VelarsResult},
    function::{Function, FunctionKind},
    instance::Instance,
    value::Value,
};

/// A trait that allows something to be called as a Vela function.
///
/// Three types implement this trait: [`Function`], [`Class`] (calling a class constructs
/// an instance, like on the host side), and [`Value`] (callable if it holds a function or
/// a class).
pub trait Call: private::CallPriv {
    /// Call `self` with no arguments.
    fn call0(&self) -> VelarsResult<Value> {
        self.call(&[])
    }

    /// Call `self` with one argument.
    fn call1(&self, arg0: Value) -> VelarsResult<Value> {
        self.call(&[arg0])
    }

    /// Call `self` with two arguments.
    fn call2(&self, arg0: Value, arg1: Value) -> VelarsResult<Value> {
        self.call(&[arg0, arg1])
    }

    /// Call `self` with three arguments.
    fn call3(&self, arg0: Value, arg1: Value, arg2: Value) -> VelarsResult<Value> {
        self.call(&[arg0, arg1, arg2])
    }

    /// Call `self` with an arbitrary number of arguments.
    fn call(&self, args: &[Value]) -> VelarsResult<Value>;
}

impl Call for Function {
    fn call(&self, args: &[Value]) -> VelarsResult<Value> {
        invoke_function(self, args)
    }
}

impl Call for Class {
    fn call(&self, args: &[Value]) -> VelarsResult<Value> {
        invoke_constructor(self, args)
    }
}

impl Call for Value {
    fn call(&self, args: &[Value]) -> VelarsResult<Value> {
        match self {
            Value::Function(function) => invoke_function(function, args),
            Value::Class(class) => invoke_constructor(class, args),
            other => Err(CallError::NotCallable {
                ty: other.type_name().to_string(),
            })?,
        }
    }
}

pub(crate) mod private {
    use crate::{class::Class, function::Function, value::Value};

    pub trait CallPriv {}
    impl CallPriv for Function {}
    impl CallPriv for Class {}
    impl CallPriv for Value {}
}

pub(crate) fn invoke_function(function: &Function, args: &[Value]) -> VelarsResult<Value> {
    match &function.inner.kind {
        FunctionKind::Native(def) => {
            check_arity(function.name().as_str(), def.signature.arity(), args.len())?;
            trace!("calling function {}", function.name());
            run_native(|| (def.thunk)(args))
        }
        FunctionKind::Bound { receiver, method } => invoke_method(receiver, method, args),
        FunctionKind::Builtin(builtin) => {
            trace!("calling builtin {}", function.name());
            builtins::invoke(*builtin, args)
        }
    }
}

pub(crate) fn invoke_method(
    receiver: &Instance,
    method: &MethodDef,
    args: &[Value],
) -> VelarsResult<Value> {
    check_arity(method.name.as_str(), method.signature.arity(), args.len())?;
    trace!("calling method {} of {}", method.name, receiver.class_name());
    run_native(|| (method.thunk)(receiver, args))
}

pub(crate) fn invoke_constructor(class: &Class, args: &[Value]) -> VelarsResult<Value> {
    let ctor = match &class.spec.constructor {
        Some(ctor) => ctor,
        None => Err(TypeError::NotConstructible {
            class: class.name().as_str().to_string(),
        })?,
    };

    check_arity(class.name().as_str(), ctor.signature.arity(), args.len())?;
    trace!("constructing {}", class.name());
    let data = run_native(|| (ctor.thunk)(args))?;
    Ok(Value::Instance(Instance::new(class.clone(), data)))
}

pub(crate) fn invoke_getter(receiver: &Instance, property: &PropertyDef) -> VelarsResult<Value> {
    trace!("reading property {} of {}", property.name, receiver.class_name());
    run_native(|| (property.getter)(receiver))
}

pub(crate) fn invoke_setter(
    receiver: &Instance,
    property: &PropertyDef,
    value: &Value,
) -> VelarsResult<()> {
    let setter = match &property.setter {
        Some(setter) => setter,
        None => Err(Exception::new(
            ExceptionKind::AttributeError,
            format!(
                "property {} of {} is read-only",
                property.name,
                receiver.class_name()
            ),
        ))?,
    };

    trace!("writing property {} of {}", property.name, receiver.class_name());
    run_native(|| setter(receiver, value))
}

fn check_arity(callable: &str, expected: usize, got: usize) -> VelarsResult<()> {
    if expected != got {
        Err(CallError::ArgumentMismatch {
            callable: callable.to_string(),
            expected,
            got,
        })?;
    }

    Ok(())
}

/// Run native code behind the boundary. A panic is caught here and re-raised as a
/// `NativeError` exception carrying the panic message.
fn run_native<T>(thunk: impl FnOnce() -> VelarsResult<T>) -> VelarsResult<T> {
    match panic::catch_unwind(AssertUnwindSafe(thunk)) {
        Ok(result) => result,
        Err(payload) => Err(Exception::new(
            ExceptionKind::NativeError,
            panic_message(payload.as_ref()),
        ))?,
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        String::from("native code panicked")
    }
}
