//! Opaque handles to native data living inside the environment.

use std::{
    any::Any,
    cell::{Ref, RefCell, RefMut},
    fmt,
    rc::Rc,
};

use crate::{
    class::Class,
    convert::to_symbol::ToSymbol,
    error::{ConversionError, Exception, ExceptionKind, VelarsResult},
    function::Function,
    symbol::Symbol,
    value::Value,
};

/// An instance of an exposed type.
///
/// An `Instance` is an opaque handle: the host side can only touch the underlying native
/// value through the methods and properties its class exposes. Cloning an `Instance`
/// clones the handle, all clones reference the same native value, so mutation through one
/// handle is visible through every other handle.
#[derive(Clone)]
pub struct Instance {
    inner: Rc<InstanceInner>,
}

struct InstanceInner {
    class: Class,
    data: RefCell<Box<dyn Any>>,
}

impl Instance {
    pub(crate) fn new(class: Class, data: Box<dyn Any>) -> Self {
        Instance {
            inner: Rc::new(InstanceInner {
                class,
                data: RefCell::new(data),
            }),
        }
    }

    /// The class of this instance.
    pub fn class(&self) -> Class {
        self.inner.class.clone()
    }

    /// The name of this instance's class.
    pub fn class_name(&self) -> Symbol {
        self.inner.class.name()
    }

    /// Returns true if the underlying native value is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.inner.class.is::<T>()
    }

    /// Borrow the underlying native value.
    ///
    /// Returns a `ConversionError` if the instance does not expose a `T`, and a
    /// `BorrowError` exception if the value is mutably borrowed by a call that is
    /// currently on the stack.
    pub fn borrow<T: Any>(&self) -> VelarsResult<Ref<T>> {
        let data = self.inner.data.try_borrow().map_err(|_| {
            Exception::new(
                ExceptionKind::BorrowError,
                format!("{} object is mutably borrowed", self.class_name()),
            )
        })?;

        Ref::filter_map(data, |data| data.downcast_ref::<T>()).map_err(|_| {
            ConversionError::Unsupported {
                from: self.class_name().as_str().to_string(),
                to: std::any::type_name::<T>().to_string(),
            }
            .into()
        })
    }

    /// Mutably borrow the underlying native value.
    ///
    /// Returns a `ConversionError` if the instance does not expose a `T`, and a
    /// `BorrowError` exception if the value is borrowed by a call that is currently on
    /// the stack.
    pub fn borrow_mut<T: Any>(&self) -> VelarsResult<RefMut<T>> {
        let data = self.inner.data.try_borrow_mut().map_err(|_| {
            Exception::new(
                ExceptionKind::BorrowError,
                format!("{} object is already borrowed", self.class_name()),
            )
        })?;

        RefMut::filter_map(data, |data| data.downcast_mut::<T>()).map_err(|_| {
            ConversionError::Unsupported {
                from: self.class_name().as_str().to_string(),
                to: std::any::type_name::<T>().to_string(),
            }
            .into()
        })
    }

    /// Access an attribute the way the host side does.
    ///
    /// A property name evaluates its getter and returns the property's current value, a
    /// method name returns a `Function` bound to this instance. Accessing a name that is
    /// neither raises an `AttributeError` exception.
    pub fn get_attribute<N: ToSymbol>(&self, name: N) -> VelarsResult<Value> {
        let name = name.to_symbol();

        if let Some(property) = self.inner.class.property(name) {
            return crate::call::invoke_getter(self, property);
        }

        if let Some(method) = self.inner.class.method(name) {
            let function = Function::bound(self.clone(), Rc::clone(method));
            return Ok(Value::Function(function));
        }

        Err(self.missing_attribute(name))?
    }

    /// Assign to a property the way the host side does.
    ///
    /// Raises an `AttributeError` exception if the property does not exist or has no
    /// setter.
    pub fn set_attribute<N: ToSymbol>(&self, name: N, value: Value) -> VelarsResult<()> {
        let name = name.to_symbol();

        match self.inner.class.property(name) {
            Some(property) => crate::call::invoke_setter(self, property, &value),
            None => Err(self.missing_attribute(name))?,
        }
    }

    /// Invoke an exposed method on this instance with marshaled arguments.
    pub fn call_method<N: ToSymbol>(&self, name: N, args: &[Value]) -> VelarsResult<Value> {
        let name = name.to_symbol();

        match self.inner.class.method(name) {
            Some(method) => crate::call::invoke_method(self, method, args),
            None => Err(self.missing_attribute(name))?,
        }
    }

    /// Returns true if `self` and `other` reference the same native value.
    pub fn same_instance(&self, other: &Instance) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn missing_attribute(&self, name: Symbol) -> Exception {
        Exception::new(
            ExceptionKind::AttributeError,
            format!("{} object has no attribute {}", self.class_name(), name),
        )
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Instance({})", self.class_name())
    }
}
