//! Exposed types. A [`Class`] is a native Rust type that has been registered with the
//! environment together with its constructor, methods, and properties.

use std::{
    any::{Any, TypeId},
    fmt,
    rc::Rc,
};

use fxhash::FxHashMap;
use smallvec::SmallVec;

use crate::{
    error::VelarsResult,
    instance::Instance,
    symbol::Symbol,
    value::{TypeTag, Value},
};

pub(crate) type FnThunk = Box<dyn Fn(&[Value]) -> VelarsResult<Value>>;
pub(crate) type MethodThunk = Box<dyn Fn(&Instance, &[Value]) -> VelarsResult<Value>>;
pub(crate) type GetterThunk = Box<dyn Fn(&Instance) -> VelarsResult<Value>>;
pub(crate) type SetterThunk = Box<dyn Fn(&Instance, &Value) -> VelarsResult<()>>;
pub(crate) type CtorThunk = Box<dyn Fn(&[Value]) -> VelarsResult<Box<dyn Any>>>;

/// The declared signature of an exposed callable.
///
/// The signature is resolved once, when the callable is registered. Argument counts are
/// validated against it before the native implementation is invoked.
#[derive(Clone, Debug)]
pub struct Signature {
    params: SmallVec<[TypeTag; 4]>,
    ret: TypeTag,
}

impl Signature {
    pub(crate) fn new(params: SmallVec<[TypeTag; 4]>, ret: TypeTag) -> Self {
        Signature { params, ret }
    }

    /// The number of declared parameters.
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// The declared parameter types.
    pub fn params(&self) -> &[TypeTag] {
        &self.params
    }

    /// The declared return type.
    pub fn ret(&self) -> TypeTag {
        self.ret
    }
}

pub(crate) struct CtorDef {
    pub(crate) signature: Signature,
    pub(crate) thunk: CtorThunk,
}

pub(crate) struct MethodDef {
    pub(crate) name: Symbol,
    pub(crate) signature: Signature,
    pub(crate) thunk: MethodThunk,
}

pub(crate) struct PropertyDef {
    pub(crate) name: Symbol,
    pub(crate) getter: GetterThunk,
    pub(crate) setter: Option<SetterThunk>,
}

pub(crate) struct ClassSpec {
    pub(crate) name: Symbol,
    pub(crate) module: Symbol,
    pub(crate) type_id: TypeId,
    pub(crate) type_name: &'static str,
    pub(crate) constructor: Option<CtorDef>,
    pub(crate) methods: FxHashMap<Symbol, Rc<MethodDef>>,
    pub(crate) properties: FxHashMap<Symbol, Rc<PropertyDef>>,
}

/// A handle to an exposed type.
///
/// A `Class` can be instantiated with [`Class::instantiate`], or by calling the class
/// object itself through the [`Call`] trait, like the host side does.
///
/// [`Call`]: crate::call::Call
#[derive(Clone)]
pub struct Class {
    pub(crate) spec: Rc<ClassSpec>,
}

impl Class {
    /// The name this type was registered under.
    pub fn name(&self) -> Symbol {
        self.spec.name
    }

    /// The name of the module this type was registered in.
    pub fn module(&self) -> Symbol {
        self.spec.module
    }

    /// Returns true if this class exposes the native type `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.spec.type_id == TypeId::of::<T>()
    }

    /// Returns true if a method with the given name is exposed.
    pub fn has_method(&self, name: Symbol) -> bool {
        self.spec.methods.contains_key(&name)
    }

    /// Returns true if a property with the given name is exposed.
    pub fn has_property(&self, name: Symbol) -> bool {
        self.spec.properties.contains_key(&name)
    }

    /// Construct an instance of this class from marshaled arguments.
    ///
    /// The argument count is validated against the constructor's declared signature before
    /// the native constructor runs.
    pub fn instantiate(&self, args: &[Value]) -> VelarsResult<Value> {
        crate::call::invoke_constructor(self, args)
    }

    pub(crate) fn method(&self, name: Symbol) -> Option<&Rc<MethodDef>> {
        self.spec.methods.get(&name)
    }

    pub(crate) fn property(&self, name: Symbol) -> Option<&Rc<PropertyDef>> {
        self.spec.properties.get(&name)
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Class({})", self.spec.name)
    }
}
