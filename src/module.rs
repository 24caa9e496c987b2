//! Access Vela modules and the globals, functions, and classes defined in them.

use std::{cell::RefCell, fmt, rc::Rc};

use fxhash::FxHashMap;

use crate::{
    class::Class,
    convert::to_symbol::ToSymbol,
    error::{AccessError, TypeError, VelarsResult},
    function::Function,
    runtime::sync_rt::Vela,
    symbol::Symbol,
    value::Value,
};

pub(crate) struct ModuleData {
    pub(crate) name: Symbol,
    pub(crate) globals: FxHashMap<Symbol, Value>,
}

/// Functionality in Vela can be accessed through its module system. You can get a handle
/// to the two standard modules, `Main` and `Base`, and to every extension module that has
/// been loaded with [`Vela::load`] or [`RuntimeBuilder::with_module`].
///
/// A `Module` is a shared handle, cloning it clones the handle.
///
/// [`Vela::load`]: crate::runtime::sync_rt::Vela::load
/// [`RuntimeBuilder::with_module`]: crate::runtime::builder::RuntimeBuilder::with_module
#[derive(Clone)]
pub struct Module {
    pub(crate) data: Rc<RefCell<ModuleData>>,
}

impl Module {
    pub(crate) fn new(name: Symbol) -> Self {
        Module {
            data: Rc::new(RefCell::new(ModuleData {
                name,
                globals: FxHashMap::default(),
            })),
        }
    }

    /// The name of this module.
    pub fn name(&self) -> Symbol {
        self.data.borrow().name
    }

    /// Returns a handle to Vela's `Main` module, the default home of loaded extension
    /// globals.
    pub fn main(vela: &Vela) -> Module {
        vela.env().main()
    }

    /// Returns a handle to Vela's `Base` module, which contains the builtin functions.
    pub fn base(vela: &Vela) -> Module {
        vela.env().base()
    }

    /// Returns the global named `name` in this module.
    ///
    /// Returns an error if the global doesn't exist.
    pub fn global<N: ToSymbol>(&self, name: N) -> VelarsResult<Value> {
        let name = name.to_symbol();
        match self.data.borrow().globals.get(&name) {
            Some(value) => Ok(value.clone()),
            None => Err(AccessError::GlobalNotFound {
                name: name.as_str().to_string(),
                module: self.name().as_str().to_string(),
            })?,
        }
    }

    /// Returns the function named `name` in this module.
    ///
    /// Returns an error if the global doesn't exist or is not a function.
    pub fn function<N: ToSymbol>(&self, name: N) -> VelarsResult<Function> {
        let name = name.to_symbol();
        match self.global(name)? {
            Value::Function(function) => Ok(function),
            other => Err(TypeError::NotAFunction {
                name: name.as_str().to_string(),
                ty: other.type_name().to_string(),
            })?,
        }
    }

    /// Returns the class named `name` in this module.
    ///
    /// Returns an error if the global doesn't exist or is not a class.
    pub fn class<N: ToSymbol>(&self, name: N) -> VelarsResult<Class> {
        let name = name.to_symbol();
        match self.global(name)? {
            Value::Class(class) => Ok(class),
            other => Err(TypeError::NotAClass {
                name: name.as_str().to_string(),
                ty: other.type_name().to_string(),
            })?,
        }
    }

    /// Set the global named `name` in this module to `value`, overwriting an existing
    /// global with the same name.
    pub fn set_global<N: ToSymbol>(&self, name: N, value: Value) {
        let name = name.to_symbol();
        self.data.borrow_mut().globals.insert(name, value);
    }
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Module({})", self.name())
    }
}
