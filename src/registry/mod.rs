//! Register native functions and types with the environment.
//!
//! An extension module is declared with a [`ModuleBuilder`]: a registration table of free
//! functions and classes that is resolved when the table is loaded with [`Vela::load`].
//! Loading validates the whole table before the environment is touched, so a load that
//! fails leaves the environment exactly as it was.
//!
//! [`Vela::load`]: crate::runtime::sync_rt::Vela::load

use std::{
    any::{type_name, Any, TypeId},
    cell::RefCell,
    marker::PhantomData,
    rc::Rc,
};

use fxhash::{FxHashMap, FxHashSet};
use log::debug;

use crate::{
    class::{Class, ClassSpec, CtorDef, MethodDef, PropertyDef},
    convert::{into_value::IntoValue, to_symbol::ToSymbol, unbox::Unbox},
    error::{RegistrationError, VelarsResult},
    function::{Function, NativeDef},
    instance::Instance,
    module::Module,
    registry::native::{NativeCtor, NativeFn, NativeMethod, NativeMethodMut},
    runtime::environment::Environment,
    symbol::Symbol,
    value::Value,
};

pub mod native;

thread_local! {
    // Exposed types of the active interpreter, keyed by the native type. Cleared when the
    // interpreter is torn down.
    static CLASSES: RefCell<FxHashMap<TypeId, Class>> = RefCell::new(FxHashMap::default());
}

pub(crate) fn registered_class<T: Any>() -> Option<Class> {
    registered_class_by_id(TypeId::of::<T>())
}

pub(crate) fn registered_class_by_id(type_id: TypeId) -> Option<Class> {
    CLASSES.with(|classes| classes.borrow().get(&type_id).cloned())
}

pub(crate) fn clear_registered_classes() {
    CLASSES.with(|classes| classes.borrow_mut().clear());
}

struct FunctionEntry {
    name: Symbol,
    def: NativeDef,
}

struct ClassEntry {
    name: Symbol,
    type_id: TypeId,
    type_name: &'static str,
    constructors: Vec<CtorDef>,
    methods: Vec<MethodDef>,
    properties: Vec<PropertyDef>,
}

/// The registration table of one extension module.
///
/// Free functions are exposed with [`ModuleBuilder::function`], native types with
/// [`ModuleBuilder::class`]. Nothing is resolved until the table is loaded: names are
/// checked for duplicates at load time and a table that fails to load registers nothing.
///
/// ```
/// use velars::prelude::*;
///
/// let mut table = ModuleBuilder::new("example");
/// table.function("add", |a: i64, b: i64| a + b);
///
/// let vela = RuntimeBuilder::new().start()?;
/// let example = vela.load(table)?;
/// let sum = example.function("add")?.call2(Value::Int(1), Value::Int(2))?;
/// assert_eq!(sum.unbox::<i64>()?, 3);
/// # Ok::<(), Box<velars::error::VelarsError>>(())
/// ```
pub struct ModuleBuilder {
    name: Symbol,
    functions: Vec<FunctionEntry>,
    classes: Vec<ClassEntry>,
}

impl ModuleBuilder {
    /// Create an empty registration table for a module with the given name.
    pub fn new<N: ToSymbol>(name: N) -> Self {
        ModuleBuilder {
            name: name.to_symbol(),
            functions: Vec::new(),
            classes: Vec::new(),
        }
    }

    /// The name the module will be loaded under.
    pub fn name(&self) -> Symbol {
        self.name
    }

    /// Expose a free function.
    ///
    /// The function's signature is resolved from its native parameter and return types.
    /// Fallible functions return a [`VelarsResult`] instead of a plain value.
    pub fn function<N, F, A, M>(&mut self, name: N, function: F) -> &mut Self
    where
        N: ToSymbol,
        F: NativeFn<A, M>,
    {
        self.functions.push(FunctionEntry {
            name: name.to_symbol(),
            def: NativeDef {
                signature: F::signature(),
                thunk: function.into_thunk(),
            },
        });
        self
    }

    /// Expose the native type `T` as a class with the given name.
    ///
    /// The returned [`ClassBuilder`] declares the constructor, methods, and properties of
    /// the class, call [`ClassBuilder::finish`] when the class is complete.
    pub fn class<T>(&mut self, name: impl ToSymbol) -> ClassBuilder<'_, T>
    where
        T: Any,
    {
        ClassBuilder {
            entry: ClassEntry {
                name: name.to_symbol(),
                type_id: TypeId::of::<T>(),
                type_name: type_name::<T>(),
                constructors: Vec::new(),
                methods: Vec::new(),
                properties: Vec::new(),
            },
            module: self,
            _marker: PhantomData,
        }
    }

    pub(crate) fn load_into(self, env: &Environment) -> VelarsResult<Module> {
        if env.contains(self.name) {
            Err(RegistrationError::DuplicateModule {
                module: self.name.to_string(),
            })?
        }

        self.validate()?;

        // The table is known to be valid, nothing below can fail.
        let module = Module::new(self.name);
        let function_count = self.functions.len();
        let class_count = self.classes.len();

        for function in self.functions {
            let resolved = Function::native(function.name, function.def);
            module.set_global(function.name, Value::Function(resolved));
        }

        for mut entry in self.classes {
            let constructor = entry.constructors.pop();
            let methods = entry
                .methods
                .into_iter()
                .map(|method| (method.name, Rc::new(method)))
                .collect();
            let properties = entry
                .properties
                .into_iter()
                .map(|property| (property.name, Rc::new(property)))
                .collect();

            let class = Class {
                spec: Rc::new(ClassSpec {
                    name: entry.name,
                    module: self.name,
                    type_id: entry.type_id,
                    type_name: entry.type_name,
                    constructor,
                    methods,
                    properties,
                }),
            };

            CLASSES.with(|classes| {
                classes.borrow_mut().insert(entry.type_id, class.clone());
            });
            module.set_global(entry.name, Value::Class(class));
        }

        env.insert(module.clone());
        debug!(
            "loaded module {} with {} function(s) and {} class(es)",
            self.name, function_count, class_count
        );

        Ok(module)
    }

    // Validation only queries the table and the class registry, nothing is registered
    // until the whole table has been checked.
    fn validate(&self) -> VelarsResult<()> {
        let module = self.name;
        let mut names = FxHashSet::default();

        for function in &self.functions {
            if !names.insert(function.name) {
                Err(duplicate(module, function.name.to_string()))?
            }
        }

        let mut type_ids: FxHashMap<TypeId, Symbol> = FxHashMap::default();
        for class in &self.classes {
            if !names.insert(class.name) {
                Err(duplicate(module, class.name.to_string()))?
            }

            if class.constructors.len() > 1 {
                Err(duplicate(
                    module,
                    format!("the constructor of {}", class.name),
                ))?
            }

            if let Some(&previous) = type_ids.get(&class.type_id) {
                Err(RegistrationError::TypeAlreadyRegistered {
                    type_name: class.type_name.to_string(),
                    registered_as: previous.to_string(),
                })?
            }
            type_ids.insert(class.type_id, class.name);

            if let Some(existing) = registered_class_by_id(class.type_id) {
                Err(RegistrationError::TypeAlreadyRegistered {
                    type_name: class.type_name.to_string(),
                    registered_as: format!("{}.{}", existing.module(), existing.name()),
                })?
            }

            // Methods and properties share the attribute namespace.
            let mut members = FxHashSet::default();
            for method in &class.methods {
                if !members.insert(method.name) {
                    Err(duplicate(module, format!("{}.{}", class.name, method.name)))?
                }
            }
            for property in &class.properties {
                if !members.insert(property.name) {
                    Err(duplicate(
                        module,
                        format!("{}.{}", class.name, property.name),
                    ))?
                }
            }
        }

        Ok(())
    }
}

fn duplicate(module: Symbol, name: String) -> RegistrationError {
    RegistrationError::DuplicateRegistration {
        module: module.to_string(),
        name,
    }
}

/// Declares the constructor, methods, and properties of one exposed class. Created with
/// [`ModuleBuilder::class`].
pub struct ClassBuilder<'m, T> {
    module: &'m mut ModuleBuilder,
    entry: ClassEntry,
    _marker: PhantomData<fn(T) -> T>,
}

impl<'m, T: Any> ClassBuilder<'m, T> {
    /// Expose a constructor.
    ///
    /// A class has at most one constructor, registering a second one fails the load. A
    /// class without a constructor can't be instantiated from the host side, which is
    /// useful for types that only enter the environment as return values.
    pub fn constructor<F, A, M>(mut self, constructor: F) -> Self
    where
        F: NativeCtor<T, A, M>,
    {
        self.entry.constructors.push(CtorDef {
            signature: F::signature(),
            thunk: constructor.into_thunk(),
        });
        self
    }

    /// Expose a method that takes its receiver by shared reference.
    pub fn method<N, F, A, M>(mut self, name: N, method: F) -> Self
    where
        N: ToSymbol,
        F: NativeMethod<T, A, M>,
    {
        self.entry.methods.push(MethodDef {
            name: name.to_symbol(),
            signature: F::signature(),
            thunk: method.into_thunk(),
        });
        self
    }

    /// Expose a method that mutates its receiver.
    ///
    /// Mutations are made through the instance's handle and are visible to every holder of
    /// that handle.
    pub fn method_mut<N, F, A, M>(mut self, name: N, method: F) -> Self
    where
        N: ToSymbol,
        F: NativeMethodMut<T, A, M>,
    {
        self.entry.methods.push(MethodDef {
            name: name.to_symbol(),
            signature: F::signature(),
            thunk: method.into_thunk(),
        });
        self
    }

    /// Expose a read-only property.
    pub fn property<N, G, R>(mut self, name: N, getter: G) -> Self
    where
        N: ToSymbol,
        G: Fn(&T) -> R + 'static,
        R: IntoValue,
    {
        let getter_thunk = move |receiver: &Instance| -> VelarsResult<Value> {
            let data = receiver.borrow::<T>()?;
            let result = getter(&*data);
            drop(data);
            result.into_value()
        };

        self.entry.properties.push(PropertyDef {
            name: name.to_symbol(),
            getter: Box::new(getter_thunk),
            setter: None,
        });
        self
    }

    /// Expose a read-write property.
    pub fn property_rw<N, G, R, S, V>(mut self, name: N, getter: G, setter: S) -> Self
    where
        N: ToSymbol,
        G: Fn(&T) -> R + 'static,
        R: IntoValue,
        S: Fn(&mut T, V) + 'static,
        V: Unbox,
    {
        let getter_thunk = move |receiver: &Instance| -> VelarsResult<Value> {
            let data = receiver.borrow::<T>()?;
            let result = getter(&*data);
            drop(data);
            result.into_value()
        };
        let setter_thunk = move |receiver: &Instance, value: &Value| -> VelarsResult<()> {
            let converted = V::unbox(value)?;
            let mut data = receiver.borrow_mut::<T>()?;
            setter(&mut *data, converted);
            Ok(())
        };

        self.entry.properties.push(PropertyDef {
            name: name.to_symbol(),
            getter: Box::new(getter_thunk),
            setter: Some(Box::new(setter_thunk)),
        });
        self
    }

    /// Finish this class and return to the module table.
    pub fn finish(self) -> &'m mut ModuleBuilder {
        self.module.classes.push(self.entry);
        self.module
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VelarsError;

    struct Probe;

    #[test]
    fn duplicate_function_names_fail_validation() {
        let mut table = ModuleBuilder::new("m");
        table.function("f", || 1i64);
        table.function("f", || 2i64);

        let err = table.validate().unwrap_err();
        assert!(matches!(
            *err,
            VelarsError::RegistrationError(RegistrationError::DuplicateRegistration { .. })
        ));
    }

    #[test]
    fn function_and_class_names_share_a_namespace() {
        let mut table = ModuleBuilder::new("m");
        table.function("Probe", || 1i64);
        table.class::<Probe>("Probe").finish();

        let err = table.validate().unwrap_err();
        assert!(matches!(
            *err,
            VelarsError::RegistrationError(RegistrationError::DuplicateRegistration { .. })
        ));
    }

    #[test]
    fn second_constructor_fails_validation() {
        let mut table = ModuleBuilder::new("m");
        table
            .class::<Probe>("Probe")
            .constructor(|| Probe)
            .constructor(|| Probe)
            .finish();

        let err = table.validate().unwrap_err();
        assert!(matches!(
            *err,
            VelarsError::RegistrationError(RegistrationError::DuplicateRegistration { .. })
        ));
    }

    #[test]
    fn method_and_property_names_share_a_namespace() {
        let mut table = ModuleBuilder::new("m");
        table
            .class::<Probe>("Probe")
            .method("x", |_: &Probe| 1i64)
            .property("x", |_: &Probe| 2i64)
            .finish();

        let err = table.validate().unwrap_err();
        assert!(matches!(
            *err,
            VelarsError::RegistrationError(RegistrationError::DuplicateRegistration { .. })
        ));
    }

    #[test]
    fn one_type_cannot_back_two_classes() {
        let mut table = ModuleBuilder::new("m");
        table.class::<Probe>("A").finish();
        table.class::<Probe>("B").finish();

        let err = table.validate().unwrap_err();
        assert!(matches!(
            *err,
            VelarsError::RegistrationError(RegistrationError::TypeAlreadyRegistered { .. })
        ));
    }

    #[test]
    fn valid_tables_pass_validation() {
        let mut table = ModuleBuilder::new("m");
        table.function("add", |a: i64, b: i64| a + b);
        table
            .class::<Probe>("Probe")
            .constructor(|| Probe)
            .method("probe", |_: &Probe| true)
            .finish();

        assert!(table.validate().is_ok());
    }
}
