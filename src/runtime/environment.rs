//! The global environment of an active interpreter.

use std::cell::RefCell;

use fxhash::FxHashMap;

use crate::{builtins, module::Module, symbol::Symbol};

/// The modules of an active interpreter. Every interpreter starts with a `Main` and a
/// `Base` module, extension modules are added as they're loaded.
pub(crate) struct Environment {
    main: Module,
    base: Module,
    modules: RefCell<FxHashMap<Symbol, Module>>,
}

impl Environment {
    pub(crate) fn new(install_base: bool) -> Self {
        let main = Module::new(Symbol::new("Main"));
        let base = Module::new(Symbol::new("Base"));
        if install_base {
            builtins::install(&base);
        }

        let mut modules = FxHashMap::default();
        modules.insert(main.name(), main.clone());
        modules.insert(base.name(), base.clone());

        Environment {
            main,
            base,
            modules: RefCell::new(modules),
        }
    }

    pub(crate) fn main(&self) -> Module {
        self.main.clone()
    }

    pub(crate) fn base(&self) -> Module {
        self.base.clone()
    }

    pub(crate) fn contains(&self, name: Symbol) -> bool {
        self.modules.borrow().contains_key(&name)
    }

    pub(crate) fn get(&self, name: Symbol) -> Option<Module> {
        self.modules.borrow().get(&name).cloned()
    }

    pub(crate) fn insert(&self, module: Module) {
        self.modules.borrow_mut().insert(module.name(), module);
    }
}
