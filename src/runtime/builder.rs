//! Build a runtime.
//!
//! Before Vela can be used an interpreter must be started. The builder provided by this
//! module collects the extension modules to load and starts the interpreter with
//! [`RuntimeBuilder::start`].

use log::debug;

use crate::{
    error::{RuntimeError, VelarsResult},
    registry::ModuleBuilder,
    runtime::{environment::Environment, state, sync_rt::Vela},
};

/// Build a sync runtime.
///
/// Extension modules queued with [`RuntimeBuilder::with_module`] are loaded as part of
/// [`RuntimeBuilder::start`], in the order they were queued. Modules can also be loaded
/// after the interpreter has started with [`Vela::load`].
pub struct RuntimeBuilder {
    modules: Vec<ModuleBuilder>,
    install_base: bool,
}

impl RuntimeBuilder {
    /// Create a new `RuntimeBuilder`.
    pub fn new() -> Self {
        RuntimeBuilder {
            modules: Vec::new(),
            install_base: true,
        }
    }

    /// Load an extension module when the interpreter starts.
    pub fn with_module(mut self, module: ModuleBuilder) -> Self {
        self.modules.push(module);
        self
    }

    /// Start with an empty `Base` module instead of installing the builtin functions.
    pub fn without_base(mut self) -> Self {
        self.install_base = false;
        self
    }

    /// Start the interpreter on the current thread.
    ///
    /// At most one interpreter can be active in a process at a time. If another interpreter
    /// is active `RuntimeError::AlreadyActive` is returned, whether it was started by this
    /// thread or another one. The interpreter stays active until the returned [`Vela`] is
    /// dropped, after that a new one can be started.
    ///
    /// If one of the queued modules fails to load the interpreter is torn down again and
    /// the registration error is returned.
    pub fn start(self) -> VelarsResult<Vela> {
        if !state::can_init() {
            Err(RuntimeError::AlreadyActive)?
        }

        debug!("starting interpreter");
        let vela = Vela::new(Environment::new(self.install_base));
        for module in self.modules {
            vela.load(module)?;
        }

        Ok(vela)
    }
}
