//! Use Vela without support for multitasking.
//!
//! This module provides the sync runtime, which starts the interpreter on the current
//! thread. All interaction with the interpreter is synchronous: calls into the environment
//! block until they return, and native code invoked by the environment runs on the thread
//! that called into it.

use std::{ffi::c_void, marker::PhantomData};

use log::debug;

use crate::{
    convert::to_symbol::ToSymbol,
    error::{AccessError, VelarsResult},
    module::Module,
    registry::{self, ModuleBuilder},
    runtime::{environment::Environment, state},
};

/// An active Vela interpreter.
///
/// A `Vela` is created with [`RuntimeBuilder::start`] and can't be sent to or shared with
/// other threads. While it exists no second interpreter can be started. When it's dropped
/// the environment is torn down: every registered module and class is dropped with it, and
/// a new interpreter can be started afterwards.
///
/// [`RuntimeBuilder::start`]: crate::runtime::builder::RuntimeBuilder::start
pub struct Vela {
    env: Environment,
    _not_send_sync: PhantomData<*mut c_void>,
}

impl Vela {
    pub(crate) fn new(env: Environment) -> Self {
        Vela {
            env,
            _not_send_sync: PhantomData,
        }
    }

    pub(crate) fn env(&self) -> &Environment {
        &self.env
    }

    /// Load an extension module.
    ///
    /// The registration table is validated and resolved now. On success the loaded module
    /// is returned, it can also be looked up later with [`Vela::module`]. On failure the
    /// table is discarded and the environment is left exactly as it was.
    pub fn load(&self, module: ModuleBuilder) -> VelarsResult<Module> {
        module.load_into(&self.env)
    }

    /// Returns the module with the given name.
    ///
    /// The `Main` and `Base` modules always exist, other modules exist after they have
    /// been loaded.
    pub fn module<N: ToSymbol>(&self, name: N) -> VelarsResult<Module> {
        let name = name.to_symbol();
        match self.env.get(name) {
            Some(module) => Ok(module),
            None => Err(AccessError::ModuleNotFound {
                module: name.to_string(),
            })?,
        }
    }
}

impl Drop for Vela {
    fn drop(&mut self) {
        debug!("tearing down interpreter");
        registry::clear_registered_classes();
        state::set_exit();
    }
}
