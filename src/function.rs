//! Vela function objects.

use std::{fmt, rc::Rc};

use crate::{
    builtins::Builtin,
    class::{FnThunk, MethodDef, Signature},
    instance::Instance,
    symbol::Symbol,
};

pub(crate) struct NativeDef {
    pub(crate) signature: Signature,
    pub(crate) thunk: FnThunk,
}

pub(crate) enum FunctionKind {
    /// A registered free function.
    Native(NativeDef),
    /// An exposed method bound to a receiver.
    Bound {
        receiver: Instance,
        method: Rc<MethodDef>,
    },
    /// A function provided by the `Base` module.
    Builtin(Builtin),
}

pub(crate) struct FunctionInner {
    pub(crate) name: Symbol,
    pub(crate) kind: FunctionKind,
}

/// A handle to a callable that lives in the environment.
///
/// Functions are invoked through the [`Call`] trait with positional marshaled arguments.
///
/// [`Call`]: crate::call::Call
#[derive(Clone)]
pub struct Function {
    pub(crate) inner: Rc<FunctionInner>,
}

impl Function {
    pub(crate) fn native(name: Symbol, def: NativeDef) -> Self {
        Function {
            inner: Rc::new(FunctionInner {
                name,
                kind: FunctionKind::Native(def),
            }),
        }
    }

    pub(crate) fn bound(receiver: Instance, method: Rc<MethodDef>) -> Self {
        Function {
            inner: Rc::new(FunctionInner {
                name: method.name,
                kind: FunctionKind::Bound { receiver, method },
            }),
        }
    }

    pub(crate) fn builtin(builtin: Builtin) -> Self {
        Function {
            inner: Rc::new(FunctionInner {
                name: Symbol::new(builtin.name()),
                kind: FunctionKind::Builtin(builtin),
            }),
        }
    }

    /// The name of this function.
    pub fn name(&self) -> Symbol {
        self.inner.name
    }

    /// The declared signature of this function.
    ///
    /// Builtin functions validate their arguments themselves and have no declared
    /// signature.
    pub fn signature(&self) -> Option<&Signature> {
        match &self.inner.kind {
            FunctionKind::Native(def) => Some(&def.signature),
            FunctionKind::Bound { method, .. } => Some(&method.signature),
            FunctionKind::Builtin(_) => None,
        }
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Function({})", self.inner.name)
    }
}
