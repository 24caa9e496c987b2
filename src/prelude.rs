//! Reexports structs and traits you're likely to need.

pub use crate::{
    array::{ArrayRef, NArray, Shape},
    call::Call,
    class::Class,
    convert::{into_value::IntoValue, to_symbol::ToSymbol, unbox::Unbox, Exposed},
    error::{Exception, ExceptionKind, VelarsError, VelarsResult},
    function::Function,
    instance::Instance,
    list::List,
    module::Module,
    registry::{ClassBuilder, ModuleBuilder},
    runtime::{builder::RuntimeBuilder, sync_rt::Vela},
    symbol::Symbol,
    value::{TypeTag, Value},
};
