//! velars is a crate that provides access to the Vela interpreter. It can be used to embed
//! Vela in a Rust application and to expose native Rust functions and types to Vela code.
//!
//! The minimum supported Rust version is currently 1.65.
//!
//! # Overview
//!
//! An incomplete list of features that are currently supported by velars:
//!
//!  - Start and tear down the interpreter from Rust. At most one interpreter is active in
//!    a process at a time, and it's torn down when the handle that owns it is dropped.
//!  - Expose free functions and classes with a constructor, methods, and properties
//!    through a registration table. The table is validated when it's loaded, a load that
//!    fails leaves the environment untouched.
//!  - Access arbitrary modules and their globals, functions, and classes.
//!  - Call functions and class constructors, and convert the results back to Rust.
//!  - Marshal booleans, integers, floats, strings, lists, and numeric vectors and
//!    matrices across the boundary. Matrices are stored in row-major order and their
//!    shape is preserved exactly.
//!  - Share class instances across the boundary by reference: mutations made through one
//!    handle are visible through every other handle.
//!  - Handle exceptions raised by the environment, and propagate errors and panics from
//!    native code back to the environment as exceptions.
//!
//! # Using velars
//!
//! Before the environment can be used, the interpreter must be started with a
//! [`RuntimeBuilder`]. The builder returns a [`Vela`] handle, dropping it tears the
//! interpreter down again. The `Base` module provides a small set of builtin functions:
//!
//! ```
//! use velars::prelude::*;
//!
//! # fn main() {
//! let vela = RuntimeBuilder::new().start().unwrap();
//!
//! let sqrt = Module::base(&vela).function("sqrt").unwrap();
//! let result = sqrt.call1(Value::Float(2.0)).unwrap();
//! assert_eq!(result.unbox::<f64>().unwrap(), std::f64::consts::SQRT_2);
//! # }
//! ```
//!
//! Native functions and types are exposed through a [`ModuleBuilder`]. Methods take their
//! receiver as a plain Rust reference, other parameters and the return type are converted
//! automatically:
//!
//! ```
//! use velars::prelude::*;
//!
//! struct Pet {
//!     name: String,
//! }
//!
//! # fn main() {
//! let mut table = ModuleBuilder::new("example");
//! table
//!     .class::<Pet>("Pet")
//!     .constructor(|name: String| Pet { name })
//!     .method("getName", |pet: &Pet| pet.name.clone())
//!     .method_mut("setName", |pet: &mut Pet, name: String| {
//!         pet.name = name;
//!     })
//!     .finish();
//!
//! let vela = RuntimeBuilder::new().with_module(table).start().unwrap();
//!
//! let class = vela.module("example").unwrap().class("Pet").unwrap();
//! let pet = class.call1(Value::Str("Polly".into())).unwrap();
//! let pet = pet.unbox::<Instance>().unwrap();
//!
//! pet.call_method("setName", &[Value::Str("Mochi".into())]).unwrap();
//! let name = pet.call_method("getName", &[]).unwrap();
//! assert_eq!(name.unbox::<String>().unwrap(), "Mochi");
//! # }
//! ```
//!
//! Failures on either side of the boundary are reported as a [`VelarsError`]. Exceptions
//! raised by the environment use the [`VelarsError::Exception`] variant, errors returned
//! and panics thrown by native code are caught at the boundary and re-raised as
//! exceptions with the `NativeError` kind.
//!
//! # Features
//!
//! The `prelude` feature is enabled by default and makes the [`prelude`] module
//! available, which reexports the structs and traits you're likely to need.
//!
//! [`RuntimeBuilder`]: crate::runtime::builder::RuntimeBuilder
//! [`Vela`]: crate::runtime::sync_rt::Vela
//! [`ModuleBuilder`]: crate::registry::ModuleBuilder
//! [`VelarsError`]: crate::error::VelarsError
//! [`VelarsError::Exception`]: crate::error::VelarsError::Exception

#![forbid(rustdoc::broken_intra_doc_links)]

pub mod array;
mod builtins;
pub mod call;
pub mod class;
pub mod convert;
pub mod error;
pub mod function;
pub mod instance;
pub mod list;
pub mod module;
#[cfg(feature = "prelude")]
pub mod prelude;
pub mod registry;
pub mod runtime;
pub mod symbol;
pub mod value;
