//! Embed Vela in a Rust application.
//!
//! Before the environment can be used an interpreter must be started, which is done with a
//! [`RuntimeBuilder`]. See the [`builder`] module for more information.
//!
//! [`RuntimeBuilder`]: crate::runtime::builder::RuntimeBuilder

pub mod builder;
pub(crate) mod environment;
pub mod state;
pub mod sync_rt;
