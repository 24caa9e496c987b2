//! Convert data between Rust and Vela.
//!
//! Three traits define the boundary conversions: [`IntoValue`] moves native data into the
//! environment, [`Unbox`] converts it back, and [`ToSymbol`] converts strings to interned
//! [`Symbol`]s. All conversions are lossless for the supported shapes, a value with no
//! defined mapping fails at the boundary with a `ConversionError` instead of being
//! truncated.
//!
//! [`IntoValue`]: crate::convert::into_value::IntoValue
//! [`Unbox`]: crate::convert::unbox::Unbox
//! [`ToSymbol`]: crate::convert::to_symbol::ToSymbol
//! [`Symbol`]: crate::symbol::Symbol

pub mod into_value;
pub mod to_symbol;
pub mod unbox;

/// By-value marshaling for registered native types.
///
/// Returning `Exposed(data)` from an exposed callable wraps `data` in a fresh instance of
/// the class `T` was registered as. Taking `Exposed<T>` as a parameter copies the native
/// value out of the argument's handle, so the callee works on its own copy. Use
/// [`Instance`] parameters instead when the callee should share the caller's handle.
///
/// Both directions fail with a `ConversionError` if `T` has not been registered with the
/// active interpreter.
///
/// [`Instance`]: crate::instance::Instance
pub struct Exposed<T>(pub T);
