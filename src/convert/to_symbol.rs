//! Convert strings to symbols.

use crate::symbol::Symbol;

/// Trait implemented by types that can be converted to a [`Symbol`], which includes
/// [`Symbol`] itself, strings, and string slices. Methods that take names, like
/// [`Module::global`], are generic over this trait so interned and plain-string names can
/// be used interchangeably.
///
/// This trait is sealed.
///
/// [`Module::global`]: crate::module::Module::global
pub trait ToSymbol: private::ToSymbolPriv {
    /// Convert `self` to a `Symbol`, interning it if it has not been interned yet.
    #[inline]
    fn to_symbol(&self) -> Symbol {
        self.to_symbol_priv()
    }
}

impl<T: AsRef<str>> ToSymbol for T {}
impl ToSymbol for Symbol {}

pub(crate) mod private {
    use crate::symbol::Symbol;

    pub trait ToSymbolPriv {
        fn to_symbol_priv(&self) -> Symbol;
    }

    impl<T: AsRef<str>> ToSymbolPriv for T {
        #[inline]
        fn to_symbol_priv(&self) -> Symbol {
            Symbol::new(self.as_ref())
        }
    }

    impl ToSymbolPriv for Symbol {
        #[inline]
        fn to_symbol_priv(&self) -> Symbol {
            *self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_and_symbols_convert() {
        let from_str = "name".to_symbol();
        let from_string = String::from("name").to_symbol();
        let from_symbol = from_str.to_symbol();

        assert_eq!(from_str, from_string);
        assert_eq!(from_str, from_symbol);
    }
}
