//! Interned identifiers. Symbols represent identifiers like module and function names.

use std::fmt;

use fxhash::FxHashMap;
use once_cell::sync::Lazy;
use parking_lot::Mutex;

static INTERNER: Lazy<Mutex<Interner>> = Lazy::new(|| Mutex::new(Interner::new()));

struct Interner {
    by_name: FxHashMap<&'static str, u32>,
    names: Vec<&'static str>,
}

impl Interner {
    fn new() -> Self {
        Interner {
            by_name: FxHashMap::default(),
            names: Vec::new(),
        }
    }

    fn intern(&mut self, name: &str) -> u32 {
        if let Some(id) = self.by_name.get(name) {
            return *id;
        }

        // Interned names live as long as the process, like the identifiers they name.
        let name: &'static str = Box::leak(name.to_string().into_boxed_str());
        let id = self.names.len() as u32;
        self.names.push(name);
        self.by_name.insert(name, id);
        id
    }

    fn name(&self, id: u32) -> &'static str {
        self.names[id as usize]
    }
}

/// `Symbol`s are used by Vela to represent identifiers. Things that can be accessed using a
/// `Symbol` include modules, functions, globals, methods, and properties. However, the
/// methods that provide this functionality in velars can use strings instead.
///
/// A `Symbol` is never freed after it has been created, two `Symbol`s created from equal
/// strings always compare equal.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Symbol(u32);

impl Symbol {
    /// Convert the given string to a `Symbol`.
    pub fn new<S: AsRef<str>>(symbol: S) -> Self {
        Symbol(INTERNER.lock().intern(symbol.as_ref()))
    }

    /// View this `Symbol` as a string.
    pub fn as_str(self) -> &'static str {
        INTERNER.lock().name(self.0)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Symbol({})", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_strings_intern_to_equal_symbols() {
        let a = Symbol::new("magnitude");
        let b = Symbol::new(String::from("magnitude"));
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "magnitude");
    }

    #[test]
    fn distinct_strings_intern_to_distinct_symbols() {
        let a = Symbol::new("real");
        let b = Symbol::new("imag");
        assert_ne!(a, b);
    }
}
