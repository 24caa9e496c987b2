//! Support for Vela lists.

use std::{cell::RefCell, fmt, iter::FromIterator, rc::Rc};

use crate::{
    error::{AccessError, VelarsResult},
    value::Value,
};

/// A shared handle to an ordered sequence of values.
///
/// Cloning a `List` clones the handle. All clones reference the same storage, so mutation
/// through one handle is visible through every other handle. Converting a list to a native
/// sequence copies the elements and preserves their order and count exactly.
#[derive(Clone, Default)]
pub struct List {
    inner: Rc<RefCell<Vec<Value>>>,
}

impl List {
    /// Create a new, empty list.
    pub fn new() -> Self {
        List::default()
    }

    /// Create a list from its elements.
    pub fn from_vec(values: Vec<Value>) -> Self {
        List {
            inner: Rc::new(RefCell::new(values)),
        }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Returns true if this list has no elements.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Returns the element at the given index.
    pub fn get(&self, idx: usize) -> VelarsResult<Value> {
        let values = self.inner.borrow();
        match values.get(idx) {
            Some(value) => Ok(value.clone()),
            None => Err(AccessError::OutOfBounds {
                idx,
                len: values.len(),
            })?,
        }
    }

    /// Replaces the element at the given index.
    pub fn set(&self, idx: usize, value: Value) -> VelarsResult<()> {
        let mut values = self.inner.borrow_mut();
        let len = values.len();
        match values.get_mut(idx) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(AccessError::OutOfBounds { idx, len })?,
        }
    }

    /// Appends an element to the back of this list.
    pub fn push(&self, value: Value) {
        self.inner.borrow_mut().push(value);
    }

    /// Copy the elements to a `Vec`, preserving their order.
    pub fn to_vec(&self) -> Vec<Value> {
        self.inner.borrow().clone()
    }

    /// Returns true if `self` and `other` reference the same storage.
    pub fn same_storage(&self, other: &List) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl FromIterator<Value> for List {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        List::from_vec(iter.into_iter().collect())
    }
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "List({:?})", self.inner.borrow())
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.inner.borrow().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(value, f)?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_get_preserve_order() {
        let list = List::new();
        list.push(Value::Int(1));
        list.push(Value::Int(2));
        assert_eq!(list.len(), 2);
        assert!(matches!(list.get(0).unwrap(), Value::Int(1)));
        assert!(matches!(list.get(1).unwrap(), Value::Int(2)));
    }

    #[test]
    fn get_out_of_bounds_fails() {
        let list = List::from_vec(vec![Value::Int(1)]);
        assert!(list.get(1).is_err());
    }

    #[test]
    fn shared_handles_see_mutation() {
        let a = List::from_vec(vec![Value::Int(1)]);
        let b = a.clone();
        a.set(0, Value::Int(5)).unwrap();
        assert!(matches!(b.get(0).unwrap(), Value::Int(5)));
    }
}
