//! Shared, row-major cell storage.
//!
//! Grids keep their cells behind a reference-counted buffer so that two grids
//! can deliberately alias the same storage (`adopt`) or hold independent copies
//! (`copy_from`). Cloning a [`Cells`] handle aliases; [`Cells::duplicate`] copies.

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug)]
pub(crate) struct Cells<T> {
    buf: Rc<RefCell<Vec<T>>>,
}

impl<T: Copy> Cells<T> {
    pub(crate) fn filled(len: usize, value: T) -> Self {
        Self::from_vec(vec![value; len])
    }

    pub(crate) fn from_vec(cells: Vec<T>) -> Self {
        Self {
            buf: Rc::new(RefCell::new(cells)),
        }
    }

    /// Another handle onto the same buffer.
    pub(crate) fn alias(&self) -> Self {
        Self {
            buf: Rc::clone(&self.buf),
        }
    }

    /// An independent copy of the buffer.
    pub(crate) fn duplicate(&self) -> Self {
        Self::from_vec(self.buf.borrow().clone())
    }

    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.buf, &other.buf)
    }

    #[inline(always)]
    pub(crate) fn get(&self, idx: usize) -> T {
        self.buf.borrow()[idx]
    }

    #[inline(always)]
    pub(crate) fn set(&self, idx: usize, value: T) {
        self.buf.borrow_mut()[idx] = value;
    }

    pub(crate) fn fill(&self, value: T) {
        self.buf.borrow_mut().fill(value);
    }

    pub(crate) fn update_all(&self, mut f: impl FnMut(T) -> T) {
        for cell in self.buf.borrow_mut().iter_mut() {
            *cell = f(*cell);
        }
    }

    /// Copy of the current contents.
    pub(crate) fn snapshot(&self) -> Vec<T> {
        self.buf.borrow().clone()
    }

    pub(crate) fn with<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.buf.borrow())
    }

    pub(crate) fn with_mut<R>(&self, f: impl FnOnce(&mut [T]) -> R) -> R {
        f(&mut self.buf.borrow_mut())
    }
}
