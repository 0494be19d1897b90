use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Shared, cloneable event handler.
///
/// Cloning a widget clones the `Rc`, so every stamped copy calls the same
/// closure. A handler that re-enters itself (directly or through another
/// widget sharing it) is skipped for the nested call instead of panicking.
pub struct Callback<A: 'static>(Rc<RefCell<dyn FnMut(A)>>);

impl<A: 'static> Callback<A> {
    pub fn new(f: impl FnMut(A) + 'static) -> Self {
        Self(Rc::new(RefCell::new(f)))
    }

    /// Invokes the handler. Returns `false` if it was already running.
    pub fn call(&self, arg: A) -> bool {
        match self.0.try_borrow_mut() {
            Ok(mut f) => {
                (&mut *f)(arg);
                true
            }
            Err(_) => {
                log::warn!("callback re-entered while running; nested call skipped");
                false
            }
        }
    }

    /// True when both handles point at the same closure.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<A: 'static> Clone for Callback<A> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<A: 'static> fmt::Debug for Callback<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}
