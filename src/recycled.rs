//! A thread-local pool of scratch `String` buffers for decode paths
//! that need a temporary destination before the final size is known.
//!
//! Boost.URL's `grammar::recycled.hpp` keeps a mutex-guarded global
//! pool of reusable buffers shared across threads
//! (`original_source/include/boost/url/grammar/recycled.hpp`). A
//! synchronous, single-threaded-per-call Rust library has no need for
//! that cross-thread sharing or its lock: this module keeps one spare
//! buffer per thread in a `thread_local!` cell instead. A re-entrant
//! decode call (the thread-local slot already checked out) falls back
//! to a fresh allocation rather than blocking or erroring.

use std::cell::RefCell;

thread_local! {
    static SCRATCH: RefCell<Option<String>> = RefCell::new(None);
}

/// A checked-out scratch buffer. Returned to the thread-local slot on
/// drop if the slot is still empty (i.e. no other `checkout()` call is
/// concurrently holding it on this same thread).
pub struct Checkout {
    buf: Option<String>,
}

impl Checkout {
    pub fn as_mut_string(&mut self) -> &mut String {
        self.buf.get_or_insert_with(String::new)
    }
}

impl Drop for Checkout {
    fn drop(&mut self) {
        if let Some(mut buf) = self.buf.take() {
            buf.clear();
            SCRATCH.with(|cell| {
                let mut slot = cell.borrow_mut();
                if slot.is_none() {
                    *slot = Some(buf);
                }
            });
        }
    }
}

/// Checks out this thread's scratch buffer, or allocates a fresh one if
/// it's already checked out (re-entrant call on the same thread).
pub fn checkout() -> Checkout {
    let buf = SCRATCH.with(|cell| cell.borrow_mut().take());
    log::trace!("recycled buffer checkout (hit={})", buf.is_some());
    Checkout { buf }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn checkout_reuses_buffer_across_calls() {
        {
            let mut c = checkout();
            c.as_mut_string().push_str("hello");
        }
        let mut c = checkout();
        assert_eq!(c.as_mut_string().capacity() >= 5, true);
        assert_eq!(c.as_mut_string().as_str(), "");
    }

    #[test]
    fn reentrant_checkout_falls_back_to_fresh_allocation() {
        let mut outer = checkout();
        outer.as_mut_string().push_str("outer");
        let mut inner = checkout();
        inner.as_mut_string().push_str("inner");
        assert_eq!(outer.as_mut_string(), "outer");
        assert_eq!(inner.as_mut_string(), "inner");
    }
}
