//! Obstacle-keyed memoization for derived scenario data.

use std::cell::RefCell;
use std::rc::Rc;

use super::Board;

/// A `{fingerprint, value}` pair recomputed whenever the board's obstacle
/// content differs from the content the value was computed for.
#[derive(Debug)]
pub struct FingerprintMemo<T> {
    label: &'static str,
    entry: RefCell<Option<(String, Rc<T>)>>,
}

impl<T> FingerprintMemo<T> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            entry: RefCell::new(None),
        }
    }

    /// Returns the cached value for the current obstacle content, computing it
    /// with `compute` on a fingerprint mismatch.
    pub fn get_or_compute(&self, board: &Board, compute: impl FnOnce(&Board) -> T) -> Rc<T> {
        let fingerprint = board.fingerprint();
        if let Some((cached, value)) = self.entry.borrow().as_ref() {
            if *cached == fingerprint {
                return Rc::clone(value);
            }
        }

        tracing::trace!(
            cache = self.label,
            obstacles = board.obstacle_count(),
            "fingerprint changed, recomputing"
        );
        let value = Rc::new(compute(board));
        *self.entry.borrow_mut() = Some((fingerprint, Rc::clone(&value)));
        value
    }
}

impl<T> Clone for FingerprintMemo<T> {
    /// Clones start cold.
    fn clone(&self) -> Self {
        Self::new(self.label)
    }
}
