use alloc::vec::Vec;

use crate::*;
pub use emoji::*;
pub use fixed::*;

mod emoji;
mod fixed;

/// Supplies the symbols a level is built from.
pub trait ContentProvider {
    /// Return exactly `count` distinct symbols.
    ///
    /// Entropy may be used to choose where the symbols come from but not to order them, shuffling the layout is the
    /// rules engine's job. Failing here is a configuration defect: the level cannot be built.
    fn supply(&mut self, count: usize, entropy: &mut dyn Entropy) -> Result<Vec<Symbol>>;

    /// Largest request this provider can satisfy.
    fn capacity(&self) -> usize;
}
