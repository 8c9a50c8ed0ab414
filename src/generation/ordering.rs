//! # Branch Ordering
//!
//! The search visits open doors and candidate rooms in an order chosen by a
//! [`BranchOrder`]. Production runs shuffle with a seeded RNG; tests can swap
//! in [`FixedOrder`] to make a run fully deterministic.

use rand::seq::SliceRandom;
use rand::Rng;

/// Random-order provider consulted before each branching loop.
pub trait BranchOrder {
    /// Reorders `items` in place.
    fn arrange<T>(&mut self, items: &mut [T]);
}

/// Uniform shuffles drawn from a random number generator.
///
/// # Examples
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use roomweave::{BranchOrder, RandomOrder};
///
/// let mut order = RandomOrder::new(StdRng::seed_from_u64(3));
/// let mut items = vec![1, 2, 3, 4];
/// order.arrange(&mut items);
/// items.sort();
/// assert_eq!(items, vec![1, 2, 3, 4]);
/// ```
#[derive(Debug, Clone)]
pub struct RandomOrder<R> {
    rng: R,
}

impl<R: Rng> RandomOrder<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: Rng> BranchOrder for RandomOrder<R> {
    fn arrange<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

/// Leaves every sequence in its current order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedOrder;

impl BranchOrder for FixedOrder {
    fn arrange<T>(&mut self, _items: &mut [T]) {}
}

/// Reverses every sequence. Useful to check order sensitivity in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReverseOrder;

impl BranchOrder for ReverseOrder {
    fn arrange<T>(&mut self, items: &mut [T]) {
        items.reverse();
    }
}
