//! Field-level value generators.
//!
//! Each function draws one attribute value from the bounded distribution the
//! data model prescribes for it.

pub mod names;
pub mod numeric;

use rand::Rng;

/// Pick one value of a non-empty slice uniformly at random.
pub fn choose_value<T: Copy, R: Rng>(rng: &mut R, values: &[T]) -> T {
    values[rng.gen_range(0..values.len())]
}
