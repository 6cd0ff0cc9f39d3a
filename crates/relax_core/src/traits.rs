use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// A trait for types that can be used as scalars in the closed-form solutions.
/// Must support basic arithmetic, debug printing, and conversion from f64.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// A first-order process whose trajectory is known in closed form.
pub trait AnalyticSolution<T: Scalar> {
    /// Value of the process at simulated time `t` (t >= 0).
    fn value_at(&self, t: T) -> T;

    /// Simulated time span covered by one complete run.
    fn horizon(&self) -> T;
}
