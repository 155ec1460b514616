/*!
Defines the parameter vector and the strategy traits the sampler is generic
over — prior, likelihood, and proposal — along with the concrete strategies
for the Gaussian scale-estimation model: an improper positive-scale prior,
an iid Gaussian likelihood over a fixed dataset, and a symmetric Gaussian
random walk on the scale component.

This module is generic over the floating-point precision (e.g., `f32` or
`f64`) using the [`num_traits::Float`] trait.

# Examples

```rust
use metro_mcmc::distributions::{
    GaussianLikelihood, Likelihood, Params, PositiveScale, Prior,
};

let theta = Params { location: 0.0, scale: 1.0 };
let data = [0.5, -0.5];
assert_eq!(PositiveScale.indicator(&theta), 1);
let lp = GaussianLikelihood.log_likelihood(&theta, &data);
println!("Log-likelihood: {}", lp);
```
*/

use num_traits::Float;
use rand::Rng;
use rand_distr::{Distribution, Normal, StandardNormal};
use std::f64::consts::PI;

/// The position of the Markov chain: a location/scale pair.
///
/// Replaced as a whole when a candidate is accepted; the components are
/// never mutated individually.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params<T: Float> {
    /// Mean of the modeled Gaussian. Unconstrained.
    pub location: T,
    /// Standard deviation of the modeled Gaussian. Valid states have
    /// `scale > 0`; the prior marks everything else as outside the support.
    pub scale: T,
}

/// A trait for improper priors evaluated as a support indicator.
pub trait Prior<T: Float> {
    /// Returns 1 if `theta` lies inside the support, 0 otherwise.
    fn indicator(&self, theta: &Params<T>) -> u8;

    /// The log of the indicator: zero inside the support, negative infinity
    /// outside. Total; `log(0)` is a sentinel value, not an error.
    fn ln_indicator(&self, theta: &Params<T>) -> T {
        if self.indicator(theta) == 0 {
            T::neg_infinity()
        } else {
            T::zero()
        }
    }
}

/// A trait for log-likelihood evaluators over a fixed, caller-owned dataset.
pub trait Likelihood<T: Float> {
    /// Returns `log P(data | theta)`.
    fn log_likelihood(&self, theta: &Params<T>, data: &[T]) -> T;
}

/// A trait for symmetric proposal generators.
///
/// Symmetry (q(b | a) == q(a | b)) is the precondition that lets the
/// acceptance rule in [`crate::acceptance`] compare plain likelihood ratios
/// without a Hastings correction term.
pub trait Proposal<T: Float> {
    /// Draws a candidate from q(· | theta), consuming entropy from `rng`.
    fn propose<R: Rng + ?Sized>(&self, theta: &Params<T>, rng: &mut R) -> Params<T>;
}

/// Improper prior over the scale component: indicator 1 iff `scale > 0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositiveScale;

impl<T: Float> Prior<T> for PositiveScale {
    fn indicator(&self, theta: &Params<T>) -> u8 {
        if theta.scale > T::zero() {
            1
        } else {
            0
        }
    }
}

/**
The log-likelihood of iid Gaussian observations with mean `location` and
standard deviation `scale`:

\[
\sum_i \left[ -\ln(\sigma \sqrt{2\pi}) - \frac{(x_i - \mu)^2}{2\sigma^2} \right]
\]

Requires `scale > 0`; the driver gates every call through the prior so the
density is never evaluated at a non-positive scale. An empty dataset sums
to zero.
*/
#[derive(Debug, Clone, Copy, Default)]
pub struct GaussianLikelihood;

impl<T: Float> Likelihood<T> for GaussianLikelihood {
    fn log_likelihood(&self, theta: &Params<T>, data: &[T]) -> T {
        let norm = (theta.scale * T::from((2.0 * PI).sqrt()).unwrap()).ln();
        let denom = T::from(2.0).unwrap() * theta.scale * theta.scale;
        data.iter().fold(T::zero(), |lp, &x| {
            let diff = x - theta.location;
            lp - norm - diff * diff / denom
        })
    }
}

/**
A symmetric Gaussian random walk over the scale component.

The location is left unchanged and a new scale is drawn from a Normal
centered at the current scale with a fixed standard deviation (the
reference model uses 0.5). This is the one-dimensional-walk variant: only
the scale moves.

# Examples

```rust
use metro_mcmc::distributions::{Params, Proposal, ScaleRandomWalk};
use rand::rngs::SmallRng;
use rand::SeedableRng;

let walk = ScaleRandomWalk::new(0.5);
let mut rng = SmallRng::seed_from_u64(42);
let candidate = walk.propose(&Params { location: 10.0, scale: 1.0 }, &mut rng);
assert_eq!(candidate.location, 10.0);
```
*/
#[derive(Debug, Clone, Copy)]
pub struct ScaleRandomWalk<T>
where
    T: Float,
    StandardNormal: Distribution<T>,
{
    noise: Normal<T>,
}

impl<T> ScaleRandomWalk<T>
where
    T: Float,
    StandardNormal: Distribution<T>,
{
    /// Creates a random walk whose scale perturbations have standard
    /// deviation `step`. `step` must be finite and positive.
    pub fn new(step: T) -> Self {
        Self {
            noise: Normal::new(T::zero(), step)
                .expect("Expecting creation of normal distribution to succeed."),
        }
    }
}

impl<T> Proposal<T> for ScaleRandomWalk<T>
where
    T: Float,
    StandardNormal: Distribution<T>,
{
    fn propose<R: Rng + ?Sized>(&self, theta: &Params<T>, rng: &mut R) -> Params<T> {
        Params {
            location: theta.location,
            scale: theta.scale + self.noise.sample(rng),
        }
    }
}
