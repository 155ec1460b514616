/*!
The Metropolis accept/reject decision over combined log-scores
(log-likelihood plus log-prior).

The rule realizes the acceptance probability `min(1, ratio)` with a single
strict comparison: uphill moves are accepted unconditionally, and downhill
moves are accepted when `exp(candidate - current)` exceeds a uniform draw.
The decision kernel is exposed separately from the entropy draw so tests
can pin the uniform value.
*/

use num_traits::Float;
use rand::distributions::{Distribution, Standard};
use rand::Rng;

/// A trait for accept/reject decisions between two combined log-scores.
pub trait Acceptance<T: Float> {
    /// Decides whether the chain moves from a state scoring `current` to a
    /// candidate scoring `candidate`, drawing any randomness from `rng`.
    fn accept<R: Rng + ?Sized>(&self, current: T, candidate: T, rng: &mut R) -> bool;
}

/**
The classic Metropolis rule.

# Examples

```rust
use metro_mcmc::acceptance::{Acceptance, MetropolisRule};
use rand::rngs::SmallRng;
use rand::SeedableRng;

let mut rng = SmallRng::seed_from_u64(42);
// Uphill moves never consult the random source.
assert!(MetropolisRule.accept(-10.0, -5.0, &mut rng));
```
*/
#[derive(Debug, Clone, Copy, Default)]
pub struct MetropolisRule;

impl MetropolisRule {
    /// The decision kernel with the uniform draw `u` pinned.
    ///
    /// Accepts unconditionally when `candidate > current`. A non-finite
    /// `current` score never reaches the subtraction: the move is accepted
    /// exactly when the candidate score is finite, so `inf - inf` cannot
    /// leak a NaN into the chain. Otherwise `exp(candidate - current)` is
    /// compared strictly against `u`; an exact tie rejects.
    pub fn decide<T: Float>(&self, current: T, candidate: T, u: T) -> bool {
        if candidate > current {
            return true;
        }
        if !current.is_finite() {
            return candidate.is_finite();
        }
        let ratio = (candidate - current).exp();
        ratio > u
    }
}

impl<T> Acceptance<T> for MetropolisRule
where
    T: Float,
    Standard: Distribution<T>,
{
    fn accept<R: Rng + ?Sized>(&self, current: T, candidate: T, rng: &mut R) -> bool {
        if candidate > current {
            return true;
        }
        // The uniform is only drawn for non-uphill moves, keeping the
        // entropy consumption order fixed for a given seed.
        let u: T = rng.gen();
        self.decide(current, candidate, u)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn uphill_moves_accept_for_any_uniform() {
        assert!(MetropolisRule.decide(-10.0, -5.0, 0.0));
        assert!(MetropolisRule.decide(-10.0, -5.0, 1.0));
    }

    #[test]
    fn uphill_moves_accept_through_any_rng() {
        // Stub rngs pinned at the extremes of the uniform range.
        let mut low = StepRng::new(0, 0);
        let mut high = StepRng::new(u64::MAX, 0);
        assert!(MetropolisRule.accept(-10.0, -5.0, &mut low));
        assert!(MetropolisRule.accept(-10.0, -5.0, &mut high));
    }

    #[test]
    fn downhill_moves_accept_iff_ratio_exceeds_uniform() {
        // ratio = exp(-1) ~ 0.3679
        assert!(MetropolisRule.decide(0.0, -1.0, 0.2));
        assert!(!MetropolisRule.decide(0.0, -1.0, 0.5));
    }

    #[test]
    fn exact_tie_rejects() {
        // Equal scores give ratio = exp(0) = 1 exactly; 1 > 1 is false.
        assert!(!MetropolisRule.decide(-2.0, -2.0, 1.0));
    }

    #[test]
    fn non_finite_current_accepts_finite_candidate() {
        assert!(MetropolisRule.decide(f64::NEG_INFINITY, -100.0, 1.0));
    }

    #[test]
    fn both_scores_non_finite_rejects_deterministically() {
        assert!(!MetropolisRule.decide(f64::NEG_INFINITY, f64::NEG_INFINITY, 0.0));
        assert!(!MetropolisRule.decide(f64::NEG_INFINITY, f64::NEG_INFINITY, 1.0));
    }

    #[test]
    fn candidate_outside_support_rejects() {
        // ratio = exp(-inf) = 0 never exceeds a draw from [0, 1).
        let mut low = StepRng::new(0, 0);
        assert!(!MetropolisRule.accept(-3.0, f64::NEG_INFINITY, &mut low));
    }
}
