//! A small MCMC demo: estimates the standard deviation of a Gaussian
//! population from 1000 observations using Metropolis-Hastings, then prints
//! a summary of the run.

use metro_mcmc::acceptance::MetropolisRule;
use metro_mcmc::distributions::{GaussianLikelihood, Params, PositiveScale, ScaleRandomWalk};
use metro_mcmc::metropolis_hastings::MetropolisHastings;
use metro_mcmc::stats::{mean, tail, variance};

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    const N_OBSERVATIONS: usize = 1_000;
    const ITERATIONS: usize = 50_000;
    const SEED: u64 = 42;

    // Observe 1000 individuals from a Normal(10, 3) population.
    let population = Normal::new(10.0, 3.0)?;
    let mut rng = SmallRng::seed_from_u64(SEED);
    let observations: Vec<f64> = population
        .sample_iter(&mut rng)
        .take(N_OBSERVATIONS)
        .collect();

    // Walk the scale component only, starting from the sample mean and a
    // deliberately poor initial scale guess.
    let initial = Params {
        location: mean(&observations),
        scale: 0.1,
    };
    let mut mh = MetropolisHastings::new(
        PositiveScale,
        GaussianLikelihood,
        ScaleRandomWalk::new(0.5),
        MetropolisRule,
        initial,
    )
    .set_seed(SEED);

    let trace = mh.run_progress(&observations, ITERATIONS);

    println!("{} samples are rejected.", trace.rejected.len());
    println!("{} samples are accepted.", trace.accepted.len());
    println!("Acceptance rate: {:.3}", trace.acceptance_rate());
    println!("The last 10 accepted values for the scale are:");
    println!("{:?}", tail(&trace.accepted, 10));

    let recent = tail(&trace.accepted, 100);
    println!(
        "Posterior scale estimate: {:.2} +/- {:.2}",
        mean(recent),
        variance(recent).sqrt()
    );

    Ok(())
}
