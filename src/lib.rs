pub mod acceptance;
pub mod distributions;
pub mod metropolis_hastings;
pub mod stats;
