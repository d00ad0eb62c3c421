pub mod unscented;

pub use unscented::{innovation, weighted_covariance, weighted_mean, MerweConfig, SigmaWeights};
