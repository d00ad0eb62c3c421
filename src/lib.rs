//! Field-tagged measurement vectors for unscented sensor fusion.
//!
//! A measurement vector flavor is declared once as an ordered list of named
//! physical quantities (accelerometer, gyroscope, pressure ports, ...) via
//! [`measurement_vector!`]. The result owns one contiguous
//! `nalgebra::SVector` and is a plain fixed-length vector to every piece of
//! linear-algebra code — covariance recombination, weighted sigma-point
//! sums — while call sites read and write individual fields by key with the
//! offsets resolved at compile time.
//!
//! Misuse is rejected before anything runs: duplicate keys in one flavor,
//! writing a field with the wrong dimension, or assigning a whole vector of
//! mismatched length are all build failures. The only runtime fallible
//! surface is the unscented helper layer in [`filters`], which returns
//! [`FusionResult`].

pub mod error;
pub mod filters;
pub mod measurement;
pub mod types;

pub use error::{FusionError, FusionResult};
pub use measurement::{FieldOf, MeasurementVector, Residual};

// Re-exported for the `measurement_vector!` expansion; not part of the API.
#[doc(hidden)]
pub use nalgebra;
