//! Linear algebra type system for measurement-space fusion
//!
//! Provides compile-time dimension checking and clean type aliases
//! for the shipped measurement vector flavors.

use nalgebra::{SMatrix, SVector};

// ===== Field Dimensions =====
pub const MEASURE_DIM_ACCEL: usize = 3; // (x, y, z)
pub const MEASURE_DIM_GYRO: usize = 3; // (x, y, z)
pub const MEASURE_DIM_STATIC_PRESSURE: usize = 1;
pub const MEASURE_DIM_DYNAMIC_PRESSURE: usize = 1;
pub const MEASURE_DIM_GNSS_POS: usize = 3; // (east, north, up)
pub const MEASURE_DIM_GNSS_VEL: usize = 3; // (ve, vn, vu)

// ===== Flavor Totals =====
pub const AIRDATA_DIM: usize = MEASURE_DIM_ACCEL
    + MEASURE_DIM_GYRO
    + MEASURE_DIM_STATIC_PRESSURE
    + MEASURE_DIM_DYNAMIC_PRESSURE;
pub const GNSS_DIM: usize = MEASURE_DIM_GNSS_POS + MEASURE_DIM_GNSS_VEL;

// ===== Measurement-Space Types =====
pub type AirdataVec = SVector<f64, AIRDATA_DIM>;
pub type AirdataCov = SMatrix<f64, AIRDATA_DIM, AIRDATA_DIM>;
pub type GnssVec = SVector<f64, GNSS_DIM>;
pub type GnssCov = SMatrix<f64, GNSS_DIM, GNSS_DIM>;

// ===== Sigma Point Counts (for UKF recombination) =====
pub const AIRDATA_SIGMA_COUNT: usize = 2 * AIRDATA_DIM + 1; // 17
pub const GNSS_SIGMA_COUNT: usize = 2 * GNSS_DIM + 1; // 13
