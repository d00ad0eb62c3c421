//! Field-tagged composite measurement vectors.
//!
//! A measurement vector is declared as an ordered list of named fields
//! (accelerometer, gyroscope, pressure ports, ...) but stores everything in
//! one contiguous `nalgebra::SVector`, so covariance math and sigma-point
//! recombination see a plain fixed-length vector. Field offsets are resolved
//! at compile time through [`FieldOf`]; duplicate keys or mismatched
//! dimensions fail the build, not the run.

use std::ops::{Add, AddAssign, Mul, Sub};

use nalgebra::DimName;

/// Ties a key type to its place inside one measurement vector flavor.
///
/// Implementations are generated by [`measurement_vector!`], one per field,
/// with offsets accumulated in declaration order. Declaring the same key
/// twice in one flavor produces two conflicting implementations and is
/// rejected by the compiler.
pub trait FieldOf<V> {
    /// Field dimension as a nalgebra dimension type.
    type Dim: DimName;

    /// Index of the field's first element in the flattened buffer.
    const OFFSET: usize;

    /// Number of scalar elements the field occupies.
    const DIM: usize;
}

/// Per-flavor measurement difference.
///
/// The generated implementation subtracts the whole buffer elementwise,
/// which is correct for every field whose natural difference is plain
/// subtraction. A flavor carrying wrap-around quantities (headings, angles)
/// implements this by hand instead of going through the macro.
pub trait Residual {
    /// Difference `self - other`, as consumed by innovation computation.
    fn residual(&self, other: &Self) -> Self;
}

/// Common surface of all measurement vector flavors, for filter code that
/// is generic over the measurement space.
pub trait MeasurementVector:
    Copy
    + Default
    + Residual
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<f64, Output = Self>
    + AddAssign
{
    /// Total dimension of the flattened buffer.
    const SIZE: usize;

    /// A vector with every field zeroed.
    fn zeros() -> Self;

    /// Total dimension, identical for every instance of the flavor.
    fn size(&self) -> usize {
        Self::SIZE
    }
}

/// Declares a measurement vector flavor from an ordered `Key: dimension`
/// field list.
///
/// Each key is a caller-declared unit struct; the entry order is the memory
/// order of the flattened buffer. The macro emits the flavor struct, a
/// [`FieldOf`] implementation per key carrying its compile-time offset, the
/// per-field view accessors, whole-vector conversions, and the positional
/// vector-space operators.
///
/// ```
/// use sensor_fusion_rs::measurement_vector;
///
/// pub struct WheelSpeed;
/// pub struct YawRate;
///
/// measurement_vector! {
///     pub struct OdometryMeasurement {
///         WheelSpeed: 2,
///         YawRate: 1,
///     }
/// }
///
/// let mut m = OdometryMeasurement::zeros();
/// m.set_field::<YawRate>(&nalgebra::Vector1::new(0.3));
/// assert_eq!(m.size(), 3);
/// assert_eq!(m.field::<YawRate>()[0], 0.3);
/// ```
#[macro_export]
macro_rules! measurement_vector {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $key:ident : $dim:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        ///
        /// Default construction zeroes the backing buffer, so a field that
        /// was never written reads as zero.
        #[derive(Clone, Copy, Debug, PartialEq)]
        $vis struct $name($crate::nalgebra::SVector<f64, { 0 $(+ $dim)+ }>);

        impl $name {
            /// Total dimension of the flattened buffer.
            pub const SIZE: usize = 0 $(+ $dim)+;

            /// A vector with every field zeroed.
            pub fn zeros() -> Self {
                Self($crate::nalgebra::SVector::zeros())
            }

            /// Wraps a whole vector of matching dimension.
            pub fn from_vector(
                vector: $crate::nalgebra::SVector<f64, { 0 $(+ $dim)+ }>,
            ) -> Self {
                Self(vector)
            }

            /// Total dimension, identical for every instance.
            pub fn size(&self) -> usize {
                Self::SIZE
            }

            /// Read-only view of one field's elements.
            pub fn field<K>(
                &self,
            ) -> $crate::nalgebra::VectorView<
                '_,
                f64,
                K::Dim,
                $crate::nalgebra::U1,
                $crate::nalgebra::Const<{ 0 $(+ $dim)+ }>,
            >
            where
                K: $crate::measurement::FieldOf<Self>,
            {
                self.0.generic_view(
                    (K::OFFSET, 0),
                    (
                        <K::Dim as $crate::nalgebra::DimName>::name(),
                        $crate::nalgebra::Const::<1>,
                    ),
                )
            }

            /// Write-through view of one field's elements. Writes land in
            /// the shared buffer immediately; no other field is affected.
            pub fn field_mut<K>(
                &mut self,
            ) -> $crate::nalgebra::VectorViewMut<
                '_,
                f64,
                K::Dim,
                $crate::nalgebra::U1,
                $crate::nalgebra::Const<{ 0 $(+ $dim)+ }>,
            >
            where
                K: $crate::measurement::FieldOf<Self>,
            {
                self.0.generic_view_mut(
                    (K::OFFSET, 0),
                    (
                        <K::Dim as $crate::nalgebra::DimName>::name(),
                        $crate::nalgebra::Const::<1>,
                    ),
                )
            }

            /// Overwrites one field from a vector of matching dimension.
            pub fn set_field<K>(
                &mut self,
                value: &$crate::nalgebra::OVector<f64, K::Dim>,
            ) where
                K: $crate::measurement::FieldOf<Self>,
                $crate::nalgebra::DefaultAllocator:
                    $crate::nalgebra::allocator::Allocator<K::Dim>,
            {
                self.field_mut::<K>().copy_from(value);
            }

            /// The whole flattened vector.
            pub fn as_vector(
                &self,
            ) -> &$crate::nalgebra::SVector<f64, { 0 $(+ $dim)+ }> {
                &self.0
            }

            /// Mutable access to the whole flattened vector.
            pub fn as_vector_mut(
                &mut self,
            ) -> &mut $crate::nalgebra::SVector<f64, { 0 $(+ $dim)+ }> {
                &mut self.0
            }

            /// Unwraps into the flattened vector.
            pub fn into_vector(
                self,
            ) -> $crate::nalgebra::SVector<f64, { 0 $(+ $dim)+ }> {
                self.0
            }
        }

        impl ::core::default::Default for $name {
            fn default() -> Self {
                Self::zeros()
            }
        }

        impl ::core::ops::Deref for $name {
            type Target = $crate::nalgebra::SVector<f64, { 0 $(+ $dim)+ }>;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl ::core::ops::DerefMut for $name {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }

        impl ::core::convert::From<$crate::nalgebra::SVector<f64, { 0 $(+ $dim)+ }>>
            for $name
        {
            fn from(vector: $crate::nalgebra::SVector<f64, { 0 $(+ $dim)+ }>) -> Self {
                Self(vector)
            }
        }

        impl ::core::convert::From<$name>
            for $crate::nalgebra::SVector<f64, { 0 $(+ $dim)+ }>
        {
            fn from(measurement: $name) -> Self {
                measurement.0
            }
        }

        impl ::core::ops::Add for $name {
            type Output = Self;

            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl ::core::ops::Sub for $name {
            type Output = Self;

            fn sub(self, rhs: Self) -> Self {
                Self(self.0 - rhs.0)
            }
        }

        impl ::core::ops::Neg for $name {
            type Output = Self;

            fn neg(self) -> Self {
                Self(-self.0)
            }
        }

        impl ::core::ops::Mul<f64> for $name {
            type Output = Self;

            fn mul(self, rhs: f64) -> Self {
                Self(self.0 * rhs)
            }
        }

        impl ::core::ops::Div<f64> for $name {
            type Output = Self;

            fn div(self, rhs: f64) -> Self {
                Self(self.0 / rhs)
            }
        }

        impl ::core::ops::AddAssign for $name {
            fn add_assign(&mut self, rhs: Self) {
                self.0 += rhs.0;
            }
        }

        impl ::core::ops::SubAssign for $name {
            fn sub_assign(&mut self, rhs: Self) {
                self.0 -= rhs.0;
            }
        }

        impl ::core::ops::MulAssign<f64> for $name {
            fn mul_assign(&mut self, rhs: f64) {
                self.0 *= rhs;
            }
        }

        impl $crate::measurement::Residual for $name {
            fn residual(&self, other: &Self) -> Self {
                Self(self.0 - other.0)
            }
        }

        impl $crate::measurement::MeasurementVector for $name {
            const SIZE: usize = 0 $(+ $dim)+;

            fn zeros() -> Self {
                Self($crate::nalgebra::SVector::zeros())
            }
        }

        $crate::measurement_vector!(@field $name, (0), $($key : $dim,)+);
    };

    (@field $name:ident, ($offset:expr), $key:ident : $dim:literal, $($rest:tt)*) => {
        impl $crate::measurement::FieldOf<$name> for $key {
            type Dim = $crate::nalgebra::Const<$dim>;
            const OFFSET: usize = $offset;
            const DIM: usize = $dim;
        }

        $crate::measurement_vector!(@field $name, ($offset + $dim), $($rest)*);
    };

    (@field $name:ident, ($offset:expr),) => {};
}
