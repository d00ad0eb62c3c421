pub mod linalg;

pub use linalg::*;

use nalgebra::{Vector1, Vector3};
use serde::{Deserialize, Serialize};

use crate::measurement_vector;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccelSample {
    pub timestamp: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GyroSample {
    pub timestamp: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PressureSample {
    pub timestamp: f64,
    pub pressure_hpa: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GnssSample {
    pub timestamp: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    /// Ground speed [m/s]
    pub speed: f64,
    /// Bearing in radians (0 = North, clockwise)
    pub bearing: f64,
    pub accuracy: f64,
}

// Field keys. Zero-sized tags; the shape attaches per flavor below.
pub struct Accelerometer;
pub struct Gyroscope;
pub struct StaticPressure;
pub struct DynamicPressure;
pub struct Position;
pub struct Velocity;

measurement_vector! {
    /// Combined IMU / airdata measurement: accelerometer, gyroscope and the
    /// static and dynamic pressure ports, flattened in declaration order.
    pub struct AirdataMeasurement {
        Accelerometer: 3,
        Gyroscope: 3,
        StaticPressure: 1,
        DynamicPressure: 1,
    }
}

measurement_vector! {
    /// GNSS measurement in the local ENU frame: position and velocity.
    pub struct GnssMeasurement {
        Position: 3,
        Velocity: 3,
    }
}

impl AirdataMeasurement {
    /// Populates every field from raw sensor samples, ready for an update
    /// step.
    pub fn from_samples(
        accel: &AccelSample,
        gyro: &GyroSample,
        static_pressure: &PressureSample,
        dynamic_pressure: &PressureSample,
    ) -> Self {
        let mut m = Self::zeros();
        m.set_field::<Accelerometer>(&Vector3::new(accel.x, accel.y, accel.z));
        m.set_field::<Gyroscope>(&Vector3::new(gyro.x, gyro.y, gyro.z));
        m.set_field::<StaticPressure>(&Vector1::new(static_pressure.pressure_hpa));
        m.set_field::<DynamicPressure>(&Vector1::new(dynamic_pressure.pressure_hpa));
        m
    }
}

impl GnssMeasurement {
    /// Builds a GNSS measurement in the local ENU frame around `origin`
    /// (latitude, longitude in degrees). Speed and bearing become east/north
    /// velocity components; vertical velocity is not observed and stays zero.
    pub fn from_sample(sample: &GnssSample, origin: (f64, f64)) -> Self {
        let (east, north) =
            latlon_to_meters(sample.latitude, sample.longitude, origin.0, origin.1);
        let mut m = Self::zeros();
        m.set_field::<Position>(&Vector3::new(east, north, sample.altitude));
        m.set_field::<Velocity>(&Vector3::new(
            sample.speed * sample.bearing.sin(),
            sample.speed * sample.bearing.cos(),
            0.0,
        ));
        m
    }
}

/// Convert lat/lon to local meters using equirectangular approximation
fn latlon_to_meters(lat: f64, lon: f64, origin_lat: f64, origin_lon: f64) -> (f64, f64) {
    const R: f64 = 6_371_000.0;
    let d_lat = (lat - origin_lat).to_radians();
    let d_lon = (lon - origin_lon).to_radians();
    let x = R * d_lon * origin_lat.to_radians().cos();
    let y = R * d_lat;
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::FieldOf;
    use approx::assert_relative_eq;

    #[test]
    fn test_instantiation() {
        let m = AirdataMeasurement::zeros();
        assert_eq!(AirdataMeasurement::SIZE, 8);
        assert_eq!(AIRDATA_DIM, AirdataMeasurement::SIZE);
        assert_eq!(m.size(), 8);
    }

    #[test]
    fn test_declaration_order_layout() {
        assert_eq!(<Accelerometer as FieldOf<AirdataMeasurement>>::OFFSET, 0);
        assert_eq!(<Gyroscope as FieldOf<AirdataMeasurement>>::OFFSET, 3);
        assert_eq!(<StaticPressure as FieldOf<AirdataMeasurement>>::OFFSET, 6);
        assert_eq!(<DynamicPressure as FieldOf<AirdataMeasurement>>::OFFSET, 7);
    }

    #[test]
    fn test_assignment() {
        let mut m = AirdataMeasurement::zeros();

        m.set_field::<Gyroscope>(&Vector3::new(1.0, 2.0, 3.0));
        m.set_field::<DynamicPressure>(&Vector1::new(4.0));
        m.set_field::<Accelerometer>(&Vector3::new(5.0, 6.0, 7.0));
        m.set_field::<StaticPressure>(&Vector1::new(8.0));

        assert_eq!(m.size(), 8);

        assert_eq!(m.field::<StaticPressure>()[0], 8.0);
        assert_eq!(m.field::<DynamicPressure>()[0], 4.0);
        assert_relative_eq!(
            Vector3::new(1.0, 2.0, 3.0),
            m.field::<Gyroscope>().clone_owned()
        );
        assert_relative_eq!(
            Vector3::new(5.0, 6.0, 7.0),
            m.field::<Accelerometer>().clone_owned()
        );

        let expected =
            AirdataVec::from_column_slice(&[5.0, 6.0, 7.0, 1.0, 2.0, 3.0, 8.0, 4.0]);
        assert_relative_eq!(expected, *m.as_vector());
    }

    #[test]
    fn test_reassignment() {
        let mut m = AirdataMeasurement::zeros();

        m.set_field::<Gyroscope>(&Vector3::new(1.0, 2.0, 3.0));
        m.set_field::<DynamicPressure>(&Vector1::new(4.0));
        m.set_field::<Accelerometer>(&Vector3::new(5.0, 6.0, 7.0));
        m.set_field::<StaticPressure>(&Vector1::new(8.0));

        assert_eq!(m.size(), 8);
        assert_relative_eq!(
            Vector3::new(1.0, 2.0, 3.0),
            m.field::<Gyroscope>().clone_owned()
        );

        m.set_field::<Gyroscope>(&Vector3::new(4.0, 5.0, 6.0));

        assert_eq!(m.size(), 8);
        assert_relative_eq!(
            Vector3::new(4.0, 5.0, 6.0),
            m.field::<Gyroscope>().clone_owned()
        );

        let expected =
            AirdataVec::from_column_slice(&[5.0, 6.0, 7.0, 4.0, 5.0, 6.0, 8.0, 4.0]);
        assert_relative_eq!(expected, *m.as_vector());
    }

    #[test]
    fn test_multiple_reassignment() {
        let mut m = AirdataMeasurement::zeros();

        m.set_field::<Gyroscope>(&Vector3::new(1.0, 2.0, 3.0));
        m.set_field::<DynamicPressure>(&Vector1::new(4.0));
        m.set_field::<Accelerometer>(&Vector3::new(5.0, 6.0, 7.0));
        m.set_field::<StaticPressure>(&Vector1::new(8.0));

        let expected =
            AirdataVec::from_column_slice(&[5.0, 6.0, 7.0, 1.0, 2.0, 3.0, 8.0, 4.0]);
        assert_relative_eq!(expected, *m.as_vector());

        m.set_field::<Gyroscope>(&Vector3::new(4.0, 5.0, 6.0));
        let expected =
            AirdataVec::from_column_slice(&[5.0, 6.0, 7.0, 4.0, 5.0, 6.0, 8.0, 4.0]);
        assert_relative_eq!(expected, *m.as_vector());

        m.set_field::<Accelerometer>(&Vector3::new(7.0, 8.0, 9.0));
        let expected =
            AirdataVec::from_column_slice(&[7.0, 8.0, 9.0, 4.0, 5.0, 6.0, 8.0, 4.0]);
        assert_relative_eq!(expected, *m.as_vector());

        m.set_field::<DynamicPressure>(&Vector1::new(1.0));
        assert_eq!(m.field::<DynamicPressure>()[0], 1.0);
        let expected =
            AirdataVec::from_column_slice(&[7.0, 8.0, 9.0, 4.0, 5.0, 6.0, 8.0, 1.0]);
        assert_relative_eq!(expected, *m.as_vector());

        m.set_field::<StaticPressure>(&Vector1::new(3.0));
        assert_eq!(m.field::<StaticPressure>()[0], 3.0);
        let expected =
            AirdataVec::from_column_slice(&[7.0, 8.0, 9.0, 4.0, 5.0, 6.0, 3.0, 1.0]);
        assert_relative_eq!(expected, *m.as_vector());
    }

    #[test]
    fn test_from_samples() {
        let accel = AccelSample { timestamp: 0.0, x: 0.1, y: 0.2, z: 9.8 };
        let gyro = GyroSample { timestamp: 0.0, x: 0.01, y: 0.02, z: 0.03 };
        let static_p = PressureSample { timestamp: 0.0, pressure_hpa: 1013.25 };
        let dynamic_p = PressureSample { timestamp: 0.0, pressure_hpa: 12.5 };

        let m = AirdataMeasurement::from_samples(&accel, &gyro, &static_p, &dynamic_p);
        assert_relative_eq!(
            Vector3::new(0.1, 0.2, 9.8),
            m.field::<Accelerometer>().clone_owned()
        );
        assert_eq!(m.field::<StaticPressure>()[0], 1013.25);
        assert_eq!(m.field::<DynamicPressure>()[0], 12.5);
    }

    #[test]
    fn test_gnss_from_sample_at_origin() {
        let sample = GnssSample {
            timestamp: 0.0,
            latitude: 48.0,
            longitude: 11.0,
            altitude: 520.0,
            speed: 2.0,
            bearing: std::f64::consts::FRAC_PI_2, // due east
            accuracy: 3.0,
        };
        let m = GnssMeasurement::from_sample(&sample, (48.0, 11.0));

        assert_eq!(m.size(), 6);
        assert_relative_eq!(
            Vector3::new(0.0, 0.0, 520.0),
            m.field::<Position>().clone_owned()
        );
        let vel = m.field::<Velocity>().clone_owned();
        assert_relative_eq!(2.0, vel[0], epsilon = 1e-12);
        assert_relative_eq!(0.0, vel[1], epsilon = 1e-12);
        assert_eq!(vel[2], 0.0);
    }

    #[test]
    fn test_flavors_do_not_interfere() {
        let mut airdata = AirdataMeasurement::zeros();
        let mut gnss = GnssMeasurement::zeros();

        airdata.set_field::<Gyroscope>(&Vector3::new(1.0, 2.0, 3.0));
        gnss.set_field::<Velocity>(&Vector3::new(9.0, 8.0, 7.0));

        assert_relative_eq!(
            Vector3::new(1.0, 2.0, 3.0),
            airdata.field::<Gyroscope>().clone_owned()
        );
        assert_relative_eq!(
            Vector3::new(9.0, 8.0, 7.0),
            gnss.field::<Velocity>().clone_owned()
        );
    }
}
