use uom::si::{
    f64::{Length, Time, Velocity, Volume, VolumeRate},
    length::meter,
    time::day,
    volume::cubic_meter,
};

/// Extension trait for rates expressed per day.
///
/// Volume rates map to m³/d and velocities to m/d.
pub trait PerDay: Sized {
    /// Constructs the rate from its magnitude per day.
    fn from_per_day(value: f64) -> Self;

    /// Returns the magnitude of the rate per day.
    fn per_day(self) -> f64;
}

impl PerDay for VolumeRate {
    fn from_per_day(value: f64) -> Self {
        Volume::new::<cubic_meter>(value) / Time::new::<day>(1.0)
    }

    fn per_day(self) -> f64 {
        let volume: Volume = self * Time::new::<day>(1.0);
        volume.get::<cubic_meter>()
    }
}

impl PerDay for Velocity {
    fn from_per_day(value: f64) -> Self {
        Length::new::<meter>(value) / Time::new::<day>(1.0)
    }

    fn per_day(self) -> f64 {
        let distance: Length = self * Time::new::<day>(1.0);
        distance.get::<meter>()
    }
}
