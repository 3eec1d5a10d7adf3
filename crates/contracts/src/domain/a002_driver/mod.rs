pub mod aggregate;

pub use aggregate::{Driver, DriverId, DriverStatus};
