pub mod bodies;
pub mod clock;
pub mod constants;
pub mod ephemeris;
pub mod heliocentric;
pub mod kepler;
pub mod orbital_elements;
pub mod orrery_errors;
pub mod params;
pub mod time;

pub use bodies::Body;
pub use clock::{ClockReader, SimulationClock};
pub use ephemeris::{EphemerisEngine, OrbitPath};
pub use orrery_errors::OrreryError;
pub use params::{EngineParams, PathClosure};
