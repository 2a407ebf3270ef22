pub mod coercion;
pub mod encoder;
