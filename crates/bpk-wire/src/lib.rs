#![warn(clippy::pedantic)]

pub mod error;
pub mod frame;
pub mod marker;
pub mod varint;

pub use error::WireError;
pub use marker::Marker;
