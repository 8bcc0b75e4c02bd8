//! Domain models for the Refinery Operations Platform

mod chemical;
mod fractionation;
mod meter;
mod notification;
mod orders;
mod production;
mod records;
mod refinery;
mod tank;

pub use chemical::*;
pub use fractionation::*;
pub use meter::*;
pub use notification::*;
pub use orders::*;
pub use production::*;
pub use records::*;
pub use refinery::*;
pub use tank::*;
