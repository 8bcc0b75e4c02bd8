//! HTTP handlers for the Refinery Operations Platform

pub mod chemicals;
pub mod fractionation;
pub mod health;
pub mod legacy;
pub mod notification;
pub mod orders;
pub mod production;
pub mod refinery;
pub mod reporting;
pub mod tanks;

pub use chemicals::*;
pub use fractionation::*;
pub use health::*;
pub use legacy::*;
pub use notification::*;
pub use orders::*;
pub use production::*;
pub use refinery::*;
pub use reporting::*;
pub use tanks::*;
