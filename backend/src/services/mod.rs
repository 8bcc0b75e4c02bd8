//! Business logic services for the Refinery Operations Platform

pub mod chemicals;
pub mod fractionation;
pub mod intake;
pub mod notification;
pub mod orders;
pub mod production;
pub mod refinery;
pub mod reporting;
pub mod tanks;

pub use chemicals::ChemicalsService;
pub use fractionation::FractionationService;
pub use intake::IntakeService;
pub use notification::NotificationService;
pub use orders::OrderService;
pub use production::ProductionService;
pub use refinery::RefineryService;
pub use reporting::ReportingService;
pub use tanks::TankService;
