//! API Routes
//!
//! Route handlers organized by page.

pub mod assistant;
pub mod dashboard;
pub mod devices;
pub mod health;
pub mod medication;
pub mod onboarding;
