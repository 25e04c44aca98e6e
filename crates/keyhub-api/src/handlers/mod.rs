//! Route handlers organized by audience.

pub mod activate;
pub mod admin;
pub mod health;
