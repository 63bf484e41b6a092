//! Контракты (DTO), общие для backend и frontend.

pub mod dashboards;
pub mod system;
