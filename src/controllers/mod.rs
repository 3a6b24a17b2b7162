//! Controllers del sistema
//!
//! Lógica de negocio por concern, entre las rutas y los repositorios.

pub mod car_controller;
pub mod dashboard_controller;
pub mod sync_controller;
pub mod trip_controller;
pub mod webhook_controller;
