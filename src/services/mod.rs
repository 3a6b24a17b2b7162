//! Servicios del sistema
//!
//! Integraciones HTTP salientes y lógica sobre storage.

pub mod licensing_service;
pub mod photo_service;
pub mod specs_service;
pub mod webhook_service;
