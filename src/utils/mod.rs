//! Utilidades del sistema
//!
//! Este módulo contiene helpers de errores, JWT y validación.

pub mod errors;
pub mod extract;
pub mod jwt;
pub mod validation;
