//! Middleware del sistema
//!
//! Gate de acceso y CORS.

pub mod access_gate;
pub mod cors;

pub use access_gate::*;
pub use cors::*;
