//! Repositorios de acceso a datos
//!
//! Un repositorio por tabla, SQL crudo vía sqlx.

pub mod car_repository;
pub mod profile_repository;
pub mod trip_repository;
