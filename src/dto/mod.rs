//! DTOs de la API
//!
//! Requests y responses serializables, uno por concern.

pub mod car_dto;
pub mod contact_dto;
pub mod dashboard_dto;
pub mod trip_dto;
pub mod webhook_dto;
