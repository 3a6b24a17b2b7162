pub mod admin_routes;
pub mod car_routes;
pub mod contact_routes;
pub mod licensing_routes;
pub mod session_routes;
pub mod trip_routes;
pub mod webhook_routes;
