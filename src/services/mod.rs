pub mod auth_service;
pub mod dispatch_service;
pub mod gateway;
