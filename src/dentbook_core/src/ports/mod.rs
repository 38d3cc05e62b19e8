pub mod api;
pub mod repositories;
pub mod services;
