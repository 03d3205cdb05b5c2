pub mod access_jwt;
pub mod factory;

pub use access_jwt::{AccessKey, AuthService};
pub use factory::build_auth_service;
