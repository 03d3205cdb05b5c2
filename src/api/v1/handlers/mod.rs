pub mod health;
pub mod threads;
