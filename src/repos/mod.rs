pub mod comment_repo;
pub mod error;
#[cfg(test)]
pub mod memory;
pub mod store;
pub mod thread_repo;

pub use store::{PgThreadStore, ThreadStore};
