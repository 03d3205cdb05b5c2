/**
 * Responsibility
 *  - core (decode + extractor) と types (リソース別 alias) を束ねる
 */
mod core;
mod types;

pub use core::PublicIdResource;
pub use types::*;
