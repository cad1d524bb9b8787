//! Core traits defined in `authhub-core` and implemented by other crates.

pub mod cache;

pub use cache::CacheProvider;
