//! Source adapters
//!
//! Each source ships an async and a blocking client with the same methods,
//! both implementing the capability traits in [`crate::source`].

pub mod reddit;
pub mod unsplash;
pub mod wallhaven;
