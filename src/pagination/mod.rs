//! Pagination module
//!
//! Turns "fetch one page" into "produce every page" or "produce every item".
//!
//! # Overview
//!
//! A fetcher takes a parameter set and returns one [`Page`]. The engine calls
//! it repeatedly, advancing the page number by one, binding a server-issued
//! seed after the first page so randomized orderings stay stable, and
//! stopping on the last page without requesting past it. The async variant
//! is a `futures` stream; the blocking variant is an `Iterator`.

mod iter;
mod stream;
mod types;

pub use iter::{flatten_blocking, paginate_blocking, Items, Pages};
pub use stream::{flatten, paginate};
pub use types::{next_params, Page, PageParams, PaginationMeta};

#[cfg(test)]
mod tests;
