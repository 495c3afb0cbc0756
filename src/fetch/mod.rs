//! Fetch Module
//!
//! Read-through fetching from the origin API and the resource catalogue
//! built on top of it.

mod origin;
mod read_through;

pub use origin::{OriginApi, PostDetail, Resource};
pub use read_through::{FetchResult, ReadThrough, Source, DEFAULT_TTL};
