//! Contract between the search coordinator and the remote catalog.
//!
//! The catalog exposes two GET endpoints sharing one response envelope:
//!
//! - **listing**: no `q` parameter, filters only.
//! - **search**: `q` present, plus `multiWord` and filters.
//!
//! Both answer `{ success, data, message? }`. [`CatalogService`] abstracts the
//! transport so the coordinator can be driven by [`HttpCatalog`] in production
//! and by in-memory fakes in tests.

mod envelope;
mod error;
mod http;
mod product;
mod service;

pub use envelope::CatalogResponse;
pub use error::{CatalogError, Result};
pub use http::{CatalogEndpoints, HttpCatalog, HttpCatalogBuilder};
pub use product::Product;
pub use service::{CatalogService, Endpoint};
