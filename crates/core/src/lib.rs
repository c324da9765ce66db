//! Domain types and pure input rules for the Folio project showcase.
//!
//! Nothing in this crate touches the filesystem or the network; the store
//! lives in `folio-db` and the HTTP surface in `folio-api`.

pub mod error;
pub mod project;
pub mod types;
pub mod upload;
