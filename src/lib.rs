//! Core library for the wms-catalog-export command line application.
//!
//! The library exposes the pieces of a single export run: the WMS API access
//! under [`api`], typed records in [`model`], text cleanup in [`sanitize`], the
//! product → SKU flattening in [`flatten`], table and spreadsheet output under
//! [`io`], and the orchestration of a whole run in [`export`].

pub mod api;
pub mod error;
pub mod export;
pub mod flatten;
pub mod io;
pub mod model;
pub mod sanitize;

pub use error::{ExportError, Result};
