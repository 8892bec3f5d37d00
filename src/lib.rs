//! nginx-log-stats - access-log statistics over a document store
//!
//! - [`stats`]: total, per-method and status-check counts
//! - [`lister`]: every document of a collection
//! - [`annotations`]: small typed string/number helpers
//! - [`store`]: MongoDB, redb and in-memory collections behind one interface

pub mod annotations;
pub mod cli;
pub mod config;
pub mod lister;
pub mod models;
pub mod reporters;
pub mod stats;
pub mod store;
