//! Geoulah Server
//!
//! Serves the catalog, book and chapter pages rendered on the server, a
//! small JSON API over the book data and the site's static assets.

pub mod handlers;
pub mod routes;
pub mod state;
