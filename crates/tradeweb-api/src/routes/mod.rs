//! Route modules for the API server
//!
//! - transactions: sales/purchase form pages and their HTMX endpoints
//!
//! Each module follows a consistent structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON API and HTMX partial endpoints
//! - page.rs: HTMX page rendering

pub mod transactions;
