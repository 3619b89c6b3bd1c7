//! Transaction form routes
//!
//! Features:
//! - One fresh form instance per page load
//! - Field edits synced as the user types, totals swapped out-of-band
//! - Add/remove line items, validate-on-submit with inline errors and a toast
//!
//! Structure:
//! - api.rs: JSON snapshot and HTMX endpoints
//! - page.rs: Full page rendering and form fragments

pub mod api;
pub mod page;

pub use api::{
    api_form_snapshot,
    htmx_add_item,
    htmx_remove_item,
    htmx_submit,
    htmx_update_fields,
};

pub use page::{
    page_purchase,
    page_sales,
};
