//! Transaction form endpoints - JSON snapshot and HTMX partial responses
//!
//! Endpoints:
//! - api_form_snapshot: Current draft, errors and total of one form (JSON)
//! - htmx_update_fields: Apply edited fields, refresh totals (out-of-band fragments)
//! - htmx_add_item: Append a blank item (form fragment)
//! - htmx_remove_item: Remove an item by index (form fragment)
//! - htmx_submit: Validate and deliver (form fragment + toast)

use axum::extract::{Path, Query, State};
use axum::Form;
use serde::Serialize;
use std::collections::BTreeMap;
use tradeweb_core::{Decimal, SharedForm, TransactionDraft, TransactionKind};

use super::page::{render_form, render_toast, render_totals_oob};
use crate::{ApiError, AppState};

/// Posted form body as ordered `name=value` pairs
type FieldPairs = Vec<(String, String)>;

/// JSON view of one open form
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshot {
    pub id: String,
    pub kind: TransactionKind,
    pub title: String,
    pub draft: TransactionDraft,
    pub errors: BTreeMap<String, Vec<String>>,
    /// `null` when the total does not fit in a decimal
    pub grand_total: Option<Decimal>,
}

/// Look up a form handle; the registry lock is released before returning
async fn find_form(state: &AppState, id: &str) -> Result<SharedForm, ApiError> {
    Ok(state.forms.read().await.get(id)?)
}

/// Get one form's state (JSON API)
pub async fn api_form_snapshot(
    state: State<AppState>,
    path: Path<String>,
) -> Result<String, ApiError> {
    let id = path.0;
    let handle = find_form(&state, &id).await?;
    let form = handle.lock().await;

    let snapshot = FormSnapshot {
        kind: form.kind(),
        title: form.display().title.clone(),
        draft: form.draft().clone(),
        errors: form.errors().messages(),
        grand_total: form.grand_total(),
        id,
    };
    serde_json::to_string(&snapshot).map_err(|e| {
        log::error!("Failed to serialize form snapshot: {}", e);
        ApiError::InternalError
    })
}

/// HTMX: Field edits - stores the posted values and swaps totals in place
pub async fn htmx_update_fields(
    state: State<AppState>,
    path: Path<String>,
    Form(fields): Form<FieldPairs>,
) -> Result<String, ApiError> {
    let handle = find_form(&state, &path.0).await?;
    let mut form = handle.lock().await;

    let posted = fields.len();
    let applied = form.apply_fields(fields);
    log::debug!("Form {}: applied {} of {} fields", path.0, applied, posted);

    Ok(render_totals_oob(&form, &state.config.currency.symbol))
}

/// HTMX: Add item - keeps in-flight edits, appends a blank row
pub async fn htmx_add_item(
    state: State<AppState>,
    path: Path<String>,
    Form(fields): Form<FieldPairs>,
) -> Result<String, ApiError> {
    let handle = find_form(&state, &path.0).await?;
    let mut form = handle.lock().await;

    form.apply_fields(fields);
    form.add_item();
    log::debug!("Form {}: added item, now {}", path.0, form.draft().items.len());

    Ok(render_form(&path.0, &form, &state.config.currency.symbol))
}

/// HTMX: Remove item - htmx sends the form values of a DELETE in the query string
pub async fn htmx_remove_item(
    state: State<AppState>,
    path: Path<(String, usize)>,
    Query(fields): Query<FieldPairs>,
) -> Result<String, ApiError> {
    let (id, index) = path.0;
    let handle = find_form(&state, &id).await?;
    let mut form = handle.lock().await;

    form.apply_fields(fields);
    if form.remove_item(index).is_some() {
        log::debug!("Form {}: removed item {}", id, index);
    }

    Ok(render_form(&id, &form, &state.config.currency.symbol))
}

/// HTMX: Submit - re-renders the form with its errors and shows a toast
///
/// Only this form stays locked while the sink is awaited.
pub async fn htmx_submit(
    state: State<AppState>,
    path: Path<String>,
    Form(fields): Form<FieldPairs>,
) -> Result<String, ApiError> {
    let handle = find_form(&state, &path.0).await?;
    let mut form = handle.lock().await;

    form.apply_fields(fields);
    let notification = form.submit(state.sink.as_ref()).await;
    log::info!("Form {} submitted: {}", path.0, notification.message);

    let mut html = render_form(&path.0, &form, &state.config.currency.symbol);
    html.push_str(&render_toast(&notification));
    Ok(html)
}
