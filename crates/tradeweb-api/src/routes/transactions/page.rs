//! Transaction form page rendering
//!
//! Endpoints:
//! - page_sales: opens a sales form instance
//! - page_purchase: opens a purchase form instance
//!
//! Helper functions:
//! - render_form: the whole `<form>` element, re-rendered after structural changes
//! - render_totals_oob: out-of-band line totals, subtotal and grand total
//! - render_toast: out-of-band notification

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Html;
use tradeweb_core::{
    Decimal, FieldPath, FormDisplay, ItemField, Notification, NotificationLevel, TransactionForm,
    TransactionKind,
};
use tradeweb_utils::{escape_html, format_money};

use crate::AppState;

/// Sales page - opens a fresh sales form
pub async fn page_sales(
    state: State<AppState>,
    headers: HeaderMap,
) -> Html<String> {
    open_form_page(&state, &headers, TransactionKind::Sales).await
}

/// Purchase page - opens a fresh purchase form
pub async fn page_purchase(
    state: State<AppState>,
    headers: HeaderMap,
) -> Html<String> {
    open_form_page(&state, &headers, TransactionKind::Purchase).await
}

async fn open_form_page(
    state: &AppState,
    headers: &HeaderMap,
    kind: TransactionKind,
) -> Html<String> {
    let page = match kind {
        TransactionKind::Sales => &state.config.pages.sales,
        TransactionKind::Purchase => &state.config.pages.purchase,
    };

    let (id, handle) = state.forms.write().await.open(kind, FormDisplay::from(page));
    let form = handle.lock().await;

    let inner_content = render_form(&id, &form, &state.config.currency.symbol);
    Html(crate::page_response(headers, &page.title, kind.route(), &inner_content))
}

/// Money text for a total, or a notice when it left the decimal range
fn format_total(symbol: &str, total: Option<Decimal>) -> String {
    match total {
        Some(amount) => format_money(symbol, amount),
        None => "Out of range".to_string(),
    }
}

/// Whole form element for one instance
pub fn render_form(id: &str, form: &TransactionForm, symbol: &str) -> String {
    let display = form.display();
    let rows: String = (0..form.draft().items.len())
        .map(|index| render_item_row(id, form, index, symbol))
        .collect();
    let empty_row = if form.draft().items.is_empty() {
        "<tr><td colspan='5' class='py-4 text-center text-gray-500'>No items</td></tr>"
    } else {
        ""
    };

    format!(
        r#"<form id='transaction-form' hx-post='/forms/{id}/submit' hx-target='this' hx-swap='outerHTML'>
    <h2 class='text-2xl font-bold mb-3' style='color: {title_color}'>{title}</h2>
    <div class='rounded-xl shadow-sm pt-2 px-4 pb-4' style='background-color: {background}'>
        <div class='grid grid-cols-1 md:grid-cols-3 gap-4 mb-4'>
            {header_fields}
        </div>
        <div class='flex items-center justify-between mb-3'>
            <h5 class='font-semibold'>Line Items</h5>
            <button type='button' hx-post='/forms/{id}/items' hx-target='#transaction-form' hx-swap='outerHTML'
                class='px-3 py-1 text-sm bg-green-600 text-white rounded-lg hover:bg-green-700'>+ Add Item</button>
        </div>
        {items_error}
        <div class='overflow-x-auto px-2'>
            <table class='w-full text-left'>
                <thead class='bg-gray-100 sticky top-0'>
                    <tr><th class='p-2'>Item Name</th><th class='p-2'>Quantity</th><th class='p-2'>Unit Price</th><th class='p-2'>Line Total</th><th class='p-2 text-center'>Action</th></tr>
                </thead>
                <tbody>{rows}{empty_row}</tbody>
            </table>
        </div>
        <div class='bg-white rounded-lg shadow-sm mt-2 p-4'>
            <h5 class='font-semibold mb-3'>Summary</h5>
            <div class='flex justify-between mb-2'><span>Subtotal</span><span id='subtotal' class='font-bold text-indigo-600'>{total}</span></div>
            <hr>
            <div class='flex justify-between mt-2'><span class='font-bold'>Grand Total</span><span id='grand-total' class='font-bold text-indigo-600'>{total}</span></div>
        </div>
        <div class='text-right mt-3'>
            <button type='submit' class='px-6 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Submit</button>
        </div>
    </div>
</form>"#,
        id = id,
        title_color = escape_html(&display.title_color),
        title = escape_html(&display.title),
        background = escape_html(&display.background_color),
        header_fields = render_header_fields(id, form),
        items_error = render_errors(form, &FieldPath::Items),
        rows = rows,
        empty_row = empty_row,
        total = format_total(symbol, form.grand_total()),
    )
}

fn render_header_fields(id: &str, form: &TransactionForm) -> String {
    let draft = form.draft();
    let kind = form.kind();
    let fields = [
        (FieldPath::Vendor, kind.party_label(), "text", kind.party_placeholder(), true, &draft.vendor),
        (FieldPath::Date, "Date", "date", "", true, &draft.date),
        (FieldPath::Reference, "Reference No.", "text", "e.g., INV-001", false, &draft.reference),
    ];

    fields
        .iter()
        .map(|(path, label, input_type, placeholder, required, value)| {
            format!(
                r#"<div>
                <label class='block text-sm font-medium text-gray-700 mb-1'>{label}{marker}</label>
                <input type='{input_type}' name='{path}' value='{value}' placeholder='{placeholder}'
                    hx-post='/forms/{id}/fields' hx-trigger='keyup changed delay:200ms, change' hx-swap='none'
                    class='w-full px-3 py-2 border rounded-lg {invalid}'>
                {errors}
            </div>"#,
                label = label,
                marker = if *required { "<span class='text-red-600'>*</span>" } else { "" },
                input_type = input_type,
                path = path,
                value = escape_html(value),
                placeholder = placeholder,
                id = id,
                invalid = invalid_class(form, path),
                errors = render_errors(form, path),
            )
        })
        .collect()
}

fn render_item_row(id: &str, form: &TransactionForm, index: usize, symbol: &str) -> String {
    let item = &form.draft().items[index];
    let cells: String = ItemField::ALL
        .iter()
        .map(|&field| {
            let path = FieldPath::item(index, field);
            let input_attrs = match field {
                ItemField::Name => "type='text' placeholder='Item name'",
                ItemField::Quantity => "type='number' min='1' step='any'",
                ItemField::UnitPrice => "type='number' min='0' step='any'",
            };
            format!(
                r#"<td class='p-2'><input {attrs} name='{path}' value='{value}'
                    hx-post='/forms/{id}/fields' hx-trigger='keyup changed delay:200ms, change' hx-swap='none'
                    class='w-full px-2 py-1.5 border rounded {invalid}'>{errors}</td>"#,
                attrs = input_attrs,
                path = path,
                value = escape_html(&item.text(field)),
                id = id,
                invalid = invalid_class(form, &path),
                errors = render_errors(form, &path),
            )
        })
        .collect();

    format!(
        r#"<tr>{cells}<td class='p-2 font-semibold text-indigo-600'><span id='line-total-{index}'>{total}</span></td><td class='p-2 text-center'><button type='button' hx-delete='/forms/{id}/items/{index}' hx-target='#transaction-form' hx-swap='outerHTML' class='px-2 py-1 text-sm border border-red-500 text-red-600 rounded hover:bg-red-50'>✕</button></td></tr>"#,
        cells = cells,
        index = index,
        total = format_total(symbol, item.line_total()),
        id = id,
    )
}

fn invalid_class(form: &TransactionForm, path: &FieldPath) -> &'static str {
    if form.errors_for(path).is_empty() {
        ""
    } else {
        "is-invalid"
    }
}

fn render_errors(form: &TransactionForm, path: &FieldPath) -> String {
    form.errors_for(path)
        .iter()
        .map(|error| {
            format!(
                "<p class='text-sm text-red-600 mt-1' data-error-for='{}'>{}</p>",
                path,
                escape_html(error.message())
            )
        })
        .collect()
}

/// Out-of-band swaps refreshing every derived amount
pub fn render_totals_oob(form: &TransactionForm, symbol: &str) -> String {
    let mut html: String = form
        .draft()
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            format!(
                "<span id='line-total-{}' hx-swap-oob='true'>{}</span>",
                index,
                format_total(symbol, item.line_total())
            )
        })
        .collect();
    let total = format_total(symbol, form.grand_total());
    html.push_str(&format!(
        "<span id='subtotal' hx-swap-oob='true' class='font-bold text-indigo-600'>{}</span>",
        total
    ));
    html.push_str(&format!(
        "<span id='grand-total' hx-swap-oob='true' class='font-bold text-indigo-600'>{}</span>",
        total
    ));
    html
}

/// Out-of-band toast for the notification region
pub fn render_toast(notification: &Notification) -> String {
    let class = match notification.level {
        NotificationLevel::Success => "bg-green-50 border-green-200 text-green-800",
        NotificationLevel::Error => "bg-red-50 border-red-200 text-red-800",
    };
    let icon = match notification.level {
        NotificationLevel::Success => "✓",
        NotificationLevel::Error => "✗",
    };
    format!(
        r#"<div id='toast-region' hx-swap-oob='true' class='fixed top-4 right-4 z-50'><div data-toast class='border rounded-lg px-4 py-3 shadow {}'>{} {}</div></div>"#,
        class,
        icon,
        escape_html(&notification.message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradeweb_core::MemorySink;

    fn form(kind: TransactionKind) -> TransactionForm {
        TransactionForm::new(
            kind,
            FormDisplay {
                title: "Sales Transaction".to_string(),
                background_color: "#f0fdfa".to_string(),
                title_color: "#55c1ee".to_string(),
            },
        )
    }

    #[test]
    fn test_render_form_fresh() {
        let html = render_form("f1", &form(TransactionKind::Sales), "$");
        assert!(html.contains("hx-post='/forms/f1/submit'"));
        assert!(html.contains("Customer"));
        assert!(html.contains("Enter customer name"));
        assert!(html.contains("name='items[0].name' value='Item 1'"));
        assert!(html.contains("<span id='line-total-0'>$100.00</span>"));
        assert!(html.contains("<span id='grand-total' class='font-bold text-indigo-600'>$100.00</span>"));
        assert!(html.contains("color: #55c1ee"));
        assert!(!html.contains("is-invalid"));
    }

    #[test]
    fn test_render_form_escapes_input() {
        let mut f = form(TransactionKind::Purchase);
        f.set_field(&FieldPath::Vendor, "<b>Acme</b>").unwrap();
        let html = render_form("f1", &f, "$");
        assert!(html.contains("value='&lt;b&gt;Acme&lt;/b&gt;'"));
        assert!(html.contains("Vendor"));
    }

    #[tokio::test]
    async fn test_render_form_shows_errors() {
        let mut f = form(TransactionKind::Sales);
        f.set_field(&FieldPath::item(0, ItemField::Quantity), "150").unwrap();
        f.submit(&MemorySink::new()).await;

        let html = render_form("f1", &f, "$");
        assert!(html.contains("is-invalid"));
        assert!(html.contains("This field is required"));
        assert!(html.contains("Date is required"));
        assert!(html.contains("data-error-for='items[0].quantity'>Quantity cannot be more than 100"));
    }

    #[test]
    fn test_render_empty_items() {
        let mut f = form(TransactionKind::Purchase);
        f.remove_item(0);
        let html = render_form("f1", &f, "$");
        assert!(html.contains("No items"));
        assert!(html.contains("$0.00"));
    }

    #[test]
    fn test_render_totals_oob() {
        let mut f = form(TransactionKind::Purchase);
        f.add_item();
        f.set_field(&FieldPath::item(1, ItemField::Quantity), "3").unwrap();
        f.set_field(&FieldPath::item(1, ItemField::UnitPrice), "7").unwrap();
        let html = render_totals_oob(&f, "$");
        assert!(html.contains("<span id='line-total-1' hx-swap-oob='true'>$21.00</span>"));
        assert!(html.contains("id='grand-total' hx-swap-oob='true' class='font-bold text-indigo-600'>$121.00"));
    }

    #[test]
    fn test_render_totals_out_of_range() {
        let mut f = form(TransactionKind::Purchase);
        f.set_field(&FieldPath::item(0, ItemField::Quantity), "79228162514264337593543950335")
            .unwrap();
        let html = render_totals_oob(&f, "$");
        assert!(html.contains("<span id='line-total-0' hx-swap-oob='true'>Out of range</span>"));
        assert!(html.contains("class='font-bold text-indigo-600'>Out of range</span>"));
        assert!(render_form("f1", &f, "$").contains("<span id='line-total-0'>Out of range</span>"));
    }

    #[test]
    fn test_render_toast() {
        let html = render_toast(&Notification::error("validation errors"));
        assert!(html.contains("hx-swap-oob='true'"));
        assert!(html.contains("validation errors"));
        assert!(html.contains("bg-red-50"));
    }
}
