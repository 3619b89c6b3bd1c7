//! Core of tradeweb: the validated line-item transaction form
//!
//! - `item`: line item shape and per-field rules
//! - `schema`: whole-form rule table, built per transaction kind
//! - `form`: the engine holding one draft, its errors and derived totals
//! - `sink`: submission payload, result sinks and user notifications
//! - `registry`: one engine per mounted page

pub mod error;
pub mod form;
pub mod item;
pub mod registry;
pub mod rule;
pub mod schema;
pub mod sink;
pub mod transaction;
pub mod types;

pub use error::{
    AggregateValidationError, CoreError, CoreResult, ErrorCode, ErrorSeverity, FormError,
    ValidationError,
};
pub use form::{FormDisplay, TransactionForm};
pub use item::{Item, ItemDraft, ItemRules, SALES_QUANTITY_MAX};
pub use registry::{FormId, FormRegistry, SharedForm};
pub use rule::{FieldValue, Rule};
pub use schema::Schema;
pub use sink::{LogSink, MemorySink, Notification, NotificationLevel, ResultSink, Submission};
pub use transaction::{Transaction, TransactionDraft};
pub use types::{FieldPath, ItemField, TransactionKind};

pub use rust_decimal::Decimal;
