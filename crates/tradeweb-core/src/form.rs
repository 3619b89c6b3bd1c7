//! Transaction form engine
//!
//! Holds one draft for one mounted page. Edits only change state; the
//! schema runs when the form is submitted, and the resulting error map is
//! kept until the next submit. Totals are recomputed on every read.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tradeweb_config::PageConfig;

use crate::error::{AggregateValidationError, FormError, ValidationError};
use crate::item::ItemDraft;
use crate::schema::Schema;
use crate::sink::{
    Notification, ResultSink, Submission, SINK_FAILED_MESSAGE, SUBMIT_SUCCESS_MESSAGE,
    VALIDATION_FAILED_MESSAGE,
};
use crate::transaction::TransactionDraft;
use crate::types::{FieldPath, TransactionKind};

/// Title and accent colors, fixed at construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDisplay {
    pub title: String,
    pub background_color: String,
    pub title_color: String,
}

impl From<&PageConfig> for FormDisplay {
    fn from(page: &PageConfig) -> Self {
        Self {
            title: page.title.clone(),
            background_color: page.background_color.clone(),
            title_color: page.title_color.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransactionForm {
    kind: TransactionKind,
    display: FormDisplay,
    schema: Schema,
    draft: TransactionDraft,
    errors: AggregateValidationError,
}

impl TransactionForm {
    /// Fresh form: one default item, empty header, no errors
    pub fn new(kind: TransactionKind, display: FormDisplay) -> Self {
        Self {
            kind,
            display,
            schema: Schema::build(kind),
            draft: TransactionDraft::fresh(),
            errors: AggregateValidationError::new(),
        }
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn display(&self) -> &FormDisplay {
        &self.display
    }

    pub fn draft(&self) -> &TransactionDraft {
        &self.draft
    }

    /// Errors from the last failed submit
    pub fn errors(&self) -> &AggregateValidationError {
        &self.errors
    }

    pub fn errors_for(&self, path: &FieldPath) -> &[ValidationError] {
        self.errors.get(path)
    }

    /// Overwrite one leaf of the draft; no validation runs
    pub fn set_field(&mut self, path: &FieldPath, value: &str) -> Result<(), FormError> {
        self.draft.set(path, value)
    }

    /// Apply `path=value` pairs from a form post, skipping pairs that do not address a leaf
    pub fn apply_fields<K, V>(&mut self, pairs: impl IntoIterator<Item = (K, V)>) -> usize
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut applied = 0;
        for (key, value) in pairs {
            let key = key.as_ref();
            let result = key
                .parse::<FieldPath>()
                .and_then(|path| self.set_field(&path, value.as_ref()));
            match result {
                Ok(()) => applied += 1,
                Err(e) => log::warn!("Skipping form field '{}': {}", key, e),
            }
        }
        applied
    }

    /// Append a blank item
    pub fn add_item(&mut self) {
        self.draft.items.push(ItemDraft::blank());
    }

    /// Remove the item at `index`; out of range is a no-op. The list may become empty.
    pub fn remove_item(&mut self, index: usize) -> Option<ItemDraft> {
        if index >= self.draft.items.len() {
            log::warn!(
                "Ignoring removal of item {} (form has {} items)",
                index,
                self.draft.items.len()
            );
            return None;
        }
        self.shift_item_errors(index);
        Some(self.draft.items.remove(index))
    }

    /// Keep stored errors attached to the same rows after `removed` goes away
    fn shift_item_errors(&mut self, removed: usize) {
        let errors = std::mem::take(&mut self.errors.errors);
        self.errors.errors = errors
            .into_iter()
            .filter_map(|(path, list)| match path {
                FieldPath::Item { index, .. } if index == removed => None,
                FieldPath::Item { index, field } if index > removed => {
                    Some((FieldPath::item(index - 1, field), list))
                }
                other => Some((other, list)),
            })
            .collect();
    }

    /// Line total of one item; `None` past the end or when out of range
    pub fn line_total(&self, index: usize) -> Option<Decimal> {
        self.draft.items.get(index).and_then(ItemDraft::line_total)
    }

    /// Sum of current line totals; `None` when it does not fit in a `Decimal`
    pub fn grand_total(&self) -> Option<Decimal> {
        self.draft.grand_total()
    }

    /// Validate the draft and build the payload without delivering it
    pub fn prepare_submission(&self) -> Result<Submission, AggregateValidationError> {
        let transaction = self.schema.validate(&self.draft)?;
        Ok(Submission::new(self.display.title.clone(), self.kind, transaction))
    }

    /// Validate, deliver to `sink` on success, and report the outcome
    ///
    /// The draft is left as-is in every case.
    pub async fn submit(&mut self, sink: &dyn ResultSink) -> Notification {
        match self.prepare_submission() {
            Ok(submission) => {
                self.errors = AggregateValidationError::new();
                match sink.deliver(&submission).await {
                    Ok(()) => {
                        log::debug!(
                            "{} submitted with grand total {}",
                            self.kind,
                            submission.grand_total
                        );
                        Notification::success(SUBMIT_SUCCESS_MESSAGE)
                    }
                    Err(e) => {
                        log::error!("Result sink rejected {} submission: {}", self.kind, e);
                        Notification::error(SINK_FAILED_MESSAGE)
                    }
                }
            }
            Err(failures) => {
                log::debug!("{} submit rejected: {}", self.kind, failures);
                self.errors = failures;
                Notification::error(VALIDATION_FAILED_MESSAGE)
            }
        }
    }
}
