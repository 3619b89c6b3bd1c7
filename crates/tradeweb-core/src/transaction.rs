//! Transaction draft and validated transaction

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::FormError;
use crate::item::{Item, ItemDraft};
use crate::types::FieldPath;

/// In-progress transaction, possibly invalid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    pub vendor: String,
    pub date: String,
    pub reference: String,
    pub items: Vec<ItemDraft>,
}

impl TransactionDraft {
    /// Empty header with the single initial item
    pub fn fresh() -> Self {
        Self::with_items(vec![ItemDraft::initial()])
    }

    pub fn with_items(items: Vec<ItemDraft>) -> Self {
        Self {
            vendor: String::new(),
            date: String::new(),
            reference: String::new(),
            items,
        }
    }

    /// Sum of line totals; an empty list sums to zero. `None` once a line
    /// total or the running sum leaves the `Decimal` range.
    pub fn grand_total(&self) -> Option<Decimal> {
        self.items
            .iter()
            .try_fold(Decimal::ZERO, |sum, item| sum.checked_add(item.line_total()?))
    }

    /// Overwrite one leaf from raw input text
    pub fn set(&mut self, path: &FieldPath, value: &str) -> Result<(), FormError> {
        match path {
            FieldPath::Vendor => self.vendor = value.to_string(),
            FieldPath::Date => self.date = value.to_string(),
            FieldPath::Reference => self.reference = value.to_string(),
            FieldPath::Items => {
                return Err(FormError::InvalidPath {
                    path: path.to_string(),
                })
            }
            FieldPath::Item { index, field } => {
                let len = self.items.len();
                let item = self
                    .items
                    .get_mut(*index)
                    .ok_or(FormError::NoSuchItem { index: *index, len })?;
                item.set(*field, value);
            }
        }
        Ok(())
    }

    /// Header text for `vendor`, `date` or `reference`
    pub fn header(&self, path: &FieldPath) -> Option<&str> {
        match path {
            FieldPath::Vendor => Some(&self.vendor),
            FieldPath::Date => Some(&self.date),
            FieldPath::Reference => Some(&self.reference),
            _ => None,
        }
    }
}

/// Transaction that passed its schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub vendor: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub items: Vec<Item>,
    pub grand_total: Decimal,
}
