//! Transaction validation schema
//!
//! `Schema::build(kind)` assembles the rule table for one kind: header
//! rules, the item-list length rule and the item rules for that kind.
//! `validate` is pure and never touches the draft it checks. Totals that
//! leave the `Decimal` range are reported as range errors.

use crate::error::{AggregateValidationError, ValidationError};
use crate::item::ItemRules;
use crate::rule::{check_all, FieldValue, Rule};
use crate::transaction::{Transaction, TransactionDraft};
use crate::types::{FieldPath, ItemField, TransactionKind};

pub const LINE_TOTAL_RANGE_MESSAGE: &str = "Line total is too large";
pub const GRAND_TOTAL_RANGE_MESSAGE: &str = "Grand total is too large";

#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    header: Vec<(FieldPath, Vec<Rule>)>,
    items: Vec<Rule>,
    item_rules: ItemRules,
}

impl Schema {
    pub fn build(kind: TransactionKind) -> Self {
        Self {
            header: vec![
                (FieldPath::Vendor, vec![Rule::required("This field is required")]),
                (FieldPath::Date, vec![Rule::required("Date is required")]),
                (FieldPath::Reference, vec![]),
            ],
            items: vec![Rule::min_length(1, "At least one item is required")],
            item_rules: ItemRules::for_kind(kind),
        }
    }

    /// Check a draft against every rule, collecting all failures
    pub fn validate(&self, draft: &TransactionDraft) -> Result<Transaction, AggregateValidationError> {
        let mut failures = AggregateValidationError::new();

        for (path, rules) in &self.header {
            let text = draft.header(path).unwrap_or_default();
            for error in check_all(rules, FieldValue::Text(text)) {
                failures.push(*path, error);
            }
        }

        for error in check_all(&self.items, FieldValue::Count(draft.items.len())) {
            failures.push(FieldPath::Items, error);
        }

        for (index, item) in draft.items.iter().enumerate() {
            for (field, error) in self.item_rules.validate(item) {
                failures.push(FieldPath::item(index, field), error);
            }
            if item.line_total().is_none() {
                failures.push(
                    FieldPath::item(index, ItemField::Quantity),
                    ValidationError::range(LINE_TOTAL_RANGE_MESSAGE),
                );
            }
        }

        let grand_total = draft.grand_total();
        let lines_fit = draft.items.iter().all(|item| item.line_total().is_some());
        if grand_total.is_none() && lines_fit {
            failures.push(FieldPath::Items, ValidationError::range(GRAND_TOTAL_RANGE_MESSAGE));
        }

        if !failures.is_empty() {
            return Err(failures);
        }
        // An out-of-range total always leaves a failure above.
        let Some(grand_total) = grand_total else {
            return Err(failures);
        };

        // Every number is present once the item rules pass.
        let items = draft.items.iter().filter_map(|item| item.resolve()).collect();
        let reference = if draft.reference.trim().is_empty() {
            None
        } else {
            Some(draft.reference.clone())
        };

        Ok(Transaction {
            vendor: draft.vendor.clone(),
            date: draft.date.clone(),
            reference,
            items,
            grand_total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemDraft;
    use rust_decimal::Decimal;

    fn valid_draft(items: Vec<ItemDraft>) -> TransactionDraft {
        let mut draft = TransactionDraft::with_items(items);
        draft.vendor = "Acme".to_string();
        draft.date = "2024-01-01".to_string();
        draft
    }

    #[test]
    fn test_valid_draft_passes_both_kinds() {
        let draft = valid_draft(vec![ItemDraft::new("Widget", 2, 50)]);
        for kind in [TransactionKind::Purchase, TransactionKind::Sales] {
            let transaction = Schema::build(kind).validate(&draft).unwrap();
            assert_eq!(transaction.vendor, "Acme");
            assert_eq!(transaction.reference, None);
            assert_eq!(transaction.items.len(), 1);
            assert_eq!(transaction.grand_total, Decimal::from(100));
        }
    }

    #[test]
    fn test_empty_vendor_always_fails() {
        let mut draft = valid_draft(vec![ItemDraft::new("Widget", 2, 50)]);
        draft.vendor = String::new();
        let err = Schema::build(TransactionKind::Purchase).validate(&draft).unwrap_err();
        assert_eq!(
            err.get(&FieldPath::Vendor),
            &[ValidationError::required("This field is required")]
        );

        // also when everything else is broken
        let mut broken = TransactionDraft::with_items(vec![]);
        broken.vendor = String::new();
        let err = Schema::build(TransactionKind::Sales).validate(&broken).unwrap_err();
        assert!(matches!(
            err.get(&FieldPath::Vendor),
            [ValidationError::RequiredField { .. }]
        ));
    }

    #[test]
    fn test_empty_items_always_fails() {
        let draft = valid_draft(vec![]);
        for kind in [TransactionKind::Purchase, TransactionKind::Sales] {
            let err = Schema::build(kind).validate(&draft).unwrap_err();
            assert_eq!(err.len(), 1);
            assert_eq!(
                err.get(&FieldPath::Items),
                &[ValidationError::range("At least one item is required")]
            );
        }
    }

    #[test]
    fn test_sales_quantity_cap_is_the_only_divergence() {
        let draft = valid_draft(vec![ItemDraft::new("Widget", 101, 5)]);
        assert!(Schema::build(TransactionKind::Purchase).validate(&draft).is_ok());

        let err = Schema::build(TransactionKind::Sales).validate(&draft).unwrap_err();
        let path = FieldPath::item(0, ItemField::Quantity);
        assert_eq!(err.len(), 1);
        assert_eq!(
            err.get(&path),
            &[ValidationError::range("Quantity cannot be more than 100")]
        );
    }

    #[test]
    fn test_unit_price_zero_fails_one_passes() {
        for kind in [TransactionKind::Purchase, TransactionKind::Sales] {
            let schema = Schema::build(kind);
            let zero = valid_draft(vec![ItemDraft::new("Widget", 1, 0)]);
            let err = schema.validate(&zero).unwrap_err();
            assert!(err.contains(&FieldPath::item(0, ItemField::UnitPrice)));

            let one = valid_draft(vec![ItemDraft::new("Widget", 1, 1)]);
            assert!(schema.validate(&one).is_ok());
        }
    }

    #[test]
    fn test_errors_keyed_by_item_index() {
        let draft = valid_draft(vec![
            ItemDraft::new("ok", 1, 1),
            ItemDraft::new("", 1, 1),
            ItemDraft::new("ok", 0, 1),
        ]);
        let err = Schema::build(TransactionKind::Purchase).validate(&draft).unwrap_err();
        let messages = err.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages["items[1].name"], vec!["Item name is required".to_string()]);
        assert_eq!(messages["items[2].quantity"], vec!["Quantity must be at least 1".to_string()]);
    }

    #[test]
    fn test_line_total_overflow_is_range_error() {
        let draft = valid_draft(vec![ItemDraft::new("Widget", Decimal::MAX, 50)]);
        let err = Schema::build(TransactionKind::Purchase).validate(&draft).unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(
            err.get(&FieldPath::item(0, ItemField::Quantity)),
            &[ValidationError::range(LINE_TOTAL_RANGE_MESSAGE)]
        );
    }

    #[test]
    fn test_grand_total_overflow_is_range_error() {
        let large = Decimal::from_i128_with_scale(40_000_000_000_000_000_000_000_000_000, 0);
        let draft = valid_draft(vec![
            ItemDraft::new("a", large, 1),
            ItemDraft::new("b", large, 1),
        ]);
        let err = Schema::build(TransactionKind::Purchase).validate(&draft).unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(
            err.get(&FieldPath::Items),
            &[ValidationError::range(GRAND_TOTAL_RANGE_MESSAGE)]
        );
    }

    #[test]
    fn test_validate_does_not_mutate() {
        let draft = valid_draft(vec![ItemDraft::new("", 0, 0)]);
        let before = draft.clone();
        let _ = Schema::build(TransactionKind::Sales).validate(&draft);
        assert_eq!(draft, before);
    }

    #[test]
    fn test_reference_kept_when_present() {
        let mut draft = valid_draft(vec![ItemDraft::new("Widget", 1, 1)]);
        draft.reference = "INV-001".to_string();
        let transaction = Schema::build(TransactionKind::Purchase).validate(&draft).unwrap();
        assert_eq!(transaction.reference.as_deref(), Some("INV-001"));
    }

    #[test]
    fn test_missing_date() {
        let mut draft = valid_draft(vec![ItemDraft::new("Widget", 1, 1)]);
        draft.date = " ".to_string();
        let err = Schema::build(TransactionKind::Purchase).validate(&draft).unwrap_err();
        assert_eq!(err.get(&FieldPath::Date), &[ValidationError::required("Date is required")]);
    }
}
