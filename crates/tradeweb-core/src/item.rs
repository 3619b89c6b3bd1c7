//! Line item model: draft shape, validated shape and per-field rules

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::rule::{check_all, FieldValue, Rule};
use crate::types::{ItemField, TransactionKind};

/// Upper bound on a sales line quantity
pub const SALES_QUANTITY_MAX: u32 = 100;

/// Line item as currently entered; numbers are `None` while blank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    pub name: String,
    pub quantity: Option<Decimal>,
    pub unit_price: Option<Decimal>,
}

impl ItemDraft {
    pub fn new(name: impl Into<String>, quantity: impl Into<Decimal>, unit_price: impl Into<Decimal>) -> Self {
        Self {
            name: name.into(),
            quantity: Some(quantity.into()),
            unit_price: Some(unit_price.into()),
        }
    }

    /// Row a freshly mounted form starts with
    pub fn initial() -> Self {
        Self::new("Item 1", 2, 50)
    }

    /// Row appended by "add item"
    pub fn blank() -> Self {
        Self::new("", 1, 0)
    }

    /// `quantity * unitPrice`, counting blank numbers as zero; `None` when the
    /// product does not fit in a `Decimal`
    pub fn line_total(&self) -> Option<Decimal> {
        self.quantity
            .unwrap_or_default()
            .checked_mul(self.unit_price.unwrap_or_default())
    }

    /// Overwrite one attribute from raw input text
    pub fn set(&mut self, field: ItemField, value: &str) {
        match field {
            ItemField::Name => self.name = value.to_string(),
            ItemField::Quantity => self.quantity = parse_number(value),
            ItemField::UnitPrice => self.unit_price = parse_number(value),
        }
    }

    /// Raw text of one attribute, as shown in an input
    pub fn text(&self, field: ItemField) -> String {
        match field {
            ItemField::Name => self.name.clone(),
            ItemField::Quantity => self.quantity.map(|n| n.normalize().to_string()).unwrap_or_default(),
            ItemField::UnitPrice => self.unit_price.map(|n| n.normalize().to_string()).unwrap_or_default(),
        }
    }

    fn value(&self, field: ItemField) -> FieldValue<'_> {
        match field {
            ItemField::Name => FieldValue::Text(&self.name),
            ItemField::Quantity => FieldValue::Number(self.quantity),
            ItemField::UnitPrice => FieldValue::Number(self.unit_price),
        }
    }

    /// Validated item, once both numbers are present
    pub fn resolve(&self) -> Option<Item> {
        Some(Item {
            name: self.name.clone(),
            quantity: self.quantity?,
            unit_price: self.unit_price?,
        })
    }
}

fn parse_number(value: &str) -> Option<Decimal> {
    value.trim().parse::<Decimal>().ok()
}

/// Validated line item, as submitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub name: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
}

/// Rules for each item attribute
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRules {
    name: Vec<Rule>,
    quantity: Vec<Rule>,
    unit_price: Vec<Rule>,
}

impl ItemRules {
    /// Rules every item follows
    pub fn base() -> Self {
        Self {
            name: vec![Rule::required("Item name is required")],
            quantity: vec![
                Rule::required("Quantity is required"),
                Rule::min(1, "Quantity must be at least 1"),
            ],
            unit_price: vec![
                Rule::required("Unit price is required"),
                Rule::min(1, "Unit price is required"),
            ],
        }
    }

    /// Base rules plus the sales quantity cap
    pub fn sales() -> Self {
        let mut rules = Self::base();
        rules.quantity.push(Rule::max(
            SALES_QUANTITY_MAX,
            format!("Quantity cannot be more than {}", SALES_QUANTITY_MAX),
        ));
        rules
    }

    pub fn for_kind(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Purchase => Self::base(),
            TransactionKind::Sales => Self::sales(),
        }
    }

    pub fn rules(&self, field: ItemField) -> &[Rule] {
        match field {
            ItemField::Name => &self.name,
            ItemField::Quantity => &self.quantity,
            ItemField::UnitPrice => &self.unit_price,
        }
    }

    /// Validate each attribute independently
    pub fn validate(&self, item: &ItemDraft) -> Vec<(ItemField, ValidationError)> {
        ItemField::ALL
            .iter()
            .flat_map(|&field| {
                check_all(self.rules(field), item.value(field))
                    .into_iter()
                    .map(move |error| (field, error))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn errors_for(rules: &ItemRules, item: &ItemDraft, field: ItemField) -> Vec<ValidationError> {
        rules
            .validate(item)
            .into_iter()
            .filter(|(f, _)| *f == field)
            .map(|(_, e)| e)
            .collect()
    }

    #[test]
    fn test_defaults() {
        let initial = ItemDraft::initial();
        assert_eq!(initial.name, "Item 1");
        assert_eq!(initial.line_total(), Some(Decimal::from(100)));

        let blank = ItemDraft::blank();
        assert_eq!(blank.name, "");
        assert_eq!(blank.quantity, Some(Decimal::ONE));
        assert_eq!(blank.line_total(), Some(Decimal::ZERO));
    }

    #[test]
    fn test_valid_item_has_no_errors() {
        let item = ItemDraft::new("Widget", 2, 50);
        assert!(ItemRules::base().validate(&item).is_empty());
        assert!(ItemRules::sales().validate(&item).is_empty());
    }

    #[test]
    fn test_blank_name_is_required_error() {
        let item = ItemDraft::new("  ", 1, 1);
        let errors = errors_for(&ItemRules::base(), &item, ItemField::Name);
        assert_eq!(errors, vec![ValidationError::required("Item name is required")]);
    }

    #[test]
    fn test_quantity_minimum() {
        let item = ItemDraft::new("Widget", 0, 5);
        let errors = errors_for(&ItemRules::base(), &item, ItemField::Quantity);
        assert_eq!(errors, vec![ValidationError::range("Quantity must be at least 1")]);
    }

    #[test]
    fn test_sales_cap_attaches_to_quantity() {
        let item = ItemDraft::new("Widget", 101, 5);
        assert!(ItemRules::base().validate(&item).is_empty());

        let errors = ItemRules::sales().validate(&item);
        assert_eq!(
            errors,
            vec![(
                ItemField::Quantity,
                ValidationError::range("Quantity cannot be more than 100")
            )]
        );

        let at_cap = ItemDraft::new("Widget", 100, 5);
        assert!(ItemRules::sales().validate(&at_cap).is_empty());
    }

    #[test]
    fn test_unit_price_minimum_is_one() {
        let zero = ItemDraft::new("Widget", 1, 0);
        let one = ItemDraft::new("Widget", 1, 1);
        for rules in [ItemRules::base(), ItemRules::sales()] {
            assert_eq!(
                errors_for(&rules, &zero, ItemField::UnitPrice),
                vec![ValidationError::range("Unit price is required")]
            );
            assert!(rules.validate(&one).is_empty());
        }
    }

    #[test]
    fn test_set_parses_numbers() {
        let mut item = ItemDraft::blank();
        item.set(ItemField::Quantity, " 3 ");
        item.set(ItemField::UnitPrice, "7.25");
        item.set(ItemField::Name, "Bolt");
        assert_eq!(item.quantity, Some(Decimal::from(3)));
        assert_eq!(item.unit_price, Some(Decimal::from_str("7.25").unwrap()));
        assert_eq!(item.line_total(), Some(Decimal::from_str("21.75").unwrap()));
        assert_eq!(item.text(ItemField::UnitPrice), "7.25");

        item.set(ItemField::Quantity, "");
        assert_eq!(item.quantity, None);
        assert_eq!(item.line_total(), Some(Decimal::ZERO));
        assert!(item.resolve().is_none());
    }

    #[test]
    fn test_line_total_overflow_is_none() {
        let mut item = ItemDraft::initial();
        item.set(ItemField::Quantity, "79228162514264337593543950335");
        assert_eq!(item.quantity, Some(Decimal::MAX));
        assert_eq!(item.line_total(), None);

        item.set(ItemField::UnitPrice, "1");
        assert_eq!(item.line_total(), Some(Decimal::MAX));
    }

    #[test]
    fn test_blank_number_is_required_error() {
        let mut item = ItemDraft::new("Widget", 1, 1);
        item.set(ItemField::UnitPrice, "abc");
        let errors = errors_for(&ItemRules::sales(), &item, ItemField::UnitPrice);
        assert_eq!(errors, vec![ValidationError::required("Unit price is required")]);
    }

    #[test]
    fn test_item_serializes_camel_case_numbers() {
        let item = ItemDraft::new("Widget", 2, 50).resolve().unwrap();
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["name"], "Widget");
        assert_eq!(json["quantity"], 2.0);
        assert_eq!(json["unitPrice"], 50.0);
    }
}
