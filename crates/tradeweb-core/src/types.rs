//! Basic types shared by the item model, the schema and the form engine

use serde::{Deserialize, Serialize, Serializer};

use crate::error::FormError;

/// Transaction kind enumeration, fixed per form instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Goods bought from a vendor
    Purchase,
    /// Goods sold to a customer (quantity capped per line)
    Sales,
}

impl TransactionKind {
    /// Label of the counterparty field
    pub fn party_label(&self) -> &'static str {
        match self {
            TransactionKind::Purchase => "Vendor",
            TransactionKind::Sales => "Customer",
        }
    }

    /// Placeholder of the counterparty input
    pub fn party_placeholder(&self) -> &'static str {
        match self {
            TransactionKind::Purchase => "Enter vendor name",
            TransactionKind::Sales => "Enter customer name",
        }
    }

    /// Page route serving this kind
    pub fn route(&self) -> &'static str {
        match self {
            TransactionKind::Purchase => "/purchase",
            TransactionKind::Sales => "/sales",
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "purchase" => Ok(TransactionKind::Purchase),
            "sales" | "sale" => Ok(TransactionKind::Sales),
            _ => Err(format!("Invalid transaction kind: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Purchase => write!(f, "purchase"),
            TransactionKind::Sales => write!(f, "sales"),
        }
    }
}

/// Attribute of a line item
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ItemField {
    Name,
    Quantity,
    UnitPrice,
}

impl ItemField {
    pub const ALL: [ItemField; 3] = [ItemField::Name, ItemField::Quantity, ItemField::UnitPrice];
}

impl std::str::FromStr for ItemField {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(ItemField::Name),
            "quantity" => Ok(ItemField::Quantity),
            "unitPrice" | "unit_price" => Ok(ItemField::UnitPrice),
            _ => Err(format!("Invalid item field: {}", s)),
        }
    }
}

impl std::fmt::Display for ItemField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemField::Name => write!(f, "name"),
            ItemField::Quantity => write!(f, "quantity"),
            ItemField::UnitPrice => write!(f, "unitPrice"),
        }
    }
}

/// Address of one leaf in a transaction draft
///
/// Canonical text form is `vendor`, `date`, `reference`, `items` or
/// `items[N].field`; `items.N.field` is accepted when parsing. Ordering
/// puts header fields first, then the item list, then items by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldPath {
    Vendor,
    Date,
    Reference,
    /// The item list as a whole
    Items,
    Item { index: usize, field: ItemField },
}

impl FieldPath {
    pub fn item(index: usize, field: ItemField) -> Self {
        FieldPath::Item { index, field }
    }
}

impl std::str::FromStr for FieldPath {
    type Err = FormError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vendor" => Ok(FieldPath::Vendor),
            "date" => Ok(FieldPath::Date),
            "reference" => Ok(FieldPath::Reference),
            "items" => Ok(FieldPath::Items),
            _ => parse_item_path(s).ok_or_else(|| FormError::InvalidPath { path: s.to_string() }),
        }
    }
}

fn parse_item_path(s: &str) -> Option<FieldPath> {
    let rest = s.strip_prefix("items")?;
    let (index, field) = match rest.strip_prefix('[') {
        Some(bracketed) => bracketed.split_once("].")?,
        None => rest.strip_prefix('.')?.split_once('.')?,
    };
    let index = index.parse().ok()?;
    let field = field.parse().ok()?;
    Some(FieldPath::Item { index, field })
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldPath::Vendor => write!(f, "vendor"),
            FieldPath::Date => write!(f, "date"),
            FieldPath::Reference => write!(f, "reference"),
            FieldPath::Items => write!(f, "items"),
            FieldPath::Item { index, field } => write!(f, "items[{}].{}", index, field),
        }
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
