use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::error::{CartError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_non_negative_amount, validate_positive_number, Validate,
};

/// One product entry. Two items are the same entry when name and size match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub size: String,
    pub quantity: u32,
    #[serde(with = "price_number")]
    pub price: Decimal,
}

impl LineItem {
    pub fn new(name: impl Into<String>, size: impl Into<String>, quantity: u32, price: Decimal) -> Self {
        Self {
            name: name.into(),
            size: size.into(),
            quantity,
            price,
        }
    }

    pub fn same_entry(&self, other: &LineItem) -> bool {
        self.name == other.name && self.size == other.size
    }

    pub fn line_total(&self) -> Result<Decimal> {
        self.price
            .checked_mul(Decimal::from(self.quantity))
            .ok_or_else(|| CartError::AmountOverflow {
                context: format!("{} size {} x{}", self.name, self.size, self.quantity),
            })
    }
}

impl Validate for LineItem {
    fn validate(&self) -> Result<()> {
        let as_item_error = |e: CartError| CartError::ValidationError {
            message: e.to_string(),
        };
        validate_non_empty_string("name", &self.name).map_err(as_item_error)?;
        validate_positive_number("quantity", u64::from(self.quantity), 1).map_err(as_item_error)?;
        validate_non_negative_amount("price", self.price).map_err(as_item_error)?;
        Ok(())
    }
}

/// Ordered line items, persisted as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Folds `item` into the entry with the same name and size, or appends it.
    /// The existing entry keeps its price.
    pub fn merge(&mut self, item: LineItem) {
        match self.items.iter_mut().find(|existing| existing.same_entry(&item)) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(item.quantity),
            None => self.items.push(item),
        }
    }

    pub fn remove(&mut self, index: usize) -> Result<LineItem> {
        if index >= self.items.len() {
            return Err(CartError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    pub fn subtotal(&self) -> Result<Decimal> {
        self.items.iter().try_fold(Decimal::ZERO, |sum, item| {
            sum.checked_add(item.line_total()?)
                .ok_or_else(|| CartError::AmountOverflow {
                    context: "cart subtotal".to_string(),
                })
        })
    }

    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

impl FromIterator<LineItem> for Cart {
    fn from_iter<I: IntoIterator<Item = LineItem>>(iter: I) -> Self {
        let mut cart = Cart::new();
        for item in iter {
            cart.merge(item);
        }
        cart
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeView {
    pub count: u64,
    pub visible: bool,
}

impl BadgeView {
    pub fn for_count(count: u64) -> Self {
        Self {
            count,
            visible: count > 0,
        }
    }

    /// Class toggled on the badge surface while the cart holds anything.
    pub fn state_class(&self) -> Option<&'static str> {
        self.visible.then_some("has-items")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub shown_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

/// Prices travel as plain JSON numbers so stored carts stay readable by the storefront.
pub(crate) mod price_number {
    use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
    use rust_decimal::Decimal;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        let normalized = value.normalize();
        if normalized.scale() == 0 {
            if let Some(whole) = normalized.to_i64() {
                return serializer.serialize_i64(whole);
            }
        }
        let float = normalized
            .to_f64()
            .ok_or_else(|| <S::Error as serde::ser::Error>::custom("price out of range"))?;
        serializer.serialize_f64(float)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        let raw = f64::deserialize(deserializer)?;
        Decimal::from_f64(raw)
            .map(|d| d.normalize())
            .ok_or_else(|| D::Error::custom(format!("price {} is not representable", raw)))
    }
}
