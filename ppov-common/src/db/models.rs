//! Database models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Error, PeriodKey, Result};

/// Base year of the CPI personal-care sub-index (index = 100 in this year)
pub const CPI_BASE_YEAR: i32 = 2015;

/// Currency recorded on basket items when the caller does not supply one
pub const DEFAULT_CURRENCY: &str = "GBP";

const MAX_NAME_LEN: usize = 255;
const MAX_CURRENCY_LEN: usize = 10;

/// One month of the CPI personal-care series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceIndexPoint {
    pub period: PeriodKey,
    pub index_value: Decimal,
    pub base_year: i32,
    pub pct_change_mom: Option<Decimal>,
    pub pct_change_yoy: Option<Decimal>,
}

impl PriceIndexPoint {
    pub fn new(period: PeriodKey, index_value: Decimal) -> Self {
        Self {
            period,
            index_value,
            base_year: CPI_BASE_YEAR,
            pct_change_mom: None,
            pct_change_yoy: None,
        }
    }
}

/// PIP welfare distribution point (daily PPP) for one year and percentile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WelfarePercentile {
    pub year: i32,
    pub percentile: i32,
    pub daily_welfare_ppp: Decimal,
    pub welfare_type: Option<String>,
}

/// JMP hygiene access proxy (percentage of population with basic facilities)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HygieneProxy {
    pub country: String,
    pub year: i32,
    pub indicator: String,
    pub indicator_value: Decimal,
}

/// User-editable basket item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketItem {
    pub id: i64,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: i64,
    pub category: Option<String>,
    pub currency: String,
    /// Free-text provenance, e.g. "supermarket average"
    pub notes: Option<String>,
}

/// Create payload for a basket item (id assigned by the store)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBasketItem {
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: i64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl NewBasketItem {
    /// Check field constraints before the row reaches the store
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        validate_unit_price(self.unit_price)?;
        validate_quantity(self.quantity)?;
        validate_currency(&self.currency)
    }
}

/// Partial update; absent fields are left untouched
///
/// `category` and `notes` are doubly optional so a patch can clear them with an
/// explicit `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketItemPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub unit_price: Option<Decimal>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub category: Option<Option<String>>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub notes: Option<Option<String>>,
}

impl BasketItemPatch {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(price) = self.unit_price {
            validate_unit_price(price)?;
        }
        if let Some(quantity) = self.quantity {
            validate_quantity(quantity)?;
        }
        if let Some(currency) = &self.currency {
            validate_currency(currency)?;
        }
        Ok(())
    }

    /// Apply the patched fields to an existing item
    pub fn apply(&self, item: &mut BasketItem) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(price) = self.unit_price {
            item.unit_price = price;
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity;
        }
        if let Some(category) = &self.category {
            item.category = category.clone();
        }
        if let Some(currency) = &self.currency {
            item.currency = currency.clone();
        }
        if let Some(notes) = &self.notes {
            item.notes = notes.clone();
        }
    }
}

fn deserialize_some<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn validate_name(name: &str) -> Result<()> {
    let len = name.trim().chars().count();
    if len == 0 || len > MAX_NAME_LEN {
        return Err(Error::InvalidInput(format!(
            "name must be 1-{} characters",
            MAX_NAME_LEN
        )));
    }
    Ok(())
}

fn validate_unit_price(price: Decimal) -> Result<()> {
    if price < Decimal::ZERO {
        return Err(Error::InvalidInput(format!(
            "unit_price must be >= 0 (got {})",
            price
        )));
    }
    Ok(())
}

fn validate_quantity(quantity: i64) -> Result<()> {
    if quantity < 0 {
        return Err(Error::InvalidInput(format!(
            "quantity must be >= 0 (got {})",
            quantity
        )));
    }
    Ok(())
}

fn validate_currency(currency: &str) -> Result<()> {
    let len = currency.chars().count();
    if len == 0 || len > MAX_CURRENCY_LEN {
        return Err(Error::InvalidInput(format!(
            "currency must be 1-{} characters",
            MAX_CURRENCY_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> BasketItem {
        BasketItem {
            id: 1,
            name: "pads pack".to_string(),
            unit_price: Decimal::new(250, 2),
            quantity: 2,
            category: Some("menstrual".to_string()),
            currency: "GBP".to_string(),
            notes: Some("supermarket average".to_string()),
        }
    }

    #[test]
    fn test_new_item_validation() {
        let mut new = NewBasketItem {
            name: "tampons".to_string(),
            unit_price: Decimal::new(300, 2),
            quantity: 1,
            category: None,
            currency: "GBP".to_string(),
            notes: None,
        };
        assert!(new.validate().is_ok());

        new.quantity = -1;
        assert!(new.validate().is_err());

        new.quantity = 1;
        new.unit_price = Decimal::new(-1, 2);
        assert!(new.validate().is_err());

        new.unit_price = Decimal::ZERO;
        new.name = "   ".to_string();
        assert!(new.validate().is_err());
    }

    #[test]
    fn test_new_item_defaults_currency() {
        let new: NewBasketItem =
            serde_json::from_str(r#"{"name":"pads","unit_price":2.5,"quantity":2}"#).unwrap();
        assert_eq!(new.currency, "GBP");
        assert_eq!(new.unit_price, Decimal::new(25, 1));
        assert_eq!(new.category, None);
        assert_eq!(new.notes, None);
    }

    #[test]
    fn test_patch_changes_only_patched_fields() {
        let patch: BasketItemPatch = serde_json::from_str(r#"{"unit_price":"3.00"}"#).unwrap();
        let mut patched = item();
        patch.apply(&mut patched);

        let mut expected = item();
        expected.unit_price = Decimal::new(300, 2);
        assert_eq!(patched, expected);
    }

    #[test]
    fn test_patch_can_clear_category() {
        let patch: BasketItemPatch = serde_json::from_str(r#"{"category":null}"#).unwrap();
        assert_eq!(patch.category, Some(None));

        let mut patched = item();
        patch.apply(&mut patched);
        assert_eq!(patched.category, None);

        let untouched: BasketItemPatch = serde_json::from_str("{}").unwrap();
        assert_eq!(untouched.category, None);
    }

    #[test]
    fn test_patch_validation() {
        let patch = BasketItemPatch {
            quantity: Some(-3),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
        assert!(BasketItemPatch::default().validate().is_ok());
    }
}
