use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use shop_catalog::Money;

/// Order state in the checkout lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderState {
    Cart,
    New,
    Fulfilled,
    Cancelled,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentState {
    AwaitingPayment,
    Paid,
    Refunded,
    Cancelled,
}

/// A placed order, looked up by its public number
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub number: String,
    pub channel_code: String,
    pub currency: String,
    #[serde(default)]
    pub customer_email: Option<String>,
    pub state: OrderState,
    pub payment_state: PaymentState,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub items_total: Money,
    #[serde(default)]
    pub tax_total: Money,
    /// Items total plus tax that is not already part of the unit prices
    #[serde(default)]
    pub total: Money,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn new(number: impl Into<String>, channel_code: impl Into<String>, currency: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            number: number.into(),
            channel_code: channel_code.into(),
            currency: currency.into(),
            customer_email: None,
            state: OrderState::New,
            payment_state: PaymentState::AwaitingPayment,
            items: Vec::new(),
            items_total: Money::ZERO,
            tax_total: Money::ZERO,
            total: Money::ZERO,
            created_at: now,
            updated_at: now,
        }
    }

    /// Amounts derived from the items, `None` when one does not fit in `Money`
    pub fn totals(&self) -> Option<OrderTotals> {
        let mut totals = OrderTotals::default();
        for item in &self.items {
            totals.items_total = totals.items_total.checked_add(item.total()?)?;
            totals.tax_total = totals.tax_total.checked_add(item.tax_total)?;
            if !item.tax_included {
                totals.total = totals.total.checked_add(item.tax_total)?;
            }
        }
        totals.total = totals.total.checked_add(totals.items_total)?;
        Some(totals)
    }

    /// Overwrites the stored amounts with the derived ones. Leaves them untouched on overflow.
    pub fn recalculate_totals(&mut self) -> Option<OrderTotals> {
        let totals = self.totals()?;
        self.items_total = totals.items_total;
        self.tax_total = totals.tax_total;
        self.total = totals.total;
        Some(totals)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderTotals {
    pub items_total: Money,
    pub tax_total: Money,
    pub total: Money,
}

/// One ordered variant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub variant_code: String,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Money,
    #[serde(default)]
    pub tax_total: Money,
    #[serde(default)]
    pub tax_included: bool,
}

impl OrderItem {
    pub fn new(variant_code: impl Into<String>, product_name: impl Into<String>, quantity: u32, unit_price: Money) -> Self {
        Self {
            id: Uuid::new_v4(),
            variant_code: variant_code.into(),
            product_name: product_name.into(),
            quantity,
            unit_price,
            tax_total: Money::ZERO,
            tax_included: false,
        }
    }

    pub fn with_tax(mut self, tax_total: Money, tax_included: bool) -> Self {
        self.tax_total = tax_total;
        self.tax_included = tax_included;
        self
    }

    pub fn total(&self) -> Option<Money> {
        self.unit_price.checked_mul(i64::from(self.quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_with_excluded_tax() {
        let mut order = Order::new("000042", "WEB", "EUR");
        order.items.push(OrderItem::new("MUG-RED", "Mug", 2, Money(1000)).with_tax(Money(400), false));

        let totals = order.recalculate_totals().unwrap();
        assert_eq!(totals.items_total, Money(2000));
        assert_eq!(order.tax_total, Money(400));
        assert_eq!(order.total, Money(2400));
    }

    #[test]
    fn test_totals_with_included_tax() {
        let mut order = Order::new("000043", "WEB", "EUR");
        order.items.push(OrderItem::new("MUG-RED", "Mug", 1, Money(1200)).with_tax(Money(200), true));
        order.items.push(OrderItem::new("BOOK", "Book", 1, Money(1000)).with_tax(Money(50), false));

        order.recalculate_totals().unwrap();
        assert_eq!(order.items_total, Money(2200));
        assert_eq!(order.tax_total, Money(250));
        assert_eq!(order.total, Money(2250));
    }

    #[test]
    fn test_totals_overflow_keeps_stored_amounts() {
        let mut order = Order::new("000044", "WEB", "EUR");
        order.items.push(OrderItem::new("MUG-RED", "Mug", 3, Money(i64::MAX / 2)));

        assert!(order.totals().is_none());
        assert!(order.recalculate_totals().is_none());
        assert_eq!(order.items_total, Money::ZERO);
    }

    #[test]
    fn test_deserialize_minimal_order() {
        let json = r#"{
            "number": "000100",
            "channel_code": "WEB",
            "currency": "EUR",
            "state": "NEW",
            "payment_state": "PAID"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.payment_state, PaymentState::Paid);
        assert!(order.items.is_empty());
        assert_eq!(order.totals(), Some(OrderTotals::default()));
    }
}
