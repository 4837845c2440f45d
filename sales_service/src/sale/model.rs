use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::product::model::Product;

/// Wire shape of a sale, with the referencing product resolved at read time.
/// `product` is None once the product has been deleted (FK is nulled).
#[derive(Serialize, Deserialize, Debug)]
pub struct Sale {
    pub id: i32,
    pub quantity: i32,
    pub amount: f64,
    pub product_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub product: Option<Product>,
}

/// Flat row produced by the sales-to-products LEFT JOIN.
#[derive(sqlx::FromRow, Debug)]
pub struct SaleRecord {
    pub id: i32,
    pub quantity: i32,
    pub amount: f64,
    pub product_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub product_name: Option<String>,
    pub product_price: Option<f64>,
}

impl From<SaleRecord> for Sale {
    fn from(record: SaleRecord) -> Self {
        let product = match (record.product_id, record.product_name, record.product_price) {
            (Some(id), Some(name), Some(price)) => Some(Product { id, name, price }),
            _ => None,
        };
        Self {
            id: record.id,
            quantity: record.quantity,
            amount: record.amount,
            product_id: record.product_id,
            created_at: record.created_at,
            product,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SaleForm {
    pub quantity: i32,
    pub product_id: i32,
}

#[derive(Debug)]
pub struct NewSale {
    pub quantity: i32,
    pub amount: f64,
    pub product_id: i32,
}

impl NewSale {
    /// The amount is a snapshot of the product price at creation time.
    pub fn new(form: &SaleForm, product: &Product) -> Self {
        Self {
            quantity: form.quantity,
            amount: form.quantity as f64 * product.price,
            product_id: product.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn amount_is_quantity_times_price() {
        let product = Product {
            id: 1,
            name: "Widget".to_string(),
            price: 9.5,
        };
        let form = SaleForm {
            quantity: 3,
            product_id: 1,
        };
        let sale = NewSale::new(&form, &product);
        assert_eq!(sale.amount, 28.5);
        assert_eq!(sale.product_id, 1);
    }

    #[test]
    fn record_with_nulled_fk_has_no_product() {
        let record = SaleRecord {
            id: 7,
            quantity: 2,
            amount: 19.0,
            product_id: None,
            created_at: Utc::now(),
            product_name: None,
            product_price: None,
        };
        let sale = Sale::from(record);
        assert!(sale.product.is_none());
        assert!(sale.product_id.is_none());
    }

    #[test]
    fn record_with_live_fk_embeds_product() {
        let record = SaleRecord {
            id: 7,
            quantity: 2,
            amount: 19.0,
            product_id: Some(1),
            created_at: Utc::now(),
            product_name: Some("Widget".to_string()),
            product_price: Some(9.5),
        };
        let sale = Sale::from(record);
        let product = sale.product.expect("product embedded");
        assert_eq!(product.id, 1);
        assert_eq!(product.name, "Widget");
        assert_eq!(product.price, 9.5);
    }

    #[test]
    fn sale_wire_shape() {
        let sale = Sale {
            id: 1,
            quantity: 3,
            amount: 28.5,
            product_id: Some(1),
            created_at: Utc.with_ymd_and_hms(2026, 8, 5, 12, 30, 0).unwrap(),
            product: Some(Product {
                id: 1,
                name: "Widget".to_string(),
                price: 9.5,
            }),
        };
        let value = serde_json::to_value(&sale).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": 1,
                "quantity": 3,
                "amount": 28.5,
                "product_id": 1,
                "created_at": "2026-08-05T12:30:00Z",
                "product": {"id": 1, "name": "Widget", "price": 9.5},
            })
        );
    }

    #[test]
    fn created_at_serializes_iso8601() {
        let record = SaleRecord {
            id: 1,
            quantity: 1,
            amount: 9.5,
            product_id: None,
            created_at: Utc.with_ymd_and_hms(2026, 8, 5, 12, 30, 0).unwrap(),
            product_name: None,
            product_price: None,
        };
        let value = serde_json::to_value(Sale::from(record)).unwrap();
        let created_at = value["created_at"].as_str().unwrap();
        assert!(created_at.starts_with("2026-08-05T12:30:00"));
    }
}
