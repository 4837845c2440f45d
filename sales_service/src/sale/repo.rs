use chrono::{DateTime, Utc};
use sqlx::Postgres;

use super::model::{NewSale, Sale, SaleRecord};

const SELECT_PAGE: &str = r#"
    SELECT s.id, s.quantity, s.amount, s.product_id, s.created_at,
           p.name AS product_name, p.price AS product_price
    FROM sales s
    LEFT JOIN products p ON p.id = s.product_id
    ORDER BY s.id
    OFFSET $1 LIMIT $2"#;

const SELECT_PAGE_BY_PRODUCT: &str = r#"
    SELECT s.id, s.quantity, s.amount, s.product_id, s.created_at,
           p.name AS product_name, p.price AS product_price
    FROM sales s
    LEFT JOIN products p ON p.id = s.product_id
    WHERE s.product_id = $1
    ORDER BY s.id
    OFFSET $2 LIMIT $3"#;

#[derive(Clone)]
pub struct SaleRepo {
    pub pool: sqlx::Pool<Postgres>,
}

impl SaleRepo {
    pub fn new(pool: sqlx::Pool<Postgres>) -> Self {
        Self { pool }
    }

    // Total ignores the page window, the page never exceeds `limit`
    pub async fn list(&self, offset: i64, limit: i64) -> Result<(Vec<Sale>, i64), sqlx::Error> {
        let records = sqlx::query_as::<_, SaleRecord>(SELECT_PAGE)
            .bind(offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;
        Ok((records.into_iter().map(Sale::from).collect(), total))
    }

    // A product id with no rows yields an empty page and total 0, not an error
    pub async fn list_by_product(
        &self,
        product_id: i32,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Sale>, i64), sqlx::Error> {
        let records = sqlx::query_as::<_, SaleRecord>(SELECT_PAGE_BY_PRODUCT)
            .bind(product_id)
            .bind(offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales WHERE product_id = $1")
            .bind(product_id)
            .fetch_one(&self.pool)
            .await?;
        Ok((records.into_iter().map(Sale::from).collect(), total))
    }

    pub async fn insert(&self, sale: &NewSale) -> Result<(i32, DateTime<Utc>), sqlx::Error> {
        let row: (i32, DateTime<Utc>) = sqlx::query_as(
            r#"INSERT INTO sales (quantity, amount, product_id)
                VALUES ($1, $2, $3)
                RETURNING id, created_at"#,
        )
        .bind(sale.quantity)
        .bind(sale.amount)
        .bind(sale.product_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
