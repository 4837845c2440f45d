use sqlx::Postgres;

use super::model::Product;

#[derive(Clone)]
pub struct ProductRepository {
    pub pool: sqlx::Pool<Postgres>,
}

impl ProductRepository {
    pub fn new(pool: sqlx::Pool<Postgres>) -> Self {
        Self { pool }
    }

    // RowNotFound is the caller's signal that the product does not exist
    pub async fn get_by_id(&self, id: i32) -> Result<Product, sqlx::Error> {
        sqlx::query_as::<_, Product>("SELECT id, name, price FROM products WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await
    }
}
