use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

const CREATE_PRODUCTS: &str = r#"
    CREATE TABLE IF NOT EXISTS products (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL UNIQUE,
        price DOUBLE PRECISION NOT NULL
    )"#;

const CREATE_SALES: &str = r#"
    CREATE TABLE IF NOT EXISTS sales (
        id SERIAL PRIMARY KEY,
        quantity INTEGER NOT NULL,
        amount DOUBLE PRECISION NOT NULL,
        product_id INTEGER REFERENCES products (id) ON DELETE SET NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )"#;

pub async fn connect(url: &str) -> Result<Pool<Postgres>, sqlx::Error> {
    PgPoolOptions::new().max_connections(5).connect(url).await
}

// Idempotent startup bootstrap, not a migrations layer
pub async fn init_schema(pool: &Pool<Postgres>) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_PRODUCTS).execute(pool).await?;
    sqlx::query(CREATE_SALES).execute(pool).await?;
    Ok(())
}
