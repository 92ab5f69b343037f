use async_trait::async_trait;
use sqlx::{pool::PoolConnection, PgPool, Postgres};
use tracing::trace;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{NewProduct, NewUser, Product, ProductPatch, User};
use super::store::{ProductStore, Store, UserStore};

const PRODUCT_COLUMNS: &str = "id, name, description, image_url, price, stock, \
     is_on_discount, discount_pct, is_hidden, created_by";

/// Postgres-backed store sharing one pool across requests
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

/// A pooled connection held for the duration of one operation. The
/// connection goes back to the pool when this is dropped, on every path.
struct Session {
    conn: PoolConnection<Postgres>,
}

impl Drop for Session {
    fn drop(&mut self) {
        trace!("database session released");
    }
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn session(&self) -> Result<Session, DatabaseError> {
        let conn = self.pool.acquire().await?;
        trace!("database session acquired");
        Ok(Session { conn })
    }
}

fn map_unique_violation(err: sqlx::Error, field: &'static str) -> DatabaseError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => DatabaseError::Duplicate(field),
        _ => DatabaseError::Sqlx(err),
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let mut s = self.session().await?;
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&mut *s.conn)
        .await?;
        Ok(user)
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut s = self.session().await?;
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, name, email, password) VALUES ($1, $2, $3, $4)
             RETURNING id, name, email, password",
        )
        .bind(Uuid::new_v4())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&mut *s.conn)
        .await
        .map_err(|e| map_unique_violation(e, "email"))
    }
}

#[async_trait]
impl ProductStore for PgStore {
    async fn insert_product(&self, product: NewProduct) -> Result<Product, DatabaseError> {
        let mut s = self.session().await?;
        let sql = format!(
            "INSERT INTO products ({PRODUCT_COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {PRODUCT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(Uuid::new_v4())
            .bind(&product.name)
            .bind(&product.description)
            .bind(&product.image_url)
            .bind(product.price)
            .bind(product.stock)
            .bind(product.is_on_discount)
            .bind(product.discount_pct)
            .bind(product.is_hidden)
            .bind(&product.created_by)
            .fetch_one(&mut *s.conn)
            .await?;
        Ok(row)
    }

    async fn list_products(&self) -> Result<Vec<Product>, DatabaseError> {
        let mut s = self.session().await?;
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at, id");
        let rows = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&mut *s.conn)
            .await?;
        Ok(rows)
    }

    async fn find_products_by_id(&self, id: Uuid) -> Result<Vec<Product>, DatabaseError> {
        let mut s = self.session().await?;
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
        let rows = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_all(&mut *s.conn)
            .await?;
        Ok(rows)
    }

    async fn update_product(
        &self,
        id: Uuid,
        patch: ProductPatch,
    ) -> Result<Option<Product>, DatabaseError> {
        let mut s = self.session().await?;
        let sql = format!(
            "UPDATE products SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                image_url = COALESCE($4, image_url),
                price = COALESCE($5, price),
                stock = COALESCE($6, stock),
                is_on_discount = COALESCE($7, is_on_discount),
                discount_pct = COALESCE($8, discount_pct),
                is_hidden = COALESCE($9, is_hidden),
                created_by = COALESCE($10, created_by)
             WHERE id = $1
             RETURNING {PRODUCT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(patch.name)
            .bind(patch.description)
            .bind(patch.image_url)
            .bind(patch.price)
            .bind(patch.stock)
            .bind(patch.is_on_discount)
            .bind(patch.discount_pct)
            .bind(patch.is_hidden)
            .bind(patch.created_by)
            .fetch_optional(&mut *s.conn)
            .await?;
        Ok(row)
    }

    async fn delete_product(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let mut s = self.session().await?;
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&mut *s.conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        let mut s = self.session().await?;
        sqlx::query("SELECT 1").execute(&mut *s.conn).await?;
        Ok(())
    }

    async fn clear_all(&self) -> Result<(), DatabaseError> {
        let mut s = self.session().await?;
        sqlx::query("DELETE FROM products").execute(&mut *s.conn).await?;
        sqlx::query("DELETE FROM users").execute(&mut *s.conn).await?;
        Ok(())
    }
}
