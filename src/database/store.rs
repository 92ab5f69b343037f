use async_trait::async_trait;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{NewProduct, NewUser, Product, ProductPatch, User};

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    /// Insert a user. Returns `DatabaseError::Duplicate("email")` when the
    /// email is already taken, even if a prior lookup said otherwise.
    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError>;
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn insert_product(&self, product: NewProduct) -> Result<Product, DatabaseError>;

    async fn list_products(&self) -> Result<Vec<Product>, DatabaseError>;

    /// Zero or one product; kept as a collection to match the HTTP contract
    async fn find_products_by_id(&self, id: Uuid) -> Result<Vec<Product>, DatabaseError>;

    /// Returns the updated product, or `None` when no product has this id
    async fn update_product(
        &self,
        id: Uuid,
        patch: ProductPatch,
    ) -> Result<Option<Product>, DatabaseError>;

    /// Returns whether a product was removed
    async fn delete_product(&self, id: Uuid) -> Result<bool, DatabaseError>;
}

/// Everything the HTTP layer needs from a backend
#[async_trait]
pub trait Store: UserStore + ProductStore {
    async fn ping(&self) -> Result<(), DatabaseError>;

    /// Delete every product and user
    async fn clear_all(&self) -> Result<(), DatabaseError>;
}
