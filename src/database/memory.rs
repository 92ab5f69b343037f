use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{NewProduct, NewUser, Product, ProductPatch, User};
use super::store::{ProductStore, Store, UserStore};

/// In-process store with the same contract as `PgStore`, including the
/// unique email rule. Used by tests and by CLI dry runs.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
}

#[derive(Default)]
struct Collections {
    users: Vec<User>,
    products: Vec<Product>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users with this exact email
    pub async fn count_users_with_email(&self, email: &str) -> usize {
        let data = self.inner.read().await;
        data.users.iter().filter(|u| u.email == email).count()
    }

    /// Snapshot of every stored user
    pub async fn users(&self) -> Vec<User> {
        self.inner.read().await.users.clone()
    }

    pub async fn user_count(&self) -> usize {
        self.inner.read().await.users.len()
    }

    pub async fn product_count(&self) -> usize {
        self.inner.read().await.products.len()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let data = self.inner.read().await;
        Ok(data.users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut data = self.inner.write().await;
        if data.users.iter().any(|u| u.email == user.email) {
            return Err(DatabaseError::Duplicate("email"));
        }
        let user = user.into_user(Uuid::new_v4());
        data.users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn insert_product(&self, product: NewProduct) -> Result<Product, DatabaseError> {
        let product = product.into_product(Uuid::new_v4());
        self.inner.write().await.products.push(product.clone());
        Ok(product)
    }

    async fn list_products(&self) -> Result<Vec<Product>, DatabaseError> {
        Ok(self.inner.read().await.products.clone())
    }

    async fn find_products_by_id(&self, id: Uuid) -> Result<Vec<Product>, DatabaseError> {
        let data = self.inner.read().await;
        Ok(data.products.iter().filter(|p| p.id == id).cloned().collect())
    }

    async fn update_product(
        &self,
        id: Uuid,
        patch: ProductPatch,
    ) -> Result<Option<Product>, DatabaseError> {
        let mut data = self.inner.write().await;
        match data.products.iter_mut().find(|p| p.id == id) {
            Some(product) => {
                patch.apply(product);
                Ok(Some(product.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_product(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let mut data = self.inner.write().await;
        let before = data.products.len();
        data.products.retain(|p| p.id != id);
        Ok(data.products.len() < before)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn clear_all(&self) -> Result<(), DatabaseError> {
        let mut data = self.inner.write().await;
        data.users.clear();
        data.products.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Jane Roe".into(),
            email: email.into(),
            password_hash: "$2b$04$hash".into(),
        }
    }

    fn new_product(name: &str) -> NewProduct {
        serde_json::from_value(serde_json::json!({
            "name": name,
            "description": "A thing",
            "imageURL": "https://picsum.photos/500/500",
            "price": 10.0,
            "stock": 1
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn rejects_duplicate_email() {
        let store = MemoryStore::new();
        store.insert_user(new_user("jane@roe.com")).await.unwrap();
        let err = store.insert_user(new_user("jane@roe.com")).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Duplicate("email")));
        assert_eq!(store.count_users_with_email("jane@roe.com").await, 1);
    }

    #[tokio::test]
    async fn email_match_is_case_sensitive() {
        let store = MemoryStore::new();
        store.insert_user(new_user("jane@roe.com")).await.unwrap();
        assert!(store.find_user_by_email("JANE@roe.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn product_crud() {
        let store = MemoryStore::new();
        let a = store.insert_product(new_product("Lamp")).await.unwrap();
        store.insert_product(new_product("Chair")).await.unwrap();
        assert_eq!(store.list_products().await.unwrap().len(), 2);

        let found = store.find_products_by_id(a.id).await.unwrap();
        assert_eq!(found, vec![a.clone()]);

        let patch = ProductPatch {
            stock: Some(42),
            ..Default::default()
        };
        let updated = store.update_product(a.id, patch).await.unwrap().unwrap();
        assert_eq!(updated.stock, 42);

        assert!(store.delete_product(a.id).await.unwrap());
        assert!(!store.delete_product(a.id).await.unwrap());
        assert!(store.find_products_by_id(a.id).await.unwrap().is_empty());
        assert_eq!(store.product_count().await, 1);
    }

    #[tokio::test]
    async fn update_missing_product_is_none() {
        let store = MemoryStore::new();
        let res = store
            .update_product(Uuid::new_v4(), ProductPatch::default())
            .await
            .unwrap();
        assert!(res.is_none());
    }
}
