use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored catalog item, serialized the way API clients see it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(rename = "imageURL")]
    pub image_url: String,
    pub price: f64,
    pub stock: i64,
    pub is_on_discount: bool,
    pub discount_pct: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_hidden: Option<bool>,
    /// Advisory reference to the creating user; not checked against `users`
    #[serde(rename = "_createdBy", skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

/// Product body accepted on create. Required fields fail decoding when absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    #[serde(rename = "imageURL")]
    pub image_url: String,
    pub price: f64,
    pub stock: i64,
    #[serde(default, alias = "isOndiscount")]
    pub is_on_discount: bool,
    #[serde(default)]
    pub discount_pct: f64,
    #[serde(default)]
    pub is_hidden: Option<bool>,
    #[serde(rename = "_createdBy", default)]
    pub created_by: Option<String>,
}

impl NewProduct {
    pub fn into_product(self, id: Uuid) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            image_url: self.image_url,
            price: self.price,
            stock: self.stock,
            is_on_discount: self.is_on_discount,
            discount_pct: self.discount_pct,
            is_hidden: self.is_hidden,
            created_by: self.created_by,
        }
    }
}

/// Partial update; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "imageURL")]
    pub image_url: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    #[serde(alias = "isOndiscount")]
    pub is_on_discount: Option<bool>,
    pub discount_pct: Option<f64>,
    pub is_hidden: Option<bool>,
    #[serde(rename = "_createdBy")]
    pub created_by: Option<String>,
}

impl ProductPatch {
    pub fn apply(self, product: &mut Product) {
        if let Some(v) = self.name {
            product.name = v;
        }
        if let Some(v) = self.description {
            product.description = v;
        }
        if let Some(v) = self.image_url {
            product.image_url = v;
        }
        if let Some(v) = self.price {
            product.price = v;
        }
        if let Some(v) = self.stock {
            product.stock = v;
        }
        if let Some(v) = self.is_on_discount {
            product.is_on_discount = v;
        }
        if let Some(v) = self.discount_pct {
            product.discount_pct = v;
        }
        if self.is_hidden.is_some() {
            product.is_hidden = self.is_hidden;
        }
        if self.created_by.is_some() {
            product.created_by = self.created_by;
        }
    }
}
