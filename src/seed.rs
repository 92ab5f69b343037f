//! Demo data for a fresh database: a handful of users sharing one password
//! and a catalog of random products owned by them.

use rand::{seq::IndexedRandom, Rng};
use thiserror::Error;

use crate::auth::password::{hash_password, PasswordError};
use crate::database::models::{NewProduct, NewUser, User};
use crate::database::{DatabaseError, Store};

pub const SEED_PASSWORD: &str = "12345678";
pub const SEED_BCRYPT_COST: u32 = 10;
pub const SEED_IMAGE_URL: &str = "https://picsum.photos/500/500";

const FIRST_NAMES: &[&str] = &[
    "Ada", "Bjorn", "Chloe", "Dmitri", "Elena", "Farah", "Gustav", "Hana", "Ivan", "Julia",
    "Kenji", "Lina", "Mateo", "Nora", "Oscar", "Priya",
];
const LAST_NAMES: &[&str] = &[
    "Andersen", "Baker", "Costa", "Dahl", "Eriksen", "Fischer", "Garcia", "Holm", "Ito",
    "Jensen", "Kowalski", "Larsen", "Moreau", "Nielsen",
];
const ADJECTIVES: &[&str] = &[
    "Handcrafted", "Ergonomic", "Rustic", "Sleek", "Refined", "Practical", "Gorgeous",
    "Licensed", "Recycled", "Small", "Tasty", "Incredible",
];
const MATERIALS: &[&str] = &[
    "Wooden", "Steel", "Cotton", "Granite", "Bamboo", "Rubber", "Plastic", "Bronze", "Frozen",
    "Fresh",
];
const ITEMS: &[&str] = &[
    "Chair", "Lamp", "Table", "Keyboard", "Shoes", "Gloves", "Bike", "Towels", "Soap", "Hat",
    "Cheese", "Chips",
];

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("password hashing failed: {0}")]
    Password(#[from] PasswordError),

    #[error("cannot seed products without users")]
    NoUsers,
}

#[derive(Debug, Clone, Copy)]
pub struct SeedPlan {
    pub users: usize,
    pub products: usize,
    pub bcrypt_cost: u32,
}

impl Default for SeedPlan {
    fn default() -> Self {
        Self {
            users: 5,
            products: 20,
            bcrypt_cost: SEED_BCRYPT_COST,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub products: usize,
}

/// Wipe the store, then insert `plan.users` users and `plan.products` products.
pub async fn run<R>(store: &dyn Store, plan: SeedPlan, rng: &mut R) -> Result<SeedReport, SeedError>
where
    R: Rng + ?Sized,
{
    // refuse before anything is deleted
    if plan.products > 0 && plan.users == 0 {
        return Err(SeedError::NoUsers);
    }

    store.clear_all().await?;
    tracing::info!("Cleared users and products");

    // one hash shared by every seeded account
    let password_hash = hash_password(SEED_PASSWORD, plan.bcrypt_cost).await?;

    let mut users = Vec::with_capacity(plan.users);
    for i in 0..plan.users {
        let user = store.insert_user(fake_user(rng, i, &password_hash)).await?;
        users.push(user);
    }

    for _ in 0..plan.products {
        let product = fake_product(rng, &users)?;
        store.insert_product(product).await?;
    }

    tracing::info!("Seeded {} users and {} products", users.len(), plan.products);
    Ok(SeedReport {
        users: users.len(),
        products: plan.products,
    })
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, words: &[&'a str]) -> &'a str {
    words.choose(rng).copied().unwrap_or_default()
}

/// The index keeps emails unique within one run
fn fake_user<R: Rng + ?Sized>(rng: &mut R, index: usize, password_hash: &str) -> NewUser {
    let first = pick(rng, FIRST_NAMES);
    let last = pick(rng, LAST_NAMES);
    NewUser {
        name: format!("{} {}", first, last),
        email: format!(
            "{}.{}{}@example.com",
            first.to_lowercase(),
            last.to_lowercase(),
            index + 1
        ),
        password_hash: password_hash.to_string(),
    }
}

fn fake_product<R: Rng + ?Sized>(rng: &mut R, owners: &[User]) -> Result<NewProduct, SeedError> {
    let owner = owners.choose(rng).ok_or(SeedError::NoUsers)?;
    let adjective = pick(rng, ADJECTIVES);
    let material = pick(rng, MATERIALS);
    let item = pick(rng, ITEMS);

    let cents: u32 = rng.random_range(500..=500_000);

    Ok(NewProduct {
        name: format!("{} {} {}", adjective, material, item),
        description: format!(
            "The {} {} {} is {} and built to last.",
            adjective.to_lowercase(),
            material.to_lowercase(),
            item.to_lowercase(),
            if rng.random_bool(0.5) { "lightweight" } else { "sturdy" }
        ),
        image_url: SEED_IMAGE_URL.to_string(),
        price: f64::from(cents) / 100.0,
        stock: rng.random_range(0..=200),
        is_on_discount: rng.random_bool(0.5),
        discount_pct: f64::from(rng.random_range(0u8..=100)),
        is_hidden: Some(false),
        created_by: Some(owner.id.to_string()),
    })
}
