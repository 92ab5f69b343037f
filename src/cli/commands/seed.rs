use clap::Args;
use serde_json::json;

use crate::cli::{utils, OutputFormat};
use crate::database::{DatabaseManager, PgStore};
use crate::seed::{self, SeedPlan, SEED_BCRYPT_COST};

#[derive(Args, Debug)]
pub struct SeedArgs {
    #[arg(long, default_value_t = 5, help = "Number of users to create")]
    pub users: usize,

    #[arg(long, default_value_t = 20, help = "Number of products to create")]
    pub products: usize,
}

pub async fn handle(args: SeedArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let database = utils::load_database_config()?;

    let pool = DatabaseManager::connect(&database).await?;
    DatabaseManager::ensure_schema(&pool).await?;

    let store = PgStore::new(pool.clone());
    let plan = SeedPlan {
        users: args.users,
        products: args.products,
        bcrypt_cost: SEED_BCRYPT_COST,
    };
    let result = seed::run(&store, plan, &mut rand::rng()).await;
    DatabaseManager::disconnect(pool).await;
    let report = result?;

    utils::output_success(
        &output_format,
        &format!(
            "Seeded {} users and {} products",
            report.users, report.products
        ),
        Some(json!({ "users": report.users, "products": report.products })),
    )
}
