use clap::Args;
use serde_json::json;
use uuid::Uuid;

use crate::auth::TokenService;
use crate::cli::{utils, OutputFormat};

#[derive(Args, Debug)]
pub struct TokenArgs {
    #[arg(help = "Email to embed in the token")]
    pub email: String,

    #[arg(help = "User id to embed in the token")]
    pub id: Uuid,
}

pub async fn handle(args: TokenArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let security = utils::load_security_config()?;
    let tokens = TokenService::from_config(&security)?;

    let token = tokens.issue_at(&args.email, args.id, chrono::Utc::now())?;

    match output_format {
        OutputFormat::Json => utils::output_success(
            &output_format,
            "Token issued",
            Some(json!({ "token": token, "expires_in_seconds": tokens.ttl().num_seconds() })),
        ),
        // bare token so it can be piped into a header
        OutputFormat::Text => {
            println!("{}", token);
            Ok(())
        }
    }
}
