use serde_json::{json, Map, Value};

use crate::cli::OutputFormat;
use crate::config::{DatabaseConfig, SecurityConfig};

/// Output a success message in the appropriate format.
///
/// In JSON mode the fields of `data` (an object) are merged into the envelope.
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = Map::new();
            response.insert("success".into(), json!(true));
            response.insert("message".into(), json!(message));

            if let Some(Value::Object(fields)) = data {
                response.extend(fields);
            }

            println!("{}", serde_json::to_string_pretty(&Value::Object(response))?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Database settings from `.env` and the environment; `TOKEN_SECRET` not required
pub fn load_database_config() -> anyhow::Result<DatabaseConfig> {
    let _ = dotenvy::dotenv();
    Ok(DatabaseConfig::from_env()?)
}

/// Token settings from `.env` and the environment; `DATABASE_URL` not required
pub fn load_security_config() -> anyhow::Result<SecurityConfig> {
    let _ = dotenvy::dotenv();
    Ok(SecurityConfig::from_env()?)
}
