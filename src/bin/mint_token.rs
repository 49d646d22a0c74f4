use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;

use casting_agency::auth::{role_permissions, AuthConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Mint a development JWT for the casting agency API", long_about = None)]
struct Cli {
    /// Role bundle to grant: assistant, director, or producer
    #[arg(long, conflicts_with = "permissions")]
    role: Option<String>,

    /// Explicit permission tag to grant (repeatable), e.g. --permission get:actors
    #[arg(long = "permission")]
    permissions: Vec<String>,

    /// Token lifetime in hours (defaults to JWT_EXP_HOURS)
    #[arg(long)]
    exp_hours: Option<i64>,
}

fn main() -> anyhow::Result<()> {
    // Try to load env from CWD; when running in Docker the binary CWD may differ,
    // so fall back to the crate-local `.env` using CARGO_MANIFEST_DIR.
    if dotenv().is_err() {
        let crate_env = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
        let _ = dotenvy::from_path(crate_env);
    }

    let cli = Cli::parse();
    let auth = AuthConfig::from_env()?;

    let permissions: Vec<String> = match cli.role.as_deref() {
        Some(role) => role_permissions(role)
            .with_context(|| format!("unknown role: {role}"))?
            .iter()
            .map(|p| p.to_string())
            .collect(),
        None => cli.permissions,
    };

    let token = auth.encode_with_lifetime(&permissions, cli.exp_hours.unwrap_or(auth.exp_hours))?;
    println!("{token}");

    Ok(())
}
