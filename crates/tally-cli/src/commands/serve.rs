//! Server command implementation

use std::path::Path;

use anyhow::{bail, Result};

use tally_server::ServerConfig;

use super::open_db;

/// Environment variable for the bearer-token signing secret
const JWT_SECRET_ENV: &str = "TALLY_JWT_SECRET";

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    no_auth: bool,
    no_encrypt: bool,
) -> Result<()> {
    let jwt_secret = std::env::var(JWT_SECRET_ENV).ok().filter(|s| !s.is_empty());

    if !no_auth && jwt_secret.is_none() {
        bail!(
            "Authentication requires {} to be set, or pass --no-auth for local development",
            JWT_SECRET_ENV
        );
    }

    println!("🚀 Starting Tally web server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);
    if no_auth {
        println!();
        println!("   ⚠️  Authentication DISABLED - do not expose to network!");
    } else {
        println!("   🔐 Authentication: bearer tokens ({})", JWT_SECRET_ENV);
    }
    if no_encrypt {
        println!("   ⚠️  Encryption DISABLED (--no-encrypt)");
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let db = open_db(db_path, no_encrypt)?;
    let config = ServerConfig {
        require_auth: !no_auth,
        jwt_secret,
        allowed_origins: vec![],
    };

    tally_server::serve_with_config(db, host, port, config).await?;

    Ok(())
}
