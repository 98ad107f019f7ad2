//! CLI argument parsing tests

use clap::Parser;

use crate::cli::{Cli, Commands};

#[test]
fn test_parse_suggest() {
    let cli = Cli::try_parse_from(["tally", "suggest", "uber ride"]).unwrap();
    match cli.command {
        Commands::Suggest {
            description,
            merchant,
            no_fuzzy,
        } => {
            assert_eq!(description, "uber ride");
            assert_eq!(merchant, "");
            assert!(!no_fuzzy);
        }
        _ => panic!("expected suggest command"),
    }
}

#[test]
fn test_parse_serve_defaults() {
    let cli = Cli::try_parse_from(["tally", "serve"]).unwrap();
    match cli.command {
        Commands::Serve {
            host,
            port,
            no_auth,
        } => {
            assert_eq!(host, "127.0.0.1");
            assert_eq!(port, 3000);
            assert!(!no_auth);
        }
        _ => panic!("expected serve command"),
    }
}

#[test]
fn test_global_flags() {
    let cli = Cli::try_parse_from(["tally", "init", "--db", "/tmp/t.db", "--no-encrypt"]).unwrap();
    assert!(matches!(cli.command, Commands::Init));
    assert!(cli.no_encrypt);
    assert_eq!(cli.db.to_str().unwrap(), "/tmp/t.db");
}

#[test]
fn test_open_db_creates_parent_dirs() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("nested").join("tally.db");

    let db = crate::commands::open_db(&path, true).unwrap();
    assert_eq!(db.path(), path.to_string_lossy());
    assert!(path.exists());
}
