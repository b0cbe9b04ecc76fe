use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::server::DEFAULT_ICON_BASE_URL;

/// Champion grid puzzle server.
#[derive(Debug, Clone, Parser)]
#[command(name = "gridgame", version, about)]
pub struct Config {
    /// Entity dataset (`{"champions": [...]}` or a bare array).
    #[arg(long, env = "GRID_CHAMPIONS", default_value = "data/champions.json")]
    pub champions: PathBuf,

    /// Category vocabulary, grouped by type or a flat array.
    #[arg(long, env = "GRID_CATEGORIES", default_value = "data/categories.json")]
    pub categories: PathBuf,

    #[arg(long, env = "GRID_BIND", default_value = "127.0.0.1:3001")]
    pub bind: SocketAddr,

    #[arg(long, env = "GRID_ICON_BASE_URL", default_value = DEFAULT_ICON_BASE_URL)]
    pub icon_base_url: String,

    /// Frontend origin allowed by CORS.
    #[arg(long, env = "GRID_ALLOWED_ORIGIN", default_value = "http://localhost:3000")]
    pub allowed_origin: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cfg = Config::try_parse_from([
            "gridgame",
            "--champions",
            "/tmp/c.json",
            "--bind",
            "0.0.0.0:8080",
            "--allowed-origin",
            "https://grid.example",
        ])
        .unwrap();
        assert_eq!(cfg.champions, PathBuf::from("/tmp/c.json"));
        assert_eq!(cfg.bind.port(), 8080);
        assert_eq!(cfg.allowed_origin, "https://grid.example");
    }

    #[test]
    fn rejects_bad_bind_address() {
        assert!(Config::try_parse_from(["gridgame", "--bind", "nowhere"]).is_err());
    }
}
