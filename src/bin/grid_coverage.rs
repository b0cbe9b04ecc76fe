use std::io::{Read, Write};

use gridgame::{Catalog, Entity, Roster, Vocabulary};
use serde::Deserialize;

#[derive(Deserialize)]
struct Input {
    champions: Vec<Entity>,
    categories: serde_json::Value,
}

fn main() -> anyhow::Result<()> {
    gridgame::logging::init("warn");
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    let inp: Input = serde_json::from_str(&buf)?;

    let roster = Roster::new(inp.champions);
    let vocab = Vocabulary::from_value(inp.categories)?;
    let coverage = Catalog::compile(&vocab, &roster).coverage();
    for label in &coverage.empty {
        tracing::warn!(label = %label, "empty category");
    }

    let mut stdout = std::io::stdout();
    serde_json::to_writer(&mut stdout, &coverage)?;
    stdout.write_all(b"\n")?;
    Ok(())
}
