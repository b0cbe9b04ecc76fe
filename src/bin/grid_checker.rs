use std::io::{BufRead, BufReader, Write};

use gridgame::{difficulty, Catalog, Entity, Roster, Vocabulary};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
#[serde(tag = "type")]
enum Msg {
    Init {
        champions: Vec<Entity>,
        categories: serde_json::Value,
    },
    Validate {
        rows: [String; 3],
        cols: [String; 3],
    },
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum Out {
    Ready,
    Valid { difficulty: f64 },
    Invalid { reason: String },
}

fn validate(rows: &[String; 3], cols: &[String; 3], catalog: &Catalog) -> Out {
    match catalog.check_split(rows, cols) {
        Ok((r, c)) => Out::Valid {
            difficulty: difficulty::grid(catalog, &r, &c),
        },
        Err(e) => Out::Invalid { reason: e.to_string() },
    }
}

fn handle(msg: Msg, state: &mut Option<Catalog>) -> Out {
    match msg {
        Msg::Init {
            champions,
            categories,
        } => match Vocabulary::from_value(categories) {
            Ok(vocab) => {
                *state = Some(Catalog::compile(&vocab, &Roster::new(champions)));
                Out::Ready
            }
            Err(e) => Out::Invalid {
                reason: format!("bad categories: {e}"),
            },
        },
        Msg::Validate { rows, cols } => match state {
            Some(catalog) => validate(&rows, &cols, catalog),
            None => Out::Invalid {
                reason: "not initialized".into(),
            },
        },
    }
}

fn main() -> anyhow::Result<()> {
    gridgame::logging::init("warn");
    let stdin = std::io::stdin();
    let mut reader = BufReader::new(stdin.lock());
    let mut line = String::new();
    let mut state: Option<Catalog> = None;
    let mut stdout = std::io::stdout();

    loop {
        line.clear();
        let n = reader.read_line(&mut line)?;
        if n == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        let out = match serde_json::from_str::<Msg>(&line) {
            Ok(msg) => handle(msg, &mut state),
            Err(e) => Out::Invalid {
                reason: format!("bad json: {e}"),
            },
        };
        writeln!(stdout, "{}", serde_json::to_string(&out)?)?;
    }
    Ok(())
}
