use std::io::{BufRead, BufReader, Write};
use std::sync::Arc;

use chrono::NaiveDate;
use gridgame::generator::Draft;
use gridgame::{daily, Catalog, Entity, GenerationFailed, PuzzleGenerator, Roster, Vocabulary};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
enum Msg {
    Init {
        champions: Vec<Entity>,
        categories: serde_json::Value, // grouped object or flat array
    },
    Generate {
        seed: Option<u64>,
        target_difficulty: Option<f64>,
    },
    Daily {
        date: NaiveDate,
    },
    Verify {
        entity_name: String,
        categories: [String; 2],
    },
    Cell {
        row_category: String,
        col_category: String,
    },
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
enum Out {
    Ready {
        entities: usize,
        labels: usize,
    },
    Puzzle {
        rows: [String; 3],
        cols: [String; 3],
        puzzle_id: String,
        difficulty: f64,
        attempts: usize,
    },
    Verdict {
        is_valid: bool,
    },
    Entities {
        names: Vec<String>,
    },
    Error {
        message: String,
    },
}

impl From<Draft> for Out {
    fn from(draft: Draft) -> Self {
        Out::Puzzle {
            puzzle_id: draft.puzzle.id(),
            rows: draft.puzzle.rows,
            cols: draft.puzzle.cols,
            difficulty: draft.difficulty,
            attempts: draft.attempts,
        }
    }
}

fn emit<W: Write>(w: &mut W, out: &Out) -> std::io::Result<()> {
    serde_json::to_writer(&mut *w, out)?;
    w.write_all(b"\n")?;
    w.flush()
}

fn init(champions: Vec<Entity>, categories: serde_json::Value, state: &mut Option<PuzzleGenerator>) -> Out {
    let vocab = match Vocabulary::from_value(categories) {
        Ok(v) => v,
        Err(e) => {
            return Out::Error {
                message: format!("bad categories: {e}"),
            }
        }
    };
    let roster = Roster::new(champions);
    let catalog = Catalog::compile(&vocab, &roster);
    let ready = Out::Ready {
        entities: roster.len(),
        labels: catalog.len(),
    };
    *state = Some(PuzzleGenerator::new(Arc::new(catalog)));
    ready
}

fn with_generator<F>(state: &Option<PuzzleGenerator>, f: F) -> Out
where
    F: FnOnce(&PuzzleGenerator) -> Result<Out, GenerationFailed>,
{
    match state {
        Some(generator) => f(generator).unwrap_or_else(|e| Out::Error {
            message: e.to_string(),
        }),
        None => Out::Error {
            message: "not initialized".into(),
        },
    }
}

fn handle(msg: Msg, state: &mut Option<PuzzleGenerator>) -> Out {
    match msg {
        Msg::Init {
            champions,
            categories,
        } => init(champions, categories, state),
        Msg::Generate {
            seed,
            target_difficulty,
        } => with_generator(state, |g| {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            match target_difficulty {
                Some(target) if !target.is_finite() => {
                    return Ok(Out::Error {
                        message: "targetDifficulty must be a finite number".into(),
                    })
                }
                Some(target) => g.generate_targeted(&mut rng, target),
                None => g.generate(&mut rng),
            }
            .map(Out::from)
        }),
        Msg::Daily { date } => with_generator(state, |g| daily::challenge(g, date).map(Out::from)),
        Msg::Verify {
            entity_name,
            categories: [row, col],
        } => with_generator(state, |g| {
            Ok(Out::Verdict {
                is_valid: g.verify_guess(&entity_name, &row, &col),
            })
        }),
        Msg::Cell {
            row_category,
            col_category,
        } => with_generator(state, |g| {
            Ok(Out::Entities {
                names: g
                    .valid_cell_entities(&row_category, &col_category)
                    .into_iter()
                    .map(String::from)
                    .collect(),
            })
        }),
    }
}

fn main() -> anyhow::Result<()> {
    gridgame::logging::init("warn");
    let stdin = std::io::stdin();
    let mut reader = BufReader::new(stdin.lock());
    let mut line = String::new();
    let mut state: Option<PuzzleGenerator> = None;
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
            Err(e) => Out::Error {
                message: format!("bad json: {e}"),
            },
        };
        emit(&mut stdout, &out)?;
    }
    Ok(())
}
