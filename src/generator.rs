//! Rejection sampling of 3+3 category splits.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::category::Category;
use crate::difficulty;
use crate::entity::Roster;
use crate::error::GenerationFailed;
use crate::vocabulary::Vocabulary;

pub const MAX_ATTEMPTS: usize = 100;

/// Labels drawn per attempt: three rows then three columns.
const DRAW: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub rows: [String; 3],
    pub cols: [String; 3],
}

impl Puzzle {
    /// Stable id derived from the labels; nothing needs to be stored.
    pub fn id(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.rows.join("|").as_bytes());
        hasher.update(self.cols.join("|").as_bytes());
        hex::encode(hasher.finalize())
    }

    #[cfg(test)]
    fn cells(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rows
            .iter()
            .flat_map(move |r| self.cols.iter().map(move |c| (r.as_str(), c.as_str())))
    }
}

#[derive(Debug, Clone)]
pub struct Draft {
    pub puzzle: Puzzle,
    pub difficulty: f64,
    pub attempts: usize,
}

#[derive(Debug, Clone)]
pub struct PuzzleGenerator {
    catalog: Arc<Catalog>,
}

impl PuzzleGenerator {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn roster(&self) -> &Roster {
        self.catalog.roster()
    }

    /// First feasible draw wins.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Draft, GenerationFailed> {
        self.search(rng, None)
    }

    /// Like `generate`, but a feasible draw is also rejected when its grid
    /// difficulty is not within tolerance of `target`.
    pub fn generate_targeted<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        target: f64,
    ) -> Result<Draft, GenerationFailed> {
        self.search(rng, Some(target))
    }

    fn search<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        target: Option<f64>,
    ) -> Result<Draft, GenerationFailed> {
        let catalog = &*self.catalog;
        let n = catalog.len();
        if n < DRAW {
            tracing::warn!(labels = n, "vocabulary too small to draw a puzzle");
            return Err(GenerationFailed {
                attempts: 0,
                vocabulary: n,
            });
        }

        let mut order: Vec<usize> = (0..n).collect();
        for attempt in 1..=MAX_ATTEMPTS {
            let (picked, _) = order.partial_shuffle(rng, DRAW);
            let rows = [picked[0], picked[1], picked[2]];
            let cols = [picked[3], picked[4], picked[5]];

            if !catalog.feasible(&rows, &cols) {
                tracing::debug!(attempt, "draw rejected: empty cell");
                continue;
            }
            let grid_difficulty = difficulty::grid(catalog, &rows, &cols);
            if let Some(target) = target {
                if !difficulty::within_target(grid_difficulty, target) {
                    tracing::debug!(attempt, grid_difficulty, target, "draw rejected: off target");
                    continue;
                }
            }

            let label = |i: usize| catalog.entries()[i].label().to_string();
            let puzzle = Puzzle {
                rows: rows.map(label),
                cols: cols.map(label),
            };
            tracing::info!(
                attempt,
                rows = ?puzzle.rows,
                cols = ?puzzle.cols,
                difficulty = grid_difficulty,
                "generated puzzle"
            );
            return Ok(Draft {
                puzzle,
                difficulty: grid_difficulty,
                attempts: attempt,
            });
        }

        tracing::warn!(attempts = MAX_ATTEMPTS, labels = n, "could not find valid categories");
        Err(GenerationFailed {
            attempts: MAX_ATTEMPTS,
            vocabulary: n,
        })
    }

    pub fn valid_cell_entities(&self, row: &str, col: &str) -> Vec<&str> {
        self.catalog.cell(row, col)
    }

    /// Unknown names are a wrong guess, not an error.
    pub fn verify_guess(&self, name: &str, row: &str, col: &str) -> bool {
        verify_guess(name, row, col, self.roster())
    }
}

/// One-shot generation straight from a vocabulary and a roster.
pub fn generate<R: Rng + ?Sized>(
    vocab: &Vocabulary,
    roster: &Roster,
    rng: &mut R,
) -> Result<Puzzle, GenerationFailed> {
    let generator = PuzzleGenerator::new(Arc::new(Catalog::compile(vocab, roster)));
    generator.generate(rng).map(|draft| draft.puzzle)
}

pub fn valid_cell_entities(row: &str, col: &str, roster: &Roster) -> Vec<String> {
    let (row, col) = (Category::new(row), Category::new(col));
    roster
        .iter()
        .filter(|e| row.matches(e) && col.matches(e))
        .map(|e| e.name.clone())
        .collect()
}

pub fn verify_guess(name: &str, row: &str, col: &str, roster: &Roster) -> bool {
    match roster.by_name(name) {
        Some(entity) => Category::new(row).matches(entity) && Category::new(col).matches(entity),
        None => {
            tracing::debug!(name, "guess names an unknown entity");
            false
        }
    }
}
