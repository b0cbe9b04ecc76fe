pub mod catalog;
pub mod category;
pub mod config;
pub mod daily;
pub mod difficulty;
pub mod entity;
pub mod error;
pub mod generator;
pub mod logging;
pub mod matcher;
pub mod server;
pub mod vocabulary;

pub use catalog::Catalog;
pub use category::{Category, CategoryKind};
pub use entity::{Ability, Entity, Roster};
pub use error::{GenerationFailed, LoadError, SplitError};
pub use generator::{generate, valid_cell_entities, verify_guess, Puzzle, PuzzleGenerator};
pub use matcher::matches;
pub use vocabulary::Vocabulary;
