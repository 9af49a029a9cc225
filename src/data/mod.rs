pub mod cleaner;
pub mod loader;
pub mod types;

pub use cleaner::{clean_scores, CleanedScores};
pub use loader::{load_score_table, read_score_table, ColumnSpec};
pub use types::{ScoreRecord, ScoreTable};
