#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRecord {
    pub country_code: String, // ISO3, unique per table
    pub name: String,
    pub score: Option<f64>,   // None when the cell was empty or not a finite number
}

impl ScoreRecord {
    pub fn new(country_code: impl Into<String>, name: impl Into<String>, score: Option<f64>) -> Self {
        Self {
            country_code: country_code.into(),
            name: name.into(),
            score,
        }
    }

    /// True when the record carries a usable score
    pub fn has_score(&self) -> bool {
        matches!(self.score, Some(s) if s.is_finite())
    }

    /// Return a short label in the format "AFG (Afghanistan)"
    pub fn label(&self) -> String {
        format!("{} ({})", self.country_code, self.name)
    }
}

/// A loaded score table: one numeric column of interest plus country identity.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreTable {
    pub score_column: String,
    pub records: Vec<ScoreRecord>,
}

impl ScoreTable {
    pub fn new(score_column: impl Into<String>, records: Vec<ScoreRecord>) -> Self {
        Self {
            score_column: score_column.into(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
