use serde::{Deserialize, Serialize};

use crate::model::ids::MovieId;

/// A film work as stored in the target catalog.
///
/// Movies are never deduplicated: two source rows with the same title
/// become two distinct records. Timestamps are not part of the record;
/// they are stamped when the record is written to the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,

    /// Plot summary, empty when the source had none.
    pub description: String,

    /// IMDb rating, `0.0` when the source value was not a number.
    pub rating: f64,
}

impl Movie {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: MovieId::new(),
            title: title.into(),
            description: String::new(),
            rating: 0.0,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }
}
