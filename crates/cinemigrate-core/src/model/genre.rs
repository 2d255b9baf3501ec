use serde::{Deserialize, Serialize};

use crate::model::ids::GenreId;

/// A genre, unique by its trimmed title within one migration run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub title: String,
}

impl Genre {
    #[must_use]
    pub fn new(id: GenreId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}
