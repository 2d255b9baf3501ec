use serde::{Deserialize, Serialize};

use crate::model::ids::{GenreId, MovieGenreId, MovieId, MoviePersonId, PersonId};
use crate::model::person::Role;

/// Association between a film work and one of its genres.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieGenre {
    pub id: MovieGenreId,
    pub movie_id: MovieId,
    pub genre_id: GenreId,
}

impl MovieGenre {
    #[must_use]
    pub fn new(movie_id: MovieId, genre_id: GenreId) -> Self {
        Self {
            id: MovieGenreId::new(),
            movie_id,
            genre_id,
        }
    }
}

/// Association between a film work and a person in a given role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoviePerson {
    pub id: MoviePersonId,
    pub movie_id: MovieId,
    pub person_id: PersonId,
    pub role: Role,
}

impl MoviePerson {
    #[must_use]
    pub fn new(movie_id: MovieId, person_id: PersonId, role: Role) -> Self {
        Self {
            id: MoviePersonId::new(),
            movie_id,
            person_id,
            role,
        }
    }
}
