use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::genre::Genre;
use crate::model::links::{MovieGenre, MoviePerson};
use crate::model::movie::Movie;
use crate::model::person::{Person, Role};

/// Everything one migration run produces, held in memory until load.
///
/// The five streams form a single logical batch: they are written in
/// one target transaction or not at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MigrationBatch {
    pub movies: Vec<Movie>,
    pub persons: Vec<Person>,
    pub genres: Vec<Genre>,
    pub movie_persons: Vec<MoviePerson>,
    pub movie_genres: Vec<MovieGenre>,
}

impl MigrationBatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
            && self.persons.is_empty()
            && self.genres.is_empty()
            && self.movie_persons.is_empty()
            && self.movie_genres.is_empty()
    }

    /// Per-stream record counts.
    #[must_use]
    pub fn summary(&self) -> BatchSummary {
        let count_role = |role: Role| {
            self.movie_persons
                .iter()
                .filter(|link| link.role == role)
                .count()
        };

        BatchSummary {
            movies: self.movies.len(),
            persons: self.persons.len(),
            genres: self.genres.len(),
            movie_persons: self.movie_persons.len(),
            movie_genres: self.movie_genres.len(),
            actor_links: count_role(Role::Actor),
            director_links: count_role(Role::Director),
            writer_links: count_role(Role::Writer),
        }
    }
}

/// Record counts of a [`MigrationBatch`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub movies: usize,
    pub persons: usize,
    pub genres: usize,
    pub movie_persons: usize,
    pub movie_genres: usize,
    pub actor_links: usize,
    pub director_links: usize,
    pub writer_links: usize,
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} movies, {} persons, {} genres, {} movie-person links \
             ({} actor, {} director, {} writer), {} movie-genre links",
            self.movies,
            self.persons,
            self.genres,
            self.movie_persons,
            self.actor_links,
            self.director_links,
            self.writer_links,
            self.movie_genres,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ids::{GenreId, PersonId};

    #[test]
    fn test_empty_batch() {
        let batch = MigrationBatch::default();
        assert!(batch.is_empty());
        assert_eq!(batch.summary(), BatchSummary::default());
    }

    #[test]
    fn test_summary_counts_roles() {
        let movie = Movie::new("Alien");
        let ridley = Person::new(PersonId::new(), "Ridley Scott");
        let sigourney = Person::new(PersonId::new(), "Sigourney Weaver");
        let horror = Genre::new(GenreId::new(), "Horror");

        let batch = MigrationBatch {
            movie_persons: vec![
                MoviePerson::new(movie.id, ridley.id, Role::Director),
                MoviePerson::new(movie.id, sigourney.id, Role::Actor),
            ],
            movie_genres: vec![MovieGenre::new(movie.id, horror.id)],
            movies: vec![movie],
            persons: vec![ridley, sigourney],
            genres: vec![horror],
        };

        let summary = batch.summary();
        assert!(!batch.is_empty());
        assert_eq!(summary.movies, 1);
        assert_eq!(summary.persons, 2);
        assert_eq!(summary.actor_links, 1);
        assert_eq!(summary.director_links, 1);
        assert_eq!(summary.writer_links, 0);
        assert_eq!(summary.movie_genres, 1);
        assert!(summary.to_string().starts_with("1 movies, 2 persons"));
    }
}
