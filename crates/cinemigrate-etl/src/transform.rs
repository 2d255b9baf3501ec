//! Normalization of legacy movie rows into catalog records.
//!
//! Every source row becomes one [`Movie`] plus its genre and person
//! links. Persons and genres are deduplicated across the whole run
//! through the [`IdentityRegistry`]; actor and writer links are also
//! deduplicated per movie by their source ids.

use std::collections::{HashMap, HashSet};

use cinemigrate_core::model::{
    MigrationBatch, Movie, MovieGenre, MovieId, MoviePerson, Role,
};

use crate::registry::IdentityRegistry;
use crate::source::RawMovie;

/// Placeholder the legacy store writes for absent values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Map the `N/A` placeholder to an empty description.
#[must_use]
pub fn normalize_description(description: &str) -> String {
    if description == NOT_AVAILABLE {
        String::new()
    } else {
        description.to_owned()
    }
}

/// Parse a source rating, falling back to `0.0` for anything that is
/// not a finite number.
#[must_use]
pub fn parse_rating(rating: &str) -> f64 {
    match rating.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// A name or token that carries no value: the placeholder or blank.
fn is_absent(value: &str) -> bool {
    value.is_empty() || value == NOT_AVAILABLE
}

/// Builds the record streams of one migration run.
#[derive(Debug)]
pub struct Transformer {
    registry: IdentityRegistry,
    movies: Vec<Movie>,
    movie_persons: Vec<MoviePerson>,
    movie_genres: Vec<MovieGenre>,
}

impl Transformer {
    #[must_use]
    pub fn new(registry: IdentityRegistry) -> Self {
        Self {
            registry,
            movies: Vec::new(),
            movie_persons: Vec::new(),
            movie_genres: Vec::new(),
        }
    }

    /// Normalize `rows` in arrival order and assemble the batch.
    ///
    /// `writers` maps scriptwriter source ids to display names.
    #[must_use]
    pub fn transform<R>(mut self, rows: R, writers: &HashMap<String, String>) -> MigrationBatch
    where
        R: IntoIterator<Item = RawMovie>,
    {
        for raw in rows {
            self.process_movie(raw, writers);
        }

        let batch = MigrationBatch {
            persons: self.registry.to_persons(),
            genres: self.registry.to_genres(),
            movies: self.movies,
            movie_persons: self.movie_persons,
            movie_genres: self.movie_genres,
        };
        log::info!("Transformed source rows: {}", batch.summary());
        batch
    }

    fn process_movie(&mut self, raw: RawMovie, writers: &HashMap<String, String>) {
        let movie = Movie::new(raw.title.as_str())
            .with_description(normalize_description(&raw.description))
            .with_rating(parse_rating(&raw.rating));
        log::debug!("Transforming movie {} ({}) as {}", raw.source_id, raw.title, movie.id);

        self.process_genres(movie.id, &raw);
        self.process_actors(movie.id, &raw.actor_ids, &raw.actor_names);
        self.process_directors(movie.id, &raw);
        self.process_writers(movie.id, &raw, writers);

        self.movies.push(movie);
    }

    /// One link per token; a title repeated within the same movie
    /// yields repeated links to the same genre.
    fn process_genres(&mut self, movie_id: MovieId, raw: &RawMovie) {
        let mut seen = HashSet::new();
        for token in raw.genre.split(',').map(str::trim) {
            if token.is_empty() {
                continue;
            }
            if !seen.insert(token) {
                log::warn!(
                    "Movie {}: genre {token:?} listed twice, linking it twice",
                    raw.source_id
                );
            }
            let genre_id = self.registry.genre(token);
            self.movie_genres.push(MovieGenre::new(movie_id, genre_id));
        }
    }

    fn process_actors(&mut self, movie_id: MovieId, actor_ids: &str, actor_names: &str) {
        let mut seen = HashSet::new();
        for (actor_id, name) in actor_ids.split(',').zip(actor_names.split(',')) {
            let name = name.trim();
            if is_absent(name) || !seen.insert(actor_id.trim()) {
                continue;
            }
            self.link_person(movie_id, name, Role::Actor);
        }
    }

    /// Repeated director names are linked once per occurrence.
    fn process_directors(&mut self, movie_id: MovieId, raw: &RawMovie) {
        let mut seen = HashSet::new();
        for name in raw.director.split(',').map(str::trim) {
            if is_absent(name) {
                continue;
            }
            if !seen.insert(name) {
                log::warn!(
                    "Movie {}: director {name:?} listed twice, linking it twice",
                    raw.source_id
                );
            }
            self.link_person(movie_id, name, Role::Director);
        }
    }

    fn process_writers(
        &mut self,
        movie_id: MovieId,
        raw: &RawMovie,
        writers: &HashMap<String, String>,
    ) {
        let mut seen = HashSet::new();
        for writer in &raw.writers {
            let Some(name) = writers.get(&writer.id).map(|n| n.trim()) else {
                log::debug!(
                    "Movie {}: writer {} not in writers table, skipping",
                    raw.source_id,
                    writer.id
                );
                continue;
            };
            if is_absent(name) || !seen.insert(writer.id.as_str()) {
                continue;
            }
            self.link_person(movie_id, name, Role::Writer);
        }
    }

    fn link_person(&mut self, movie_id: MovieId, name: &str, role: Role) {
        let person_id = self.registry.person(name);
        self.movie_persons
            .push(MoviePerson::new(movie_id, person_id, role));
    }
}
