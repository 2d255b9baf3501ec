//! Transactional bulk load of a [`MigrationBatch`] into the target store.
//!
//! The loader is store-agnostic: it drives a [`TargetTransaction`] through
//! the time-zone statement and the five bulk inserts in referential order,
//! and commits only when every insert succeeded. Dropping an uncommitted
//! transaction rolls it back, so any failure leaves the target untouched.

pub mod pg;
pub mod sqlite;

use serde::{Deserialize, Serialize};
use std::fmt;

use cinemigrate_core::model::{Genre, MigrationBatch, Movie, MovieGenre, MoviePerson, Person};
use cinemigrate_core::schema::Table;

use crate::error::MigrateResult;

pub use self::pg::PostgresTarget;
pub use self::sqlite::SqliteTarget;

/// A store the batch can be loaded into.
pub trait TargetStore {
    type Transaction<'a>: TargetTransaction
    where
        Self: 'a;

    /// Open the transaction all inserts of one load share.
    ///
    /// # Errors
    /// Fails if the store refuses to start a transaction.
    fn begin(&mut self) -> MigrateResult<Self::Transaction<'_>>;
}

/// One open target transaction.
///
/// Each insert stamps `created` and `modified` with the same instant,
/// taken when the record is serialized, and returns the row count.
pub trait TargetTransaction {
    /// Set the session time zone used to record timestamps.
    ///
    /// # Errors
    /// Fails if the store rejects the zone.
    fn set_time_zone(&mut self, zone: &str) -> MigrateResult<()>;

    /// # Errors
    /// Fails if the bulk insert fails.
    fn insert_movies(&mut self, movies: &[Movie]) -> MigrateResult<u64>;

    /// # Errors
    /// Fails if the bulk insert fails.
    fn insert_persons(&mut self, persons: &[Person]) -> MigrateResult<u64>;

    /// # Errors
    /// Fails if the bulk insert fails.
    fn insert_genres(&mut self, genres: &[Genre]) -> MigrateResult<u64>;

    /// # Errors
    /// Fails if the bulk insert fails, including on dangling references.
    fn insert_movie_persons(&mut self, links: &[MoviePerson]) -> MigrateResult<u64>;

    /// # Errors
    /// Fails if the bulk insert fails, including on dangling references.
    fn insert_movie_genres(&mut self, links: &[MovieGenre]) -> MigrateResult<u64>;

    /// Make every insert visible at once.
    ///
    /// # Errors
    /// Fails if the commit fails; nothing is persisted in that case.
    fn commit(self) -> MigrateResult<()>;
}

/// Rows written per target table by one load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    pub movies: u64,
    pub persons: u64,
    pub genres: u64,
    pub movie_persons: u64,
    pub movie_genres: u64,
}

impl LoadReport {
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.movies + self.persons + self.genres + self.movie_persons + self.movie_genres
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}, {} {}, {} {}, {} {}, {} {}",
            Table::FilmWork,
            self.movies,
            Table::Persons,
            self.persons,
            Table::Genres,
            self.genres,
            Table::FilmWorksPersons,
            self.movie_persons,
            Table::FilmWorksGenres,
            self.movie_genres,
        )
    }
}

/// Write `batch` into `store` in one transaction.
///
/// The session time zone is set first, then movies, persons, genres,
/// movie-person links and movie-genre links are inserted in that order.
///
/// # Errors
/// Any failure aborts the load and rolls back everything written so far.
pub fn load<S: TargetStore>(
    store: &mut S,
    batch: &MigrationBatch,
    time_zone: &str,
) -> MigrateResult<LoadReport> {
    let mut tx = store.begin()?;
    tx.set_time_zone(time_zone)?;

    let report = LoadReport {
        movies: tx.insert_movies(&batch.movies)?,
        persons: tx.insert_persons(&batch.persons)?,
        genres: tx.insert_genres(&batch.genres)?,
        movie_persons: tx.insert_movie_persons(&batch.movie_persons)?,
        movie_genres: tx.insert_movie_genres(&batch.movie_genres)?,
    };

    tx.commit()?;
    log::info!("Loaded {} rows: {report}", report.total());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MigrateError;
    use cinemigrate_core::model::{GenreId, PersonId, Role};

    /// Records every call; optionally fails one step.
    #[derive(Debug, Default)]
    struct RecordingStore {
        calls: Vec<&'static str>,
        fail_on: Option<&'static str>,
        zone: Option<String>,
    }

    #[derive(Debug)]
    struct RecordingTx<'a> {
        store: &'a mut RecordingStore,
    }

    impl RecordingTx<'_> {
        fn step(&mut self, step: &'static str, rows: usize) -> MigrateResult<u64> {
            self.store.calls.push(step);
            if self.store.fail_on == Some(step) {
                return Err(MigrateError::target(step, "simulated failure"));
            }
            Ok(rows as u64)
        }
    }

    impl TargetStore for RecordingStore {
        type Transaction<'a> = RecordingTx<'a>
        where
            Self: 'a;

        fn begin(&mut self) -> MigrateResult<RecordingTx<'_>> {
            self.calls.push("begin");
            Ok(RecordingTx { store: self })
        }
    }

    impl TargetTransaction for RecordingTx<'_> {
        fn set_time_zone(&mut self, zone: &str) -> MigrateResult<()> {
            self.store.zone = Some(zone.to_owned());
            self.step("time_zone", 0).map(|_| ())
        }

        fn insert_movies(&mut self, movies: &[Movie]) -> MigrateResult<u64> {
            self.step("movies", movies.len())
        }

        fn insert_persons(&mut self, persons: &[Person]) -> MigrateResult<u64> {
            self.step("persons", persons.len())
        }

        fn insert_genres(&mut self, genres: &[Genre]) -> MigrateResult<u64> {
            self.step("genres", genres.len())
        }

        fn insert_movie_persons(&mut self, links: &[MoviePerson]) -> MigrateResult<u64> {
            self.step("movie_persons", links.len())
        }

        fn insert_movie_genres(&mut self, links: &[MovieGenre]) -> MigrateResult<u64> {
            self.step("movie_genres", links.len())
        }

        fn commit(self) -> MigrateResult<()> {
            self.store.calls.push("commit");
            Ok(())
        }
    }

    fn sample_batch() -> MigrationBatch {
        let movie = Movie::new("Heat").with_rating(8.3);
        let person = Person::new(PersonId::new(), "Michael Mann");
        let genre = Genre::new(GenreId::new(), "Crime");
        MigrationBatch {
            movie_persons: vec![MoviePerson::new(movie.id, person.id, Role::Director)],
            movie_genres: vec![MovieGenre::new(movie.id, genre.id)],
            movies: vec![movie],
            persons: vec![person],
            genres: vec![genre],
        }
    }

    #[test]
    fn test_load_order() {
        let mut store = RecordingStore::default();
        let report = load(&mut store, &sample_batch(), "Europe/Moscow").unwrap();

        assert_eq!(
            store.calls,
            vec![
                "begin",
                "time_zone",
                "movies",
                "persons",
                "genres",
                "movie_persons",
                "movie_genres",
                "commit"
            ]
        );
        assert_eq!(store.zone.as_deref(), Some("Europe/Moscow"));
        assert_eq!(report.total(), 5);
        assert_eq!(report.movie_persons, 1);
    }

    #[test]
    fn test_failure_skips_commit() {
        let mut store = RecordingStore {
            fail_on: Some("genres"),
            ..RecordingStore::default()
        };

        let err = load(&mut store, &sample_batch(), "UTC").unwrap_err();
        assert!(err.is_target());
        assert_eq!(store.calls.last(), Some(&"genres"));
        assert!(!store.calls.contains(&"commit"));
        assert!(!store.calls.contains(&"movie_persons"));
    }

    #[test]
    fn test_time_zone_failure_stops_before_inserts() {
        let mut store = RecordingStore {
            fail_on: Some("time_zone"),
            ..RecordingStore::default()
        };

        assert!(load(&mut store, &sample_batch(), "Mars/Olympus").is_err());
        assert_eq!(store.calls, vec!["begin", "time_zone"]);
    }

    #[test]
    fn test_report_display_names_tables() {
        let report = LoadReport {
            movies: 3,
            ..LoadReport::default()
        };
        assert!(report.to_string().starts_with("film_work 3, persons 0"));
    }
}
