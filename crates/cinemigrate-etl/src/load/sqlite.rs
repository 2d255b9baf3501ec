//! SQLite target, for local loads and tests.
//!
//! SQLite has no session time zone; timestamps are written as RFC 3339
//! text in UTC.

use chrono::Utc;
use rusqlite::{params, Connection, Transaction};
use std::fmt;
use std::path::Path;

use cinemigrate_core::model::{Genre, Movie, MovieGenre, MoviePerson, Person};
use cinemigrate_core::schema::{Table, SQLITE_SCHEMA};

use crate::error::{MigrateError, MigrateResult};
use crate::load::{TargetStore, TargetTransaction};

/// A SQLite database holding the catalog tables.
#[derive(Debug)]
pub struct SqliteTarget {
    conn: Connection,
}

impl SqliteTarget {
    /// Open (or create) a target database at the given path and make sure
    /// the catalog tables exist.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or the schema fails.
    pub fn open(path: impl AsRef<Path>) -> MigrateResult<Self> {
        let conn = Connection::open(path).map_err(|e| MigrateError::target("open", e))?;
        Self::with_connection(conn)
    }

    /// Open an in-memory target (for tests).
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_in_memory() -> MigrateResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| MigrateError::target("open", e))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> MigrateResult<Self> {
        conn.execute_batch(SQLITE_SCHEMA)
            .map_err(|e| MigrateError::target("create schema", e))?;
        Ok(Self { conn })
    }

    /// Get a reference to the underlying connection (for queries).
    #[must_use]
    pub const fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Row count of one catalog table.
    ///
    /// # Errors
    /// Returns an error if the count query fails.
    pub fn count(&self, table: Table) -> MigrateResult<u64> {
        let sql = format!("SELECT COUNT(*) FROM {}", table.name());
        let count: i64 = self
            .conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(|e| MigrateError::target("count", e))?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}

impl TargetStore for SqliteTarget {
    type Transaction<'a>
        = SqliteTransaction<'a>
    where
        Self: 'a;

    fn begin(&mut self) -> MigrateResult<SqliteTransaction<'_>> {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| MigrateError::target("begin", e))?;
        Ok(SqliteTransaction { tx })
    }
}

/// An open load transaction on [`SqliteTarget`].
///
/// Rolled back on drop unless committed.
pub struct SqliteTransaction<'a> {
    tx: Transaction<'a>,
}

impl fmt::Debug for SqliteTransaction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteTransaction").finish_non_exhaustive()
    }
}

impl SqliteTransaction<'_> {
    /// Insert `rows` into `table` through one prepared statement.
    fn insert_all<T, F>(&mut self, table: Table, rows: &[T], bind: F) -> MigrateResult<u64>
    where
        F: Fn(&mut rusqlite::Statement<'_>, &T, &str) -> rusqlite::Result<usize>,
    {
        let step = table.name();
        let placeholders = (1..=table.columns().len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({placeholders})",
            table.name(),
            table.column_list()
        );
        log::debug!("{sql}");

        let mut stmt = self
            .tx
            .prepare(&sql)
            .map_err(|e| MigrateError::target(step, e))?;
        let mut written = 0_u64;
        for row in rows {
            let now = Utc::now().to_rfc3339();
            written += bind(&mut stmt, row, &now).map_err(|e| MigrateError::target(step, e))? as u64;
        }

        log::info!("Inserted {written} rows into {table}");
        Ok(written)
    }
}

impl TargetTransaction for SqliteTransaction<'_> {
    fn set_time_zone(&mut self, zone: &str) -> MigrateResult<()> {
        log::debug!("SQLite target has no session time zone; {zone} not applied");
        Ok(())
    }

    fn insert_movies(&mut self, movies: &[Movie]) -> MigrateResult<u64> {
        self.insert_all(Table::FilmWork, movies, |stmt, movie, now| {
            stmt.execute(params![
                movie.id.to_string(),
                movie.title,
                movie.description,
                movie.rating,
                now,
                now,
            ])
        })
    }

    fn insert_persons(&mut self, persons: &[Person]) -> MigrateResult<u64> {
        self.insert_all(Table::Persons, persons, |stmt, person, now| {
            stmt.execute(params![person.id.to_string(), person.full_name, now, now])
        })
    }

    fn insert_genres(&mut self, genres: &[Genre]) -> MigrateResult<u64> {
        self.insert_all(Table::Genres, genres, |stmt, genre, now| {
            stmt.execute(params![genre.id.to_string(), genre.title, now, now])
        })
    }

    fn insert_movie_persons(&mut self, links: &[MoviePerson]) -> MigrateResult<u64> {
        self.insert_all(Table::FilmWorksPersons, links, |stmt, link, now| {
            stmt.execute(params![
                link.id.to_string(),
                link.movie_id.to_string(),
                link.person_id.to_string(),
                link.role.as_str(),
                now,
                now,
            ])
        })
    }

    fn insert_movie_genres(&mut self, links: &[MovieGenre]) -> MigrateResult<u64> {
        self.insert_all(Table::FilmWorksGenres, links, |stmt, link, now| {
            stmt.execute(params![
                link.id.to_string(),
                link.movie_id.to_string(),
                link.genre_id.to_string(),
                now,
                now,
            ])
        })
    }

    fn commit(self) -> MigrateResult<()> {
        self.tx
            .commit()
            .map_err(|e| MigrateError::target("commit", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::load;
    use cinemigrate_core::model::{GenreId, MigrationBatch, PersonId, Role};
    use cinemigrate_core::schema::LOAD_ORDER;

    fn batch() -> MigrationBatch {
        let movie = Movie::new("Amélie").with_rating(8.3);
        let audrey = Person::new(PersonId::new(), "Audrey Tautou");
        let comedy = Genre::new(GenreId::new(), "Comedy");
        MigrationBatch {
            movie_persons: vec![MoviePerson::new(movie.id, audrey.id, Role::Actor)],
            movie_genres: vec![MovieGenre::new(movie.id, comedy.id)],
            movies: vec![movie],
            persons: vec![audrey],
            genres: vec![comedy],
        }
    }

    #[test]
    fn test_load_into_sqlite() {
        let mut target = SqliteTarget::open_in_memory().unwrap();
        let batch = batch();
        let report = load(&mut target, &batch, "UTC").unwrap();

        assert_eq!(report.total(), 5);
        for table in LOAD_ORDER {
            assert_eq!(target.count(table).unwrap(), 1, "{table}");
        }

        let (title, rating): (String, f64) = target
            .conn()
            .query_row(
                "SELECT title, rating FROM film_work WHERE id = ?1",
                [batch.movies[0].id.to_string()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(title, "Amélie");
        assert!((rating - 8.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_created_equals_modified() {
        let mut target = SqliteTarget::open_in_memory().unwrap();
        load(&mut target, &batch(), "UTC").unwrap();

        let (created, modified): (String, String) = target
            .conn()
            .query_row("SELECT created, modified FROM persons", [], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .unwrap();
        assert_eq!(created, modified);
        assert!(chrono::DateTime::parse_from_rfc3339(&created).is_ok());
    }

    #[test]
    fn test_dangling_link_rolls_back() {
        let mut target = SqliteTarget::open_in_memory().unwrap();
        let mut batch = batch();
        batch
            .movie_genres
            .push(MovieGenre::new(batch.movies[0].id, GenreId::new()));

        let err = load(&mut target, &batch, "UTC").unwrap_err();
        assert!(err.is_target());
        for table in LOAD_ORDER {
            assert_eq!(target.count(table).unwrap(), 0, "{table}");
        }
    }

    #[test]
    fn test_file_backed_target_persists() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("catalog.sqlite");
        {
            let mut target = SqliteTarget::open(&path).unwrap();
            load(&mut target, &batch(), "UTC").unwrap();
        }

        let reopened = SqliteTarget::open(&path).unwrap();
        assert_eq!(reopened.count(Table::FilmWork).unwrap(), 1);
    }
}
