//! PostgreSQL target: binary `COPY` into the catalog schema.

use chrono::Utc;
use postgres::binary_copy::BinaryCopyInWriter;
use postgres::types::Type;
use postgres::{Client, NoTls, Transaction};
use std::fmt;

use cinemigrate_core::model::{Genre, Movie, MovieGenre, MoviePerson, Person};
use cinemigrate_core::schema::{postgres_schema, quote_ident, Table};

use crate::error::{MigrateError, MigrateResult};
use crate::load::{TargetStore, TargetTransaction};

/// A connection to the target PostgreSQL database.
///
/// The connection is closed when the target is dropped.
pub struct PostgresTarget {
    client: Client,
    schema: String,
}

impl fmt::Debug for PostgresTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresTarget")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl PostgresTarget {
    /// Connect to the target database; tables live in `schema`.
    ///
    /// # Errors
    /// Returns an error if the connection cannot be established.
    pub fn connect(config: &postgres::Config, schema: impl Into<String>) -> MigrateResult<Self> {
        log::info!(
            "Connecting to target {:?}/{}",
            config.get_hosts(),
            config.get_dbname().unwrap_or_default()
        );
        let client = config
            .connect(NoTls)
            .map_err(|e| MigrateError::target("connect", e))?;
        Ok(Self::from_client(client, schema))
    }

    /// Wrap an already connected client.
    #[must_use]
    pub fn from_client(client: Client, schema: impl Into<String>) -> Self {
        Self {
            client,
            schema: schema.into(),
        }
    }

    /// Get the underlying client (for queries outside a load).
    pub fn client(&mut self) -> &mut Client {
        &mut self.client
    }

    /// Schema the catalog tables live in.
    #[must_use]
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Create the catalog schema and tables if they do not exist.
    ///
    /// # Errors
    /// Returns an error if any DDL statement fails.
    pub fn create_schema(&mut self) -> MigrateResult<()> {
        log::info!("Creating catalog tables in schema {}", self.schema);
        self.client
            .batch_execute(&postgres_schema(&self.schema))
            .map_err(|e| MigrateError::target("create schema", e))
    }
}

impl TargetStore for PostgresTarget {
    type Transaction<'a>
        = PostgresTransaction<'a>
    where
        Self: 'a;

    fn begin(&mut self) -> MigrateResult<PostgresTransaction<'_>> {
        let tx = self
            .client
            .transaction()
            .map_err(|e| MigrateError::target("begin", e))?;
        Ok(PostgresTransaction {
            tx,
            schema: &self.schema,
        })
    }
}

/// An open load transaction on [`PostgresTarget`].
///
/// Rolled back on drop unless committed.
pub struct PostgresTransaction<'a> {
    tx: Transaction<'a>,
    schema: &'a str,
}

impl fmt::Debug for PostgresTransaction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresTransaction")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl PostgresTransaction<'_> {
    /// Stream `rows` into `table` with one binary `COPY`.
    fn copy_in<T, F>(&mut self, table: Table, types: &[Type], rows: &[T], write_row: F) -> MigrateResult<u64>
    where
        F: Fn(&mut BinaryCopyInWriter<'_>, &T) -> Result<(), postgres::Error>,
    {
        let step = table.name();
        let sql = format!(
            "COPY {}.{} ({}) FROM STDIN BINARY",
            quote_ident(self.schema),
            table.name(),
            table.column_list()
        );
        log::debug!("{sql}");

        let sink = self
            .tx
            .copy_in(sql.as_str())
            .map_err(|e| MigrateError::target(step, e))?;
        let mut writer = BinaryCopyInWriter::new(sink, types);
        for row in rows {
            write_row(&mut writer, row).map_err(|e| MigrateError::target(step, e))?;
        }
        let written = writer
            .finish()
            .map_err(|e| MigrateError::target(step, e))?;

        log::info!("Copied {written} rows into {table}");
        Ok(written)
    }
}

impl TargetTransaction for PostgresTransaction<'_> {
    fn set_time_zone(&mut self, zone: &str) -> MigrateResult<()> {
        log::debug!("Setting session time zone to {zone}");
        self.tx
            .execute("SELECT set_config('TimeZone', $1, false)", &[&zone])
            .map_err(|e| MigrateError::target("set time zone", e))?;
        Ok(())
    }

    fn insert_movies(&mut self, movies: &[Movie]) -> MigrateResult<u64> {
        let types = [
            Type::UUID,
            Type::VARCHAR,
            Type::TEXT,
            Type::FLOAT8,
            Type::TIMESTAMPTZ,
            Type::TIMESTAMPTZ,
        ];
        self.copy_in(Table::FilmWork, &types, movies, |writer, movie| {
            let now = Utc::now();
            writer.write(&[
                movie.id.as_uuid(),
                &movie.title,
                &movie.description,
                &movie.rating,
                &now,
                &now,
            ])
        })
    }

    fn insert_persons(&mut self, persons: &[Person]) -> MigrateResult<u64> {
        let types = [Type::UUID, Type::VARCHAR, Type::TIMESTAMPTZ, Type::TIMESTAMPTZ];
        self.copy_in(Table::Persons, &types, persons, |writer, person| {
            let now = Utc::now();
            writer.write(&[person.id.as_uuid(), &person.full_name, &now, &now])
        })
    }

    fn insert_genres(&mut self, genres: &[Genre]) -> MigrateResult<u64> {
        let types = [Type::UUID, Type::TEXT, Type::TIMESTAMPTZ, Type::TIMESTAMPTZ];
        self.copy_in(Table::Genres, &types, genres, |writer, genre| {
            let now = Utc::now();
            writer.write(&[genre.id.as_uuid(), &genre.title, &now, &now])
        })
    }

    fn insert_movie_persons(&mut self, links: &[MoviePerson]) -> MigrateResult<u64> {
        let types = [
            Type::UUID,
            Type::UUID,
            Type::UUID,
            Type::TEXT,
            Type::TIMESTAMPTZ,
            Type::TIMESTAMPTZ,
        ];
        self.copy_in(Table::FilmWorksPersons, &types, links, |writer, link| {
            let now = Utc::now();
            let role = link.role.as_str();
            writer.write(&[
                link.id.as_uuid(),
                link.movie_id.as_uuid(),
                link.person_id.as_uuid(),
                &role,
                &now,
                &now,
            ])
        })
    }

    fn insert_movie_genres(&mut self, links: &[MovieGenre]) -> MigrateResult<u64> {
        let types = [
            Type::UUID,
            Type::UUID,
            Type::UUID,
            Type::TIMESTAMPTZ,
            Type::TIMESTAMPTZ,
        ];
        self.copy_in(Table::FilmWorksGenres, &types, links, |writer, link| {
            let now = Utc::now();
            writer.write(&[
                link.id.as_uuid(),
                link.movie_id.as_uuid(),
                link.genre_id.as_uuid(),
                &now,
                &now,
            ])
        })
    }

    fn commit(self) -> MigrateResult<()> {
        self.tx
            .commit()
            .map_err(|e| MigrateError::target("commit", e))
    }
}
