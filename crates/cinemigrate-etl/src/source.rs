//! Read-only access to the legacy movie store.
//!
//! The legacy database keeps everything about a movie in one wide row:
//! genres and directors as comma-joined strings, actors through a join
//! table, and scriptwriters either as a single id in `writer` or as a
//! JSON list in `writers`. [`SourceStore::fetch_movies`] flattens that
//! into one [`RawMovie`] per movie.

use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags, Row};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{MigrateError, MigrateResult};

const MOVIES_SQL: &str = "
WITH x AS (
    -- ids and names come from the same joined rows, so the two
    -- concatenated lists stay aligned
    SELECT m.id,
           group_concat(a.id)   AS actors_ids,
           group_concat(a.name) AS actors_names
    FROM movies m
             LEFT JOIN movie_actors ma ON m.id = ma.movie_id
             LEFT JOIN actors a ON ma.actor_id = a.id
    GROUP BY m.id
)
SELECT m.id,
       m.genre,
       m.director,
       m.title,
       m.plot AS description,
       m.imdb_rating,
       x.actors_ids,
       x.actors_names,
       m.writer,
       m.writers
FROM movies m
         LEFT JOIN x ON m.id = x.id
";

const WRITERS_SQL: &str = "SELECT DISTINCT id, name FROM writers";

/// A scriptwriter reference inside a movie's writer list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriterRef {
    /// Source id of the scriptwriter, resolved through the writers table.
    #[serde(deserialize_with = "id_as_text")]
    pub id: String,
}

impl WriterRef {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// One legacy movie row, before normalization.
///
/// Values are kept as the source wrote them; the transformer owns the
/// `N/A` handling and type coercions. NULL columns arrive as empty
/// strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMovie {
    /// Movie id in the legacy store.
    pub source_id: String,

    /// Comma-separated genre titles, possibly padded with spaces.
    pub genre: String,

    /// Comma-separated director names, `N/A` when unknown.
    pub director: String,

    pub title: String,

    /// Plot summary, `N/A` when unknown.
    pub description: String,

    /// IMDb rating as source text; may be `N/A` or otherwise non-numeric.
    pub rating: String,

    /// Comma-separated actor source ids, parallel to `actor_names`.
    pub actor_ids: String,

    /// Comma-separated actor names; an `N/A` entry means no actor.
    pub actor_names: String,

    /// Scriptwriter references, already normalized to list form.
    pub writers: Vec<WriterRef>,
}

/// A read-only connection to the legacy SQLite store.
#[derive(Debug)]
pub struct SourceStore {
    conn: Connection,
}

impl SourceStore {
    /// Open the legacy database at `path` without write access.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> MigrateResult<Self> {
        let path = path.as_ref();
        log::info!("Opening source store {}", path.display());
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { conn })
    }

    /// Wrap an already open connection (for tests).
    #[must_use]
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Get a reference to the underlying connection.
    #[must_use]
    pub const fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Fetch every movie with its actors and normalized writer list.
    ///
    /// # Errors
    /// Fails if the query fails or a movie's writers column is not a
    /// JSON list of writer objects.
    pub fn fetch_movies(&self) -> MigrateResult<Vec<RawMovie>> {
        let mut stmt = self.conn.prepare(MOVIES_SQL)?;
        let mut rows = stmt.query([])?;

        let mut movies = Vec::new();
        while let Some(row) = rows.next()? {
            movies.push(row_to_raw_movie(row)?);
        }

        log::info!("Fetched {} movies from source", movies.len());
        Ok(movies)
    }

    /// Fetch all scriptwriters as a map from source id to display name.
    ///
    /// Writers without a name are left out.
    ///
    /// # Errors
    /// Fails if the query fails.
    pub fn fetch_writers(&self) -> MigrateResult<HashMap<String, String>> {
        let mut stmt = self.conn.prepare(WRITERS_SQL)?;
        let writers = stmt
            .query_map([], |row| {
                let id = text_column(row, 0)?;
                let name: Option<String> = row.get(1)?;
                Ok((id, name))
            })?
            .filter_map(|entry| match entry {
                Ok((id, Some(name))) => Some(Ok((id, name))),
                Ok((_, None)) => None,
                Err(e) => Some(Err(e)),
            })
            .collect::<rusqlite::Result<HashMap<_, _>>>()?;

        log::info!("Fetched {} writers from source", writers.len());
        Ok(writers)
    }
}

fn row_to_raw_movie(row: &Row<'_>) -> MigrateResult<RawMovie> {
    let source_id = text_column(row, 0)?;
    let writer = text_column(row, 8)?;
    let writers_json = text_column(row, 9)?;

    let writers = normalize_writers(&writer, &writers_json).map_err(|source| {
        MigrateError::MalformedWriters {
            movie_id: source_id.clone(),
            source,
        }
    })?;

    Ok(RawMovie {
        genre: text_column(row, 1)?,
        director: text_column(row, 2)?,
        title: text_column(row, 3)?,
        description: text_column(row, 4)?,
        rating: text_column(row, 5)?,
        actor_ids: text_column(row, 6)?,
        actor_names: text_column(row, 7)?,
        writers,
        source_id,
    })
}

/// Bring the two scriptwriter encodings to one list form.
///
/// A movie with a single scriptwriter stores its id in `writer` and
/// leaves `writers` empty; that becomes a one-element list. Otherwise
/// `writers` holds a JSON list of objects with an `id` field. Both
/// empty means no writers.
///
/// # Errors
/// Returns the JSON error when `writers` is needed but malformed.
pub fn normalize_writers(writer: &str, writers: &str) -> serde_json::Result<Vec<WriterRef>> {
    if !writer.is_empty() {
        return Ok(vec![WriterRef::new(writer)]);
    }
    if writers.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(writers)
}

/// Read a column of any storage class as text; NULL becomes empty.
fn text_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    Ok(match row.get::<_, Value>(idx)? {
        Value::Null => String::new(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s,
        Value::Blob(b) => String::from_utf8_lossy(&b).into_owned(),
    })
}

fn id_as_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}
