//! Legacy store fixtures shared by the integration tests.

#![allow(dead_code)]

use cinemigrate_etl::SourceStore;
use rusqlite::{params, Connection};

/// Shape of the legacy movie database.
const LEGACY_SCHEMA: &str = "
CREATE TABLE movies (
    id TEXT PRIMARY KEY,
    genre TEXT,
    director TEXT,
    writer TEXT,
    title TEXT,
    plot TEXT,
    ratings TEXT,
    imdb_rating TEXT,
    writers TEXT
);
CREATE TABLE actors (id INTEGER PRIMARY KEY, name TEXT);
CREATE TABLE movie_actors (movie_id TEXT, actor_id INTEGER);
CREATE TABLE writers (id TEXT PRIMARY KEY, name TEXT);
";

/// A legacy movie row to insert.
pub struct LegacyMovie<'a> {
    pub id: &'a str,
    pub genre: &'a str,
    pub director: &'a str,
    pub writer: &'a str,
    pub title: &'a str,
    pub plot: &'a str,
    pub imdb_rating: &'a str,
    pub writers: &'a str,
    pub actors: &'a [i64],
}

impl Default for LegacyMovie<'_> {
    fn default() -> Self {
        Self {
            id: "",
            genre: "Drama",
            director: "N/A",
            writer: "",
            title: "",
            plot: "N/A",
            imdb_rating: "N/A",
            writers: "",
            actors: &[],
        }
    }
}

/// In-memory legacy database builder.
pub struct LegacyDb {
    conn: Connection,
}

impl LegacyDb {
    pub fn new() -> Self {
        let conn = Connection::open_in_memory().expect("open legacy db");
        conn.execute_batch(LEGACY_SCHEMA).expect("legacy schema");
        Self { conn }
    }

    pub fn actor(self, id: i64, name: &str) -> Self {
        self.conn
            .execute("INSERT INTO actors (id, name) VALUES (?1, ?2)", params![id, name])
            .expect("insert actor");
        self
    }

    pub fn writer(self, id: &str, name: &str) -> Self {
        self.conn
            .execute("INSERT INTO writers (id, name) VALUES (?1, ?2)", params![id, name])
            .expect("insert writer");
        self
    }

    pub fn movie(self, movie: &LegacyMovie<'_>) -> Self {
        self.conn
            .execute(
                "INSERT INTO movies (id, genre, director, writer, title, plot, ratings, imdb_rating, writers)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, '', ?7, ?8)",
                params![
                    movie.id,
                    movie.genre,
                    movie.director,
                    movie.writer,
                    movie.title,
                    movie.plot,
                    movie.imdb_rating,
                    movie.writers
                ],
            )
            .expect("insert movie");
        for actor in movie.actors {
            self.conn
                .execute(
                    "INSERT INTO movie_actors (movie_id, actor_id) VALUES (?1, ?2)",
                    params![movie.id, actor],
                )
                .expect("insert movie actor");
        }
        self
    }

    pub fn into_source(self) -> SourceStore {
        SourceStore::from_connection(self.conn)
    }
}

/// Three movies; "Actor X" plays in two of them.
pub fn three_movies() -> SourceStore {
    LegacyDb::new()
        .actor(1, "Actor X")
        .actor(2, "Actor Y")
        .writer("w1", "Writer One")
        .writer("w2", "Writer Two")
        .writer("w3", "N/A")
        .movie(&LegacyMovie {
            id: "tt001",
            genre: "Action, Adventure",
            director: "Director A",
            writer: "w1",
            title: "First",
            plot: "The first plot",
            imdb_rating: "7.9",
            actors: &[1, 2],
            ..LegacyMovie::default()
        })
        .movie(&LegacyMovie {
            id: "tt002",
            genre: " Action, Drama ",
            director: "N/A",
            title: "Second",
            writers: r#"[{"id": "w1"}, {"id": "w2"}, {"id": "w3"}, {"id": "w1"}]"#,
            actors: &[1],
            ..LegacyMovie::default()
        })
        .movie(&LegacyMovie {
            id: "tt003",
            genre: "Drama",
            director: "Director A, Director B",
            title: "Third",
            plot: "N/A",
            imdb_rating: "N/A",
            ..LegacyMovie::default()
        })
        .into_source()
}
