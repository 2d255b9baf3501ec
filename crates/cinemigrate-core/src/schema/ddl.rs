/// PostgreSQL DDL for the target catalog. `{schema}` is replaced with the
/// (already quoted) schema name.
const POSTGRES_TEMPLATE: &str = r"
CREATE SCHEMA IF NOT EXISTS {schema};

-- Film works
CREATE TABLE IF NOT EXISTS {schema}.film_work (
    id UUID PRIMARY KEY,
    title VARCHAR(255) NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    creation_date DATE,
    certificate TEXT,
    file_path TEXT,
    rating DOUBLE PRECISION,
    type TEXT,
    created TIMESTAMPTZ NOT NULL,
    modified TIMESTAMPTZ NOT NULL
);

CREATE INDEX IF NOT EXISTS film_work_title_idx ON {schema}.film_work (title);

-- Persons
CREATE TABLE IF NOT EXISTS {schema}.persons (
    id UUID PRIMARY KEY,
    full_name VARCHAR(255) NOT NULL,
    birth_date DATE,
    created TIMESTAMPTZ NOT NULL,
    modified TIMESTAMPTZ NOT NULL
);

CREATE INDEX IF NOT EXISTS persons_full_name_idx ON {schema}.persons (full_name);

-- Genres
CREATE TABLE IF NOT EXISTS {schema}.genres (
    id UUID PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT,
    created TIMESTAMPTZ NOT NULL,
    modified TIMESTAMPTZ NOT NULL
);

-- Film work <-> person, per role
CREATE TABLE IF NOT EXISTS {schema}.film_works_persons (
    id UUID PRIMARY KEY,
    film_work_id UUID NOT NULL REFERENCES {schema}.film_work (id) ON DELETE CASCADE,
    person_id UUID NOT NULL REFERENCES {schema}.persons (id) ON DELETE CASCADE,
    role TEXT NOT NULL CHECK (role IN ('actor', 'director', 'writer')),
    created TIMESTAMPTZ NOT NULL,
    modified TIMESTAMPTZ NOT NULL,
    CONSTRAINT unique_film_work_person_role UNIQUE (film_work_id, person_id, role)
);

-- Film work <-> genre
CREATE TABLE IF NOT EXISTS {schema}.film_works_genres (
    id UUID PRIMARY KEY,
    film_work_id UUID NOT NULL REFERENCES {schema}.film_work (id) ON DELETE CASCADE,
    genre_id UUID NOT NULL REFERENCES {schema}.genres (id) ON DELETE CASCADE,
    created TIMESTAMPTZ NOT NULL,
    modified TIMESTAMPTZ NOT NULL,
    CONSTRAINT unique_film_work_genre UNIQUE (film_work_id, genre_id)
);
";

/// SQLite rendition of the target catalog, used for local loads and tests.
///
/// Link tables carry no uniqueness constraints, so a movie that lists the
/// same genre or director twice loads with both links.
pub const SQLITE_SCHEMA: &str = r"
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS film_work (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    rating REAL,
    created TEXT NOT NULL,
    modified TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS persons (
    id TEXT PRIMARY KEY,
    full_name TEXT NOT NULL,
    created TEXT NOT NULL,
    modified TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS genres (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    created TEXT NOT NULL,
    modified TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS film_works_persons (
    id TEXT PRIMARY KEY,
    film_work_id TEXT NOT NULL REFERENCES film_work(id) ON DELETE CASCADE,
    person_id TEXT NOT NULL REFERENCES persons(id) ON DELETE CASCADE,
    role TEXT NOT NULL CHECK (role IN ('actor', 'director', 'writer')),
    created TEXT NOT NULL,
    modified TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS film_works_genres (
    id TEXT PRIMARY KEY,
    film_work_id TEXT NOT NULL REFERENCES film_work(id) ON DELETE CASCADE,
    genre_id TEXT NOT NULL REFERENCES genres(id) ON DELETE CASCADE,
    created TEXT NOT NULL,
    modified TEXT NOT NULL
);
";

/// Quote a PostgreSQL identifier, doubling embedded quotes.
#[must_use]
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// PostgreSQL DDL for the target catalog inside `schema`.
#[must_use]
pub fn postgres_schema(schema: &str) -> String {
    POSTGRES_TEMPLATE.replace("{schema}", &quote_ident(schema))
}
