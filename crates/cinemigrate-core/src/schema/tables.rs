use std::fmt;

/// A target table written by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    FilmWork,
    Persons,
    Genres,
    FilmWorksPersons,
    FilmWorksGenres,
}

/// Insert order. Link tables reference movies, persons and genres, and
/// the target enforces referential integrity on every statement.
pub const LOAD_ORDER: [Table; 5] = [
    Table::FilmWork,
    Table::Persons,
    Table::Genres,
    Table::FilmWorksPersons,
    Table::FilmWorksGenres,
];

impl Table {
    /// Unqualified table name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FilmWork => "film_work",
            Self::Persons => "persons",
            Self::Genres => "genres",
            Self::FilmWorksPersons => "film_works_persons",
            Self::FilmWorksGenres => "film_works_genres",
        }
    }

    /// Columns the loader fills, in bind order.
    #[must_use]
    pub const fn columns(self) -> &'static [&'static str] {
        match self {
            Self::FilmWork => &["id", "title", "description", "rating", "created", "modified"],
            Self::Persons => &["id", "full_name", "created", "modified"],
            Self::Genres => &["id", "title", "created", "modified"],
            Self::FilmWorksPersons => &[
                "id",
                "film_work_id",
                "person_id",
                "role",
                "created",
                "modified",
            ],
            Self::FilmWorksGenres => &["id", "film_work_id", "genre_id", "created", "modified"],
        }
    }

    /// Comma-separated column list for SQL statements.
    #[must_use]
    pub fn column_list(self) -> String {
        self.columns().join(", ")
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
