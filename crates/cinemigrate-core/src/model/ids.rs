use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A randomly generated identifier assigned by the pipeline, independent
/// of any identifier the legacy store uses.
pub trait SurrogateId: Copy + Eq + fmt::Debug {
    /// Allocate a fresh, random id.
    fn generate() -> Self;

    /// The underlying 128-bit value.
    fn as_uuid(&self) -> &Uuid;
}

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl SurrogateId for $name {
            fn generate() -> Self {
                Self::new()
            }

            fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<Uuid> for $name {
            fn as_ref(&self) -> &Uuid {
                &self.0
            }
        }
    };
}

define_id!(MovieId, "Unique identifier for a film work.");
define_id!(PersonId, "Unique identifier for a person, keyed by full name.");
define_id!(GenreId, "Unique identifier for a genre, keyed by title.");
define_id!(
    MoviePersonId,
    "Unique identifier for a movie/person/role link."
);
define_id!(MovieGenreId, "Unique identifier for a movie/genre link.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_id_generation() {
        let id1 = MovieId::new();
        let id2 = MovieId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_person_id_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = PersonId::from_uuid(uuid);
        assert_eq!(*id.as_uuid(), uuid);
    }

    #[test]
    fn test_genre_id_display_is_hyphenated_uuid() {
        let uuid = Uuid::new_v4();
        let id = GenreId::from_uuid(uuid);
        assert_eq!(id.to_string(), uuid.hyphenated().to_string());
    }

    #[test]
    fn test_generate_goes_through_trait() {
        fn fresh<I: SurrogateId>() -> I {
            I::generate()
        }

        let a: MoviePersonId = fresh();
        let b: MoviePersonId = fresh();
        assert_ne!(a, b);
        assert_ne!(SurrogateId::as_uuid(&a), SurrogateId::as_uuid(&b));
    }
}
