pub mod batch;
pub mod genre;
pub mod ids;
pub mod links;
pub mod movie;
pub mod person;

pub use batch::{BatchSummary, MigrationBatch};
pub use genre::Genre;
pub use ids::{GenreId, MovieGenreId, MovieId, MoviePersonId, PersonId, SurrogateId};
pub use links::{MovieGenre, MoviePerson};
pub use movie::Movie;
pub use person::{Person, Role};
