//! Stable surrogate ids keyed by natural keys.

use indexmap::IndexMap;

use cinemigrate_core::model::{Genre, GenreId, Person, PersonId, SurrogateId};

/// Assigns one surrogate id per distinct key and remembers it for the
/// lifetime of the registry.
///
/// Keys are compared exactly; callers normalize (trim) before asking.
/// Iteration follows the order in which ids were first assigned.
#[derive(Debug, Clone)]
pub struct Registry<I> {
    ids: IndexMap<String, I>,
}

impl<I: SurrogateId> Registry<I> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            ids: IndexMap::new(),
        }
    }

    /// Return the id for `key`, allocating one on first sight.
    pub fn get_or_create(&mut self, key: &str) -> I {
        if let Some(id) = self.ids.get(key) {
            return *id;
        }
        let id = I::generate();
        self.ids.insert(key.to_owned(), id);
        id
    }

    /// The id previously assigned to `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<I> {
        self.ids.get(key).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Registered keys and ids in first-assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, I)> + '_ {
        self.ids.iter().map(|(key, id)| (key.as_str(), *id))
    }
}

impl<I: SurrogateId> Default for Registry<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// The two identity namespaces used during one migration run.
///
/// Persons are keyed by full name regardless of role, genres by trimmed
/// title. Constructed once per run and handed to the transformer.
#[derive(Debug, Clone, Default)]
pub struct IdentityRegistry {
    persons: Registry<PersonId>,
    genres: Registry<GenreId>,
}

impl IdentityRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn person(&mut self, full_name: &str) -> PersonId {
        self.persons.get_or_create(full_name)
    }

    pub fn genre(&mut self, title: &str) -> GenreId {
        self.genres.get_or_create(title)
    }

    /// Person ids assigned so far, keyed by full name.
    #[must_use]
    pub const fn persons(&self) -> &Registry<PersonId> {
        &self.persons
    }

    /// Genre ids assigned so far, keyed by title.
    #[must_use]
    pub const fn genres(&self) -> &Registry<GenreId> {
        &self.genres
    }

    /// Materialize one `Person` per registered name.
    #[must_use]
    pub fn to_persons(&self) -> Vec<Person> {
        self.persons
            .iter()
            .map(|(name, id)| Person::new(id, name))
            .collect()
    }

    /// Materialize one `Genre` per registered title.
    #[must_use]
    pub fn to_genres(&self) -> Vec<Genre> {
        self.genres
            .iter()
            .map(|(title, id)| Genre::new(id, title))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_same_key_same_id() {
        let mut registry = IdentityRegistry::new();
        let first = registry.person("Tom Hanks");
        let second = registry.person("Tom Hanks");
        assert_eq!(first, second);
        assert_eq!(registry.persons().len(), 1);
        assert_eq!(registry.to_persons().len(), 1);
    }

    #[test]
    fn test_distinct_keys_distinct_ids() {
        let mut registry: Registry<PersonId> = Registry::new();
        let names = ["Tom Hanks", "Meg Ryan", "tom hanks", "Tom Hanks ", "Nora Ephron"];
        let ids: HashSet<PersonId> = names.iter().map(|n| registry.get_or_create(n)).collect();
        assert_eq!(ids.len(), names.len());

        for name in names {
            assert_eq!(registry.get(name), Some(registry.get_or_create(name)));
        }
        assert_eq!(registry.len(), names.len());
    }

    #[test]
    fn test_namespaces_are_independent() {
        let mut registry = IdentityRegistry::new();
        let person = registry.person("Western");
        let genre = registry.genre("Western");
        assert_ne!(person.as_uuid(), genre.as_uuid());
        assert_eq!(registry.persons().len(), 1);
        assert_eq!(registry.genres().len(), 1);
    }

    #[test]
    fn test_materialization_keeps_insertion_order() {
        let mut registry = IdentityRegistry::new();
        for title in ["Western", "Action", "Drama", "Action"] {
            registry.genre(title);
        }

        let titles: Vec<String> = registry.to_genres().into_iter().map(|g| g.title).collect();
        assert_eq!(titles, vec!["Western", "Action", "Drama"]);

        let genres = registry.to_genres();
        assert_eq!(registry.genres().get("Action"), Some(genres[1].id));
    }

    #[test]
    fn test_unknown_key() {
        let registry = IdentityRegistry::new();
        assert!(registry.persons().get("Nobody").is_none());
        assert!(registry.genres().is_empty());
    }
}
