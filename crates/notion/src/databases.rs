use std::collections::HashMap;

/// Name of the database used when no other one is requested.
pub const MAIN_DATABASE: &str = "main";

#[derive(Debug, thiserror::Error)]
#[error("no \"{MAIN_DATABASE}\" database configured")]
pub struct MissingMainDatabase;

/// Ledger databases addressable by name.
#[derive(Clone, Debug)]
pub struct Databases {
    main: String,
    named: HashMap<String, String>,
}

impl Databases {
    /// Builds the table from `name -> database id` pairs. Entries with an
    /// empty id count as not configured.
    pub fn new(ids: HashMap<String, String>) -> Result<Self, MissingMainDatabase> {
        let mut named: HashMap<String, String> = ids
            .into_iter()
            .filter(|(_, id)| !id.trim().is_empty())
            .collect();
        let main = named.remove(MAIN_DATABASE).ok_or(MissingMainDatabase)?;

        Ok(Self { main, named })
    }

    /// Database id for `name`, or the main one when `name` is unknown.
    pub fn resolve(&self, name: &str) -> &str {
        if name == MAIN_DATABASE {
            return &self.main;
        }
        match self.named.get(name) {
            Some(id) => id,
            None => {
                tracing::debug!("unknown database \"{name}\", using {MAIN_DATABASE}");
                &self.main
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(name, id)| (name.to_string(), id.to_string()))
            .collect()
    }

    #[test]
    fn resolves_known_names() {
        let dbs = Databases::new(ids(&[("main", "db-main"), ("wei", "db-wei")])).unwrap();
        assert_eq!(dbs.resolve("main"), "db-main");
        assert_eq!(dbs.resolve("wei"), "db-wei");
    }

    #[test]
    fn unknown_or_empty_falls_back_to_main() {
        let dbs = Databases::new(ids(&[("main", "db-main"), ("wei", "")])).unwrap();
        assert_eq!(dbs.resolve("wei"), "db-main");
        assert_eq!(dbs.resolve("other"), "db-main");
    }

    #[test]
    fn main_is_required() {
        assert!(Databases::new(ids(&[("wei", "db-wei")])).is_err());
        assert!(Databases::new(ids(&[("main", " ")])).is_err());
    }
}
