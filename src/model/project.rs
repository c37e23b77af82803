use std::fmt;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ProjectId(pub usize);

#[derive(Clone, Debug)]
pub struct ProjectEntry {
    pub key: String,
    pub name: String,
    /// Must be positive, checked before matching starts.
    pub capacity: i64,
    pub aliases: Vec<String>,
}

impl ProjectEntry {
    pub fn new<K: Into<String>>(key: K, capacity: i64) -> ProjectEntry {
        let key = key.into();
        ProjectEntry {
            name: key.clone(),
            key,
            capacity,
            aliases: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_alias<A: Into<String>>(mut self, alias: A) -> ProjectEntry {
        self.aliases.push(alias.into());
        self
    }
}

#[derive(Clone, Debug)]
pub struct Project {
    pub id: ProjectId,
    pub key: String,
    pub name: String,
    pub capacity: u32,
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() || self.name == self.key {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{} ({})", self.name, self.key)
        }
    }
}
