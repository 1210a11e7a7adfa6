use std::collections::BTreeMap;
use std::fmt;

use crate::client::paths;

/// Stable identity of a cached read: the request path plus its parameters,
/// kept in sorted order so insertion order never matters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey {
    path: String,
    params: BTreeMap<String, String>,
}

impl QueryKey {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path with the query string appended, as it would be requested.
    #[must_use]
    pub fn request_path(&self) -> String {
        self.to_string()
    }

    #[must_use]
    pub fn current_user() -> Self {
        Self::new(paths::CURRENT_USER)
    }

    #[must_use]
    pub fn project_list() -> Self {
        Self::new(paths::USER_PROJECTS)
    }

    #[must_use]
    pub fn project(id: &str) -> Self {
        Self::new(paths::project(id))
    }

    #[must_use]
    pub fn project_members(id: &str) -> Self {
        Self::new(paths::project_members(id))
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        for (i, (name, value)) in self.params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(
                f,
                "{sep}{}={}",
                urlencoding::encode(name),
                urlencoding::encode(value)
            )?;
        }
        Ok(())
    }
}
