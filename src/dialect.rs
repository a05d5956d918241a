//! Database dialects known to the nullable column types.
//!
//! The dialect drives both value binding and DDL type resolution. Matching is
//! exhaustive, so adding a dialect forces every binding and column-type decision
//! to be revisited at compile time.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Database dialect a value is being bound or a column is being generated for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum Dialect {
    /// SQLite: text-based binding, `BIGINT UNSIGNED` columns
    Sqlite,
    /// MySQL: text-based binding, `BIGINT UNSIGNED` columns
    Mysql,
    /// PostgreSQL: native numeric binding, `numeric` columns
    #[default]
    Postgres,
    /// Any other dialect. Bindings are skipped and the ORM picks the column type.
    Unsupported(String),
}

impl Dialect {
    /// Resolve a dialect from its driver name.
    ///
    /// Names are matched case-insensitively; `postgresql` and `sqlite3` are accepted
    /// as aliases. Unknown names map to [`Dialect::Unsupported`] and keep the
    /// original spelling.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "sqlite" | "sqlite3" => Dialect::Sqlite,
            "mysql" => Dialect::Mysql,
            "postgres" | "postgresql" => Dialect::Postgres,
            _ => Dialect::Unsupported(name.to_string()),
        }
    }

    /// Canonical driver name
    pub fn name(&self) -> &str {
        match self {
            Dialect::Sqlite => "sqlite",
            Dialect::Mysql => "mysql",
            Dialect::Postgres => "postgres",
            Dialect::Unsupported(name) => name,
        }
    }
}

impl From<String> for Dialect {
    fn from(name: String) -> Self {
        Dialect::from_name(&name)
    }
}

impl From<&str> for Dialect {
    fn from(name: &str) -> Self {
        Dialect::from_name(name)
    }
}

impl FromStr for Dialect {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Dialect::from_name(s))
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
