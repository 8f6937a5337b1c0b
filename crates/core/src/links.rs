//! Deep-link paths.
//!
//! The app publishes `/{checkins|products|profiles|companies|brands|
//! locations}/{id}` URLs. This module is the boundary contract with the UI
//! router: it parses incoming paths and emits the canonical form.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::types::DbId;

/// A parsed deep-link target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigatablePath {
    CheckIn(DbId),
    Product(DbId),
    Profile(Uuid),
    Company(DbId),
    Brand(DbId),
    Location(Uuid),
}

impl NavigatablePath {
    /// Path segment for the entity family.
    fn segment(&self) -> &'static str {
        match self {
            NavigatablePath::CheckIn(_) => "checkins",
            NavigatablePath::Product(_) => "products",
            NavigatablePath::Profile(_) => "profiles",
            NavigatablePath::Company(_) => "companies",
            NavigatablePath::Brand(_) => "brands",
            NavigatablePath::Location(_) => "locations",
        }
    }
}

impl fmt::Display for NavigatablePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigatablePath::CheckIn(id)
            | NavigatablePath::Product(id)
            | NavigatablePath::Company(id)
            | NavigatablePath::Brand(id) => write!(f, "/{}/{id}", self.segment()),
            NavigatablePath::Profile(id) | NavigatablePath::Location(id) => {
                write!(f, "/{}/{id}", self.segment())
            }
        }
    }
}

/// Error produced for paths that do not name a navigatable entity.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("not a deep link: {0}")]
pub struct InvalidPath(pub String);

impl FromStr for NavigatablePath {
    type Err = InvalidPath;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let mut segments = path.trim_start_matches('/').splitn(2, '/');
        let family = segments.next().unwrap_or_default();
        let id = segments.next().ok_or_else(|| InvalidPath(path.into()))?;

        let int_id = || id.parse::<DbId>().map_err(|_| InvalidPath(path.into()));
        let uuid_id = || Uuid::parse_str(id).map_err(|_| InvalidPath(path.into()));

        match family {
            "checkins" => Ok(NavigatablePath::CheckIn(int_id()?)),
            "products" => Ok(NavigatablePath::Product(int_id()?)),
            "profiles" => Ok(NavigatablePath::Profile(uuid_id()?)),
            "companies" => Ok(NavigatablePath::Company(int_id()?)),
            "brands" => Ok(NavigatablePath::Brand(int_id()?)),
            "locations" => Ok(NavigatablePath::Location(uuid_id()?)),
            _ => Err(InvalidPath(path.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integer_keyed_families() {
        assert_eq!(
            "/checkins/42".parse::<NavigatablePath>().unwrap(),
            NavigatablePath::CheckIn(42)
        );
        assert_eq!(
            "/products/7".parse::<NavigatablePath>().unwrap(),
            NavigatablePath::Product(7)
        );
        assert_eq!(
            "/brands/3".parse::<NavigatablePath>().unwrap(),
            NavigatablePath::Brand(3)
        );
    }

    #[test]
    fn parses_uuid_keyed_families() {
        let id = Uuid::parse_str("b4f9e1d0-1111-2222-3333-444455556666").unwrap();
        assert_eq!(
            format!("/profiles/{id}").parse::<NavigatablePath>().unwrap(),
            NavigatablePath::Profile(id)
        );
        assert_eq!(
            format!("/locations/{id}").parse::<NavigatablePath>().unwrap(),
            NavigatablePath::Location(id)
        );
    }

    #[test]
    fn round_trips_through_display() {
        for path in ["/checkins/1", "/products/42", "/companies/9"] {
            let parsed: NavigatablePath = path.parse().unwrap();
            assert_eq!(parsed.to_string(), path);
        }
    }

    #[test]
    fn rejects_unknown_and_malformed_paths() {
        assert!("/flavors/1".parse::<NavigatablePath>().is_err());
        assert!("/products/abc".parse::<NavigatablePath>().is_err());
        assert!("/profiles/42".parse::<NavigatablePath>().is_err());
        assert!("/products".parse::<NavigatablePath>().is_err());
    }
}
