//! The global flavor vocabulary.

use serde::{Deserialize, Serialize};
use tastelog_core::types::DbId;
use tastelog_postgrest::selection::select;

pub const TABLE: &str = "flavors";

const SAVED_COLUMNS: &str = "id, name";

pub fn query(with_table_name: bool) -> String {
    select(TABLE, &[SAVED_COLUMNS], with_table_name)
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Flavor {
    pub id: DbId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewFlavor {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_golden() {
        assert_eq!(query(true), "flavors(id, name)");
        assert_eq!(query(false), "id, name");
    }
}
