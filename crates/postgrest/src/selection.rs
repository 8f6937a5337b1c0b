//! Selection-grammar primitives.
//!
//! The backend consumes a nested-select grammar:
//!
//! ```text
//! select := column | embed ; select
//! embed  := [alias ":"] identifier ["!" fk] "(" select ")"
//! ```
//!
//! Model modules compose these helpers recursively; every embed carries its
//! own table prefix. Output is deterministic: identical inputs produce
//! byte-identical strings, which the golden tests in the model layer rely on.

/// Join `parts` into a column list, optionally wrapped in `table(...)`.
///
/// The table prefix is requested whenever the selection is embedded inside a
/// parent selection, and omitted at the query root where the table is named
/// by the request path instead.
pub fn select(table: &str, parts: &[&str], with_table_name: bool) -> String {
    let columns = parts.join(", ");
    if with_table_name {
        format!("{table}({columns})")
    } else {
        columns
    }
}

/// Embed through a named foreign key: `table!fk(...)`.
///
/// Required when the parent has more than one relationship to `table` and
/// the result should keep the table's own response key.
pub fn select_fk(table: &str, fk: &str, parts: &[&str]) -> String {
    format!("{table}!{fk}({})", parts.join(", "))
}

/// Aliased embed through a named foreign key: `alias:table!fk(...)`.
///
/// The response key becomes `alias`; used when two embeds of the same table
/// must coexist in one selection (e.g. a product and its duplicate-of).
pub fn select_aliased_fk(alias: &str, table: &str, fk: &str, parts: &[&str]) -> String {
    format!("{alias}:{table}!{fk}({})", parts.join(", "))
}

/// Aliased embed through a foreign-key column: `alias:column(...)`.
///
/// Used where the relationship is disambiguated by the referencing column
/// itself (friend sender/receiver, check-in location vs purchase location).
pub fn select_aliased(alias: &str, column: &str, parts: &[&str]) -> String {
    format!("{alias}:{column}({})", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_selection_omits_the_table_prefix() {
        assert_eq!(
            select("brands", &["id, name", "logos(file)"], false),
            "id, name, logos(file)"
        );
    }

    #[test]
    fn embedded_selection_carries_the_table_prefix() {
        assert_eq!(
            select("brands", &["id, name", "logos(file)"], true),
            "brands(id, name, logos(file))"
        );
    }

    #[test]
    fn foreign_key_embeds() {
        assert_eq!(
            select_fk("profiles", "products_created_by_fkey", &["id"]),
            "profiles!products_created_by_fkey(id)"
        );
        assert_eq!(
            select_aliased_fk("duplicate_of", "products", "fk_duplicate_product_id", &["id"]),
            "duplicate_of:products!fk_duplicate_product_id(id)"
        );
        assert_eq!(
            select_aliased("sender", "user_id_1", &["id, preferred_name"]),
            "sender:user_id_1(id, preferred_name)"
        );
    }

    #[test]
    fn output_is_deterministic() {
        let parts = ["id", "name", "sub_brands(id)"];
        assert_eq!(
            select("brands", &parts, true),
            select("brands", &parts, true)
        );
    }
}
