//! Cross product of two tables
//!
//! Result schema is the left schema followed by the right schema. Result
//! rows are produced left-major, right-minor, each built by overlaying the
//! right row on the left row and inserted through the normal validated
//! path.
//!
//! Attribute names shared by both inputs are not renamed: the merged row
//! keeps the right-hand value, and the result schema lists the name twice.

use crate::store::{StoreResult, Table};

/// Builds `left × right` as a new, unregistered table.
///
/// # Errors
///
/// Propagates the validation error of the first merged row the result
/// schema rejects. That only happens when a shared attribute name carries
/// a right-hand value the left-hand type does not accept.
pub fn product(left: &Table, right: &Table, name: impl Into<String>) -> StoreResult<Table> {
    let schema = left.schema().concat(right.schema());
    let mut result = Table::new(name, schema);

    for left_row in left.rows() {
        for right_row in right.rows() {
            result.insert(left_row.merged(right_row))?;
        }
    }

    Ok(result)
}
