//! Filter Stage
//!
//! Set-membership filter over the loaded record set: a record survives only
//! if its diet group, sex and age group are all present in the query's
//! selections. Empty selections mean "match nothing", not "match all".

use crate::data::Record;
use crate::pipeline::Query;

/// Return the records matching all three of the query's selection sets,
/// in input order. Records with an unmapped diet group match no selection.
pub fn filter_records<'a>(records: &'a [Record], query: &Query) -> Vec<&'a Record> {
    records
        .iter()
        .filter(|r| {
            r.diet_group.is_some_and(|g| query.diets.contains(&g))
                && query.sexes.iter().any(|s| *s == r.sex)
                && query.age_groups.iter().any(|a| *a == r.age_group)
        })
        .collect()
}
