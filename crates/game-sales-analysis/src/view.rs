//! Row subsets and group-by aggregations over a [`Table`].
//!
//! Groups come out in the order their key is first encountered; rows whose
//! key is missing belong to no group.

use std::hash::Hash;

use indexmap::IndexMap;

use crate::{
    columns,
    table::{SchemaError, Table},
};

/// Release years after this one make up the recent view.
pub const RECENT_AFTER_YEAR: i64 = 2013;

/// Rows released after [`RECENT_AFTER_YEAR`]. Rows without a year are left out.
pub fn recent(table: &Table) -> Result<Table, SchemaError> {
    let mask = table
        .ints(columns::YEAR_OF_RELEASE)?
        .iter()
        .map(|year| year.is_some_and(|year| year > RECENT_AFTER_YEAR))
        .collect::<Vec<_>>();
    Ok(table.filter(&mask))
}

/// Sum of `values` per key, missing values counted as zero.
pub fn group_sum<K>(keys: &[Option<K>], values: &[Option<f64>]) -> IndexMap<K, f64>
where
    K: Hash + Eq + Clone,
{
    let mut groups = IndexMap::new();
    for (key, value) in keys.iter().zip(values) {
        if let Some(key) = key {
            *groups.entry(key.clone()).or_insert(0.0) += value.unwrap_or(0.0);
        }
    }
    groups
}

/// Number of rows per key where `present` holds.
pub fn group_count<K, I>(keys: &[Option<K>], present: I) -> IndexMap<K, usize>
where
    K: Hash + Eq + Clone,
    I: IntoIterator<Item = bool>,
{
    let mut groups = IndexMap::new();
    for (key, present) in keys.iter().zip(present) {
        if let (Some(key), true) = (key, present) {
            *groups.entry(key.clone()).or_insert(0) += 1;
        }
    }
    groups
}

/// Present values per key.
pub fn group_values<K>(keys: &[Option<K>], values: &[Option<f64>]) -> IndexMap<K, Vec<f64>>
where
    K: Hash + Eq + Clone,
{
    let mut groups = IndexMap::<K, Vec<f64>>::new();
    for (key, value) in keys.iter().zip(values) {
        if let (Some(key), Some(value)) = (key, value) {
            groups.entry(key.clone()).or_default().push(*value);
        }
    }
    groups
}
