//! Grouped result types
//!
//! A group is one named bucket of record references. Buckets appear in
//! first-seen order and preserve the relative order of their members.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::path::PathResolver;

/// One named bucket produced by `group_by`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group<'a> {
    /// String form of the group key
    pub name: String,
    /// Member records, in filtered/sorted order
    pub items: Vec<&'a Value>,
}

impl<'a> Group<'a> {
    /// Returns the number of records in the group
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the group holds no records
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns an iterator over the group's records
    pub fn iter(&self) -> impl Iterator<Item = &&'a Value> {
        self.items.iter()
    }
}

/// Partitions records by the string form of the value at `path`,
/// preserving first-seen group order and within-group input order.
pub(crate) fn partition<'a>(records: Vec<&'a Value>, path: &str) -> Vec<Group<'a>> {
    let mut groups: Vec<Group<'a>> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for record in records {
        let name = group_key(PathResolver::resolve(record, path));
        match positions.get(&name) {
            Some(&index) => groups[index].items.push(record),
            None => {
                positions.insert(name.clone(), groups.len());
                groups.push(Group {
                    name,
                    items: vec![record],
                });
            }
        }
    }
    groups
}

/// String form of a group key: strings as-is, other values by their JSON
/// text, absent paths under the literal key "undefined".
fn group_key(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partition_first_seen_order() {
        let records = vec![
            json!({ "cat": "a", "i": 0 }),
            json!({ "cat": "b", "i": 1 }),
            json!({ "cat": "a", "i": 2 }),
        ];
        let refs: Vec<&Value> = records.iter().collect();
        let groups = partition(refs, "cat");

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "a");
        assert_eq!(groups[0].items, vec![&records[0], &records[2]]);
        assert_eq!(groups[1].name, "b");
        assert_eq!(groups[1].items, vec![&records[1]]);
    }

    #[test]
    fn test_group_key_forms() {
        assert_eq!(group_key(None), "undefined");
        assert_eq!(group_key(Some(&json!("text"))), "text");
        assert_eq!(group_key(Some(&json!(42))), "42");
        assert_eq!(group_key(Some(&json!(true))), "true");
        assert_eq!(group_key(Some(&json!(null))), "null");
        assert_eq!(group_key(Some(&json!([1, 2]))), "[1,2]");
    }

    #[test]
    fn test_absent_key_buckets_together() {
        let records = vec![json!({ "cat": "a" }), json!({}), json!({ "other": 1 })];
        let refs: Vec<&Value> = records.iter().collect();
        let groups = partition(refs, "cat");

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].name, "undefined");
        assert_eq!(groups[1].len(), 2);
    }
}
