//! Record pruning and output field ordering.

use crate::normalize::CharacterRecord;

/// The two fields identifying a record, always present and always first in
/// any tabular ordering.
pub const INDEX_FIELDS: [&str; 2] = ["ucn", "char"];

/// Removes every absent or empty field from each record.
///
/// Retained fields keep their relative order. The index fields live outside
/// the field map and are unaffected.
pub fn prune(records: &mut [CharacterRecord]) {
    for record in records {
        record
            .fields
            .retain(|_, value| value.as_ref().is_some_and(|v| !v.is_empty()));
    }
}

/// Column ordering for tabular output: index fields first, then `fields`
/// in their given order, duplicates dropped.
pub fn field_order<'a>(fields: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut order: Vec<String> = INDEX_FIELDS.iter().map(|f| f.to_string()).collect();
    for field in fields {
        if !order.iter().any(|f| f == field) {
            order.push(field.to_string());
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::FieldValue;
    use crate::loader::RawTriple;
    use crate::normalize::normalize;

    fn sample_record() -> CharacterRecord {
        let fields = vec!["kCantonese".to_string(), "kMandarin".to_string()];
        let triples = vec![Ok(RawTriple {
            ucn: "U+3400".to_string(),
            field: "kCantonese".to_string(),
            value: "jau1".to_string(),
        })];
        normalize(triples, &fields).unwrap().remove(0)
    }

    #[test]
    fn test_prune_drops_absent_fields() {
        let mut records = vec![sample_record()];
        prune(&mut records);

        assert_eq!(records[0].fields.len(), 1);
        assert!(records[0].fields.contains_key("kCantonese"));
    }

    #[test]
    fn test_prune_drops_empty_values() {
        let mut record = sample_record();
        record
            .fields
            .insert("kMandarin".to_string(), Some(FieldValue::List(vec![])));
        let mut records = vec![record];
        prune(&mut records);

        assert!(!records[0].fields.contains_key("kMandarin"));
    }

    #[test]
    fn test_prune_keeps_index_fields() {
        let mut records = vec![sample_record()];
        prune(&mut records);

        assert_eq!(records[0].ucn, "U+3400");
        assert_eq!(records[0].character, '㐀');
    }

    #[test]
    fn test_field_order_index_first() {
        let order = field_order(["kMandarin", "ucn", "kCantonese"]);
        assert_eq!(
            order,
            vec![
                "ucn".to_string(),
                "char".to_string(),
                "kMandarin".to_string(),
                "kCantonese".to_string(),
            ]
        );
    }
}
