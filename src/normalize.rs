//! Codepoint resolution and the triple merge.
//!
//! Merges the raw triple stream into one record per distinct character, in
//! first-seen order. Values stay raw strings here; decoding belongs to the
//! expansion stage so the tabular output path can keep the originals.

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::decode::{DecodeError, FieldValue};
use crate::loader::{LoadError, RawTriple};
use crate::Error;

/// Resolves codepoint notation (`U+4E00` or bare hex) to its character.
pub fn ucn_to_char(notation: &str) -> Result<char, DecodeError> {
    let bad = || DecodeError::BadCodepoint {
        notation: notation.to_string(),
    };
    let hex = notation.strip_prefix("U+").unwrap_or(notation);
    if hex.is_empty() || hex.len() > 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(bad());
    }
    let scalar = u32::from_str_radix(hex, 16).map_err(|_| bad())?;
    char::from_u32(scalar).ok_or_else(bad)
}

/// Encodes a character back to canonical `U+XXXX` notation (uppercase,
/// zero-padded to at least four digits).
pub fn char_to_ucn(c: char) -> String {
    format!("U+{:04X}", c as u32)
}

/// One merged record per distinct character.
///
/// `fields` maps every requested field to `None` (absent on this character)
/// or `Some` value: raw after the merge, decoded after expansion. The two
/// index fields live outside the map and always serialize first.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterRecord {
    /// Original codepoint notation, preserved verbatim for round-tripping.
    pub ucn: String,
    /// The decoded character.
    pub character: char,
    /// Requested fields in manifest order.
    pub fields: IndexMap<String, Option<FieldValue>>,
}

impl CharacterRecord {
    fn new(ucn: &str, character: char, fields: &[String]) -> Self {
        CharacterRecord {
            ucn: ucn.to_string(),
            character,
            fields: fields.iter().map(|f| (f.clone(), None)).collect(),
        }
    }

    /// Raw or decoded value of `field`, if present on this character.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field).and_then(|v| v.as_ref())
    }
}

impl Serialize for CharacterRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 2))?;
        map.serialize_entry("ucn", &self.ucn)?;
        map.serialize_entry("char", &self.character)?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Merges a triple stream into records, one per distinct character, in
/// first-seen order.
///
/// Every record starts with all requested `fields` absent; each triple sets
/// its field to the raw value. A field repeated for the same character keeps
/// the last-seen value, matching the published loader this reproduces.
pub fn normalize<I>(triples: I, fields: &[String]) -> Result<Vec<CharacterRecord>, Error>
where
    I: IntoIterator<Item = Result<RawTriple, LoadError>>,
{
    let mut records: IndexMap<char, CharacterRecord> = IndexMap::new();
    for triple in triples {
        let triple = triple?;
        let character = ucn_to_char(&triple.ucn)?;
        let record = records
            .entry(character)
            .or_insert_with(|| CharacterRecord::new(&triple.ucn, character, fields));
        if triple.field == "ucn" || triple.field == "char" {
            continue;
        }
        record
            .fields
            .insert(triple.field, Some(FieldValue::Scalar(triple.value)));
    }
    Ok(records.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple(ucn: &str, field: &str, value: &str) -> Result<RawTriple, LoadError> {
        Ok(RawTriple {
            ucn: ucn.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        })
    }

    #[test]
    fn test_ucn_round_trip() {
        let c = ucn_to_char("U+4E00").unwrap();
        assert_eq!(c, '一');
        assert_eq!(char_to_ucn(c), "U+4E00");
    }

    #[test]
    fn test_ucn_supplementary_plane() {
        let c = ucn_to_char("U+20000").unwrap();
        assert_eq!(c as u32, 0x20000);
        assert_eq!(char_to_ucn(c), "U+20000");
    }

    #[test]
    fn test_ucn_bare_hex() {
        assert_eq!(ucn_to_char("3400").unwrap(), '㐀');
    }

    #[test]
    fn test_ucn_rejects_junk() {
        assert!(ucn_to_char("U+").is_err());
        assert!(ucn_to_char("U+XYZ").is_err());
        assert!(ucn_to_char("U+1234567").is_err());
        assert!(ucn_to_char("U+D800").is_err()); // surrogate, not a scalar value
    }

    #[test]
    fn test_merge_determinism() {
        let fields = vec![
            "kCantonese".to_string(),
            "kDefinition".to_string(),
            "kMandarin".to_string(),
        ];
        let records = normalize(
            vec![
                triple("U+3400", "kCantonese", "jau1"),
                triple("U+3400", "kDefinition", "(same as U+4E18 丘) hillock or mound"),
                triple("U+3400", "kMandarin", "qiū"),
            ],
            &fields,
        )
        .unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.ucn, "U+3400");
        assert_eq!(record.character, '㐀');
        assert_eq!(
            record.get("kCantonese"),
            Some(&FieldValue::Scalar("jau1".to_string()))
        );
        assert_eq!(
            record.get("kMandarin"),
            Some(&FieldValue::Scalar("qiū".to_string()))
        );
    }

    #[test]
    fn test_first_seen_order() {
        let fields = vec!["kCantonese".to_string()];
        let records = normalize(
            vec![
                triple("U+3401", "kCantonese", "tim2"),
                triple("U+3400", "kCantonese", "jau1"),
                triple("U+3401", "kCantonese", "tim2"),
            ],
            &fields,
        )
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].ucn, "U+3401");
        assert_eq!(records[1].ucn, "U+3400");
    }

    #[test]
    fn test_repeated_field_last_wins() {
        let fields = vec!["kMandarin".to_string()];
        let records = normalize(
            vec![
                triple("U+3400", "kMandarin", "first"),
                triple("U+3400", "kMandarin", "second"),
            ],
            &fields,
        )
        .unwrap();

        assert_eq!(
            records[0].get("kMandarin"),
            Some(&FieldValue::Scalar("second".to_string()))
        );
    }

    #[test]
    fn test_absent_fields_initialized() {
        let fields = vec!["kCantonese".to_string(), "kMandarin".to_string()];
        let records = normalize(vec![triple("U+3400", "kCantonese", "jau1")], &fields).unwrap();

        let record = &records[0];
        assert_eq!(record.fields.len(), 2);
        assert!(record.fields["kMandarin"].is_none());
        assert_eq!(record.get("kMandarin"), None);
    }

    #[test]
    fn test_serialize_index_fields_first() {
        let fields = vec!["kCantonese".to_string()];
        let records = normalize(vec![triple("U+3400", "kCantonese", "jau1")], &fields).unwrap();
        let json = serde_json::to_string(&records[0]).unwrap();
        assert!(json.starts_with(r#"{"ucn":"U+3400","char":"㐀""#));
    }
}
