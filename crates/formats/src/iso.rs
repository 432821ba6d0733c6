use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::FormatError;

/// ISO 3166-1 alpha-2 → numeric code table. Keys are stored upper-case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IsoTable {
    codes: BTreeMap<String, u32>,
}

impl IsoTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `{ "GB": 826, "au": "036", ... }`; values may be numbers or
    /// numeric strings.
    pub fn from_json_str(payload: &str) -> Result<Self, FormatError> {
        let value: Value = serde_json::from_str(payload).map_err(FormatError::Json)?;
        let obj = value
            .as_object()
            .ok_or_else(|| FormatError::InvalidIsoTable("expected an object".to_string()))?;

        let mut table = Self::new();
        for (alpha2, v) in obj {
            let numeric = match v {
                Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            }
            .ok_or_else(|| FormatError::InvalidIsoTable(format!("bad code for {alpha2}: {v}")))?;
            table.insert(alpha2, numeric);
        }
        Ok(table)
    }

    pub fn insert(&mut self, alpha2: &str, numeric: u32) {
        self.codes.insert(alpha2.trim().to_ascii_uppercase(), numeric);
    }

    /// Case-insensitive lookup.
    pub fn numeric(&self, alpha2: &str) -> Option<u32> {
        let key = alpha2.trim();
        if key.is_empty() {
            return None;
        }
        self.codes.get(&key.to_ascii_uppercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, u32)> for IsoTable {
    fn from_iter<T: IntoIterator<Item = (&'a str, u32)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (alpha2, numeric) in iter {
            table.insert(alpha2, numeric);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::IsoTable;
    use crate::error::FormatError;

    #[test]
    fn parses_numbers_and_strings_case_insensitively() {
        let table = IsoTable::from_json_str(r#"{ "GB": 826, "au": "036" }"#).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.numeric("gb"), Some(826));
        assert_eq!(table.numeric("AU"), Some(36));
        assert_eq!(table.numeric(" Au "), Some(36));
        assert_eq!(table.numeric("FR"), None);
        assert_eq!(table.numeric(""), None);
    }

    #[test]
    fn rejects_malformed_tables() {
        assert!(matches!(
            IsoTable::from_json_str("[1, 2]"),
            Err(FormatError::InvalidIsoTable(_))
        ));
        assert!(matches!(
            IsoTable::from_json_str(r#"{ "GB": "uk" }"#),
            Err(FormatError::InvalidIsoTable(msg)) if msg.contains("GB")
        ));
    }

    #[test]
    fn collects_from_pairs() {
        let table: IsoTable = [("de", 276), ("FR", 250)].into_iter().collect();
        assert_eq!(table.numeric("DE"), Some(276));
        assert_eq!(table.numeric("fr"), Some(250));
    }
}
