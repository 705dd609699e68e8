//! Records scraped from IFC interchange text

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One entity definition line of an IFC STEP file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IfcRecord {
    /// Entity id, without the leading `#`
    pub id: String,

    /// Entity type, e.g. `IFCWALL`
    #[serde(rename = "type")]
    pub entity_type: String,

    /// 1-based line number in the source file
    pub line: usize,

    /// Source line text, trimmed
    pub raw_data: String,
}

/// Records grouped by entity type; each list is in file order
pub type RecordSet = BTreeMap<String, Vec<IfcRecord>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serializes_with_type_key() {
        let record = IfcRecord {
            id: "12".to_string(),
            entity_type: "IFCWALL".to_string(),
            line: 7,
            raw_data: "#12=IFCWALL('x');".to_string(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["type"], "IFCWALL");
        assert_eq!(value["line"], 7);
        assert!(value.get("entity_type").is_none());
    }
}
