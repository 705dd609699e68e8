//! Integration tests for IFC record extraction and JSON documents

use ifcbatch::core::extract::{
    export_named_documents, extract, parse_schedule_text, read_json_document, type_from_choice,
    write_json_document, IfcExtraction, IfcProjection,
};
use ifcbatch::domain::{ScheduleField, ScheduleRecord};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use tempfile::TempDir;

const TOWER_IFC: &str = "ISO-10303-21;
HEADER;
FILE_NAME('Tower.ifc','2024-03-01T10:00:00',(''),(''),'','','');
ENDSEC;
DATA;
#1=IFCPROJECT('0YvctVUKr0kugbFTf53O9L',#2,'Tower',$,$,$,$,(#20),#7);
#30=IFCWALL('2O2Fr$t4X7Zf8NOew3FLOH',#2,'Basic Wall',$,$,#31,#32,'1F6A');
#31=IFCWALL('2O2Fr$t4X7Zf8NOew3FLOI',#2,'Basic Wall',$,$,#33,#34,'1F6B');
#40=IFCDOOR('1hOSvn6df7F8_7GcBWlR72',#2,'Single',$,$,#41,#42,'2A01',2100.,900.);
#50=IFCWINDOW;
ENDSEC;
END-ISO-10303-21;
";

#[test]
fn test_five_line_example() {
    let text = "#1=IFCWALL('a');\n#2=IFCWALL('b');\n#3=IFCDOOR('c');\nnot an entity\n#4=IFCBAD\n";
    let records = extract(text);

    assert_eq!(records.len(), 2);
    assert_eq!(records["IFCWALL"].len(), 2);
    assert_eq!(records["IFCWALL"][0].id, "1");
    assert_eq!(records["IFCWALL"][1].line, 2);
    assert_eq!(records["IFCDOOR"][0].raw_data, "#3=IFCDOOR('c');");
}

#[test]
fn test_read_file_counts_and_choices() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Tower.ifc");
    fs::write(&path, TOWER_IFC).unwrap();

    let extraction = IfcExtraction::read(&path).unwrap();

    assert_eq!(extraction.file_info.file_name, "Tower.ifc");
    assert_eq!(extraction.file_info.file_size, TOWER_IFC.len() as u64);
    assert_eq!(extraction.element_types["IFCWALL"], 2);
    assert_eq!(extraction.element_types["IFCPROJECT"], 1);
    assert!(!extraction.element_types.contains_key("IFCWINDOW"));
    assert_eq!(extraction.stats.records, 4);
    assert_eq!(extraction.stats.malformed, 1);

    let choices = extraction.type_choices();
    assert_eq!(
        choices,
        vec![
            "IFCDOOR  (1 elements)",
            "IFCPROJECT  (1 elements)",
            "IFCWALL  (2 elements)",
        ]
    );
    assert_eq!(type_from_choice(&choices[2]), "IFCWALL");
}

#[test]
fn test_full_document_json_shape() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Tower.ifc");
    fs::write(&path, TOWER_IFC).unwrap();

    let extraction = IfcExtraction::read(&path).unwrap();
    let out = write_json_document(&dir.path().join("json"), None, "Tower", &extraction).unwrap();
    assert_eq!(out, dir.path().join("json/Tower.json"));

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains("\n    \"file_info\""));

    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["element_types"]["IFCWALL"], 2);
    assert_eq!(value["elements_by_type"]["IFCDOOR"][0]["id"], "40");
    assert_eq!(value["elements_by_type"]["IFCDOOR"][0]["type"], "IFCDOOR");
    assert_eq!(value["elements_by_type"]["IFCDOOR"][0]["line"], 9);
    assert!(value.get("stats").is_none());
}

#[test]
fn test_projection_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Tower.ifc");
    fs::write(&path, TOWER_IFC).unwrap();

    let projection = IfcExtraction::read(&path)
        .unwrap()
        .project(&["IFCDOOR", "IFCSLAB"]);
    assert_eq!(projection.elements.len(), 1);

    let out = write_json_document(dir.path(), Some("Site"), "Tower", &projection).unwrap();
    assert_eq!(out, dir.path().join("Site_Tower.json"));

    let loaded: IfcProjection = read_json_document(&out).unwrap();
    assert_eq!(loaded, projection);
    assert_eq!(loaded.selected_types, vec!["IFCDOOR", "IFCSLAB"]);
}

#[test]
fn test_schedule_documents() {
    let headers = vec![
        ScheduleField {
            id: 1,
            name: "Number".to_string(),
            field_type: "Instance".to_string(),
        },
        ScheduleField {
            id: 2,
            name: "Name".to_string(),
            field_type: "Instance".to_string(),
        },
    ];
    let text = "Room Schedule\nNumber\tName\n101\tLobby\n\n102\t Office \textra\n";
    let rows = parse_schedule_text(&headers, text);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["Number"], "101");
    assert_eq!(rows[1]["Name"], "Office");
    assert_eq!(rows[1].len(), 2);

    let schedule = ScheduleRecord {
        id: 4012,
        name: "Room Schedule: Level 1".to_string(),
        category: Some(-2000160),
        headers,
        rows,
    };

    let dir = TempDir::new().unwrap();
    let results = export_named_documents("Tower", dir.path(), Some("Tower"), &[schedule]);
    assert_eq!(results.len(), 1);
    assert!(results[0].is_success());
    assert_eq!(
        results[0].path().unwrap(),
        dir.path().join("Tower_Room Schedule Level 1.json")
    );

    let loaded: BTreeMap<String, Value> = read_json_document(results[0].path().unwrap()).unwrap();
    assert_eq!(loaded["rows"][0]["Name"], "Lobby");
}
