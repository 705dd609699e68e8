//! View and schedule record sets
//!
//! These are the JSON shapes a host adapter fills when it extracts view
//! contents or schedule tables. The core only groups, names and writes them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parameter value by host storage type
///
/// Element-id parameters are stored as their integer value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Integer(i64),
    Double(f64),
    Text(String),
}

/// 3D point in host internal units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Element placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElementLocation {
    Curve { start_point: Point3, end_point: Point3 },
    Point { x: f64, y: f64, z: f64 },
}

/// One element visible in a view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    pub id: i64,
    pub category: String,
    pub type_name: Option<String>,
    pub family_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,
    /// Parameters with a value; parameters without one are omitted
    #[serde(default)]
    pub parameters: BTreeMap<String, ParameterValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<ElementLocation>,
}

/// Elements of one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryElements {
    pub category: String,
    pub elements: Vec<ElementRecord>,
}

/// View metadata and its elements grouped by category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewRecord {
    pub id: i64,
    pub name: String,
    pub view_type: String,
    pub scale: i64,
    pub level: Option<String>,
    pub template: Option<i64>,
    pub detail_level: String,
    pub discipline: String,
    pub elements: Vec<CategoryElements>,
}

impl ViewRecord {
    /// Groups elements by category, categories in first-seen order
    pub fn group_by_category(elements: Vec<ElementRecord>) -> Vec<CategoryElements> {
        let mut groups: Vec<CategoryElements> = Vec::new();
        for element in elements {
            match groups.iter_mut().find(|g| g.category == element.category) {
                Some(group) => group.elements.push(element),
                None => groups.push(CategoryElements {
                    category: element.category.clone(),
                    elements: vec![element],
                }),
            }
        }
        groups
    }
}

/// Schedule column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleField {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
}

/// Schedule row, keyed by header name
pub type ScheduleRow = BTreeMap<String, String>;

/// Schedule table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    pub id: i64,
    pub name: String,
    pub category: Option<i64>,
    pub headers: Vec<ScheduleField>,
    pub rows: Vec<ScheduleRow>,
}
