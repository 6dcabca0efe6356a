//! Board snapshot schema: swim lanes, their status columns, and raw cards.
//!
//! Card fields stay optional here; the extractor decides which ones are
//! mandatory and reports the lane/column/card that broke the contract.

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Default, Deserialize)]
/// Root of a board snapshot.
pub struct Board {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub lanes: Vec<SwimLane>,
}

#[derive(Debug, Clone, Default, Deserialize)]
/// One horizontal lane, owned by a single user (or `Unassigned`).
pub struct SwimLane {
    pub owner: String,
    #[serde(default)]
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Column {
    #[serde(default)]
    pub cards: Vec<RawCard>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Card text exactly as the board shows it.
pub struct RawCard {
    pub project_key: Option<String>,
    pub issue_number: Option<String>,
    pub description: Option<String>,
    /// Story-point text; may be blank or non-numeric.
    #[serde(default, deserialize_with = "size_text")]
    pub size: Option<String>,
}

/// Snapshots written by hand often carry sizes as bare numbers; keep them as text.
fn size_text<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Int(i64),
        Float(f64),
    }
    Ok(Option::<Scalar>::deserialize(de)?.map(|s| match s {
        Scalar::Text(t) => t,
        Scalar::Int(n) => n.to_string(),
        Scalar::Float(f) => f.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_size_accepts_text_and_numbers() {
        let json = r#"{"lanes":[{"owner":"Ana","columns":[{"cards":[
            {"projectKey":"DCP-","issueNumber":"1","description":"a","size":"3"},
            {"projectKey":"DCP-","issueNumber":"2","description":"b","size":5},
            {"projectKey":"DCP-","issueNumber":"3","description":"c"}
        ]}]}]}"#;
        let board: Board = serde_json::from_str(json).unwrap();
        let cards = &board.lanes[0].columns[0].cards;
        assert_eq!(cards[0].size.as_deref(), Some("3"));
        assert_eq!(cards[1].size.as_deref(), Some("5"));
        assert_eq!(cards[2].size, None);
    }

    #[test]
    fn test_yaml_snapshot_with_missing_fields() {
        let yaml = "lanes:\n  - owner: Unassigned\n    columns:\n      - cards:\n          - projectKey: TM-\n            size: 2\n      - {}\n";
        let board: Board = serde_yaml::from_str(yaml).unwrap();
        let lane = &board.lanes[0];
        assert_eq!(lane.columns.len(), 2);
        assert!(lane.columns[1].cards.is_empty());
        assert_eq!(lane.columns[0].cards[0].issue_number, None);
        assert_eq!(lane.columns[0].cards[0].size.as_deref(), Some("2"));
    }
}
