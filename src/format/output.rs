//! Serializable report shapes.

use serde::Serialize;
use tickettree_lib::{FeatureLink, IssueRecord};

/// CSV header for the mismatched-parents report.
pub const PARENTS_CSV_HEADER: &str = "key,type,parent_link,epic_link,feature_link";

/// A record carrying more than one distinct parent reference.
///
/// These are the rows triage walks through to decide which link should
/// survive; resolution picks one by precedence but the tracker still holds
/// the conflicting values.
#[derive(Debug, Clone, Serialize)]
pub struct ParentMismatch {
    pub key: String,
    #[serde(rename = "type")]
    pub issue_type: Option<String>,
    pub parent_link: Option<String>,
    pub epic_link: Option<String>,
    pub feature_link: Option<String>,
}

impl ParentMismatch {
    /// Build a row when the record's reference fields disagree.
    #[must_use]
    pub fn from_record(record: &IssueRecord) -> Option<Self> {
        if record.parent_references().len() < 2 {
            return None;
        }
        Some(Self {
            key: record.key.clone(),
            issue_type: record.issue_type.as_ref().map(|t| t.as_str().to_string()),
            parent_link: record.parent_ref.clone(),
            epic_link: record.epic_ref.clone(),
            feature_link: record
                .feature_ref
                .as_ref()
                .and_then(FeatureLink::key)
                .map(ToString::to_string),
        })
    }

    /// One CSV row, empty cells for absent values.
    #[must_use]
    pub fn to_csv_row(&self) -> String {
        [
            self.key.as_str(),
            self.issue_type.as_deref().unwrap_or(""),
            self.parent_link.as_deref().unwrap_or(""),
            self.epic_link.as_deref().unwrap_or(""),
            self.feature_link.as_deref().unwrap_or(""),
        ]
        .join(",")
    }
}
