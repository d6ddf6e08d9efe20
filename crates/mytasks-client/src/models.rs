//! Resources served by the MyTasks backend

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fields the typed models don't know about
pub type Extra = HashMap<String, serde_json::Value>;

/// A user as listed by `GET /`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A user with its groups
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub groups: Vec<GroupSummary>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Groups are private unless configured otherwise
    #[serde(default = "default_private")]
    pub private: bool,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A group with its checklists
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_private")]
    pub private: bool,
    /// Owning user
    #[serde(rename = "_parentid", default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub checklists: Vec<ChecklistSummary>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChecklistSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub uri: Option<String>,
}

/// A checklist with its items
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checklist {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Owning group
    #[serde(rename = "_parentid", default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub items: Vec<ItemRef>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Item reference inside a checklist
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemRef {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Owning checklist
    #[serde(rename = "_parentid", default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Body returned by the delete endpoints
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeleteReceipt {
    pub status: u16,
    pub message: String,
}

/// Payload for `POST /groups/`
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewGroup {
    pub name: String,
    pub private: bool,
}

impl NewGroup {
    /// A private group
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            private: true,
        }
    }

    pub fn public(mut self) -> Self {
        self.private = false;
        self
    }
}

/// Payload for `POST /checklists/`
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewChecklist {
    pub name: String,
    #[serde(rename = "_parentid")]
    pub parent_id: String,
}

impl NewChecklist {
    pub fn new(name: impl Into<String>, group_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent_id: group_id.into(),
        }
    }
}

/// Payload for `POST /items/`
///
/// The items endpoint reads the parent checklist from `parentid`, without
/// the leading underscore the other resources use.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewItem {
    pub name: String,
    #[serde(rename = "parentid")]
    pub parent_id: String,
}

impl NewItem {
    pub fn new(name: impl Into<String>, checklist_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent_id: checklist_id.into(),
        }
    }
}

fn default_private() -> bool {
    true
}
