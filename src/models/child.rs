//! Child Model
//!
//! A child enrolled in the transport service. Children are loaded once with
//! the dataset and never change while the process runs.

use serde::{Deserialize, Serialize};

/// Child riding one of the school routes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
    /// Stable identifier used by every other record
    pub id: String,

    /// Full legal name
    pub name: String,

    /// Short name shown in headers, when the family set one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// School the child attends
    pub school: String,

    /// Grade label as the school reports it
    pub grade: String,

    /// Profile picture location
    pub image_url: String,
}

impl Child {
    /// Name to show in compact views
    pub fn short_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}
