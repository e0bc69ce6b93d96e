//! Join-key column configuration.
//!
//! Column names are matched literally across the source tables, so a rename
//! in one export would silently break joins if the names were hardcoded at
//! the call sites. Keeping them in one deserializable struct makes schema
//! drift a one-line configuration change instead.

use serde::{Deserialize, Serialize};

/// Join-key column names for every dataset relationship.
///
/// Defaults match the museum collection-management export. Two different
/// keys join children to the primary table: the numeric object id
/// (`object_media`, `user_fields`) and the textual object number
/// (`interventions`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoinSchema {
    /// Primary numeric id column on the objects table.
    pub object_id: String,
    /// Secondary textual key column on the objects table.
    pub object_number: String,
    /// Foreign key on object_media referencing `object_id`.
    pub media_object_id: String,
    /// Foreign key on interventions referencing `object_number`.
    pub intervention_object_number: String,
    /// Intervention's own id, referenced by its detail rows.
    pub condition_id: String,
    /// Detail row's own id, referenced by intervention media rows.
    pub line_item_id: String,
    /// Foreign key on user_fields referencing `object_id`.
    pub user_fields_id: String,
}

impl Default for JoinSchema {
    fn default() -> Self {
        Self {
            object_id: "ObjectID".to_string(),
            object_number: "ObjectNumber".to_string(),
            media_object_id: "ObjectID".to_string(),
            intervention_object_number: "ObjectNumber".to_string(),
            condition_id: "ConditionID".to_string(),
            line_item_id: "CondLineItemID".to_string(),
            user_fields_id: "ID".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_key() {
        let schema = JoinSchema::default();
        assert_eq!(schema.object_id, "ObjectID");
        assert_eq!(schema.intervention_object_number, "ObjectNumber");
        assert_eq!(schema.user_fields_id, "ID");
    }

    #[test]
    fn partial_config_fills_defaults() {
        let schema: JoinSchema =
            serde_json::from_str(r#"{"user_fields_id": "ObjectRef"}"#).expect("parse schema");
        assert_eq!(schema.user_fields_id, "ObjectRef");
        assert_eq!(schema.object_id, "ObjectID");
    }
}
