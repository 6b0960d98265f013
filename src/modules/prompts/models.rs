use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A prompt template bound to the AI model it targets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prompt {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub template: String,
    /// Identifier of the AI model the prompt is routed to
    pub ia_model: String,
    #[serde(default)]
    pub variables: Vec<String>,
}

impl Prompt {
    pub const COLLECTION: &'static str = "prompts";
    pub const IA_MODEL: &'static str = "ia_model";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexed_field_matches_serialized_name() {
        let prompt = Prompt {
            id: None,
            name: "summary".to_string(),
            template: "Summarize {text}".to_string(),
            ia_model: "gemini-1.5-flash".to_string(),
            variables: vec!["text".to_string()],
        };

        let document = mongodb::bson::to_document(&prompt).unwrap();
        assert_eq!(
            document.get_str(Prompt::IA_MODEL).unwrap(),
            "gemini-1.5-flash"
        );
        assert!(!document.contains_key("_id"));
    }

    #[test]
    fn variables_default_to_empty() {
        let document = mongodb::bson::doc! {
            "_id": ObjectId::new(),
            "name": "plain",
            "template": "Hello",
            "ia_model": "gpt-4o",
        };

        let prompt: Prompt = mongodb::bson::from_document(document).unwrap();
        assert!(prompt.variables.is_empty());
        assert!(prompt.id.is_some());
    }
}
