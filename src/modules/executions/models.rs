use mongodb::bson::{oid::ObjectId, Bson, DateTime};
use serde::{Deserialize, Serialize};

/// One run of a prompt against an AI model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Execution {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Prompt this execution ran; not enforced by the store
    pub prompt_id: ObjectId,
    pub input: Bson,
    pub output: Bson,
    pub ia_model: String,
    pub latency_ms: i64,
    pub cost: f64,
    pub timestamp: DateTime,
}

impl Execution {
    pub const COLLECTION: &'static str = "executions";
    pub const PROMPT_ID: &'static str = "prompt_id";
    pub const TIMESTAMP: &'static str = "timestamp";
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn indexed_fields_match_serialized_names() {
        let prompt_id = ObjectId::new();
        let execution = Execution {
            id: None,
            prompt_id,
            input: Bson::Document(doc! { "text": "hello" }),
            output: Bson::String("olá".to_string()),
            ia_model: "gpt-4o".to_string(),
            latency_ms: 420,
            cost: 0.0021,
            timestamp: DateTime::from_millis(1_700_000_000_000),
        };

        let document = mongodb::bson::to_document(&execution).unwrap();
        assert_eq!(
            document.get_object_id(Execution::PROMPT_ID).unwrap(),
            prompt_id
        );
        assert_eq!(
            document.get_datetime(Execution::TIMESTAMP).unwrap(),
            &DateTime::from_millis(1_700_000_000_000)
        );
    }
}
