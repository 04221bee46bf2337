use serde_json::json;

/// Response schema for the clarifying-questions phase.
pub fn question_set_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "questions": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "questionText": { "type": "string" },
                        "options": {
                            "type": "array",
                            "items": { "type": "string" }
                        },
                        "allowMultiple": { "type": "boolean" }
                    },
                    "required": ["questionText", "options", "allowMultiple"]
                }
            }
        },
        "required": ["questions"]
    })
}

/// Response schema for the final analysis phase.
pub fn analysis_report_schema() -> serde_json::Value {
    let string_list = json!({
        "type": "array",
        "items": { "type": "string" }
    });

    json!({
        "type": "object",
        "properties": {
            "visualFeatures": string_list,
            "tcmPatterns": string_list,
            "holisticAnalysis": { "type": "string" },
            "dietarySuggestions": string_list,
            "lifestyleSuggestions": string_list,
            "importantNote": { "type": "string" }
        },
        "required": [
            "visualFeatures", "tcmPatterns", "holisticAnalysis",
            "dietarySuggestions", "lifestyleSuggestions", "importantNote"
        ]
    })
}
