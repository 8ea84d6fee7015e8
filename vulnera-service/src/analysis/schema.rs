use serde_json::{Value, json};

/// Field names the provider response must carry
pub const RESULT_FIELDS: [&str; 7] = [
    "overallVulnerability",
    "score",
    "zone",
    "mainRisks",
    "priorityRisk",
    "summary",
    "invitation",
];

/// JSON schema describing the structured assessment the provider must
/// return. Constant regardless of request content.
pub fn response_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "overallVulnerability": {
                "type": "string",
                "description": "Évaluation globale de la vulnérabilité."
            },
            "score": {
                "type": "number",
                "description": "Score de vulnérabilité entre 0 et 100."
            },
            "zone": {
                "type": "string",
                "description": "Une seule valeur parmi: Green, Yellow, Red."
            },
            "mainRisks": {
                "type": "array",
                "items": { "type": "string" },
                "description": "Liste des 3 principaux risques détectés."
            },
            "priorityRisk": {
                "type": "string",
                "description": "Le risque prioritaire absolu."
            },
            "summary": {
                "type": "string",
                "description": "Résumé pédagogique et neutre incluant l'analyse de retraite."
            },
            "invitation": {
                "type": "string",
                "description": "Message de conclusion concernant le suivi."
            }
        },
        "required": RESULT_FIELDS,
        "additionalProperties": false
    })
}

/// Provider-level directive requiring the response body to be strict JSON
/// conforming to [`response_schema`]
pub fn response_format() -> Value {
    json!({
        "response_format": {
            "type": "json_schema",
            "json_schema": {
                "name": "assessment_result",
                "strict": true,
                "schema": response_schema()
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_requires_exactly_the_seven_result_fields() {
        let schema = response_schema();

        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(required, RESULT_FIELDS);

        let properties = schema["properties"].as_object().unwrap();
        assert_eq!(properties.len(), RESULT_FIELDS.len());
        for field in RESULT_FIELDS {
            assert!(properties.contains_key(field), "missing property: {field}");
        }
    }

    #[test]
    fn schema_types_score_and_risks() {
        let schema = response_schema();
        assert_eq!(schema["properties"]["score"]["type"], "number");
        assert_eq!(schema["properties"]["mainRisks"]["type"], "array");
        assert_eq!(schema["properties"]["mainRisks"]["items"]["type"], "string");
    }

    #[test]
    fn response_format_wraps_the_schema_as_strict_json() {
        let format = response_format();
        let json_schema = &format["response_format"]["json_schema"];
        assert_eq!(format["response_format"]["type"], "json_schema");
        assert_eq!(json_schema["strict"], true);
        assert_eq!(json_schema["schema"], response_schema());
    }
}
