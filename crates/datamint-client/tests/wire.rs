use datamint_client::{TransportError, decode_generate, decode_health, decode_schemas};
use datamint_core::HealthStatus;
use serde_json::json;

#[test]
fn decodes_camel_case_envelope() {
    let body = json!({
        "success": true,
        "requestId": "req-42",
        "data": [{"id": 1}, {"id": 2}],
        "recordCount": 2,
        "metadata": {
            "generationPath": "traditional",
            "generationTimeMs": 120.5,
            "coherenceScore": 0.91,
            "scenarioCounts": {"happy_path": 2}
        }
    })
    .to_string();

    let result = decode_generate(&body).expect("decode");
    assert!(result.success);
    assert_eq!(result.request_id, "req-42");
    assert_eq!(result.record_count, 2);
    assert_eq!(result.data, json!([{"id": 1}, {"id": 2}]));
    assert_eq!(result.metadata.generation_path.as_deref(), Some("traditional"));
    assert_eq!(result.metadata.llm_tokens_used, None);
    assert_eq!(
        result.metadata.scenario_counts(),
        vec![("happy_path".to_string(), 2)]
    );
    assert!(result.error.is_none());
}

#[test]
fn decodes_snake_case_envelope_with_string_data() {
    let body = json!({
        "success": true,
        "request_id": "ui-1",
        "data": "[{\"sku\": \"A\"}]",
        "record_count": 1,
        "metadata": {"generation_path": "llm", "llm_tokens_used": 340}
    })
    .to_string();

    let result = decode_generate(&body).expect("decode");
    assert_eq!(result.request_id, "ui-1");
    assert_eq!(result.data, json!([{"sku": "A"}]));
    assert_eq!(result.metadata.llm_tokens_used, Some(340));
}

#[test]
fn missing_data_is_an_empty_list() {
    let result = decode_generate(r#"{"success": false, "error": "quota exceeded"}"#)
        .expect("decode");
    assert!(!result.success);
    assert_eq!(result.data, json!([]));
    assert_eq!(result.error.as_deref(), Some("quota exceeded"));
}

#[test]
fn data_keeps_source_key_order() {
    let result = decode_generate(r#"{"success": true, "data": "{\"z\": 1, \"a\": 2}"}"#)
        .expect("decode");
    let keys: Vec<&String> = result.data.as_object().expect("object").keys().collect();
    assert_eq!(keys, vec!["z", "a"]);
}

#[test]
fn malformed_envelope_is_reported() {
    let err = decode_generate("<html>oops</html>").expect_err("malformed");
    assert!(matches!(err, TransportError::Envelope(_)));
    assert!(err.to_string().starts_with("malformed backend response"));
}

#[test]
fn decodes_schema_catalog() {
    let body = json!({
        "schemas": [{
            "name": "cart",
            "description": "Shopping cart",
            "domain": "ecommerce",
            "fields": [
                {"name": "cart_id", "type": "string", "required": true, "description": "Cart id"},
                {"name": "items", "type": "array", "required": false}
            ]
        }]
    })
    .to_string();

    let schemas = decode_schemas(&body).expect("decode");
    assert_eq!(schemas.len(), 1);
    assert_eq!(schemas[0].name, "cart");
    assert_eq!(schemas[0].fields[0].field_type.as_deref(), Some("string"));
    assert!(schemas[0].fields[0].required);
    assert!(!schemas[0].fields[1].required);

    assert!(decode_schemas("{}").expect("empty catalog").is_empty());
}

#[test]
fn health_status_mapping() {
    let healthy = decode_health(r#"{"status": "healthy", "components": {"redis": "up"}}"#);
    assert_eq!(healthy.status, HealthStatus::Healthy);
    assert_eq!(healthy.components.get("redis").map(String::as_str), Some("up"));

    let degraded = decode_health(r#"{"status": "starting"}"#);
    assert_eq!(degraded.status, HealthStatus::Degraded);
    assert_eq!(degraded.service_status, "starting");
    assert!(degraded.components.is_empty());

    let garbled = decode_health("not json");
    assert_eq!(garbled.status, HealthStatus::Unhealthy);

    let proxy_page = decode_health("<html>502 Bad Gateway</html>");
    assert_eq!(proxy_page.status, HealthStatus::Unhealthy);
    assert_eq!(proxy_page.service_status, "unreachable");
    assert!(proxy_page.components.is_empty());
}
