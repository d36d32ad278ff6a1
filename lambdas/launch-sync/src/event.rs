use serde_json::Value;

/// Whether this invocation should skip writes.
///
/// Checked in order: a boolean `dry_run` (console/SDK invocation), a string
/// `dry_run`, then `queryStringParameters.dry_run` (API Gateway). Anything
/// else, including an EventBridge schedule payload, is a real run.
pub fn parse_dry_run(event: &Value) -> bool {
    match event.get("dry_run") {
        Some(Value::Bool(flag)) => return *flag,
        Some(Value::String(flag)) => return truthy(flag),
        _ => {}
    }

    event
        .get("queryStringParameters")
        .and_then(|params| params.get("dry_run"))
        .and_then(Value::as_str)
        .is_some_and(truthy)
}

fn truthy(flag: &str) -> bool {
    matches!(flag.to_lowercase().as_str(), "true" | "1" | "yes")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn boolean_field() {
        assert!(parse_dry_run(&json!({"dry_run": true})));
        assert!(!parse_dry_run(&json!({"dry_run": false})));
    }

    #[test]
    fn string_field() {
        assert!(parse_dry_run(&json!({"dry_run": "TRUE"})));
        assert!(parse_dry_run(&json!({"dry_run": "1"})));
        assert!(parse_dry_run(&json!({"dry_run": "yes"})));
        assert!(!parse_dry_run(&json!({"dry_run": "nope"})));
    }

    #[test]
    fn query_string_parameter() {
        assert!(parse_dry_run(&json!({"queryStringParameters": {"dry_run": "true"}})));
        assert!(!parse_dry_run(&json!({"queryStringParameters": {"dry_run": "0"}})));
        assert!(!parse_dry_run(&json!({"queryStringParameters": null})));
    }

    #[test]
    fn body_field_takes_precedence_over_query() {
        let event = json!({
            "dry_run": false,
            "queryStringParameters": {"dry_run": "true"}
        });
        assert!(!parse_dry_run(&event));
    }

    #[test]
    fn unparseable_field_falls_through_to_query() {
        let event = json!({
            "dry_run": 1,
            "queryStringParameters": {"dry_run": "yes"}
        });
        assert!(parse_dry_run(&event));
    }

    #[test]
    fn scheduled_event_is_not_dry_run() {
        let event = json!({
            "source": "aws.events",
            "detail-type": "Scheduled Event",
            "detail": {}
        });
        assert!(!parse_dry_run(&event));
        assert!(!parse_dry_run(&Value::Null));
    }
}
