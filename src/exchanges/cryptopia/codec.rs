use crate::core::errors::ExchangeError;
use crate::core::kernel::RestResponse;
use serde_json::Value;
use tracing::warn;

const ERROR_FIELDS: [&str; 2] = ["error", "Error"];
const DATA_FIELDS: [&str; 3] = ["Data", "data", "result"];
const ERROR_SEVERITY: char = 'E';

/// Turn a raw response into the payload or the error it carries.
///
/// Order matters: a body that is not JSON is malformed whatever the status;
/// an embedded error wins over the HTTP status; only then is a non-2xx status
/// reported on its own.
pub fn decode_response(response: RestResponse) -> Result<Value, ExchangeError> {
    let success = response.is_success();
    let RestResponse { status, body } = response;

    let payload: Value = match serde_json::from_str(&body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(status, error = %e, "response body is not JSON");
            return Err(ExchangeError::MalformedResponse {
                reason: e.to_string(),
                body,
            });
        }
    };

    if let Some(message) = extract_error(&payload) {
        warn!(status, message = %message, "exchange reported an error");
        return Err(ExchangeError::ApiError { message });
    }

    if !success {
        return Err(ExchangeError::HttpError { status, body });
    }

    Ok(extract_data(payload))
}

/// Find the first error the payload reports, if any
pub fn extract_error(payload: &Value) -> Option<String> {
    let object = payload.as_object()?;

    for field in ERROR_FIELDS {
        match object.get(field) {
            Some(Value::Array(entries)) => {
                if let Some(message) = first_error_entry(entries) {
                    return Some(message);
                }
            }
            Some(Value::String(message)) if !message.is_empty() => {
                return Some(message.clone());
            }
            _ => {}
        }
    }

    if object.get("Success").and_then(Value::as_bool) == Some(false) {
        let message = ["Error", "Message"]
            .iter()
            .filter_map(|field| object.get(*field).and_then(Value::as_str))
            .find(|message| !message.is_empty())
            .unwrap_or("request was not successful");
        return Some(message.to_string());
    }

    None
}

/// First `E`-prefixed entry with the severity letter removed; warnings are skipped
fn first_error_entry(entries: &[Value]) -> Option<String> {
    entries
        .iter()
        .filter_map(Value::as_str)
        .find_map(|entry| entry.strip_prefix(ERROR_SEVERITY))
        .map(str::to_string)
}

/// The envelope's data field, or the whole payload when there is none
pub fn extract_data(payload: Value) -> Value {
    match payload {
        Value::Object(mut object) => {
            for field in DATA_FIELDS {
                if let Some(data) = object.remove(field) {
                    return data;
                }
            }
            Value::Object(object)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ok(body: &str) -> RestResponse {
        RestResponse {
            status: 200,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_success_envelope_yields_data() {
        let value = decode_response(ok(r#"{"Success": true, "Data": {"Balance": 10}}"#)).unwrap();
        assert_eq!(value, json!({"Balance": 10}));
    }

    #[test]
    fn test_payload_without_data_field_is_returned_whole() {
        let value = decode_response(ok(r#"{"Balance": 10}"#)).unwrap();
        assert_eq!(value, json!({"Balance": 10}));

        let value = decode_response(ok("[1,2,3]")).unwrap();
        assert_eq!(value, json!([1, 2, 3]));
    }

    #[test]
    fn test_result_field_is_extracted() {
        let value = decode_response(ok(r#"{"error": [], "result": {"unixtime": 1}}"#)).unwrap();
        assert_eq!(value, json!({"unixtime": 1}));
    }

    #[test]
    fn test_error_array_strips_severity_letter() {
        let err = decode_response(ok(r#"{"error": ["ETooManyRequests"]}"#)).unwrap_err();
        assert!(matches!(err, ExchangeError::ApiError { ref message } if message == "TooManyRequests"));
    }

    #[test]
    fn test_error_array_skips_warnings() {
        let err = decode_response(ok(
            r#"{"error": ["WGeneral:Deprecated", "EOrder:Insufficient funds"], "result": {}}"#,
        ))
        .unwrap_err();
        assert!(
            matches!(err, ExchangeError::ApiError { ref message } if message == "Order:Insufficient funds")
        );

        let value = decode_response(ok(r#"{"error": ["WGeneral:Deprecated"], "result": 5}"#)).unwrap();
        assert_eq!(value, json!(5));
    }

    #[test]
    fn test_success_false_uses_error_then_message() {
        let err = decode_response(ok(r#"{"Success": false, "Error": "Market not found"}"#))
            .unwrap_err();
        assert!(matches!(err, ExchangeError::ApiError { ref message } if message == "Market not found"));

        let err = decode_response(ok(
            r#"{"Success": false, "Message": "Signature does not match", "Error": null}"#,
        ))
        .unwrap_err();
        assert!(
            matches!(err, ExchangeError::ApiError { ref message } if message == "Signature does not match")
        );

        let err = decode_response(ok(r#"{"Success": false}"#)).unwrap_err();
        assert!(matches!(err, ExchangeError::ApiError { .. }));
    }

    #[test]
    fn test_null_error_with_data_is_success() {
        let value = decode_response(ok(
            r#"{"Success": true, "Message": null, "Error": null, "Data": []}"#,
        ))
        .unwrap();
        assert_eq!(value, json!([]));
    }

    #[test]
    fn test_html_body_is_malformed() {
        let body = "<html><body>502 Bad Gateway</body></html>";
        let err = decode_response(RestResponse {
            status: 502,
            body: body.to_string(),
        })
        .unwrap_err();
        assert!(matches!(err, ExchangeError::MalformedResponse { .. }));
        assert_eq!(err.raw_body(), Some(body));
    }

    #[test]
    fn test_http_status_without_embedded_error() {
        let err = decode_response(RestResponse {
            status: 500,
            body: r#"{"Data": null}"#.to_string(),
        })
        .unwrap_err();
        assert!(matches!(err, ExchangeError::HttpError { status: 500, .. }));
    }

    #[test]
    fn test_success_range_is_2xx() {
        let edge = |status| RestResponse {
            status,
            body: r#"{"Data": 1}"#.to_string(),
        };
        assert_eq!(decode_response(edge(299)).unwrap(), json!(1));
        assert!(matches!(
            decode_response(edge(302)),
            Err(ExchangeError::HttpError { status: 302, .. })
        ));
        assert!(matches!(
            decode_response(edge(199)),
            Err(ExchangeError::HttpError { status: 199, .. })
        ));
    }

    #[test]
    fn test_embedded_error_wins_over_status() {
        let err = decode_response(RestResponse {
            status: 401,
            body: r#"{"Success": false, "Error": "Invalid key"}"#.to_string(),
        })
        .unwrap_err();
        assert!(matches!(err, ExchangeError::ApiError { ref message } if message == "Invalid key"));
    }
}
