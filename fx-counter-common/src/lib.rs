pub use ::http::StatusCode;

use {
    std::collections::BTreeMap,
    serde::{Serialize, Deserialize, de::DeserializeOwned},
};

pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Part of the platform invocation context that functions are allowed to see.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct InvocationContext {
    pub request_id: String,
}

impl InvocationContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }
}

/// Envelope returned to the platform for every invocation, successful or not.
///
/// `body` holds an already serialized json document, the way api gateway proxy
/// integrations expect it.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub headers: Option<BTreeMap<String, String>>,
    pub body: String,
}

impl FunctionResponse {
    pub fn json<T: Serialize>(status: StatusCode, body: &T) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(CONTENT_TYPE_HEADER.to_owned(), CONTENT_TYPE_JSON.to_owned());

        Self {
            headers: Some(headers),
            ..Self::json_without_headers(status, body)
        }
    }

    pub fn json_without_headers<T: Serialize>(status: StatusCode, body: &T) -> Self {
        Self {
            status_code: status.as_u16(),
            headers: None,
            body: serialize_body(body),
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.as_ref()
            .and_then(|headers| headers.get(name))
            .map(|v| v.as_str())
    }

    pub fn parse_body<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.body)
    }
}

// bodies are plain structs of strings and integers, serializing them cannot fail
fn serialize_body<T: Serialize>(body: &T) -> String {
    serde_json::to_string(body)
        .unwrap_or_else(|err| format!("{{\"error\":\"failed to serialize response body: {err}\"}}"))
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct CounterResponseBody {
    pub message: String,
    pub counter: u64,
    pub is_first_execution: bool,
    pub filesystem_info: FilesystemInfo,
    pub request_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct FilesystemInfo {
    pub counter_file_size_bytes: u64,
    pub log_file_size_bytes: u64,
    pub efs_mounted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct ErrorResponseBody {
    pub error: String,
    pub message: String,
}

impl ErrorResponseBody {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        serde_json::{json, Value},
        super::*,
    };

    #[test]
    fn json_response_has_content_type() {
        let response = FunctionResponse::json(StatusCode::OK, &ErrorResponseBody::new("a", "b"));
        let serialized: Value = serde_json::to_value(&response).unwrap();

        assert_eq!(200, serialized["statusCode"]);
        assert_eq!("application/json", serialized["headers"]["Content-Type"]);
        assert_eq!(json!({"error": "a", "message": "b"}), serde_json::from_str::<Value>(serialized["body"].as_str().unwrap()).unwrap());
    }

    #[test]
    fn response_without_headers_omits_field() {
        let response = FunctionResponse::json_without_headers(StatusCode::INTERNAL_SERVER_ERROR, &ErrorResponseBody::new("a", "b"));
        let serialized: Value = serde_json::to_value(&response).unwrap();

        assert_eq!(500, serialized["statusCode"]);
        assert!(serialized.get("headers").is_none());
        assert_eq!(None, response.header(CONTENT_TYPE_HEADER));
    }

    #[test]
    fn counter_body_field_names() {
        let body = CounterResponseBody {
            message: "hello".to_owned(),
            counter: 3,
            is_first_execution: false,
            filesystem_info: FilesystemInfo {
                counter_file_size_bytes: 1,
                log_file_size_bytes: 150,
                efs_mounted: true,
            },
            request_id: "req-1".to_owned(),
        };

        assert_eq!(
            json!({
                "message": "hello",
                "counter": 3,
                "is_first_execution": false,
                "filesystem_info": {
                    "counter_file_size_bytes": 1,
                    "log_file_size_bytes": 150,
                    "efs_mounted": true,
                },
                "request_id": "req-1",
            }),
            serde_json::to_value(&body).unwrap(),
        );
    }
}
