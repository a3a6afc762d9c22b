use crate::error::ErrorStatus;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{header, HeaderMap};
use error_stack::Report;
use kernel::KernelError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// JSON body read the way a lenient form handler reads it.
///
/// A request that is not JSON, has an empty body, or carries a top-level
/// array yields `T::default()`. Only objects are decoded into `T`; any other
/// top-level value is malformed.
pub struct JsonBody<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = ErrorStatus;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = is_json_content(req.headers());
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            Report::new(KernelError::MalformedBody).attach_printable(rejection.body_text())
        })?;
        Ok(Self(decode(is_json, &bytes)?))
    }
}

fn is_json_content(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|essence| {
            let essence = essence.trim().to_ascii_lowercase();
            essence == "application/json" || essence.ends_with("+json")
        })
        .unwrap_or(false)
}

fn decode<T>(is_json: bool, bytes: &[u8]) -> error_stack::Result<T, KernelError>
where
    T: DeserializeOwned + Default,
{
    if !is_json || bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    let value = serde_json::from_slice::<Value>(bytes).map_err(malformed)?;
    match value {
        Value::Object(_) => serde_json::from_value(value).map_err(malformed),
        Value::Array(_) => Ok(T::default()),
        _ => Err(Report::new(KernelError::MalformedBody)
            .attach_printable("top-level JSON value must be an object or an array")),
    }
}

fn malformed(error: serde_json::Error) -> Report<KernelError> {
    Report::new(error).change_context(KernelError::MalformedBody)
}

#[cfg(test)]
mod test {
    use axum::http::{header, HeaderMap, HeaderValue};
    use kernel::KernelError;
    use serde::Deserialize;

    use super::{decode, is_json_content};

    #[derive(Debug, Default, Eq, PartialEq, Deserialize)]
    struct Fields {
        title: Option<String>,
        author: Option<String>,
    }

    fn fields(title: &str, author: &str) -> Fields {
        Fields {
            title: Some(title.to_string()),
            author: Some(author.to_string()),
        }
    }

    #[test]
    fn object_is_decoded() {
        let decoded = decode::<Fields>(true, br#"{"title":"X","author":"Y"}"#).ok();
        assert_eq!(decoded, Some(fields("X", "Y")));
    }

    #[test]
    fn array_is_read_as_empty_object() {
        let decoded = decode::<Fields>(true, br#"["X","Y"]"#).ok();
        assert_eq!(decoded, Some(Fields::default()));
    }

    #[test]
    fn empty_or_non_json_body_is_read_as_empty_object() {
        assert_eq!(decode::<Fields>(true, b"").ok(), Some(Fields::default()));
        assert_eq!(decode::<Fields>(true, b" \n").ok(), Some(Fields::default()));
        assert_eq!(
            decode::<Fields>(false, br#"{"title":"X"}"#).ok(),
            Some(Fields::default())
        );
    }

    #[test]
    fn broken_or_scalar_json_is_malformed() {
        for raw in [r#"{"title": "#, "5", r#""X""#, "null"] {
            let decoded = decode::<Fields>(true, raw.as_bytes());
            assert!(matches!(
                decoded.as_ref().map_err(|e| e.current_context()),
                Err(KernelError::MalformedBody)
            ));
        }
    }

    #[test]
    fn recognises_json_content_types() {
        let mut headers = HeaderMap::new();
        assert!(!is_json_content(&headers));

        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        assert!(is_json_content(&headers));

        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/merge-patch+json"),
        );
        assert!(is_json_content(&headers));

        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        assert!(!is_json_content(&headers));
    }
}
