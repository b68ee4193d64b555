use reqwest::{Method, Response, StatusCode, Url};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use tracing::{instrument, warn};

/// Message used when a failed response carries no body at all
pub const DEFAULT_ERROR_MESSAGE: &str = "something went wrong";

/// Body of a non-2xx response.
///
/// The service answers in one of two JSON shapes; a body matching neither is
/// kept as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorPayload {
    /// `{"code": -1, "msg": "..."}` validation rejection
    Coded {
        code: i64,
        msg: String,
        message: Option<String>,
    },
    /// `{"timestamp", "status", "error", "message", "path"}` framework error
    Standard {
        timestamp: Option<i64>,
        status: Option<u16>,
        error: Option<String>,
        message: String,
        path: Option<String>,
    },
    Raw(String),
}

#[derive(Deserialize)]
struct CodedBody {
    code: i64,
    #[serde(default)]
    msg: String,
    message: Option<String>,
}

#[derive(Deserialize)]
struct StandardBody {
    timestamp: Option<i64>,
    status: Option<u16>,
    error: Option<String>,
    #[serde(default)]
    message: String,
    path: Option<String>,
}

impl ErrorPayload {
    /// Classify a raw response body
    pub fn from_body(body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body);
        if text.trim().is_empty() {
            return Self::Raw(DEFAULT_ERROR_MESSAGE.to_string());
        }

        match serde_json::from_slice::<Map<String, Value>>(body) {
            Ok(map) if map.contains_key("code") => {
                serde_json::from_value::<CodedBody>(Value::Object(map)).map_or_else(
                    |_| Self::Raw(text.into_owned()),
                    |b| Self::Coded {
                        code: b.code,
                        msg: b.msg,
                        message: b.message,
                    },
                )
            }
            Ok(map) => serde_json::from_value::<StandardBody>(Value::Object(map)).map_or_else(
                |_| Self::Raw(text.into_owned()),
                |b| Self::Standard {
                    timestamp: b.timestamp,
                    status: b.status,
                    error: b.error,
                    message: b.message,
                    path: b.path,
                },
            ),
            Err(_) => Self::Raw(text.into_owned()),
        }
    }

    /// The human readable message: `msg` for negative codes, `message` otherwise
    pub fn message(&self) -> &str {
        match self {
            Self::Coded { code, msg, .. } if *code < 0 => msg.as_str(),
            Self::Coded { message, .. } => message.as_deref().unwrap_or_default(),
            Self::Standard { message, .. } => message.as_str(),
            Self::Raw(text) => text.as_str(),
        }
    }
}

/// Error returned for any non-2xx response
#[derive(Debug, Clone)]
pub struct ErrorResponse {
    pub method: Method,
    pub url: Url,
    pub status: StatusCode,
    pub payload: ErrorPayload,
}

impl ErrorResponse {
    pub fn from_body(method: Method, url: Url, status: StatusCode, body: &[u8]) -> Self {
        Self {
            method,
            url,
            status,
            payload: ErrorPayload::from_body(body),
        }
    }

    pub fn code(&self) -> Option<i64> {
        match &self.payload {
            ErrorPayload::Coded { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn msg(&self) -> Option<&str> {
        match &self.payload {
            ErrorPayload::Coded { msg, .. } => Some(msg.as_str()),
            _ => None,
        }
    }

    pub fn path(&self) -> Option<&str> {
        match &self.payload {
            ErrorPayload::Standard { path, .. } => path.as_deref(),
            _ => None,
        }
    }

    pub fn message(&self) -> &str {
        self.payload.message()
    }

    /// Status line as `<code> <reason>`, e.g. `400 Bad Request`
    pub fn status_line(&self) -> String {
        match self.status.canonical_reason() {
            Some(reason) => format!("{} {}", self.status.as_u16(), reason),
            None => self.status.as_u16().to_string(),
        }
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: [{}] {}",
            self.method,
            self.url,
            self.status_line(),
            self.message()
        )
    }
}

impl std::error::Error for ErrorResponse {}

/// Pass 2xx responses through; turn anything else into an [`ErrorResponse`].
///
/// A body that cannot be read still produces an error, with the default
/// message.
#[instrument(skip(response), fields(status = %response.status()))]
pub async fn check_response(
    method: &Method,
    url: &Url,
    response: Response,
) -> Result<Response, Box<ErrorResponse>> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.bytes().await.unwrap_or_default();
    let error = ErrorResponse::from_body(method.clone(), url.clone(), status, &body);
    warn!(error = %error, "request rejected");
    Err(Box::new(error))
}
