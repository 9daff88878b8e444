//! Error type for Github Client

use serde::Deserialize;
use std::{borrow::Cow, fmt};
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("`{0}`")]
    Message(Cow<'static, str>),

    #[error("request failed with status {}{}", .0, describe_payload(.1))]
    Status(reqwest::StatusCode, Option<GithubClientError>),

    #[error("graphql error: {}", join_messages(.0))]
    GraphqlError(Vec<GraphqlError>),
}

impl Error {
    /// Network, HTTP status or GraphQL level failures
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Reqwest(_) | Error::Status(..) | Error::GraphqlError(_)
        )
    }

    /// The service answered but the payload did not have the expected shape
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Json(_))
    }

    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Error::Status(status, _) => Some(*status),
            Error::Reqwest(e) => e.status(),
            _ => None,
        }
    }
}

impl From<&'static str> for Error {
    fn from(error: &'static str) -> Self {
        Error::Message(error.into())
    }
}

impl From<String> for Error {
    fn from(error: String) -> Self {
        Error::Message(error.into())
    }
}

fn describe_payload(payload: &Option<GithubClientError>) -> String {
    payload
        .as_ref()
        .map(|e| format!(": {}", e))
        .unwrap_or_default()
}

fn join_messages(errors: &[GraphqlError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

// Github Error Responses
// https://docs.github.com/en/rest/overview/resources-in-the-rest-api#client-errors
#[derive(Debug, Deserialize)]
pub struct GithubClientError {
    pub message: Option<String>,
    pub errors: Option<Vec<GithubClientErrorType>>,
    pub documentation_url: Option<String>,
}

impl fmt::Display for GithubClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message.as_deref().unwrap_or("unknown error"))?;
        for error in self.errors.iter().flatten() {
            match error {
                GithubClientErrorType::Message(message) => write!(f, "; {}", message)?,
                GithubClientErrorType::Code {
                    resource,
                    field,
                    code,
                } => write!(f, "; {}.{}: {}", resource, field, code)?,
                GithubClientErrorType::Other(value) => write!(f, "; {}", value)?,
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum GithubClientErrorType {
    Message(String),
    Code {
        resource: String,
        field: String,
        code: String,
    },
    Other(serde_json::Value),
}

#[derive(Debug, Deserialize)]
pub struct GraphqlErrorLocation {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlError {
    pub message: String,
    pub locations: Option<Vec<GraphqlErrorLocation>>,
    #[serde(rename = "type")]
    pub error_type: Option<String>,
}

#[cfg(test)]
mod test {
    use super::{Error, GithubClientError};
    use reqwest::StatusCode;

    #[test]
    fn client_error_payload() {
        const ERROR_JSON: &str = r#"
            {
                "message": "Validation Failed",
                "errors": [
                    {
                        "resource": "Repository",
                        "field": "permission",
                        "code": "invalid"
                    }
                ],
                "documentation_url": "https://docs.github.com/rest/collaborators/collaborators#add-a-repository-collaborator"
            }
        "#;

        let payload: GithubClientError = serde_json::from_str(ERROR_JSON).unwrap();
        let error = Error::Status(StatusCode::UNPROCESSABLE_ENTITY, Some(payload));

        assert!(error.is_transport());
        assert_eq!(error.status(), Some(StatusCode::UNPROCESSABLE_ENTITY));
        assert_eq!(
            error.to_string(),
            "request failed with status 422 Unprocessable Entity: \
             Validation Failed; Repository.permission: invalid"
        );
    }

    #[test]
    fn decode_errors_are_not_transport_errors() {
        let error: Error = serde_json::from_str::<u64>("\"nope\"").unwrap_err().into();
        assert!(error.is_decode());
        assert!(!error.is_transport());
    }
}
