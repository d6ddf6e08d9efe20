//! Classified result of a single request

use crate::ClientError;

/// What happened to a request, without any callback side effects.
///
/// Every gateway verb is [`crate::RequestGateway::send`] followed by the
/// callback fallback chain applied to this value.
#[derive(Debug)]
pub enum Outcome<T> {
    /// The server answered successfully
    Success(T),
    /// The server answered 401
    AuthRequired,
    /// The server answered with another failure status
    ApplicationError { status: u16, message: String },
    /// No response was received
    TransportError(reqwest::Error),
}

impl<T> Outcome<T> {
    /// Turn every failure into the matching [`ClientError`]
    pub fn into_result(self) -> crate::Result<T> {
        match self {
            Self::Success(v) => Ok(v),
            Self::AuthRequired => Err(ClientError::Unauthorized),
            Self::ApplicationError { status, message } => Err(ClientError::Api { status, message }),
            Self::TransportError(e) => Err(ClientError::Http(e)),
        }
    }

    /// Classify a failure carrying an HTTP status
    pub(crate) fn from_status(status: u16, message: String) -> Self {
        if status == 401 {
            Self::AuthRequired
        } else {
            Self::ApplicationError { status, message }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status() {
        assert!(matches!(
            Outcome::<()>::from_status(401, "nope".into()),
            Outcome::AuthRequired
        ));
        match Outcome::<()>::from_status(404, "Item not found".into()) {
            Outcome::ApplicationError { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Item not found");
            }
            other => panic!("Expected ApplicationError, got {:?}", other),
        }
    }

    #[test]
    fn test_into_result() {
        assert_eq!(Outcome::Success(42).into_result().unwrap(), 42);

        let err = Outcome::<u8>::AuthRequired.into_result().unwrap_err();
        assert!(err.is_unauthorized());

        let err = Outcome::<u8>::from_status(500, "Error while saving group".into())
            .into_result()
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "API error (500): Error while saving group");
    }
}
