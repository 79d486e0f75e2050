//! Error taxonomy of the MegaAPI client.
//!
//! Every failure that reaches a caller is an [`ApiError`]: a localized message,
//! a stable symbolic code and an HTTP-like status. Inside the client failures
//! are classified once, where they happen, as a [`Failure`] and normalized
//! into an [`ApiError`] by [`Failure::normalize`].

use serde::{Deserialize, Serialize};

pub const CODE_WEBHOOK_ERROR: &str = "WEBHOOK_ERROR";
pub const CODE_NOT_CONFIGURED: &str = "NOT_CONFIGURED";
pub const CODE_UNKNOWN_ERROR: &str = "UNKNOWN_ERROR";

pub const MSG_WEBHOOK_ERROR: &str = "Erro ao validar webhook";
pub const MSG_NOT_CONFIGURED: &str = "API não configurada";
pub const MSG_INVALID_RESPONSE: &str = "Resposta inválida da API";
pub const MSG_INVALID_TOKEN: &str = "Token de autenticação inválido";
pub const MSG_WEBHOOK_NOT_FOUND: &str = "Webhook não encontrado";
pub const MSG_CANNOT_CONNECT: &str =
    "Não foi possível conectar ao host. Verifique a URL e sua conexão";
pub const MSG_VALIDATION_FAILED: &str = "Erro ao validar a configuração";
pub const MSG_STATUS_FAILED: &str = "Erro ao verificar status do webhook";
pub const MSG_UNKNOWN: &str = "Erro desconhecido";

/// Normalized error handed to every caller of the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message} ({code}, status {status})")]
pub struct ApiError {
    pub message: String,
    pub code: String,
    pub status: u16,
}

impl ApiError {
    pub fn new(message: impl Into<String>, code: impl Into<String>, status: u16) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            status,
        }
    }

    pub fn webhook(message: Option<String>) -> Self {
        Self::new(
            message.unwrap_or_else(|| MSG_WEBHOOK_ERROR.to_string()),
            CODE_WEBHOOK_ERROR,
            400,
        )
    }

    pub fn not_configured() -> Self {
        Self::new(MSG_NOT_CONFIGURED, CODE_NOT_CONFIGURED, 400)
    }
}

/// Which public operation a failure surfaced in. Each one has its own
/// default messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Validate,
    StatusCheck,
}

/// Classified failure, decided at the point where it occurs.
#[derive(Debug, thiserror::Error)]
pub enum Failure {
    #[error(transparent)]
    AlreadyNormalized(ApiError),

    /// `status` is `None` when no response was received at all.
    #[error("transport failure (status {status:?}, code {code:?})")]
    TransportFailure {
        status: Option<u16>,
        code: Option<String>,
        message: Option<String>,
    },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("{0}")]
    Unknown(String),
}

impl Failure {
    pub fn normalize(self, operation: Operation) -> ApiError {
        match self {
            Failure::AlreadyNormalized(err) => err,
            Failure::TransportFailure {
                status,
                code,
                message,
            } => {
                let (default_message, status) = match (operation, status) {
                    (_, None) => (
                        match operation {
                            Operation::Validate => MSG_CANNOT_CONNECT,
                            Operation::StatusCheck => MSG_STATUS_FAILED,
                        },
                        503,
                    ),
                    (Operation::Validate, Some(401)) => (MSG_INVALID_TOKEN, 401),
                    (Operation::Validate, Some(404)) => (MSG_WEBHOOK_NOT_FOUND, 404),
                    (Operation::Validate, Some(status)) => (MSG_VALIDATION_FAILED, status),
                    (Operation::StatusCheck, Some(status)) => (MSG_STATUS_FAILED, status),
                };
                ApiError::new(
                    message.unwrap_or_else(|| default_message.to_string()),
                    code.unwrap_or_else(|| CODE_UNKNOWN_ERROR.to_string()),
                    status,
                )
            }
            Failure::MalformedResponse(message) | Failure::Unknown(message) => {
                let message = if message.is_empty() {
                    MSG_UNKNOWN.to_string()
                } else {
                    message
                };
                ApiError::new(message, CODE_UNKNOWN_ERROR, 500)
            }
        }
    }
}

impl From<ApiError> for Failure {
    fn from(err: ApiError) -> Self {
        Failure::AlreadyNormalized(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(status: Option<u16>, code: Option<&str>, message: Option<&str>) -> Failure {
        Failure::TransportFailure {
            status,
            code: code.map(str::to_string),
            message: message.map(str::to_string),
        }
    }

    #[test]
    fn test_already_normalized_passes_through() {
        let original = ApiError::webhook(Some("Webhook desabilitado".to_string()));
        let normalized = Failure::from(original.clone()).normalize(Operation::Validate);
        assert_eq!(normalized, original);
    }

    #[test]
    fn test_validation_status_overrides() {
        let err = transport(Some(401), None, None).normalize(Operation::Validate);
        assert_eq!(err, ApiError::new(MSG_INVALID_TOKEN, CODE_UNKNOWN_ERROR, 401));

        let err = transport(Some(404), None, None).normalize(Operation::Validate);
        assert_eq!(err.message, MSG_WEBHOOK_NOT_FOUND);
        assert_eq!(err.status, 404);

        let err = transport(Some(502), None, None).normalize(Operation::Validate);
        assert_eq!(err.message, MSG_VALIDATION_FAILED);
        assert_eq!(err.status, 502);
    }

    #[test]
    fn test_remote_message_wins() {
        let err = transport(Some(404), None, Some("Instância não encontrada"))
            .normalize(Operation::Validate);
        assert_eq!(err.message, "Instância não encontrada");
        assert_eq!(err.code, CODE_UNKNOWN_ERROR);
    }

    #[test]
    fn test_no_response_is_503_with_transport_code() {
        let err = transport(None, Some("ECONNREFUSED"), None).normalize(Operation::Validate);
        assert_eq!(err, ApiError::new(MSG_CANNOT_CONNECT, "ECONNREFUSED", 503));

        let err = transport(None, Some("ETIMEDOUT"), None).normalize(Operation::StatusCheck);
        assert_eq!(err, ApiError::new(MSG_STATUS_FAILED, "ETIMEDOUT", 503));
    }

    #[test]
    fn test_status_check_has_no_overrides() {
        let err = transport(Some(401), None, None).normalize(Operation::StatusCheck);
        assert_eq!(err.message, MSG_STATUS_FAILED);
        assert_eq!(err.status, 401);
    }

    #[test]
    fn test_malformed_and_unknown() {
        let err = Failure::MalformedResponse(MSG_INVALID_RESPONSE.to_string())
            .normalize(Operation::Validate);
        assert_eq!(err, ApiError::new(MSG_INVALID_RESPONSE, CODE_UNKNOWN_ERROR, 500));

        let err = Failure::Unknown(String::new()).normalize(Operation::StatusCheck);
        assert_eq!(err.message, MSG_UNKNOWN);
    }
}
