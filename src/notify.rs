//! User notification sink and API error normalization.
//!
//! The coordinator reports every failed remote operation through a
//! [`Notifier`], so the consuming surface decides how notifications are
//! rendered (toast, status line, stderr). [`report_api_error`] is the single
//! normalization point: it flattens the heterogeneous transport failures
//! into one display string and one structured diagnostic log line.

use crate::client::ApiError;

/// Fallback when neither the server nor the transport supplied a message.
const GENERIC_MESSAGE: &str = "Unexpected error while communicating with the server";

/// Weight of a notification, mapped by the consuming surface to its own
/// presentation (toast variant, color, log level).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// Sink for user-facing notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, description: &str, severity: Severity);
}

/// [`Notifier`] that routes notifications through `tracing`.
///
/// The default sink for headless consumers; interactive surfaces supply
/// their own implementation.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, title: &str, description: &str, severity: Severity) {
        match severity {
            Severity::Error => tracing::error!(title, "{}", description),
            Severity::Success | Severity::Info => tracing::info!(title, "{}", description),
        }
    }
}

/// Build the single user-facing message for a failed request.
///
/// Preference order: server-supplied `message` field, then server-supplied
/// `error` field, then the transport-level message, then a generic
/// fallback. HTTP errors additionally carry the status code and any
/// validation detail the server attached.
pub fn display_message(err: &ApiError) -> String {
    match err {
        ApiError::Status { status, body, .. } => {
            let mut message = body
                .as_ref()
                .and_then(|b| b.message.clone().or_else(|| b.error.clone()))
                .unwrap_or_else(|| GENERIC_MESSAGE.to_string());
            message.push_str(&format!(" (status {})", status.as_u16()));
            if let Some(errors) = body.as_ref().and_then(|b| b.errors.as_ref()) {
                message.push_str(&format!(" - {}", errors));
            }
            message
        }
        ApiError::Transport { message, .. } | ApiError::Decode { message, .. } => {
            if message.is_empty() {
                GENERIC_MESSAGE.to_string()
            } else {
                message.clone()
            }
        }
    }
}

/// Normalize `err` and emit exactly one user notification for it.
///
/// Also writes one structured diagnostic record with whatever the failure
/// carried: request method and URL always, status and response body when a
/// response was received. Repeated identical errors are reported each time;
/// there is no deduplication or rate limiting here.
pub fn report_api_error(notifier: &dyn Notifier, err: &ApiError) {
    match err {
        ApiError::Status {
            method,
            url,
            status,
            body,
        } => {
            tracing::error!(%method, %url, %status, ?body, "API error");
        }
        ApiError::Transport { method, url, message } => {
            tracing::error!(%method, %url, %message, "API error: no response");
        }
        ApiError::Decode { method, url, message } => {
            tracing::error!(%method, %url, %message, "API error: malformed response");
        }
    }

    notifier.notify("Error", &display_message(err), Severity::Error);
}
