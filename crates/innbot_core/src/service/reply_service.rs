//! Reply use-case service.
//!
//! # Responsibility
//! - Answer the greeting, identifiers, and anything else with fixed or
//!   registry-derived text.
//! - Turn registry and normalization failures into user-facing replies.
//!
//! # Invariants
//! - `reply` never fails; `lookup_message` returns the underlying error.
//! - Log events carry the message kind and identifier, never free text.

use crate::logging::log_field;
use crate::model::inbound::{InboundMessage, GREETING_REPLY, REJECTION_REPLY};
use crate::normalize::normalizer::{NormalizeError, RecordNormalizer};
use crate::registry::egrul_client::{RegistryError, RegistryLookup};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure to build a reply for one identifier.
#[derive(Debug)]
pub enum ReplyError {
    /// Registry unreachable or answered in an unexpected shape.
    Registry(RegistryError),
    /// Registry row could not be formatted.
    Normalize(NormalizeError),
}

impl Display for ReplyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Registry(err) => write!(f, "{err}"),
            Self::Normalize(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ReplyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Registry(err) => Some(err),
            Self::Normalize(err) => Some(err),
        }
    }
}

impl From<RegistryError> for ReplyError {
    fn from(value: RegistryError) -> Self {
        Self::Registry(value)
    }
}

impl From<NormalizeError> for ReplyError {
    fn from(value: NormalizeError) -> Self {
        Self::Normalize(value)
    }
}

/// Reply text when the registry lookup fails.
pub fn lookup_failed_reply(inn: &str) -> String {
    format!("Не удалось получить данные по ИНН {inn}")
}

/// Reply text when the registry row cannot be formatted.
pub fn format_failed_reply(inn: &str) -> String {
    format!("Не удалось разобрать ответ реестра по ИНН {inn}")
}

/// Reply service over a registry lookup implementation.
pub struct ReplyService<L: RegistryLookup> {
    registry: L,
    normalizer: RecordNormalizer,
}

impl<L: RegistryLookup> ReplyService<L> {
    /// Creates a service with the default normalizer.
    pub fn new(registry: L) -> Self {
        Self::with_normalizer(registry, RecordNormalizer::default())
    }

    pub fn with_normalizer(registry: L, normalizer: RecordNormalizer) -> Self {
        Self {
            registry,
            normalizer,
        }
    }

    /// Builds the reply for one inbound text.
    pub fn reply(&self, text: &str) -> String {
        let inbound = InboundMessage::classify(text);
        info!(
            "event=message_classified module=service kind={}",
            inbound.kind()
        );
        match inbound {
            InboundMessage::Greeting => GREETING_REPLY.to_string(),
            InboundMessage::Rejected => REJECTION_REPLY.to_string(),
            InboundMessage::Identifier(inn) => match self.lookup_message(&inn) {
                Ok(message) => message,
                Err(ReplyError::Registry(err)) => {
                    warn!(
                        "event=reply_failed module=service stage=registry inn={} error={err}",
                        log_field(&inn)
                    );
                    lookup_failed_reply(&inn)
                }
                Err(ReplyError::Normalize(err)) => {
                    warn!(
                        "event=reply_failed module=service stage=normalize inn={} error={err}",
                        log_field(&inn)
                    );
                    format_failed_reply(&inn)
                }
            },
        }
    }

    /// Looks up `inn` and returns the formatted record message.
    ///
    /// # Errors
    /// - [`ReplyError::Registry`] when the lookup fails.
    /// - [`ReplyError::Normalize`] when the row has an unexpected address shape.
    pub fn lookup_message(&self, inn: &str) -> Result<String, ReplyError> {
        let record = self.registry.lookup(inn)?;
        let canonical = self.normalizer.normalize(&record)?;
        Ok(canonical.into_message())
    }
}
