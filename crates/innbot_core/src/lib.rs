//! Core logic for the registry lookup chat bot.
//! Normalization rules for registry records live here and nowhere else.

pub mod config;
pub mod logging;
pub mod model;
pub mod normalize;
pub mod registry;
pub mod service;
pub mod transport;

pub use config::{BotConfig, ConfigError, LoggingConfig, RegistryConfig, TelegramConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::inbound::{InboundMessage, GREETING_REPLY, GREETING_TEXT, REJECTION_REPLY};
pub use model::record::{CanonicalRecord, RawRecord};
pub use normalize::address::{
    format_address, format_address_with, AddressShapeError, KeywordRewrite, KeywordRule,
    DEFAULT_KEYWORD_RULES,
};
pub use normalize::name::format_name;
pub use normalize::normalizer::{NormalizeError, RecordNormalizer};
pub use normalize::numbers::format_numbers;
pub use registry::egrul_client::{
    parse_first_row, parse_token, EgrulClient, RegistryError, RegistryLookup, RegistryResult,
};
pub use service::bot::Bot;
pub use service::reply_service::{
    format_failed_reply, lookup_failed_reply, ReplyError, ReplyService,
};
pub use transport::telegram::{
    ChatTransport, IncomingMessage, IncomingUpdate, TelegramTransport, TransportError,
    TransportResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
