//! Centralized configuration (environment variables + defaults).

/// Database URL must be provided (no default) for safety.
pub fn database_url() -> String {
    std::env::var("DATABASE_URL").expect("DATABASE_URL must be set")
}

/// Telegram bot token (required).
pub fn telegram_bot_token() -> String {
    std::env::var("TELEGRAM_BOT_TOKEN").expect("TELEGRAM_BOT_TOKEN must be set")
}

/// Telegram chat the notifications are delivered to (required).
pub fn telegram_chat_id() -> String {
    std::env::var("TELEGRAM_CHAT_ID").expect("TELEGRAM_CHAT_ID must be set")
}
