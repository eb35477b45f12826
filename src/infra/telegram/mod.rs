pub mod client;

pub use client::TelegramSink;
