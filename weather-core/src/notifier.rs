use crate::{BotResult, Config, model::DispatchResult, notifier::telegram::TelegramNotifier};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod telegram;

/// Delivers a rendered message to the chat.
///
/// A provider that answers with a falsy success flag is not an error; the
/// caller inspects [`DispatchResult::ok`].
#[async_trait]
pub trait Notifier: Send + Sync + Debug {
    async fn send(&self, text: &str) -> BotResult<DispatchResult>;
}

/// Construct the notifier from config.
pub fn notifier_from_config(config: &Config) -> Box<dyn Notifier> {
    Box::new(TelegramNotifier::new(
        config.telegram.bot_token.clone(),
        config.telegram.chat_id.clone(),
    ))
}
