//! Request-scoped view over one update.
//!
//! A [`Context`] is built once per update. It classifies the update eagerly,
//! resolves chat/sender/message on demand, and exposes one dispatch method
//! per outbound operation (see `dispatch.rs`).

mod dispatch;

use std::sync::Arc;

use serde_json::{Map, Value};
use teloxide::types::{ChatId, MessageId, UserId};
use tracing::debug;

use crate::api::{ApiCall, MessageTarget, Telegram};
use crate::classify::{classify, Classification};
use crate::config::ContextOptions;
use crate::error::Result;
use crate::guard;
use crate::resolve;
use crate::routes::{self, Requirement, ROUTES};
use crate::taxonomy::{UpdateSubType, UpdateType};
use crate::update::{
    CallbackQuery, Chat, ChosenInlineResult, InlineQuery, Message, Poll, PollAnswer,
    PreCheckoutQuery, ShippingQuery, Update, User,
};

/// Scratch space for middleware. The context never looks inside.
pub type State = Map<String, Value>;

/// Cloning is cheap: the update, invoker and options are shared. Each clone
/// carries its own copy of the state bag.
#[derive(Clone)]
pub struct Context {
    update: Arc<Update>,
    telegram: Arc<dyn Telegram>,
    options: Arc<ContextOptions>,
    classification: Classification,
    state: State,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("update_id", &self.update.update_id)
            .field("classification", &self.classification)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Context {
    /// Classify `update` and wrap it. Fails when the update carries none of
    /// the known update types.
    pub fn new(
        update: Update,
        telegram: Arc<dyn Telegram>,
        options: ContextOptions,
    ) -> Result<Self> {
        let classification = classify(&update, &options)?;
        Ok(Self {
            update: Arc::new(update),
            telegram,
            options: Arc::new(options),
            classification,
            state: State::new(),
        })
    }

    pub fn update(&self) -> &Update {
        &self.update
    }

    pub fn telegram(&self) -> &Arc<dyn Telegram> {
        &self.telegram
    }

    pub fn options(&self) -> &ContextOptions {
        &self.options
    }

    /// The bot's own username, if configured.
    pub fn me(&self) -> Option<&str> {
        self.options.username.as_deref()
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    pub fn update_type(&self) -> UpdateType {
        self.classification.update_type
    }

    pub fn update_sub_types(&self) -> &[UpdateSubType] {
        &self.classification.update_sub_types
    }

    pub fn message(&self) -> Option<&Message> {
        self.update.message.as_ref()
    }

    pub fn edited_message(&self) -> Option<&Message> {
        self.update.edited_message.as_ref()
    }

    pub fn channel_post(&self) -> Option<&Message> {
        self.update.channel_post.as_ref()
    }

    pub fn edited_channel_post(&self) -> Option<&Message> {
        self.update.edited_channel_post.as_ref()
    }

    pub fn callback_query(&self) -> Option<&CallbackQuery> {
        self.update.callback_query.as_ref()
    }

    pub fn inline_query(&self) -> Option<&InlineQuery> {
        self.update.inline_query.as_ref()
    }

    pub fn chosen_inline_result(&self) -> Option<&ChosenInlineResult> {
        self.update.chosen_inline_result.as_ref()
    }

    pub fn shipping_query(&self) -> Option<&ShippingQuery> {
        self.update.shipping_query.as_ref()
    }

    pub fn pre_checkout_query(&self) -> Option<&PreCheckoutQuery> {
        self.update.pre_checkout_query.as_ref()
    }

    pub fn poll(&self) -> Option<&Poll> {
        self.update.poll.as_ref()
    }

    pub fn poll_answer(&self) -> Option<&PollAnswer> {
        self.update.poll_answer.as_ref()
    }

    pub fn passport_data(&self) -> Option<&Value> {
        resolve::passport_data(&self.update)
    }

    /// The chat this update happened in.
    pub fn chat(&self) -> Option<&Chat> {
        resolve::chat(&self.update)
    }

    /// The user who triggered this update.
    pub fn from(&self) -> Option<&User> {
        resolve::from(&self.update)
    }

    /// The message this update is about, whichever field it arrived in.
    pub fn effective_message(&self) -> Option<&Message> {
        resolve::effective_message(&self.update)
    }

    pub fn inline_message_id(&self) -> Option<&str> {
        resolve::inline_message_id(&self.update)
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    /// Replace the whole state bag.
    pub fn set_state(&mut self, state: State) {
        self.state = state;
    }

    /// Whether the dispatch method `method` can resolve what it needs for
    /// this update. Unknown method names are never supported.
    pub fn supports(&self, method: &str) -> bool {
        routes::find(method).is_some_and(|route| self.satisfies(route.requires))
    }

    /// Dispatch methods usable for this update, in table order.
    pub fn available_methods(&self) -> Vec<&'static str> {
        ROUTES
            .iter()
            .filter(|route| self.satisfies(route.requires))
            .map(|route| route.method)
            .collect()
    }

    fn satisfies(&self, requirement: Requirement) -> bool {
        match requirement {
            Requirement::Nothing => true,
            Requirement::Chat => self.chat().is_some(),
            Requirement::Sender => self.from().is_some(),
            Requirement::Message => self.message().is_some(),
            Requirement::InlineQuery => self.inline_query().is_some(),
            Requirement::CallbackQuery => self.callback_query().is_some(),
            Requirement::ShippingQuery => self.shipping_query().is_some(),
            Requirement::PreCheckoutQuery => self.pre_checkout_query().is_some(),
            Requirement::EditTarget => {
                self.inline_message_id().is_some()
                    || self.callback_query().is_some_and(|q| q.message.is_some())
            }
        }
    }

    fn assert_present<T>(&self, value: Option<T>, operation: &'static str) -> Result<T> {
        guard::assert_present(value, operation, &self.classification)
    }

    fn chat_id(&self, operation: &'static str) -> Result<ChatId> {
        Ok(self.assert_present(self.chat(), operation)?.id)
    }

    fn sender_id(&self, operation: &'static str) -> Result<UserId> {
        Ok(self.assert_present(self.from(), operation)?.id)
    }

    /// The update's own `message`, as (chat, message id).
    fn own_message(&self, operation: &'static str) -> Result<(ChatId, MessageId)> {
        let message = self.assert_present(self.message(), operation)?;
        Ok((message.chat.id, message.id()))
    }

    /// An inline message id wins; otherwise the callback query's message.
    fn edit_target(&self, operation: &'static str) -> Result<MessageTarget> {
        if let Some(inline_message_id) = self.inline_message_id() {
            return Ok(MessageTarget::Inline {
                inline_message_id: inline_message_id.to_string(),
            });
        }
        let message = self.callback_query().and_then(|q| q.message.as_ref());
        let message = self.assert_present(message, operation)?;
        Ok(MessageTarget::Chat {
            chat_id: message.chat.id,
            message_id: message.id(),
        })
    }

    async fn call(&self, call: ApiCall) -> Result<Value> {
        debug!(
            method = call.method(),
            update_type = %self.classification.update_type,
            "delegating call"
        );
        Ok(self.telegram.invoke(call).await?)
    }
}
