//! Resolution chains.
//!
//! Different update kinds keep the "current" chat, sender or message in
//! different places. Each chain is a fixed list of probes tried in order; the
//! first one that yields a value wins.

use serde_json::Value;

use crate::update::{Chat, Message, Update, User};

type Probe<T> = for<'a> fn(&'a Update) -> Option<&'a T>;

/// Messages carrying a chat: message, edited_message, callback_query.message,
/// channel_post, edited_channel_post.
pub const MESSAGE_PROBES: [Probe<Message>; 5] = [
    message,
    edited_message,
    callback_message,
    channel_post,
    edited_channel_post,
];

/// Senders: message, edited_message, callback_query, inline_query,
/// channel_post, edited_channel_post, shipping_query, pre_checkout_query,
/// chosen_inline_result.
pub const SENDER_PROBES: [Probe<User>; 9] = [
    message_from,
    edited_message_from,
    callback_query_from,
    inline_query_from,
    channel_post_from,
    edited_channel_post_from,
    shipping_query_from,
    pre_checkout_query_from,
    chosen_inline_result_from,
];

/// Inline message ids: callback_query, chosen_inline_result.
pub const INLINE_MESSAGE_ID_PROBES: [Probe<str>; 2] =
    [callback_inline_message_id, chosen_inline_message_id];

fn first<'a, T: ?Sized>(update: &'a Update, probes: &[Probe<T>]) -> Option<&'a T> {
    probes.iter().find_map(|probe| probe(update))
}

pub fn chat(update: &Update) -> Option<&Chat> {
    effective_message(update).map(|m| &m.chat)
}

pub fn from(update: &Update) -> Option<&User> {
    first(update, &SENDER_PROBES)
}

pub fn effective_message(update: &Update) -> Option<&Message> {
    first(update, &MESSAGE_PROBES)
}

pub fn inline_message_id(update: &Update) -> Option<&str> {
    first(update, &INLINE_MESSAGE_ID_PROBES)
}

/// Passport data only ever arrives on a plain message.
pub fn passport_data(update: &Update) -> Option<&Value> {
    update.message.as_ref()?.passport_data()
}

fn message(update: &Update) -> Option<&Message> {
    update.message.as_ref()
}

fn edited_message(update: &Update) -> Option<&Message> {
    update.edited_message.as_ref()
}

fn callback_message(update: &Update) -> Option<&Message> {
    update.callback_query.as_ref()?.message.as_ref()
}

fn channel_post(update: &Update) -> Option<&Message> {
    update.channel_post.as_ref()
}

fn edited_channel_post(update: &Update) -> Option<&Message> {
    update.edited_channel_post.as_ref()
}

fn message_from(update: &Update) -> Option<&User> {
    message(update)?.from.as_ref()
}

fn edited_message_from(update: &Update) -> Option<&User> {
    edited_message(update)?.from.as_ref()
}

fn callback_query_from(update: &Update) -> Option<&User> {
    update.callback_query.as_ref().map(|q| &q.from)
}

fn inline_query_from(update: &Update) -> Option<&User> {
    update.inline_query.as_ref().map(|q| &q.from)
}

// Channel posts are usually anonymous, but signed ones carry a sender.
fn channel_post_from(update: &Update) -> Option<&User> {
    channel_post(update)?.from.as_ref()
}

fn edited_channel_post_from(update: &Update) -> Option<&User> {
    edited_channel_post(update)?.from.as_ref()
}

fn shipping_query_from(update: &Update) -> Option<&User> {
    update.shipping_query.as_ref().map(|q| &q.from)
}

fn pre_checkout_query_from(update: &Update) -> Option<&User> {
    update.pre_checkout_query.as_ref().map(|q| &q.from)
}

fn chosen_inline_result_from(update: &Update) -> Option<&User> {
    update.chosen_inline_result.as_ref().map(|r| &r.from)
}

fn callback_inline_message_id(update: &Update) -> Option<&str> {
    update.callback_query.as_ref()?.inline_message_id.as_deref()
}

fn chosen_inline_message_id(update: &Update) -> Option<&str> {
    update.chosen_inline_result.as_ref()?.inline_message_id.as_deref()
}
