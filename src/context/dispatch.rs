//! Dispatch methods.
//!
//! Each method resolves what it needs from the update, checks it is present,
//! and hands an [`ApiCall`] to the invoker with the resolved identifiers in
//! front of the caller's arguments. Invoker errors come back unchanged.

use serde_json::{json, Value};
use teloxide::types::{
    BotCommand, ChatAction, ChatId, ChatPermissions, InlineKeyboardMarkup, InlineQueryResult,
    InputFile, InputMedia, InputSticker, LabeledPrice, MessageId, PassportElementError,
    ShippingOption, UserId,
};

use super::Context;
use crate::api::{ApiCall, Extra};
use crate::error::Result;

/// `parse_mode` first, so the caller's own keys override it.
fn with_parse_mode(parse_mode: &str, extra: Extra) -> Extra {
    let mut merged = Extra::new();
    merged.insert("parse_mode".to_string(), json!(parse_mode));
    merged.extend(extra);
    merged
}

impl Context {
    // Queries

    pub async fn answer_inline_query(
        &self,
        results: Vec<InlineQueryResult>,
        extra: Extra,
    ) -> Result<Value> {
        let query = self.assert_present(self.inline_query(), "answer_inline_query")?;
        self.call(ApiCall::AnswerInlineQuery {
            inline_query_id: query.id.clone(),
            results,
            extra,
        })
        .await
    }

    pub async fn answer_cb_query(
        &self,
        text: Option<String>,
        show_alert: bool,
        extra: Extra,
    ) -> Result<Value> {
        let query = self.assert_present(self.callback_query(), "answer_cb_query")?;
        self.call(ApiCall::AnswerCallbackQuery {
            callback_query_id: query.id.clone(),
            text,
            show_alert,
            extra,
        })
        .await
    }

    pub async fn answer_game_query(&self, url: impl Into<String>) -> Result<Value> {
        let query = self.assert_present(self.callback_query(), "answer_game_query")?;
        self.call(ApiCall::AnswerGameQuery {
            callback_query_id: query.id.clone(),
            url: url.into(),
        })
        .await
    }

    pub async fn answer_shipping_query(
        &self,
        ok: bool,
        shipping_options: Vec<ShippingOption>,
        error_message: Option<String>,
    ) -> Result<Value> {
        let query = self.assert_present(self.shipping_query(), "answer_shipping_query")?;
        self.call(ApiCall::AnswerShippingQuery {
            shipping_query_id: query.id.clone(),
            ok,
            shipping_options,
            error_message,
        })
        .await
    }

    pub async fn answer_pre_checkout_query(
        &self,
        ok: bool,
        error_message: Option<String>,
    ) -> Result<Value> {
        let query = self.assert_present(self.pre_checkout_query(), "answer_pre_checkout_query")?;
        self.call(ApiCall::AnswerPreCheckoutQuery {
            pre_checkout_query_id: query.id.clone(),
            ok,
            error_message,
        })
        .await
    }

    // Edits

    pub async fn edit_message_text(&self, text: impl Into<String>, extra: Extra) -> Result<Value> {
        let target = self.edit_target("edit_message_text")?;
        self.call(ApiCall::EditMessageText {
            target,
            text: text.into(),
            extra,
        })
        .await
    }

    pub async fn edit_message_caption(
        &self,
        caption: Option<String>,
        extra: Extra,
    ) -> Result<Value> {
        let target = self.edit_target("edit_message_caption")?;
        self.call(ApiCall::EditMessageCaption {
            target,
            caption,
            extra,
        })
        .await
    }

    pub async fn edit_message_media(&self, media: InputMedia, extra: Extra) -> Result<Value> {
        let target = self.edit_target("edit_message_media")?;
        self.call(ApiCall::EditMessageMedia {
            target,
            media,
            extra,
        })
        .await
    }

    pub async fn edit_message_reply_markup(
        &self,
        reply_markup: Option<InlineKeyboardMarkup>,
    ) -> Result<Value> {
        let target = self.edit_target("edit_message_reply_markup")?;
        self.call(ApiCall::EditMessageReplyMarkup {
            target,
            reply_markup,
        })
        .await
    }

    pub async fn edit_message_live_location(
        &self,
        latitude: f64,
        longitude: f64,
        extra: Extra,
    ) -> Result<Value> {
        let target = self.edit_target("edit_message_live_location")?;
        self.call(ApiCall::EditMessageLiveLocation {
            target,
            latitude,
            longitude,
            extra,
        })
        .await
    }

    pub async fn stop_message_live_location(&self, extra: Extra) -> Result<Value> {
        let target = self.edit_target("stop_message_live_location")?;
        self.call(ApiCall::StopMessageLiveLocation { target, extra })
            .await
    }

    // Chat

    /// Send a text message to the current chat.
    pub async fn reply(&self, text: impl Into<String>, extra: Extra) -> Result<Value> {
        let chat_id = self.chat_id("reply")?;
        self.call(ApiCall::SendMessage {
            chat_id,
            text: text.into(),
            extra,
        })
        .await
    }

    pub async fn reply_with_markdown(
        &self,
        markdown: impl Into<String>,
        extra: Extra,
    ) -> Result<Value> {
        self.reply(markdown, with_parse_mode("Markdown", extra))
            .await
    }

    pub async fn reply_with_markdown_v2(
        &self,
        markdown: impl Into<String>,
        extra: Extra,
    ) -> Result<Value> {
        self.reply(markdown, with_parse_mode("MarkdownV2", extra))
            .await
    }

    pub async fn reply_with_html(&self, html: impl Into<String>, extra: Extra) -> Result<Value> {
        self.reply(html, with_parse_mode("HTML", extra)).await
    }

    pub async fn get_chat(&self) -> Result<Value> {
        let chat_id = self.chat_id("get_chat")?;
        self.call(ApiCall::GetChat { chat_id }).await
    }

    pub async fn export_chat_invite_link(&self) -> Result<Value> {
        let chat_id = self.chat_id("export_chat_invite_link")?;
        self.call(ApiCall::ExportChatInviteLink { chat_id }).await
    }

    pub async fn ban_chat_member(&self, user_id: UserId, extra: Extra) -> Result<Value> {
        let chat_id = self.chat_id("ban_chat_member")?;
        self.call(ApiCall::BanChatMember {
            chat_id,
            user_id,
            extra,
        })
        .await
    }

    pub async fn unban_chat_member(&self, user_id: UserId, extra: Extra) -> Result<Value> {
        let chat_id = self.chat_id("unban_chat_member")?;
        self.call(ApiCall::UnbanChatMember {
            chat_id,
            user_id,
            extra,
        })
        .await
    }

    pub async fn restrict_chat_member(
        &self,
        user_id: UserId,
        permissions: ChatPermissions,
        extra: Extra,
    ) -> Result<Value> {
        let chat_id = self.chat_id("restrict_chat_member")?;
        self.call(ApiCall::RestrictChatMember {
            chat_id,
            user_id,
            permissions,
            extra,
        })
        .await
    }

    pub async fn promote_chat_member(&self, user_id: UserId, extra: Extra) -> Result<Value> {
        let chat_id = self.chat_id("promote_chat_member")?;
        self.call(ApiCall::PromoteChatMember {
            chat_id,
            user_id,
            extra,
        })
        .await
    }

    pub async fn set_chat_administrator_custom_title(
        &self,
        user_id: UserId,
        custom_title: impl Into<String>,
    ) -> Result<Value> {
        let chat_id = self.chat_id("set_chat_administrator_custom_title")?;
        self.call(ApiCall::SetChatAdministratorCustomTitle {
            chat_id,
            user_id,
            custom_title: custom_title.into(),
        })
        .await
    }

    pub async fn set_chat_photo(&self, photo: InputFile) -> Result<Value> {
        let chat_id = self.chat_id("set_chat_photo")?;
        self.call(ApiCall::SetChatPhoto { chat_id, photo }).await
    }

    pub async fn delete_chat_photo(&self) -> Result<Value> {
        let chat_id = self.chat_id("delete_chat_photo")?;
        self.call(ApiCall::DeleteChatPhoto { chat_id }).await
    }

    pub async fn set_chat_title(&self, title: impl Into<String>) -> Result<Value> {
        let chat_id = self.chat_id("set_chat_title")?;
        self.call(ApiCall::SetChatTitle {
            chat_id,
            title: title.into(),
        })
        .await
    }

    pub async fn set_chat_description(&self, description: Option<String>) -> Result<Value> {
        let chat_id = self.chat_id("set_chat_description")?;
        self.call(ApiCall::SetChatDescription {
            chat_id,
            description,
        })
        .await
    }

    pub async fn pin_chat_message(&self, message_id: MessageId, extra: Extra) -> Result<Value> {
        let chat_id = self.chat_id("pin_chat_message")?;
        self.call(ApiCall::PinChatMessage {
            chat_id,
            message_id,
            extra,
        })
        .await
    }

    /// Unpin `message_id`, or the most recent pin when `None`.
    pub async fn unpin_chat_message(&self, message_id: Option<MessageId>) -> Result<Value> {
        let chat_id = self.chat_id("unpin_chat_message")?;
        self.call(ApiCall::UnpinChatMessage {
            chat_id,
            message_id,
        })
        .await
    }

    pub async fn unpin_all_chat_messages(&self) -> Result<Value> {
        let chat_id = self.chat_id("unpin_all_chat_messages")?;
        self.call(ApiCall::UnpinAllChatMessages { chat_id }).await
    }

    pub async fn leave_chat(&self) -> Result<Value> {
        let chat_id = self.chat_id("leave_chat")?;
        self.call(ApiCall::LeaveChat { chat_id }).await
    }

    pub async fn set_chat_permissions(&self, permissions: ChatPermissions) -> Result<Value> {
        let chat_id = self.chat_id("set_chat_permissions")?;
        self.call(ApiCall::SetChatPermissions {
            chat_id,
            permissions,
        })
        .await
    }

    pub async fn get_chat_administrators(&self) -> Result<Value> {
        let chat_id = self.chat_id("get_chat_administrators")?;
        self.call(ApiCall::GetChatAdministrators { chat_id }).await
    }

    pub async fn get_chat_member(&self, user_id: UserId) -> Result<Value> {
        let chat_id = self.chat_id("get_chat_member")?;
        self.call(ApiCall::GetChatMember { chat_id, user_id }).await
    }

    pub async fn get_chat_member_count(&self) -> Result<Value> {
        let chat_id = self.chat_id("get_chat_member_count")?;
        self.call(ApiCall::GetChatMemberCount { chat_id }).await
    }

    pub async fn set_chat_sticker_set(&self, sticker_set_name: impl Into<String>) -> Result<Value> {
        let chat_id = self.chat_id("set_chat_sticker_set")?;
        self.call(ApiCall::SetChatStickerSet {
            chat_id,
            sticker_set_name: sticker_set_name.into(),
        })
        .await
    }

    pub async fn delete_chat_sticker_set(&self) -> Result<Value> {
        let chat_id = self.chat_id("delete_chat_sticker_set")?;
        self.call(ApiCall::DeleteChatStickerSet { chat_id }).await
    }

    pub async fn reply_with_photo(&self, photo: InputFile, extra: Extra) -> Result<Value> {
        let chat_id = self.chat_id("reply_with_photo")?;
        self.call(ApiCall::SendPhoto {
            chat_id,
            photo,
            extra,
        })
        .await
    }

    pub async fn reply_with_media_group(
        &self,
        media: Vec<InputMedia>,
        extra: Extra,
    ) -> Result<Value> {
        let chat_id = self.chat_id("reply_with_media_group")?;
        self.call(ApiCall::SendMediaGroup {
            chat_id,
            media,
            extra,
        })
        .await
    }

    pub async fn reply_with_audio(&self, audio: InputFile, extra: Extra) -> Result<Value> {
        let chat_id = self.chat_id("reply_with_audio")?;
        self.call(ApiCall::SendAudio {
            chat_id,
            audio,
            extra,
        })
        .await
    }

    pub async fn reply_with_dice(&self, extra: Extra) -> Result<Value> {
        let chat_id = self.chat_id("reply_with_dice")?;
        self.call(ApiCall::SendDice { chat_id, extra }).await
    }

    pub async fn reply_with_document(&self, document: InputFile, extra: Extra) -> Result<Value> {
        let chat_id = self.chat_id("reply_with_document")?;
        self.call(ApiCall::SendDocument {
            chat_id,
            document,
            extra,
        })
        .await
    }

    pub async fn reply_with_sticker(&self, sticker: InputFile, extra: Extra) -> Result<Value> {
        let chat_id = self.chat_id("reply_with_sticker")?;
        self.call(ApiCall::SendSticker {
            chat_id,
            sticker,
            extra,
        })
        .await
    }

    pub async fn reply_with_video(&self, video: InputFile, extra: Extra) -> Result<Value> {
        let chat_id = self.chat_id("reply_with_video")?;
        self.call(ApiCall::SendVideo {
            chat_id,
            video,
            extra,
        })
        .await
    }

    pub async fn reply_with_animation(&self, animation: InputFile, extra: Extra) -> Result<Value> {
        let chat_id = self.chat_id("reply_with_animation")?;
        self.call(ApiCall::SendAnimation {
            chat_id,
            animation,
            extra,
        })
        .await
    }

    pub async fn reply_with_video_note(
        &self,
        video_note: InputFile,
        extra: Extra,
    ) -> Result<Value> {
        let chat_id = self.chat_id("reply_with_video_note")?;
        self.call(ApiCall::SendVideoNote {
            chat_id,
            video_note,
            extra,
        })
        .await
    }

    pub async fn reply_with_voice(&self, voice: InputFile, extra: Extra) -> Result<Value> {
        let chat_id = self.chat_id("reply_with_voice")?;
        self.call(ApiCall::SendVoice {
            chat_id,
            voice,
            extra,
        })
        .await
    }

    /// `provider_token` and the other optional invoice fields go in `extra`.
    pub async fn reply_with_invoice(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        payload: impl Into<String>,
        currency: impl Into<String>,
        prices: Vec<LabeledPrice>,
        extra: Extra,
    ) -> Result<Value> {
        let chat_id = self.chat_id("reply_with_invoice")?;
        self.call(ApiCall::SendInvoice {
            chat_id,
            title: title.into(),
            description: description.into(),
            payload: payload.into(),
            currency: currency.into(),
            prices,
            extra,
        })
        .await
    }

    pub async fn reply_with_game(
        &self,
        game_short_name: impl Into<String>,
        extra: Extra,
    ) -> Result<Value> {
        let chat_id = self.chat_id("reply_with_game")?;
        self.call(ApiCall::SendGame {
            chat_id,
            game_short_name: game_short_name.into(),
            extra,
        })
        .await
    }

    pub async fn reply_with_poll(
        &self,
        question: impl Into<String>,
        options: Vec<String>,
        extra: Extra,
    ) -> Result<Value> {
        let chat_id = self.chat_id("reply_with_poll")?;
        self.call(ApiCall::SendPoll {
            chat_id,
            question: question.into(),
            options,
            extra,
        })
        .await
    }

    pub async fn reply_with_quiz(
        &self,
        question: impl Into<String>,
        options: Vec<String>,
        correct_option_id: u8,
        extra: Extra,
    ) -> Result<Value> {
        let chat_id = self.chat_id("reply_with_quiz")?;
        self.call(ApiCall::SendQuiz {
            chat_id,
            question: question.into(),
            options,
            correct_option_id,
            extra,
        })
        .await
    }

    pub async fn stop_poll(&self, message_id: MessageId, extra: Extra) -> Result<Value> {
        let chat_id = self.chat_id("stop_poll")?;
        self.call(ApiCall::StopPoll {
            chat_id,
            message_id,
            extra,
        })
        .await
    }

    pub async fn reply_with_chat_action(&self, action: ChatAction) -> Result<Value> {
        let chat_id = self.chat_id("reply_with_chat_action")?;
        self.call(ApiCall::SendChatAction { chat_id, action }).await
    }

    pub async fn reply_with_location(
        &self,
        latitude: f64,
        longitude: f64,
        extra: Extra,
    ) -> Result<Value> {
        let chat_id = self.chat_id("reply_with_location")?;
        self.call(ApiCall::SendLocation {
            chat_id,
            latitude,
            longitude,
            extra,
        })
        .await
    }

    pub async fn reply_with_venue(
        &self,
        latitude: f64,
        longitude: f64,
        title: impl Into<String>,
        address: impl Into<String>,
        extra: Extra,
    ) -> Result<Value> {
        let chat_id = self.chat_id("reply_with_venue")?;
        self.call(ApiCall::SendVenue {
            chat_id,
            latitude,
            longitude,
            title: title.into(),
            address: address.into(),
            extra,
        })
        .await
    }

    pub async fn reply_with_contact(
        &self,
        phone_number: impl Into<String>,
        first_name: impl Into<String>,
        extra: Extra,
    ) -> Result<Value> {
        let chat_id = self.chat_id("reply_with_contact")?;
        self.call(ApiCall::SendContact {
            chat_id,
            phone_number: phone_number.into(),
            first_name: first_name.into(),
            extra,
        })
        .await
    }

    /// Delete `message_id` in the current chat. Without an id, delete the
    /// message this update is about.
    pub async fn delete_message(&self, message_id: Option<MessageId>) -> Result<Value> {
        let chat_id = self.chat_id("delete_message")?;
        let message_id = match message_id {
            Some(id) => id,
            None => self
                .assert_present(self.effective_message(), "delete_message")?
                .id(),
        };
        self.call(ApiCall::DeleteMessage {
            chat_id,
            message_id,
        })
        .await
    }

    /// Forward this update's message to `chat_id`.
    pub async fn forward_message(&self, chat_id: ChatId, extra: Extra) -> Result<Value> {
        let (from_chat_id, message_id) = self.own_message("forward_message")?;
        self.call(ApiCall::ForwardMessage {
            chat_id,
            from_chat_id,
            message_id,
            extra,
        })
        .await
    }

    pub async fn copy_message(&self, chat_id: ChatId, extra: Extra) -> Result<Value> {
        let (from_chat_id, message_id) = self.own_message("copy_message")?;
        self.call(ApiCall::CopyMessage {
            chat_id,
            from_chat_id,
            message_id,
            extra,
        })
        .await
    }

    // Sender

    pub async fn set_passport_data_errors(
        &self,
        errors: Vec<PassportElementError>,
    ) -> Result<Value> {
        let user_id = self.sender_id("set_passport_data_errors")?;
        self.call(ApiCall::SetPassportDataErrors { user_id, errors })
            .await
    }

    pub async fn upload_sticker_file(&self, sticker: InputFile, extra: Extra) -> Result<Value> {
        let user_id = self.sender_id("upload_sticker_file")?;
        self.call(ApiCall::UploadStickerFile {
            user_id,
            sticker,
            extra,
        })
        .await
    }

    pub async fn create_new_sticker_set(
        &self,
        name: impl Into<String>,
        title: impl Into<String>,
        stickers: Vec<InputSticker>,
        extra: Extra,
    ) -> Result<Value> {
        let user_id = self.sender_id("create_new_sticker_set")?;
        self.call(ApiCall::CreateNewStickerSet {
            user_id,
            name: name.into(),
            title: title.into(),
            stickers,
            extra,
        })
        .await
    }

    pub async fn add_sticker_to_set(
        &self,
        name: impl Into<String>,
        sticker: InputSticker,
    ) -> Result<Value> {
        let user_id = self.sender_id("add_sticker_to_set")?;
        self.call(ApiCall::AddStickerToSet {
            user_id,
            name: name.into(),
            sticker,
        })
        .await
    }

    // Pass-through

    pub async fn get_sticker_set(&self, name: impl Into<String>) -> Result<Value> {
        self.call(ApiCall::GetStickerSet { name: name.into() })
            .await
    }

    pub async fn set_sticker_position_in_set(
        &self,
        sticker: impl Into<String>,
        position: u32,
    ) -> Result<Value> {
        self.call(ApiCall::SetStickerPositionInSet {
            sticker: sticker.into(),
            position,
        })
        .await
    }

    pub async fn set_sticker_set_thumbnail(
        &self,
        name: impl Into<String>,
        user_id: UserId,
        extra: Extra,
    ) -> Result<Value> {
        self.call(ApiCall::SetStickerSetThumbnail {
            name: name.into(),
            user_id,
            extra,
        })
        .await
    }

    pub async fn delete_sticker_from_set(&self, sticker: impl Into<String>) -> Result<Value> {
        self.call(ApiCall::DeleteStickerFromSet {
            sticker: sticker.into(),
        })
        .await
    }

    pub async fn get_my_commands(&self, extra: Extra) -> Result<Value> {
        self.call(ApiCall::GetMyCommands { extra }).await
    }

    pub async fn set_my_commands(&self, commands: Vec<BotCommand>, extra: Extra) -> Result<Value> {
        self.call(ApiCall::SetMyCommands { commands, extra }).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use teloxide::types::{ChatAction, ChatId, InputFile, MessageId, UserId};

    use crate::api::{ApiCall, Extra, MessageTarget};
    use crate::config::ContextOptions;
    use crate::context::tests::{context, context_with, text_message, Recorder};
    use crate::context::Context;
    use crate::error::{ApiError, Error};
    use crate::taxonomy::UpdateType;
    use crate::update::Update;

    fn extra(value: serde_json::Value) -> Extra {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn inline_query() -> serde_json::Value {
        json!({ "inline_query": { "id": "iq-1", "from": { "id": 3 }, "query": "cats" } })
    }

    fn callback_on_message() -> serde_json::Value {
        json!({
            "callback_query": {
                "id": "cb-1",
                "from": { "id": 8 },
                "message": { "message_id": 77, "chat": { "id": 40 } },
                "data": "x"
            }
        })
    }

    #[tokio::test]
    async fn test_reply_delegates_chat_id_and_caller_arguments() {
        let (ctx, recorder) = context(text_message());
        let options = extra(json!({ "disable_notification": true }));

        let result = ctx.reply("hello", options.clone()).await.unwrap();
        assert_eq!(result, json!({ "ok": true }));

        let calls = recorder.calls();
        assert_eq!(calls.len(), 1);
        match &calls[0] {
            ApiCall::SendMessage {
                chat_id,
                text,
                extra,
            } => {
                assert_eq!(*chat_id, ChatId(5));
                assert_eq!(text, "hello");
                assert_eq!(extra, &options);
            }
            other => panic!("unexpected call: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_reply_on_inline_query_is_unavailable() {
        let (ctx, recorder) = context(inline_query());

        let err = ctx.reply("hello", Extra::new()).await.unwrap_err();
        match &err {
            Error::Unavailable {
                operation,
                classification,
            } => {
                assert_eq!(*operation, "reply");
                assert_eq!(classification.update_type, UpdateType::InlineQuery);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("inline_query"));
        assert!(recorder.calls().is_empty());
    }

    #[tokio::test]
    async fn test_markdown_helpers_merge_parse_mode_under_caller_options() {
        let (ctx, recorder) = context(text_message());

        ctx.reply_with_markdown("*a*", Extra::new()).await.unwrap();
        ctx.reply_with_markdown_v2("_b_", extra(json!({ "parse_mode": "HTML" })))
            .await
            .unwrap();
        ctx.reply_with_html("<b>c</b>", extra(json!({ "protect_content": true })))
            .await
            .unwrap();

        let modes: Vec<_> = recorder
            .calls()
            .into_iter()
            .map(|call| match call {
                ApiCall::SendMessage { extra, .. } => extra,
                other => panic!("unexpected call: {other:?}"),
            })
            .collect();
        assert_eq!(modes[0], extra(json!({ "parse_mode": "Markdown" })));
        assert_eq!(modes[1], extra(json!({ "parse_mode": "HTML" })));
        assert_eq!(
            modes[2],
            extra(json!({ "parse_mode": "HTML", "protect_content": true }))
        );
    }

    #[tokio::test]
    async fn test_delete_message_without_id_uses_own_message() {
        let (ctx, recorder) = context(text_message());

        ctx.delete_message(None).await.unwrap();
        ctx.delete_message(Some(MessageId(99))).await.unwrap();

        let calls = recorder.calls();
        assert!(matches!(
            calls[0],
            ApiCall::DeleteMessage {
                chat_id: ChatId(5),
                message_id: MessageId(10)
            }
        ));
        assert!(matches!(
            calls[1],
            ApiCall::DeleteMessage {
                chat_id: ChatId(5),
                message_id: MessageId(99)
            }
        ));
    }

    #[tokio::test]
    async fn test_delete_message_on_callback_uses_embedded_message() {
        let (ctx, recorder) = context(callback_on_message());

        ctx.delete_message(None).await.unwrap();
        assert!(matches!(
            recorder.calls()[0],
            ApiCall::DeleteMessage {
                chat_id: ChatId(40),
                message_id: MessageId(77)
            }
        ));
    }

    #[tokio::test]
    async fn test_delete_message_prefers_plain_message_over_channel_post() {
        let (ctx, recorder) = context(json!({
            "channel_post": { "message_id": 3, "chat": { "id": -300 } },
            "message": { "message_id": 1, "chat": { "id": 100 } }
        }));

        ctx.delete_message(None).await.unwrap();
        assert!(matches!(
            recorder.calls()[0],
            ApiCall::DeleteMessage {
                chat_id: ChatId(100),
                message_id: MessageId(1)
            }
        ));
    }

    #[tokio::test]
    async fn test_delete_message_needs_chat() {
        let (ctx, _) = context(inline_query());

        let err = ctx.delete_message(Some(MessageId(1))).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Unavailable {
                operation: "delete_message",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_forward_requires_plain_message() {
        let (ctx, recorder) = context(text_message());
        ctx.forward_message(ChatId(900), Extra::new()).await.unwrap();
        assert!(matches!(
            recorder.calls()[0],
            ApiCall::ForwardMessage {
                chat_id: ChatId(900),
                from_chat_id: ChatId(5),
                message_id: MessageId(10),
                ..
            }
        ));

        // A callback query resolves a chat, but has no message of its own.
        let (ctx, recorder) = context(callback_on_message());
        assert!(ctx.chat().is_some());
        let err = ctx.forward_message(ChatId(900), Extra::new()).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Unavailable {
                operation: "forward_message",
                ..
            }
        ));
        assert!(recorder.calls().is_empty());
    }

    #[tokio::test]
    async fn test_answer_methods_need_their_own_query() {
        let (ctx, recorder) = context(inline_query());

        ctx.answer_inline_query(Vec::new(), extra(json!({ "cache_time": 0 })))
            .await
            .unwrap();
        match &recorder.calls()[0] {
            ApiCall::AnswerInlineQuery {
                inline_query_id,
                results,
                extra: options,
            } => {
                assert_eq!(inline_query_id, "iq-1");
                assert!(results.is_empty());
                assert_eq!(options, &extra(json!({ "cache_time": 0 })));
            }
            other => panic!("unexpected call: {other:?}"),
        }

        let err = ctx
            .answer_cb_query(None, false, Extra::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Unavailable {
                operation: "answer_cb_query",
                ..
            }
        ));
        assert!(ctx.answer_shipping_query(true, Vec::new(), None).await.is_err());
        assert!(ctx.answer_pre_checkout_query(true, None).await.is_err());
    }

    #[tokio::test]
    async fn test_callback_answers() {
        let (ctx, recorder) = context(callback_on_message());

        ctx.answer_cb_query(Some("done".into()), true, Extra::new())
            .await
            .unwrap();
        ctx.answer_game_query("https://example.com/game").await.unwrap();

        let calls = recorder.calls();
        assert!(matches!(
            &calls[0],
            ApiCall::AnswerCallbackQuery { callback_query_id, text: Some(text), show_alert: true, .. }
                if callback_query_id == "cb-1" && text == "done"
        ));
        assert!(matches!(
            &calls[1],
            ApiCall::AnswerGameQuery { callback_query_id, url }
                if callback_query_id == "cb-1" && url == "https://example.com/game"
        ));
        assert_eq!(calls[1].method(), "answerCallbackQuery");
    }

    #[tokio::test]
    async fn test_payment_queries() {
        let (ctx, recorder) = context(json!({
            "pre_checkout_query": {
                "id": "pc-1",
                "from": { "id": 4 },
                "currency": "EUR",
                "total_amount": 500,
                "invoice_payload": "order-1"
            }
        }));
        ctx.answer_pre_checkout_query(false, Some("sold out".into()))
            .await
            .unwrap();
        assert!(matches!(
            &recorder.calls()[0],
            ApiCall::AnswerPreCheckoutQuery { pre_checkout_query_id, ok: false, error_message: Some(m) }
                if pre_checkout_query_id == "pc-1" && m == "sold out"
        ));

        let (ctx, recorder) = context(json!({
            "shipping_query": { "id": "sq-1", "from": { "id": 4 }, "invoice_payload": "order-1" }
        }));
        ctx.answer_shipping_query(true, Vec::new(), None).await.unwrap();
        assert!(matches!(
            &recorder.calls()[0],
            ApiCall::AnswerShippingQuery { shipping_query_id, ok: true, .. } if shipping_query_id == "sq-1"
        ));
    }

    #[tokio::test]
    async fn test_edit_targets_callback_message() {
        let (ctx, recorder) = context(callback_on_message());

        ctx.edit_message_text("updated", Extra::new()).await.unwrap();
        ctx.edit_message_reply_markup(None).await.unwrap();

        for call in recorder.calls() {
            let target = match call {
                ApiCall::EditMessageText { target, .. }
                | ApiCall::EditMessageReplyMarkup { target, .. } => target,
                other => panic!("unexpected call: {other:?}"),
            };
            assert_eq!(
                target,
                MessageTarget::Chat {
                    chat_id: ChatId(40),
                    message_id: MessageId(77)
                }
            );
        }
    }

    #[tokio::test]
    async fn test_edit_prefers_inline_message_id() {
        let (ctx, recorder) = context(json!({
            "chosen_inline_result": {
                "result_id": "r",
                "from": { "id": 2 },
                "inline_message_id": "inline-9"
            }
        }));

        ctx.edit_message_caption(Some("c".into()), Extra::new())
            .await
            .unwrap();
        ctx.edit_message_live_location(1.5, 2.5, Extra::new())
            .await
            .unwrap();
        ctx.stop_message_live_location(Extra::new()).await.unwrap();

        let calls = recorder.calls();
        assert_eq!(calls.len(), 3);
        let inline = MessageTarget::Inline {
            inline_message_id: "inline-9".into(),
        };
        assert!(matches!(&calls[0], ApiCall::EditMessageCaption { target, .. } if *target == inline));
        assert!(matches!(
            &calls[1],
            ApiCall::EditMessageLiveLocation { target, latitude, longitude, .. }
                if *target == inline && *latitude == 1.5 && *longitude == 2.5
        ));
        assert!(matches!(&calls[2], ApiCall::StopMessageLiveLocation { target, .. } if *target == inline));
    }

    #[tokio::test]
    async fn test_edit_without_target_fails_before_delegating() {
        let (ctx, recorder) = context(text_message());

        let err = ctx.edit_message_text("x", Extra::new()).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Unavailable {
                operation: "edit_message_text",
                ..
            }
        ));
        assert!(recorder.calls().is_empty());

        // A chosen inline result without an inline message id has nothing to edit.
        let (ctx, recorder) = context(json!({
            "chosen_inline_result": { "result_id": "r", "from": { "id": 2 } }
        }));
        let err = ctx.edit_message_reply_markup(None).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Unavailable {
                operation: "edit_message_reply_markup",
                ..
            }
        ));
        assert!(recorder.calls().is_empty());
    }

    #[tokio::test]
    async fn test_sender_scoped_calls_use_resolved_sender() {
        let (ctx, recorder) = context(inline_query());

        ctx.upload_sticker_file(
            InputFile::memory(b"sticker".as_slice()),
            extra(json!({ "sticker_format": "static" })),
        )
        .await
        .unwrap();
        ctx.set_passport_data_errors(Vec::new()).await.unwrap();

        let calls = recorder.calls();
        assert!(matches!(calls[0], ApiCall::UploadStickerFile { user_id: UserId(3), .. }));
        assert!(matches!(calls[1], ApiCall::SetPassportDataErrors { user_id: UserId(3), .. }));
    }

    #[tokio::test]
    async fn test_sender_scoped_calls_fail_without_sender() {
        let (ctx, recorder) = context(json!({
            "channel_post": { "message_id": 1, "chat": { "id": -100 }, "text": "news" }
        }));

        let err = ctx
            .create_new_sticker_set("set_by_bot", "Set", Vec::new(), Extra::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Unavailable {
                operation: "create_new_sticker_set",
                ..
            }
        ));
        // The channel itself still resolves as the chat.
        ctx.reply_with_chat_action(ChatAction::Typing).await.unwrap();
        assert!(matches!(
            recorder.calls()[0],
            ApiCall::SendChatAction {
                chat_id: ChatId(-100),
                action: ChatAction::Typing
            }
        ));
    }

    #[tokio::test]
    async fn test_pass_through_calls_need_nothing() {
        let (ctx, recorder) = context(json!({ "poll": { "id": "p-1", "question": "?" } }));

        ctx.get_sticker_set("animals").await.unwrap();
        ctx.set_sticker_position_in_set("sticker-1", 2).await.unwrap();
        ctx.delete_sticker_from_set("sticker-2").await.unwrap();
        ctx.get_my_commands(Extra::new()).await.unwrap();
        ctx.set_my_commands(Vec::new(), Extra::new()).await.unwrap();
        ctx.set_sticker_set_thumbnail("animals", UserId(1), Extra::new())
            .await
            .unwrap();

        let methods: Vec<_> = recorder.calls().iter().map(ApiCall::method).collect();
        assert_eq!(
            methods,
            vec![
                "getStickerSet",
                "setStickerPositionInSet",
                "deleteStickerFromSet",
                "getMyCommands",
                "setMyCommands",
                "setStickerSetThumbnail",
            ]
        );
        assert!(ctx.get_chat().await.is_err());
    }

    #[tokio::test]
    async fn test_chat_scoped_family() {
        let (ctx, recorder) = context(text_message());

        ctx.ban_chat_member(UserId(11), Extra::new()).await.unwrap();
        ctx.set_chat_title("Room").await.unwrap();
        ctx.pin_chat_message(MessageId(10), Extra::new()).await.unwrap();
        ctx.reply_with_poll("Lunch?", vec!["yes".into(), "no".into()], Extra::new())
            .await
            .unwrap();
        ctx.reply_with_quiz("2+2?", vec!["4".into(), "5".into()], 0, Extra::new())
            .await
            .unwrap();
        ctx.reply_with_location(1.0, 2.0, Extra::new()).await.unwrap();
        ctx.leave_chat().await.unwrap();

        let calls = recorder.calls();
        assert!(matches!(
            calls[0],
            ApiCall::BanChatMember {
                chat_id: ChatId(5),
                user_id: UserId(11),
                ..
            }
        ));
        assert!(matches!(&calls[1], ApiCall::SetChatTitle { chat_id: ChatId(5), title } if title == "Room"));
        assert!(matches!(
            calls[2],
            ApiCall::PinChatMessage {
                chat_id: ChatId(5),
                message_id: MessageId(10),
                ..
            }
        ));
        assert!(matches!(&calls[3], ApiCall::SendPoll { options, .. } if options.len() == 2));
        assert!(matches!(calls[4], ApiCall::SendQuiz { correct_option_id: 0, .. }));
        assert_eq!(calls[4].method(), "sendPoll");
        assert!(matches!(calls[5], ApiCall::SendLocation { chat_id: ChatId(5), .. }));
        assert!(matches!(calls[6], ApiCall::LeaveChat { chat_id: ChatId(5) }));
    }

    #[tokio::test]
    async fn test_invoker_errors_pass_through() {
        let recorder = Arc::new(Recorder::failing("Bad Request: chat not found"));
        let update: Update = serde_json::from_value(text_message()).unwrap();
        let ctx = Context::new(update, recorder.clone(), ContextOptions::default()).unwrap();

        let err = ctx.reply("hi", Extra::new()).await.unwrap_err();
        match err {
            Error::Api(ApiError::Message { message }) => {
                assert_eq!(message, "Bad Request: chat not found");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(recorder.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_dispatch_from_clones() {
        let (ctx, recorder) = context_with(text_message(), ContextOptions::default());
        let reply = {
            let ctx = ctx.clone();
            move |text: &'static str| {
                let ctx = ctx.clone();
                async move { ctx.reply(text, Extra::new()).await }
            }
        };

        let (a, b) = tokio::join!(reply("one"), reply("two"));
        a.unwrap();
        b.unwrap();

        let texts: Vec<_> = recorder
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                ApiCall::SendMessage { text, .. } => Some(text),
                _ => None,
            })
            .collect();
        assert_eq!(texts.len(), 2);
        assert!(texts.contains(&"one".to_string()));
        assert!(texts.contains(&"two".to_string()));
    }

    #[tokio::test]
    async fn test_available_methods_match_dispatch_outcome() {
        let (ctx, _) = context(callback_on_message());

        assert!(ctx.supports("reply"));
        assert!(ctx.reply("x", Extra::new()).await.is_ok());
        assert!(!ctx.supports("forward_message"));
        assert!(ctx.forward_message(ChatId(1), Extra::new()).await.is_err());
        assert!(ctx.supports("edit_message_media"));
    }
}
