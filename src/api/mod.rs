//! Outbound seam.
//!
//! The context never talks to the network itself. Every outbound operation is
//! described by an [`ApiCall`] and handed to a [`Telegram`] implementation,
//! which owns serialization, retries and transport errors.

pub mod dry_run;

use async_trait::async_trait;
use serde_json::{Map, Value};
use teloxide::types::{
    BotCommand, ChatAction, ChatId, ChatPermissions, InlineKeyboardMarkup, InlineQueryResult,
    InputFile, InputMedia, InputSticker, LabeledPrice, MessageId, PassportElementError,
    ShippingOption, UserId,
};

use crate::error::ApiResult;

pub use dry_run::DryRun;

/// Optional Bot API parameters, passed through untouched.
pub type Extra = Map<String, Value>;

/// The outbound invoker.
#[async_trait]
pub trait Telegram: Send + Sync {
    /// Perform `call` and return the `result` field of the Bot API response.
    async fn invoke(&self, call: ApiCall) -> ApiResult<Value>;
}

/// Addressing for the edit family: a message in a chat, or a message sent
/// via inline mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageTarget {
    Chat {
        chat_id: ChatId,
        message_id: MessageId,
    },
    Inline {
        inline_message_id: String,
    },
}

/// One outbound operation. Injected identifiers come first, followed by the
/// caller's own arguments.
#[derive(Debug, Clone)]
pub enum ApiCall {
    AnswerInlineQuery {
        inline_query_id: String,
        results: Vec<InlineQueryResult>,
        extra: Extra,
    },
    AnswerCallbackQuery {
        callback_query_id: String,
        text: Option<String>,
        show_alert: bool,
        extra: Extra,
    },
    AnswerGameQuery {
        callback_query_id: String,
        url: String,
    },
    AnswerShippingQuery {
        shipping_query_id: String,
        ok: bool,
        shipping_options: Vec<ShippingOption>,
        error_message: Option<String>,
    },
    AnswerPreCheckoutQuery {
        pre_checkout_query_id: String,
        ok: bool,
        error_message: Option<String>,
    },

    EditMessageText {
        target: MessageTarget,
        text: String,
        extra: Extra,
    },
    EditMessageCaption {
        target: MessageTarget,
        caption: Option<String>,
        extra: Extra,
    },
    EditMessageMedia {
        target: MessageTarget,
        media: InputMedia,
        extra: Extra,
    },
    EditMessageReplyMarkup {
        target: MessageTarget,
        reply_markup: Option<InlineKeyboardMarkup>,
    },
    EditMessageLiveLocation {
        target: MessageTarget,
        latitude: f64,
        longitude: f64,
        extra: Extra,
    },
    StopMessageLiveLocation {
        target: MessageTarget,
        extra: Extra,
    },

    SendMessage {
        chat_id: ChatId,
        text: String,
        extra: Extra,
    },
    GetChat {
        chat_id: ChatId,
    },
    ExportChatInviteLink {
        chat_id: ChatId,
    },
    BanChatMember {
        chat_id: ChatId,
        user_id: UserId,
        extra: Extra,
    },
    UnbanChatMember {
        chat_id: ChatId,
        user_id: UserId,
        extra: Extra,
    },
    RestrictChatMember {
        chat_id: ChatId,
        user_id: UserId,
        permissions: ChatPermissions,
        extra: Extra,
    },
    PromoteChatMember {
        chat_id: ChatId,
        user_id: UserId,
        extra: Extra,
    },
    SetChatAdministratorCustomTitle {
        chat_id: ChatId,
        user_id: UserId,
        custom_title: String,
    },
    SetChatPhoto {
        chat_id: ChatId,
        photo: InputFile,
    },
    DeleteChatPhoto {
        chat_id: ChatId,
    },
    SetChatTitle {
        chat_id: ChatId,
        title: String,
    },
    SetChatDescription {
        chat_id: ChatId,
        description: Option<String>,
    },
    PinChatMessage {
        chat_id: ChatId,
        message_id: MessageId,
        extra: Extra,
    },
    UnpinChatMessage {
        chat_id: ChatId,
        message_id: Option<MessageId>,
    },
    UnpinAllChatMessages {
        chat_id: ChatId,
    },
    LeaveChat {
        chat_id: ChatId,
    },
    SetChatPermissions {
        chat_id: ChatId,
        permissions: ChatPermissions,
    },
    GetChatAdministrators {
        chat_id: ChatId,
    },
    GetChatMember {
        chat_id: ChatId,
        user_id: UserId,
    },
    GetChatMemberCount {
        chat_id: ChatId,
    },
    SetChatStickerSet {
        chat_id: ChatId,
        sticker_set_name: String,
    },
    DeleteChatStickerSet {
        chat_id: ChatId,
    },
    SendPhoto {
        chat_id: ChatId,
        photo: InputFile,
        extra: Extra,
    },
    SendMediaGroup {
        chat_id: ChatId,
        media: Vec<InputMedia>,
        extra: Extra,
    },
    SendAudio {
        chat_id: ChatId,
        audio: InputFile,
        extra: Extra,
    },
    SendDice {
        chat_id: ChatId,
        extra: Extra,
    },
    SendDocument {
        chat_id: ChatId,
        document: InputFile,
        extra: Extra,
    },
    SendSticker {
        chat_id: ChatId,
        sticker: InputFile,
        extra: Extra,
    },
    SendVideo {
        chat_id: ChatId,
        video: InputFile,
        extra: Extra,
    },
    SendAnimation {
        chat_id: ChatId,
        animation: InputFile,
        extra: Extra,
    },
    SendVideoNote {
        chat_id: ChatId,
        video_note: InputFile,
        extra: Extra,
    },
    SendVoice {
        chat_id: ChatId,
        voice: InputFile,
        extra: Extra,
    },
    SendInvoice {
        chat_id: ChatId,
        title: String,
        description: String,
        payload: String,
        currency: String,
        prices: Vec<LabeledPrice>,
        extra: Extra,
    },
    SendGame {
        chat_id: ChatId,
        game_short_name: String,
        extra: Extra,
    },
    SendPoll {
        chat_id: ChatId,
        question: String,
        options: Vec<String>,
        extra: Extra,
    },
    SendQuiz {
        chat_id: ChatId,
        question: String,
        options: Vec<String>,
        correct_option_id: u8,
        extra: Extra,
    },
    StopPoll {
        chat_id: ChatId,
        message_id: MessageId,
        extra: Extra,
    },
    SendChatAction {
        chat_id: ChatId,
        action: ChatAction,
    },
    SendLocation {
        chat_id: ChatId,
        latitude: f64,
        longitude: f64,
        extra: Extra,
    },
    SendVenue {
        chat_id: ChatId,
        latitude: f64,
        longitude: f64,
        title: String,
        address: String,
        extra: Extra,
    },
    SendContact {
        chat_id: ChatId,
        phone_number: String,
        first_name: String,
        extra: Extra,
    },
    DeleteMessage {
        chat_id: ChatId,
        message_id: MessageId,
    },
    ForwardMessage {
        chat_id: ChatId,
        from_chat_id: ChatId,
        message_id: MessageId,
        extra: Extra,
    },
    CopyMessage {
        chat_id: ChatId,
        from_chat_id: ChatId,
        message_id: MessageId,
        extra: Extra,
    },

    SetPassportDataErrors {
        user_id: UserId,
        errors: Vec<PassportElementError>,
    },
    UploadStickerFile {
        user_id: UserId,
        sticker: InputFile,
        extra: Extra,
    },
    CreateNewStickerSet {
        user_id: UserId,
        name: String,
        title: String,
        stickers: Vec<InputSticker>,
        extra: Extra,
    },
    AddStickerToSet {
        user_id: UserId,
        name: String,
        sticker: InputSticker,
    },

    GetStickerSet {
        name: String,
    },
    SetStickerPositionInSet {
        sticker: String,
        position: u32,
    },
    SetStickerSetThumbnail {
        name: String,
        user_id: UserId,
        extra: Extra,
    },
    DeleteStickerFromSet {
        sticker: String,
    },
    GetMyCommands {
        extra: Extra,
    },
    SetMyCommands {
        commands: Vec<BotCommand>,
        extra: Extra,
    },
}

impl ApiCall {
    /// Bot API method this call maps to.
    pub fn method(&self) -> &'static str {
        match self {
            ApiCall::AnswerInlineQuery { .. } => "answerInlineQuery",
            ApiCall::AnswerCallbackQuery { .. } | ApiCall::AnswerGameQuery { .. } => {
                "answerCallbackQuery"
            }
            ApiCall::AnswerShippingQuery { .. } => "answerShippingQuery",
            ApiCall::AnswerPreCheckoutQuery { .. } => "answerPreCheckoutQuery",
            ApiCall::EditMessageText { .. } => "editMessageText",
            ApiCall::EditMessageCaption { .. } => "editMessageCaption",
            ApiCall::EditMessageMedia { .. } => "editMessageMedia",
            ApiCall::EditMessageReplyMarkup { .. } => "editMessageReplyMarkup",
            ApiCall::EditMessageLiveLocation { .. } => "editMessageLiveLocation",
            ApiCall::StopMessageLiveLocation { .. } => "stopMessageLiveLocation",
            ApiCall::SendMessage { .. } => "sendMessage",
            ApiCall::GetChat { .. } => "getChat",
            ApiCall::ExportChatInviteLink { .. } => "exportChatInviteLink",
            ApiCall::BanChatMember { .. } => "banChatMember",
            ApiCall::UnbanChatMember { .. } => "unbanChatMember",
            ApiCall::RestrictChatMember { .. } => "restrictChatMember",
            ApiCall::PromoteChatMember { .. } => "promoteChatMember",
            ApiCall::SetChatAdministratorCustomTitle { .. } => "setChatAdministratorCustomTitle",
            ApiCall::SetChatPhoto { .. } => "setChatPhoto",
            ApiCall::DeleteChatPhoto { .. } => "deleteChatPhoto",
            ApiCall::SetChatTitle { .. } => "setChatTitle",
            ApiCall::SetChatDescription { .. } => "setChatDescription",
            ApiCall::PinChatMessage { .. } => "pinChatMessage",
            ApiCall::UnpinChatMessage { .. } => "unpinChatMessage",
            ApiCall::UnpinAllChatMessages { .. } => "unpinAllChatMessages",
            ApiCall::LeaveChat { .. } => "leaveChat",
            ApiCall::SetChatPermissions { .. } => "setChatPermissions",
            ApiCall::GetChatAdministrators { .. } => "getChatAdministrators",
            ApiCall::GetChatMember { .. } => "getChatMember",
            ApiCall::GetChatMemberCount { .. } => "getChatMemberCount",
            ApiCall::SetChatStickerSet { .. } => "setChatStickerSet",
            ApiCall::DeleteChatStickerSet { .. } => "deleteChatStickerSet",
            ApiCall::SendPhoto { .. } => "sendPhoto",
            ApiCall::SendMediaGroup { .. } => "sendMediaGroup",
            ApiCall::SendAudio { .. } => "sendAudio",
            ApiCall::SendDice { .. } => "sendDice",
            ApiCall::SendDocument { .. } => "sendDocument",
            ApiCall::SendSticker { .. } => "sendSticker",
            ApiCall::SendVideo { .. } => "sendVideo",
            ApiCall::SendAnimation { .. } => "sendAnimation",
            ApiCall::SendVideoNote { .. } => "sendVideoNote",
            ApiCall::SendVoice { .. } => "sendVoice",
            ApiCall::SendInvoice { .. } => "sendInvoice",
            ApiCall::SendGame { .. } => "sendGame",
            ApiCall::SendPoll { .. } | ApiCall::SendQuiz { .. } => "sendPoll",
            ApiCall::StopPoll { .. } => "stopPoll",
            ApiCall::SendChatAction { .. } => "sendChatAction",
            ApiCall::SendLocation { .. } => "sendLocation",
            ApiCall::SendVenue { .. } => "sendVenue",
            ApiCall::SendContact { .. } => "sendContact",
            ApiCall::DeleteMessage { .. } => "deleteMessage",
            ApiCall::ForwardMessage { .. } => "forwardMessage",
            ApiCall::CopyMessage { .. } => "copyMessage",
            ApiCall::SetPassportDataErrors { .. } => "setPassportDataErrors",
            ApiCall::UploadStickerFile { .. } => "uploadStickerFile",
            ApiCall::CreateNewStickerSet { .. } => "createNewStickerSet",
            ApiCall::AddStickerToSet { .. } => "addStickerToSet",
            ApiCall::GetStickerSet { .. } => "getStickerSet",
            ApiCall::SetStickerPositionInSet { .. } => "setStickerPositionInSet",
            ApiCall::SetStickerSetThumbnail { .. } => "setStickerSetThumbnail",
            ApiCall::DeleteStickerFromSet { .. } => "deleteStickerFromSet",
            ApiCall::GetMyCommands { .. } => "getMyCommands",
            ApiCall::SetMyCommands { .. } => "setMyCommands",
        }
    }
}
