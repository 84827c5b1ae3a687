//! Dispatch table: facade method → Bot API operation → what the context
//! injects. Collaborators match on these method names.

use Requirement::*;

/// Contextual value a facade method must resolve before delegating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Passed straight through.
    Nothing,
    /// The resolved chat id.
    Chat,
    /// The resolved sender id.
    Sender,
    /// The update's own `message` (its chat and message id).
    Message,
    InlineQuery,
    CallbackQuery,
    ShippingQuery,
    PreCheckoutQuery,
    /// An inline message id, or the callback query's message.
    EditTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub method: &'static str,
    pub operation: &'static str,
    pub requires: Requirement,
}

const fn route(method: &'static str, operation: &'static str, requires: Requirement) -> Route {
    Route {
        method,
        operation,
        requires,
    }
}

pub const ROUTES: &[Route] = &[
    route("answer_inline_query", "answerInlineQuery", InlineQuery),
    route("answer_cb_query", "answerCallbackQuery", CallbackQuery),
    route("answer_game_query", "answerCallbackQuery", CallbackQuery),
    route("answer_shipping_query", "answerShippingQuery", ShippingQuery),
    route("answer_pre_checkout_query", "answerPreCheckoutQuery", PreCheckoutQuery),
    route("edit_message_text", "editMessageText", EditTarget),
    route("edit_message_caption", "editMessageCaption", EditTarget),
    route("edit_message_media", "editMessageMedia", EditTarget),
    route("edit_message_reply_markup", "editMessageReplyMarkup", EditTarget),
    route("edit_message_live_location", "editMessageLiveLocation", EditTarget),
    route("stop_message_live_location", "stopMessageLiveLocation", EditTarget),
    route("reply", "sendMessage", Chat),
    route("reply_with_markdown", "sendMessage", Chat),
    route("reply_with_markdown_v2", "sendMessage", Chat),
    route("reply_with_html", "sendMessage", Chat),
    route("get_chat", "getChat", Chat),
    route("export_chat_invite_link", "exportChatInviteLink", Chat),
    route("ban_chat_member", "banChatMember", Chat),
    route("unban_chat_member", "unbanChatMember", Chat),
    route("restrict_chat_member", "restrictChatMember", Chat),
    route("promote_chat_member", "promoteChatMember", Chat),
    route(
        "set_chat_administrator_custom_title",
        "setChatAdministratorCustomTitle",
        Chat,
    ),
    route("set_chat_photo", "setChatPhoto", Chat),
    route("delete_chat_photo", "deleteChatPhoto", Chat),
    route("set_chat_title", "setChatTitle", Chat),
    route("set_chat_description", "setChatDescription", Chat),
    route("pin_chat_message", "pinChatMessage", Chat),
    route("unpin_chat_message", "unpinChatMessage", Chat),
    route("unpin_all_chat_messages", "unpinAllChatMessages", Chat),
    route("leave_chat", "leaveChat", Chat),
    route("set_chat_permissions", "setChatPermissions", Chat),
    route("get_chat_administrators", "getChatAdministrators", Chat),
    route("get_chat_member", "getChatMember", Chat),
    route("get_chat_member_count", "getChatMemberCount", Chat),
    route("set_chat_sticker_set", "setChatStickerSet", Chat),
    route("delete_chat_sticker_set", "deleteChatStickerSet", Chat),
    route("reply_with_photo", "sendPhoto", Chat),
    route("reply_with_media_group", "sendMediaGroup", Chat),
    route("reply_with_audio", "sendAudio", Chat),
    route("reply_with_dice", "sendDice", Chat),
    route("reply_with_document", "sendDocument", Chat),
    route("reply_with_sticker", "sendSticker", Chat),
    route("reply_with_video", "sendVideo", Chat),
    route("reply_with_animation", "sendAnimation", Chat),
    route("reply_with_video_note", "sendVideoNote", Chat),
    route("reply_with_voice", "sendVoice", Chat),
    route("reply_with_invoice", "sendInvoice", Chat),
    route("reply_with_game", "sendGame", Chat),
    route("reply_with_poll", "sendPoll", Chat),
    route("reply_with_quiz", "sendPoll", Chat),
    route("stop_poll", "stopPoll", Chat),
    route("reply_with_chat_action", "sendChatAction", Chat),
    route("reply_with_location", "sendLocation", Chat),
    route("reply_with_venue", "sendVenue", Chat),
    route("reply_with_contact", "sendContact", Chat),
    // Without an explicit id this also needs the update's own message.
    route("delete_message", "deleteMessage", Chat),
    route("forward_message", "forwardMessage", Message),
    route("copy_message", "copyMessage", Message),
    route("set_passport_data_errors", "setPassportDataErrors", Sender),
    route("upload_sticker_file", "uploadStickerFile", Sender),
    route("create_new_sticker_set", "createNewStickerSet", Sender),
    route("add_sticker_to_set", "addStickerToSet", Sender),
    route("get_sticker_set", "getStickerSet", Nothing),
    route("set_sticker_position_in_set", "setStickerPositionInSet", Nothing),
    route("set_sticker_set_thumbnail", "setStickerSetThumbnail", Nothing),
    route("delete_sticker_from_set", "deleteStickerFromSet", Nothing),
    route("get_my_commands", "getMyCommands", Nothing),
    route("set_my_commands", "setMyCommands", Nothing),
];

pub fn find(method: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|route| route.method == method)
}
