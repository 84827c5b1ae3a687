use std::fmt;

use serde::{Serialize, Serializer};

/// Top-level kind of an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateType {
    Message,
    EditedMessage,
    ChannelPost,
    EditedChannelPost,
    CallbackQuery,
    InlineQuery,
    ChosenInlineResult,
    ShippingQuery,
    PreCheckoutQuery,
    Poll,
    PollAnswer,
}

impl UpdateType {
    /// Declaration order. Classification takes the first present kind, so this
    /// order also breaks ties on malformed updates.
    pub const ALL: [UpdateType; 11] = [
        UpdateType::Message,
        UpdateType::EditedMessage,
        UpdateType::ChannelPost,
        UpdateType::EditedChannelPost,
        UpdateType::CallbackQuery,
        UpdateType::InlineQuery,
        UpdateType::ChosenInlineResult,
        UpdateType::ShippingQuery,
        UpdateType::PreCheckoutQuery,
        UpdateType::Poll,
        UpdateType::PollAnswer,
    ];

    /// Field name of this kind on the raw update.
    pub fn as_str(self) -> &'static str {
        match self {
            UpdateType::Message => "message",
            UpdateType::EditedMessage => "edited_message",
            UpdateType::ChannelPost => "channel_post",
            UpdateType::EditedChannelPost => "edited_channel_post",
            UpdateType::CallbackQuery => "callback_query",
            UpdateType::InlineQuery => "inline_query",
            UpdateType::ChosenInlineResult => "chosen_inline_result",
            UpdateType::ShippingQuery => "shipping_query",
            UpdateType::PreCheckoutQuery => "pre_checkout_query",
            UpdateType::Poll => "poll",
            UpdateType::PollAnswer => "poll_answer",
        }
    }
}

impl fmt::Display for UpdateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for UpdateType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Content kind of a message-like update. Several can be present at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateSubType {
    Voice,
    VideoNote,
    Video,
    Animation,
    Venue,
    Text,
    SupergroupChatCreated,
    SuccessfulPayment,
    Sticker,
    PinnedMessage,
    Photo,
    NewChatTitle,
    NewChatPhoto,
    NewChatMembers,
    MigrateToChatId,
    MigrateFromChatId,
    Location,
    LeftChatMember,
    Invoice,
    GroupChatCreated,
    Game,
    Dice,
    Document,
    DeleteChatPhoto,
    Contact,
    ChannelChatCreated,
    Audio,
    ConnectedWebsite,
    PassportData,
    Poll,
    Forward,
}

/// Raw message fields reported under a different label.
pub const SUB_TYPE_RENAMES: &[(&str, &str)] = &[("forward_date", "forward")];

impl UpdateSubType {
    /// Declaration order; reported sub-types always follow it.
    pub const ALL: [UpdateSubType; 31] = [
        UpdateSubType::Voice,
        UpdateSubType::VideoNote,
        UpdateSubType::Video,
        UpdateSubType::Animation,
        UpdateSubType::Venue,
        UpdateSubType::Text,
        UpdateSubType::SupergroupChatCreated,
        UpdateSubType::SuccessfulPayment,
        UpdateSubType::Sticker,
        UpdateSubType::PinnedMessage,
        UpdateSubType::Photo,
        UpdateSubType::NewChatTitle,
        UpdateSubType::NewChatPhoto,
        UpdateSubType::NewChatMembers,
        UpdateSubType::MigrateToChatId,
        UpdateSubType::MigrateFromChatId,
        UpdateSubType::Location,
        UpdateSubType::LeftChatMember,
        UpdateSubType::Invoice,
        UpdateSubType::GroupChatCreated,
        UpdateSubType::Game,
        UpdateSubType::Dice,
        UpdateSubType::Document,
        UpdateSubType::DeleteChatPhoto,
        UpdateSubType::Contact,
        UpdateSubType::ChannelChatCreated,
        UpdateSubType::Audio,
        UpdateSubType::ConnectedWebsite,
        UpdateSubType::PassportData,
        UpdateSubType::Poll,
        UpdateSubType::Forward,
    ];

    /// Field whose presence on the message marks this sub-type.
    pub fn field(self) -> &'static str {
        match self {
            UpdateSubType::Voice => "voice",
            UpdateSubType::VideoNote => "video_note",
            UpdateSubType::Video => "video",
            UpdateSubType::Animation => "animation",
            UpdateSubType::Venue => "venue",
            UpdateSubType::Text => "text",
            UpdateSubType::SupergroupChatCreated => "supergroup_chat_created",
            UpdateSubType::SuccessfulPayment => "successful_payment",
            UpdateSubType::Sticker => "sticker",
            UpdateSubType::PinnedMessage => "pinned_message",
            UpdateSubType::Photo => "photo",
            UpdateSubType::NewChatTitle => "new_chat_title",
            UpdateSubType::NewChatPhoto => "new_chat_photo",
            UpdateSubType::NewChatMembers => "new_chat_members",
            UpdateSubType::MigrateToChatId => "migrate_to_chat_id",
            UpdateSubType::MigrateFromChatId => "migrate_from_chat_id",
            UpdateSubType::Location => "location",
            UpdateSubType::LeftChatMember => "left_chat_member",
            UpdateSubType::Invoice => "invoice",
            UpdateSubType::GroupChatCreated => "group_chat_created",
            UpdateSubType::Game => "game",
            UpdateSubType::Dice => "dice",
            UpdateSubType::Document => "document",
            UpdateSubType::DeleteChatPhoto => "delete_chat_photo",
            UpdateSubType::Contact => "contact",
            UpdateSubType::ChannelChatCreated => "channel_chat_created",
            UpdateSubType::Audio => "audio",
            UpdateSubType::ConnectedWebsite => "connected_website",
            UpdateSubType::PassportData => "passport_data",
            UpdateSubType::Poll => "poll",
            UpdateSubType::Forward => "forward_date",
        }
    }

    /// User-facing label: the field name, unless the rename table maps it.
    pub fn label(self) -> &'static str {
        let field = self.field();
        SUB_TYPE_RENAMES
            .iter()
            .find(|(raw, _)| *raw == field)
            .map(|(_, label)| *label)
            .unwrap_or(field)
    }
}

impl fmt::Display for UpdateSubType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for UpdateSubType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
