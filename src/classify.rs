use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::config::ContextOptions;
use crate::error::{Error, Result};
use crate::taxonomy::{UpdateSubType, UpdateType};
use crate::update::{Message, Update};

/// Kind and content sub-kinds of one update. Fixed for the life of a context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub update_type: UpdateType,
    pub update_sub_types: Vec<UpdateSubType>,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::", self.update_type)?;
        for (i, sub_type) in self.update_sub_types.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", sub_type)?;
        }
        Ok(())
    }
}

/// Whether the update carries the field for `kind`.
pub fn is_present(update: &Update, kind: UpdateType) -> bool {
    match kind {
        UpdateType::Message => update.message.is_some(),
        UpdateType::EditedMessage => update.edited_message.is_some(),
        UpdateType::ChannelPost => update.channel_post.is_some(),
        UpdateType::EditedChannelPost => update.edited_channel_post.is_some(),
        UpdateType::CallbackQuery => update.callback_query.is_some(),
        UpdateType::InlineQuery => update.inline_query.is_some(),
        UpdateType::ChosenInlineResult => update.chosen_inline_result.is_some(),
        UpdateType::ShippingQuery => update.shipping_query.is_some(),
        UpdateType::PreCheckoutQuery => update.pre_checkout_query.is_some(),
        UpdateType::Poll => update.poll.is_some(),
        UpdateType::PollAnswer => update.poll_answer.is_some(),
    }
}

/// Sub-types present on `message`, in declaration order.
pub fn sub_types(message: &Message) -> Vec<UpdateSubType> {
    UpdateSubType::ALL
        .into_iter()
        .filter(|sub_type| message.has_field(sub_type.field()))
        .collect()
}

pub fn classify(update: &Update, options: &ContextOptions) -> Result<Classification> {
    let update_type = UpdateType::ALL
        .into_iter()
        .find(|kind| is_present(update, *kind))
        .ok_or(Error::UnknownUpdate {
            update_id: update.update_id,
        })?;

    let content = match update_type {
        UpdateType::Message => update.message.as_ref(),
        UpdateType::ChannelPost if options.channel_mode => update.channel_post.as_ref(),
        _ => None,
    };
    let update_sub_types = content.map(sub_types).unwrap_or_default();

    debug!(
        update_id = update.update_id,
        %update_type,
        sub_types = ?update_sub_types,
        "classified update"
    );

    Ok(Classification {
        update_type,
        update_sub_types,
    })
}
