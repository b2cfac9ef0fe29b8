//! Webhook registration commands.

use std::borrow::Cow;

use serde::Serialize;
use uuid::Uuid;

use crate::enums::{HookType, RequestType};
use crate::methods::Method;

/// Registers a webhook for a line or for the bot.
#[derive(Debug, Clone, Serialize)]
pub struct SetHook {
    /// Address updates will be POSTed to.
    pub url: String,
    /// Hook kind.
    #[serde(rename = "type")]
    pub hook_type: HookType,
    /// Line id; defaults to the bot's line when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
}

impl SetHook {
    /// A hook of `hook_type` pointing at `url`.
    pub fn new(url: impl Into<String>, hook_type: HookType) -> Self {
        Self { url: url.into(), hook_type, id: None }
    }
}

impl Method for SetHook {
    type Reply = bool;
    const NAME: &'static str = "SetHook";

    fn request_type(&self) -> RequestType {
        RequestType::Post
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed("/v1/hook/")
    }
}

/// Removes every registered webhook.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DelAllHook {}

impl Method for DelAllHook {
    type Reply = bool;
    const NAME: &'static str = "DelAllHook";

    fn request_type(&self) -> RequestType {
        RequestType::Delete
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed("/v1/hook/")
    }
}

/// Removes one webhook by kind and object id.
#[derive(Debug, Clone, Serialize)]
pub struct DelHook {
    /// Hook kind.
    #[serde(skip)]
    pub hook_type: HookType,
    /// Object the hook was registered for.
    #[serde(skip)]
    pub id: Uuid,
}

impl Method for DelHook {
    type Reply = bool;
    const NAME: &'static str = "DelHook";

    fn request_type(&self) -> RequestType {
        RequestType::Delete
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Owned(format!("/v1/hook/{}/{}/", self.hook_type.as_str(), self.id))
    }
}
