//! Commands acting on support-line conversations.

use std::borrow::Cow;

use serde::Serialize;
use uuid::Uuid;

use crate::enums::RequestType;
use crate::methods::Method;
use crate::types::{Button, InputFile};

/// Asks the platform to appoint a specialist to the conversation.
#[derive(Debug, Clone, Serialize)]
pub struct AppointStart {
    /// Support line id.
    pub line_id: Uuid,
    /// User id.
    pub user_id: Uuid,
}

impl Method for AppointStart {
    type Reply = bool;
    const NAME: &'static str = "AppointStart";

    fn request_type(&self) -> RequestType {
        RequestType::Post
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed("/v1/line/appoint/start/")
    }
}

/// Appoints a specific specialist to the conversation.
#[derive(Debug, Clone, Serialize)]
pub struct AppointSpec {
    /// Support line id.
    pub line_id: Uuid,
    /// User id.
    pub user_id: Uuid,
    /// Specialist to appoint.
    pub spec_id: Uuid,
    /// Specialist performing the appointment, when different.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<Uuid>,
}

impl AppointSpec {
    /// Appoints `spec_id` to the conversation of `user_id` on `line_id`.
    pub fn new(line_id: Uuid, user_id: Uuid, spec_id: Uuid) -> Self {
        Self { line_id, user_id, spec_id, author_id: None }
    }
}

impl Method for AppointSpec {
    type Reply = bool;
    const NAME: &'static str = "AppointSpec";

    fn request_type(&self) -> RequestType {
        RequestType::Post
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed("/v1/line/appoint/spec/")
    }
}

/// Closes the open conversation.
#[derive(Debug, Clone, Serialize)]
pub struct DropTreatment {
    /// Support line id.
    pub line_id: Uuid,
    /// User id.
    pub user_id: Uuid,
    /// Specialist closing the conversation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<Uuid>,
}

impl Method for DropTreatment {
    type Reply = bool;
    const NAME: &'static str = "DropTreatment";

    fn request_type(&self) -> RequestType {
        RequestType::Post
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed("/v1/line/drop/treatment/")
    }
}

/// Sends a text message into the conversation, optionally with a keyboard.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageLine {
    /// Support line id.
    pub line_id: Uuid,
    /// User id.
    pub user_id: Uuid,
    /// Specialist the message is sent on behalf of.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<Uuid>,
    /// Message text.
    pub text: String,
    /// Send as the bot without expecting an answer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot_as_spec: Option<bool>,
    /// Informational message: no appointment, no new treatment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_only: Option<bool>,
    /// Button rows shown under the message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyboard: Option<Vec<Vec<Button>>>,
}

impl SendMessageLine {
    /// A plain text message to `user_id` on `line_id`.
    pub fn new(line_id: Uuid, user_id: Uuid, text: impl Into<String>) -> Self {
        Self {
            line_id,
            user_id,
            author_id: None,
            text: text.into(),
            bot_as_spec: None,
            notification_only: None,
            keyboard: None,
        }
    }

    /// Attaches a keyboard.
    pub fn with_keyboard(mut self, keyboard: Vec<Vec<Button>>) -> Self {
        self.keyboard = Some(keyboard);
        self
    }
}

impl Method for SendMessageLine {
    type Reply = bool;
    const NAME: &'static str = "SendMessageLine";

    fn request_type(&self) -> RequestType {
        RequestType::Post
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed("/v1/line/send/message/")
    }
}

/// Sends a file into the conversation.
#[derive(Debug, Clone, Serialize)]
pub struct SendFileLine {
    /// Support line id.
    pub line_id: Uuid,
    /// User id.
    pub user_id: Uuid,
    /// Specialist the file is sent on behalf of.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<Uuid>,
    /// Name the file is stored under.
    pub file_name: String,
    /// Comment shown with the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Send as the bot without expecting an answer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot_as_spec: Option<bool>,
    /// Informational message: no appointment, no new treatment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_only: Option<bool>,
    /// The file itself; travels as a multipart field, not in the JSON meta.
    #[serde(skip)]
    pub file: InputFile,
}

impl SendFileLine {
    /// Sends `file` as `file_name` to `user_id` on `line_id`.
    pub fn new(line_id: Uuid, user_id: Uuid, file_name: impl Into<String>, file: InputFile) -> Self {
        Self {
            line_id,
            user_id,
            author_id: None,
            file_name: file_name.into(),
            comment: None,
            bot_as_spec: None,
            notification_only: None,
            file,
        }
    }
}

impl Method for SendFileLine {
    type Reply = bool;
    const NAME: &'static str = "SendFileLine";

    fn request_type(&self) -> RequestType {
        RequestType::PostWithAttach
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed("/v1/line/send/file/")
    }

    fn files(&self) -> Vec<InputFile> {
        vec![self.file.clone()]
    }
}

/// Sends an image into the conversation; rendered inline by clients.
#[derive(Debug, Clone, Serialize)]
pub struct SendImageLine {
    /// Support line id.
    pub line_id: Uuid,
    /// User id.
    pub user_id: Uuid,
    /// Specialist the image is sent on behalf of.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<Uuid>,
    /// Name the image is stored under.
    pub file_name: String,
    /// Comment shown with the image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Send as the bot without expecting an answer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot_as_spec: Option<bool>,
    /// Informational message: no appointment, no new treatment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_only: Option<bool>,
    /// The image itself; travels as a multipart field, not in the JSON meta.
    #[serde(skip)]
    pub file: InputFile,
}

impl SendImageLine {
    /// Sends `file` as `file_name` to `user_id` on `line_id`.
    pub fn new(line_id: Uuid, user_id: Uuid, file_name: impl Into<String>, file: InputFile) -> Self {
        Self {
            line_id,
            user_id,
            author_id: None,
            file_name: file_name.into(),
            comment: None,
            bot_as_spec: None,
            notification_only: None,
            file,
        }
    }
}

impl Method for SendImageLine {
    type Reply = bool;
    const NAME: &'static str = "SendImageLine";

    fn request_type(&self) -> RequestType {
        RequestType::PostWithAttach
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed("/v1/line/send/image/")
    }

    fn files(&self) -> Vec<InputFile> {
        vec![self.file.clone()]
    }
}

/// Removes the keyboard previously sent to the conversation.
#[derive(Debug, Clone, Serialize)]
pub struct DropKeyboard {
    /// Support line id.
    pub line_id: Uuid,
    /// User id.
    pub user_id: Uuid,
}

impl Method for DropKeyboard {
    type Reply = bool;
    const NAME: &'static str = "DropKeyboard";

    fn request_type(&self) -> RequestType {
        RequestType::Post
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed("/v1/line/drop/keyboard/")
    }
}
