//! Messages into group conferences.

use std::borrow::Cow;

use serde::Serialize;
use uuid::Uuid;

use crate::enums::RequestType;
use crate::methods::Method;
use crate::types::InputFile;

/// Sends a text message into a conference.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageConference {
    /// Conference id.
    pub conference_id: Uuid,
    /// Sending specialist.
    pub author_id: Uuid,
    /// Message text.
    pub text: String,
}

impl Method for SendMessageConference {
    type Reply = bool;
    const NAME: &'static str = "SendMessageConference";

    fn request_type(&self) -> RequestType {
        RequestType::Post
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed("/v1/conference/send/message/")
    }
}

/// Sends a file into a conference.
#[derive(Debug, Clone, Serialize)]
pub struct SendFileConference {
    /// Conference id.
    pub conference_id: Uuid,
    /// Sending specialist.
    pub author_id: Uuid,
    /// Name the file is stored under.
    pub file_name: String,
    /// Comment shown with the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// The file itself; travels as a multipart field, not in the JSON meta.
    #[serde(skip)]
    pub file: InputFile,
}

impl Method for SendFileConference {
    type Reply = bool;
    const NAME: &'static str = "SendFileConference";

    fn request_type(&self) -> RequestType {
        RequestType::PostWithAttach
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed("/v1/conference/send/file/")
    }

    fn files(&self) -> Vec<InputFile> {
        vec![self.file.clone()]
    }
}

/// Sends an image into a conference.
#[derive(Debug, Clone, Serialize)]
pub struct SendImageConference {
    /// Conference id.
    pub conference_id: Uuid,
    /// Sending specialist.
    pub author_id: Uuid,
    /// Name the image is stored under.
    pub file_name: String,
    /// Comment shown with the image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// The image itself; travels as a multipart field, not in the JSON meta.
    #[serde(skip)]
    pub file: InputFile,
}

impl Method for SendImageConference {
    type Reply = bool;
    const NAME: &'static str = "SendImageConference";

    fn request_type(&self) -> RequestType {
        RequestType::PostWithAttach
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed("/v1/conference/send/image/")
    }

    fn files(&self) -> Vec<InputFile> {
        vec![self.file.clone()]
    }
}
