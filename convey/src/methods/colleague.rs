//! Direct messages between colleagues.

use std::borrow::Cow;

use serde::Serialize;
use uuid::Uuid;

use crate::enums::RequestType;
use crate::methods::Method;
use crate::types::InputFile;

/// Sends a text message to a colleague.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageColleague {
    /// Receiving colleague.
    pub recepient_id: Uuid,
    /// Sending specialist.
    pub author_id: Uuid,
    /// Message text.
    pub text: String,
}

impl Method for SendMessageColleague {
    type Reply = bool;
    const NAME: &'static str = "SendMessageColleague";

    fn request_type(&self) -> RequestType {
        RequestType::Post
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed("/v1/colleague/send/message/")
    }
}

/// Sends a file to a colleague.
#[derive(Debug, Clone, Serialize)]
pub struct SendFileColleague {
    /// Receiving colleague.
    pub recepient_id: Uuid,
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

impl Method for SendFileColleague {
    type Reply = bool;
    const NAME: &'static str = "SendFileColleague";

    fn request_type(&self) -> RequestType {
        RequestType::PostWithAttach
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed("/v1/colleague/send/file/")
    }

    fn files(&self) -> Vec<InputFile> {
        vec![self.file.clone()]
    }
}

/// Sends an image to a colleague.
#[derive(Debug, Clone, Serialize)]
pub struct SendImageColleague {
    /// Receiving colleague.
    pub recepient_id: Uuid,
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

impl Method for SendImageColleague {
    type Reply = bool;
    const NAME: &'static str = "SendImageColleague";

    fn request_type(&self) -> RequestType {
        RequestType::PostWithAttach
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed("/v1/colleague/send/image/")
    }

    fn files(&self) -> Vec<InputFile> {
        vec![self.file.clone()]
    }
}
