//! Knowledge-base queries.

use std::borrow::Cow;

use serde::Serialize;
use uuid::Uuid;

use crate::enums::RequestType;
use crate::methods::Method;
use crate::types::Answering;

/// Queries the knowledge base with the user's last message.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionAndAnswering {
    /// Support line id.
    pub line_id: Uuid,
    /// User whose message is queried.
    pub user_id: Uuid,
    /// Ignore greeting phrases when matching.
    pub skip_greetings: bool,
    /// Ignore farewell phrases when matching.
    pub skip_goodbyes: bool,
}

impl Method for QuestionAndAnswering {
    type Reply = Answering;
    const NAME: &'static str = "QuestionAndAnswering";

    fn request_type(&self) -> RequestType {
        RequestType::Post
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed("/v1/line/qna/")
    }
}

/// Reports which suggested answer was shown to the user.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionAndAnsweringSelected {
    /// Query id from the [`Answering`] reply.
    pub request_id: Uuid,
    /// The chosen answer id.
    pub result_id: Uuid,
}

impl Method for QuestionAndAnsweringSelected {
    type Reply = bool;
    const NAME: &'static str = "QuestionAndAnsweringSelected";

    fn request_type(&self) -> RequestType {
        RequestType::Put
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed("/v1/line/qna/selected/")
    }
}
