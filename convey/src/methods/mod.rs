//! API commands.
//!
//! Every call the [`Bot`](crate::client::Bot) can make is a plain struct
//! implementing [`Method`]: the struct's fields are the request payload, and
//! the trait supplies the HTTP verb, the endpoint path, and the reply type.
//! A handler that wants to answer its event wraps a method with [`answer`]
//! and the webhook loop fires it after dispatch completes.

use std::borrow::Cow;

use futures::future::BoxFuture;
use serde::Serialize;
use serde::de::DeserializeOwned;

use convey_core::Propagation;

use crate::client::Bot;
use crate::enums::RequestType;
use crate::errors::ClientError;
use crate::types::InputFile;

mod colleague;
mod conference;
mod hook;
mod info;
mod line;
mod qna;

pub use colleague::{SendFileColleague, SendImageColleague, SendMessageColleague};
pub use conference::{SendFileConference, SendImageConference, SendMessageConference};
pub use hook::{DelAllHook, DelHook, SetHook};
pub use info::{
    GetCompetences, GetLines, GetSpecialist, GetSpecialists, GetSpecialistsAvailable,
    GetSubscriber, GetSubscribers, GetSubscriptions, GetTicket, GetTicketByNumber,
    GetTreatments,
};
pub use line::{
    AppointSpec, AppointStart, DropKeyboard, DropTreatment, SendFileLine, SendImageLine,
    SendMessageLine,
};
pub use qna::{QuestionAndAnswering, QuestionAndAnsweringSelected};

/// An API command: payload, verb, path, and reply type in one value.
pub trait Method: Serialize + Send + Sync {
    /// What a successful call deserializes into.
    type Reply: DeserializeOwned + Send + 'static;

    /// Method name used in logs and error messages.
    const NAME: &'static str;

    /// The HTTP shape of the call.
    fn request_type(&self) -> RequestType;

    /// Endpoint path relative to the API base.
    ///
    /// Methods with path parameters render them here and skip them in the
    /// serialized payload.
    fn path(&self) -> Cow<'_, str>;

    /// Files to attach on [`RequestType::PostWithAttach`] calls.
    fn files(&self) -> Vec<InputFile> {
        Vec::new()
    }
}

/// The response envelope the API wraps results in.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Response<T> {
    /// Whether the call succeeded.
    pub ok: bool,
    /// The result on success, or an error description on failure.
    pub result: Option<T>,
    /// Error code on failure.
    pub error_code: Option<i32>,
}

/// Object-safe face of [`Method`] for replies whose concrete type is erased.
pub trait DynMethod: Send {
    /// Executes the method against `bot`, discarding the reply value.
    fn execute<'a>(self: Box<Self>, bot: &'a Bot) -> BoxFuture<'a, Result<(), ClientError>>;

    /// The method name, for logging.
    fn name(&self) -> &'static str;
}

impl<M: Method + 'static> DynMethod for M {
    fn execute<'a>(self: Box<Self>, bot: &'a Bot) -> BoxFuture<'a, Result<(), ClientError>> {
        Box::pin(async move {
            let method = self;
            bot.call(&*method, None).await.map(drop)
        })
    }

    fn name(&self) -> &'static str {
        M::NAME
    }
}

/// A type-erased method returned from a handler as the reply to its event.
pub struct ReplyMethod(Box<dyn DynMethod>);

impl ReplyMethod {
    /// Erases `method`.
    pub fn new<M: Method + 'static>(method: M) -> Self {
        Self(Box::new(method))
    }

    /// The wrapped method's name.
    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Fires the wrapped method against `bot`.
    pub async fn send(self, bot: &Bot) -> Result<(), ClientError> {
        self.0.execute(bot).await
    }
}

impl std::fmt::Debug for ReplyMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ReplyMethod({})", self.name())
    }
}

/// Finishes a handler with `method` as the reply to the current event.
///
/// The dispatcher owner (typically the [`webhook`](crate::webhook) loop)
/// extracts the [`ReplyMethod`] from the handled result and executes it.
pub fn answer<M: Method + 'static>(method: M) -> Propagation {
    Propagation::handled(ReplyMethod::new(method))
}
