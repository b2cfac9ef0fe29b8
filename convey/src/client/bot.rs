//! The [`Bot`]: credentials, API base, and convenience call wrappers.

use std::time::Duration;

use uuid::Uuid;

use crate::client::session::Session;
use crate::errors::ClientError;
use crate::methods::{
    AppointSpec, AppointStart, DropKeyboard, DropTreatment, GetLines, GetSubscriber,
    GetTreatments, Method, SendMessageLine,
};
use crate::types::{Line, Treatment, User};

/// Default API server.
pub const DEFAULT_BASE: &str = "https://cs-api.1c-connect.com";

/// A Connect API identity: credentials, the line it operates on, and the
/// session calls go through.
pub struct Bot {
    api_login: String,
    api_password: String,
    line_id: Option<Uuid>,
    base: String,
    session: Session,
}

impl Bot {
    /// A bot with the given credentials, the default API base, and a
    /// default session.
    pub fn new(api_login: impl Into<String>, api_password: impl Into<String>) -> Self {
        Self {
            api_login: api_login.into(),
            api_password: api_password.into(),
            line_id: None,
            base: DEFAULT_BASE.to_owned(),
            session: Session::default(),
        }
    }

    /// Points the bot at a different API server.
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    /// Sets the support line this bot operates on.
    pub fn with_line_id(mut self, line_id: Uuid) -> Self {
        self.line_id = Some(line_id);
        self
    }

    /// Replaces the session (custom transport, middleware, timeout).
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    /// The API base URL.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// The support line this bot operates on, when configured.
    pub fn line_id(&self) -> Option<Uuid> {
        self.line_id
    }

    /// Basic-auth credentials, or `None` when the login is empty.
    pub fn auth(&self) -> Option<(&str, &str)> {
        if self.api_login.is_empty() {
            None
        } else {
            Some((&self.api_login, &self.api_password))
        }
    }

    /// The underlying session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Executes an arbitrary [`Method`].
    pub async fn call<M: Method>(
        &self,
        method: &M,
        timeout: Option<Duration>,
    ) -> Result<M::Reply, ClientError> {
        self.session.execute(self, method, timeout).await
    }

    /// Shuts the session down.
    pub async fn close(&self) -> Result<(), ClientError> {
        self.session.close().await
    }

    /// Sends a text message to `user_id` on `line_id`.
    pub async fn send_message_line(
        &self,
        line_id: Uuid,
        user_id: Uuid,
        text: impl Into<String>,
    ) -> Result<bool, ClientError> {
        self.call(&SendMessageLine::new(line_id, user_id, text), None).await
    }

    /// Asks the platform to appoint a specialist to the conversation.
    pub async fn appoint_start(&self, line_id: Uuid, user_id: Uuid) -> Result<bool, ClientError> {
        self.call(&AppointStart { line_id, user_id }, None).await
    }

    /// Appoints `spec_id` to the conversation of `user_id` on `line_id`.
    pub async fn appoint_spec(
        &self,
        line_id: Uuid,
        user_id: Uuid,
        spec_id: Uuid,
    ) -> Result<bool, ClientError> {
        self.call(&AppointSpec::new(line_id, user_id, spec_id), None).await
    }

    /// Closes the open conversation of `user_id` on `line_id`.
    pub async fn drop_treatment(&self, line_id: Uuid, user_id: Uuid) -> Result<bool, ClientError> {
        self.call(&DropTreatment { line_id, user_id, author_id: None }, None).await
    }

    /// Removes the keyboard shown to `user_id` on `line_id`.
    pub async fn drop_keyboard(&self, line_id: Uuid, user_id: Uuid) -> Result<bool, ClientError> {
        self.call(&DropKeyboard { line_id, user_id }, None).await
    }

    /// Fetches one subscriber.
    pub async fn get_subscriber(&self, user_id: Uuid) -> Result<User, ClientError> {
        self.call(&GetSubscriber { user_id }, None).await
    }

    /// Lists the support lines visible to the bot.
    pub async fn get_lines(&self) -> Result<Vec<Line>, ClientError> {
        self.call(&GetLines::default(), None).await
    }

    /// Lists open treatments.
    pub async fn get_treatments(
        &self,
        line_id: Option<Uuid>,
        user_id: Option<Uuid>,
    ) -> Result<Vec<Treatment>, ClientError> {
        self.call(&GetTreatments { line_id, user_id }, None).await
    }
}
