//! Read-only queries: treatments, users, lines, competences, tickets.

use std::borrow::Cow;

use serde::Serialize;
use uuid::Uuid;

use crate::enums::RequestType;
use crate::methods::Method;
use crate::types::{Competence, Line, Subscription, TicketShort, Treatment, User};

/// Lists open treatments, optionally narrowed by line or user.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetTreatments {
    /// Narrow to one support line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_id: Option<Uuid>,
    /// Narrow to one user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
}

impl Method for GetTreatments {
    type Reply = Vec<Treatment>;
    const NAME: &'static str = "GetTreatments";

    fn request_type(&self) -> RequestType {
        RequestType::Get
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed("/v1/line/treatment/")
    }
}

/// Fetches one subscriber by id.
#[derive(Debug, Clone, Serialize)]
pub struct GetSubscriber {
    /// Subscriber user id.
    #[serde(skip)]
    pub user_id: Uuid,
}

impl Method for GetSubscriber {
    type Reply = User;
    const NAME: &'static str = "GetSubscriber";

    fn request_type(&self) -> RequestType {
        RequestType::Get
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Owned(format!("/v1/line/subscriber/{}/", self.user_id))
    }
}

/// Lists every subscriber.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetSubscribers {}

impl Method for GetSubscribers {
    type Reply = Vec<User>;
    const NAME: &'static str = "GetSubscribers";

    fn request_type(&self) -> RequestType {
        RequestType::Get
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed("/v1/line/subscribers/")
    }
}

/// Lists subscriptions, optionally narrowed by user, client, or line.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetSubscriptions {
    /// Narrow to one user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    /// Narrow to one client company.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<Uuid>,
    /// Narrow to one support line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_id: Option<Uuid>,
}

impl Method for GetSubscriptions {
    type Reply = Vec<Subscription>;
    const NAME: &'static str = "GetSubscriptions";

    fn request_type(&self) -> RequestType {
        RequestType::Get
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed("/v1/line/subscriptions/")
    }
}

/// Lists the support lines visible to the bot.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetLines {}

impl Method for GetLines {
    type Reply = Vec<Line>;
    const NAME: &'static str = "GetLines";

    fn request_type(&self) -> RequestType {
        RequestType::Get
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed("/v1/line/")
    }
}

/// Fetches one specialist by id.
#[derive(Debug, Clone, Serialize)]
pub struct GetSpecialist {
    /// Specialist user id.
    #[serde(skip)]
    pub user_id: Uuid,
}

impl Method for GetSpecialist {
    type Reply = User;
    const NAME: &'static str = "GetSpecialist";

    fn request_type(&self) -> RequestType {
        RequestType::Get
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Owned(format!("/v1/line/specialist/{}/", self.user_id))
    }
}

/// Lists every specialist.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetSpecialists {}

impl Method for GetSpecialists {
    type Reply = Vec<User>;
    const NAME: &'static str = "GetSpecialists";

    fn request_type(&self) -> RequestType {
        RequestType::Get
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed("/v1/line/specialists/")
    }
}

/// Lists the specialists currently free on a line.
#[derive(Debug, Clone, Serialize)]
pub struct GetSpecialistsAvailable {
    /// Support line id.
    #[serde(skip)]
    pub line_id: Uuid,
}

impl Method for GetSpecialistsAvailable {
    type Reply = Vec<Uuid>;
    const NAME: &'static str = "GetSpecialistsAvailable";

    fn request_type(&self) -> RequestType {
        RequestType::Get
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Owned(format!("/v1/line/specialists/{}/available/", self.line_id))
    }
}

/// Lists competences, optionally narrowed by user or line.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetCompetences {
    /// Narrow to one specialist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    /// Narrow to one support line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_id: Option<Uuid>,
}

impl Method for GetCompetences {
    type Reply = Vec<Competence>;
    const NAME: &'static str = "GetCompetences";

    fn request_type(&self) -> RequestType {
        RequestType::Get
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed("/v1/line/competences/")
    }
}

/// Fetches one Service Desk ticket by id.
#[derive(Debug, Clone, Serialize)]
pub struct GetTicket {
    /// Ticket id.
    #[serde(skip)]
    pub id: Uuid,
}

impl Method for GetTicket {
    type Reply = TicketShort;
    const NAME: &'static str = "GetTicket";

    fn request_type(&self) -> RequestType {
        RequestType::Get
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Owned(format!("/v1/ticket/{}/", self.id))
    }
}

/// Fetches one Service Desk ticket by its human-readable number.
#[derive(Debug, Clone, Serialize)]
pub struct GetTicketByNumber {
    /// Ticket number.
    #[serde(skip)]
    pub number: i64,
}

impl Method for GetTicketByNumber {
    type Reply = TicketShort;
    const NAME: &'static str = "GetTicketByNumber";

    fn request_type(&self) -> RequestType {
        RequestType::Get
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Owned(format!("/v1/ticket/number/{}/", self.number))
    }
}
