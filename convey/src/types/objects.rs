//! Response objects returned by the info-style API methods.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A platform user (subscriber or specialist).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// User id.
    pub user_id: Uuid,
    /// Given name.
    pub name: String,
    /// Family name.
    pub surname: String,
    /// Patronymic.
    #[serde(default)]
    pub patronymic: String,
    /// Avatar URL.
    pub avatar_url: Option<String>,
    /// Avatar preview URL.
    pub avatar_small_url: Option<String>,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Job title.
    #[serde(default)]
    pub post: String,
    /// Contact phone.
    #[serde(default)]
    pub phone: String,
}

/// A support line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Line id.
    pub line_id: Uuid,
    /// Display name.
    pub name: String,
    /// Whether the digital menu (bot) is allowed on this line.
    pub allow_bot: bool,
    /// Address the `bot` hook is set to, if any.
    pub hook_bot: Option<String>,
    /// Address the `line` hook is set to, if any.
    pub hook_line: Option<String>,
}

/// Abbreviated support-line reference used inside tickets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineShort {
    /// Line id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
}

/// A specialist competence binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competence {
    /// Line id.
    pub line_id: Uuid,
    /// Specialist user id.
    pub specialist_id: Uuid,
    /// Priority in the appointment pool: 0 observer, 1 high, 2 medium,
    /// 3 standard.
    pub pool_priority: i32,
    /// Whether the specialist belongs to a franchisee.
    pub is_franch_spec: bool,
}

/// A line connected to a user, as reported by the subscription webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserServiceLine {
    /// Line id.
    pub service_id: Uuid,
    /// User id.
    pub service_user_id: Uuid,
    /// Subscription start.
    pub activate_date: DateTime<Utc>,
    /// Subscription end; `None` means perpetual.
    pub expires_date: Option<DateTime<Utc>>,
}

/// A subscription record returned by `GetSubscriptions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    /// Line id.
    pub line_id: Uuid,
    /// User id.
    pub user_id: Uuid,
    /// Subscription start.
    pub subscription_set: DateTime<Utc>,
    /// Subscription end; `None` means perpetual.
    pub subscription_expire_at: Option<DateTime<Utc>>,
}

/// A button in the bot keyboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Button {
    /// Command identifier reported back when the button is pressed.
    pub id: Option<String>,
    /// Visible label.
    pub text: String,
}

impl Button {
    /// A button labelled `text` with command id `id`.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self { id: Some(id.into()), text: text.into() }
    }
}

/// Ticket kind dictionary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceKind {
    /// Kind id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Ticket type dictionary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketType {
    /// Type id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
}

/// Channel a ticket arrived through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketChannel {
    /// Channel id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Channel type tag.
    #[serde(rename = "type")]
    pub kind: String,
}

/// Current ticket status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketStatus {
    /// Status id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Status type tag.
    #[serde(rename = "type")]
    pub kind: String,
}

/// Value of a custom ticket field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketFieldValue {
    /// Field id.
    pub id: String,
    /// Stored value.
    pub value: String,
}

/// A Service Desk ticket in its short representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketShort {
    /// Ticket id.
    pub id: Uuid,
    /// Transaction id of the last change.
    pub transaction_id: Uuid,
    /// Human-readable ticket number.
    pub number: i64,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Problem description.
    pub description: Option<String>,
    /// Priority label.
    pub priority: String,
    /// Time spent, seconds.
    pub duration: i64,
    /// Resolution text.
    pub result: Option<String>,
    /// Short summary.
    pub summary: Option<String>,
    /// Deadline label.
    pub deadline: Option<String>,
    /// Ticket kind.
    pub kind: ServiceKind,
    /// Support line the ticket belongs to.
    pub line: LineShort,
    /// Ticket type.
    #[serde(rename = "type")]
    pub ticket_type: TicketType,
    /// Arrival channel.
    pub channel: TicketChannel,
    /// Current status.
    pub status: TicketStatus,
    /// Who opened the ticket.
    pub initiator: User,
    /// Who created the record, when different from the initiator.
    pub author: Option<User>,
    /// Assigned executor.
    pub executor: Option<User>,
    /// Custom field values.
    pub fields: Option<Vec<TicketFieldValue>>,
}

/// One candidate answer from the knowledge base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    /// Answer id, fed back via `QuestionAndAnsweringSelected`.
    pub id: Uuid,
    /// Answer text.
    pub text: String,
    /// Match confidence, 0.0 to 1.0.
    pub accuracy: f64,
    /// Where the answer came from.
    pub answer_source: String,
}

/// Result of a knowledge-base query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answering {
    /// The question as the service understood it.
    pub question: String,
    /// Query id, fed back via `QuestionAndAnsweringSelected`.
    pub request_id: Uuid,
    /// Ranked candidate answers.
    pub answers: Vec<Answer>,
}
