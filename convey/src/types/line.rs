//! The `line` webhook payload and its attachments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::ContentType;

/// A file attached to a chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    /// File id.
    pub file_id: Uuid,
    /// Download path.
    pub file_path: String,
    /// Original file name.
    pub file_name: String,
    /// Size in bytes.
    pub file_size: i64,
    /// Sender's comment.
    pub comment: Option<String>,
    /// Preview image link.
    pub preview_link: Option<String>,
    /// High-resolution preview link.
    pub preview_link_hi: Option<String>,
    /// High-resolution preview dimensions.
    pub preview_hi_sizes: Option<String>,
}

/// Call details on call-related message types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    /// Caller id.
    pub src: Uuid,
    /// Callee id.
    pub dst: Option<Uuid>,
    /// Transfer target id.
    pub new_dst: Option<Uuid>,
    /// Billable seconds.
    pub billsec: Option<i64>,
}

/// Remote-desktop session details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rda {
    /// Initiator id.
    pub src: Uuid,
    /// Target id.
    pub dst: Uuid,
    /// Session length, seconds.
    pub duration: Option<i64>,
    /// Files downloaded during the session.
    pub download_count: Option<i64>,
    /// Files uploaded during the session.
    pub upload_count: Option<i64>,
}

/// Routing metadata on transfer messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Data {
    /// Redirect tag.
    pub redirect: Option<String>,
    /// Transfer direction.
    pub direction: Option<String>,
    /// Target line id.
    pub line_id: Option<Uuid>,
    /// Treatment being transferred.
    pub treatment_id: Option<Uuid>,
    /// Target company id.
    pub company_id: Option<Uuid>,
}

/// A Service Desk request referenced from chat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequest {
    /// Request id.
    pub request_id: Uuid,
    /// Human-readable number.
    pub number: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Arrival channel id.
    pub channel_id: Uuid,
    /// Support line id.
    pub line_id: Uuid,
    /// Who opened the request.
    pub initiator_id: Uuid,
    /// Assigned executor id.
    pub executor_id: Uuid,
    /// Status id.
    pub status_id: Uuid,
    /// Kind id.
    pub kind_id: Uuid,
    /// Type id.
    pub type_id: Uuid,
    /// Problem description.
    pub description: Option<String>,
    /// Resolution text.
    pub result: Option<String>,
    /// Transaction id of the last change.
    pub transaction_id: Uuid,
    /// Last update time.
    pub updated_at: Option<DateTime<Utc>>,
    /// Time spent, seconds.
    pub duration: Option<i64>,
    /// Short summary.
    pub summary: Option<String>,
    /// Priority label.
    pub priority: Option<String>,
    /// Deadline label.
    pub deadline: Option<String>,
}

/// An open conversation between a user and the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Treatment {
    /// Treatment id.
    pub treatment_id: Uuid,
    /// Support line id.
    pub line_id: Uuid,
    /// User id.
    pub user_id: Uuid,
    /// When the conversation was opened.
    pub initialized_at: DateTime<Utc>,
    /// Age of the conversation, seconds.
    pub treatment_duration: Option<i64>,
    /// Currently appointed specialist.
    pub current_specialist: Option<Uuid>,
    /// Quality score given on close.
    pub quality: Option<i64>,
}

/// A vendor notification pushed into chat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerNotification {
    /// Notification id.
    pub id: Uuid,
    /// Subject line.
    pub theme: String,
    /// Body text.
    pub text: String,
    /// Hint shown under the description link.
    pub description_hint: Option<String>,
    /// Description link.
    pub description_url: Option<String>,
}

/// Payload of a `line` update: one chat event on a support line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeLine {
    /// Message id.
    pub message_id: Uuid,
    /// Numeric message kind; see [`content_type`](TypeLine::content_type).
    pub message_type: i32,
    /// When the message happened.
    pub message_time: DateTime<Utc>,
    /// Conversation the message belongs to.
    pub treatment_id: Option<Uuid>,
    /// Author, absent on system messages.
    pub author_id: Option<Uuid>,
    /// Support line id.
    pub line_id: Uuid,
    /// User on the other end of the conversation.
    pub user_id: Uuid,
    /// Message text.
    pub text: Option<String>,
    /// Attached file.
    pub file: Option<File>,
    /// Call details.
    pub call: Option<Call>,
    /// Remote-desktop session details.
    pub rda: Option<Rda>,
    /// Referenced Service Desk request.
    pub service_request: Option<ServiceRequest>,
    /// Conversation snapshot.
    pub treatment: Option<Treatment>,
    /// Routing metadata.
    pub data: Option<Data>,
    /// Vendor notification.
    pub partner_notification: Option<PartnerNotification>,
}

impl TypeLine {
    /// Classifies the numeric `message_type`.
    ///
    /// Unknown codes map to [`ContentType::Unknown`].
    // TODO: codes 122 (ticket updated), 123 (ticket completed) and 124
    // (ticket cancelled) need their own variants once the payloads are
    // documented; until then they classify as Unknown.
    pub fn content_type(&self) -> ContentType {
        match self.message_type {
            1 => ContentType::Text,
            2 => ContentType::Notify,
            17 => ContentType::QualityWork,
            20 => ContentType::CallStartWithNss,
            21 => ContentType::CallStartWithoutNss,
            22 => ContentType::CallEndGood,
            23 => ContentType::CallBadcallCanceled,
            24 => ContentType::CallBadcallExcess,
            25 => ContentType::CallBadcallNonss,
            26 => ContentType::CallBadcallRejected,
            27 => ContentType::CallRerouting,
            28 => ContentType::CallReroutingVendor,
            30 => ContentType::CallReroutingWithoutend,
            31 => ContentType::CallReroutingVendorfranWe,
            32 => ContentType::CallTechnicalProblem,
            36 => ContentType::CallTechnicalProblemNoAudio,
            38 => ContentType::LineCallunavail,
            50 => ContentType::RdaStartWithNss,
            51 => ContentType::RdaStartWithoutNss,
            52 => ContentType::RdaEndWithTransferFiles,
            53 => ContentType::RdaEndWithoutTransferFiles,
            54 => ContentType::RdaBadCanceled,
            55 => ContentType::RdaBadRejected,
            56 => ContentType::RdaBadExcess,
            57 => ContentType::RdaBad,
            59 => ContentType::RdaBadOldService,
            60 => ContentType::RdaBadNoService,
            61 => ContentType::RdaBadOldComponent,
            62 => ContentType::RdaBadNoFiles,
            70 => ContentType::TransferFiles,
            80 => ContentType::LineUserinit,
            81 => ContentType::LineSpecinit,
            82 => ContentType::LineSpecdel,
            83 => ContentType::LineNonss,
            84 => ContentType::LineReroutingspec,
            85 => ContentType::LineReroutingVendor,
            86 => ContentType::LineSpecfound,
            87 => ContentType::LineChatunavail,
            88 => ContentType::LineRerouteUnavail,
            89 => ContentType::LineReroutingOtherservice,
            90 => ContentType::LineClosedNoActivity,
            91 => ContentType::LineClosedRemoveService,
            92 => ContentType::LineClosedRemoveSubscription,
            93 => ContentType::LineClosedRemoveUser,
            121 => ContentType::ServiceRequestAdd,
            200 => ContentType::LineReroutingToBot,
            _ => ContentType::Unknown,
        }
    }
}
