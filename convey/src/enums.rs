//! Enumerations shared by the client and the dispatcher.

use serde::{Deserialize, Serialize};

/// The five webhook event categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateType {
    /// A specialist competence was added or removed.
    Competence,
    /// Chat activity on a support line.
    Line,
    /// A subscriber account changed.
    Subscriber,
    /// A user subscription to a line changed.
    Subscription,
    /// A support line itself changed.
    SupportLine,
}

impl UpdateType {
    /// Every category, in a stable order.
    pub const ALL: [UpdateType; 5] = [
        UpdateType::Competence,
        UpdateType::Line,
        UpdateType::Subscriber,
        UpdateType::Subscription,
        UpdateType::SupportLine,
    ];

    /// The wire name of the category.
    pub fn as_str(self) -> &'static str {
        match self {
            UpdateType::Competence => "competence",
            UpdateType::Line => "line",
            UpdateType::Subscriber => "subscriber",
            UpdateType::Subscription => "subscription",
            UpdateType::SupportLine => "support_line",
        }
    }
}

impl std::fmt::Display for UpdateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Origin of a webhook update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSource {
    /// Sent to the line-wide hook.
    Line,
    /// Sent to the bot hook.
    Bot,
}

/// Kind of a registered webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookType {
    /// Receives every event of the line.
    Line,
    /// Receives only events addressed to the bot.
    Bot,
}

impl HookType {
    /// The wire name of the hook kind.
    pub fn as_str(self) -> &'static str {
        match self {
            HookType::Line => "line",
            HookType::Bot => "bot",
        }
    }
}

/// How a [`Method`](crate::methods::Method) travels over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestType {
    /// GET with the method fields as query parameters.
    Get,
    /// POST with a JSON body.
    Post,
    /// PUT with a JSON body.
    Put,
    /// DELETE with the method fields as query parameters.
    Delete,
    /// Multipart POST: a JSON `meta` field plus file parts.
    PostWithAttach,
}

/// Content classification of a webhook event.
///
/// For `line` events this is derived from the numeric `message_type`; the
/// other four categories report their object kind or [`ContentType::Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum ContentType {
    Unknown,
    Any,
    // object kinds on non-chat events
    Call,
    Rda,
    ServiceRequest,
    Treatment,
    Data,
    Competence,
    User,
    Subscription,
    Line,
    Action,
    // message_type table for `line` events
    Text,
    Notify,
    QualityWork,
    CallStartWithNss,
    CallStartWithoutNss,
    CallEndGood,
    CallBadcallCanceled,
    CallBadcallExcess,
    CallBadcallNonss,
    CallBadcallRejected,
    CallRerouting,
    CallReroutingVendor,
    CallReroutingWithoutend,
    CallReroutingVendorfranWe,
    CallTechnicalProblem,
    CallTechnicalProblemNoAudio,
    LineCallunavail,
    RdaStartWithNss,
    RdaStartWithoutNss,
    RdaEndWithTransferFiles,
    RdaEndWithoutTransferFiles,
    RdaBadCanceled,
    RdaBadRejected,
    RdaBadExcess,
    RdaBad,
    RdaBadOldService,
    RdaBadNoService,
    RdaBadOldComponent,
    RdaBadNoFiles,
    TransferFiles,
    LineUserinit,
    LineSpecinit,
    LineSpecdel,
    LineNonss,
    LineReroutingspec,
    LineReroutingVendor,
    LineSpecfound,
    LineChatunavail,
    LineRerouteUnavail,
    LineReroutingOtherservice,
    LineClosedNoActivity,
    LineClosedRemoveService,
    LineClosedRemoveSubscription,
    LineClosedRemoveUser,
    ServiceRequestAdd,
    LineReroutingToBot,
}
