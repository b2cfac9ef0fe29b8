//! The top-level webhook envelope.

use serde::{Deserialize, Serialize};

use crate::enums::UpdateType;
use crate::errors::UpdateTypeLookup;
use crate::types::events::{TypeCompetence, TypeSubscriber, TypeSubscription, TypeSupportLine};
use crate::types::line::TypeLine;

/// A webhook update as delivered by the Connect platform.
///
/// Exactly one of the five payload branches is expected to be populated;
/// [`event`](Update::event) resolves which one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    /// Declared category name.
    pub event_type: String,
    /// Which hook delivered the update (`line` or `bot`).
    pub event_source: String,
    /// Competence payload.
    pub competence: Option<TypeCompetence>,
    /// Chat payload.
    pub line: Option<TypeLine>,
    /// Subscriber payload.
    pub subscriber: Option<TypeSubscriber>,
    /// Subscription payload.
    pub subscription: Option<TypeSubscription>,
    /// Support-line payload.
    pub support_line: Option<TypeSupportLine>,
}

impl Update {
    /// Resolves the populated payload branch.
    ///
    /// Branches are probed in a fixed order (competence, line, subscriber,
    /// subscription, support_line) independent of the declared
    /// `event_type`, so a mislabeled envelope still dispatches by content.
    pub fn event(&self) -> Result<(UpdateType, UpdateEvent), UpdateTypeLookup> {
        if let Some(competence) = &self.competence {
            return Ok((UpdateType::Competence, UpdateEvent::Competence(competence.clone())));
        }
        if let Some(line) = &self.line {
            return Ok((UpdateType::Line, UpdateEvent::Line(line.clone())));
        }
        if let Some(subscriber) = &self.subscriber {
            return Ok((UpdateType::Subscriber, UpdateEvent::Subscriber(subscriber.clone())));
        }
        if let Some(subscription) = &self.subscription {
            return Ok((UpdateType::Subscription, UpdateEvent::Subscription(subscription.clone())));
        }
        if let Some(support_line) = &self.support_line {
            return Ok((UpdateType::SupportLine, UpdateEvent::SupportLine(support_line.clone())));
        }
        Err(UpdateTypeLookup)
    }
}

/// A resolved update payload, the event type routed through the dispatcher
/// tree.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateEvent {
    /// A competence changed.
    Competence(TypeCompetence),
    /// Chat activity.
    Line(TypeLine),
    /// A subscriber changed.
    Subscriber(TypeSubscriber),
    /// A subscription changed.
    Subscription(TypeSubscription),
    /// A support line changed.
    SupportLine(TypeSupportLine),
}

impl UpdateEvent {
    /// The category this payload belongs to.
    pub fn update_type(&self) -> UpdateType {
        match self {
            UpdateEvent::Competence(_) => UpdateType::Competence,
            UpdateEvent::Line(_) => UpdateType::Line,
            UpdateEvent::Subscriber(_) => UpdateType::Subscriber,
            UpdateEvent::Subscription(_) => UpdateType::Subscription,
            UpdateEvent::SupportLine(_) => UpdateType::SupportLine,
        }
    }
}
