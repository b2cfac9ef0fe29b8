//! Payloads of the four action-style webhook categories.
//!
//! Unlike `line` events these are all shaped the same: an `action` string
//! plus the object the action applies to.

use serde::{Deserialize, Serialize};

use crate::enums::ContentType;
use crate::types::objects::{Competence, Line, User, UserServiceLine};

/// Payload of a `competence` update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeCompetence {
    /// What happened to the competence.
    pub action: String,
    /// The competence binding.
    pub competence: Competence,
}

impl TypeCompetence {
    /// Classifies the payload.
    pub fn content_type(&self) -> ContentType {
        if !self.action.is_empty() {
            ContentType::Action
        } else {
            ContentType::Competence
        }
    }
}

/// Payload of a `subscriber` update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSubscriber {
    /// What happened to the subscriber.
    pub action: String,
    /// The affected user.
    pub user: User,
}

impl TypeSubscriber {
    /// Classifies the payload.
    pub fn content_type(&self) -> ContentType {
        if !self.action.is_empty() {
            ContentType::Action
        } else {
            ContentType::User
        }
    }
}

/// Payload of a `subscription` update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSubscription {
    /// What happened to the subscription.
    pub action: String,
    /// The affected subscription.
    pub subscription: UserServiceLine,
}

impl TypeSubscription {
    /// Classifies the payload.
    pub fn content_type(&self) -> ContentType {
        if !self.action.is_empty() {
            ContentType::Action
        } else {
            ContentType::Subscription
        }
    }
}

/// Payload of a `support_line` update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSupportLine {
    /// What happened to the line.
    pub action: String,
    /// The affected line.
    pub line: Line,
}

impl TypeSupportLine {
    /// Classifies the payload.
    pub fn content_type(&self) -> ContentType {
        if !self.action.is_empty() {
            ContentType::Action
        } else {
            ContentType::Line
        }
    }
}
