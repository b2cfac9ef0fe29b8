//! Wire types of the Connect API: webhook payloads and response objects.

mod error_event;
mod events;
mod input_file;
mod line;
mod objects;
mod update;

pub use error_event::ErrorEvent;
pub use events::{TypeCompetence, TypeSubscriber, TypeSubscription, TypeSupportLine};
pub use input_file::InputFile;
pub use line::{
    Call, Data, File, PartnerNotification, Rda, ServiceRequest, Treatment, TypeLine,
};
pub use objects::{
    Answer, Answering, Button, Competence, Line, LineShort, ServiceKind, Subscription,
    TicketChannel, TicketFieldValue, TicketShort, TicketStatus, TicketType, User,
    UserServiceLine,
};
pub use update::{Update, UpdateEvent};
