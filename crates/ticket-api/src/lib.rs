//! Ticket synthesis and ticketing REST client for the support chat
//! assistant.
//!
//! [`synthesize`] is a pure transformation from a
//! [`TicketDraft`](chat_core::TicketDraft) plus customer identity and
//! transcript into the backend's creation payload; submission goes
//! through the injectable [`TicketRepository`] seam, with an HTTP
//! implementation for production and an in-memory fake for tests.
//!
//! Ticket failures are the one user-visible failure class in the chat
//! core: there is no local fallback for persisting a ticket, so callers
//! surface a retry prompt instead of degrading silently.

mod error;
mod repository;
mod synthesizer;
mod types;

pub use error::{TicketError, CREATE_TICKET_FAILURE};
pub use repository::{
    HttpTicketRepository, InMemoryTicketRepository, TicketApiConfig, TicketRepository,
};
pub use synthesizer::{synthesize, CHATBOT_SOURCE};
pub use types::{
    AiAnalysis, ConversationEntry, CreateTicketPayload, CustomerIdentity, Ticket, TicketStatus,
};
