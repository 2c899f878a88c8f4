//! The ticket backend seam: one trait, two implementations.

use std::env;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::TicketError;
use crate::types::{CreateTicketPayload, Ticket, TicketStatus};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The ticketing backend as the chat core sees it.
///
/// Injected rather than hard-coded so the synthesizer pipeline is
/// testable without network access: production wires
/// [`HttpTicketRepository`], tests wire [`InMemoryTicketRepository`].
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Create a ticket for a customer; the backend assigns the id.
    async fn create_ticket(&self, payload: CreateTicketPayload) -> Result<Ticket, TicketError>;

    /// All tickets.
    async fn list_tickets(&self) -> Result<Vec<Ticket>, TicketError>;

    /// Escalate a ticket to human attention.
    async fn escalate_ticket(&self, id: u64) -> Result<Ticket, TicketError>;

    /// Assign a ticket to an employee.
    async fn assign_ticket(&self, id: u64, employee_id: u64) -> Result<Ticket, TicketError>;

    /// Update a ticket's status.
    async fn update_status(&self, id: u64, status: TicketStatus) -> Result<Ticket, TicketError>;
}

/// Configuration for [`HttpTicketRepository`].
#[derive(Debug, Clone)]
pub struct TicketApiConfig {
    /// Ticket API base URL.
    pub base_url: String,
    /// Optional bearer token.
    pub auth_token: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for TicketApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            auth_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl TicketApiConfig {
    /// Create configuration from environment variables:
    /// - `TICKET_API_URL` - base URL (default: http://localhost:8080/api)
    /// - `TICKET_API_TOKEN` - bearer token (default: none)
    /// - `TICKET_API_TIMEOUT_SECS` - request timeout (default: 30)
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("TICKET_API_URL")
                .unwrap_or_else(|_| "http://localhost:8080/api".to_string()),
            auth_token: env::var("TICKET_API_TOKEN").ok(),
            timeout_secs: env::var("TICKET_API_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// REST client for the ticketing backend.
pub struct HttpTicketRepository {
    client: Client,
    config: TicketApiConfig,
}

impl HttpTicketRepository {
    /// Create a repository with the given configuration.
    pub fn new(config: TicketApiConfig) -> Result<Self, TicketError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TicketError::Network(format!("Failed to create HTTP client: {}", e)))?;

        info!("Ticket API client initialized for {}", config.base_url);
        Ok(Self { client, config })
    }

    /// Create a repository from environment variables.
    pub fn from_env() -> Result<Self, TicketError> {
        Self::new(TicketApiConfig::from_env())
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.config.base_url, path);
        let mut builder = self.client.request(method, url);
        if let Some(token) = &self.config.auth_token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        builder
    }

    async fn send_for_ticket(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<Ticket, TicketError> {
        let response = builder
            .send()
            .await
            .map_err(|e| TicketError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TicketError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| TicketError::Parse(format!("Failed to parse ticket: {}", e)))
    }
}

#[async_trait]
impl TicketRepository for HttpTicketRepository {
    async fn create_ticket(&self, payload: CreateTicketPayload) -> Result<Ticket, TicketError> {
        debug!(
            "Creating ticket for customer {}: {}",
            payload.customer_id, payload.subject
        );
        let builder = self
            .request(
                reqwest::Method::POST,
                &format!("/tickets/customer/{}", payload.customer_id),
            )
            .json(&payload);
        self.send_for_ticket(builder).await
    }

    async fn list_tickets(&self) -> Result<Vec<Ticket>, TicketError> {
        let response = self
            .request(reqwest::Method::GET, "/tickets")
            .send()
            .await
            .map_err(|e| TicketError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TicketError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| TicketError::Parse(format!("Failed to parse tickets: {}", e)))
    }

    async fn escalate_ticket(&self, id: u64) -> Result<Ticket, TicketError> {
        let builder = self.request(reqwest::Method::PUT, &format!("/tickets/{}/escalate", id));
        self.send_for_ticket(builder).await
    }

    async fn assign_ticket(&self, id: u64, employee_id: u64) -> Result<Ticket, TicketError> {
        let builder = self.request(
            reqwest::Method::PUT,
            &format!("/tickets/{}/assign/{}", id, employee_id),
        );
        self.send_for_ticket(builder).await
    }

    async fn update_status(&self, id: u64, status: TicketStatus) -> Result<Ticket, TicketError> {
        let builder = self
            .request(reqwest::Method::PUT, &format!("/tickets/{}", id))
            .json(&serde_json::json!({ "status": status }));
        self.send_for_ticket(builder).await
    }
}

/// In-memory fake of the ticketing backend, for tests and demos.
///
/// Assigns ids the way the real backend would and applies the same
/// status transitions, so the synthesizer pipeline can be exercised
/// end to end without a server.
#[derive(Default)]
pub struct InMemoryTicketRepository {
    tickets: Mutex<Vec<Ticket>>,
    next_id: AtomicU64,
}

impl InMemoryTicketRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TicketRepository for InMemoryTicketRepository {
    async fn create_ticket(&self, payload: CreateTicketPayload) -> Result<Ticket, TicketError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let ticket = Ticket {
            id,
            subject: payload.subject,
            description: payload.description,
            priority: payload.priority,
            status: payload.status,
            customer_id: payload.customer_id,
            created_at: payload.created_at,
            category: payload.category,
            source: payload.source,
            assignee_id: None,
        };

        self.tickets.lock().await.push(ticket.clone());
        Ok(ticket)
    }

    async fn list_tickets(&self) -> Result<Vec<Ticket>, TicketError> {
        Ok(self.tickets.lock().await.clone())
    }

    async fn escalate_ticket(&self, id: u64) -> Result<Ticket, TicketError> {
        let mut tickets = self.tickets.lock().await;
        let ticket = tickets
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TicketError::NotFound(id))?;
        ticket.status = TicketStatus::Escalated;
        Ok(ticket.clone())
    }

    async fn assign_ticket(&self, id: u64, employee_id: u64) -> Result<Ticket, TicketError> {
        let mut tickets = self.tickets.lock().await;
        let ticket = tickets
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TicketError::NotFound(id))?;
        ticket.assignee_id = Some(employee_id);
        ticket.status = TicketStatus::InProgress;
        Ok(ticket.clone())
    }

    async fn update_status(&self, id: u64, status: TicketStatus) -> Result<Ticket, TicketError> {
        let mut tickets = self.tickets.lock().await;
        let ticket = tickets
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TicketError::NotFound(id))?;
        ticket.status = status;
        Ok(ticket.clone())
    }
}
