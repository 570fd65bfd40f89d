//! Topic expansion: the external service contract and cluster layout.
//!
//! The engine asks a service to break a node's text into subtopics and lays
//! the answers out on a circle around the source node. The service is
//! consumed through [`ExpansionService`]; absence of a service degrades to
//! [`ExpansionError::Unavailable`].

use crate::shapes::NodeId;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::f64::consts::TAU;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Radius of the expansion cluster, in canvas units.
pub const EXPANSION_RADIUS: f64 = 250.0;

/// Expansion errors.
#[derive(Debug, Error, PartialEq)]
pub enum ExpansionError {
    #[error("Expansion service unavailable")]
    Unavailable,
    #[error("Expansion service error: {0}")]
    Service(String),
    #[error("Malformed expansion response: {0}")]
    Malformed(String),
    #[error("Expansion returned no subtopics")]
    Empty,
}

/// Result type for expansion operations.
pub type ExpansionResult<T> = Result<T, ExpansionError>;

/// Boxed future for async operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionRequest {
    pub topic: String,
}

/// Classification of a subtopic. Not used for placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubTopicKind {
    #[default]
    Concept,
    Detail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubTopic {
    pub text: String,
    #[serde(default, alias = "type")]
    pub kind: SubTopicKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionResponse {
    /// Refined topic as echoed by the service.
    #[serde(default)]
    pub topic: String,
    #[serde(rename = "subTopics")]
    pub sub_topics: Vec<SubTopic>,
}

impl ExpansionResponse {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.sub_topics.iter().map(|s| s.text.as_str())
    }
}

/// A source of topic expansions.
pub trait ExpansionService: Send + Sync {
    fn expand(&self, request: &ExpansionRequest) -> BoxFuture<'_, ExpansionResult<ExpansionResponse>>;
}

/// Parse a service response body.
///
/// Rejects bodies that do not match the contract and responses without
/// subtopics.
pub fn parse_response(body: &str) -> ExpansionResult<ExpansionResponse> {
    let response: ExpansionResponse =
        serde_json::from_str(body).map_err(|e| ExpansionError::Malformed(e.to_string()))?;
    if response.sub_topics.is_empty() {
        return Err(ExpansionError::Empty);
    }
    Ok(response)
}

/// Ask `service` to expand `request`.
///
/// `None` means no service is configured.
pub async fn request_expansion(
    service: Option<&dyn ExpansionService>,
    request: &ExpansionRequest,
) -> ExpansionResult<ExpansionResponse> {
    let service = service.ok_or(ExpansionError::Unavailable)?;
    let response = service.expand(request).await?;
    if response.sub_topics.is_empty() {
        return Err(ExpansionError::Empty);
    }
    Ok(response)
}

/// In-memory service answering from canned response bodies.
///
/// Topics are matched case-insensitively.
#[derive(Debug, Default, Clone)]
pub struct StaticExpansionService {
    bodies: HashMap<String, String>,
}

impl StaticExpansionService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a raw JSON response body for `topic`.
    pub fn insert_body(&mut self, topic: &str, body: impl Into<String>) {
        self.bodies.insert(normalize(topic), body.into());
    }

    /// Register a list of subtopic texts for `topic`.
    pub fn insert(&mut self, topic: &str, sub_topics: &[String]) {
        let response = ExpansionResponse {
            topic: topic.to_string(),
            sub_topics: sub_topics
                .iter()
                .map(|text| SubTopic {
                    text: text.clone(),
                    kind: SubTopicKind::Concept,
                })
                .collect(),
        };
        match serde_json::to_string(&response) {
            Ok(body) => self.insert_body(topic, body),
            Err(e) => log::warn!("Failed to encode canned expansion for {}: {}", topic, e),
        }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl FromIterator<(String, Vec<String>)> for StaticExpansionService {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        let mut service = Self::new();
        for (topic, sub_topics) in iter {
            service.insert(&topic, &sub_topics);
        }
        service
    }
}

impl ExpansionService for StaticExpansionService {
    fn expand(&self, request: &ExpansionRequest) -> BoxFuture<'_, ExpansionResult<ExpansionResponse>> {
        let key = normalize(&request.topic);
        Box::pin(async move {
            let body = self
                .bodies
                .get(&key)
                .ok_or_else(|| ExpansionError::Service(format!("no expansion for '{}'", key)))?;
            parse_response(body)
        })
    }
}

fn normalize(topic: &str) -> String {
    topic.trim().to_lowercase()
}

/// Centers of `count` nodes spread evenly on a circle around `origin`.
///
/// The first node sits at angle zero (directly right of `origin`).
pub fn cluster_positions(origin: Point, count: usize, radius: f64) -> Vec<Point> {
    if count == 0 {
        return Vec::new();
    }
    let step = TAU / count as f64;
    (0..count)
        .map(|i| {
            let angle = step * i as f64;
            origin + Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

/// An in-flight expansion request, tied to the node that asked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionTicket {
    pub id: u64,
    pub source: NodeId,
    pub request: ExpansionRequest,
}
