use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use crate::{
    models::{InboundMessage, OutboundMessage},
    services::recommendations::Recommender,
};

/// Opaque identifier of one live channel connection
pub type SessionId = Uuid;

/// Per-connection state: the latest preference set and the queue feeding the socket
struct Session {
    preferences: Vec<String>,
    outbound: mpsc::UnboundedSender<OutboundMessage>,
}

/// Keeps every connected client's pushed recommendations in sync with its preferences
///
/// A session exists exactly as long as its connection. Opening a session and
/// every accepted preference update each push one `recommendations` message.
/// The session map lock is never held while recommendations are computed.
#[derive(Clone)]
pub struct ChannelManager {
    recommender: Arc<Recommender>,
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
}

impl ChannelManager {
    pub fn new(recommender: Arc<Recommender>) -> Self {
        Self {
            recommender,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Registers a new session with no preferences and pushes its first recommendations
    pub async fn open(&self, outbound: mpsc::UnboundedSender<OutboundMessage>) -> SessionId {
        let session_id = Uuid::new_v4();

        self.sessions.write().await.insert(
            session_id,
            Session {
                preferences: Vec::new(),
                outbound,
            },
        );

        tracing::info!(session_id = %session_id, "Client connected");

        self.push_recommendations(session_id).await;
        session_id
    }

    /// Handles one inbound frame
    ///
    /// Malformed frames and unrecognized message types are dropped; the
    /// session stays open either way.
    pub async fn handle_message(&self, session_id: SessionId, payload: &str) {
        match InboundMessage::parse(payload) {
            Ok(InboundMessage::UpdatePreferences(preferences)) => {
                self.update_preferences(session_id, preferences).await;
            }
            Ok(InboundMessage::Unrecognized(message_type)) => {
                tracing::debug!(
                    session_id = %session_id,
                    message_type = message_type.as_deref().unwrap_or("<none>"),
                    "Ignoring unrecognized channel message"
                );
            }
            Err(e) => {
                tracing::warn!(
                    session_id = %session_id,
                    error = %e,
                    "Dropping malformed channel message"
                );
            }
        }
    }

    /// Replaces a session's preference set and pushes fresh recommendations
    ///
    /// Returns `false` without pushing when the session no longer exists.
    pub async fn update_preferences(&self, session_id: SessionId, preferences: Vec<String>) -> bool {
        {
            let mut sessions = self.sessions.write().await;
            let Some(session) = sessions.get_mut(&session_id) else {
                tracing::debug!(session_id = %session_id, "Preference update for closed session");
                return false;
            };

            tracing::info!(
                session_id = %session_id,
                preference_count = preferences.len(),
                "Preferences updated"
            );
            session.preferences = preferences;
        }

        self.push_recommendations(session_id).await
    }

    /// Computes recommendations for a session's current preferences and queues them
    ///
    /// Returns whether a message was queued. Unknown sessions, closed queues
    /// and catalog failures all skip the push.
    pub async fn push_recommendations(&self, session_id: SessionId) -> bool {
        let preferences = match self.sessions.read().await.get(&session_id) {
            Some(session) => session.preferences.clone(),
            None => {
                tracing::debug!(session_id = %session_id, "No session to push to");
                return false;
            }
        };

        let recommendations = match self.recommender.recommend(&preferences).await {
            Ok(recommendations) => recommendations,
            Err(e) => {
                tracing::warn!(
                    session_id = %session_id,
                    error = %e,
                    "Skipping recommendations push"
                );
                return false;
            }
        };

        let sessions = self.sessions.read().await;
        let Some(session) = sessions.get(&session_id) else {
            tracing::debug!(session_id = %session_id, "Session closed before push");
            return false;
        };

        let count = recommendations.len();
        if session
            .outbound
            .send(OutboundMessage::Recommendations(recommendations))
            .is_err()
        {
            tracing::debug!(session_id = %session_id, "Channel no longer open; push skipped");
            return false;
        }

        tracing::debug!(
            session_id = %session_id,
            recommendation_count = count,
            "Recommendations pushed"
        );
        true
    }

    /// Discards a session; later triggers for it are no-ops
    pub async fn close(&self, session_id: SessionId) {
        if self.sessions.write().await.remove(&session_id).is_some() {
            tracing::info!(session_id = %session_id, "Client disconnected");
        }
    }

    /// Number of live sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Current preference set of a session, if it is still open
    pub async fn preferences(&self, session_id: SessionId) -> Option<Vec<String>> {
        self.sessions
            .read()
            .await
            .get(&session_id)
            .map(|s| s.preferences.clone())
    }
}
