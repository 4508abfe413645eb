use tracing::{debug, info, warn};

use crate::heuristics::{classify_effort, classify_text, HeuristicsConfig};
use crate::llm::RemoteClassifier;
use crate::models::{
    RemoteClassificationRequest, RemoteClassificationResponse, ResolvedSession, Session, ZoneSource,
};

/// Remote confidence a response must exceed to be used
pub const DEFAULT_ACCEPTANCE_THRESHOLD: u8 = 60;

/// Configuration for zone source resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveConfig {
    /// Remote responses are accepted only with confidence strictly above this
    pub acceptance_threshold: u8,
    /// Only ask the remote classifier when the heuristic confidence is below
    /// this; `None` asks for every session with text
    pub remote_below_confidence: Option<u8>,
    pub heuristics: HeuristicsConfig,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            acceptance_threshold: DEFAULT_ACCEPTANCE_THRESHOLD,
            remote_below_confidence: None,
            heuristics: HeuristicsConfig::default(),
        }
    }
}

/// Resolve a session's effective zone volumes.
///
/// Sources are tried in strict order and the first applicable one wins:
/// 1. Volumes persisted on the session (never overwritten)
/// 2. A remote response above the acceptance threshold
/// 3. Heuristic classification of the description
/// 4. The effort rating, or the default zone, holding the whole distance
pub fn resolve_session(
    session: &Session,
    remote: Option<&RemoteClassificationResponse>,
    config: &ResolveConfig,
) -> ResolvedSession {
    let (volumes, source) = if let Some(persisted) = session.zone_volumes {
        (persisted, ZoneSource::Persisted)
    } else if let Some(response) = remote.filter(|r| r.is_accepted(config.acceptance_threshold)) {
        (response.volumes, ZoneSource::Remote)
    } else if let Some(text) = session.text() {
        (classify_text(text, &config.heuristics).volumes, ZoneSource::Heuristic)
    } else {
        let effort = classify_effort(session.effort_rating);
        if effort.out_of_range {
            warn!(
                "Session {}: effort rating {:?} out of range, clamped to {:?}",
                session.id, session.effort_rating, effort.rating
            );
        }
        (effort.volumes(session.distance_m.unwrap_or(0)), ZoneSource::Effort)
    };

    debug!("Session {} resolved from {:?}: {}m", session.id, source, volumes.total());

    ResolvedSession {
        session_id: session.id,
        date: session.date,
        volumes,
        source,
    }
}

/// Resolve many sessions without remote classification
pub fn resolve_sessions(sessions: &[Session], config: &ResolveConfig) -> Vec<ResolvedSession> {
    sessions
        .iter()
        .map(|s| resolve_session(s, None, config))
        .collect()
}

/// Whether a remote call could change the outcome for this session.
///
/// Persisted volumes and sessions without text never need one. With
/// `remote_below_confidence` set, a heuristic result at or above the limit
/// is trusted as is.
pub fn wants_remote(session: &Session, config: &ResolveConfig) -> bool {
    if session.zone_volumes.is_some() {
        return false;
    }
    let Some(text) = session.text() else {
        return false;
    };

    match config.remote_below_confidence {
        Some(limit) => {
            let confidence = classify_text(text, &config.heuristics).confidence;
            if confidence >= limit {
                debug!(
                    "Session {}: heuristic confidence {} >= {}, skipping remote",
                    session.id, confidence, limit
                );
            }
            confidence < limit
        }
        None => true,
    }
}

/// Resolve a session, asking the remote classifier first when it could matter
pub async fn resolve_with_remote(
    classifier: &RemoteClassifier,
    session: &Session,
    config: &ResolveConfig,
) -> ResolvedSession {
    let remote = match session.text() {
        Some(text) if wants_remote(session, config) => {
            Some(classifier.classify(&RemoteClassificationRequest::new(text)).await)
        }
        _ => None,
    };

    resolve_session(session, remote.as_ref(), config)
}

/// Resolve sessions with remote classification, one call at a time
pub async fn resolve_sessions_with_remote(
    classifier: &RemoteClassifier,
    sessions: &[Session],
    config: &ResolveConfig,
) -> Vec<ResolvedSession> {
    let mut resolved = Vec::with_capacity(sessions.len());
    for session in sessions {
        resolved.push(resolve_with_remote(classifier, session, config).await);
    }

    let remote_count = resolved
        .iter()
        .filter(|r| r.source == ZoneSource::Remote)
        .count();
    info!(
        "Resolved {} sessions ({} from remote classification)",
        resolved.len(),
        remote_count
    );

    resolved
}
