pub mod heuristics;
pub mod io;
pub mod llm;
pub mod models;
pub mod stages;

pub use heuristics::{
    classify_effort, classify_text, EffortClassification, HeuristicsConfig, Language,
};
pub use io::{parse_sessions_file, HumanReport, JsonSessionStore, MachineReport, SessionStore};
pub use llm::{RemoteClassifier, RemoteConfig, RemoteError};
pub use models::{
    DateRange, DetectionRecord, Period, PeriodAggregate, RemoteClassificationRequest,
    RemoteClassificationResponse, ResolvedSession, Session, TimeSlot, ZoneId, ZoneSource,
    ZoneVolumeMap,
};
pub use stages::{
    aggregate, aggregate_by_period, resolve_session, resolve_sessions, resolve_sessions_with_remote,
    ResolveConfig,
};
