use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::{debug, info};

use crate::models::{ResolvedSession, Session};

/// Parse a JSON file containing an array of sessions
pub fn parse_sessions_file(path: &Path) -> Result<Vec<Session>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_sessions_json(&content)
}

/// Parse a JSON array of sessions
pub fn parse_sessions_json(json: &str) -> Result<Vec<Session>> {
    serde_json::from_str(json).context("Failed to parse sessions JSON")
}

/// Where sessions come from and where resolved zone volumes go
pub trait SessionStore {
    /// All sessions in the store
    fn sessions(&self) -> Result<Vec<Session>>;

    /// Persist resolved zone volumes. Sessions that already carry persisted
    /// volumes are left untouched. Returns the number of sessions updated.
    fn save_volumes(&mut self, resolved: &[ResolvedSession]) -> Result<usize>;
}

/// Session store backed by a JSON file
#[derive(Debug)]
pub struct JsonSessionStore {
    path: PathBuf,
    sessions: Vec<Session>,
}

impl JsonSessionStore {
    /// Open a store, loading the sessions currently in the file
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let sessions = parse_sessions_file(&path)?;
        info!("Loaded {} sessions from {:?}", sessions.len(), path);
        Ok(Self { path, sessions })
    }

    fn write(&self) -> Result<()> {
        let file = std::fs::File::create(&self.path)
            .with_context(|| format!("Failed to create file: {:?}", self.path))?;
        serde_json::to_writer_pretty(file, &self.sessions).context("Failed to write JSON")?;
        Ok(())
    }
}

impl SessionStore for JsonSessionStore {
    fn sessions(&self) -> Result<Vec<Session>> {
        Ok(self.sessions.clone())
    }

    fn save_volumes(&mut self, resolved: &[ResolvedSession]) -> Result<usize> {
        let mut updated = 0;

        for entry in resolved.iter().filter(|r| r.needs_write_back()) {
            let Some(session) = self.sessions.iter_mut().find(|s| s.id == entry.session_id) else {
                bail!("Session {} not found in {:?}", entry.session_id, self.path);
            };
            if session.zone_volumes.is_some() {
                debug!("Session {} already has persisted volumes, skipping", session.id);
                continue;
            }
            session.zone_volumes = Some(entry.volumes);
            updated += 1;
        }

        if updated > 0 {
            self.write()?;
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ZoneId, ZoneSource, ZoneVolumeMap};
    use crate::stages::{resolve_sessions, ResolveConfig};

    const SESSIONS: &str = r#"[
        {"id": "6f1c2a9e-0b7d-4d5e-9a43-2f0d1c6b8e11", "date": "2024-05-01",
         "description": "400m easy, 8x100m threshold"},
        {"id": "0c9b7a51-3e2f-4a8b-b1d4-5e6f7a8b9c0d", "date": "2024-05-02",
         "effort_rating": 5, "distance_m": 2000},
        {"id": "a1b2c3d4-e5f6-4a7b-8c9d-0e1f2a3b4c5d", "date": "2024-05-03",
         "description": "coach corrected", "zone_volumes": {"z2": 1500, "z3": 500}}
    ]"#;

    #[test]
    fn test_parse_sessions_json() {
        let sessions = parse_sessions_json(SESSIONS).unwrap();

        assert_eq!(sessions.len(), 3);
        assert_eq!(sessions[1].effort_rating, Some(5.0));
        assert_eq!(sessions[2].zone_volumes.unwrap().z3, 500);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(parse_sessions_json("{\"date\": 1}").is_err());
    }

    #[test]
    fn test_store_writes_back_without_overwriting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.json");
        std::fs::write(&path, SESSIONS).unwrap();

        let mut store = JsonSessionStore::open(&path).unwrap();
        let sessions = store.sessions().unwrap();
        let resolved = resolve_sessions(&sessions, &ResolveConfig::default());

        assert_eq!(resolved[2].source, ZoneSource::Persisted);
        assert_eq!(store.save_volumes(&resolved).unwrap(), 2);

        let reloaded = parse_sessions_file(&path).unwrap();
        assert_eq!(reloaded[0].zone_volumes.unwrap().z4, 600);
        assert_eq!(reloaded[1].zone_volumes, Some(ZoneVolumeMap::single(ZoneId::Z2, 2000)));
        assert_eq!(
            reloaded[2].zone_volumes,
            Some(ZoneVolumeMap {
                z2: 1500,
                z3: 500,
                ..Default::default()
            })
        );

        // a second pass finds everything persisted
        let store = JsonSessionStore::open(&path).unwrap();
        let again = resolve_sessions(&store.sessions().unwrap(), &ResolveConfig::default());
        assert!(again.iter().all(|r| r.source == ZoneSource::Persisted));
    }

    #[test]
    fn test_write_back_keeps_foreign_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.json");
        std::fs::write(
            &path,
            r#"[{"id": "6f1c2a9e-0b7d-4d5e-9a43-2f0d1c6b8e11", "date": "2024-05-01",
                 "title": "Tuesday squad", "coach_notes": {"keep": true},
                 "effort_rating": 5, "distance_m": 2000}]"#,
        )
        .unwrap();

        let mut store = JsonSessionStore::open(&path).unwrap();
        let resolved = resolve_sessions(&store.sessions().unwrap(), &ResolveConfig::default());
        assert_eq!(store.save_volumes(&resolved).unwrap(), 1);

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let session = &written[0];
        assert_eq!(session["title"], "Tuesday squad");
        assert_eq!(session["coach_notes"]["keep"], true);
        assert_eq!(session["zone_volumes"]["z2"], 2000);
        assert!(session.get("description").is_none());
    }

    #[test]
    fn test_fractional_effort_ratings_parse() {
        let sessions = parse_sessions_json(
            r#"[{"date": "2024-05-01", "effort_rating": 6.5, "distance_m": 1000},
                {"date": "2024-05-02", "effort_rating": 7.0, "distance_m": 1000},
                {"date": "2024-05-03", "description": "400m easy"}]"#,
        )
        .unwrap();

        assert_eq!(sessions.len(), 3);
        let resolved = resolve_sessions(&sessions, &ResolveConfig::default());
        assert_eq!(resolved[0].volumes, ZoneVolumeMap::single(ZoneId::Z3, 1000));
        assert_eq!(resolved[1].volumes, ZoneVolumeMap::single(ZoneId::Z3, 1000));
        assert_eq!(resolved[2].volumes.z1, 400);
    }

    #[test]
    fn test_store_never_replaces_persisted_volumes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.json");
        std::fs::write(&path, SESSIONS).unwrap();

        let mut store = JsonSessionStore::open(&path).unwrap();
        let sessions = store.sessions().unwrap();
        let stale = ResolvedSession {
            session_id: sessions[2].id,
            date: sessions[2].date,
            volumes: ZoneVolumeMap::single(ZoneId::Z5, 50),
            source: ZoneSource::Heuristic,
        };

        assert_eq!(store.save_volumes(&[stale]).unwrap(), 0);
        assert_eq!(store.sessions().unwrap()[2].zone_volumes.unwrap().z5, 0);
    }
}
