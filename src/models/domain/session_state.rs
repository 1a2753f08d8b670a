use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-client state kept between requests. Absent fields deserialize to their
/// defaults, so a missing or partial record is a fresh session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionState {
    pub quiz_started: bool,
    pub current_question: usize,
    /// Submitted answers keyed by question id.
    pub answers: BTreeMap<String, String>,
    pub score: u32,
    pub manager_access: bool,
    pub manager_access_time: Option<DateTime<Utc>>,
}

impl SessionState {
    pub fn grant_manager_access(&mut self) {
        self.manager_access = true;
        self.manager_access_time = Some(Utc::now());
    }

    pub fn revoke_manager_access(&mut self) {
        self.manager_access = false;
        self.manager_access_time = None;
    }
}
