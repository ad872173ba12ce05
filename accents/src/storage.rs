use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::contents_api::{FileHost, HostError};
use crate::retry::{retry_on_conflict, RetryError, RetryPolicy};
use crate::session::Score;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";
const MAX_NAME_CHARS: usize = 24;

/// One line of the leaderboard log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    #[serde(rename = "puntuacio")]
    pub correct: u32,
    pub total: u32,
    /// `YYYY-MM-DD HH:MM`, so it sorts as text
    #[serde(rename = "data")]
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("a score needs at least one question")]
    NoQuestions,

    #[error("{correct} correct answers out of {total} questions")]
    TooManyCorrect { correct: u32, total: u32 },
}

fn sanitize_name(name: &str) -> String {
    name.chars()
        .filter(|ch| !ch.is_control())
        .collect::<String>()
        .trim()
        .chars()
        .take(MAX_NAME_CHARS)
        .collect::<String>()
        .trim_end()
        .to_owned()
}

impl ScoreRecord {
    pub fn new(name: &str, score: Score, timestamp: String) -> Result<Self, RecordError> {
        let record = Self {
            name: sanitize_name(name),
            correct: u32::try_from(score.correct).unwrap_or(u32::MAX),
            total: u32::try_from(score.total).unwrap_or(u32::MAX),
            timestamp,
        };
        record.validate()?;
        Ok(record)
    }

    /// Stamped with the current local time.
    pub fn now(name: &str, score: Score) -> Result<Self, RecordError> {
        Self::new(name, score, Local::now().format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn validate(&self) -> Result<(), RecordError> {
        if self.total == 0 {
            return Err(RecordError::NoQuestions);
        }
        if self.correct > self.total {
            return Err(RecordError::TooManyCorrect {
                correct: self.correct,
                total: self.total,
            });
        }
        Ok(())
    }

    pub fn percent(&self) -> f64 {
        f64::from(self.correct) * 100.0 / f64::from(self.total.max(1))
    }
}

fn by_fraction(a: &ScoreRecord, b: &ScoreRecord) -> Ordering {
    let left = u64::from(a.correct) * u64::from(b.total);
    let right = u64::from(b.correct) * u64::from(a.total);
    left.cmp(&right)
}

/// Best score first; equal scores newest first.
pub fn rank(records: &mut [ScoreRecord]) {
    records.sort_by(|a, b| by_fraction(b, a).then_with(|| b.timestamp.cmp(&a.timestamp)));
}

/// Parses the newline-delimited log, skipping blank lines and any line that
/// isn't a valid record.
pub fn parse_log(text: &str) -> Vec<ScoreRecord> {
    let mut records = Vec::new();
    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<ScoreRecord>(line) {
            Ok(record) => match record.validate() {
                Ok(()) => records.push(record),
                Err(error) => tracing::warn!(line = number + 1, "skipping leaderboard entry: {error}"),
            },
            Err(error) => tracing::warn!(line = number + 1, "skipping unreadable leaderboard line: {error}"),
        }
    }
    records
}

fn append_line(raw: &str, line: &str) -> String {
    let mut content = raw.trim_end_matches(['\n', '\r']).to_owned();
    if !content.is_empty() {
        content.push('\n');
    }
    content.push_str(line);
    content.push('\n');
    content
}

/// The log as last read from the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub records: Vec<ScoreRecord>,
    /// `None` while the log doesn't exist
    pub version: Option<String>,
    pub raw: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LeaderboardError {
    #[error(transparent)]
    Host(#[from] HostError),

    #[error("gave up after {attempts} conflicting writes")]
    Conflicts { attempts: u32 },

    #[error("invalid score: {0}")]
    Record(#[from] RecordError),

    #[error("could not serialize the score: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<RetryError> for LeaderboardError {
    fn from(error: RetryError) -> Self {
        match error {
            RetryError::Exhausted { attempts } => Self::Conflicts { attempts },
            RetryError::Failed(error) => Self::Host(error),
        }
    }
}

pub struct LeaderboardStore<H> {
    host: H,
    cache: Cache<(), Arc<Snapshot>>,
    retry: RetryPolicy,
    /// Scores that could not be saved during this session.
    unsaved: Mutex<Vec<ScoreRecord>>,
}

impl<H: FileHost> LeaderboardStore<H> {
    pub fn new(host: H, cache_ttl: Duration, retry: RetryPolicy) -> Self {
        Self {
            host,
            cache: Cache::builder().max_capacity(1).time_to_live(cache_ttl).build(),
            retry,
            unsaved: Mutex::new(Vec::new()),
        }
    }

    async fn read(&self) -> Result<Snapshot, HostError> {
        Ok(match self.host.fetch().await? {
            Some(file) => Snapshot {
                records: parse_log(&file.content),
                version: Some(file.version),
                raw: file.content,
            },
            None => Snapshot::default(),
        })
    }

    /// Reads the log, served from the cache while it is fresh.
    /// A missing log is an empty snapshot, not an error.
    pub async fn load(&self) -> Result<Arc<Snapshot>, LeaderboardError> {
        if let Some(snapshot) = self.cache.get(&()).await {
            return Ok(snapshot);
        }
        let snapshot = Arc::new(self.read().await?);
        tracing::debug!(records = snapshot.records.len(), "leaderboard loaded");
        self.cache.insert((), Arc::clone(&snapshot)).await;
        Ok(snapshot)
    }

    /// Appends one record with read-modify-write, retrying when the log
    /// changes between the read and the write.
    pub async fn try_append(&self, record: &ScoreRecord) -> Result<(), LeaderboardError> {
        record.validate()?;
        let line = serde_json::to_string(record)?;
        let message = format!("Puntuació: {} {}/{}", record.name, record.correct, record.total);
        let attempts = retry_on_conflict(self.retry, |attempt| {
            let (line, message) = (&line, &message);
            async move {
                let snapshot = self.read().await?;
                let content = append_line(&snapshot.raw, line);
                self.host
                    .store(&content, snapshot.version.as_deref(), message)
                    .await?;
                Ok::<u32, HostError>(attempt)
            }
        })
        .await?;
        self.cache.invalidate(&()).await;
        tracing::info!(attempts, name = %record.name, "score saved");
        Ok(())
    }

    /// Saves a record, returns if it reached the remote log. Records that
    /// didn't are kept for the rest of the session.
    pub async fn append(&self, record: ScoreRecord) -> bool {
        match self.try_append(&record).await {
            Ok(()) => true,
            Err(error) => {
                tracing::error!("could not save score: {error}");
                self.unsaved.lock().await.push(record);
                false
            }
        }
    }

    pub async fn unsaved(&self) -> Vec<ScoreRecord> {
        self.unsaved.lock().await.clone()
    }

    /// Ranked records for display, including the unsaved ones. Read
    /// failures are logged and show up as an empty log.
    pub async fn standings(&self) -> Vec<ScoreRecord> {
        let mut records = match self.load().await {
            Ok(snapshot) => snapshot.records.clone(),
            Err(error) => {
                tracing::warn!("could not read leaderboard: {error}");
                Vec::new()
            }
        };
        records.extend(self.unsaved.lock().await.iter().cloned());
        rank(&mut records);
        records
    }

    #[cfg(test)]
    fn host(&self) -> &H {
        &self.host
    }
}
