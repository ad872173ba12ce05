use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::retry::RetryPolicy;

pub struct Config {
    /// Questions per quiz
    pub quiz_size: usize,
    /// JSON lexicon to use instead of the built-in table
    pub lexicon_path: Option<PathBuf>,
    /// Accent-insensitive search, toggled at runtime with `accents on|off`
    pub fold_accents: bool,
    /// `None` when no repository or token is configured
    pub leaderboard: Option<LeaderboardConfig>,
}

#[derive(Debug, Clone)]
pub struct LeaderboardConfig {
    pub api_url: String,
    /// `owner/name`
    pub repo: String,
    pub path: String,
    pub branch: String,
    pub token: String,
    pub timeout: Duration,
    pub cache_ttl: Duration,
    pub retry: RetryPolicy,
}

fn parsed<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn new() -> Self {
        let quiz_size = parsed("QUIZ_SIZE", 10usize).max(1);
        let lexicon_path = env::var_os("LEXICON_PATH").map(PathBuf::from);
        let fold_accents = parsed("FOLD_ACCENTS", true);

        Config {
            quiz_size,
            lexicon_path,
            fold_accents,
            leaderboard: LeaderboardConfig::new(),
        }
    }
}

impl LeaderboardConfig {
    pub fn new() -> Option<Self> {
        let repo = env::var("LEADERBOARD_REPO").ok().filter(|repo| !repo.trim().is_empty());
        let token = env::var("LEADERBOARD_TOKEN").ok().filter(|token| !token.trim().is_empty());
        let (Some(repo), Some(token)) = (repo, token) else {
            tracing::info!("LEADERBOARD_REPO or LEADERBOARD_TOKEN not set, leaderboard disabled");
            return None;
        };

        let api_url = env::var("LEADERBOARD_API_URL")
            .unwrap_or_else(|_| "https://api.github.com".to_string());
        let path = env::var("LEADERBOARD_PATH").unwrap_or_else(|_| "leaderboard.jsonl".to_string());
        let branch = env::var("LEADERBOARD_BRANCH").unwrap_or_else(|_| "main".to_string());
        let timeout = Duration::from_secs(parsed("LEADERBOARD_TIMEOUT_SECS", 15)); // 15 seconds default
        let cache_ttl = Duration::from_secs(parsed("LEADERBOARD_CACHE_SECS", 30)); // 30 seconds default
        let retry = RetryPolicy {
            max_attempts: parsed("LEADERBOARD_ATTEMPTS", 3u32).max(1),
            backoff: Duration::from_millis(parsed("LEADERBOARD_BACKOFF_MS", 500)),
        };

        Some(Self {
            api_url,
            repo,
            path,
            branch,
            token,
            timeout,
            cache_ttl,
            retry,
        })
    }
}
