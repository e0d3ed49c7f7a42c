use wellness_core::AppConfig;

/// Identifies one of the four adapters in logs and hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Trends,
    SocialPosts,
    Forum,
    Papers,
}

impl SourceKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::Trends => "google_trends",
            SourceKind::SocialPosts => "x_recent_search",
            SourceKind::Forum => "reddit",
            SourceKind::Papers => "paper_search",
        }
    }

    /// Operator hint for a failure of this source.
    #[must_use]
    pub fn hint(self) -> &'static str {
        match self {
            SourceKind::Trends => "Google Trends error: check API availability or query format.",
            SourceKind::SocialPosts => "X API error: check X_BEARER_TOKEN or query format.",
            SourceKind::Forum => {
                "Reddit API error: check REDDIT_CLIENT_ID and REDDIT_CLIENT_SECRET."
            }
            SourceKind::Papers => "Paper search error: check network access and SERP_API_KEY.",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base URLs for every external API the adapters call.
#[derive(Debug, Clone)]
pub struct SourceEndpoints {
    pub trends: String,
    pub x_api: String,
    pub reddit_auth: String,
    pub reddit_api: String,
    pub arxiv: String,
    pub pubmed: String,
    pub serpapi: String,
    pub semantic_scholar: String,
}

impl Default for SourceEndpoints {
    fn default() -> Self {
        Self {
            trends: "https://trends.google.com".to_string(),
            x_api: "https://api.twitter.com".to_string(),
            reddit_auth: "https://www.reddit.com".to_string(),
            reddit_api: "https://oauth.reddit.com".to_string(),
            arxiv: "https://export.arxiv.org".to_string(),
            pubmed: "https://eutils.ncbi.nlm.nih.gov/entrez/eutils".to_string(),
            serpapi: "https://serpapi.com".to_string(),
            semantic_scholar: "https://api.semanticscholar.org".to_string(),
        }
    }
}

impl SourceEndpoints {
    /// Point every API at one base URL (a local mock server in tests).
    #[must_use]
    pub fn all_at(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        Self {
            trends: base.clone(),
            x_api: base.clone(),
            reddit_auth: base.clone(),
            reddit_api: base.clone(),
            arxiv: base.clone(),
            pubmed: base.clone(),
            serpapi: base.clone(),
            semantic_scholar: base,
        }
    }
}

/// Credentials and tuning for the source adapters.
///
/// Every credential is optional: a missing one degrades only the adapter that
/// needs it to its fallback text.
#[derive(Clone)]
pub struct SourcesConfig {
    pub x_bearer_token: Option<String>,
    pub reddit_client_id: Option<String>,
    pub reddit_client_secret: Option<String>,
    pub reddit_user_agent: String,
    pub serp_api_key: Option<String>,
    pub request_timeout_secs: u64,
    /// Pause between consecutive Google Trends keyword queries.
    pub trends_delay_ms: u64,
    pub endpoints: SourceEndpoints,
}

impl SourcesConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            x_bearer_token: config.x_bearer_token.clone(),
            reddit_client_id: config.reddit_client_id.clone(),
            reddit_client_secret: config.reddit_client_secret.clone(),
            reddit_user_agent: config.reddit_user_agent.clone(),
            serp_api_key: config.serp_api_key.clone(),
            request_timeout_secs: config.request_timeout_secs,
            trends_delay_ms: config.trends_delay_ms,
            endpoints: SourceEndpoints::default(),
        }
    }

    /// A config with no credentials, no trends delay, and every API pointed at
    /// `base_url`.
    #[must_use]
    pub fn offline(base_url: &str) -> Self {
        Self {
            x_bearer_token: None,
            reddit_client_id: None,
            reddit_client_secret: None,
            reddit_user_agent: "wellness-test".to_string(),
            serp_api_key: None,
            request_timeout_secs: 5,
            trends_delay_ms: 0,
            endpoints: SourceEndpoints::all_at(base_url),
        }
    }
}

impl std::fmt::Debug for SourcesConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourcesConfig")
            .field(
                "x_bearer_token",
                &self.x_bearer_token.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "reddit_client_id",
                &self.reddit_client_id.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "reddit_client_secret",
                &self.reddit_client_secret.as_ref().map(|_| "[redacted]"),
            )
            .field("reddit_user_agent", &self.reddit_user_agent)
            .field(
                "serp_api_key",
                &self.serp_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("trends_delay_ms", &self.trends_delay_ms)
            .field("endpoints", &self.endpoints)
            .finish()
    }
}

/// The four adapter outputs for one run, in collection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceOutputs {
    pub trends: String,
    pub social_posts: String,
    pub forum_posts: String,
    pub papers: String,
}
