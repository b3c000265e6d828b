// Core data structures for trendscope

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Content origin an item was collected from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Source {
    #[serde(rename = "github")]
    GitHub,
    #[serde(rename = "youtube")]
    YouTube,
    #[serde(rename = "google-trends")]
    GoogleTrends,
    #[serde(rename = "google-search")]
    GoogleSearch,
    #[serde(rename = "hackernews")]
    HackerNews,
    #[serde(rename = "x-twitter")]
    XTwitter,
    #[serde(rename = "reddit")]
    Reddit,
    #[serde(rename = "producthunt")]
    ProductHunt,
    #[serde(rename = "devto")]
    DevTo,
    #[serde(rename = "facebook")]
    Facebook,
    #[serde(rename = "medium")]
    Medium,
    #[serde(rename = "stackoverflow")]
    StackOverflow,
    #[serde(rename = "naver")]
    Naver,
    #[serde(rename = "geeknews")]
    GeekNews,
    #[serde(rename = "kakao-tech")]
    KakaoTech,
    #[serde(rename = "toss-tech")]
    TossTech,
    #[serde(rename = "yozm")]
    Yozm,
    #[serde(rename = "codenary")]
    Codenary,
    #[serde(rename = "npm")]
    Npm,
    #[serde(rename = "pypi")]
    PyPi,
    #[serde(rename = "dockerhub")]
    DockerHub,
    #[serde(rename = "techcrunch")]
    TechCrunch,
    #[serde(rename = "theverge")]
    TheVerge,
    #[serde(rename = "arstechnica")]
    ArsTechnica,
    #[serde(rename = "infoq")]
    InfoQ,
    #[serde(rename = "thenewstack")]
    TheNewStack,
    #[serde(rename = "lobsters")]
    Lobsters,
    #[serde(rename = "slashdot")]
    Slashdot,
    #[serde(rename = "dzone")]
    DZone,
}

impl Source {
    /// Get the wire identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GitHub => "github",
            Self::YouTube => "youtube",
            Self::GoogleTrends => "google-trends",
            Self::GoogleSearch => "google-search",
            Self::HackerNews => "hackernews",
            Self::XTwitter => "x-twitter",
            Self::Reddit => "reddit",
            Self::ProductHunt => "producthunt",
            Self::DevTo => "devto",
            Self::Facebook => "facebook",
            Self::Medium => "medium",
            Self::StackOverflow => "stackoverflow",
            Self::Naver => "naver",
            Self::GeekNews => "geeknews",
            Self::KakaoTech => "kakao-tech",
            Self::TossTech => "toss-tech",
            Self::Yozm => "yozm",
            Self::Codenary => "codenary",
            Self::Npm => "npm",
            Self::PyPi => "pypi",
            Self::DockerHub => "dockerhub",
            Self::TechCrunch => "techcrunch",
            Self::TheVerge => "theverge",
            Self::ArsTechnica => "arstechnica",
            Self::InfoQ => "infoq",
            Self::TheNewStack => "thenewstack",
            Self::Lobsters => "lobsters",
            Self::Slashdot => "slashdot",
            Self::DZone => "dzone",
        }
    }

    /// Scoring weight reflecting source credibility.
    ///
    /// Primary tech-news and trend sources weigh 3, RSS-only blogs weigh 1.
    /// Sources without an entry fall back to 1.
    pub fn weight(&self) -> f64 {
        match self {
            Self::HackerNews | Self::GitHub | Self::GoogleTrends => 3.0,
            Self::YouTube => 2.5,
            Self::GoogleSearch
            | Self::Reddit
            | Self::ProductHunt
            | Self::StackOverflow
            | Self::XTwitter => 2.0,
            Self::DevTo | Self::Medium | Self::GeekNews | Self::Naver => 1.5,
            _ => 1.0,
        }
    }

    /// Get all sources
    pub fn all() -> Vec<Self> {
        vec![
            Self::GitHub,
            Self::YouTube,
            Self::GoogleTrends,
            Self::GoogleSearch,
            Self::HackerNews,
            Self::XTwitter,
            Self::Reddit,
            Self::ProductHunt,
            Self::DevTo,
            Self::Facebook,
            Self::Medium,
            Self::StackOverflow,
            Self::Naver,
            Self::GeekNews,
            Self::KakaoTech,
            Self::TossTech,
            Self::Yozm,
            Self::Codenary,
            Self::Npm,
            Self::PyPi,
            Self::DockerHub,
            Self::TechCrunch,
            Self::TheVerge,
            Self::ArsTechnica,
            Self::InfoQ,
            Self::TheNewStack,
            Self::Lobsters,
            Self::Slashdot,
            Self::DZone,
        ]
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::all()
            .into_iter()
            .find(|source| source.as_str() == needle)
            .ok_or_else(|| format!("unknown source: {s}"))
    }
}

/// Coarse technology-domain tag
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    AiMl,
    Frontend,
    Backend,
    Devops,
    Mobile,
    Database,
    Tools,
    Security,
    Cloud,
    #[default]
    #[serde(other)]
    Other,
}

impl Category {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AiMl => "ai-ml",
            Self::Frontend => "frontend",
            Self::Backend => "backend",
            Self::Devops => "devops",
            Self::Mobile => "mobile",
            Self::Database => "database",
            Self::Tools => "tools",
            Self::Security => "security",
            Self::Cloud => "cloud",
            Self::Other => "other",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::AiMl => "AI / ML",
            Self::Frontend => "Frontend",
            Self::Backend => "Backend",
            Self::Devops => "DevOps",
            Self::Mobile => "Mobile",
            Self::Database => "Database",
            Self::Tools => "Tools",
            Self::Security => "Security",
            Self::Cloud => "Cloud",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collected item reduced to the shape shared by every source.
///
/// `keywords` and `category` are assigned upstream; the analysis core
/// never looks at `title` or `description`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedItem {
    pub source: Source,
    pub title: String,
    pub url: String,
    /// Source-specific popularity (stars, points, votes, views)
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub category: Category,
    pub collected_at: DateTime<Utc>,
    /// Open per-source extras (e.g. `stars`, `language`, `viewCount`)
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl NormalizedItem {
    /// Create an item with empty optional fields
    pub fn new(
        source: Source,
        title: impl Into<String>,
        url: impl Into<String>,
        collected_at: DateTime<Utc>,
    ) -> Self {
        Self {
            source,
            title: title.into(),
            url: url.into(),
            score: 0.0,
            description: String::new(),
            author: String::new(),
            keywords: Vec::new(),
            category: Category::Other,
            collected_at,
            metadata: serde_json::Map::new(),
        }
    }

    /// Set keywords
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Set category
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Set popularity score, negative values clamp to zero
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score.max(0.0);
        self
    }
}
