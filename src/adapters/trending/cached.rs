//! Cached trending source used in cached mode and as the live feed fallback.

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::domain::errors::WorkflowResult;
use crate::domain::models::TrendingItem;
use crate::domain::ports::TrendingCandidateSource;

/// A fallback list never offers fewer candidates than this.
pub const MIN_FALLBACK_ITEMS: usize = 10;

const BUILTIN: [(&str, i64, &str); 12] = [
    ("Bun 1.2 ships a built-in Postgres client", 812, "https://bun.sh/blog"),
    ("Rust in the Linux kernel: the first year of drivers", 744, "https://lwn.net/"),
    ("Deno 2 adds npm compatibility, again", 655, "https://deno.com/blog"),
    ("htmx hits 40k stars and nobody wrote JavaScript", 603, "https://htmx.org/"),
    ("SQLite is now the most deployed database in orbit", 577, "https://sqlite.org/"),
    ("React Compiler leaves beta", 541, "https://react.dev/blog"),
    ("Zig 0.14 released with incremental compilation", 498, "https://ziglang.org/"),
    ("WebAssembly components reach the browser", 455, "https://webassembly.org/"),
    ("Astro 5 content layer explained", 402, "https://astro.build/blog"),
    ("Git 3.0 switches the default hash to SHA-256", 388, "https://git-scm.com/"),
    ("Tailwind CSS v4 drops the config file", 351, "https://tailwindcss.com/blog"),
    ("Postgres 17 makes VACUUM boring", 319, "https://www.postgresql.org/"),
];

/// Serves candidates from a JSON cache file, or from a built-in list when
/// no file is configured or it cannot be read. Never fails.
#[derive(Debug, Clone, Default)]
pub struct CachedTrendingSource {
    cache_file: Option<PathBuf>,
}

impl CachedTrendingSource {
    pub const fn new(cache_file: Option<PathBuf>) -> Self {
        Self { cache_file }
    }

    pub fn builtin() -> Vec<TrendingItem> {
        BUILTIN
            .iter()
            .map(|(title, score, url)| TrendingItem::new(*title, *score, *url))
            .collect()
    }

    async fn load_file(&self) -> Option<Vec<TrendingItem>> {
        let path = self.cache_file.as_ref()?;
        let raw = match tokio::fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Trending cache unreadable, using built-in list");
                return None;
            }
        };
        match serde_json::from_str::<Vec<TrendingItem>>(&raw) {
            Ok(items) if !items.is_empty() => Some(items),
            Ok(_) => {
                warn!(path = %path.display(), "Trending cache is empty, using built-in list");
                None
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Trending cache is not valid JSON, using built-in list");
                None
            }
        }
    }
}

/// Pads a short cache file with built-in candidates it does not already list.
fn top_up(mut items: Vec<TrendingItem>) -> Vec<TrendingItem> {
    if items.len() >= MIN_FALLBACK_ITEMS {
        return items;
    }

    let from_file = items.len();
    for candidate in CachedTrendingSource::builtin() {
        if items.len() >= MIN_FALLBACK_ITEMS {
            break;
        }
        if !items.iter().any(|i| i.title.eq_ignore_ascii_case(&candidate.title)) {
            items.push(candidate);
        }
    }
    warn!(from_file, total = items.len(), "Trending cache is short, topped up from built-in list");
    items
}

#[async_trait]
impl TrendingCandidateSource for CachedTrendingSource {
    fn name(&self) -> &'static str {
        "cached"
    }

    async fn fetch(&self, limit: usize) -> WorkflowResult<Vec<TrendingItem>> {
        let items = match self.load_file().await {
            Some(items) => top_up(items),
            None => Self::builtin(),
        };
        debug!(count = items.len().min(limit), "Serving cached trending candidates");
        Ok(items.into_iter().take(limit).collect())
    }
}
