use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

pub const DEFAULT_MODEL: &str = "llama3-8b-8192";
pub const DEFAULT_COMPLETION_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_SEARCH_BASE_URL: &str = "https://html.duckduckgo.com/html/";
pub const DEFAULT_MAX_RESULTS: usize = 5;
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 800;
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
pub const SEARCH_TIMEOUT: Duration = Duration::from_secs(10);
pub const COMPLETION_TIMEOUT: Duration = Duration::from_secs(30);

/// Key baked in at build time, used when `GROQ_API_KEY` is absent at runtime.
const COMPILED_API_KEY: Option<&str> = option_env!("GROQ_API_KEY");

/// Process-wide configuration, read once at startup and passed by reference
/// to every component constructor.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub model: String,
    pub completion_url: String,
    pub search_base_url: String,
    pub default_max_results: usize,
    pub default_temperature: f64,
    pub default_max_tokens: u32,
    pub user_agent: String,
    pub search_timeout: Duration,
    pub completion_timeout: Duration,
    pub bind_addr: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: COMPILED_API_KEY.unwrap_or_default().to_string(),
            model: DEFAULT_MODEL.to_string(),
            completion_url: DEFAULT_COMPLETION_URL.to_string(),
            search_base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
            default_max_results: DEFAULT_MAX_RESULTS,
            default_temperature: DEFAULT_TEMPERATURE,
            default_max_tokens: DEFAULT_MAX_TOKENS,
            user_agent: USER_AGENT.to_string(),
            search_timeout: SEARCH_TIMEOUT,
            completion_timeout: COMPLETION_TIMEOUT,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable source, falling back to the
    /// compiled defaults for anything missing or blank.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            api_key: var("GROQ_API_KEY").unwrap_or(defaults.api_key),
            model: var("GROQ_MODEL").unwrap_or(defaults.model),
            completion_url: var("GROQ_BASE_URL").unwrap_or(defaults.completion_url),
            search_base_url: var("SEARCH_BASE_URL").unwrap_or(defaults.search_base_url),
            default_max_results: parse_or(
                "DEFAULT_MAX_RESULTS",
                var("DEFAULT_MAX_RESULTS"),
                defaults.default_max_results,
            ),
            bind_addr: var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            ..defaults
        }
    }

    /// Settings pointing both providers at the given endpoints, for tests.
    pub fn for_endpoints(search_base_url: &str, completion_url: &str, api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            search_base_url: search_base_url.to_string(),
            completion_url: completion_url.to_string(),
            ..Self::default()
        }
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + Copy,
{
    match raw {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!(key = %key, value = %value, "Ignoring unparseable setting");
            default
        }),
        None => default,
    }
}
