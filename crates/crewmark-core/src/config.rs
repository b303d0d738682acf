use crate::{CrewmarkError, CrewmarkResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Process-wide runtime configuration.
///
/// Built exactly once at startup via [`Config::from_env`] and passed explicitly
/// into tool bindings and pipeline entry points. Credentials are never read
/// from the environment at call time.
#[derive(Debug, Clone)]
pub struct Config {
    /// LLM provider credentials and model selection.
    pub llm: LlmSettings,
    /// Search provider credentials and endpoints.
    pub search: SearchSettings,
    /// Social scheduling credentials and endpoint.
    pub social: SocialSettings,
    /// Email marketing credentials, endpoint, and sequence tuning.
    pub email: EmailSettings,
    /// Owner notification credentials and endpoint.
    pub telegram: TelegramSettings,
    /// SEO content tuning knobs.
    pub seo: SeoSettings,
    /// Per-platform posting schedule.
    pub schedule: ContentSchedule,
    /// Port the MCP server binds to.
    pub port: u16,
    /// Root directory artifacts are written under.
    pub output_dir: PathBuf,
}

/// LLM provider settings. DeepSeek speaks the OpenAI chat-completions format.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    /// API key for the LLM provider.
    pub api_key: String,
    /// Base URL of the OpenAI-compatible endpoint.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
}

/// Search provider settings.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    /// Tavily API key, if configured.
    pub tavily_api_key: Option<String>,
    /// Tavily API base URL.
    pub tavily_base_url: String,
    /// Serper API key, if configured.
    pub serper_api_key: Option<String>,
    /// Serper API base URL.
    pub serper_base_url: String,
    /// Google autocomplete base URL (no key required).
    pub suggest_base_url: String,
}

/// Buffer social scheduling settings.
#[derive(Debug, Clone)]
pub struct SocialSettings {
    /// Buffer access token, if configured.
    pub buffer_access_token: Option<String>,
    /// Buffer API base URL.
    pub buffer_base_url: String,
}

/// MailerLite settings plus email sequence tuning.
#[derive(Debug, Clone)]
pub struct EmailSettings {
    /// MailerLite API key, if configured.
    pub mailerlite_api_key: Option<String>,
    /// MailerLite API base URL.
    pub mailerlite_base_url: String,
    /// Hours before the welcome email is sent.
    pub welcome_delay_hours: u32,
    /// Days between nurture emails.
    pub nurture_interval_days: u32,
    /// Maximum emails in a generated sequence.
    pub max_sequence_length: u32,
}

/// Telegram owner-notification settings.
#[derive(Debug, Clone)]
pub struct TelegramSettings {
    /// Bot token, if configured.
    pub bot_token: Option<String>,
    /// Chat the bot posts to, if configured.
    pub chat_id: Option<String>,
    /// Telegram API base URL.
    pub base_url: String,
}

/// SEO content generation knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeoSettings {
    /// Keywords gathered per research batch.
    pub target_keywords_per_batch: u32,
    /// Minimum article word count.
    pub min_word_count: u32,
    /// Internal link suggestions per page.
    pub internal_links_per_page: u32,
}

impl Default for SeoSettings {
    fn default() -> Self {
        Self {
            target_keywords_per_batch: 10,
            min_word_count: 1500,
            internal_links_per_page: 3,
        }
    }
}

/// Posting cadence for one platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformSchedule {
    /// Posts queued per day.
    pub posts_per_day: u32,
    /// Best posting hours, 24h local time.
    pub best_hours: Vec<u32>,
}

/// Per-platform posting schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentSchedule {
    /// Twitter cadence.
    pub twitter: PlatformSchedule,
    /// Instagram cadence.
    pub instagram: PlatformSchedule,
    /// LinkedIn cadence.
    pub linkedin: PlatformSchedule,
}

impl Default for ContentSchedule {
    fn default() -> Self {
        Self {
            twitter: PlatformSchedule {
                posts_per_day: 3,
                best_hours: vec![9, 13, 18],
            },
            instagram: PlatformSchedule {
                posts_per_day: 1,
                best_hours: vec![11, 19],
            },
            linkedin: PlatformSchedule {
                posts_per_day: 1,
                best_hours: vec![8, 12],
            },
        }
    }
}

const DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com";
const DEEPSEEK_MODEL: &str = "deepseek-chat";
const TAVILY_BASE_URL: &str = "https://api.tavily.com";
const SERPER_BASE_URL: &str = "https://google.serper.dev";
const SUGGEST_BASE_URL: &str = "https://suggestqueries.google.com";
const BUFFER_BASE_URL: &str = "https://api.bufferapp.com";
const MAILERLITE_BASE_URL: &str = "https://connect.mailerlite.com";
const TELEGRAM_BASE_URL: &str = "https://api.telegram.org";

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

impl Config {
    /// Builds the configuration from environment variables.
    ///
    /// `DEEPSEEK_API_KEY` is required; every other credential is optional and
    /// its binding degrades to a documented fallback when absent. `PORT`
    /// defaults to 8080, `OUTPUT_DIR` to `./output`.
    pub fn from_env() -> CrewmarkResult<Self> {
        let api_key = env_opt("DEEPSEEK_API_KEY")
            .ok_or_else(|| CrewmarkError::Config("DEEPSEEK_API_KEY is not set".to_string()))?;

        let port = match env_opt("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| CrewmarkError::Config(format!("Invalid PORT '{raw}': {e}")))?,
            None => 8080,
        };

        Ok(Self {
            llm: LlmSettings {
                api_key,
                base_url: env_opt("DEEPSEEK_BASE_URL")
                    .unwrap_or_else(|| DEEPSEEK_BASE_URL.to_string()),
                model: env_opt("DEEPSEEK_MODEL").unwrap_or_else(|| DEEPSEEK_MODEL.to_string()),
            },
            search: SearchSettings {
                tavily_api_key: env_opt("TAVILY_API_KEY"),
                tavily_base_url: env_opt("TAVILY_BASE_URL")
                    .unwrap_or_else(|| TAVILY_BASE_URL.to_string()),
                serper_api_key: env_opt("SERPER_API_KEY"),
                serper_base_url: env_opt("SERPER_BASE_URL")
                    .unwrap_or_else(|| SERPER_BASE_URL.to_string()),
                suggest_base_url: env_opt("SUGGEST_BASE_URL")
                    .unwrap_or_else(|| SUGGEST_BASE_URL.to_string()),
            },
            social: SocialSettings {
                buffer_access_token: env_opt("BUFFER_ACCESS_TOKEN"),
                buffer_base_url: env_opt("BUFFER_BASE_URL")
                    .unwrap_or_else(|| BUFFER_BASE_URL.to_string()),
            },
            email: EmailSettings {
                mailerlite_api_key: env_opt("MAILERLITE_API_KEY"),
                mailerlite_base_url: env_opt("MAILERLITE_BASE_URL")
                    .unwrap_or_else(|| MAILERLITE_BASE_URL.to_string()),
                welcome_delay_hours: 0,
                nurture_interval_days: 2,
                max_sequence_length: 7,
            },
            telegram: TelegramSettings {
                bot_token: env_opt("TELEGRAM_BOT_TOKEN"),
                chat_id: env_opt("TELEGRAM_CHAT_ID"),
                base_url: env_opt("TELEGRAM_BASE_URL")
                    .unwrap_or_else(|| TELEGRAM_BASE_URL.to_string()),
            },
            seo: SeoSettings::default(),
            schedule: ContentSchedule::default(),
            port,
            output_dir: env_opt("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./output")),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule_matches_platform_cadence() {
        let schedule = ContentSchedule::default();
        assert_eq!(schedule.twitter.posts_per_day, 3);
        assert_eq!(schedule.twitter.best_hours, vec![9, 13, 18]);
        assert_eq!(schedule.instagram.best_hours, vec![11, 19]);
        assert_eq!(schedule.linkedin.best_hours, vec![8, 12]);
    }

    #[test]
    fn test_default_seo_settings() {
        let seo = SeoSettings::default();
        assert_eq!(seo.target_keywords_per_batch, 10);
        assert_eq!(seo.min_word_count, 1500);
        assert_eq!(seo.internal_links_per_page, 3);
    }
}
