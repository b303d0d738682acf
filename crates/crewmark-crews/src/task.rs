//! Task records: one unit of work assigned to an agent within a crew.
//!
//! Tasks are instantiated fresh per pipeline invocation; the constructors
//! interpolate the pipeline parameters into the task description.

use crewmark_core::config::{ContentSchedule, SeoSettings};

/// A unit of work assigned to an agent.
#[derive(Debug, Clone)]
pub struct Task {
    /// What the agent is asked to do.
    pub description: String,
    /// What a good result looks like.
    pub expected_output: String,
    /// Role of the agent this task is assigned to.
    pub agent_role: String,
}

const DEFAULT_PLATFORMS: &[&str] = &["twitter", "instagram", "linkedin"];

/// Content generation task for the given niche.
pub fn content_task(niche: &str, platforms: Option<Vec<String>>) -> Task {
    let platforms = platforms
        .unwrap_or_else(|| DEFAULT_PLATFORMS.iter().map(|p| (*p).to_string()).collect());
    Task {
        description: format!(
            "Research the latest trends in '{}' and create engaging content \
             for these platforms: {}.\n\n\
             For each platform, create:\n\
             - Twitter: 3 tweets (max 280 chars each, include hashtags)\n\
             - Instagram: 1 caption (with emojis, hashtags, CTA)\n\
             - LinkedIn: 1 professional post (thought leadership style)\n\n\
             Research trending topics first, then create platform-optimized content. \
             Save each post using the save tool.",
            niche,
            platforms.join(", "),
        ),
        expected_output: "A set of platform-specific posts saved to files, with a summary \
                          of what was created and why these topics were chosen."
            .to_string(),
        agent_role: "Content Strategist & Creator".to_string(),
    }
}

/// Social scheduling task. Optimal posting hours come from the configured
/// per-platform schedule.
pub fn social_task(schedule: &ContentSchedule) -> Task {
    Task {
        description: format!(
            "Review the generated content and schedule it for posting.\n\n\
             For each post:\n\
             1. Review and optimize the copy if needed\n\
             2. Add appropriate hashtags if missing\n\
             3. Schedule via Buffer at optimal times\n\
             4. If Buffer is not configured, save posts locally with scheduling notes\n\n\
             Optimal posting times:\n\
             - Twitter: {}\n\
             - Instagram: {}\n\
             - LinkedIn: {}",
            format_hours(&schedule.twitter.best_hours),
            format_hours(&schedule.instagram.best_hours),
            format_hours(&schedule.linkedin.best_hours),
        ),
        expected_output: "Confirmation of posts scheduled or saved, with platform, \
                          time, and content summary for each."
            .to_string(),
        agent_role: "Social Media Manager".to_string(),
    }
}

/// SEO article generation task.
pub fn seo_task(topic: &str, num_articles: u32, settings: &SeoSettings) -> Task {
    Task {
        description: format!(
            "Create {} SEO-optimized articles about '{}'.\n\n\
             Steps:\n\
             1. Research keywords using the keyword tool\n\
             2. Find long-tail keywords with high intent\n\
             3. For each article:\n\
                - Write a {}+ word comprehensive article\n\
                - Include target keyword in title, H2s, and naturally in body\n\
                - Add {} internal linking suggestions\n\
                - Include FAQ section targeting 'People Also Ask' queries\n\
                - Save using the article save tool\n",
            num_articles, topic, settings.min_word_count, settings.internal_links_per_page,
        ),
        expected_output: "Articles saved with target keywords, word count, \
                          and SEO optimization notes for each."
            .to_string(),
        agent_role: "SEO & Programmatic Content Specialist".to_string(),
    }
}

/// Email nurture sequence task.
pub fn email_task(product_name: &str, value_proposition: &str) -> Task {
    Task {
        description: format!(
            "Create a 7-email nurture sequence for '{product_name}'.\n\n\
             Value proposition: {value_proposition}\n\n\
             Email sequence:\n\
             1. Welcome email (immediate) - introduce brand, set expectations\n\
             2. Value email #1 (day 2) - educational content, no selling\n\
             3. Case study (day 4) - social proof, results\n\
             4. Value email #2 (day 6) - more education, tips\n\
             5. Soft CTA (day 8) - introduce product naturally\n\
             6. Promotion (day 10) - clear offer, urgency\n\
             7. Feedback (day 14) - ask for input, re-engage\n\n\
             For each email, write a compelling subject line and full body. \
             Save each as a draft."
        ),
        expected_output: "7 email drafts saved with subject lines, send timing, \
                          and expected open/click rates."
            .to_string(),
        agent_role: "Email Marketing Automation Specialist".to_string(),
    }
}

/// Daily analytics review task.
pub fn analytics_task() -> Task {
    Task {
        description: "Review all marketing performance data and create a daily report.\n\n\
                      Analyze:\n\
                      1. Social media: engagement rates, follower growth, top posts\n\
                      2. Email: open rates, click rates, unsubscribes\n\
                      3. SEO: organic traffic, keyword rankings, new pages indexed\n\
                      4. Overall: conversion rates, lead count, revenue if available\n\n\
                      Then:\n\
                      - Identify top 3 wins\n\
                      - Identify top 3 areas for improvement\n\
                      - Provide specific action items for tomorrow\n\
                      - Save the report and send a notification summary to the owner"
            .to_string(),
        expected_output: "Daily report saved and owner notification sent with \
                          key metrics and action items."
            .to_string(),
        agent_role: "Marketing Analytics & Optimization Strategist".to_string(),
    }
}

fn format_hours(hours: &[u32]) -> String {
    let formatted: Vec<String> = hours
        .iter()
        .map(|h| match h {
            0 => "12 AM".to_string(),
            1..=11 => format!("{h} AM"),
            12 => "12 PM".to_string(),
            _ => format!("{} PM", h - 12),
        })
        .collect();
    formatted.join(", ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(&[9, 13, 18]), "9 AM, 1 PM, 6 PM");
        assert_eq!(format_hours(&[0, 12]), "12 AM, 12 PM");
    }

    #[test]
    fn test_content_task_interpolates_niche() {
        let task = content_task("AI tools for developers", None);
        assert!(task.description.contains("'AI tools for developers'"));
        assert!(task.description.contains("twitter, instagram, linkedin"));
    }

    #[test]
    fn test_seo_task_uses_settings() {
        let task = seo_task("ai marketing", 5, &SeoSettings::default());
        assert!(task.description.contains("Create 5 SEO-optimized articles"));
        assert!(task.description.contains("1500+ word"));
    }

    #[test]
    fn test_email_task_mentions_product_and_value() {
        let task = email_task("MarketBot", "AI marketing on autopilot");
        assert!(task.description.contains("'MarketBot'"));
        assert!(task.description.contains("AI marketing on autopilot"));
    }

    #[test]
    fn test_social_task_reflects_schedule() {
        let task = social_task(&ContentSchedule::default());
        assert!(task.description.contains("Twitter: 9 AM, 1 PM, 6 PM"));
    }
}
