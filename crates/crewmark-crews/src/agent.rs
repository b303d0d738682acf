//! Declarative agent definitions.
//!
//! An [`AgentSpec`] is a configuration record, not a runtime actor: role,
//! goal, behavioral framing, and the names of the tools the agent may call.
//! One constructor per agent kind; specs are immutable after construction.

/// A declarative agent definition.
#[derive(Debug, Clone)]
pub struct AgentSpec {
    /// Role name, also the key tasks use to reference the agent.
    pub role: String,
    /// What the agent is trying to achieve.
    pub goal: String,
    /// Behavioral framing injected into the system prompt.
    pub backstory: String,
    /// Names of the tools bound to this agent.
    pub tools: Vec<String>,
    /// Sampling temperature for this agent's LLM calls.
    pub temperature: f32,
    /// Turn budget for the agentic loop.
    pub max_turns: u32,
}

impl AgentSpec {
    /// The system prompt handed to the LLM for this agent.
    pub fn system_prompt(&self) -> String {
        format!(
            "You are {}.\n\nYour goal: {}\n\n{}",
            self.role, self.goal, self.backstory
        )
    }
}

const DEFAULT_TEMPERATURE: f32 = 0.7;
const ANALYTICAL_TEMPERATURE: f32 = 0.1;
const DEFAULT_MAX_TURNS: u32 = 25;

/// Content research and creation agent.
pub fn content_strategist() -> AgentSpec {
    AgentSpec {
        role: "Content Strategist & Creator".to_string(),
        goal: "Research trending topics in the target niche, then create \
               high-engagement content optimized for each social media platform. \
               Focus on educational, entertaining, and inspiring content that \
               drives organic reach and engagement."
            .to_string(),
        backstory: "You are a seasoned content strategist who has grown multiple brands \
                    from 0 to 100K followers using only organic strategies. You understand \
                    platform algorithms deeply - what works on Twitter is different from \
                    Instagram or LinkedIn. You always research trends before creating content \
                    and adapt your style to each platform's culture.\n\n\
                    IMPORTANT: You MUST use your 'search_trends' tool first to research \
                    current trends, then use 'save_post' to save each post you create."
            .to_string(),
        tools: vec![
            "search_trends".to_string(),
            "web_search".to_string(),
            "save_post".to_string(),
        ],
        temperature: DEFAULT_TEMPERATURE,
        max_turns: DEFAULT_MAX_TURNS,
    }
}

/// Scheduling and publishing agent.
pub fn social_media_manager() -> AgentSpec {
    AgentSpec {
        role: "Social Media Manager".to_string(),
        goal: "Schedule and publish content across all platforms at optimal times. \
               Monitor engagement, respond to comments, and adjust posting strategy \
               based on performance data. Maximize reach with zero ad spend."
            .to_string(),
        backstory: "You are a social media operations expert who manages multiple brand \
                    accounts simultaneously. You know the best posting times for each \
                    platform, understand how to write engaging captions, and always \
                    include proper hashtags and CTAs. You use Buffer for scheduling \
                    and track engagement metrics religiously.\n\n\
                    IMPORTANT: Use the content from the previous task as input. \
                    Save optimized posts using the 'save_post' tool."
            .to_string(),
        tools: vec![
            "schedule_post".to_string(),
            "save_post".to_string(),
            "read_analytics".to_string(),
        ],
        temperature: DEFAULT_TEMPERATURE,
        max_turns: DEFAULT_MAX_TURNS,
    }
}

/// Keyword research and article generation agent.
pub fn seo_specialist() -> AgentSpec {
    AgentSpec {
        role: "SEO & Programmatic Content Specialist".to_string(),
        goal: "Find high-value long-tail keywords, create SEO-optimized articles \
               targeting those keywords, and build a programmatic SEO system that \
               generates hundreds of pages targeting different search queries. \
               Drive organic traffic with zero ad spend."
            .to_string(),
        backstory: "You are an SEO expert who has built multiple sites to 100K+ monthly \
                    organic visitors using programmatic SEO and AI content. You understand \
                    search intent, keyword clustering, and how to create content that \
                    ranks. You focus on long-tail keywords with low competition and \
                    high commercial intent.\n\n\
                    IMPORTANT: ALWAYS use the 'keyword_research' tool first, then \
                    'save_article' to save each article."
            .to_string(),
        tools: vec![
            "keyword_research".to_string(),
            "web_search".to_string(),
            "save_article".to_string(),
        ],
        temperature: DEFAULT_TEMPERATURE,
        max_turns: DEFAULT_MAX_TURNS,
    }
}

/// Email sequence design agent.
pub fn email_specialist() -> AgentSpec {
    AgentSpec {
        role: "Email Marketing Automation Specialist".to_string(),
        goal: "Design and execute email marketing sequences that nurture leads \
               and convert them to customers. Create welcome sequences, value \
               drip campaigns, and promotional emails with high open and click rates. \
               Target: $36 ROI per $1 spent."
            .to_string(),
        backstory: "You are an email marketing expert who has built automated sequences \
                    that generate consistent revenue on autopilot. You write compelling \
                    subject lines (30%+ open rates), craft value-driven content that \
                    builds trust, and know exactly when to make a soft sell vs hard CTA. \
                    You follow the 80/20 rule: 80% value, 20% promotion."
            .to_string(),
        tools: vec![
            "save_email_draft".to_string(),
            "send_campaign".to_string(),
        ],
        temperature: DEFAULT_TEMPERATURE,
        max_turns: DEFAULT_MAX_TURNS,
    }
}

/// Performance analysis and reporting agent. Runs at a low temperature.
pub fn analytics_strategist() -> AgentSpec {
    AgentSpec {
        role: "Marketing Analytics & Optimization Strategist".to_string(),
        goal: "Monitor all marketing channels 24/7, analyze performance data, \
               identify what's working and what's not, and provide actionable \
               optimization recommendations. Send daily summary reports to the owner."
            .to_string(),
        backstory: "You are a data-driven marketing analyst who sees patterns others miss. \
                    You track engagement rates, conversion rates, email open rates, \
                    organic traffic growth, and customer acquisition costs across all \
                    channels. You make recommendations based on data, not opinions, \
                    and always suggest specific actions to improve performance."
            .to_string(),
        tools: vec![
            "read_analytics".to_string(),
            "save_report".to_string(),
            "notify_owner".to_string(),
            "web_search".to_string(),
        ],
        temperature: ANALYTICAL_TEMPERATURE,
        max_turns: DEFAULT_MAX_TURNS,
    }
}
