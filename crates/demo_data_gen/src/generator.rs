//! Record factories for every entity kind.
//!
//! `Generator::generate` is the single entry point the seeding pipeline
//! uses; the typed factories behind it are public for callers that want a
//! concrete record type. Generation performs no I/O and only fails when a
//! dependent kind is requested without the parents it must attach to.

use crate::error::PreconditionError;
use crate::fake::{
    company_domain, slug, FakeData, AGENT_ACTIONS, AGENT_ERRORS, AGENT_TRIGGERS,
    AUDIENCE_CRITERIA, CAMPAIGN_THEMES, COMPANY_SIZES, INDUSTRIES, INTENT_SIGNALS,
    INTERACTION_SOURCES, JOB_TITLES, PAIN_POINTS, PROSPECT_SOURCES, PROSPECT_TAGS,
    REVENUE_BUCKETS, SEND_TIMES, SUBJECT_LINES, TIMEZONES,
};
use crate::records::{
    AgentLog, AgentStatus, AgentType, Campaign, CampaignContent, CampaignMetrics, CampaignSettings,
    CampaignStatus, CampaignType, CompanyProfile, CompositeScore, EngagementScore, EnrichmentData,
    EntityKind, Inserted, Interaction, InteractionDetails, InteractionType, Message,
    MessageStatus, Personalization, Prospect, ProspectStatus, Record, SocialProfiles,
    TargetAudience,
};
use chrono::{DateTime, TimeDelta, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::json;
use std::collections::HashSet;

/// 2025-01-01T00:00:00Z
const DEFAULT_WINDOW_START_UNIX: i64 = 1_735_689_600;
const DEFAULT_WINDOW_DAYS: u32 = 90;

/// Probability an optional field is populated
const PHONE_PROBABILITY: f64 = 0.3;
const NOTES_PROBABILITY: f64 = 0.5;
const LAST_CONTACTED_PROBABILITY: f64 = 0.6;
const TWITTER_PROBABILITY: f64 = 0.5;
const LINK_PROBABILITY: f64 = 0.4;
const TRACK_OPENS_PROBABILITY: f64 = 0.8;

/// Campaign length bounds in days; the end date never exceeds start + max
pub const CAMPAIGN_MIN_DAYS: u32 = 7;
pub const CAMPAIGN_MAX_DAYS: u32 = 37;
/// Most days a campaign is created ahead of its start date
pub const CAMPAIGN_MAX_LEAD_DAYS: u32 = 14;

/// Fixed interval every generated timestamp is drawn from.
///
/// Pinned rather than derived from the wall clock so that two runs with
/// the same seed produce the same records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DemoWindow {
    /// `None` when the window, widened by the campaign lead time before it
    /// and the longest campaign after it, leaves the representable range.
    pub fn new(start: DateTime<Utc>, days: u32) -> Option<Self> {
        let end = start.checked_add_signed(TimeDelta::try_days(i64::from(days))?)?;
        start.checked_sub_signed(TimeDelta::try_days(i64::from(CAMPAIGN_MAX_LEAD_DAYS))?)?;
        end.checked_add_signed(TimeDelta::try_days(i64::from(CAMPAIGN_MAX_DAYS))?)?;
        Some(Self { start, end })
    }

    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        t >= self.start && t <= self.end
    }
}

impl Default for DemoWindow {
    fn default() -> Self {
        let start =
            DateTime::<Utc>::default() + TimeDelta::seconds(DEFAULT_WINDOW_START_UNIX);
        Self {
            start,
            end: start + TimeDelta::days(i64::from(DEFAULT_WINDOW_DAYS)),
        }
    }
}

/// Previously inserted parents available to dependent kinds.
///
/// Built by the caller from insertion results; the generator only reads it.
#[derive(Debug, Clone, Default)]
pub struct GenerationContext {
    pub prospects: Vec<Inserted<Prospect>>,
    pub campaigns: Vec<Inserted<Campaign>>,
}

impl GenerationContext {
    pub fn with_prospects(mut self, prospects: Vec<Inserted<Prospect>>) -> Self {
        self.prospects = prospects;
        self
    }

    pub fn with_campaigns(mut self, campaigns: Vec<Inserted<Campaign>>) -> Self {
        self.campaigns = campaigns;
        self
    }
}

/// Synthetic data generator
pub struct Generator {
    fake: FakeData<ChaCha8Rng>,
    window: DemoWindow,
    messages_min: usize,
    messages_max: usize,
}

impl Generator {
    pub const DEFAULT_MESSAGES_PER_CAMPAIGN: (usize, usize) = (5, 15);

    pub fn new(seed: u64) -> Self {
        let (messages_min, messages_max) = Self::DEFAULT_MESSAGES_PER_CAMPAIGN;
        Self {
            fake: FakeData::new(ChaCha8Rng::seed_from_u64(seed)),
            window: DemoWindow::default(),
            messages_min,
            messages_max,
        }
    }

    pub fn with_window(mut self, window: DemoWindow) -> Self {
        self.window = window;
        self
    }

    /// Number of prospects each messaged campaign reaches
    pub fn with_messages_per_campaign(mut self, min: usize, max: usize) -> Self {
        self.messages_min = min;
        self.messages_max = max;
        self
    }

    pub fn window(&self) -> &DemoWindow {
        &self.window
    }

    /// Generate a batch of `kind` records.
    ///
    /// For root kinds and interactions `count` is the number of records.
    /// For enrichment and engagement scores it is the number of leading
    /// prospects in `ctx` that get one record each; for messages it is the
    /// number of leading campaigns in `ctx` that each message a random
    /// subset of prospects.
    pub fn generate(
        &mut self,
        kind: EntityKind,
        count: usize,
        ctx: &GenerationContext,
    ) -> Result<Vec<Record>, PreconditionError> {
        if count > 0 {
            for parent in kind.references() {
                let available = match parent {
                    EntityKind::Prospect => ctx.prospects.len(),
                    EntityKind::Campaign => ctx.campaigns.len(),
                    _ => 0,
                };
                if available == 0 {
                    return Err(PreconditionError::MissingParents { kind, parent });
                }
            }
        }

        let records = match kind {
            EntityKind::Prospect => self
                .prospects(count)
                .into_iter()
                .map(Record::Prospect)
                .collect(),
            EntityKind::EnrichmentData => {
                let subset = leading(&ctx.prospects, count);
                self.enrichment(subset)
                    .into_iter()
                    .map(Record::EnrichmentData)
                    .collect()
            }
            EntityKind::EngagementScore => {
                let subset = leading(&ctx.prospects, count);
                self.engagement_scores(subset)
                    .into_iter()
                    .map(Record::EngagementScore)
                    .collect()
            }
            EntityKind::Campaign => self
                .campaigns(count)
                .into_iter()
                .map(Record::Campaign)
                .collect(),
            EntityKind::Message => {
                let mut records = Vec::new();
                for campaign in leading(&ctx.campaigns, count) {
                    let messages = self.messages(campaign, &ctx.prospects)?;
                    records.extend(messages.into_iter().map(Record::Message));
                }
                records
            }
            EntityKind::Interaction => self
                .interactions(count, &ctx.prospects)?
                .into_iter()
                .map(Record::Interaction)
                .collect(),
            EntityKind::AgentLog => self
                .agent_logs(count)
                .into_iter()
                .map(Record::AgentLog)
                .collect(),
        };

        Ok(records)
    }

    pub fn prospects(&mut self, count: usize) -> Vec<Prospect> {
        let mut emails = HashSet::with_capacity(count);
        let mut prospects = Vec::with_capacity(count);

        while prospects.len() < count {
            let prospect = self.prospect();
            if emails.insert(prospect.email.clone()) {
                prospects.push(prospect);
            }
        }

        prospects
    }

    fn prospect(&mut self) -> Prospect {
        let first = self.fake.first_name();
        let last = self.fake.last_name();
        let company = self.fake.company_name();
        let email = self.fake.email(&first, &last, &company_domain(&company));
        let created_at = self
            .fake
            .datetime_between(self.window.start, self.window.end);

        let notes = if self.fake.chance(NOTES_PROBABILITY) {
            Some(self.fake.sentence(6, 14))
        } else {
            None
        };
        let phone = if self.fake.chance(PHONE_PROBABILITY) {
            Some(self.fake.phone())
        } else {
            None
        };
        let last_contacted = if self.fake.chance(LAST_CONTACTED_PROBABILITY) {
            Some(self.fake.datetime_between(created_at, self.window.end))
        } else {
            None
        };

        Prospect {
            email,
            name: format!("{} {}", first, last),
            title: self.fake.pick(JOB_TITLES).to_string(),
            company,
            status: *self.fake.pick(&ProspectStatus::ALL),
            source: self.fake.pick(PROSPECT_SOURCES).to_string(),
            score: self.fake.int_range(0, 100) as u8,
            tags: self.fake.subset(PROSPECT_TAGS, 1, 3),
            notes,
            phone,
            last_contacted,
            created_at,
        }
    }

    /// One enrichment profile per given prospect
    pub fn enrichment(&mut self, prospects: &[Inserted<Prospect>]) -> Vec<EnrichmentData> {
        prospects
            .iter()
            .map(|parent| {
                let prospect = &parent.record;
                let twitter = if self.fake.chance(TWITTER_PROBABILITY) {
                    Some(format!(
                        "https://twitter.com/{}",
                        slug(&prospect.name).replace('-', "_")
                    ))
                } else {
                    None
                };

                EnrichmentData {
                    prospect_id: parent.id.clone(),
                    company_info: CompanyProfile {
                        name: prospect.company.clone(),
                        industry: self.fake.pick(INDUSTRIES).to_string(),
                        size: self.fake.pick(COMPANY_SIZES).to_string(),
                        revenue: self.fake.pick(REVENUE_BUCKETS).to_string(),
                        location: self.fake.location(),
                    },
                    social_profiles: SocialProfiles {
                        linkedin: format!("https://www.linkedin.com/in/{}", slug(&prospect.name)),
                        twitter,
                        website: format!("https://{}", company_domain(&prospect.company)),
                    },
                    intent_signals: self.fake.subset(INTENT_SIGNALS, 1, 3),
                    pain_points: self.fake.subset(PAIN_POINTS, 1, 3),
                    enriched_at: self.later_in_window(prospect.created_at),
                }
            })
            .collect()
    }

    /// One composite score per given prospect
    pub fn engagement_scores(&mut self, prospects: &[Inserted<Prospect>]) -> Vec<EngagementScore> {
        prospects
            .iter()
            .map(|parent| {
                let max = u32::from(CompositeScore::CHANNEL_MAX);
                let mut channel = || self.fake.int_range(0, max) as u8;
                let email_engagement = channel();
                let website_activity = channel();
                let social_engagement = channel();
                let content_interaction = channel();
                let response_rate = channel();

                EngagementScore {
                    prospect_id: parent.id.clone(),
                    score: CompositeScore {
                        total: email_engagement
                            + website_activity
                            + social_engagement
                            + content_interaction
                            + response_rate,
                        email_engagement,
                        website_activity,
                        social_engagement,
                        content_interaction,
                        response_rate,
                    },
                    calculated_at: self.later_in_window(parent.record.created_at),
                }
            })
            .collect()
    }

    pub fn campaigns(&mut self, count: usize) -> Vec<Campaign> {
        (0..count).map(|_| self.campaign()).collect()
    }

    fn campaign(&mut self) -> Campaign {
        let status = *self.fake.pick(&CampaignStatus::ALL);
        let start_date = self
            .fake
            .datetime_between(self.window.start, self.window.end);
        let length = self.fake.int_range(CAMPAIGN_MIN_DAYS, CAMPAIGN_MAX_DAYS);
        let lead_time = self.fake.int_range(1, CAMPAIGN_MAX_LEAD_DAYS);
        let audience_size = self.fake.int_range(50, 500);

        let template_count = self.fake.int_range(1, 2);
        let template_ids = (0..template_count)
            .map(|_| format!("tmpl_{}", self.fake.token(8)))
            .collect();

        Campaign {
            name: format!(
                "{} {}",
                self.fake.pick(CAMPAIGN_THEMES),
                self.fake.int_range(1, 99)
            ),
            campaign_type: *self.fake.pick(&CampaignType::ALL),
            status,
            start_date,
            end_date: start_date + TimeDelta::days(i64::from(length)),
            target_audience: TargetAudience {
                criteria: self.fake.subset(AUDIENCE_CRITERIA, 1, 3),
                size: audience_size,
            },
            content: CampaignContent {
                subject_lines: self.fake.subset(SUBJECT_LINES, 2, 3),
                template_ids,
            },
            settings: CampaignSettings {
                send_time: self.fake.pick(SEND_TIMES).to_string(),
                timezone: self.fake.pick(TIMEZONES).to_string(),
                daily_limit: self.fake.int_range(25, 200),
                follow_up_days: self.fake.int_range(2, 7) as u8,
                track_opens: self.fake.chance(TRACK_OPENS_PROBABILITY),
            },
            metrics: self.campaign_metrics(status, audience_size),
            created_at: start_date - TimeDelta::days(i64::from(lead_time)),
        }
    }

    fn campaign_metrics(&mut self, status: CampaignStatus, audience_size: u32) -> CampaignMetrics {
        if matches!(status, CampaignStatus::Draft | CampaignStatus::Scheduled) {
            return CampaignMetrics {
                sent: 0,
                delivered: 0,
                opened: 0,
                clicked: 0,
                replied: 0,
            };
        }

        let sent = self.fake.int_range(0, audience_size);
        let delivered = self.fake.int_range(sent * 85 / 100, sent);
        let opened = self.fake.int_range(0, delivered);
        let clicked = self.fake.int_range(0, opened);
        let replied = self.fake.int_range(0, clicked);

        CampaignMetrics {
            sent,
            delivered,
            opened,
            clicked,
            replied,
        }
    }

    /// Exactly one message for each prospect in a random subset of
    /// `prospects`, sized within the configured per-campaign range.
    pub fn messages(
        &mut self,
        campaign: &Inserted<Campaign>,
        prospects: &[Inserted<Prospect>],
    ) -> Result<Vec<Message>, PreconditionError> {
        if self.messages_min > self.messages_max {
            return Err(PreconditionError::InvalidRange {
                kind: EntityKind::Message,
                min: self.messages_min,
                max: self.messages_max,
            });
        }
        if prospects.is_empty() {
            return Err(PreconditionError::MissingParents {
                kind: EntityKind::Message,
                parent: EntityKind::Prospect,
            });
        }

        let fanout = self.fake.int_range(self.messages_min as u32, self.messages_max as u32);
        let recipients = self.fake.sample(prospects, fanout as usize);
        let c = &campaign.record;

        let messages = recipients
            .into_iter()
            .map(|parent| {
                let prospect = &parent.record;
                let (subject_variant, template) = if c.content.subject_lines.is_empty() {
                    (0, c.name.clone())
                } else {
                    let i = self.fake.index(c.content.subject_lines.len());
                    (i, c.content.subject_lines[i].clone())
                };
                let subject = template
                    .replace("{company}", &prospect.company)
                    .replace("{first_name}", prospect.first_name());
                let body = format!(
                    "Hi {},\n\n{}\n\nBest regards,\nThe Growth Team",
                    prospect.first_name(),
                    self.fake.paragraph(2, 4)
                );

                Message {
                    campaign_id: campaign.id.clone(),
                    prospect_id: parent.id.clone(),
                    channel: *self.fake.pick(c.campaign_type.channels()),
                    subject,
                    body,
                    status: *self.fake.pick(&MessageStatus::ALL),
                    sent_at: self.fake.datetime_between(c.start_date, c.end_date),
                    personalization: Personalization {
                        first_name: prospect.first_name().to_string(),
                        company: prospect.company.clone(),
                        subject_variant,
                    },
                }
            })
            .collect();

        Ok(messages)
    }

    /// `count` interactions, each for a prospect chosen uniformly at random
    pub fn interactions(
        &mut self,
        count: usize,
        prospects: &[Inserted<Prospect>],
    ) -> Result<Vec<Interaction>, PreconditionError> {
        if count > 0 && prospects.is_empty() {
            return Err(PreconditionError::MissingParents {
                kind: EntityKind::Interaction,
                parent: EntityKind::Prospect,
            });
        }

        let interactions = (0..count)
            .map(|_| {
                let parent = self.fake.pick(prospects);
                let interaction_type = *self.fake.pick(&InteractionType::ALL);
                let link = if self.fake.chance(LINK_PROBABILITY) {
                    Some(format!(
                        "https://demo.example.com/resources/{}",
                        self.fake.token(10)
                    ))
                } else {
                    None
                };

                Interaction {
                    prospect_id: parent.id.clone(),
                    interaction_type,
                    channel: interaction_type.channel().to_string(),
                    details: InteractionDetails {
                        source: self.fake.pick(INTERACTION_SOURCES).to_string(),
                        duration_seconds: self.fake.int_range(5, 1800),
                        link,
                    },
                    timestamp: self
                        .fake
                        .datetime_between(self.window.start, self.window.end),
                }
            })
            .collect();

        Ok(interactions)
    }

    pub fn agent_logs(&mut self, count: usize) -> Vec<AgentLog> {
        (0..count).map(|_| self.agent_log()).collect()
    }

    fn agent_log(&mut self) -> AgentLog {
        let agent_index = self.fake.index(AgentType::ALL.len());
        let agent_type = AgentType::ALL[agent_index];
        let action = self.fake.pick(AGENT_ACTIONS[agent_index]).to_string();
        let status = *self.fake.pick(&AgentStatus::ALL);
        let batch = self.fake.int_range(1, 50);

        let input = json!({
            "trigger": self.fake.pick(AGENT_TRIGGERS),
            "batch_size": batch,
        });
        let output = match status {
            AgentStatus::Completed => json!({
                "processed": batch,
                "summary": self.fake.sentence(4, 9),
            }),
            AgentStatus::Failed => json!({
                "error": self.fake.pick(AGENT_ERRORS),
            }),
            AgentStatus::Started | AgentStatus::InProgress => json!({
                "progress": self.fake.int_range(0, 99),
            }),
        };

        AgentLog {
            agent_type,
            action,
            status,
            input,
            output,
            execution_time_ms: self.fake.int_range(50, 15_000),
            created_at: self
                .fake
                .datetime_between(self.window.start, self.window.end),
        }
    }

    /// Instant between `after` (clamped into the window) and the window end
    fn later_in_window(&mut self, after: DateTime<Utc>) -> DateTime<Utc> {
        let from = after.max(self.window.start);
        self.fake.datetime_between(from, self.window.end)
    }
}

/// First `count` items in insertion order
fn leading<T>(items: &[T], count: usize) -> &[T] {
    &items[..count.min(items.len())]
}
