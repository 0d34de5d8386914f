//! Record types for the seven seeded entity kinds.
//!
//! Field names match the column names of the remote tables, so a record
//! serializes directly into an insertable JSON row. Identifiers are never
//! generated here: foreign keys are `RecordId`s copied from rows the store
//! has already accepted.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Closed set of entity kinds, listed in dependency order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Prospect,
    EnrichmentData,
    EngagementScore,
    Campaign,
    Message,
    Interaction,
    AgentLog,
}

impl EntityKind {
    /// Every kind, parents before children.
    pub const ALL: [EntityKind; 7] = [
        EntityKind::Prospect,
        EntityKind::EnrichmentData,
        EntityKind::EngagementScore,
        EntityKind::Campaign,
        EntityKind::Message,
        EntityKind::Interaction,
        EntityKind::AgentLog,
    ];

    /// Remote table holding this kind
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::Prospect => "prospects",
            EntityKind::EnrichmentData => "enrichment_data",
            EntityKind::EngagementScore => "engagement_scores",
            EntityKind::Campaign => "campaigns",
            EntityKind::Message => "messages",
            EntityKind::Interaction => "interactions",
            EntityKind::AgentLog => "agent_logs",
        }
    }

    /// Human-readable label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Prospect => "Prospects",
            EntityKind::EnrichmentData => "Enrichment data",
            EntityKind::EngagementScore => "Engagement scores",
            EntityKind::Campaign => "Campaigns",
            EntityKind::Message => "Messages",
            EntityKind::Interaction => "Interactions",
            EntityKind::AgentLog => "Agent logs",
        }
    }

    /// Foreign-key columns of this kind and the kind each one references.
    pub fn foreign_keys(&self) -> &'static [(&'static str, EntityKind)] {
        match self {
            EntityKind::EnrichmentData
            | EntityKind::EngagementScore
            | EntityKind::Interaction => &[("prospect_id", EntityKind::Prospect)],
            EntityKind::Message => &[
                ("campaign_id", EntityKind::Campaign),
                ("prospect_id", EntityKind::Prospect),
            ],
            EntityKind::Prospect | EntityKind::Campaign | EntityKind::AgentLog => &[],
        }
    }

    /// Kinds this kind references (its parents in the FK graph)
    pub fn references(&self) -> Vec<EntityKind> {
        self.foreign_keys().iter().map(|(_, parent)| *parent).collect()
    }

    /// Whether later kinds need the identifiers assigned to this kind's rows
    pub fn has_dependents(&self) -> bool {
        EntityKind::ALL
            .iter()
            .any(|kind| kind.references().contains(self))
    }

    pub fn from_table(table: &str) -> Option<EntityKind> {
        EntityKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.table() == table)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table())
    }
}

/// Opaque identifier assigned by the remote store.
///
/// Stores hand ids back either as JSON numbers or strings; both are kept
/// as text and re-sent as strings, which the store casts to the column type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Read the `id` column of a row returned by an insertion.
    pub fn from_row(row: &Value) -> Option<Self> {
        match row.get("id")? {
            Value::String(s) if !s.is_empty() => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(n.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// A record the store has accepted, paired with the id it assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct Inserted<T> {
    pub id: RecordId,
    pub record: T,
}

impl<T> Inserted<T> {
    pub fn new(id: RecordId, record: T) -> Self {
        Self { id, record }
    }
}

// =============================================================================
// Prospects
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProspectStatus {
    New,
    Qualified,
    Engaged,
    Opportunity,
    Customer,
    Lost,
}

impl ProspectStatus {
    pub const ALL: [ProspectStatus; 6] = [
        ProspectStatus::New,
        ProspectStatus::Qualified,
        ProspectStatus::Engaged,
        ProspectStatus::Opportunity,
        ProspectStatus::Customer,
        ProspectStatus::Lost,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prospect {
    pub email: String,
    pub name: String,
    pub title: String,
    pub company: String,
    pub status: ProspectStatus,
    pub source: String,
    pub score: u8,
    pub tags: Vec<String>,
    pub notes: Option<String>,
    pub phone: Option<String>,
    pub last_contacted: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Prospect {
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

// =============================================================================
// Enrichment and scoring
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyProfile {
    pub name: String,
    pub industry: String,
    pub size: String,
    pub revenue: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SocialProfiles {
    pub linkedin: String,
    pub twitter: Option<String>,
    pub website: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichmentData {
    pub prospect_id: RecordId,
    pub company_info: CompanyProfile,
    pub social_profiles: SocialProfiles,
    pub intent_signals: Vec<String>,
    pub pain_points: Vec<String>,
    pub enriched_at: DateTime<Utc>,
}

/// Composite engagement score: five channel sub-scores of 0..=20 each,
/// summing to `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompositeScore {
    pub total: u8,
    pub email_engagement: u8,
    pub website_activity: u8,
    pub social_engagement: u8,
    pub content_interaction: u8,
    pub response_rate: u8,
}

impl CompositeScore {
    pub const CHANNEL_MAX: u8 = 20;

    pub fn channels(&self) -> [u8; 5] {
        [
            self.email_engagement,
            self.website_activity,
            self.social_engagement,
            self.content_interaction,
            self.response_rate,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngagementScore {
    pub prospect_id: RecordId,
    pub score: CompositeScore,
    pub calculated_at: DateTime<Utc>,
}

// =============================================================================
// Campaigns and messages
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignType {
    Email,
    Linkedin,
    MultiChannel,
    Nurture,
}

impl CampaignType {
    pub const ALL: [CampaignType; 4] = [
        CampaignType::Email,
        CampaignType::Linkedin,
        CampaignType::MultiChannel,
        CampaignType::Nurture,
    ];

    /// Channels a message of this campaign may be sent on
    pub fn channels(&self) -> &'static [MessageChannel] {
        match self {
            CampaignType::Email | CampaignType::Nurture => &[MessageChannel::Email],
            CampaignType::Linkedin => &[MessageChannel::Linkedin],
            CampaignType::MultiChannel => &[
                MessageChannel::Email,
                MessageChannel::Linkedin,
                MessageChannel::Phone,
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Draft,
    Scheduled,
    Active,
    Paused,
    Completed,
}

impl CampaignStatus {
    pub const ALL: [CampaignStatus; 5] = [
        CampaignStatus::Draft,
        CampaignStatus::Scheduled,
        CampaignStatus::Active,
        CampaignStatus::Paused,
        CampaignStatus::Completed,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetAudience {
    pub criteria: Vec<String>,
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignContent {
    pub subject_lines: Vec<String>,
    pub template_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignSettings {
    pub send_time: String,
    pub timezone: String,
    pub daily_limit: u32,
    pub follow_up_days: u8,
    pub track_opens: bool,
}

/// Funnel snapshot; each stage never exceeds the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CampaignMetrics {
    pub sent: u32,
    pub delivered: u32,
    pub opened: u32,
    pub clicked: u32,
    pub replied: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Campaign {
    pub name: String,
    #[serde(rename = "type")]
    pub campaign_type: CampaignType,
    pub status: CampaignStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub target_audience: TargetAudience,
    pub content: CampaignContent,
    pub settings: CampaignSettings,
    pub metrics: CampaignMetrics,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageChannel {
    Email,
    Linkedin,
    Phone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    Sent,
    Delivered,
    Opened,
    Clicked,
    Replied,
    Bounced,
}

impl MessageStatus {
    pub const ALL: [MessageStatus; 6] = [
        MessageStatus::Sent,
        MessageStatus::Delivered,
        MessageStatus::Opened,
        MessageStatus::Clicked,
        MessageStatus::Replied,
        MessageStatus::Bounced,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Personalization {
    pub first_name: String,
    pub company: String,
    pub subject_variant: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub campaign_id: RecordId,
    pub prospect_id: RecordId,
    pub channel: MessageChannel,
    pub subject: String,
    pub body: String,
    pub status: MessageStatus,
    pub sent_at: DateTime<Utc>,
    pub personalization: Personalization,
}

// =============================================================================
// Interactions and agent activity
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionType {
    EmailOpen,
    EmailClick,
    WebsiteVisit,
    ContentDownload,
    MeetingBooked,
    Reply,
}

impl InteractionType {
    pub const ALL: [InteractionType; 6] = [
        InteractionType::EmailOpen,
        InteractionType::EmailClick,
        InteractionType::WebsiteVisit,
        InteractionType::ContentDownload,
        InteractionType::MeetingBooked,
        InteractionType::Reply,
    ];

    pub fn channel(&self) -> &'static str {
        match self {
            InteractionType::EmailOpen | InteractionType::EmailClick | InteractionType::Reply => {
                "email"
            }
            InteractionType::WebsiteVisit | InteractionType::ContentDownload => "website",
            InteractionType::MeetingBooked => "calendar",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionDetails {
    pub source: String,
    pub duration_seconds: u32,
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interaction {
    pub prospect_id: RecordId,
    #[serde(rename = "type")]
    pub interaction_type: InteractionType,
    pub channel: String,
    pub details: InteractionDetails,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentType {
    Scout,
    Analyst,
    Strategist,
    Executor,
}

impl AgentType {
    pub const ALL: [AgentType; 4] = [
        AgentType::Scout,
        AgentType::Analyst,
        AgentType::Strategist,
        AgentType::Executor,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Started,
    InProgress,
    Completed,
    Failed,
}

impl AgentStatus {
    pub const ALL: [AgentStatus; 4] = [
        AgentStatus::Started,
        AgentStatus::InProgress,
        AgentStatus::Completed,
        AgentStatus::Failed,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentLog {
    pub agent_type: AgentType,
    pub action: String,
    pub status: AgentStatus,
    pub input: Value,
    pub output: Value,
    pub execution_time_ms: u32,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Polymorphic record
// =============================================================================

/// One generated row of any kind. Serializes to the bare row object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Prospect(Prospect),
    EnrichmentData(EnrichmentData),
    EngagementScore(EngagementScore),
    Campaign(Campaign),
    Message(Message),
    Interaction(Interaction),
    AgentLog(AgentLog),
}

impl Record {
    pub fn kind(&self) -> EntityKind {
        match self {
            Record::Prospect(_) => EntityKind::Prospect,
            Record::EnrichmentData(_) => EntityKind::EnrichmentData,
            Record::EngagementScore(_) => EntityKind::EngagementScore,
            Record::Campaign(_) => EntityKind::Campaign,
            Record::Message(_) => EntityKind::Message,
            Record::Interaction(_) => EntityKind::Interaction,
            Record::AgentLog(_) => EntityKind::AgentLog,
        }
    }

    /// Serialize into an insertable JSON row
    pub fn to_row(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    pub fn into_prospect(self) -> Option<Prospect> {
        match self {
            Record::Prospect(p) => Some(p),
            _ => None,
        }
    }

    pub fn into_campaign(self) -> Option<Campaign> {
        match self {
            Record::Campaign(c) => Some(c),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_id_from_row() {
        assert_eq!(
            RecordId::from_row(&json!({"id": 17})),
            Some(RecordId::new("17"))
        );
        assert_eq!(
            RecordId::from_row(&json!({"id": "6f1c0a2e-1b7d-4f7e-9a55-3d2f4e1c0b9a"})),
            Some(RecordId::new("6f1c0a2e-1b7d-4f7e-9a55-3d2f4e1c0b9a"))
        );
        assert_eq!(RecordId::from_row(&json!({"id": null})), None);
        assert_eq!(RecordId::from_row(&json!({"id": ""})), None);
        assert_eq!(RecordId::from_row(&json!({"name": "x"})), None);
    }

    #[test]
    fn test_foreign_key_graph() {
        assert!(EntityKind::Prospect.references().is_empty());
        assert!(EntityKind::Campaign.references().is_empty());
        assert!(EntityKind::AgentLog.references().is_empty());
        assert_eq!(
            EntityKind::Message.references(),
            vec![EntityKind::Campaign, EntityKind::Prospect]
        );

        assert!(EntityKind::Prospect.has_dependents());
        assert!(EntityKind::Campaign.has_dependents());
        assert!(!EntityKind::AgentLog.has_dependents());
        assert!(!EntityKind::Message.has_dependents());
    }

    #[test]
    fn test_table_names_round_trip() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::from_table(kind.table()), Some(kind));
        }
        assert_eq!(EntityKind::from_table("users"), None);
    }

    #[test]
    fn test_type_field_renamed() {
        let details = InteractionDetails {
            source: "newsletter".to_string(),
            duration_seconds: 12,
            link: None,
        };
        let record = Record::Interaction(Interaction {
            prospect_id: RecordId::new("3"),
            interaction_type: InteractionType::EmailClick,
            channel: "email".to_string(),
            details,
            timestamp: DateTime::<Utc>::default(),
        });
        let row = record.to_row().unwrap();
        assert_eq!(row["type"], "email_click");
        assert_eq!(row["prospect_id"], "3");
        assert!(row["details"]["link"].is_null());
    }
}
