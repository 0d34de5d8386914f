//! Synthetic data generator for the prospect-seed demo pipeline.
//!
//! Produces internally consistent sales-intelligence records (prospects,
//! enrichment profiles, engagement scores, campaigns, messages,
//! interactions and agent logs). Dependent kinds are generated against
//! parents that were already inserted and carry store-assigned ids.
//!
//! # Example
//!
//! ```rust
//! use demo_data_gen::{EntityKind, GenerationContext, Generator};
//!
//! let mut gen = Generator::new(42);
//! let prospects = gen
//!     .generate(EntityKind::Prospect, 5, &GenerationContext::default())
//!     .unwrap();
//! assert_eq!(prospects.len(), 5);
//! ```

pub mod error;
pub mod fake;
pub mod generator;
pub mod records;

pub use error::PreconditionError;
pub use generator::{DemoWindow, GenerationContext, Generator};
pub use records::{
    AgentLog, AgentStatus, AgentType, Campaign, CampaignContent, CampaignMetrics, CampaignSettings,
    CampaignStatus, CampaignType, CompanyProfile, CompositeScore, EngagementScore, EnrichmentData,
    EntityKind, Inserted, Interaction, InteractionDetails, InteractionType, Message, MessageChannel,
    MessageStatus, Personalization, Prospect, ProspectStatus, Record, RecordId, SocialProfiles,
    TargetAudience,
};
