//! Fake value helpers and the fixed vocabularies every categorical field
//! draws from.
//!
//! Names, cities and prose come from the `fake` crate; everything that must
//! stay inside a closed domain (titles, buckets, tags, signals) is picked
//! from the constants below.

use chrono::{DateTime, TimeDelta, Utc};
use fake::faker::address::en::{CityName, StateAbbr};
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use rand::seq::IndexedRandom;
use rand::Rng;

pub const JOB_TITLES: &[&str] = &[
    "VP of Sales",
    "Head of Growth",
    "Chief Revenue Officer",
    "Sales Director",
    "Marketing Manager",
    "Director of Operations",
    "CTO",
    "Head of Partnerships",
    "Demand Generation Lead",
    "Account Executive",
    "Revenue Operations Manager",
    "CEO",
];

pub const PROSPECT_SOURCES: &[&str] = &[
    "website",
    "linkedin",
    "referral",
    "conference",
    "cold_outreach",
    "webinar",
];

pub const PROSPECT_TAGS: &[&str] = &[
    "enterprise",
    "smb",
    "mid-market",
    "decision-maker",
    "champion",
    "technical",
    "budget-approved",
    "high-intent",
    "competitor-user",
    "expansion",
];

pub const INDUSTRIES: &[&str] = &[
    "SaaS",
    "Fintech",
    "Healthcare",
    "E-commerce",
    "Manufacturing",
    "Logistics",
    "Cybersecurity",
    "Education",
    "Media",
    "Real Estate",
];

pub const COMPANY_SIZES: &[&str] = &["1-10", "11-50", "51-200", "201-500", "501-1000", "1000+"];

pub const REVENUE_BUCKETS: &[&str] = &[
    "<$1M",
    "$1M-$10M",
    "$10M-$50M",
    "$50M-$100M",
    "$100M-$500M",
    "$500M+",
];

pub const INTENT_SIGNALS: &[&str] = &[
    "visited_pricing_page",
    "downloaded_whitepaper",
    "attended_webinar",
    "hiring_sales_roles",
    "recent_funding",
    "evaluating_competitors",
    "tech_stack_change",
    "leadership_change",
];

pub const PAIN_POINTS: &[&str] = &[
    "manual prospecting",
    "low reply rates",
    "poor data quality",
    "long sales cycles",
    "pipeline visibility",
    "lead routing delays",
    "tool sprawl",
    "inconsistent follow-up",
];

const COMPANY_PREFIXES: &[&str] = &[
    "Acme", "Global", "Prime", "Nova", "Apex", "Summit", "Core", "Edge", "Bright", "Clear",
    "Vertex", "Harbor", "Northwind", "Blue", "Quantum",
];

const COMPANY_SUFFIXES: &[&str] = &[
    "Labs",
    "Systems",
    "Solutions",
    "Analytics",
    "Dynamics",
    "Cloud",
    "Digital",
    "Partners",
    "Software",
    "Group",
];

pub const CAMPAIGN_THEMES: &[&str] = &[
    "Q1 Enterprise Outreach",
    "Product Launch",
    "Webinar Follow-up",
    "Re-engagement",
    "Mid-Market Expansion",
    "Executive Briefing",
    "Competitive Displacement",
    "Trial Conversion",
];

pub const AUDIENCE_CRITERIA: &[&str] = &[
    "industry:saas",
    "industry:fintech",
    "company_size:51-200",
    "company_size:201-500",
    "title:vp",
    "title:director",
    "region:north_america",
    "region:emea",
    "score:>60",
    "status:qualified",
];

pub const SUBJECT_LINES: &[&str] = &[
    "Quick question about {company}'s pipeline",
    "Ideas to lift reply rates at {company}",
    "{first_name}, worth 15 minutes?",
    "How teams like {company} cut prospecting time",
    "Following up on your interest",
    "A benchmark report for {company}",
];

pub const SEND_TIMES: &[&str] = &["08:00", "09:00", "10:30", "13:00", "15:30"];

pub const TIMEZONES: &[&str] = &[
    "America/New_York",
    "America/Chicago",
    "America/Los_Angeles",
    "Europe/London",
    "Europe/Berlin",
];

pub const INTERACTION_SOURCES: &[&str] = &[
    "campaign_email",
    "organic_search",
    "linkedin_post",
    "newsletter",
    "direct",
    "paid_ads",
];

pub const AGENT_TRIGGERS: &[&str] = &["schedule", "new_prospect", "manual", "campaign_event"];

pub const AGENT_ERRORS: &[&str] = &[
    "enrichment provider timeout",
    "rate limit exceeded",
    "prospect record locked",
    "template rendering failed",
];

const SCOUT_ACTIONS: &[&str] = &["discover_prospects", "scan_intent_signals", "import_leads"];
const ANALYST_ACTIONS: &[&str] = &["enrich_prospect", "score_prospect", "segment_audience"];
const STRATEGIST_ACTIONS: &[&str] = &["plan_campaign", "select_sequence", "prioritize_accounts"];
const EXECUTOR_ACTIONS: &[&str] = &["send_message", "schedule_follow_up", "log_interaction"];

/// Actions each agent type records; indexed like `AgentType::ALL`.
pub const AGENT_ACTIONS: [&[&str]; 4] = [
    SCOUT_ACTIONS,
    ANALYST_ACTIONS,
    STRATEGIST_ACTIONS,
    EXECUTOR_ACTIONS,
];

/// Fake data generator over a caller-supplied RNG
pub struct FakeData<R: Rng> {
    rng: R,
}

impl<R: Rng> FakeData<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn first_name(&mut self) -> String {
        FirstName().fake_with_rng(&mut self.rng)
    }

    pub fn last_name(&mut self) -> String {
        LastName().fake_with_rng(&mut self.rng)
    }

    /// `first.last<n>@domain`, lowercased
    pub fn email(&mut self, first: &str, last: &str, domain: &str) -> String {
        let num: u32 = self.rng.random_range(1..1000);
        format!(
            "{}.{}{}@{}",
            first.to_lowercase(),
            last.to_lowercase(),
            num,
            domain
        )
    }

    pub fn company_name(&mut self) -> String {
        let prefix = self.pick(COMPANY_PREFIXES);
        let suffix = self.pick(COMPANY_SUFFIXES);
        format!("{} {}", prefix, suffix)
    }

    /// "City, ST"
    pub fn location(&mut self) -> String {
        let city: String = CityName().fake_with_rng(&mut self.rng);
        let state: String = StateAbbr().fake_with_rng(&mut self.rng);
        format!("{}, {}", city, state)
    }

    pub fn phone(&mut self) -> String {
        let area: u32 = self.rng.random_range(200..999);
        let prefix: u32 = self.rng.random_range(200..999);
        let line: u32 = self.rng.random_range(1000..9999);
        format!("+1-{}-{}-{}", area, prefix, line)
    }

    /// Sentence with a word count in `min_words..max_words`
    pub fn sentence(&mut self, min_words: usize, max_words: usize) -> String {
        Sentence(min_words..max_words).fake_with_rng(&mut self.rng)
    }

    pub fn paragraph(&mut self, min_sentences: usize, max_sentences: usize) -> String {
        Paragraph(min_sentences..max_sentences).fake_with_rng(&mut self.rng)
    }

    /// Lowercase alphanumeric token
    pub fn token(&mut self, len: usize) -> String {
        const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
        (0..len)
            .map(|_| ALPHABET[self.rng.random_range(0..ALPHABET.len())] as char)
            .collect()
    }

    /// Uniform integer in `min..=max`
    pub fn int_range(&mut self, min: u32, max: u32) -> u32 {
        self.rng.random_range(min..=max)
    }

    /// True with the given probability
    pub fn chance(&mut self, probability: f64) -> bool {
        self.rng.random::<f64>() < probability
    }

    /// Pick a random element from a non-empty slice
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.rng.random_range(0..items.len())]
    }

    /// Uniform index into a collection of `len` items
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }

    /// Between `min` and `max` distinct vocabulary entries, without replacement
    pub fn subset(&mut self, items: &[&str], min: usize, max: usize) -> Vec<String> {
        let max = max.min(items.len());
        let min = min.min(max);
        let n = self.rng.random_range(min..=max);
        items
            .choose_multiple(&mut self.rng, n)
            .map(|s| s.to_string())
            .collect()
    }

    /// `n` distinct elements of `items` (all of them if `n` exceeds the length)
    pub fn sample<'a, T>(&mut self, items: &'a [T], n: usize) -> Vec<&'a T> {
        items.choose_multiple(&mut self.rng, n).collect()
    }

    /// Uniform instant in `start..=end`; `start` when the range is empty
    pub fn datetime_between(&mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> DateTime<Utc> {
        let span = (end - start).num_seconds();
        if span <= 0 {
            return start;
        }
        start + TimeDelta::seconds(self.rng.random_range(0..=span))
    }
}

/// Domain derived from a company name: "Nova Labs" -> "novalabs.com"
pub fn company_domain(company: &str) -> String {
    let base: String = company
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    format!("{}.com", base)
}

/// URL-safe slug: "Ada Lovelace" -> "ada-lovelace"
pub fn slug(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .map(|part| {
            part.chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
        })
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    #[test]
    fn test_deterministic_generation() {
        let mut fake1 = FakeData::new(ChaCha8Rng::seed_from_u64(42));
        let mut fake2 = FakeData::new(ChaCha8Rng::seed_from_u64(42));

        assert_eq!(fake1.first_name(), fake2.first_name());
        assert_eq!(fake1.company_name(), fake2.company_name());
        assert_eq!(fake1.int_range(0, 100), fake2.int_range(0, 100));
    }

    #[test]
    fn test_email_generation() {
        let mut fake = FakeData::new(ChaCha8Rng::seed_from_u64(42));
        let email = fake.email("John", "Doe", "example.com");
        assert!(email.ends_with("@example.com"));
        assert!(email.starts_with("john.doe"));
    }

    #[test]
    fn test_subset_is_distinct_and_bounded() {
        let mut fake = FakeData::new(ChaCha8Rng::seed_from_u64(7));
        for _ in 0..200 {
            let tags = fake.subset(PROSPECT_TAGS, 1, 3);
            assert!((1..=3).contains(&tags.len()));
            let unique: HashSet<_> = tags.iter().collect();
            assert_eq!(unique.len(), tags.len());
            assert!(tags.iter().all(|t| PROSPECT_TAGS.contains(&t.as_str())));
        }
    }

    #[test]
    fn test_subset_clamps_to_vocabulary() {
        let mut fake = FakeData::new(ChaCha8Rng::seed_from_u64(7));
        let picked = fake.subset(&["a", "b"], 1, 5);
        assert!(!picked.is_empty() && picked.len() <= 2);
    }

    #[test]
    fn test_datetime_between_stays_in_range() {
        let mut fake = FakeData::new(ChaCha8Rng::seed_from_u64(3));
        let start = DateTime::<Utc>::default();
        let end = start + TimeDelta::days(30);
        for _ in 0..500 {
            let t = fake.datetime_between(start, end);
            assert!(t >= start && t <= end);
        }
        assert_eq!(fake.datetime_between(end, start), end);
    }

    #[test]
    fn test_company_domain_and_slug() {
        assert_eq!(company_domain("Nova Labs"), "novalabs.com");
        assert_eq!(slug("Ada  Lovelace"), "ada-lovelace");
        assert_eq!(slug("O'Brien Smith"), "obrien-smith");
    }
}
