use std::{fmt, str::FromStr};

use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};

use crate::error::DomainError;

/// One of the startup attributes collected by the input form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    StartupName,
    Problem,
    Solution,
    TargetAudience,
    Industry,
    RevenueModel,
    Stage,
    Team,
    Vision,
    Usp,
    Competition,
}

impl FormField {
    pub const ALL: [FormField; 11] = [
        FormField::StartupName,
        FormField::Problem,
        FormField::Solution,
        FormField::TargetAudience,
        FormField::Industry,
        FormField::RevenueModel,
        FormField::Stage,
        FormField::Team,
        FormField::Vision,
        FormField::Usp,
        FormField::Competition,
    ];

    pub const REQUIRED: [FormField; 3] = [
        FormField::StartupName,
        FormField::Problem,
        FormField::Solution,
    ];

    /// Key used for this field in request bodies.
    pub fn wire_name(self) -> &'static str {
        match self {
            FormField::StartupName => "startup_name",
            FormField::Problem => "problem",
            FormField::Solution => "solution",
            FormField::TargetAudience => "target_audience",
            FormField::Industry => "industry",
            FormField::RevenueModel => "revenue_model",
            FormField::Stage => "stage",
            FormField::Team => "team",
            FormField::Vision => "vision",
            FormField::Usp => "USP",
            FormField::Competition => "competition",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::StartupName => "Startup Name",
            FormField::Problem => "Problem",
            FormField::Solution => "Solution",
            FormField::TargetAudience => "Target Audience",
            FormField::Industry => "Industry",
            FormField::RevenueModel => "Revenue Model",
            FormField::Stage => "Stage of Startup (e.g., Seed, Series A)",
            FormField::Team => "Team (brief description of key members)",
            FormField::Vision => "Vision / Long-term Goal",
            FormField::Usp => "Unique Selling Proposition (USP)",
            FormField::Competition => "Competition (who are they, what do they do?)",
        }
    }

    pub fn is_required(self) -> bool {
        FormField::REQUIRED.contains(&self)
    }

    /// Rows to show when the field is rendered as a text area; `None` means a single line.
    pub fn multiline_rows(self) -> Option<usize> {
        match self {
            FormField::Problem | FormField::Solution => Some(3),
            FormField::Team | FormField::Vision | FormField::Usp | FormField::Competition => {
                Some(2)
            }
            _ => None,
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for FormField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormField::ALL
            .into_iter()
            .find(|field| field.wire_name() == s)
            .ok_or_else(|| DomainError::UnknownField(s.to_string()))
    }
}

/// Free-text startup attributes as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormData {
    pub startup_name: String,
    pub problem: String,
    pub solution: String,
    pub target_audience: String,
    pub industry: String,
    pub revenue_model: String,
    pub stage: String,
    pub team: String,
    pub vision: String,
    #[serde(rename = "USP")]
    pub usp: String,
    pub competition: String,
}

impl FormData {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::StartupName => &self.startup_name,
            FormField::Problem => &self.problem,
            FormField::Solution => &self.solution,
            FormField::TargetAudience => &self.target_audience,
            FormField::Industry => &self.industry,
            FormField::RevenueModel => &self.revenue_model,
            FormField::Stage => &self.stage,
            FormField::Team => &self.team,
            FormField::Vision => &self.vision,
            FormField::Usp => &self.usp,
            FormField::Competition => &self.competition,
        }
    }

    pub fn get_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::StartupName => &mut self.startup_name,
            FormField::Problem => &mut self.problem,
            FormField::Solution => &mut self.solution,
            FormField::TargetAudience => &mut self.target_audience,
            FormField::Industry => &mut self.industry,
            FormField::RevenueModel => &mut self.revenue_model,
            FormField::Stage => &mut self.stage,
            FormField::Team => &mut self.team,
            FormField::Vision => &mut self.vision,
            FormField::Usp => &mut self.usp,
            FormField::Competition => &mut self.competition,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        *self.get_mut(field) = value.into();
    }

    /// Required fields that are empty or whitespace only, in form order.
    pub fn missing_required(&self) -> Vec<FormField> {
        FormField::REQUIRED
            .into_iter()
            .filter(|field| self.get(*field).trim().is_empty())
            .collect()
    }

    /// Startup name with every whitespace run collapsed into `_`, used as a file stem.
    ///
    /// Leading and trailing whitespace is dropped rather than turned into `_`.
    /// Returns `None` when the name is blank.
    pub fn file_stem(&self) -> Option<String> {
        let name = self.startup_name.trim();
        if name.is_empty() {
            return None;
        }
        Some(name.split_whitespace().collect::<Vec<_>>().join("_"))
    }
}

/// Role of a slide within the deck. Declaration order is presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    Cover,
    Problem,
    Solution,
    Market,
    Product,
    BusinessModel,
    Competition,
    Team,
    Traction,
    FundingNeeds,
}

impl SectionKey {
    pub const COUNT: usize = 10;

    pub const ALL: [SectionKey; SectionKey::COUNT] = [
        SectionKey::Cover,
        SectionKey::Problem,
        SectionKey::Solution,
        SectionKey::Market,
        SectionKey::Product,
        SectionKey::BusinessModel,
        SectionKey::Competition,
        SectionKey::Team,
        SectionKey::Traction,
        SectionKey::FundingNeeds,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionKey::Cover => "cover",
            SectionKey::Problem => "problem",
            SectionKey::Solution => "solution",
            SectionKey::Market => "market",
            SectionKey::Product => "product",
            SectionKey::BusinessModel => "business_model",
            SectionKey::Competition => "competition",
            SectionKey::Team => "team",
            SectionKey::Traction => "traction",
            SectionKey::FundingNeeds => "funding_needs",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SectionKey::Cover => "Cover Slide (Startup Name & Tagline)",
            SectionKey::Problem => "Problem",
            SectionKey::Solution => "Solution",
            SectionKey::Market => "Market Size (TAM/SAM/SOM)",
            SectionKey::Product => "Product/Technology Overview",
            SectionKey::BusinessModel => "Business Model",
            SectionKey::Competition => "Competitive Advantage",
            SectionKey::Team => "Team",
            SectionKey::Traction => "Traction / Milestones",
            SectionKey::FundingNeeds => "Ask (Funding, Hiring, Next Steps)",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| DomainError::UnknownSection(s.to_string()))
    }
}

/// Generated slide content, always holding an entry for every section.
///
/// Missing or `null` entries in a service response become empty strings and
/// unknown keys are dropped whatever their value, so a deck can never be
/// partially shaped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "std::collections::BTreeMap<String, serde_json::Value>")]
pub struct Deck {
    slides: [String; SectionKey::COUNT],
}

impl Deck {
    pub fn get(&self, section: SectionKey) -> &str {
        &self.slides[section.index()]
    }

    pub fn set(&mut self, section: SectionKey, content: impl Into<String>) {
        self.slides[section.index()] = content.into();
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionKey, &str)> {
        SectionKey::ALL
            .into_iter()
            .map(move |section| (section, self.get(section)))
    }

    /// True when no section has any non-whitespace content.
    pub fn is_blank(&self) -> bool {
        self.slides.iter().all(|content| content.trim().is_empty())
    }
}

impl From<std::collections::BTreeMap<String, serde_json::Value>> for Deck {
    fn from(raw: std::collections::BTreeMap<String, serde_json::Value>) -> Self {
        let mut deck = Deck::default();
        for (key, value) in raw {
            // Non-string values for a known section are treated as missing.
            if let (Ok(section), serde_json::Value::String(content)) =
                (key.parse::<SectionKey>(), value)
            {
                deck.set(section, content);
            }
        }
        deck
    }
}

impl FromIterator<(SectionKey, String)> for Deck {
    fn from_iter<I: IntoIterator<Item = (SectionKey, String)>>(iter: I) -> Self {
        let mut deck = Deck::default();
        for (section, content) in iter {
            deck.set(section, content);
        }
        deck
    }
}

impl Serialize for Deck {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(SectionKey::COUNT))?;
        for (section, content) in self.iter() {
            map.serialize_entry(section.as_str(), content)?;
        }
        map.end()
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
