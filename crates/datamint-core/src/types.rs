use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Record count used by a fresh configuration.
pub const DEFAULT_COUNT: u32 = 10;
/// Lowest record count a request may carry.
pub const MIN_COUNT: u32 = 1;
/// Highest record count a request may carry.
pub const MAX_COUNT: u32 = 1000;

/// Entity sentinel that unlocks the custom name and inline schema fields.
pub const CUSTOM_ENTITY: &str = "custom";

/// Entities offered by the entity picker, in display order.
pub const ENTITIES: &[(&str, &str)] = &[
    ("cart", "Cart"),
    ("order", "Order"),
    ("product", "Product"),
    ("user", "User"),
    ("payment", "Payment"),
    ("review", "Review"),
    (CUSTOM_ENTITY, "Custom Entity..."),
];

/// Business domain the backend generates data for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    #[default]
    Ecommerce,
    Financial,
    SocialMedia,
    Healthcare,
    Education,
    Logistics,
}

impl Domain {
    pub const ALL: [Domain; 6] = [
        Domain::Ecommerce,
        Domain::Financial,
        Domain::SocialMedia,
        Domain::Healthcare,
        Domain::Education,
        Domain::Logistics,
    ];

    /// Wire name sent to the backend.
    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Ecommerce => "ecommerce",
            Domain::Financial => "financial",
            Domain::SocialMedia => "social_media",
            Domain::Healthcare => "healthcare",
            Domain::Education => "education",
            Domain::Logistics => "logistics",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Domain::Ecommerce => "E-commerce",
            Domain::Financial => "Financial",
            Domain::SocialMedia => "Social Media",
            Domain::Healthcare => "Healthcare",
            Domain::Education => "Education",
            Domain::Logistics => "Logistics",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Domain::ALL
            .into_iter()
            .find(|domain| domain.as_str() == value)
            .ok_or_else(|| format!("unknown domain: {value}"))
    }
}

/// Backend strategy selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum GenerationPath {
    #[default]
    Auto,
    Traditional,
    Llm,
    Rag,
    Hybrid,
}

impl GenerationPath {
    pub const ALL: [GenerationPath; 5] = [
        GenerationPath::Auto,
        GenerationPath::Traditional,
        GenerationPath::Llm,
        GenerationPath::Rag,
        GenerationPath::Hybrid,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GenerationPath::Auto => "auto",
            GenerationPath::Traditional => "traditional",
            GenerationPath::Llm => "llm",
            GenerationPath::Rag => "rag",
            GenerationPath::Hybrid => "hybrid",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GenerationPath::Auto => "Auto",
            GenerationPath::Traditional => "Traditional",
            GenerationPath::Llm => "LLM (AI)",
            GenerationPath::Rag => "RAG",
            GenerationPath::Hybrid => "Hybrid",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            GenerationPath::Auto => "System decides best approach",
            GenerationPath::Traditional => "Fast rule-based generation",
            GenerationPath::Llm => "Creative AI-generated data",
            GenerationPath::Rag => "Pattern-based with context",
            GenerationPath::Hybrid => "Combined approach",
        }
    }

    /// Routing hints contributed by the path itself.
    pub fn hints(self) -> &'static [&'static str] {
        match self {
            GenerationPath::Llm => &["use_llm", "ai_generated", "creative"],
            GenerationPath::Rag => &["use_rag", "pattern_based"],
            GenerationPath::Traditional => &["use_traditional"],
            GenerationPath::Auto | GenerationPath::Hybrid => &[],
        }
    }

    /// The rule-based path never receives free-text context.
    pub fn accepts_context(self) -> bool {
        self != GenerationPath::Traditional
    }
}

impl fmt::Display for GenerationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationPath {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        GenerationPath::ALL
            .into_iter()
            .find(|path| path.as_str() == value)
            .ok_or_else(|| format!("unknown generation path: {value}"))
    }
}

/// Serialization format requested from the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
    Sql,
    Yaml,
    Xml,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 5] = [
        OutputFormat::Json,
        OutputFormat::Csv,
        OutputFormat::Sql,
        OutputFormat::Yaml,
        OutputFormat::Xml,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Json => "JSON",
            OutputFormat::Csv => "CSV",
            OutputFormat::Sql => "SQL",
            OutputFormat::Yaml => "YAML",
            OutputFormat::Xml => "XML",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| format!("unknown output format: {value}"))
    }
}

/// Independent generation toggles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationOptions {
    #[serde(alias = "use_cache")]
    pub use_cache: bool,
    #[serde(alias = "learn_from_history")]
    pub learn_from_history: bool,
    #[serde(alias = "defect_triggering")]
    pub defect_triggering: bool,
    #[serde(alias = "production_like")]
    pub production_like: bool,
}

/// Names one flag of [`GenerationOptions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKey {
    UseCache,
    LearnFromHistory,
    DefectTriggering,
    ProductionLike,
}

impl OptionKey {
    pub const ALL: [OptionKey; 4] = [
        OptionKey::UseCache,
        OptionKey::LearnFromHistory,
        OptionKey::DefectTriggering,
        OptionKey::ProductionLike,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OptionKey::UseCache => "Use Cache",
            OptionKey::LearnFromHistory => "Learn from History",
            OptionKey::DefectTriggering => "Defect Triggering",
            OptionKey::ProductionLike => "Production-like",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            OptionKey::UseCache => "Speed up generation with cached patterns",
            OptionKey::LearnFromHistory => "Reuse patterns from previous generations",
            OptionKey::DefectTriggering => "Bias towards edge cases that trigger defects",
            OptionKey::ProductionLike => "Mimic production data distributions",
        }
    }
}

impl FromStr for OptionKey {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "use_cache" | "useCache" => Ok(OptionKey::UseCache),
            "learn_from_history" | "learnFromHistory" => Ok(OptionKey::LearnFromHistory),
            "defect_triggering" | "defectTriggering" => Ok(OptionKey::DefectTriggering),
            "production_like" | "productionLike" => Ok(OptionKey::ProductionLike),
            other => Err(format!("unknown option: {other}")),
        }
    }
}

impl GenerationOptions {
    pub fn get(&self, key: OptionKey) -> bool {
        match key {
            OptionKey::UseCache => self.use_cache,
            OptionKey::LearnFromHistory => self.learn_from_history,
            OptionKey::DefectTriggering => self.defect_triggering,
            OptionKey::ProductionLike => self.production_like,
        }
    }

    /// Flip exactly one flag in place.
    pub fn toggle(&mut self, key: OptionKey) {
        let flag = match key {
            OptionKey::UseCache => &mut self.use_cache,
            OptionKey::LearnFromHistory => &mut self.learn_from_history,
            OptionKey::DefectTriggering => &mut self.defect_triggering,
            OptionKey::ProductionLike => &mut self.production_like,
        };
        *flag = !*flag;
    }
}
