use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Name of the scenario every fresh configuration starts with.
pub const DEFAULT_SCENARIO_NAME: &str = "happy_path";

/// Named sub-bucket of the requested record count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub name: String,
    pub count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Field name to literal value overrides applied by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<BTreeMap<String, String>>,
}

impl Scenario {
    pub fn new(name: impl Into<String>, count: u32) -> Self {
        Self {
            name: name.into(),
            count,
            description: None,
            overrides: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_override(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides
            .get_or_insert_with(BTreeMap::new)
            .insert(field.into(), value.into());
        self
    }
}

/// Partial update merged into an existing scenario.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioPatch {
    pub name: Option<String>,
    pub count: Option<u32>,
    pub description: Option<String>,
    pub overrides: Option<BTreeMap<String, String>>,
}

impl ScenarioPatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn overrides(mut self, overrides: BTreeMap<String, String>) -> Self {
        self.overrides = Some(overrides);
        self
    }

    /// Merge the fields carried by the patch; absent fields are left alone.
    pub fn apply(self, scenario: &mut Scenario) {
        if let Some(name) = self.name {
            scenario.name = name;
        }
        if let Some(count) = self.count {
            scenario.count = count;
        }
        if let Some(description) = self.description {
            scenario.description = Some(description);
        }
        if let Some(overrides) = self.overrides {
            scenario.overrides = Some(overrides);
        }
    }
}

/// Scenario totals compared against the requested record count.
///
/// A mismatch is a warning surfaced to the user, never a submission error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScenarioSummary {
    pub total: u64,
    pub count: u32,
}

impl ScenarioSummary {
    pub fn from_scenarios(scenarios: &[Scenario], count: u32) -> Self {
        let total = scenarios.iter().map(|s| u64::from(s.count)).sum();
        Self { total, count }
    }

    pub fn is_balanced(&self) -> bool {
        self.total == u64::from(self.count)
    }

    pub fn message(&self) -> String {
        if self.is_balanced() {
            format!("Total: {} = Count: {}", self.total, self.count)
        } else {
            format!("Total: {} \u{2260} Count: {}", self.total, self.count)
        }
    }
}

/// Normalize a scenario name typed by the user.
///
/// Surrounding whitespace is dropped and inner whitespace runs become `_`.
/// Returns `None` when nothing is left.
pub fn normalize_scenario_name(raw: &str) -> Option<String> {
    let name = raw.split_whitespace().collect::<Vec<_>>().join("_");
    if name.is_empty() { None } else { Some(name) }
}
