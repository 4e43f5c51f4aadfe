use crate::error::ConfigError;
use crate::preset::ConfigPreset;
use crate::request::{GenerationRequest, derive_hints};
use crate::scenario::{DEFAULT_SCENARIO_NAME, Scenario, ScenarioPatch, ScenarioSummary};
use crate::types::{
    CUSTOM_ENTITY, DEFAULT_COUNT, Domain, GenerationOptions, GenerationPath, MAX_COUNT, MIN_COUNT,
    OptionKey, OutputFormat,
};
use crate::validation::{validate_custom_entity, validate_override_schema};

/// Entity selected by a fresh configuration.
pub const DEFAULT_ENTITY: &str = "cart";

/// Canonical configurator state.
///
/// Every field is independently settable; [`GeneratorConfig::build_request`]
/// derives the outbound payload from a snapshot without mutating anything.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    domain: Domain,
    entity: String,
    custom_entity_name: String,
    count: u32,
    context: String,
    scenarios: Vec<Scenario>,
    options: GenerationOptions,
    generation_path: GenerationPath,
    output_format: OutputFormat,
    inline_schema: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            domain: Domain::default(),
            entity: DEFAULT_ENTITY.to_string(),
            custom_entity_name: String::new(),
            count: DEFAULT_COUNT,
            context: String::new(),
            scenarios: vec![Scenario::new(DEFAULT_SCENARIO_NAME, DEFAULT_COUNT)],
            options: GenerationOptions::default(),
            generation_path: GenerationPath::default(),
            output_format: OutputFormat::default(),
            inline_schema: String::new(),
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh configuration with a preset applied on top of the defaults.
    pub fn from_preset(preset: &ConfigPreset) -> Self {
        let mut config = Self::default();
        config.apply_preset(preset);
        config
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn custom_entity_name(&self) -> &str {
        &self.custom_entity_name
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn options(&self) -> GenerationOptions {
        self.options
    }

    pub fn generation_path(&self) -> GenerationPath {
        self.generation_path
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn inline_schema(&self) -> &str {
        &self.inline_schema
    }

    pub fn is_custom_entity(&self) -> bool {
        self.entity == CUSTOM_ENTITY
    }

    /// Entity name sent to the backend.
    pub fn effective_entity(&self) -> &str {
        let custom = self.custom_entity_name.trim();
        if self.is_custom_entity() && !custom.is_empty() {
            custom
        } else {
            &self.entity
        }
    }

    pub fn set_domain(&mut self, domain: Domain) {
        self.domain = domain;
    }

    /// Select an entity. Leaving the custom sentinel drops the custom name and
    /// the inline schema.
    pub fn set_entity(&mut self, entity: impl Into<String>) {
        self.entity = entity.into();
        if !self.is_custom_entity() {
            self.custom_entity_name.clear();
            self.inline_schema.clear();
        }
    }

    pub fn set_custom_entity_name(&mut self, name: impl Into<String>) {
        self.custom_entity_name = name.into();
    }

    /// Set the record count, clamped to the accepted range.
    ///
    /// With exactly one scenario, that scenario follows the new count.
    pub fn set_count(&mut self, count: u32) {
        self.count = count.clamp(MIN_COUNT, MAX_COUNT);
        if let [only] = self.scenarios.as_mut_slice() {
            only.count = self.count;
        }
    }

    pub fn set_context(&mut self, context: impl Into<String>) {
        self.context = context.into();
    }

    pub fn set_generation_path(&mut self, path: GenerationPath) {
        self.generation_path = path;
    }

    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.output_format = format;
    }

    pub fn set_inline_schema(&mut self, schema: impl Into<String>) {
        self.inline_schema = schema.into();
    }

    pub fn add_scenario(&mut self, scenario: Scenario) {
        self.scenarios.push(scenario);
    }

    /// Remove the scenario at `index`; out-of-range indices are ignored.
    pub fn remove_scenario(&mut self, index: usize) -> Option<Scenario> {
        if index < self.scenarios.len() {
            Some(self.scenarios.remove(index))
        } else {
            None
        }
    }

    /// Merge `patch` into the scenario at `index`; out-of-range indices are
    /// ignored.
    pub fn update_scenario(&mut self, index: usize, patch: ScenarioPatch) -> bool {
        match self.scenarios.get_mut(index) {
            Some(scenario) => {
                patch.apply(scenario);
                true
            }
            None => false,
        }
    }

    pub fn toggle_option(&mut self, key: OptionKey) {
        self.options.toggle(key);
    }

    pub fn scenario_summary(&self) -> ScenarioSummary {
        ScenarioSummary::from_scenarios(&self.scenarios, self.count)
    }

    /// Overwrite the fields carried by `preset`.
    pub fn apply_preset(&mut self, preset: &ConfigPreset) {
        if let Some(domain) = preset.domain {
            self.set_domain(domain);
        }
        if let Some(entity) = &preset.entity {
            self.set_entity(entity.clone());
        }
        if let Some(name) = &preset.custom_entity_name {
            self.set_custom_entity_name(name.clone());
        }
        if let Some(count) = preset.count {
            self.set_count(count);
        }
        if let Some(scenarios) = &preset.scenarios {
            self.scenarios = scenarios.clone();
        }
        if let Some(context) = &preset.context {
            self.set_context(context.clone());
        }
        if let Some(options) = preset.options {
            self.options = options;
        }
        if let Some(path) = preset.generation_path {
            self.set_generation_path(path);
        }
        if let Some(format) = preset.output_format {
            self.set_output_format(format);
        }
        if let Some(schema) = &preset.inline_schema {
            self.set_inline_schema(schema.clone());
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check the fields that must be valid before submission.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.is_custom_entity() {
            validate_custom_entity(&self.custom_entity_name, &self.inline_schema)?;
        } else {
            validate_override_schema(&self.inline_schema)?;
        }
        Ok(())
    }

    /// Derive the outbound request from the current state.
    pub fn build_request(&self) -> GenerationRequest {
        let hints = derive_hints(self.generation_path, &self.options, &self.context);

        let context = if self.generation_path.accepts_context() && !self.context.is_empty() {
            Some(self.context.clone())
        } else {
            None
        };

        GenerationRequest {
            domain: self.domain,
            entity: self.effective_entity().to_string(),
            count: self.count,
            context,
            scenarios: if self.scenarios.is_empty() {
                None
            } else {
                Some(self.scenarios.clone())
            },
            hints: if hints.is_empty() { None } else { Some(hints) },
            output_format: self.output_format,
            options: self.options,
            inline_schema: if self.inline_schema.trim().is_empty() {
                None
            } else {
                Some(self.inline_schema.clone())
            },
        }
    }
}
