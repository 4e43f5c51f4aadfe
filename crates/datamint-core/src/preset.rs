use serde::{Deserialize, Serialize};

use crate::scenario::Scenario;
use crate::types::{Domain, GenerationOptions, GenerationPath, OutputFormat};

/// Typed, field-enumerated set of configuration overrides.
///
/// Applying a preset replaces only the fields it carries. Unknown keys are
/// rejected when a preset is read from a settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigPreset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<Domain>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_entity_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenarios: Option<Vec<Scenario>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<GenerationOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_path: Option<GenerationPath>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_format: Option<OutputFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_schema: Option<String>,
}

impl ConfigPreset {
    pub fn builder() -> ConfigPresetBuilder {
        ConfigPresetBuilder::default()
    }

    pub fn is_empty(&self) -> bool {
        self == &ConfigPreset::default()
    }
}

/// Builder for [`ConfigPreset`].
#[derive(Debug, Clone, Default)]
pub struct ConfigPresetBuilder {
    preset: ConfigPreset,
}

impl ConfigPresetBuilder {
    pub fn domain(mut self, domain: Domain) -> Self {
        self.preset.domain = Some(domain);
        self
    }

    pub fn entity(mut self, entity: impl Into<String>) -> Self {
        self.preset.entity = Some(entity.into());
        self
    }

    pub fn custom_entity_name(mut self, name: impl Into<String>) -> Self {
        self.preset.custom_entity_name = Some(name.into());
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.preset.count = Some(count);
        self
    }

    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.preset.context = Some(context.into());
        self
    }

    pub fn scenarios(mut self, scenarios: Vec<Scenario>) -> Self {
        self.preset.scenarios = Some(scenarios);
        self
    }

    pub fn options(mut self, options: GenerationOptions) -> Self {
        self.preset.options = Some(options);
        self
    }

    pub fn generation_path(mut self, path: GenerationPath) -> Self {
        self.preset.generation_path = Some(path);
        self
    }

    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.preset.output_format = Some(format);
        self
    }

    pub fn inline_schema(mut self, schema: impl Into<String>) -> Self {
        self.preset.inline_schema = Some(schema.into());
        self
    }

    pub fn build(self) -> ConfigPreset {
        self.preset
    }
}
