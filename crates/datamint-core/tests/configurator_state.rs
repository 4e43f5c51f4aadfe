use datamint_core::{
    ConfigPreset, DEFAULT_COUNT, Domain, GenerationOptions, GenerationPath, GeneratorConfig,
    MAX_COUNT, OptionKey, OutputFormat, Scenario, ScenarioPatch, normalize_scenario_name,
};

fn names(config: &GeneratorConfig) -> Vec<(String, u32)> {
    config
        .scenarios()
        .iter()
        .map(|s| (s.name.clone(), s.count))
        .collect()
}

#[test]
fn fresh_configuration_has_expected_defaults() {
    let config = GeneratorConfig::new();
    assert_eq!(config.domain(), Domain::Ecommerce);
    assert_eq!(config.entity(), "cart");
    assert_eq!(config.count(), DEFAULT_COUNT);
    assert_eq!(config.context(), "");
    assert_eq!(config.generation_path(), GenerationPath::Auto);
    assert_eq!(config.output_format(), OutputFormat::Json);
    assert_eq!(config.options(), GenerationOptions::default());
    assert_eq!(config.scenarios(), &[Scenario::new("happy_path", DEFAULT_COUNT)]);
}

#[test]
fn count_is_clamped() {
    let mut config = GeneratorConfig::new();
    config.set_count(0);
    assert_eq!(config.count(), 1);
    config.set_count(5_000);
    assert_eq!(config.count(), MAX_COUNT);
}

#[test]
fn single_scenario_follows_count() {
    let mut config = GeneratorConfig::new();
    config.set_count(100);
    assert_eq!(config.scenarios()[0].count, 100);
}

#[test]
fn multiple_scenarios_keep_their_counts() {
    let mut config = GeneratorConfig::new();
    config.add_scenario(Scenario::new("edge_case", 10));
    config.set_count(200);
    assert_eq!(
        names(&config),
        vec![
            ("happy_path".to_string(), DEFAULT_COUNT),
            ("edge_case".to_string(), 10)
        ]
    );
}

#[test]
fn remove_reindexes_without_gaps() {
    let mut config = GeneratorConfig::new();
    config.add_scenario(Scenario::new("edge_case", 10));
    config.add_scenario(Scenario::new("performance", 5));

    let removed = config.remove_scenario(1);
    assert_eq!(removed.map(|s| s.name), Some("edge_case".to_string()));
    assert_eq!(
        names(&config),
        vec![
            ("happy_path".to_string(), DEFAULT_COUNT),
            ("performance".to_string(), 5)
        ]
    );
}

#[test]
fn add_then_remove_restores_any_list() {
    let starts: Vec<Vec<Scenario>> = vec![
        Vec::new(),
        vec![Scenario::new("a", 1)],
        vec![Scenario::new("a", 1), Scenario::new("b", 2), Scenario::new("c", 0)],
    ];

    for start in starts {
        let mut config = GeneratorConfig::new();
        config.apply_preset(&ConfigPreset::builder().scenarios(start.clone()).build());
        let index = config.scenarios().len();
        config.add_scenario(Scenario::new("temporary", 7));
        config.remove_scenario(index);
        assert_eq!(config.scenarios(), start.as_slice());
    }
}

#[test]
fn out_of_range_scenario_operations_are_noops() {
    let mut config = GeneratorConfig::new();
    let before = config.clone();

    assert!(config.remove_scenario(3).is_none());
    assert!(!config.update_scenario(9, ScenarioPatch::default().count(1)));
    assert_eq!(config, before);
}

#[test]
fn update_merges_only_given_fields() {
    let mut config = GeneratorConfig::new();
    config.update_scenario(0, ScenarioPatch::default().description("checkout works"));
    config.update_scenario(0, ScenarioPatch::default().name("success_flow").count(75));

    let scenario = &config.scenarios()[0];
    assert_eq!(scenario.name, "success_flow");
    assert_eq!(scenario.count, 75);
    assert_eq!(scenario.description.as_deref(), Some("checkout works"));
}

#[test]
fn toggle_flips_exactly_one_flag() {
    let mut config = GeneratorConfig::new();
    config.toggle_option(OptionKey::LearnFromHistory);
    config.toggle_option(OptionKey::ProductionLike);

    let options = config.options();
    assert!(options.learn_from_history);
    assert!(options.production_like);
    assert!(!options.defect_triggering);
    assert!(!options.use_cache);

    config.toggle_option(OptionKey::LearnFromHistory);
    assert!(!config.options().learn_from_history);
    assert!(config.options().production_like);
}

#[test]
fn leaving_custom_entity_clears_custom_fields() {
    let mut config = GeneratorConfig::new();
    config.set_entity("custom");
    config.set_custom_entity_name("invoice");
    config.set_inline_schema(r#"{"properties": {}}"#);

    config.set_entity("order");
    assert_eq!(config.custom_entity_name(), "");
    assert_eq!(config.inline_schema(), "");
}

#[test]
fn scenario_summary_reports_mismatch_as_warning_text() {
    let mut config = GeneratorConfig::new();
    config.apply_preset(
        &ConfigPreset::builder()
            .count(60)
            .scenarios(vec![Scenario::new("happy_path", 30), Scenario::new("edge_case", 20)])
            .build(),
    );
    let summary = config.scenario_summary();
    assert!(!summary.is_balanced());
    assert_eq!(summary.message(), "Total: 50 \u{2260} Count: 60");

    config.set_count(50);
    assert_eq!(config.scenario_summary().message(), "Total: 50 = Count: 50");
}

#[test]
fn preset_overwrites_only_carried_fields() {
    let mut config = GeneratorConfig::new();
    config.set_context("keep me");
    config.set_generation_path(GenerationPath::Rag);

    let preset = ConfigPreset::builder()
        .domain(Domain::Financial)
        .entity("payment")
        .count(150)
        .options(GenerationOptions {
            use_cache: true,
            learn_from_history: true,
            ..GenerationOptions::default()
        })
        .build();
    config.apply_preset(&preset);

    assert_eq!(config.domain(), Domain::Financial);
    assert_eq!(config.entity(), "payment");
    assert_eq!(config.count(), 150);
    assert_eq!(config.scenarios()[0].count, 150);
    assert!(config.options().use_cache);
    assert_eq!(config.context(), "keep me");
    assert_eq!(config.generation_path(), GenerationPath::Rag);
}

#[test]
fn preset_rejects_unknown_keys() {
    let good: ConfigPreset = toml::from_str(
        r#"
domain = "logistics"
count = 40
generation_path = "llm"

[options]
use_cache = true
"#,
    )
    .expect("parse preset");
    assert_eq!(good.domain, Some(Domain::Logistics));
    assert_eq!(good.generation_path, Some(GenerationPath::Llm));
    assert_eq!(good.options.map(|o| o.use_cache), Some(true));

    let bad = toml::from_str::<ConfigPreset>("domain = \"logistics\"\nflavour = \"spicy\"\n");
    assert!(bad.is_err());
}

#[test]
fn reset_restores_defaults() {
    let mut config = GeneratorConfig::new();
    config.set_domain(Domain::Healthcare);
    config.set_count(200);
    config.add_scenario(Scenario::new("test", 10));
    config.toggle_option(OptionKey::UseCache);

    config.reset();
    assert_eq!(config, GeneratorConfig::new());
}

#[test]
fn scenario_names_are_normalized() {
    assert_eq!(normalize_scenario_name("  test_scenario  ").as_deref(), Some("test_scenario"));
    assert_eq!(normalize_scenario_name("peak   load hour").as_deref(), Some("peak_load_hour"));
    assert_eq!(normalize_scenario_name("   "), None);
}
