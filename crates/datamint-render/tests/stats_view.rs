use datamint_core::{GenerationMetadata, GenerationResult};
use datamint_render::{DEFAULT_COHERENCE_SCORE, NOT_AVAILABLE, PreviewTab, ResultStats};
use serde_json::json;

fn result(record_count: u64, metadata: GenerationMetadata) -> GenerationResult {
    GenerationResult {
        success: true,
        request_id: "req-1".to_string(),
        data: json!([]),
        record_count,
        metadata,
        error: None,
    }
}

fn scenario_counts(value: serde_json::Value) -> Option<serde_json::Map<String, serde_json::Value>> {
    value.as_object().cloned()
}

#[test]
fn summary_labels() {
    let stats = ResultStats::from_result(&result(
        25,
        GenerationMetadata {
            generation_path: Some("llm".to_string()),
            generation_time_ms: Some(2500.0),
            coherence_score: Some(0.876),
            ..GenerationMetadata::default()
        },
    ));
    assert_eq!(stats.generation_time_label(), "2.50s");
    assert_eq!(stats.generation_path_label(), "llm");
    assert_eq!(stats.coherence_label(), "0.88");
    assert_eq!(stats.coherence_percent_label(), "88%");
}

#[test]
fn missing_metadata_falls_back() {
    let stats = ResultStats::from_result(&result(10, GenerationMetadata::default()));
    assert_eq!(stats.generation_time_label(), NOT_AVAILABLE);
    assert_eq!(stats.generation_path_label(), "Unknown");
    assert_eq!(stats.coherence_score, DEFAULT_COHERENCE_SCORE);
    assert_eq!(stats.coherence_label(), "0.95");
    assert_eq!(stats.scenario_bucket_count(), 1);
    assert!(stats.performance.is_none());
}

#[test]
fn zero_generation_time_is_not_available() {
    let stats = ResultStats::from_result(&result(
        10,
        GenerationMetadata {
            generation_time_ms: Some(0.0),
            ..GenerationMetadata::default()
        },
    ));
    assert_eq!(stats.generation_time_label(), NOT_AVAILABLE);
}

#[test]
fn zero_generation_time_blanks_every_timing_metric() {
    let stats = ResultStats::from_result(&result(
        10,
        GenerationMetadata {
            llm_tokens_used: Some(300),
            generation_time_ms: Some(0.0),
            ..GenerationMetadata::default()
        },
    ));
    let performance = stats.performance.clone().expect("performance block");
    assert_eq!(performance.tokens_per_record, Some(30.0));
    assert_eq!(performance.records_per_second, None);
    assert_eq!(performance.ms_per_record, None);

    let section = stats
        .sections()
        .into_iter()
        .find(|section| section.title == "Performance Metrics")
        .expect("performance section");
    assert!(section.rows.contains(&("Generation Speed".to_string(), NOT_AVAILABLE.to_string())));
    assert!(section.rows.contains(&("Time per Record".to_string(), NOT_AVAILABLE.to_string())));
}

#[test]
fn scenario_shares_use_sum_of_counts() {
    let stats = ResultStats::from_result(&result(
        60,
        GenerationMetadata {
            scenario_counts: scenario_counts(json!({"happy_path": 30, "edge_case": 10})),
            ..GenerationMetadata::default()
        },
    ));
    let shares: Vec<(&str, u64, String)> = stats
        .scenarios
        .iter()
        .map(|share| (share.name.as_str(), share.count, format!("{:.1}", share.percent)))
        .collect();
    assert_eq!(
        shares,
        vec![
            ("happy_path", 30, "75.0".to_string()),
            ("edge_case", 10, "25.0".to_string())
        ]
    );
    assert_eq!(stats.scenario_bucket_count(), 2);
}

#[test]
fn zero_scenario_total_gives_zero_percent() {
    let stats = ResultStats::from_result(&result(
        0,
        GenerationMetadata {
            scenario_counts: scenario_counts(json!({"happy_path": 0})),
            ..GenerationMetadata::default()
        },
    ));
    assert_eq!(stats.scenarios[0].percent, 0.0);
}

#[test]
fn performance_ratios() {
    let stats = ResultStats::from_result(&result(
        50,
        GenerationMetadata {
            llm_tokens_used: Some(1000),
            generation_time_ms: Some(2000.0),
            ..GenerationMetadata::default()
        },
    ));
    let performance = stats.performance.clone().expect("performance block");
    assert_eq!(performance.tokens_per_record, Some(20.0));
    assert_eq!(performance.records_per_second, Some(25.0));
    assert_eq!(performance.ms_per_record, Some(40.0));

    let section = stats
        .sections()
        .into_iter()
        .find(|section| section.title == "Performance Metrics")
        .expect("performance section");
    assert_eq!(
        section.rows,
        vec![
            ("LLM Tokens Used".to_string(), "1000".to_string()),
            ("Tokens per Record".to_string(), "20.00".to_string()),
            ("Generation Speed".to_string(), "25 rec/s".to_string()),
            ("Time per Record".to_string(), "40.00ms".to_string()),
        ]
    );
}

#[test]
fn zero_records_never_yield_nan_or_infinity() {
    let stats = ResultStats::from_result(&result(
        0,
        GenerationMetadata {
            llm_tokens_used: Some(500),
            generation_time_ms: Some(1200.0),
            ..GenerationMetadata::default()
        },
    ));
    let performance = stats.performance.clone().expect("performance block");
    assert_eq!(performance.tokens_per_record, None);
    assert_eq!(performance.records_per_second, None);
    assert_eq!(performance.ms_per_record, None);

    let rendered: Vec<String> = stats
        .sections()
        .into_iter()
        .flat_map(|section| section.rows.into_iter().map(|(_, value)| value))
        .collect();
    assert!(rendered.iter().all(|value| !value.contains("NaN") && !value.contains("inf")));
    assert!(rendered.iter().any(|value| value == NOT_AVAILABLE));
}

#[test]
fn quality_block_is_always_present() {
    let stats = ResultStats::from_result(&result(7, GenerationMetadata::default()));
    let quality = stats
        .sections()
        .into_iter()
        .find(|section| section.title == "Data Quality")
        .expect("quality section");
    assert_eq!(
        quality.rows,
        vec![
            ("Coherence".to_string(), "95%".to_string()),
            ("Total Records".to_string(), "7".to_string()),
            ("Completeness".to_string(), "100%".to_string()),
            ("Scenarios".to_string(), "1".to_string()),
        ]
    );
}

#[test]
fn preview_tabs_cycle() {
    assert_eq!(PreviewTab::Json.next(), PreviewTab::Table);
    assert_eq!(PreviewTab::Stats.next(), PreviewTab::Json);
    assert_eq!(PreviewTab::Json.prev(), PreviewTab::Stats);
}
