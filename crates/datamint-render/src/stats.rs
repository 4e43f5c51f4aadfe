use datamint_core::GenerationResult;

/// Coherence shown when the backend reports none.
///
/// Kept for compatibility with existing dashboards; its provenance is
/// unclear and it is pending product review.
pub const DEFAULT_COHERENCE_SCORE: f64 = 0.95;
pub const NOT_AVAILABLE: &str = "N/A";

/// Share of one scenario in the generated batch.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioShare {
    pub name: String,
    pub count: u64,
    /// Percentage of the sum of all scenario counts; 0 when that sum is 0.
    pub percent: f64,
}

/// Ratios derived from token usage. Each is `None` when its divisor is zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Performance {
    pub tokens_used: u64,
    pub tokens_per_record: Option<f64>,
    pub records_per_second: Option<f64>,
    pub ms_per_record: Option<f64>,
}

/// Titled block of label/value pairs, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSection {
    pub title: &'static str,
    pub rows: Vec<(String, String)>,
}

/// Statistics derived from a generation result.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultStats {
    pub record_count: u64,
    pub generation_time_ms: Option<f64>,
    pub generation_path: Option<String>,
    pub coherence_score: f64,
    pub scenarios: Vec<ScenarioShare>,
    pub performance: Option<Performance>,
}

impl ResultStats {
    pub fn from_result(result: &GenerationResult) -> Self {
        let metadata = &result.metadata;
        let record_count = result.record_count;

        let counts = metadata.scenario_counts();
        let total: u64 = counts.iter().map(|(_, count)| count).sum();
        let scenarios = counts
            .into_iter()
            .map(|(name, count)| ScenarioShare {
                percent: if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64 * 100.0
                },
                name,
                count,
            })
            .collect();

        let time_ms = metadata.generation_time_ms.filter(|ms| *ms > 0.0);
        let seconds = time_ms.map(|ms| ms / 1000.0);
        let performance = metadata.llm_tokens_used.map(|tokens| Performance {
            tokens_used: tokens,
            tokens_per_record: ratio(tokens as f64, record_count as f64),
            records_per_second: seconds
                .filter(|_| record_count > 0)
                .and_then(|secs| ratio(record_count as f64, secs)),
            ms_per_record: time_ms.and_then(|ms| ratio(ms, record_count as f64)),
        });

        Self {
            record_count,
            generation_time_ms: metadata.generation_time_ms,
            generation_path: metadata.generation_path.clone(),
            coherence_score: metadata.coherence_score.unwrap_or(DEFAULT_COHERENCE_SCORE),
            scenarios,
            performance,
        }
    }

    pub fn generation_time_label(&self) -> String {
        match self.generation_time_ms {
            Some(ms) if ms != 0.0 => format!("{:.2}s", ms / 1000.0),
            _ => NOT_AVAILABLE.to_string(),
        }
    }

    pub fn generation_path_label(&self) -> &str {
        match self.generation_path.as_deref() {
            Some(path) if !path.is_empty() => path,
            _ => "Unknown",
        }
    }

    pub fn coherence_label(&self) -> String {
        format!("{:.2}", self.coherence_score)
    }

    pub fn coherence_percent_label(&self) -> String {
        format!("{:.0}%", self.coherence_score * 100.0)
    }

    /// Number of scenario buckets, counting an unbucketed batch as one.
    pub fn scenario_bucket_count(&self) -> usize {
        self.scenarios.len().max(1)
    }

    pub fn sections(&self) -> Vec<StatsSection> {
        let mut sections = vec![StatsSection {
            title: "Summary",
            rows: vec![
                ("Records Generated".to_string(), self.record_count.to_string()),
                ("Generation Time".to_string(), self.generation_time_label()),
                (
                    "Generation Path".to_string(),
                    self.generation_path_label().to_string(),
                ),
                ("Coherence Score".to_string(), self.coherence_label()),
            ],
        }];

        if !self.scenarios.is_empty() {
            sections.push(StatsSection {
                title: "Scenario Distribution",
                rows: self
                    .scenarios
                    .iter()
                    .map(|share| {
                        (
                            share.name.clone(),
                            format!("{} ({:.1}%)", share.count, share.percent),
                        )
                    })
                    .collect(),
            });
        }

        if let Some(performance) = &self.performance {
            sections.push(StatsSection {
                title: "Performance Metrics",
                rows: vec![
                    (
                        "LLM Tokens Used".to_string(),
                        performance.tokens_used.to_string(),
                    ),
                    (
                        "Tokens per Record".to_string(),
                        format_ratio(performance.tokens_per_record, 2, ""),
                    ),
                    (
                        "Generation Speed".to_string(),
                        format_ratio(performance.records_per_second, 0, " rec/s"),
                    ),
                    (
                        "Time per Record".to_string(),
                        format_ratio(performance.ms_per_record, 2, "ms"),
                    ),
                ],
            });
        }

        sections.push(StatsSection {
            title: "Data Quality",
            rows: vec![
                ("Coherence".to_string(), self.coherence_percent_label()),
                ("Total Records".to_string(), self.record_count.to_string()),
                ("Completeness".to_string(), "100%".to_string()),
                (
                    "Scenarios".to_string(),
                    self.scenario_bucket_count().to_string(),
                ),
            ],
        });

        sections
    }
}

fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    let value = numerator / denominator;
    value.is_finite().then_some(value)
}

fn format_ratio(value: Option<f64>, decimals: usize, suffix: &str) -> String {
    match value {
        Some(value) => format!("{value:.decimals$}{suffix}"),
        None => NOT_AVAILABLE.to_string(),
    }
}
