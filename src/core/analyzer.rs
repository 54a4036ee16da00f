//! Batch filtering of unit files and the resulting report.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::Serialize;

use super::{Error, Result, UnitFile};
use crate::config::Config;
use crate::filter::{default_registry, CompoundInterceptor, FilterRegistry, MutationInterceptor};
use crate::mutation::{MutationDetails, NoopMutater};

/// Applies the enabled interceptors to unit files.
#[derive(Debug)]
pub struct Analyzer {
    interceptor: CompoundInterceptor,
    jobs: usize,
}

impl Analyzer {
    /// Build the analyzer for the built-in filters.
    pub fn new(config: &Config) -> Self {
        Self::with_registry(config, &default_registry())
    }

    /// Build the analyzer from the features of `registry` that `config` enables.
    pub fn with_registry(config: &Config, registry: &FilterRegistry) -> Self {
        Self {
            interceptor: registry
                .create_enabled(&config.feature_toggles(), &config.interceptor_params()),
            jobs: config.jobs,
        }
    }

    /// Override the number of worker threads (0 = rayon default).
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    /// Filter every unit and summarize the outcome.
    ///
    /// The first unit that fails aborts the batch.
    pub fn analyze(&self, units: &[UnitFile]) -> Result<Analysis> {
        let start = Instant::now();

        let reports = if self.jobs > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.jobs)
                .build()
                .map_err(|e| Error::InvalidArgument(format!("jobs = {}: {e}", self.jobs)))?;
            pool.install(|| self.filter_all(units))?
        } else {
            self.filter_all(units)?
        };

        let summary = Summary::new(&reports, start.elapsed());
        tracing::info!(
            units = summary.units_analyzed,
            total = summary.mutations_total,
            filtered = summary.mutations_filtered,
            "filtering complete"
        );
        Ok(Analysis {
            units: reports,
            summary,
        })
    }

    fn filter_all(&self, units: &[UnitFile]) -> Result<Vec<UnitReport>> {
        units.par_iter().map(|unit| self.filter_unit(unit)).collect()
    }

    /// Run one unit through the interceptor chain.
    pub fn filter_unit(&self, unit: &UnitFile) -> Result<UnitReport> {
        let scope = self.interceptor.begin(&unit.class);
        let result = self
            .interceptor
            .intercept(&scope, unit.mutations.clone(), &NoopMutater);
        self.interceptor.end(scope);

        let kept = result.map_err(|e| {
            tracing::debug!(unit = %unit.class.name, path = %unit.path.display(), "unit failed");
            e
        })?;
        let filtered = removed(&unit.mutations, &kept);
        Ok(UnitReport {
            path: unit.path.clone(),
            class: unit.class.name.clone(),
            kept,
            filtered,
        })
    }
}

/// Candidates of `all` missing from `kept`, which preserves the order of `all`.
fn removed(all: &[MutationDetails], kept: &[MutationDetails]) -> Vec<MutationDetails> {
    let mut remaining = kept.iter().peekable();
    all.iter()
        .filter(|mutation| {
            if remaining.peek() == Some(mutation) {
                remaining.next();
                false
            } else {
                true
            }
        })
        .cloned()
        .collect()
}

/// Outcome of filtering one unit.
#[derive(Debug, Clone, Serialize)]
pub struct UnitReport {
    /// File the unit was loaded from.
    pub path: PathBuf,
    /// Internal class name.
    pub class: String,
    /// Candidates that still need testing.
    pub kept: Vec<MutationDetails>,
    /// Candidates removed as equivalent.
    pub filtered: Vec<MutationDetails>,
}

/// Results of a filtering run.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub units: Vec<UnitReport>,
    pub summary: Summary,
}

/// Quick summary statistics for display.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    /// Number of units filtered.
    pub units_analyzed: usize,
    /// Candidates received.
    pub mutations_total: usize,
    /// Candidates kept.
    pub mutations_kept: usize,
    /// Candidates removed as equivalent.
    pub mutations_filtered: usize,
    /// Filtering duration.
    #[serde(with = "duration_serde")]
    pub duration: Duration,
}

impl Summary {
    /// Summarize `reports`.
    pub fn new(reports: &[UnitReport], duration: Duration) -> Self {
        let mutations_kept: usize = reports.iter().map(|r| r.kept.len()).sum();
        let mutations_filtered: usize = reports.iter().map(|r| r.filtered.len()).sum();
        Self {
            units_analyzed: reports.len(),
            mutations_total: mutations_kept + mutations_filtered,
            mutations_kept,
            mutations_filtered,
            duration,
        }
    }
}

mod duration_serde {
    use std::time::Duration;

    use serde::Serializer;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(duration.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytecode::{ClassTree, Instruction, Location, MethodTree, Opcode};

    fn location(name: &str) -> Location {
        Location::new("com/example/Foo", name, "()I")
    }

    fn unit() -> UnitFile {
        UnitFile::new(
            ClassTree::new(
                "com/example/Foo",
                vec![
                    MethodTree::new(
                        location("zero"),
                        vec![Instruction::int(0), Instruction::op(Opcode::IReturn)],
                    ),
                    MethodTree::new(
                        location("one"),
                        vec![Instruction::int(1), Instruction::op(Opcode::IReturn)],
                    ),
                ],
            ),
            vec![
                MutationDetails::new(location("zero"), "PRIMITIVE_RETURNS", 1, ""),
                MutationDetails::new(location("zero"), "MATH", 1, ""),
                MutationDetails::new(location("one"), "PRIMITIVE_RETURNS", 1, ""),
                MutationDetails::new(location("one"), "TRUE_RETURNS", 1, ""),
            ],
        )
    }

    #[test]
    fn test_filter_unit_splits_kept_and_filtered() {
        let analyzer = Analyzer::new(&Config::default());
        let report = analyzer.filter_unit(&unit()).unwrap();
        let mutators = |list: &[MutationDetails]| {
            list.iter()
                .map(|m| format!("{}:{}", m.location.method_name, m.mutator))
                .collect::<Vec<_>>()
        };
        assert_eq!(
            mutators(&report.kept),
            vec!["zero:MATH", "one:PRIMITIVE_RETURNS"]
        );
        assert_eq!(
            mutators(&report.filtered),
            vec!["zero:PRIMITIVE_RETURNS", "one:TRUE_RETURNS"]
        );
        assert_eq!(report.class, "com/example/Foo");
    }

    #[test]
    fn test_disabled_feature_keeps_everything() {
        let mut config = Config::default();
        config.features.insert("FRETEQUIV".into(), false);
        let report = Analyzer::new(&config).filter_unit(&unit()).unwrap();
        assert_eq!(report.kept, unit().mutations);
        assert!(report.filtered.is_empty());
    }

    #[test]
    fn test_analyze_summary() {
        let analyzer = Analyzer::new(&Config::default()).with_jobs(2);
        let analysis = analyzer.analyze(&[unit(), unit()]).unwrap();
        assert_eq!(analysis.summary.units_analyzed, 2);
        assert_eq!(analysis.summary.mutations_total, 8);
        assert_eq!(analysis.summary.mutations_filtered, 4);
        assert_eq!(analysis.summary.mutations_kept, 4);
    }

    #[test]
    fn test_analyze_fails_on_unresolved_location() {
        let mut broken = unit();
        broken.mutations.push(MutationDetails::new(
            location("missing"),
            "NULL_RETURNS",
            0,
            "",
        ));
        let err = Analyzer::new(&Config::default())
            .analyze(&[unit(), broken])
            .unwrap_err();
        assert!(matches!(err, Error::UnresolvedLocation { .. }));
    }

    #[test]
    fn test_removed_preserves_order() {
        let all = unit().mutations;
        let kept = vec![all[1].clone(), all[3].clone()];
        assert_eq!(removed(&all, &kept), vec![all[0].clone(), all[2].clone()]);
        assert!(removed(&all, &all).is_empty());
        assert_eq!(removed(&all, &[]), all);
    }

    #[test]
    fn test_summary_serialization() {
        let summary = Summary {
            units_analyzed: 1,
            mutations_total: 3,
            mutations_kept: 2,
            mutations_filtered: 1,
            duration: Duration::from_secs(1),
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"mutations_filtered\":1"));
        assert!(json.contains("\"duration\":1.0"));
    }
}
