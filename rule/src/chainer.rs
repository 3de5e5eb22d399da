//! Forward chainer.

use tracing::{debug, info_span};
use weft_core::AtomId;
use weft_pattern::{AtomStore, Implicator, PatternMatch, SchemaRegistry};

use crate::error::{RuleError, RuleResult};
use crate::{MAX_RESULTS, MAX_ROUNDS};

/// How a rule's results are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuleMode {
    /// Every grounding yields a result.
    #[default]
    Default,
    /// Crisp logic: clauses gated on truth, results forced true.
    Crisp,
}

/// A named `BindLink` fired by the chainer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindRule {
    pub name: String,
    pub bind: AtomId,
    pub priority: i32,
    pub mode: RuleMode,
}

impl BindRule {
    pub fn new(name: impl Into<String>, bind: AtomId) -> Self {
        Self {
            name: name.into(),
            bind,
            priority: 0,
            mode: RuleMode::Default,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn crisp(mut self) -> Self {
        self.mode = RuleMode::Crisp;
        self
    }
}

/// Limits for one chaining run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainerConfig {
    pub max_rounds: usize,
    pub max_results: usize,
}

impl ChainerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }
}

impl Default for ChainerConfig {
    fn default() -> Self {
        Self {
            max_rounds: MAX_ROUNDS,
            max_results: MAX_RESULTS,
        }
    }
}

/// Statistics from a chaining run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainerStats {
    /// Number of rounds run, including the final quiet one.
    pub rounds: usize,
    /// Number of rule firings.
    pub rules_fired: usize,
    /// Results produced, duplicates included.
    pub results: usize,
    /// Atoms added to the store.
    pub atoms_created: usize,
    /// Whether quiescence was reached.
    pub quiescence_reached: bool,
}

/// Fires bind rules until a round creates no new atoms.
#[derive(Debug, Default)]
pub struct ForwardChainer {
    rules: Vec<BindRule>,
    config: ChainerConfig,
    schemas: SchemaRegistry,
}

impl ForwardChainer {
    /// Create a new chainer with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: ChainerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_schemas(mut self, schemas: SchemaRegistry) -> Self {
        self.schemas = schemas;
        self
    }

    pub fn config(&self) -> &ChainerConfig {
        &self.config
    }

    /// Add a rule. Names are unique.
    pub fn add_rule(&mut self, rule: BindRule) -> RuleResult<()> {
        if self.rule(&rule.name).is_some() {
            return Err(RuleError::duplicate_rule(rule.name));
        }
        self.rules.push(rule);
        Ok(())
    }

    pub fn rule(&self, name: &str) -> Option<&BindRule> {
        self.rules.iter().find(|r| r.name == name)
    }

    /// Rules in firing order: highest priority first, ties by insertion.
    pub fn rules(&self) -> Vec<&BindRule> {
        let mut ordered: Vec<&BindRule> = self.rules.iter().collect();
        ordered.sort_by(|a, b| b.priority.cmp(&a.priority));
        ordered
    }

    /// Fire all rules to quiescence.
    pub fn run(&self, store: &mut dyn AtomStore) -> RuleResult<ChainerStats> {
        let mut stats = ChainerStats::default();
        let rules = self.rules();

        loop {
            // Check round limit
            if stats.rounds >= self.config.max_rounds {
                return Err(RuleError::max_rounds_exceeded(stats.rounds));
            }

            let _round = info_span!("round", number = stats.rounds + 1).entered();
            let before = store.atom_count();

            for rule in &rules {
                let results = self.fire(store, rule)?;
                stats.rules_fired += 1;
                stats.results += results.len();

                // Check result limit
                if stats.results > self.config.max_results {
                    return Err(RuleError::max_results_exceeded(stats.results));
                }
            }

            stats.rounds += 1;
            let created = store.atom_count().saturating_sub(before);
            stats.atoms_created += created;
            debug!(created, "round finished");

            // No new atoms: nothing further can match
            if created == 0 {
                stats.quiescence_reached = true;
                break;
            }
        }

        debug!(
            rounds = stats.rounds,
            rules_fired = stats.rules_fired,
            atoms_created = stats.atoms_created,
            "chaining reached quiescence"
        );
        Ok(stats)
    }

    /// Manually fire a rule by name, once.
    pub fn fire_rule_by_name(
        &self,
        store: &mut dyn AtomStore,
        name: &str,
    ) -> RuleResult<Vec<AtomId>> {
        let rule = self
            .rule(name)
            .ok_or_else(|| RuleError::unknown_rule(name))?;

        self.fire(store, rule)
    }

    fn fire(&self, store: &mut dyn AtomStore, rule: &BindRule) -> RuleResult<Vec<AtomId>> {
        let implicator = match rule.mode {
            RuleMode::Default => Implicator::collect_all(),
            RuleMode::Crisp => Implicator::crisp(),
        };
        let mut implicator = implicator.with_schemas(self.schemas.clone());

        PatternMatch::new(&mut *store).do_bindlink(rule.bind, &mut implicator)?;

        debug!(rule = %rule.name, results = implicator.results().len(), "rule fired");
        Ok(implicator.into_results())
    }
}
