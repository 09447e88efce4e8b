use std::fmt;

use crate::ast::{validate_clause, Proposition};
use crate::error::ValidationError;
use crate::prover::{Body, Clause};

/// Builds a knowledge base out of clause literals,
/// stopping at the first clause that fails validation
#[macro_export]
macro_rules! knowledge_base {
    ( $($clause:expr),* $(,)? ) => {{
        let mut knowledge = $crate::prover::KnowledgeBase::new();
        let mut result: Result<(), $crate::error::ValidationError> = Ok(());
        $(
            if result.is_ok() {
                result = knowledge.submit_clause($clause);
            }
        )*
        result.map(|_| knowledge)
    }};
}

/// The ordered, append-only store of every accepted clause
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    clauses: Vec<Clause>,
}

impl KnowledgeBase {
    pub fn new() -> KnowledgeBase {
        KnowledgeBase { clauses: Vec::new() }
    }
    /// Validate `text` and append it.
    /// Rejected clauses leave the knowledge base as it was
    pub fn submit_clause(&mut self, text: &str) -> Result<(), ValidationError> {
        let clause = validate_clause(text)?;
        debug!("told {:?}", clause);
        self.clauses.push(clause);
        Ok( () )
    }
    pub fn clauses(&self) -> &[Clause] {
        self.clauses.as_slice()
    }
    pub fn len(&self) -> usize {
        self.clauses.len()
    }
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
    /// Every asserted proposition, in order of submission
    pub fn facts(&self) -> impl Iterator<Item = Proposition> + '_ {
        self.clauses.iter()
            .filter(|clause| clause.is_fact())
            .map(Clause::head)
    }
    pub fn is_fact(&self, proposition: Proposition) -> bool {
        self.facts().any(|p| p == proposition)
    }
    /// The bodies of every rule concluding `head`, in order of submission.
    /// Anything other than a single proposition matches nothing
    pub fn matching_rule_bodies(&self, head: &str) -> Vec<&Body> {
        match Proposition::from_text(head) {
            Some(head) => self.rules_concluding(head).collect(),
            None => Vec::new(),
        }
    }
    pub fn rules_concluding(&self, head: Proposition) -> impl Iterator<Item = &Body> + '_ {
        self.clauses.iter()
            .filter_map(move |clause| match clause {
                Clause::Rule { body, head: h } if *h == head => Some(body),
                _ => None,
            })
    }
    pub fn stats(&self) -> KnowledgeStats {
        let facts = self.facts().count();
        KnowledgeStats {
            facts,
            rules: self.clauses.len() - facts,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnowledgeStats {
    pub facts: usize,
    pub rules: usize,
}

impl fmt::Display for KnowledgeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} facts, {} rules", self.facts, self.rules)
    }
}
