//! Variable Guard
//!
//! Protects `:name` style placeholders (a colon followed by lowercase letters
//! or underscores). Numbering comes from a [`VariableCounter`] that the caller
//! owns, so whether `Variable<N>` restarts at 1 for each string or keeps
//! growing through a whole table is the owner's decision.

use std::ops::Range;
use std::sync::LazyLock;

use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::vault::{Guard, SpanKind};

static VARIABLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":[a-z_]+").expect("variable pattern is valid"));

/// Lifetime of the variable counter inside a translation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum CounterScope {
    /// One counter for the whole run; numbering grows across strings
    #[default]
    #[serde(rename = "run")]
    #[value(name = "run")]
    PerRun,
    /// Counter restarts at 1 for every entry
    #[serde(rename = "entry")]
    #[value(name = "entry")]
    PerEntry,
}

/// Monotonic 1-based counter handing out `Variable<N>` indices
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableCounter {
    issued: usize,
}

impl VariableCounter {
    pub fn new() -> Self {
        VariableCounter { issued: 0 }
    }

    pub fn next_index(&mut self) -> usize {
        self.issued += 1;
        self.issued
    }

    /// Number of indices handed out so far
    pub fn issued(&self) -> usize {
        self.issued
    }

    pub fn reset(&mut self) {
        self.issued = 0;
    }
}

#[derive(Debug)]
pub struct VariableGuard<'a> {
    counter: &'a mut VariableCounter,
}

impl<'a> VariableGuard<'a> {
    pub fn new(counter: &'a mut VariableCounter) -> Self {
        VariableGuard { counter }
    }
}

impl Guard for VariableGuard<'_> {
    fn kind(&self) -> SpanKind {
        SpanKind::Variable
    }

    fn find_spans(&self, text: &str) -> Vec<Range<usize>> {
        VARIABLE_REGEX.find_iter(text).map(|m| m.range()).collect()
    }

    fn assign(&mut self, _occurrence: usize, _literal: &str) -> usize {
        self.counter.next_index()
    }
}
