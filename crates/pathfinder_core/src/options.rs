//! Named, typed configuration options of an algorithm.
//!
//! Every algorithm declares its options once when it is created. Values can
//! then be read and written by name without knowing the concrete algorithm,
//! which is what front ends and [`PathStatistics`] snapshots rely on. Typed
//! reads never fail: a stored value of the wrong type, outside the declared
//! range or not among the allowed choices yields the declared default.
//!
//! [`PathStatistics`]: crate::statistics::PathStatistics
use std::fmt;

use log::debug;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Integer(i64),
    Real(f64),
    Text(String),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{}", b),
            OptionValue::Integer(i) => write!(f, "{}", i),
            OptionValue::Real(r) => write!(f, "{}", r),
            OptionValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Bool(b)
    }
}

impl From<i64> for OptionValue {
    fn from(i: i64) -> Self {
        OptionValue::Integer(i)
    }
}

impl From<f64> for OptionValue {
    fn from(r: f64) -> Self {
        OptionValue::Real(r)
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Text(s.to_string())
    }
}

/// Type and constraint of an option
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum OptionKind {
    Bool,
    Integer { min: i64, max: i64 },
    Real { min: f64, max: f64, step: f64 },
    Choice(&'static [&'static str]),
}

impl OptionKind {
    /// True if `value` has the right type and satisfies the constraint
    pub fn accepts(&self, value: &OptionValue) -> bool {
        match (self, value) {
            (OptionKind::Bool, OptionValue::Bool(_)) => true,
            (OptionKind::Integer { min, max }, OptionValue::Integer(i)) => (*min..=*max).contains(i),
            (OptionKind::Real { min, max, .. }, OptionValue::Real(r)) => *min <= *r && *r <= *max,
            (OptionKind::Choice(choices), OptionValue::Text(s)) => choices.contains(&s.as_str()),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: OptionKind,
    pub default: OptionValue,
}

impl OptionInfo {
    pub fn new(
        name: &'static str,
        description: &'static str,
        kind: OptionKind,
        default: impl Into<OptionValue>,
    ) -> Self {
        OptionInfo {
            name,
            description,
            kind,
            default: default.into(),
        }
    }
}

/// Name and value of an option at the time a run started
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionSnapshot {
    pub name: &'static str,
    pub value: OptionValue,
}

impl fmt::Display for OptionSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionError {
    #[error("unknown option {0:?}")]
    Unknown(String),
}

#[derive(Debug, Clone)]
struct OptionEntry {
    info: OptionInfo,
    value: OptionValue,
}

/// Declared options of one algorithm in declaration order
#[derive(Debug, Clone, Default)]
pub struct OptionSet {
    entries: Vec<OptionEntry>,
}

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares an option, its current value starts as the default.
    pub fn declare(&mut self, info: OptionInfo) {
        let value = info.default.clone();
        self.entries.push(OptionEntry { info, value });
    }

    /// Builder flavour of [`OptionSet::declare`]
    pub fn with(mut self, info: OptionInfo) -> Self {
        self.declare(info);
        self
    }

    fn entry(&self, name: &str) -> Option<&OptionEntry> {
        self.entries.iter().find(|e| e.info.name == name)
    }

    pub fn info(&self, name: &str) -> Option<&OptionInfo> {
        self.entry(name).map(|e| &e.info)
    }

    /// Raw stored value
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.entry(name).map(|e| &e.value)
    }

    /// Stores `value` for a declared option. The value is not checked here,
    /// typed reads fall back to the default if it does not fit.
    pub fn set(&mut self, name: &str, value: impl Into<OptionValue>) -> Result<(), OptionError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.info.name == name)
            .ok_or_else(|| OptionError::Unknown(name.to_string()))?;
        entry.value = value.into();
        Ok(())
    }

    /// Parses `s` according to the declared kind of the option and stores it.
    /// Input that does not parse is stored as text and later ignored.
    pub fn set_from_str(&mut self, name: &str, s: &str) -> Result<(), OptionError> {
        let kind = self
            .info(name)
            .ok_or_else(|| OptionError::Unknown(name.to_string()))?
            .kind;
        let s = s.trim();
        let value = match kind {
            OptionKind::Bool => s.parse().map(OptionValue::Bool).ok(),
            OptionKind::Integer { .. } => s.parse().map(OptionValue::Integer).ok(),
            OptionKind::Real { .. } => s.parse().map(OptionValue::Real).ok(),
            OptionKind::Choice(_) => None,
        };
        self.set(name, value.unwrap_or_else(|| OptionValue::Text(s.to_string())))
    }

    /// Restores every option to its default
    pub fn reset(&mut self) {
        for entry in &mut self.entries {
            entry.value = entry.info.default.clone();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OptionInfo, &OptionValue)> {
        self.entries.iter().map(|e| (&e.info, &e.value))
    }

    pub fn snapshot(&self) -> Vec<OptionSnapshot> {
        self.entries
            .iter()
            .map(|e| OptionSnapshot {
                name: e.info.name,
                value: e.value.clone(),
            })
            .collect()
    }

    /// Stored value if acceptable, else the declared default. `None` only for
    /// undeclared names.
    fn effective(&self, name: &str) -> Option<&OptionValue> {
        let entry = self.entry(name)?;
        if entry.info.kind.accepts(&entry.value) {
            Some(&entry.value)
        } else {
            debug!(
                "Option {:?}: value {:?} rejected, using default {:?}",
                name, entry.value, entry.info.default
            );
            Some(&entry.info.default)
        }
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.effective(name)? {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.effective(name)? {
            OptionValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn real(&self, name: &str) -> Option<f64> {
        match self.effective(name)? {
            OptionValue::Real(r) => Some(*r),
            _ => None,
        }
    }

    pub fn choice(&self, name: &str) -> Option<&str> {
        match self.effective(name)? {
            OptionValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}
