//! Ordered file-pattern detectors
//!
//! A [`DetectorRegistry`] answers "what kind of project is this directory?"
//! from nothing more than the file names it contains. Detectors are tried in
//! registration order and the first one with any matching pattern decides the
//! type, so registration order doubles as priority.

use glob::Pattern;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("Detector '{type_name}' has an invalid pattern '{pattern}': {message}")]
    InvalidPattern {
        type_name: String,
        pattern: String,
        message: String,
    },

    #[error("Detector '{0}' has no patterns")]
    NoPatterns(String),
}

/// Maps a set of file-name globs to a project type
#[derive(Debug, Clone)]
pub struct Detector {
    type_name: String,
    patterns: Vec<Pattern>,
}

impl Detector {
    pub fn new<S: AsRef<str>>(type_name: &str, patterns: &[S]) -> Result<Self, DetectorError> {
        if patterns.is_empty() {
            return Err(DetectorError::NoPatterns(type_name.to_string()));
        }

        let patterns = patterns
            .iter()
            .map(|p| {
                Pattern::new(p.as_ref()).map_err(|e| DetectorError::InvalidPattern {
                    type_name: type_name.to_string(),
                    pattern: p.as_ref().to_string(),
                    message: e.msg.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            type_name: type_name.to_string(),
            patterns,
        })
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn patterns(&self) -> Vec<&str> {
        self.patterns.iter().map(Pattern::as_str).collect()
    }

    /// True when any pattern matches the bare file name
    pub fn matches(&self, filename: &str) -> bool {
        let name = match Path::new(filename).file_name().and_then(|n| n.to_str()) {
            Some(name) if !name.is_empty() => name,
            _ => return false,
        };
        self.patterns.iter().any(|p| p.matches(name))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DetectorSummary {
    #[serde(rename = "type")]
    pub type_name: String,
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DetectorRegistry {
    detectors: Vec<Detector>,
}

impl DetectorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for &(type_name, patterns) in DEFAULT_DETECTORS {
            // Builtin patterns are checked by test_defaults_all_compile.
            if let Ok(detector) = Detector::new(type_name, patterns) {
                registry.register(detector);
            }
        }
        registry
    }

    pub fn register(&mut self, detector: Detector) {
        debug!(
            detector = detector.type_name(),
            priority = self.detectors.len(),
            "Registered detector"
        );
        self.detectors.push(detector);
    }

    /// Returns the type of the first detector matching any file in `listing`,
    /// or `None` when nothing matches.
    pub fn classify<I, S>(&self, listing: I) -> Option<&str>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let files: Vec<String> = listing
            .into_iter()
            .map(|f| AsRef::<str>::as_ref(&f).to_string())
            .collect();
        if files.is_empty() {
            return None;
        }

        for detector in &self.detectors {
            if let Some(file) = files.iter().find(|f| detector.matches(f)) {
                trace!(
                    detector = detector.type_name(),
                    file = %file,
                    "Detector matched"
                );
                return Some(detector.type_name());
            }
        }

        debug!(files = files.len(), "No detector matched");
        None
    }

    pub fn detectors(&self) -> &[Detector] {
        &self.detectors
    }

    pub fn summaries(&self) -> Vec<DetectorSummary> {
        self.detectors
            .iter()
            .map(|d| DetectorSummary {
                type_name: d.type_name().to_string(),
                patterns: d.patterns().into_iter().map(str::to_string).collect(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }
}

/// Builtin detectors, highest priority first
pub const DEFAULT_DETECTORS: &[(&str, &[&str])] = &[
    ("go", &["*.go"]),
    ("php", &["*.php", "composer.json"]),
    ("ruby", &["*.rb", "Gemfile", "config.ru"]),
    ("node", &["package.json"]),
    ("python", &["*.py", "requirements.txt"]),
];
