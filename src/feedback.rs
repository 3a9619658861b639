use crate::config::{FeedbackRules, IntentRule};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Coarse intent of a piece of design feedback. Exactly one is assigned per
/// comment; `Comment` is the fallback when nothing else matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackType {
    #[default]
    Comment,
    RefinementRequest,
    Approval,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeAdjustment {
    Larger,
    Smaller,
    Wider,
    Taller,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Material {
    Pla,
    Tpu,
    Petg,
    Abs,
}

/// Structured refinement parameters extracted from feedback text. Field names
/// follow the JSON contract of the workflow API that stores these records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_adjustment: Option<SizeAdjustment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material_change: Option<Material>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub functional_changes: Vec<String>,
}

impl FeedbackParameters {
    pub fn is_empty(&self) -> bool {
        self.size_adjustment.is_none()
            && self.material_change.is_none()
            && self.functional_changes.is_empty()
    }
}

/// Combined classification result, embedded verbatim into the caller's API
/// response and persisted project record. `parameters` is omitted entirely
/// when nothing was extracted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackAnalysis {
    pub feedback_type: FeedbackType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<FeedbackParameters>,
}

pub struct FeedbackClassifier {
    rules: FeedbackRules,
    compiled_patterns: HashMap<String, Regex>,
}

impl FeedbackClassifier {
    pub fn new(rules: FeedbackRules) -> anyhow::Result<Self> {
        let mut compiled_patterns = HashMap::new();

        // Pre-compile all regex patterns so a bad pattern fails construction
        // instead of classification
        for rule in &rules.intents {
            for pattern in &rule.patterns {
                if !compiled_patterns.contains_key(pattern) {
                    let regex = Regex::new(pattern).map_err(|e| {
                        anyhow::anyhow!("Invalid regex pattern '{}': {}", pattern, e)
                    })?;
                    compiled_patterns.insert(pattern.clone(), regex);
                }
            }
        }

        Ok(FeedbackClassifier {
            rules,
            compiled_patterns,
        })
    }

    /// Classify feedback text into an intent. Intent rules are checked in
    /// declaration order and the first match wins, so approval keywords take
    /// priority over refinement keywords.
    pub fn classify(&self, text: &str) -> FeedbackType {
        let text_lower = text.to_lowercase();

        for rule in &self.rules.intents {
            if self.intent_matches(rule, &text_lower, text) {
                log::debug!("Feedback matched {:?} rule: {:?}", rule.intent, text);
                return rule.intent;
            }
        }

        log::debug!(
            "No intent rule matched, using default {:?}",
            self.rules.default_intent
        );
        self.rules.default_intent
    }

    fn intent_matches(&self, rule: &IntentRule, text_lower: &str, original: &str) -> bool {
        if rule
            .keywords
            .iter()
            .any(|keyword| text_lower.contains(keyword.as_str()))
        {
            return true;
        }

        rule.patterns.iter().any(|pattern| {
            self.compiled_patterns
                .get(pattern)
                .map(|regex| regex.is_match(original))
                .unwrap_or(false)
        })
    }

    /// Scan feedback text for structured refinement parameters. Size and
    /// material groups are first-match-wins; functional rules all accumulate
    /// in declaration order. Returns None when nothing matched at all.
    ///
    /// Matching is naive substring containment ("not bigger" still matches
    /// "bigger"); this feeds a downstream regeneration hint, not a contract.
    pub fn extract_parameters(&self, text: &str) -> Option<FeedbackParameters> {
        let text_lower = text.to_lowercase();
        let mut params = FeedbackParameters::default();

        for rule in &self.rules.sizes {
            if rule
                .keywords
                .iter()
                .any(|keyword| text_lower.contains(keyword.as_str()))
            {
                params.size_adjustment = Some(rule.adjustment);
                break;
            }
        }

        for rule in &self.rules.materials {
            if rule
                .keywords
                .iter()
                .any(|keyword| text_lower.contains(keyword.as_str()))
            {
                params.material_change = Some(rule.material);
                break;
            }
        }

        for rule in &self.rules.functional {
            if rule
                .keywords
                .iter()
                .any(|keyword| text_lower.contains(keyword.as_str()))
            {
                params.functional_changes.push(rule.label.clone());
            }
        }

        if params.is_empty() {
            None
        } else {
            Some(params)
        }
    }

    /// Classify and extract in one pass; this is the record the request glue
    /// stores alongside the comment.
    pub fn analyze(&self, text: &str) -> FeedbackAnalysis {
        FeedbackAnalysis {
            feedback_type: self.classify(text),
            parameters: self.extract_parameters(text),
        }
    }
}
