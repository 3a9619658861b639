use crate::feedback::{FeedbackType, Material, SizeAdjustment};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub feedback: FeedbackRules,
    pub printability: PrintabilityRules,
}

/// Ordered rule sets for feedback classification and parameter extraction.
/// Rule order is significant: intent, size, and material rules are evaluated
/// top to bottom with the first match winning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRules {
    pub intents: Vec<IntentRule>,
    #[serde(default)]
    pub default_intent: FeedbackType,
    pub sizes: Vec<SizeRule>,
    pub materials: Vec<MaterialRule>,
    pub functional: Vec<FunctionalRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentRule {
    pub intent: FeedbackType,
    pub keywords: Vec<String>,
    // Optional regex patterns, matched against the original (non-lowercased) text
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizeRule {
    pub adjustment: SizeAdjustment,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialRule {
    pub material: Material,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionalRule {
    pub label: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintabilityRules {
    pub model_check: CheckProfile,
    pub stl_check: CheckProfile,
}

/// One printability check profile: threshold rules evaluated independently in
/// declaration order, plus the recommendations emitted when nothing triggers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckProfile {
    pub rules: Vec<PrintRule>,
    pub clean_recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintRule {
    pub check: StatCheck,
    pub issue: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StatCheck {
    VertexCountAbove { limit: u64 },
    FaceCountAbove { limit: u64 },
    FaceCountBelow { limit: u64 },
    FileSizeAbove { bytes: u64 },
    VolumeAbove { cm3: f64 },
    VolumeBelow { cm3: f64 },
}

impl Default for FeedbackRules {
    fn default() -> Self {
        FeedbackRules {
            // Approval checked before refinement: "perfect, but please add a
            // hole" counts as approval.
            intents: vec![
                IntentRule {
                    intent: FeedbackType::Approval,
                    keywords: vec![
                        "perfect".to_string(),
                        "looks good".to_string(),
                        "approve".to_string(),
                        "ready".to_string(),
                    ],
                    patterns: Vec::new(),
                },
                IntentRule {
                    intent: FeedbackType::RefinementRequest,
                    keywords: vec![
                        "change".to_string(),
                        "adjust".to_string(),
                        "make it".to_string(),
                        "need".to_string(),
                        "should be".to_string(),
                        "add".to_string(),
                        "remove".to_string(),
                    ],
                    patterns: Vec::new(),
                },
            ],
            default_intent: FeedbackType::Comment,
            sizes: vec![
                SizeRule {
                    adjustment: SizeAdjustment::Larger,
                    keywords: vec![
                        "bigger".to_string(),
                        "larger".to_string(),
                        "increase size".to_string(),
                    ],
                },
                SizeRule {
                    adjustment: SizeAdjustment::Smaller,
                    keywords: vec![
                        "smaller".to_string(),
                        "reduce size".to_string(),
                        "compact".to_string(),
                    ],
                },
                SizeRule {
                    adjustment: SizeAdjustment::Wider,
                    keywords: vec!["wider".to_string(), "broader".to_string()],
                },
                SizeRule {
                    adjustment: SizeAdjustment::Taller,
                    keywords: vec!["taller".to_string(), "higher".to_string()],
                },
            ],
            materials: vec![
                MaterialRule {
                    material: Material::Tpu,
                    keywords: vec![
                        "flexible".to_string(),
                        "rubbery".to_string(),
                        "tpu".to_string(),
                    ],
                },
                MaterialRule {
                    material: Material::Pla,
                    keywords: vec![
                        "rigid".to_string(),
                        "hard".to_string(),
                        "pla".to_string(),
                    ],
                },
                MaterialRule {
                    material: Material::Petg,
                    keywords: vec![
                        "durable".to_string(),
                        "strong".to_string(),
                        "petg".to_string(),
                    ],
                },
                MaterialRule {
                    material: Material::Abs,
                    keywords: vec!["abs".to_string()],
                },
            ],
            functional: vec![
                FunctionalRule {
                    label: "Add holes or openings".to_string(),
                    keywords: vec!["hole".to_string(), "opening".to_string()],
                },
                FunctionalRule {
                    label: "Add grip texture".to_string(),
                    keywords: vec!["grip".to_string(), "texture".to_string()],
                },
                FunctionalRule {
                    label: "Add compartments".to_string(),
                    keywords: vec!["compartment".to_string(), "section".to_string()],
                },
                FunctionalRule {
                    label: "Smooth edges".to_string(),
                    keywords: vec!["smooth".to_string(), "rounded".to_string()],
                },
            ],
        }
    }
}

impl Default for PrintabilityRules {
    fn default() -> Self {
        PrintabilityRules {
            model_check: CheckProfile {
                rules: vec![
                    PrintRule {
                        check: StatCheck::VertexCountAbove { limit: 100_000 },
                        issue: "High vertex count may slow printing".to_string(),
                        recommendation: "Consider reducing model complexity".to_string(),
                    },
                    PrintRule {
                        check: StatCheck::FileSizeAbove {
                            bytes: 10 * 1024 * 1024,
                        },
                        issue: "Large file size may indicate excessive detail".to_string(),
                        recommendation: "Optimize mesh for 3D printing".to_string(),
                    },
                ],
                clean_recommendations: vec![
                    "Model appears print-ready".to_string(),
                    "Recommended layer height: 0.2mm".to_string(),
                    "Supports may be needed for overhangs".to_string(),
                ],
            },
            stl_check: CheckProfile {
                rules: vec![
                    PrintRule {
                        check: StatCheck::VolumeBelow { cm3: 1.0 },
                        issue: "Model may be too small for reliable printing".to_string(),
                        recommendation: "Consider scaling up the model".to_string(),
                    },
                    PrintRule {
                        check: StatCheck::VolumeAbove { cm3: 1000.0 },
                        issue: "Model may be too large for some 3D printers".to_string(),
                        recommendation: "Consider scaling down or printing in parts".to_string(),
                    },
                    PrintRule {
                        check: StatCheck::FaceCountAbove { limit: 50_000 },
                        issue: "High face count may cause slicer performance issues".to_string(),
                        recommendation: "Consider mesh decimation to reduce complexity".to_string(),
                    },
                    PrintRule {
                        check: StatCheck::FaceCountBelow { limit: 100 },
                        issue: "Low face count may result in blocky appearance".to_string(),
                        recommendation: "Consider increasing mesh resolution".to_string(),
                    },
                ],
                clean_recommendations: vec![
                    "Model appears optimized for 3D printing".to_string(),
                    "Recommended infill: 15-20%".to_string(),
                    "Recommended layer height: 0.2mm".to_string(),
                    "Consider orientation to minimize supports".to_string(),
                ],
            },
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_file(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
