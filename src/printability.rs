use crate::config::{CheckProfile, StatCheck};
use serde::{Deserialize, Serialize};

/// Summary statistics for a generated mesh, as reported by the upstream
/// reconstruction or conversion step. The two check profiles consume
/// different subsets, so every field is optional; a check against an absent
/// statistic never triggers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MeshStats {
    pub vertices: Option<u64>,
    pub faces: Option<u64>,
    /// Mesh file size in bytes.
    pub file_size: Option<u64>,
    /// Enclosed volume in cm³.
    pub volume: Option<f64>,
}

impl StatCheck {
    pub fn triggered(&self, stats: &MeshStats) -> bool {
        match self {
            StatCheck::VertexCountAbove { limit } => {
                stats.vertices.map(|v| v > *limit).unwrap_or(false)
            }
            StatCheck::FaceCountAbove { limit } => {
                stats.faces.map(|f| f > *limit).unwrap_or(false)
            }
            StatCheck::FaceCountBelow { limit } => {
                stats.faces.map(|f| f < *limit).unwrap_or(false)
            }
            StatCheck::FileSizeAbove { bytes } => {
                stats.file_size.map(|s| s > *bytes).unwrap_or(false)
            }
            StatCheck::VolumeAbove { cm3 } => stats.volume.map(|v| v > *cm3).unwrap_or(false),
            StatCheck::VolumeBelow { cm3 } => stats.volume.map(|v| v < *cm3).unwrap_or(false),
        }
    }
}

/// Pass/fail verdict plus advisory text, embedded verbatim into the caller's
/// response and stored project record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintabilityReport {
    pub passed: bool,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}

pub struct PrintabilityAnalyzer {
    profile: CheckProfile,
}

impl PrintabilityAnalyzer {
    pub fn new(profile: CheckProfile) -> Self {
        PrintabilityAnalyzer { profile }
    }

    /// Evaluate every rule in the profile against the stats. Rules do not
    /// short-circuit; triggered issues and recommendations accumulate in
    /// declaration order. When nothing triggers, the profile's clean-model
    /// recommendations replace the per-rule ones.
    pub fn analyze(&self, stats: &MeshStats) -> PrintabilityReport {
        let mut issues = Vec::new();
        let mut recommendations = Vec::new();

        for rule in &self.profile.rules {
            if rule.check.triggered(stats) {
                log::debug!("Printability rule triggered: {}", rule.issue);
                issues.push(rule.issue.clone());
                recommendations.push(rule.recommendation.clone());
            }
        }

        if issues.is_empty() {
            recommendations = self.profile.clean_recommendations.clone();
        }

        // passed is derived, never set independently
        PrintabilityReport {
            passed: issues.is_empty(),
            issues,
            recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PrintabilityRules;

    fn model_analyzer() -> PrintabilityAnalyzer {
        PrintabilityAnalyzer::new(PrintabilityRules::default().model_check)
    }

    fn stl_analyzer() -> PrintabilityAnalyzer {
        PrintabilityAnalyzer::new(PrintabilityRules::default().stl_check)
    }

    #[test]
    fn test_model_check_clean_mesh_gets_default_recommendations() {
        let report = model_analyzer().analyze(&MeshStats {
            vertices: Some(50_000),
            file_size: Some(1_000_000),
            ..MeshStats::default()
        });
        assert!(report.passed);
        assert!(report.issues.is_empty());
        assert_eq!(
            report.recommendations,
            vec![
                "Model appears print-ready".to_string(),
                "Recommended layer height: 0.2mm".to_string(),
                "Supports may be needed for overhangs".to_string(),
            ]
        );
    }

    #[test]
    fn test_model_check_flags_high_vertex_count() {
        let report = model_analyzer().analyze(&MeshStats {
            vertices: Some(150_000),
            file_size: Some(1_000_000),
            ..MeshStats::default()
        });
        assert!(!report.passed);
        assert_eq!(
            report.issues,
            vec!["High vertex count may slow printing".to_string()]
        );
        assert_eq!(
            report.recommendations,
            vec!["Consider reducing model complexity".to_string()]
        );
    }

    #[test]
    fn test_model_check_accumulates_issues_in_rule_order() {
        let report = model_analyzer().analyze(&MeshStats {
            vertices: Some(150_000),
            file_size: Some(20 * 1024 * 1024),
            ..MeshStats::default()
        });
        assert!(!report.passed);
        assert_eq!(
            report.issues,
            vec![
                "High vertex count may slow printing".to_string(),
                "Large file size may indicate excessive detail".to_string(),
            ]
        );
        assert_eq!(
            report.recommendations,
            vec![
                "Consider reducing model complexity".to_string(),
                "Optimize mesh for 3D printing".to_string(),
            ]
        );
    }

    #[test]
    fn test_model_check_thresholds_are_strict() {
        // Exactly at the limit does not trigger
        let report = model_analyzer().analyze(&MeshStats {
            vertices: Some(100_000),
            file_size: Some(10 * 1024 * 1024),
            ..MeshStats::default()
        });
        assert!(report.passed);
    }

    #[test]
    fn test_stl_check_small_volume_is_the_only_issue() {
        let report = stl_analyzer().analyze(&MeshStats {
            vertices: Some(5_000),
            faces: Some(200),
            volume: Some(0.5),
            ..MeshStats::default()
        });
        assert!(!report.passed);
        assert_eq!(
            report.issues,
            vec!["Model may be too small for reliable printing".to_string()]
        );
        assert_eq!(
            report.recommendations,
            vec!["Consider scaling up the model".to_string()]
        );
    }

    #[test]
    fn test_stl_check_clean_mesh_gets_default_recommendations() {
        let report = stl_analyzer().analyze(&MeshStats {
            vertices: Some(5_000),
            faces: Some(10_000),
            volume: Some(125.0),
            ..MeshStats::default()
        });
        assert!(report.passed);
        assert_eq!(
            report.recommendations,
            vec![
                "Model appears optimized for 3D printing".to_string(),
                "Recommended infill: 15-20%".to_string(),
                "Recommended layer height: 0.2mm".to_string(),
                "Consider orientation to minimize supports".to_string(),
            ]
        );
    }

    #[test]
    fn test_stl_check_face_count_bounds() {
        let low = stl_analyzer().analyze(&MeshStats {
            faces: Some(50),
            volume: Some(10.0),
            ..MeshStats::default()
        });
        assert_eq!(
            low.issues,
            vec!["Low face count may result in blocky appearance".to_string()]
        );

        let high = stl_analyzer().analyze(&MeshStats {
            faces: Some(60_000),
            volume: Some(10.0),
            ..MeshStats::default()
        });
        assert_eq!(
            high.issues,
            vec!["High face count may cause slicer performance issues".to_string()]
        );

        // Boundary values pass: comparisons are strict
        let boundary = stl_analyzer().analyze(&MeshStats {
            faces: Some(100),
            volume: Some(1.0),
            ..MeshStats::default()
        });
        assert!(boundary.passed);
    }

    #[test]
    fn test_stl_check_oversized_volume() {
        let report = stl_analyzer().analyze(&MeshStats {
            faces: Some(10_000),
            volume: Some(1500.0),
            ..MeshStats::default()
        });
        assert_eq!(
            report.issues,
            vec!["Model may be too large for some 3D printers".to_string()]
        );
    }

    #[test]
    fn test_absent_stats_never_trigger() {
        let report = stl_analyzer().analyze(&MeshStats::default());
        assert!(report.passed);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_zero_and_negative_values_are_accepted() {
        // No physical-plausibility validation: thresholds only
        let report = stl_analyzer().analyze(&MeshStats {
            faces: Some(0),
            volume: Some(-3.0),
            ..MeshStats::default()
        });
        assert!(!report.passed);
        assert_eq!(
            report.issues,
            vec![
                "Model may be too small for reliable printing".to_string(),
                "Low face count may result in blocky appearance".to_string(),
            ]
        );
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let stats = MeshStats {
            vertices: Some(150_000),
            file_size: Some(512),
            ..MeshStats::default()
        };
        let analyzer = model_analyzer();
        assert_eq!(analyzer.analyze(&stats), analyzer.analyze(&stats));
    }

    #[test]
    fn test_stats_parse_from_camel_case_json() {
        let stats: MeshStats =
            serde_json::from_str(r#"{"vertices": 5000, "faces": 200, "fileSize": 1000000, "volume": 0.5}"#)
                .unwrap();
        assert_eq!(stats.vertices, Some(5_000));
        assert_eq!(stats.faces, Some(200));
        assert_eq!(stats.file_size, Some(1_000_000));
        assert_eq!(stats.volume, Some(0.5));
    }
}
