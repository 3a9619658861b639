pub mod config;
pub mod feedback;
pub mod printability;

pub use config::{CheckProfile, Config, FeedbackRules, PrintRule, PrintabilityRules, StatCheck};
pub use feedback::{
    FeedbackAnalysis, FeedbackClassifier, FeedbackParameters, FeedbackType, Material,
    SizeAdjustment,
};
pub use printability::{MeshStats, PrintabilityAnalyzer, PrintabilityReport};
