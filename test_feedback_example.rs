use printflow::config::FeedbackRules;
use printflow::feedback::{FeedbackClassifier, FeedbackType, Material, SizeAdjustment};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Testing feedback classification against a hand-written rule set...");

    // The built-in rule set plus one extra pattern rule for scale requests
    let rules_yaml = r#"
default_intent: comment
intents:
  - intent: approval
    keywords: ["perfect", "looks good", "approve", "ready"]
  - intent: refinement_request
    keywords: ["change", "adjust", "make it", "need", "should be", "add", "remove"]
    patterns: ["(?i)\\bscale\\s+(up|down)\\b"]
sizes:
  - adjustment: larger
    keywords: ["bigger", "larger", "increase size"]
  - adjustment: smaller
    keywords: ["smaller", "reduce size", "compact"]
  - adjustment: wider
    keywords: ["wider", "broader"]
  - adjustment: taller
    keywords: ["taller", "higher"]
materials:
  - material: TPU
    keywords: ["flexible", "rubbery", "tpu"]
  - material: PLA
    keywords: ["rigid", "hard", "pla"]
  - material: PETG
    keywords: ["durable", "strong", "petg"]
  - material: ABS
    keywords: ["abs"]
functional:
  - label: "Add holes or openings"
    keywords: ["hole", "opening"]
  - label: "Add grip texture"
    keywords: ["grip", "texture"]
  - label: "Add compartments"
    keywords: ["compartment", "section"]
  - label: "Smooth edges"
    keywords: ["smooth", "rounded"]
"#;

    let rules: FeedbackRules = serde_yaml::from_str(rules_yaml)?;
    let classifier = FeedbackClassifier::new(rules)?;

    println!("\n=== Approval with a trailing refinement wish ===");
    let text = "Perfect, but please add a hole for hanging";
    let analysis = classifier.analyze(text);
    println!("Text: {}", text);
    println!("Intent: {:?}", analysis.feedback_type);
    println!("Parameters: {:?}", analysis.parameters);
    if analysis.feedback_type == FeedbackType::Approval {
        println!("✅ Approval keywords take priority over refinement keywords");
    } else {
        println!("❌ Expected approval, got {:?}", analysis.feedback_type);
    }
    let params = analysis.parameters.unwrap_or_default();
    if params.functional_changes == vec!["Add holes or openings".to_string()] {
        println!("✅ Hole request still extracted as a parameter");
    } else {
        println!("❌ Unexpected functional changes: {:?}", params.functional_changes);
    }

    println!("\n=== Size and material refinement ===");
    let text = "Make it bigger and use flexible material";
    let analysis = classifier.analyze(text);
    println!("Text: {}", text);
    println!("As JSON: {}", serde_json::to_string(&analysis)?);
    let params = analysis.parameters.unwrap_or_default();
    if analysis.feedback_type == FeedbackType::RefinementRequest
        && params.size_adjustment == Some(SizeAdjustment::Larger)
        && params.material_change == Some(Material::Tpu)
    {
        println!("✅ Extracted larger + TPU from the refinement request");
    } else {
        println!("❌ Extraction mismatch: {:?}", params);
    }

    println!("\n=== Pattern rule catches what keywords miss ===");
    let text = "Scale up the base a bit";
    let intent = classifier.classify(text);
    println!("Text: {}", text);
    println!("Intent: {:?}", intent);
    if intent == FeedbackType::RefinementRequest {
        println!("✅ Regex pattern classified the scale request");
    } else {
        println!("❌ Expected refinement_request, got {:?}", intent);
    }

    println!("\n=== Plain comment falls through ===");
    let text = "The proportions feel right";
    let analysis = classifier.analyze(text);
    println!("Text: {}", text);
    println!("Intent: {:?}", analysis.feedback_type);
    if analysis.feedback_type == FeedbackType::Comment && analysis.parameters.is_none() {
        println!("✅ No keywords matched: comment with no parameters");
    } else {
        println!("❌ Expected a bare comment, got {:?}", analysis);
    }

    Ok(())
}
