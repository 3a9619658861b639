use printflow::config::Config;
use printflow::printability::{MeshStats, PrintabilityAnalyzer};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Testing the built-in printability profiles...");

    let config = Config::default();
    let model_check = PrintabilityAnalyzer::new(config.printability.model_check.clone());
    let stl_check = PrintabilityAnalyzer::new(config.printability.stl_check.clone());

    println!("\n=== Post-generation check: clean model ===");
    let stats = MeshStats {
        vertices: Some(50_000),
        file_size: Some(1_000_000),
        ..MeshStats::default()
    };
    let report = model_check.analyze(&stats);
    println!("Stats: {:?}", stats);
    println!("Report: {}", serde_json::to_string(&report)?);
    if report.passed && report.recommendations.len() == 3 {
        println!("✅ Clean model passes with the three default recommendations");
    } else {
        println!("❌ Unexpected verdict: {:?}", report);
    }

    println!("\n=== Post-generation check: heavy model ===");
    let stats = MeshStats {
        vertices: Some(150_000),
        file_size: Some(20 * 1024 * 1024),
        ..MeshStats::default()
    };
    let report = model_check.analyze(&stats);
    println!("Report: {}", serde_json::to_string(&report)?);
    if !report.passed && report.issues.len() == 2 {
        println!("✅ Both vertex-count and file-size rules triggered");
    } else {
        println!("❌ Expected two issues, got {:?}", report.issues);
    }

    println!("\n=== Post-conversion check: tiny model ===");
    let stats = MeshStats {
        vertices: Some(5_000),
        faces: Some(200),
        volume: Some(0.5),
        ..MeshStats::default()
    };
    let report = stl_check.analyze(&stats);
    println!("Report: {}", serde_json::to_string(&report)?);
    if !report.passed
        && report.issues == vec!["Model may be too small for reliable printing".to_string()]
    {
        println!("✅ Only the small-volume rule triggered (200 faces is fine)");
    } else {
        println!("❌ Expected exactly the small-volume issue, got {:?}", report.issues);
    }

    println!("\n=== Post-conversion check: clean STL ===");
    let stats = MeshStats {
        vertices: Some(15_000),
        faces: Some(28_000),
        volume: Some(125.0),
        ..MeshStats::default()
    };
    let report = stl_check.analyze(&stats);
    println!("Report: {}", serde_json::to_string(&report)?);
    if report.passed && report.recommendations.len() == 4 {
        println!("✅ Clean STL passes with the four default recommendations");
    } else {
        println!("❌ Unexpected verdict: {:?}", report);
    }

    Ok(())
}
