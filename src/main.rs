use clap::{Arg, Command};
use log::LevelFilter;
use printflow::config::{CheckProfile, Config};
use printflow::config_test::validate_config_comprehensive;
use printflow::feedback::{FeedbackClassifier, FeedbackType};
use printflow::printability::{MeshStats, PrintabilityAnalyzer, PrintabilityReport};
use std::path::Path;
use std::process;

fn main() {
    let matches = Command::new("printflow")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Feedback analysis and printability checks for a prompt-to-print design workflow")
        .long_about(
            "printflow analyzes the feedback loop of a four-stage design workflow\n\
             (prompt → concept images → 3D model → printable file):\n\
             • keyword-rule classification of free-text feedback into intents\n\
             • extraction of structured refinement parameters (size, material, features)\n\
             • rule-based printability checks over mesh statistics\n\
             All rule sets are data-driven and configurable via YAML.",
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("/etc/printflow.yaml"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Generate a default configuration file")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("test-config")
                .long("test-config")
                .help("Test configuration validity against the built-in corpus")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("test-feedback")
                .long("test-feedback")
                .value_name("TEXT")
                .help("Classify a piece of feedback text and print the analysis as JSON")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("check-model")
                .long("check-model")
                .value_name("FILE")
                .help("Run the post-generation printability check on a JSON mesh-stats file")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("check-stl")
                .long("check-stl")
                .value_name("FILE")
                .help("Run the post-conversion printability check on a JSON mesh-stats file")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("demo")
                .long("demo")
                .help("Run in demonstration mode (simulate the four-stage workflow)")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging with rule-match traces")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    // Initialize logger based on verbose flag
    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    let config_path = matches.get_one::<String>("config").unwrap();

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        generate_default_config(generate_path);
        return;
    }

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            process::exit(1);
        }
    };

    if matches.get_flag("test-config") {
        test_config(&config);
        return;
    }

    if let Some(text) = matches.get_one::<String>("test-feedback") {
        analyze_feedback(&config, text);
        return;
    }

    if let Some(stats_file) = matches.get_one::<String>("check-model") {
        check_stats_file(config.printability.model_check.clone(), "model check", stats_file);
        return;
    }

    if let Some(stats_file) = matches.get_one::<String>("check-stl") {
        check_stats_file(config.printability.stl_check.clone(), "stl check", stats_file);
        return;
    }

    if matches.get_flag("demo") {
        run_demo(&config);
        return;
    }

    println!("Nothing to do. Try --demo, --test-feedback, --check-model, --check-stl, or --help.");
}

fn load_config(path: &str) -> anyhow::Result<Config> {
    if Path::new(path).exists() {
        let config = Config::from_file(path)?;
        log::info!("Loaded configuration from {path}");
        Ok(config)
    } else {
        log::warn!("Configuration file {path} not found, using built-in rule sets");
        Ok(Config::default())
    }
}

fn generate_default_config(path: &str) {
    match Config::default().to_file(path) {
        Ok(()) => println!("Default configuration written to {path}"),
        Err(e) => {
            eprintln!("Failed to write configuration: {e}");
            process::exit(1);
        }
    }
}

fn test_config(config: &Config) {
    println!("🔍 Testing configuration...");
    println!();

    let results = validate_config_comprehensive(config);

    println!("Intent rules: {}", results.total_intent_rules);
    println!("Printability rules: {}", results.total_print_rules);
    println!("Regex patterns: {}", results.total_patterns);
    println!();

    for error in &results.pattern_errors {
        println!("❌ {error}");
    }
    for failure in &results.test_failures {
        println!("❌ {failure}");
    }
    for warning in &results.coverage_warnings {
        println!("⚠️  {warning}");
    }

    if results.valid {
        println!(
            "✅ Configuration is valid ({} ms)",
            results.total_test_time_ms
        );
    } else {
        println!("❌ Configuration test failed");
        process::exit(1);
    }
}

fn build_classifier(config: &Config) -> FeedbackClassifier {
    match FeedbackClassifier::new(config.feedback.clone()) {
        Ok(classifier) => classifier,
        Err(e) => {
            eprintln!("Error building feedback classifier: {e}");
            process::exit(1);
        }
    }
}

fn analyze_feedback(config: &Config, text: &str) {
    let classifier = build_classifier(config);
    let analysis = classifier.analyze(text);

    match analysis.feedback_type {
        FeedbackType::Approval => println!("✅ Feedback reads as approval"),
        FeedbackType::RefinementRequest => println!("🔧 Feedback reads as a refinement request"),
        FeedbackType::Comment => println!("💬 Feedback reads as a general comment"),
    }
    println!();

    match serde_json::to_string_pretty(&analysis) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Failed to serialize analysis: {e}");
            process::exit(1);
        }
    }
}

fn check_stats_file(profile: CheckProfile, label: &str, path: &str) {
    let stats = match load_stats(path) {
        Ok(stats) => stats,
        Err(e) => {
            eprintln!("Error reading mesh stats from {path}: {e}");
            process::exit(1);
        }
    };

    let report = PrintabilityAnalyzer::new(profile).analyze(&stats);
    print_report(label, &report);
}

fn load_stats(path: &str) -> anyhow::Result<MeshStats> {
    let content = std::fs::read_to_string(path)?;
    let stats = serde_json::from_str(&content)?;
    Ok(stats)
}

fn print_report(label: &str, report: &PrintabilityReport) {
    if report.passed {
        println!("✅ {label}: passed");
    } else {
        println!("⚠️  {label}: {} issue(s) found", report.issues.len());
        for issue in &report.issues {
            println!("   - {issue}");
        }
    }
    println!("Recommendations:");
    for recommendation in &report.recommendations {
        println!("   - {recommendation}");
    }
    println!();

    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Failed to serialize report: {e}"),
    }
}

fn run_demo(config: &Config) {
    println!("🎭 Demonstration mode: simulating the prompt-to-print workflow");
    println!();

    println!("=== Stage 1: Prompt ===");
    println!("Prompt: \"A desk stand for a phone with a cable slot\"");
    println!();

    println!("=== Stage 2: Concept images ===");
    for angle in ["front", "side", "top", "perspective"] {
        println!("Generated concept image ({angle} view) [placeholder]");
    }
    println!();

    println!("=== User feedback on concepts ===");
    let classifier = build_classifier(config);
    for text in [
        "Looks good, go ahead",
        "Make it bigger and use flexible material",
        "Neat, my desk could use this",
    ] {
        let analysis = classifier.analyze(text);
        println!("\"{text}\" -> {:?}", analysis.feedback_type);
        if let Some(parameters) = &analysis.parameters {
            println!("   extracted parameters: {parameters:?}");
        }
    }
    println!();

    println!("=== Stage 3: 3D model generation (simulated) ===");
    let model_stats = MeshStats {
        vertices: Some(15_000),
        file_size: Some(2_400_000),
        ..MeshStats::default()
    };
    let report = PrintabilityAnalyzer::new(config.printability.model_check.clone()).analyze(&model_stats);
    print_report("model check", &report);

    println!("=== Stage 4: STL conversion (simulated) ===");
    let stl_stats = MeshStats {
        vertices: Some(15_000),
        faces: Some(28_000),
        volume: Some(125.0),
        ..MeshStats::default()
    };
    let report = PrintabilityAnalyzer::new(config.printability.stl_check.clone()).analyze(&stl_stats);
    print_report("stl check", &report);
}
