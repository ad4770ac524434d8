use crate::scenario::Scenario;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use unispace_checker::CheckReport;
use unispace_kernel::Uniformity;

/// Load a scenario, run the checks of one family (or all of them), and
/// print the reports. Exit 2 on unreadable input, 1 on a structurally
/// invalid scenario or any refuted check.
pub fn run(scenario: String, family: Option<&str>, json_output: bool) {
    let scenario_path = PathBuf::from(scenario);
    let bytes = fs::read(&scenario_path).unwrap_or_else(|err| {
        eprintln!(
            "error: failed to read scenario file {}: {err}",
            scenario_path.display()
        );
        std::process::exit(2);
    });
    let parsed: Scenario = serde_json::from_slice(&bytes).unwrap_or_else(|err| {
        eprintln!(
            "error: failed to parse scenario json {}: {err}",
            scenario_path.display()
        );
        std::process::exit(2);
    });

    let built = parsed.build().unwrap_or_else(|err| {
        eprintln!("error: {err}");
        std::process::exit(1);
    });
    let reports = built.execute(family).unwrap_or_else(|err| {
        eprintln!("error: {err}");
        std::process::exit(1);
    });

    let all_satisfied = reports.iter().all(CheckReport::is_satisfied);

    if json_output {
        let rendered = serde_json::to_string_pretty(&reports).unwrap_or_else(|err| {
            eprintln!("error: failed to render reports: {err}");
            std::process::exit(2);
        });
        println!("{rendered}");
    } else {
        print_reports(&scenario_path.display().to_string(), &built, family, &reports);
    }

    if !all_satisfied {
        std::process::exit(1);
    }
}

fn print_reports(
    path: &str,
    built: &crate::scenario::BuiltScenario,
    family: Option<&str>,
    reports: &[CheckReport],
) {
    println!("unispace {}", family.unwrap_or("run"));
    println!("  Scenario: {path}");
    println!(
        "  Space: {} ({} points, {} entourages)",
        built.space.name(),
        built.space.points().len(),
        built.space.entourages().len()
    );
    println!("  Checks: {}", reports.len());
    for report in reports {
        if report.is_satisfied() {
            println!("  [satisfied] {}", report.check);
        } else {
            println!("  [refuted]   {}", report.check);
            for failure in &report.failures {
                println!(
                    "    - {} ({}): {}",
                    failure.class, failure.axiom, failure.message
                );
                if let Some(Value::Object(context)) = &failure.context {
                    for (key, value) in context {
                        println!("      {key}: {value}");
                    }
                }
            }
        }
    }
}
