use std::collections::HashSet;
use std::process::ExitCode;

use colored::Colorize;
use json_to_dart::{generate, ClassModel, GenerationContext};
use serde_json::{json, Value};

/// Realistic API payloads:
/// - heterogeneous record lists (optional fields on some records only)
/// - repeated nested keys that force class-name suffixing
/// - nulls, empty lists and lists of lists
fn realistic_samples() -> Vec<(&'static str, Value)> {
    vec![
        ("store", json!({
            "id": "0ahUKEa1ZQ",
            "name": "Acme Widgets",
            "rating": 4.3,
            "open": true,
            "location": {"lat": 37.4219, "lng": -122.0840},
            "tags": ["hardware", "store"],
            "hours": [],
            "owner": null,
        })),
        ("orders", json!([
            {"id": 1, "total": 20.5, "items": [{"sku": "a1", "qty": 2}]},
            {"id": 2, "coupon": "SPRING", "items": [{"sku": "b7", "qty": 1, "gift": {"note": "hi"}}]},
            {"id": 3, "total": null, "items": []},
        ])),
        ("feed", json!({
            "item": {"id": 1, "item": {"id": 2, "item": {"id": 3}}},
            "pages": [[{"cursor": "x"}], [{"cursor": "y", "last": true}]],
            "meta": {"item": {"count": 3}},
        })),
        ("scalar", json!(42)),
    ]
}

fn presets() -> Vec<(&'static str, GenerationContext)> {
    vec![
        ("default", GenerationContext::default()),
        ("checked", GenerationContext {
            should_check_type: true,
            use_num: true,
            include_copy_with: true,
            include_from_list: true,
            ..GenerationContext::default()
        }),
        ("legacy", GenerationContext {
            null_safety: false,
            merge_array_approach: false,
            indent_width: 4,
            null_value_data_type: "Object".to_string(),
            package_import: Some("app/models".to_string()),
            ..GenerationContext::default()
        }),
    ]
}

fn check(models: &[ClassModel], again: &[ClassModel]) -> Result<(), String> {
    if models != again {
        return Err("two runs produced different output".to_string());
    }
    let mut seen = HashSet::new();
    for m in models {
        if !seen.insert(m.class_name.as_str()) {
            return Err(format!("duplicate class name {}", m.class_name));
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let mut failures = 0usize;
    for (preset, ctx) in presets() {
        for (name, sample) in realistic_samples() {
            let models = generate(&ctx, name, &sample);
            let again = generate(&ctx, name, &sample);
            match check(&models, &again) {
                Ok(()) => eprintln!("✅ {preset}/{name}: {} classes", models.len()),
                Err(error) => {
                    failures += 1;
                    eprintln!("{} {preset}/{name}: {error}", "❌".red());
                }
            }
            if std::env::var_os("SHOW_SOURCE").is_some() {
                for m in &models {
                    println!("{}", m.source_text);
                }
            }
        }
    }
    if failures > 0 {
        eprintln!("{}", format!("{failures} failures").red().bold());
        return ExitCode::FAILURE;
    }
    eprintln!("{}", "all samples passed".green().bold());
    ExitCode::SUCCESS
}
