//! # Textkit CLI
//!
//! Usage:
//!   textkit job.json -o lines.json
//!   echo '{ ... }' | textkit --plain
//!   textkit --example > job.json
//!
//! Set `RUST_LOG=debug` to trace break decisions.

use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

use textkit::job::run_json;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--example") {
        print!("{}", example_job_json());
        return;
    }

    let input = if args.len() > 1 && !args[1].starts_with('-') {
        fs::read_to_string(&args[1]).map_err(|e| format!("Failed to read {}: {}", args[1], e))
    } else {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map(|_| buf)
            .map_err(|e| format!("Failed to read stdin: {}", e))
    };
    let input = input.unwrap_or_else(|msg| fail(&msg));

    let output_path = args
        .windows(2)
        .find(|w| w[0] == "-o")
        .map(|w| w[1].clone());
    let plain = args.iter().any(|a| a == "--plain");

    let lines = run_json(&input).unwrap_or_else(|e| fail(&e.to_string()));

    let output = if plain {
        let mut out = String::new();
        for line in &lines {
            out.push_str(line.text().trim_end());
            out.push('\n');
        }
        out
    } else {
        serde_json::to_string_pretty(&lines).unwrap_or_else(|e| fail(&e.to_string()))
    };

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &output) {
                fail(&format!("Failed to write {}: {}", path, e));
            }
            eprintln!("✓ Written {} lines to {}", lines.len(), path);
        }
        None => println!("{}", output.trim_end()),
    }
}

fn fail(msg: &str) -> ! {
    eprintln!("✗ {}", msg);
    process::exit(1);
}

fn example_job_json() -> &'static str {
    r##"{
  "text": "The quick brown fox jumps over the extraordinarily lazy dog. Prefix Hello, World",
  "runs": [
    { "start": 0, "end": 20, "attributes": { "fontFamily": "Helvetica", "fontSize": 12 } },
    { "start": 20, "end": 80, "attributes": { "fontFamily": "Helvetica", "fontSize": 12, "fontWeight": 700 } }
  ],
  "widthBudgets": [120, 90],
  "config": {
    "hyphenationEnabled": true,
    "trimTrailingGlueWidth": true,
    "hyphen": "-"
  },
  "lang": "en-US"
}
"##
}
