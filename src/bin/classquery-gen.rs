use classquery::{process_html, ClassQueryError, ProcessedPage};
use std::env;
use std::fs;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: classquery-gen <page.html> [more.html ...]");
        eprintln!();
        eprintln!("Runs the classquery pass over each page and prints the");
        eprintln!("generated stylesheet. Skipped-clause diagnostics go to stderr.");
        process::exit(1);
    }

    let mut exit_code = 0;

    for file_path in &args[1..] {
        match generate(file_path) {
            Ok(page) => {
                let report = &page.report;
                println!(
                    "✓ {}: {} element(s) processed, {} skipped",
                    file_path, report.elements_processed, report.elements_skipped
                );
                for diagnostic in &report.diagnostics {
                    eprintln!("  warning: {}", diagnostic);
                }
                match &report.stylesheet {
                    Some(css) => print!("{}", css),
                    None => println!("  (no marked elements, nothing generated)"),
                }
            }
            Err(e) => {
                eprintln!("✗ {} failed:", file_path);
                print_error(&e);
                exit_code = 1;
            }
        }
    }

    process::exit(exit_code);
}

fn generate(path: &str) -> Result<ProcessedPage, ClassQueryError> {
    let markup = fs::read_to_string(path)
        .map_err(|e| ClassQueryError::MarkupError(format!("Failed to read file: {}", e)))?;
    process_html(&markup)
}

fn print_error(error: &ClassQueryError) {
    match error {
        ClassQueryError::MarkupError(msg) => {
            eprintln!("  Markup error:");
            eprintln!("    {}", msg);
        }
        ClassQueryError::EmptyDocument => {
            eprintln!("  Empty document: no elements found");
        }
        ClassQueryError::MultipleRootElements => {
            eprintln!("  Multiple root elements found");
            eprintln!("    A page must have exactly one root element");
        }
        ClassQueryError::ConfigError(msg) => {
            eprintln!("  Configuration error:");
            eprintln!("    {}", msg);
        }
    }
}
