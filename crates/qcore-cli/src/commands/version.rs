//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - dense statevector simulation and exercise grading",
        style("qcore").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qcore-ir     Gate catalog, circuit validation, algorithm presets");
    println!("  qcore-sim    Statevector simulator and measurement sampler");
    println!("  qcore-grade  Exercise catalog and grader");
    println!("  qcore-cli    Command-line interface");
    println!();
    println!(
        "Repository: {}",
        style(env!("CARGO_PKG_REPOSITORY")).underlined()
    );
    println!("License:    {}", style(env!("CARGO_PKG_LICENSE")).dim());
}
