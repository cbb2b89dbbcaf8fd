use anyhow::{Context, Result};
use colored::Colorize;
use pageroute::{source_from_config, Config, PageDescriptor, RouteCompiler};

use crate::output;

/// Validates the route tree without loading any page module
pub fn execute(config: Config, strict: bool) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let pages = runtime.block_on(discover(&config))?;

    let compiler = RouteCompiler::from_config(&config);
    let plan = compiler.plan(&pages)?;

    println!("{}", "Checking routes...".green().bold());
    println!();
    print!("{}", output::plan_tree(&plan));
    println!();

    if plan.diagnostics().is_empty() {
        println!("  {} {} pages, no conflicts", "✓".green(), plan.page_count());
        return Ok(());
    }

    output::print_diagnostics(plan.diagnostics());
    if strict {
        anyhow::bail!(
            "{} warning(s) reported in strict mode",
            plan.diagnostics().len()
        );
    }
    Ok(())
}

async fn discover(config: &Config) -> Result<Vec<PageDescriptor>> {
    let source = source_from_config(&config.pages)?;
    source
        .discover()
        .await
        .with_context(|| format!("Failed to discover pages from {} source", source.name()))
}
