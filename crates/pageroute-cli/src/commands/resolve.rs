use anyhow::Result;
use colored::Colorize;
use pageroute::route::{resolve_child, to_route_path};
use pageroute::{resolve_path, Config, WILDCARD_PATH};

/// Prints the route each page path would produce
pub fn execute(config: &Config, pages: &[String]) -> Result<()> {
    for page in pages {
        println!("  {} {} {}", page, "→".dimmed(), describe(config, page)?.cyan());
    }
    Ok(())
}

fn describe(config: &Config, page: &str) -> Result<String> {
    let conventions = &config.conventions;
    let trimmed = page
        .strip_suffix(&format!(".{}", config.pages.extension))
        .unwrap_or(page);
    let segments: Vec<String> = trimmed
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect();

    if segments.is_empty() {
        anyhow::bail!("Page path '{}' has no segments", page);
    }
    if conventions.is_not_found(&segments) {
        return Ok(WILDCARD_PATH.to_string());
    }
    // A lone page has no discovery position
    if let Some(child) = resolve_child(0, &segments, conventions) {
        return Ok(format!(
            "{} (child of {})",
            to_route_path(&child.child_route),
            to_route_path(&child.parent_key)
        ));
    }

    Ok(to_route_path(&resolve_path(&segments, conventions)))
}
