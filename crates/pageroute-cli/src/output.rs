//! Terminal rendering for route tables and diagnostics

use std::fmt::Write;

use colored::Colorize;
use pageroute::{Diagnostic, RouteEntry, RoutePlan};

/// Renders compiled routes as an indented tree
pub fn route_tree(routes: &[RouteEntry]) -> String {
    let mut out = String::new();
    for route in routes {
        write_entry(&mut out, route, 0);
        for child in &route.children {
            write_entry(&mut out, child, 1);
        }
    }
    out
}

fn write_entry(out: &mut String, entry: &RouteEntry, depth: usize) {
    let indent = "  ".repeat(depth + 1);
    let marker = if depth == 0 { "●" } else { "└─" };
    let path = if entry.is_fallback() {
        entry.path.yellow().bold()
    } else {
        entry.path.cyan().bold()
    };

    let _ = write!(out, "{}{} {}", indent, marker, path);
    if let Some(name) = &entry.name {
        let _ = write!(out, "  {}", name);
    }
    let _ = write!(out, "  {}", format!("[{}]", entry.meta.layout).dimmed());
    if !entry.meta.middlewares.is_empty() {
        let names: Vec<&str> = entry.meta.middlewares.keys().map(String::as_str).collect();
        let _ = write!(out, " {}", format!("middlewares: {}", names.join(", ")).dimmed());
    }
    out.push('\n');
}

/// Renders a plan (no modules loaded) as page → path lines
pub fn plan_tree(plan: &RoutePlan<'_>) -> String {
    let mut out = String::new();
    for route in plan.routes() {
        let _ = writeln!(out, "  ● {}  {}", route.path.cyan().bold(), route.page.key().dimmed());
        for child in &route.children {
            let _ = writeln!(out, "    └─ {}  {}", child.path.cyan(), child.page.key().dimmed());
        }
    }
    if let Some(page) = plan.not_found() {
        let _ = writeln!(
            out,
            "  ● {}  {}",
            pageroute::WILDCARD_PATH.yellow().bold(),
            page.key().dimmed()
        );
    }
    out
}

pub fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        println!("  {} {}", "⚠".yellow(), diagnostic);
    }
}
