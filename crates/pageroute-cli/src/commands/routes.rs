use anyhow::{Context, Result};
use colored::Colorize;
use pageroute::{source_from_config, Config, RouteCompiler, RouteTable};

use crate::output;

pub fn execute(config: Config, json: bool, strict: bool) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let table = runtime.block_on(compile(&config))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
    } else {
        println!("{}", "Route table".green().bold());
        println!();
        print!("{}", output::route_tree(table.routes()));
        println!();
        println!(
            "{} routes, {} children",
            table.len(),
            table
                .routes()
                .iter()
                .map(|route| route.children.len())
                .sum::<usize>()
        );
        if !table.diagnostics().is_empty() {
            println!();
            output::print_diagnostics(table.diagnostics());
        }
    }

    if strict && !table.diagnostics().is_empty() {
        anyhow::bail!(
            "{} warning(s) reported in strict mode",
            table.diagnostics().len()
        );
    }
    Ok(())
}

async fn compile(config: &Config) -> Result<RouteTable> {
    let source = source_from_config(&config.pages)?;
    let table = RouteCompiler::from_config(config)
        .compile(source.as_ref())
        .await?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn test_compile_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("index/tasks")).unwrap();
        fs::write(dir.path().join("Login.vue"), "").unwrap();
        fs::write(dir.path().join("NotFound.vue"), "").unwrap();
        fs::write(dir.path().join("index/IndexHome.vue"), "").unwrap();
        fs::write(dir.path().join("index/tasks/Create.vue"), "").unwrap();

        let mut config = Config::default();
        config.pages.dir = dir.path().to_path_buf();

        let runtime = tokio::runtime::Runtime::new().unwrap();
        let table = runtime.block_on(compile(&config)).unwrap();
        let paths: Vec<&str> = table.routes().iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["/login", "/", "/tasks/create", "*"]);
    }

    #[test]
    fn test_strict_fails_on_diagnostics() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Login.vue"), "").unwrap();

        let mut config = Config::default();
        config.pages.dir = dir.path().to_path_buf();

        assert!(execute(config.clone(), true, false).is_ok());
        assert!(execute(config, true, true).is_err());
    }
}
