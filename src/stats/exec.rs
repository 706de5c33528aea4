use super::{build_grid, load_authors, CommitAggregator, Renderer, Window};
use crate::config::Config;
use crate::model::RepoPath;
use crate::registry::Registry;
use anyhow::Context;
use console::style;
use std::io::{self, Write};
use std::path::Path;

pub fn exec(config: &Config, emails: &Path) -> anyhow::Result<()> {
    let authors = load_authors(emails).context("Failed to load author emails")?;
    let registry = Registry::new(&config.registry_path);
    let repos: Vec<RepoPath> = registry
        .load()
        .context("Failed to read repository registry")?
        .into_iter()
        .map(RepoPath::from)
        .collect();
    tracing::debug!(repos = repos.len(), authors = authors.len(), "computing stats");

    let window = Window::local(config.window_days);
    let aggregation = CommitAggregator::new(&window, &authors)
        .with_policy(config.on_repo_error)
        .with_progress(true)
        .aggregate(&repos)
        .context("Failed to collect commits from repositories")?;

    let counts = &aggregation.counts;
    let grid = build_grid(&counts.offsets(), counts);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let colors = config.color.enabled();
    Renderer::new(&window, colors)
        .render(&grid, &mut out)
        .context("Failed to write contribution grid")?;

    let mut summary = format!(
        "\n{} commits in the last {} days across {} repositories",
        style(counts.total()).cyan().force_styling(colors),
        config.window_days,
        style(aggregation.repos_processed).cyan().force_styling(colors)
    );
    if aggregation.repos_skipped > 0 {
        summary.push_str(&format!(
            " ({} skipped)",
            style(aggregation.repos_skipped).yellow().force_styling(colors)
        ));
    }
    writeln!(out, "{summary}")?;
    Ok(())
}
