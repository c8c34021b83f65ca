//! `folio projects` — List portfolio projects in display order.

use folio_config::AppConfig;

pub async fn run(all: bool, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let catalog = config.project_catalog();
    let projects = catalog.displayed(all);

    if json {
        println!("{}", serde_json::to_string_pretty(&projects)?);
        return Ok(());
    }

    if projects.is_empty() {
        println!("  No projects to show.");
        return Ok(());
    }

    for project in projects {
        let marker = if project.featured { "★" } else { " " };
        println!("  {marker} {:<14} {}", project.title, project.description);
        if !project.technologies.is_empty() {
            println!("    {:<14} {}", "", project.technologies.join(", "));
        }
        for url in [&project.live_url, &project.github_url].into_iter().flatten() {
            println!("    {:<14} {url}", "");
        }
    }

    Ok(())
}
