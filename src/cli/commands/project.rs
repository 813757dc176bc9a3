use tabled::Tabled;

use crate::cli::commands::{CommandContext, ListParams, fetch_collection, render};
use crate::cli::error::CliResult;
use crate::cli::utils::{format_date, or_dash, truncate_with_ellipsis};
use crate::collections::{Project, Projects};

#[derive(Tabled)]
struct ProjectDisplay {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Number")]
    number: String,
    #[tabled(rename = "Industry")]
    industry: String,
    #[tabled(rename = "Registered")]
    registered: String,
}

impl From<&Project> for ProjectDisplay {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            name: truncate_with_ellipsis(&or_dash(project.display_name.as_deref()), 40),
            number: or_dash(project.project_number.as_deref()),
            industry: or_dash(project.industry.as_deref()),
            registered: format_date(project.registration_date_time.as_deref()),
        }
    }
}

/// List projects; `--search` filters locally
pub async fn list_projects(
    ctx: &CommandContext,
    params: ListParams<'_>,
    format: &str,
) -> CliResult<String> {
    let projects = fetch_collection::<Projects>(ctx, None, "", &params).await?;
    render::<Project, ProjectDisplay>(&projects, format, "No projects found.")
}
