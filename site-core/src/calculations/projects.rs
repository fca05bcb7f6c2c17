//! Project list search and status tabs.

use crate::{Project, ProjectStatus};

/// Case-insensitive substring search over project name and client.
/// A blank term returns every project.
pub fn search<'a>(
    projects: impl IntoIterator<Item = &'a Project>,
    term: &str,
) -> Vec<&'a Project> {
    let term = term.trim().to_lowercase();
    projects
        .into_iter()
        .filter(|project| {
            term.is_empty()
                || project.name.to_lowercase().contains(&term)
                || project.client.to_lowercase().contains(&term)
        })
        .collect()
}

pub fn by_status<'a>(
    projects: impl IntoIterator<Item = &'a Project>,
    status: ProjectStatus,
) -> Vec<&'a Project> {
    projects
        .into_iter()
        .filter(|project| project.status == status)
        .collect()
}
