//! Project list and monthly spending tables.
//!
//! Projects: `id,name,client,start_date,end_date,status,completion,tasks,completed_tasks,budget`
//! where `status` is one of `Planning`, `In Progress`, `On Hold`, `Completed`.
//!
//! Spending: `month,budget,actual`.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use site_core::{MonthlySpend, Project, ProjectStatus};
use tracing::debug;

use crate::error::{LoaderError, open};
use crate::read_rows;

#[derive(Debug, Deserialize)]
struct ProjectRow {
    id: i64,
    name: String,
    client: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: String,
    completion: u8,
    tasks: u32,
    completed_tasks: u32,
    budget: Decimal,
}

fn convert_project(
    row: ProjectRow,
    row_number: usize,
) -> Result<Project, LoaderError> {
    let status = ProjectStatus::parse(&row.status).ok_or_else(|| {
        LoaderError::invalid_row(row_number, format!("unrecognised status '{}'", row.status))
    })?;
    if row.completion > 100 {
        return Err(LoaderError::invalid_row(
            row_number,
            format!("completion {} is above 100", row.completion),
        ));
    }
    if row.completed_tasks > row.tasks {
        return Err(LoaderError::invalid_row(
            row_number,
            "completed_tasks exceeds tasks",
        ));
    }
    if row.end_date < row.start_date {
        return Err(LoaderError::invalid_row(row_number, "end_date is before start_date"));
    }

    Ok(Project {
        id: row.id,
        name: row.name,
        client: row.client,
        start_date: row.start_date,
        end_date: row.end_date,
        status,
        completion: row.completion,
        tasks: row.tasks,
        completed_tasks: row.completed_tasks,
        budget: row.budget,
    })
}

pub struct ProjectLoader;

impl ProjectLoader {
    pub fn parse<R: Read>(reader: R) -> Result<Vec<Project>, LoaderError> {
        let projects = read_rows::<ProjectRow, _>(reader)?
            .into_iter()
            .map(|(row_number, row)| convert_project(row, row_number))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(projects = projects.len(), "projects loaded");
        Ok(projects)
    }

    pub fn load_file(path: &Path) -> Result<Vec<Project>, LoaderError> {
        Self::parse(open(path)?)
    }
}

pub struct SpendingLoader;

impl SpendingLoader {
    pub fn parse<R: Read>(reader: R) -> Result<Vec<MonthlySpend>, LoaderError> {
        Ok(read_rows::<MonthlySpend, _>(reader)?
            .into_iter()
            .map(|(_, spend)| spend)
            .collect())
    }

    pub fn load_file(path: &Path) -> Result<Vec<MonthlySpend>, LoaderError> {
        Self::parse(open(path)?)
    }
}
