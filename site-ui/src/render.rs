//! Plain-text tables for each view.
//!
//! Every function returns the finished text so the caller decides where it
//! goes; `main` prints to stdout.

use rust_decimal::Decimal;
use site_core::calculations::common::format_amount;
use site_core::calculations::estimate::total;
use site_core::calculations::inventory::{classify, restock_allowed};
use site_core::calculations::{DashboardSummary, SortConfig, SortDirection};
use site_core::{Catalog, Estimate, InventoryRecord, MonthlySpend, Project, RestockRequest};

use crate::utils::fit;

fn amount_cell(
    value: Decimal,
    width: usize,
) -> String {
    format!("{:>width$}", format_amount(value))
}

fn rule(width: usize) -> String {
    "-".repeat(width)
}

pub fn dashboard(
    summary: &DashboardSummary,
    spending: &[MonthlySpend],
) -> String {
    let mut lines = vec![
        "Overview".to_string(),
        rule(44),
        format!("{:<28}{:>16}", "Total projects", summary.total_projects),
        format!("{:<28}{:>16}", "Active projects", summary.active_projects),
        format!("{:<28}{}", "Total project budget", amount_cell(summary.total_project_budget, 16)),
        format!("{:<28}{:>16}", "Inventory items", summary.inventory_items),
        format!("{:<28}{:>16}", "Low stock items", summary.low_stock_items),
        format!("{:<28}{}", "Inventory value", amount_cell(summary.inventory_value, 16)),
        String::new(),
        format!("{:<8}{:>12}{:>12}{:>12}", "Month", "Budget", "Actual", "Variance"),
        rule(44),
    ];
    for month in spending {
        lines.push(format!(
            "{}{}{}{}",
            fit(&month.month, 8),
            amount_cell(month.budget, 12),
            amount_cell(month.actual, 12),
            amount_cell(month.variance(), 12),
        ));
    }
    lines.push(rule(44));
    lines.push(format!(
        "{}{}{}{}",
        fit("Total", 8),
        amount_cell(summary.period_budget, 12),
        amount_cell(summary.period_actual, 12),
        amount_cell(summary.period_variance(), 12),
    ));
    lines.join("\n")
}

pub fn projects(projects: &[&Project]) -> String {
    if projects.is_empty() {
        return "No projects found.".to_string();
    }

    let mut lines = vec![
        format!(
            "{:>3}  {}  {}  {}  {:>6}  {:>8}  {:>14}",
            "ID",
            fit("Name", 32),
            fit("Client", 18),
            fit("Status", 11),
            "Done",
            "Tasks",
            "Budget"
        ),
        rule(106),
    ];
    for project in projects {
        lines.push(format!(
            "{:>3}  {}  {}  {}  {:>5}%  {:>8}  {}",
            project.id,
            fit(&project.name, 32),
            fit(&project.client, 18),
            fit(project.status.label(), 11),
            project.completion,
            format!("{}/{}", project.completed_tasks, project.tasks),
            amount_cell(project.budget, 14),
        ));
    }
    lines.join("\n")
}

pub fn catalog(catalog: &Catalog) -> String {
    let mut lines = vec![format!("{} catalog", catalog.kind.label())];
    for category in &catalog.categories {
        lines.push(String::new());
        lines.push(category.name.clone());
        for item in category.items() {
            lines.push(format!(
                "  {}  {}  {}",
                fit(&item.name, 30),
                fit(&item.unit, 8),
                amount_cell(item.rate, 10)
            ));
        }
    }
    lines.join("\n")
}

pub fn estimate(estimate: &Estimate) -> String {
    let title = if estimate.project_name.trim().is_empty() {
        "Estimate (unnamed project)".to_string()
    } else {
        format!("Estimate for {}", estimate.project_name.trim())
    };
    let mut lines = vec![title];

    if estimate.is_empty() {
        lines.push("No items added yet.".to_string());
        return lines.join("\n");
    }

    lines.push(format!(
        "{:>3}  {}  {}  {:>8}  {}  {:>10}  {:>12}",
        "#",
        fit("Category", 20),
        fit("Description", 28),
        "Qty",
        fit("Unit", 6),
        "Rate",
        "Amount"
    ));
    lines.push(rule(98));
    for line in estimate.lines() {
        lines.push(format!(
            "{:>3}  {}  {}  {:>8}  {}  {}  {}",
            line.id,
            fit(&line.category, 20),
            fit(&line.description, 28),
            line.quantity.normalize(),
            fit(&line.unit, 6),
            amount_cell(line.rate, 10),
            amount_cell(line.amount, 12),
        ));
    }
    lines.push(rule(98));
    lines.push(format!("{:>84}{}", "Total", amount_cell(total(estimate), 14)));
    lines.join("\n")
}

fn sort_marker(
    sort: Option<SortConfig>,
    column: &str,
) -> String {
    match sort {
        Some(config) if config.key.as_str() == column => match config.direction {
            SortDirection::Ascending => format!("{column} ^"),
            SortDirection::Descending => format!("{column} v"),
        },
        _ => column.to_string(),
    }
}

pub fn inventory(
    records: &[&InventoryRecord],
    sort: Option<SortConfig>,
) -> String {
    if records.is_empty() {
        return "No items match the current filters.".to_string();
    }

    let mut lines = vec![
        format!(
            "{:>3}  {}  {}  {:>10}  {:>10}  {:>10}  {}  {}  {}",
            sort_marker(sort, "id"),
            fit(&sort_marker(sort, "name"), 24),
            fit(&sort_marker(sort, "category"), 18),
            sort_marker(sort, "in-stock"),
            sort_marker(sort, "min-stock"),
            sort_marker(sort, "price"),
            fit(&sort_marker(sort, "supplier"), 24),
            fit(&sort_marker(sort, "last-restocked"), 16),
            "Status",
        ),
        rule(140),
    ];
    for record in records {
        let status = classify(record);
        let action = if restock_allowed(record) { "  [restock]" } else { "" };
        lines.push(format!(
            "{:>3}  {}  {}  {:>10}  {:>10}  {}  {}  {}  {}{}",
            record.id,
            fit(&record.name, 24),
            fit(&record.category, 18),
            record.in_stock.normalize(),
            record.min_stock.normalize(),
            amount_cell(record.price, 10),
            fit(&record.supplier, 24),
            fit(&record.last_restocked.to_string(), 16),
            status.label(),
            action,
        ));
    }
    lines.join("\n")
}

pub fn low_stock(records: &[&InventoryRecord]) -> String {
    if records.is_empty() {
        return "All items are sufficiently stocked.".to_string();
    }

    let mut lines = vec![format!("{} item(s) below minimum stock", records.len())];
    for record in records {
        lines.push(format!(
            "{:>3}  {}  {} / {} {}  {}  [restock]",
            record.id,
            fit(&record.name, 24),
            record.in_stock.normalize(),
            record.min_stock.normalize(),
            fit(&record.unit, 12),
            classify(record).label(),
        ));
    }
    lines.join("\n")
}

pub fn restock(request: &RestockRequest) -> String {
    format!(
        "Restock requested: {} (#{}) from {}, {} short of minimum ({})",
        request.item_name,
        request.item_id,
        request.supplier,
        request.shortfall.normalize(),
        request.status.label(),
    )
}
