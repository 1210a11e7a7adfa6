use std::fmt::Write as _;

use crate::types::{Project, ProjectDetails, ProjectMember, SchemaGenStatus, TableSchema, User};

pub const SCHEMA_IN_PROGRESS: &str = "Schema generation is in progress...";

pub fn status_badge(status: SchemaGenStatus) -> String {
    format!("[{status}]")
}

pub fn project_line(project: &Project) -> String {
    format!(
        "{}  {}  {} {}/{}  {}",
        project.id,
        project.project_name,
        project.driver,
        project.address(),
        project.db_name,
        status_badge(project.schema_gen_status)
    )
}

fn table_line(table: &TableSchema) -> String {
    let view = table.ui_config.view_type;
    if table.relationships.is_empty() {
        format!("{}  ({view})", table.table_name)
    } else {
        format!(
            "{}  ({view}, {} relationships)",
            table.table_name,
            table.relationships.len()
        )
    }
}

/// Detail view of a project. While schema generation is pending only a
/// progress notice is shown; otherwise the status and generated tables.
pub fn project_details(details: &ProjectDetails) -> String {
    let project = &details.project;
    let mut out = String::new();

    let _ = writeln!(out, "{}", project.project_name);
    if let Some(description) = &project.description {
        let _ = writeln!(out, "{description}");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "  ID:        {}", project.id);
    let _ = writeln!(
        out,
        "  Database:  {} {}/{}",
        project.driver,
        project.address(),
        project.db_name
    );
    let _ = writeln!(out, "  User:      {}", project.user_name);
    let _ = writeln!(out, "  SSL mode:  {}", project.ssl_mode);
    let _ = writeln!(out);

    if project.schema_gen_status == SchemaGenStatus::Pending {
        let _ = writeln!(out, "{SCHEMA_IN_PROGRESS}");
        return out;
    }

    let _ = writeln!(out, "Schema {}", status_badge(project.schema_gen_status));
    if details.tables.is_empty() {
        let _ = writeln!(out, "No tables found.");
    } else {
        let _ = writeln!(out, "Tables:");
        for table in &details.tables {
            let _ = writeln!(out, "  {}", table_line(table));
        }
    }
    out
}

pub fn user_summary(user: &User) -> String {
    let mut out = format!("{} <{}>", user.name, user.email);
    if !user.organization.is_empty() {
        let _ = write!(out, "  {}", user.organization);
    }
    out
}

pub fn member_line(member: &ProjectMember) -> String {
    format!("{}  {}", member.user_id, member.role)
}
