use std::fmt;

use inquire::Select;
use serde_json::{Map, Value, json};

use super::credentials::open_session;
use super::prompts::{
    confirm_action, optional_text_or_prompt, password_or_prompt, select_or_prompt,
    text_or_prompt,
};
use super::render::{SCHEMA_IN_PROGRESS, member_line, project_details, project_line, status_badge};
use crate::types::{DEFAULT_SCHEMA, Driver, MemberRole, Project, SslMode};

const NOT_LOGGED_IN: &str = "Not logged in. Run 'plugmin auth login' first.";

pub struct CreateArgs {
    pub name: Option<String>,
    pub description: Option<String>,
    pub driver: Option<String>,
    pub db_name: Option<String>,
    pub user_name: Option<String>,
    pub password: Option<String>,
    pub host: Option<String>,
    pub port: Option<String>,
    pub schema: Option<String>,
    pub ssl_mode: Option<String>,
    pub non_interactive: bool,
    pub json: bool,
}

/// Ports are passed through as numbers when they parse, and as the raw text
/// otherwise so validation can report them.
fn port_value(port: &str) -> Value {
    port.trim()
        .parse::<i64>()
        .map_or_else(|_| Value::String(port.to_string()), Value::from)
}

/// Builds the registration form from flags and prompts. Fields left empty
/// are omitted so validation can apply defaults or report them.
fn collect_project_form(args: CreateArgs) -> anyhow::Result<Value> {
    let ni = args.non_interactive;
    let mut form = Map::new();

    let mut put = |key: &str, value: Option<String>| {
        if let Some(value) = value {
            form.insert(key.to_string(), Value::String(value));
        }
    };

    put("projectName", Some(text_or_prompt(args.name, "Project name", "--name", ni)?));
    put(
        "description",
        optional_text_or_prompt(args.description, "Description (optional)", None, ni)?,
    );
    put(
        "driver",
        select_or_prompt(args.driver, "Database driver", Driver::ALL.to_vec(), ni)?,
    );
    put("host", Some(text_or_prompt(args.host, "Host", "--host", ni)?));
    let port = optional_text_or_prompt(args.port, "Port", Some("5432"), ni)?;
    put("dbName", Some(text_or_prompt(args.db_name, "Database name", "--db-name", ni)?));
    put(
        "userName",
        Some(text_or_prompt(args.user_name, "Database user", "--user-name", ni)?),
    );
    put(
        "password",
        Some(password_or_prompt(args.password, "Database password", "--password", ni)?),
    );
    put(
        "schema",
        optional_text_or_prompt(args.schema, "Schema", Some(DEFAULT_SCHEMA), ni)?,
    );
    put(
        "sslMode",
        select_or_prompt(args.ssl_mode, "SSL mode", SslMode::ALL.to_vec(), ni)?,
    );

    if let Some(port) = port {
        form.insert("port".to_string(), port_value(&port));
    }
    Ok(Value::Object(form))
}

pub async fn run_project_list(server: Option<&str>, json: bool) -> anyhow::Result<()> {
    let session = open_session(server)?;
    let Some(list) = session.list_projects().await? else {
        if json {
            println!("null");
        } else {
            println!("{NOT_LOGGED_IN}");
        }
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&list)?);
    } else if list.records.is_empty() {
        println!("No projects found.");
    } else {
        println!();
        for project in &list.records {
            println!("  {}", project_line(project));
        }
        println!();
        println!("{} project(s)", list.total);
    }
    Ok(())
}

pub async fn run_project_create(server: Option<&str>, args: CreateArgs) -> anyhow::Result<()> {
    let json = args.json;
    let form = collect_project_form(args)?;

    let session = open_session(server)?;
    let project = session.register_project(&form).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&project)?);
        return Ok(());
    }

    println!();
    println!("Registered project '{}' ({})", project.project_name, project.id);
    println!("{SCHEMA_IN_PROGRESS}");
    println!();
    Ok(())
}

pub async fn run_project_show(server: Option<&str>, id: &str, json: bool) -> anyhow::Result<()> {
    let session = open_session(server)?;
    let details = session.get_project(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&details)?);
    } else {
        print!("{}", project_details(&details));
    }
    Ok(())
}

struct ProjectChoice(Project);

impl fmt::Display for ProjectChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) {}",
            self.0.project_name,
            self.0.id,
            status_badge(self.0.schema_gen_status)
        )
    }
}

pub async fn run_project_delete(
    server: Option<&str>,
    id: Option<String>,
    yes: bool,
    non_interactive: bool,
) -> anyhow::Result<()> {
    let session = open_session(server)?;

    let (id, label) = if let Some(id) = id {
        let label = format!("project {id}");
        (id, label)
    } else if non_interactive {
        anyhow::bail!("Project ID is required in non-interactive mode");
    } else {
        let list = session
            .list_projects()
            .await?
            .ok_or_else(|| anyhow::anyhow!(NOT_LOGGED_IN))?;
        if list.records.is_empty() {
            println!("No projects found.");
            return Ok(());
        }
        let choices = list.records.into_iter().map(ProjectChoice).collect();
        let selected = Select::new("Select project to delete:", choices)
            .with_page_size(15)
            .with_vim_mode(true)
            .with_help_message("Type to filter, Enter to select")
            .prompt()?;
        let label = format!("project '{}'", selected.0.project_name);
        (selected.0.id, label)
    };

    if !confirm_action(&format!("Delete {label}?"), yes, non_interactive)? {
        println!("Cancelled.");
        return Ok(());
    }

    session.delete_project(&id).await?;

    println!();
    println!("Deleted {label}");
    println!();
    Ok(())
}

pub async fn run_project_members(server: Option<&str>, id: &str, json: bool) -> anyhow::Result<()> {
    let session = open_session(server)?;
    let members = session.list_members(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&members)?);
    } else if members.is_empty() {
        println!("No members found.");
    } else {
        for member in &members {
            println!("  {}", member_line(member));
        }
    }
    Ok(())
}

pub async fn run_project_add_member(
    server: Option<&str>,
    id: &str,
    user_id: Option<String>,
    role: Option<String>,
    non_interactive: bool,
) -> anyhow::Result<()> {
    let user_id = text_or_prompt(user_id, "User ID", "--user-id", non_interactive)?;
    let role = select_or_prompt(role, "Role", MemberRole::ALL.to_vec(), non_interactive)?;

    let session = open_session(server)?;
    let member = session
        .add_member(&json!({ "projectId": id, "userId": user_id, "role": role }))
        .await?;

    println!();
    println!("Added {} to project {id}", member_line(&member));
    println!();
    Ok(())
}
