use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use plugmin::cli::{
    AuthCommands, CreateArgs, PreferencesCommands, ProjectCommands, RegisterArgs,
    run_auth_login, run_auth_logout, run_auth_register, run_auth_whoami, run_preferences_set,
    run_project_add_member, run_project_create, run_project_delete, run_project_list,
    run_project_members, run_project_show,
};
use plugmin::config::ServerConfig;
use plugmin::server::{AppState, create_router};

#[derive(Parser)]
#[command(name = "plugmin")]
#[command(
    about = "Register a database and manage its generated admin dashboard",
    long_about = None
)]
struct Cli {
    /// Plugmin server URL (overrides PLUGMIN_SERVER and saved credentials)
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Account and session commands
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },

    /// Project commands
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },

    /// Account preferences
    Preferences {
        #[command(subcommand)]
        command: PreferencesCommands,
    },

    /// Run the in-memory development backend
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(long, short, default_value = "5000")]
        port: u16,
    },
}

async fn run_auth(server: Option<&str>, command: AuthCommands) -> anyhow::Result<()> {
    match command {
        AuthCommands::Register {
            name,
            email,
            password,
            confirm_password,
            purpose,
            organization,
            non_interactive,
        } => {
            let args = RegisterArgs {
                name,
                email,
                password,
                confirm_password,
                purpose,
                organization,
                non_interactive,
            };
            run_auth_register(server, args).await
        }
        AuthCommands::Login {
            email,
            password,
            non_interactive,
        } => run_auth_login(server, email, password, non_interactive).await,
        AuthCommands::Logout => run_auth_logout(server).await,
        AuthCommands::Whoami { json } => run_auth_whoami(server, json).await,
    }
}

async fn run_project(server: Option<&str>, command: ProjectCommands) -> anyhow::Result<()> {
    match command {
        ProjectCommands::List { json } => run_project_list(server, json).await,
        ProjectCommands::Create {
            name,
            description,
            driver,
            db_name,
            user_name,
            password,
            host,
            port,
            schema,
            ssl_mode,
            non_interactive,
            json,
        } => {
            let args = CreateArgs {
                name,
                description,
                driver,
                db_name,
                user_name,
                password,
                host,
                port,
                schema,
                ssl_mode,
                non_interactive,
                json,
            };
            run_project_create(server, args).await
        }
        ProjectCommands::Show { id, json } => run_project_show(server, &id, json).await,
        ProjectCommands::Delete {
            id,
            yes,
            non_interactive,
        } => run_project_delete(server, id, yes, non_interactive).await,
        ProjectCommands::Members { id, json } => run_project_members(server, &id, json).await,
        ProjectCommands::AddMember {
            id,
            user_id,
            role,
            non_interactive,
        } => run_project_add_member(server, &id, user_id, role, non_interactive).await,
    }
}

async fn serve(host: String, port: u16) -> anyhow::Result<()> {
    let config = ServerConfig { host, port };
    let state = Arc::new(AppState::in_memory());

    let app = create_router(state);
    let addr = config.socket_addr()?;

    info!("Starting development backend on {}", config.local_url());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("plugmin=info".parse()?))
        .init();

    let cli = Cli::parse();
    let server = cli.server.as_deref();

    match cli.command {
        Commands::Auth { command } => run_auth(server, command).await?,
        Commands::Project { command } => run_project(server, command).await?,
        Commands::Preferences { command } => match command {
            PreferencesCommands::Set {
                single_project,
                initial,
            } => run_preferences_set(server, single_project, initial).await?,
        },
        Commands::Serve { host, port } => serve(host, port).await?,
    }

    Ok(())
}
