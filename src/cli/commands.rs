use clap::{ArgAction, Subcommand};

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Create an account and log in
    Register {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        password: Option<String>,

        /// Defaults to --password in non-interactive mode
        #[arg(long)]
        confirm_password: Option<String>,

        /// What you will use Plugmin for (student, professional, business, other)
        #[arg(long)]
        purpose: Option<String>,

        #[arg(long)]
        organization: Option<String>,

        /// Skip interactive prompts
        #[arg(long)]
        non_interactive: bool,
    },

    /// Log in to a Plugmin server
    Login {
        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        password: Option<String>,

        /// Skip interactive prompts
        #[arg(long)]
        non_interactive: bool,
    },

    /// End the session and remove saved credentials
    Logout,

    /// Show the logged-in user
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// List your projects
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Register a database and start schema generation
    Create {
        /// Project name
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Database driver (postgres, mysql)
        #[arg(long)]
        driver: Option<String>,

        #[arg(long)]
        db_name: Option<String>,

        /// Database user
        #[arg(long)]
        user_name: Option<String>,

        /// Database password
        #[arg(long)]
        password: Option<String>,

        #[arg(long)]
        host: Option<String>,

        /// Defaults to 5432
        #[arg(long)]
        port: Option<String>,

        /// Defaults to public
        #[arg(long)]
        schema: Option<String>,

        /// disable, allow, prefer, require, verify-ca or verify-full (defaults to disable)
        #[arg(long)]
        ssl_mode: Option<String>,

        /// Skip interactive prompts
        #[arg(long)]
        non_interactive: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a project and its generated tables
    Show {
        /// Project ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a project
    Delete {
        /// Project ID (prompted for when omitted)
        id: Option<String>,

        /// Skip confirmation prompt
        #[arg(long, short)]
        yes: bool,

        /// Skip interactive prompts
        #[arg(long)]
        non_interactive: bool,
    },

    /// List the members of a project
    Members {
        /// Project ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Give another user access to a project
    AddMember {
        /// Project ID
        id: String,

        #[arg(long)]
        user_id: Option<String>,

        /// admin, editor or viewer
        #[arg(long)]
        role: Option<String>,

        /// Skip interactive prompts
        #[arg(long)]
        non_interactive: bool,
    },
}

#[derive(Subcommand)]
pub enum PreferencesCommands {
    /// Set account preferences
    Set {
        /// Work with a single project instead of a project list
        #[arg(long, action = ArgAction::Set)]
        single_project: bool,

        /// Record the preference for the first time (onboarding)
        #[arg(long)]
        initial: bool,
    },
}
