use serde_json::json;

use super::credentials::{delete_credentials, load_credentials, open_session, remember_session};
use super::prompts::{password_or_prompt, select_or_prompt, text_or_prompt};
use super::render::user_summary;

const PURPOSES: [&str; 4] = ["student", "professional", "business", "other"];

pub struct RegisterArgs {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
    pub purpose: Option<String>,
    pub organization: Option<String>,
    pub non_interactive: bool,
}

pub async fn run_auth_register(server: Option<&str>, args: RegisterArgs) -> anyhow::Result<()> {
    let non_interactive = args.non_interactive;
    let name = text_or_prompt(args.name, "Name", "--name", non_interactive)?;
    let email = text_or_prompt(args.email, "Email", "--email", non_interactive)?;
    let password = password_or_prompt(args.password, "Password", "--password", non_interactive)?;
    let confirm_password = match args.confirm_password {
        Some(confirm) => confirm,
        None if non_interactive => password.clone(),
        None => password_or_prompt(None, "Confirm password", "--confirm-password", false)?,
    };
    let purpose = select_or_prompt(args.purpose, "Purpose", PURPOSES.to_vec(), non_interactive)?
        .ok_or_else(|| anyhow::anyhow!("--purpose is required in non-interactive mode"))?;
    let organization = text_or_prompt(
        args.organization,
        "Organization",
        "--organization",
        non_interactive,
    )?;

    let session = open_session(server)?;
    let user = session
        .register_user(&json!({
            "name": name,
            "email": email,
            "password": password,
            "confirm_password": confirm_password,
            "purpose": purpose,
            "organization": organization,
        }))
        .await?;
    remember_session(&session)?;

    println!();
    println!("Registered and logged in as {}", user_summary(&user));
    println!();

    Ok(())
}

pub async fn run_auth_login(
    server: Option<&str>,
    email: Option<String>,
    password: Option<String>,
    non_interactive: bool,
) -> anyhow::Result<()> {
    let email = text_or_prompt(email, "Email", "--email", non_interactive)?;
    let password = password_or_prompt(password, "Password", "--password", non_interactive)?;

    let session = open_session(server)?;
    let user = session
        .login(&json!({ "email": email, "password": password }))
        .await?;
    remember_session(&session)?;

    println!();
    println!(
        "Logged in to {} as {}",
        session.client().base_url(),
        user_summary(&user)
    );
    println!();

    Ok(())
}

pub async fn run_auth_logout(server: Option<&str>) -> anyhow::Result<()> {
    if load_credentials()?.is_none() {
        println!();
        println!("No credentials found.");
        println!();
        return Ok(());
    }

    let session = open_session(server)?;
    if let Err(e) = session.logout().await {
        tracing::warn!("Server logout failed, removing local credentials anyway: {e}");
    }
    delete_credentials()?;

    println!();
    println!("Logged out successfully.");
    println!();

    Ok(())
}

pub async fn run_auth_whoami(server: Option<&str>, json: bool) -> anyhow::Result<()> {
    let session = open_session(server)?;
    let user = session.current_user().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&user)?);
        return Ok(());
    }

    match user {
        Some(user) => println!("{}", user_summary(&user)),
        None => println!("Not logged in."),
    }
    Ok(())
}
