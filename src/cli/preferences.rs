use super::credentials::open_session;
use crate::types::UserPreferences;

/// Records the single-project preference. Onboarding sets it for the first
/// time; afterwards it is updated in place.
pub async fn run_preferences_set(
    server: Option<&str>,
    single_project: bool,
    initial: bool,
) -> anyhow::Result<()> {
    let session = open_session(server)?;
    let preferences = UserPreferences {
        prefers_single_project: single_project,
    };

    if initial {
        session.set_preferences(preferences).await?;
    } else {
        session.update_preferences(preferences).await?;
    }

    let mode = if single_project {
        "a single project"
    } else {
        "a project list"
    };
    println!();
    println!("Preferences saved: working with {mode}.");
    println!();
    Ok(())
}
