use inquire::validator::Validation;
use inquire::{Confirm, Password, PasswordDisplayMode, Select, Text};

/// Uses `value` when given, otherwise prompts for it. In non-interactive mode
/// a missing value is an error naming `flag`.
pub fn text_or_prompt(
    value: Option<String>,
    label: &str,
    flag: &str,
    non_interactive: bool,
) -> anyhow::Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }
    if non_interactive {
        anyhow::bail!("{flag} is required in non-interactive mode");
    }
    let label = format!("{label}:");
    Ok(Text::new(&label)
        .with_validator(|input: &str| {
            if input.trim().is_empty() {
                Ok(Validation::Invalid("This field is required".into()))
            } else {
                Ok(Validation::Valid)
            }
        })
        .prompt()?)
}

/// Like [`text_or_prompt`], but an empty answer or a missing value in
/// non-interactive mode yields `None`.
pub fn optional_text_or_prompt(
    value: Option<String>,
    label: &str,
    default: Option<&str>,
    non_interactive: bool,
) -> anyhow::Result<Option<String>> {
    if value.is_some() || non_interactive {
        return Ok(value);
    }
    let label = format!("{label}:");
    let mut prompt = Text::new(&label);
    if let Some(default) = default {
        prompt = prompt.with_default(default);
    }
    let answer = prompt.prompt()?;
    Ok(Some(answer).filter(|a| !a.trim().is_empty()))
}

pub fn password_or_prompt(
    value: Option<String>,
    label: &str,
    flag: &str,
    non_interactive: bool,
) -> anyhow::Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }
    if non_interactive {
        anyhow::bail!("{flag} is required in non-interactive mode");
    }
    let label = format!("{label}:");
    Ok(Password::new(&label)
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?)
}

pub fn select_or_prompt<T: std::fmt::Display>(
    value: Option<String>,
    label: &str,
    options: Vec<T>,
    non_interactive: bool,
) -> anyhow::Result<Option<String>> {
    if value.is_some() || non_interactive {
        return Ok(value);
    }
    let label = format!("{label}:");
    let selected = Select::new(&label, options).with_vim_mode(true).prompt()?;
    Ok(Some(selected.to_string()))
}

pub fn confirm_action(message: &str, yes: bool, non_interactive: bool) -> anyhow::Result<bool> {
    if yes {
        Ok(true)
    } else if non_interactive {
        anyhow::bail!("--yes is required for destructive operations in non-interactive mode");
    } else {
        Ok(Confirm::new(message).with_default(false).prompt()?)
    }
}
