//! Profile command implementation.

use crate::cli::{ProfileAction, ProfileArgs};
use crate::config::{Config, Profile};
use crate::error::{CliError, Result};
use crate::output::Formatter;

/// Execute the profile command.
pub fn execute_profile(
    args: ProfileArgs,
    config: &mut Config,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ProfileAction::List => list_profiles(config, formatter),
        ProfileAction::Show => show_active_profile(config, formatter),
        ProfileAction::Switch { name } => switch_profile(config, name, formatter),
        ProfileAction::Set {
            name,
            url,
            language,
            user_agent,
            timeout,
        } => {
            let profile = Profile {
                api_url: url,
                search_language: language,
                user_agent,
                timeout_secs: timeout,
            };
            set_profile(config, name, profile, formatter)
        }
        ProfileAction::Delete { name } => delete_profile(config, name, formatter),
    }
}

/// List all profiles.
fn list_profiles(config: &Config, formatter: &Formatter) -> Result<()> {
    if config.profiles.is_empty() {
        println!("{}", formatter.info("No profiles configured"));
        return Ok(());
    }

    println!("Available profiles:");
    for (name, profile) in &config.profiles {
        if name == &config.active_profile {
            println!("* {}", formatter.success(name));
        } else {
            println!("  {}", name);
        }
        print_profile(profile, "    ");
    }

    Ok(())
}

/// Show the active profile.
fn show_active_profile(config: &Config, formatter: &Formatter) -> Result<()> {
    let profile = config.get_active_profile()?;
    println!("Active profile: {}", formatter.success(&config.active_profile));
    print_profile(profile, "  ");
    Ok(())
}

fn print_profile(profile: &Profile, indent: &str) {
    println!("{}URL: {}", indent, profile.api_url);
    println!("{}Search language: {}", indent, profile.search_language);
    if let Some(user_agent) = &profile.user_agent {
        println!("{}User-Agent: {}", indent, user_agent);
    }
    if let Some(timeout) = profile.timeout_secs {
        println!("{}Timeout: {}s", indent, timeout);
    }
}

/// Switch to a different profile.
fn switch_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    config.switch_profile(name.clone())?;
    config.save()?;
    println!("{}", formatter.success(&format!("Switched to profile '{}'", name)));
    Ok(())
}

/// Create or update a profile.
fn set_profile(
    config: &mut Config,
    name: String,
    profile: Profile,
    formatter: &Formatter,
) -> Result<()> {
    if !profile.api_url.starts_with("http://") && !profile.api_url.starts_with("https://") {
        return Err(CliError::Config(format!(
            "API URL must start with http:// or https://, got '{}'",
            profile.api_url
        )));
    }

    let action = if config.profiles.contains_key(&name) {
        "Updated"
    } else {
        "Created"
    };

    config.set_profile(name.clone(), profile);
    config.save()?;
    println!("{}", formatter.success(&format!("{} profile '{}'", action, name)));
    Ok(())
}

/// Delete a profile.
fn delete_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    if name == config.active_profile {
        return Err(CliError::NotPermitted("Cannot delete the active profile".to_string()));
    }

    if config.profiles.remove(&name).is_some() {
        config.save()?;
        println!("{}", formatter.success(&format!("Deleted profile '{}'", name)));
    } else {
        println!("{}", formatter.warning(&format!("Profile '{}' does not exist", name)));
    }

    Ok(())
}
