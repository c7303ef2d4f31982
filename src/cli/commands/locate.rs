use anyhow::Result;
use colored::Colorize;

use crate::cli::{
    args::LocateCommand,
    exit_status::ExitStatus,
    report::{FAILURE_MARK, SUCCESS_MARK, print_warning},
};
use crate::core::{Engine, LocaleResolver, NullWatcher, SystemClock};

use super::Workspace;

/// Print the locale file previews would use, and how it was chosen.
pub fn locate(cmd: LocateCommand) -> Result<ExitStatus> {
    let workspace = Workspace::from_args(&cmd.common)?;
    let engine = Engine::init(
        Some(workspace.root.clone()),
        workspace.config.clone(),
        NullWatcher,
        SystemClock,
    );

    if engine.is_inert() {
        eprintln!(
            "{} Workspace root is not a directory: {}",
            FAILURE_MARK.red(),
            workspace.root.display()
        );
        return Ok(ExitStatus::Error);
    }

    if let Some(manual) = workspace.config.locale_path.as_deref()
        && engine
            .active_path()
            .is_none_or(|active| active != workspace.root.join(manual))
    {
        print_warning(&format!(
            "localePath \"{}\" does not exist, using discovery",
            manual
        ));
    }

    let Some(active) = engine.active_path() else {
        eprintln!("{} No locale file found", FAILURE_MARK.red());
        return Ok(ExitStatus::Failure);
    };

    let origin = if workspace
        .config
        .locale_path
        .as_deref()
        .is_some_and(|manual| active == workspace.root.join(manual))
    {
        "localePath"
    } else {
        "discovered"
    };

    if let Some(err) = engine.store().last_error() {
        print_warning(&err.to_string());
    }

    let keys = engine.store().len();
    println!(
        "{} {} {}",
        SUCCESS_MARK.green(),
        workspace.display_path(active).green(),
        format!(
            "({}, {} {})",
            origin,
            keys,
            if keys == 1 { "key" } else { "keys" }
        )
        .dimmed()
    );

    if cmd.common.verbose {
        let candidates = LocaleResolver::default().discover(&workspace.root);
        for candidate in candidates.iter().filter(|c| c.as_path() != active) {
            println!("  also found: {}", workspace.display_path(candidate));
        }
    }

    Ok(ExitStatus::Success)
}
