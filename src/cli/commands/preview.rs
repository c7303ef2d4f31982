use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::cli::{
    args::PreviewCommand,
    exit_status::ExitStatus,
    report::{print_file, print_summary, print_warning},
};
use crate::core::{Annotation, Engine, NullWatcher, SystemClock};

use super::Workspace;

struct RenderedFile {
    path: PathBuf,
    text: String,
    annotations: Vec<Annotation>,
}

/// Annotate each file once against a single snapshot of the locale table.
pub fn preview(cmd: PreviewCommand) -> Result<ExitStatus> {
    let workspace = Workspace::from_args(&cmd.common)?;
    let engine: Engine<NullWatcher> = Engine::init(
        Some(workspace.root.clone()),
        workspace.config.clone(),
        NullWatcher,
        SystemClock,
    );

    if engine.is_inert() {
        print_warning(&format!(
            "workspace root is not a directory, previews disabled: {}",
            workspace.root.display()
        ));
    } else if engine.active_path().is_none() {
        print_warning("no locale file found");
    } else if let Some(err) = engine.store().last_error() {
        print_warning(&err.to_string());
    }

    let rendered = cmd
        .files
        .par_iter()
        .map(|path| {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let annotations = engine.annotate(&text);
            Ok(RenderedFile {
                path: path.clone(),
                text,
                annotations,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    for file in &rendered {
        print_file(&file.path.display().to_string(), &file.text, &file.annotations);
    }

    let total = rendered.iter().map(|f| f.annotations.len()).sum();
    let locale = engine.active_path().map(|p| workspace.display_path(p));
    print_summary(total, rendered.len(), locale.as_deref());

    Ok(ExitStatus::Success)
}
