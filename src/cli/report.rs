//! Terminal rendering of annotated files.
//!
//! Each annotated line is printed once, gutter-numbered, with every overlay
//! spliced in right after its call site:
//!
//! ```text
//! src/app.tsx
//!  3 | <h1>{t('home.title')}  ➜  Welcome back</h1>
//! ```

use std::io::{self, Write};

use colored::Colorize;

use crate::core::{Annotation, LineIndex};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// One source line with its overlays already inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedLine {
    /// 1-based line number.
    pub number: usize,
    pub text: String,
}

/// Group `annotations` by line and splice their labels into the source text.
///
/// Lines without annotations are omitted. `style` decorates each label.
pub fn annotated_lines(
    text: &str,
    annotations: &[Annotation],
    style: impl Fn(&str) -> String,
) -> Vec<AnnotatedLine> {
    let index = LineIndex::new(text);
    let mut lines = Vec::new();

    let mut remaining = annotations;
    while let Some(first) = remaining.first() {
        let line = first.position.line;
        let count = remaining
            .iter()
            .take_while(|a| a.position.line == line)
            .count();
        let (on_line, rest) = remaining.split_at(count);
        remaining = rest;

        let Some(source) = index.line_text(line) else {
            continue;
        };
        let labels: Vec<(usize, String)> = on_line
            .iter()
            .map(|a| (a.position.column, style(&a.label())))
            .collect();
        lines.push(AnnotatedLine {
            number: line + 1,
            text: splice_labels(source, &labels),
        });
    }

    lines
}

/// Insert each label after the character at its column. Columns are
/// character counts and must be ascending.
pub fn splice_labels(line: &str, labels: &[(usize, String)]) -> String {
    let mut out = String::with_capacity(line.len() + labels.iter().map(|(_, l)| l.len()).sum::<usize>());
    let mut labels = labels.iter().peekable();

    for (column, ch) in line.chars().enumerate() {
        while let Some((_, label)) = labels.next_if(|(at, _)| *at == column) {
            out.push_str(label);
        }
        out.push(ch);
    }
    for (_, label) in labels {
        out.push_str(label);
    }
    out
}

/// Print one file's annotated lines to stdout.
pub fn print_file(file: &str, text: &str, annotations: &[Annotation]) {
    print_file_to(file, text, annotations, &mut io::stdout().lock());
}

/// Print one file's annotated lines to a custom writer.
pub fn print_file_to<W: Write>(file: &str, text: &str, annotations: &[Annotation], writer: &mut W) {
    let lines = annotated_lines(text, annotations, |label| {
        label.dimmed().italic().to_string()
    });

    let _ = writeln!(writer, "{}", file.bold());
    if lines.is_empty() {
        let _ = writeln!(writer, "  {}", "(no translations found)".dimmed());
        return;
    }

    let width = lines
        .last()
        .map(|l| l.number.to_string().len())
        .unwrap_or(1);
    for line in &lines {
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            line.number.to_string().blue(),
            "|".blue(),
            line.text,
            width = width
        );
    }
}

/// Print the closing summary line.
pub fn print_summary(annotations: usize, files: usize, locale: Option<&str>) {
    let noun = if annotations == 1 { "annotation" } else { "annotations" };
    let file_noun = if files == 1 { "file" } else { "files" };
    let source = match locale {
        Some(locale) => format!(" from {}", locale),
        None => String::new(),
    };
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "{} {} in {} {}{}",
            annotations, noun, files, file_noun, source
        )
        .green()
    );
}

/// Print a `warning:` line to stderr.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), message);
}
