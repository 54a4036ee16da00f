//! Output formatters for filtering results.

use std::io::Write;

use colored::Colorize;
use serde::Serialize;

use crate::config::OutputFormat;
use crate::core::{Analysis, Result, UnitReport};
use crate::filter::FeatureStatus;
use crate::mutation::MutationDetails;

/// Output format enum.
#[derive(Clone, Copy, Debug, Default)]
pub enum Format {
    Json,
    Markdown,
    #[default]
    Text,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => Format::Json,
            OutputFormat::Markdown => Format::Markdown,
            OutputFormat::Text => Format::Text,
        }
    }
}

impl Format {
    /// Write a filtering report. Kept candidates are listed only with `show_kept`.
    pub fn write_analysis<W: Write>(
        &self,
        analysis: &Analysis,
        show_kept: bool,
        writer: &mut W,
    ) -> Result<()> {
        match self {
            Format::Json => write_json(analysis, writer),
            Format::Markdown => analysis_markdown(analysis, show_kept, writer),
            Format::Text => analysis_text(analysis, show_kept, writer),
        }
    }

    /// Write the feature listing.
    pub fn write_features<W: Write>(
        &self,
        features: &[FeatureStatus],
        writer: &mut W,
    ) -> Result<()> {
        match self {
            Format::Json => write_json(&features, writer),
            Format::Markdown => features_markdown(features, writer),
            Format::Text => features_text(features, writer),
        }
    }
}

fn write_json<T: Serialize, W: Write>(data: &T, writer: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, data)?;
    writeln!(writer)?;
    Ok(())
}

fn line(mutation: &MutationDetails) -> String {
    mutation
        .line
        .map_or_else(|| "-".to_string(), |line| line.to_string())
}

fn analysis_markdown<W: Write>(
    analysis: &Analysis,
    show_kept: bool,
    writer: &mut W,
) -> Result<()> {
    let summary = &analysis.summary;
    writeln!(writer, "# Equivalent Mutant Filter\n")?;
    writeln!(writer, "**Units**: {}\n", summary.units_analyzed)?;
    writeln!(writer, "**Mutations**: {}\n", summary.mutations_total)?;
    writeln!(writer, "**Filtered**: {}\n", summary.mutations_filtered)?;
    writeln!(writer, "**Kept**: {}\n", summary.mutations_kept)?;

    for unit in &analysis.units {
        writeln!(writer, "## {}\n", unit.class)?;
        mutations_table("Filtered", &unit.filtered, writer)?;
        if show_kept {
            mutations_table("Kept", &unit.kept, writer)?;
        }
    }
    Ok(())
}

fn mutations_table<W: Write>(
    title: &str,
    mutations: &[MutationDetails],
    writer: &mut W,
) -> Result<()> {
    writeln!(writer, "### {title}\n")?;
    if mutations.is_empty() {
        writeln!(writer, "_No items_\n")?;
        return Ok(());
    }
    writeln!(writer, "| Method | Mutator | Index | Line | Description |")?;
    writeln!(writer, "| --- | --- | --- | --- | --- |")?;
    for m in mutations {
        writeln!(
            writer,
            "| `{}{}` | {} | {} | {} | {} |",
            m.location.method_name,
            m.location.descriptor,
            m.mutator,
            m.instruction_index,
            line(m),
            m.description.replace('|', "\\|")
        )?;
    }
    writeln!(writer)?;
    Ok(())
}

fn analysis_text<W: Write>(analysis: &Analysis, show_kept: bool, writer: &mut W) -> Result<()> {
    for unit in &analysis.units {
        unit_text(unit, show_kept, writer)?;
    }
    let summary = &analysis.summary;
    writeln!(
        writer,
        "{} {} of {} mutations filtered across {} units ({:.2}s)",
        "Summary:".bold(),
        summary.mutations_filtered.to_string().green(),
        summary.mutations_total,
        summary.units_analyzed,
        summary.duration.as_secs_f64()
    )?;
    Ok(())
}

fn unit_text<W: Write>(unit: &UnitReport, show_kept: bool, writer: &mut W) -> Result<()> {
    writeln!(
        writer,
        "{} ({} filtered, {} kept)",
        unit.class.bold(),
        unit.filtered.len(),
        unit.kept.len()
    )?;
    for m in &unit.filtered {
        writeln!(writer, "  {} {}", "filtered".green(), mutation_text(m))?;
    }
    if show_kept {
        for m in &unit.kept {
            writeln!(writer, "  {} {}", "kept    ".yellow(), mutation_text(m))?;
        }
    }
    Ok(())
}

fn mutation_text(m: &MutationDetails) -> String {
    format!(
        "{}{} {} @{} (line {})",
        m.location.method_name,
        m.location.descriptor,
        m.mutator,
        m.instruction_index,
        line(m)
    )
}

fn features_markdown<W: Write>(features: &[FeatureStatus], writer: &mut W) -> Result<()> {
    writeln!(writer, "| Feature | Enabled | Default | Description |")?;
    writeln!(writer, "| --- | --- | --- | --- |")?;
    let yes_no = |b: bool| if b { "Yes" } else { "No" };
    for f in features {
        writeln!(
            writer,
            "| {} | {} | {} | {} |",
            f.name,
            yes_no(f.enabled),
            yes_no(f.on_by_default),
            f.description
        )?;
    }
    Ok(())
}

fn features_text<W: Write>(features: &[FeatureStatus], writer: &mut W) -> Result<()> {
    for f in features {
        let state = if f.enabled { "on ".green() } else { "off".red() };
        let default = if f.on_by_default { "on" } else { "off" };
        writeln!(
            writer,
            "{} {} (default {default}) {}",
            state,
            f.name.bold(),
            f.description
        )?;
    }
    Ok(())
}
