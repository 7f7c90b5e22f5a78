//! Compute merged filter rules from a build payload
//!
//! Options are layered in order: defaults, the payload's own options, an
//! options file, then command-line switches.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use filter_content::{BuildPayload, OptionsLoader, PayloadLoader};
use filter_core::{
    ComputeOptions, ComputeOptionsOverrides, compute_artifact_filters, compute_filter_rules,
};

use crate::report;

/// Compute merged filter rules from a build payload
#[derive(Parser)]
pub struct Compute {
    /// Build payload JSON file
    #[arg(value_name = "PAYLOAD")]
    payload: PathBuf,

    /// TOML file with compute options (camelCase keys, unset keys are kept)
    #[arg(short, long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "markdown")]
    format: OutputFormat,

    /// Print one configuration per build without merging
    #[arg(long)]
    raw: bool,

    /// Leave the builds appendix out of the markdown report
    #[arg(long)]
    no_builds: bool,

    /// Drop builds whose mandatory stats are exactly the two crits
    #[arg(long)]
    skip_crit_builds: bool,

    /// Keep elemental goblet entries as written
    #[arg(long)]
    no_elemental_goblet: bool,

    /// Keep crit circlet entries as written
    #[arg(long)]
    no_crit_circlet: bool,

    /// Disable the single-flex merge pass
    #[arg(long)]
    no_flex_merge: bool,

    /// Disable the rigid common-subset merge pass
    #[arg(long)]
    no_rigid_merge: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Markdown report with per-slot chances
    Markdown,
    /// JSON array of filter groups
    Json,
}

impl Compute {
    pub fn execute(self) -> Result<()> {
        let payload = PayloadLoader::load(&self.payload)?;
        let options = self.resolve_options(&payload)?;
        tracing::debug!(?options, "resolved compute options");

        let rules = if self.raw {
            compute_artifact_filters(&payload.data, &options)
        } else {
            compute_filter_rules(&payload.data, &options)
        };

        match self.format {
            OutputFormat::Markdown => {
                eprintln!(
                    "{} {} groups, {} builds -> {} filter keys",
                    style("Payload:").bold().cyan(),
                    payload.data.len(),
                    payload.build_count(),
                    rules.len()
                );
                let builds = (!self.no_builds).then_some(payload.data.as_slice());
                print!("{}", report::render_markdown(&rules, builds));
            }
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&rules)
                    .context("Failed to serialize filter rules to JSON")?;
                println!("{}", json);
            }
        }

        Ok(())
    }

    fn resolve_options(&self, payload: &BuildPayload) -> Result<ComputeOptions> {
        let mut options = payload.options();
        if let Some(path) = &self.options {
            options = OptionsLoader::load_overrides(path)?.apply(options);
        }
        Ok(self.switches().apply(options))
    }

    /// Overrides for the switches given on the command line only.
    fn switches(&self) -> ComputeOptionsOverrides {
        ComputeOptionsOverrides {
            skip_crit_builds: self.skip_crit_builds.then_some(true),
            expand_elemental_goblet: self.no_elemental_goblet.then_some(false),
            expand_crit_circlet: self.no_crit_circlet.then_some(false),
            merge_single_flex_variants: self.no_flex_merge.then_some(false),
            find_rigid_common_subset: self.no_rigid_merge.then_some(false),
        }
    }
}
