//! `society report`: incremental build followed by rendering.

use society_analysis::{ClassModel, IncrementalBuilder};
use society_report::Reporter;
use society_ruby::{default_assembler, RubyAnalyzer};

use crate::settings::Settings;
use crate::{GlobalArgs, ReportArgs};

/// Runs the `society report` command.
///
/// Unknown formats are rejected before any analysis happens.
pub fn run(args: &ReportArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let settings = Settings::resolve(global)?;
    let format = args.format.clone().unwrap_or(settings.format);
    let output = args.output.clone().or(settings.output);

    let reporter = Reporter::with_defaults();
    if !reporter.formats().contains(&format) {
        return Err(society_report::ReportError::UnknownFormat {
            format,
            known: reporter.formats(),
        }
        .into());
    }

    let builder = IncrementalBuilder::new(RubyAnalyzer, &settings.cache_dir)
        .with_extensions(settings.extensions);
    let outcome = builder.build(&args.paths)?;

    if !global.quiet {
        eprintln!(
            "   Analyzed {} file(s), reused {} cached, {} class(es)",
            outcome.updated.len(),
            outcome.unchanged.len(),
            outcome.classes.len()
        );
    }

    let model = ClassModel::new(outcome.classes, default_assembler());
    reporter.report(&model, &format, output.as_deref())?;
    Ok(0)
}
