//! stackref risks - Assess the risks of a selection

use clap::Args;

use crate::ai::NarrativeSource;
use crate::app::AppContext;
use crate::cli::ConstraintArgs;
use crate::cli::output::{HumanLayout, emit_human, emit_robot, robot_ok};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct RisksArgs {
    /// Technology ids to assess
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<String>,

    #[command(flatten)]
    pub constraints: ConstraintArgs,

    /// Use the deterministic report even when a credential is configured
    #[arg(long)]
    pub offline: bool,
}

pub fn run(ctx: &AppContext, args: &RisksArgs) -> Result<()> {
    let ids: Vec<String> = args.ids.iter().map(|id| id.trim().to_lowercase()).collect();
    let constraints = args.constraints.to_constraints()?;
    if !args.offline {
        ctx.restore_ai();
    }

    let report = ctx.advisor.assess_risks(&ids, constraints.as_ref())?;

    if ctx.robot_mode {
        return emit_robot(&robot_ok(&report));
    }

    let mut layout = HumanLayout::new();
    layout.title("Risk assessment");
    match (report.source, &report.analysis) {
        (NarrativeSource::Ai, Some(analysis)) => {
            layout.push_line(analysis.clone());
        }
        _ => {
            for note in &report.notes {
                layout.section(&note.name).kv("Risk", note.level.badge());
                if !note.pitfalls.is_empty() {
                    layout.push_line("Watch out for:").bullets(&note.pitfalls);
                }
                layout.blank();
            }
            layout.bullets(&report.advice);
        }
    }
    emit_human(layout);
    Ok(())
}
