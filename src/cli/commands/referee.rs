//! stackref referee - Neutral verdict on a selection

use clap::Args;

use crate::app::AppContext;
use crate::cli::ConstraintArgs;
use crate::cli::output::{HumanLayout, emit_human, emit_robot, robot_ok};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct RefereeArgs {
    /// Technology ids to referee
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<String>,

    #[command(flatten)]
    pub constraints: ConstraintArgs,

    /// Use the deterministic verdict even when a credential is configured
    #[arg(long)]
    pub offline: bool,
}

pub fn run(ctx: &AppContext, args: &RefereeArgs) -> Result<()> {
    let ids: Vec<String> = args.ids.iter().map(|id| id.trim().to_lowercase()).collect();
    let constraints = args.constraints.to_constraints()?;
    if !args.offline {
        ctx.restore_ai();
    }

    let report = ctx.advisor.referee(&ids, constraints.as_ref())?;

    if ctx.robot_mode {
        return emit_robot(&robot_ok(&report));
    }

    let names: Vec<&str> = report
        .stacks
        .iter()
        .filter_map(|id| ctx.advisor.get_technology(id))
        .map(|p| p.name.as_str())
        .collect();
    let mut layout = HumanLayout::new();
    layout
        .title(&format!("Referee: {}", names.join(" vs ")))
        .push_line(report.verdict.clone());
    emit_human(layout);
    Ok(())
}
