//! stackref chat - Ask a question about technology choices

use std::path::PathBuf;

use clap::Args;

use crate::app::AppContext;
use crate::chat::ChatTurn;
use crate::cli::ConstraintArgs;
use crate::cli::output::{HumanLayout, emit_human, emit_robot, robot_ok};
use crate::error::{Result, StackError};

#[derive(Args, Debug)]
pub struct ChatArgs {
    /// The question
    #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
    pub message: Vec<String>,

    /// JSON file with prior turns: [{"role": "user", "content": "..."}]
    #[arg(long, value_name = "PATH")]
    pub history: Option<PathBuf>,

    #[command(flatten)]
    pub constraints: ConstraintArgs,

    /// Answer from the rules only
    #[arg(long)]
    pub offline: bool,
}

pub fn run(ctx: &AppContext, args: &ChatArgs) -> Result<()> {
    let message = args.message.join(" ");
    let constraints = args.constraints.to_constraints()?;
    let history = match &args.history {
        Some(path) => load_history(path)?,
        None => Vec::new(),
    };
    if !args.offline {
        ctx.restore_ai();
    }

    let reply = ctx
        .advisor
        .generate_chat_reply(&message, constraints.as_ref(), &history);

    if ctx.robot_mode {
        return emit_robot(&robot_ok(&reply));
    }

    let mut layout = HumanLayout::new();
    layout.push_line(reply.content.clone());
    if !reply.related_stacks.is_empty() {
        let names: Vec<&str> = reply.related_stacks.iter().map(|s| s.name.as_str()).collect();
        layout.blank().kv("Related", &names.join(", "));
    }
    if !reply.suggestions.is_empty() {
        layout.blank().section("You could ask").bullets(&reply.suggestions);
    }
    emit_human(layout);
    Ok(())
}

fn load_history(path: &std::path::Path) -> Result<Vec<ChatTurn>> {
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|err| {
        StackError::Serialization(format!("chat history {}: {err}", path.display()))
    })
}
