//! stackref ai - Manage the optional AI credential

use std::io::BufRead;

use clap::{Args, Subcommand};

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_robot, robot_ok};
use crate::error::{Result, StackError};

#[derive(Args, Debug)]
pub struct AiArgs {
    #[command(subcommand)]
    pub command: AiCommand,
}

#[derive(Subcommand, Debug)]
pub enum AiCommand {
    /// Validate and store a credential
    Configure(ConfigureArgs),
    /// Forget the stored credential
    Reset,
    /// Show whether AI augmentation is available
    Status,
}

#[derive(Args, Debug)]
pub struct ConfigureArgs {
    /// API key; read from stdin when omitted
    pub credential: Option<String>,
}

pub fn run(ctx: &AppContext, args: &AiArgs) -> Result<()> {
    match &args.command {
        AiCommand::Configure(configure) => run_configure(ctx, configure),
        AiCommand::Reset => run_reset(ctx),
        AiCommand::Status => run_status(ctx),
    }
}

fn run_configure(ctx: &AppContext, args: &ConfigureArgs) -> Result<()> {
    if ctx.advisor.ai().is_none() {
        return Err(StackError::Config(
            "AI augmentation is disabled (ai.enabled = false)".to_string(),
        ));
    }

    let credential = match &args.credential {
        Some(value) => value.clone(),
        None => read_credential()?,
    };

    let ok = ctx.advisor.configure_ai(&credential);
    if !ok {
        return Err(StackError::InvalidCredential(
            "the key was not accepted by any model; check it and try again".to_string(),
        ));
    }

    let model = ctx.advisor.ai().and_then(|ai| ai.model());
    if ctx.robot_mode {
        return emit_robot(&robot_ok(serde_json::json!({
            "available": true,
            "model": model,
        })));
    }
    let mut layout = HumanLayout::new();
    layout
        .title("AI augmentation ready")
        .kv("Model", model.as_deref().unwrap_or("-"));
    emit_human(layout);
    Ok(())
}

fn run_reset(ctx: &AppContext) -> Result<()> {
    ctx.advisor.reset_ai();
    if ctx.robot_mode {
        return emit_robot(&robot_ok(serde_json::json!({ "available": false })));
    }
    println!("AI credential cleared.");
    Ok(())
}

fn run_status(ctx: &AppContext) -> Result<()> {
    let enabled = ctx.advisor.ai().is_some();
    let available = enabled && ctx.restore_ai();
    let state = ctx.advisor.ai().map(crate::ai::AiService::state);

    if ctx.robot_mode {
        return emit_robot(&robot_ok(serde_json::json!({
            "enabled": enabled,
            "available": available,
            "state": state,
            "credential_store": ctx.config.ai.credential_store,
        })));
    }

    let mut layout = HumanLayout::new();
    layout
        .title("AI augmentation")
        .kv("Enabled", if enabled { "yes" } else { "no" })
        .kv("Available", if available { "yes" } else { "no" })
        .kv("Credential store", ctx.config.ai.credential_store.as_str());
    if let Some(model) = ctx.advisor.ai().and_then(|ai| ai.model()) {
        layout.kv("Model", &model);
    }
    emit_human(layout);
    Ok(())
}

fn read_credential() -> Result<String> {
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let credential = line.trim().to_string();
    if credential.is_empty() {
        return Err(StackError::InvalidCredential(
            "no credential supplied".to_string(),
        ));
    }
    Ok(credential)
}
