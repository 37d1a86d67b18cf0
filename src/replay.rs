//! Headless front end: drive the engine from a script and print the transcript.

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use tokio::io::AsyncReadExt;
use tracing::{info, warn};

use crate::config::Config;
use crate::conversation::{ConversationEngine, Message, Prompt};
use crate::events::ChatEvent;

/// One line of a replay script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStep {
    /// Free text, as if typed
    Say(String),
    /// Pick the n-th (1-based) option of the latest prompt
    Option(usize),
    /// Answer the latest feedback prompt
    Feedback(bool),
    /// Let every scheduled reply land
    Wait,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Parse a replay script; `#` lines are comments.
///
/// Lines starting with `!` are directives. A leading `!!` sends the rest of
/// the line, with one `!`, as typed text.
pub fn parse_script(source: &str) -> Result<Vec<ScriptStep>> {
    let mut steps = Vec::new();

    for (number, line) in source.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.starts_with('#') {
            continue;
        }

        let Some(directive) = trimmed.strip_prefix('!') else {
            steps.push(ScriptStep::Say(line.to_string()));
            continue;
        };
        if directive.starts_with('!') {
            steps.push(ScriptStep::Say(directive.to_string()));
            continue;
        }

        let line_no = number + 1;
        let mut parts = directive.split_whitespace();
        let step = match (parts.next(), parts.next()) {
            (Some("option"), Some(index)) => {
                let index: usize = index
                    .parse()
                    .with_context(|| format!("line {line_no}: invalid option number '{index}'"))?;
                if index == 0 {
                    bail!("line {line_no}: option numbers start at 1");
                }
                ScriptStep::Option(index)
            }
            (Some("yes"), None) => ScriptStep::Feedback(true),
            (Some("no"), None) => ScriptStep::Feedback(false),
            (Some("wait"), None) => ScriptStep::Wait,
            _ => bail!("line {line_no}: unknown directive '!{directive}'"),
        };
        steps.push(step);
    }

    Ok(steps)
}

/// Turn a step into an engine event, given what the latest message offers
fn resolve(step: &ScriptStep, prompt: Option<&Prompt>) -> Option<ChatEvent> {
    match (step, prompt) {
        (ScriptStep::Say(text), _) => Some(ChatEvent::Submit(text.clone())),
        (ScriptStep::Option(index), Some(Prompt::Options { choices, .. })) => {
            index
                .checked_sub(1)
                .and_then(|i| choices.get(i))
                .cloned()
                .map(ChatEvent::SelectOption)
        }
        (ScriptStep::Feedback(is_helpful), Some(Prompt::Feedback { .. })) => {
            Some(ChatEvent::RecordFeedback(*is_helpful))
        }
        _ => None,
    }
}

/// Play the steps against the engine, then wait for the last replies
pub async fn run_script(engine: &mut ConversationEngine, steps: &[ScriptStep]) {
    for step in steps {
        match step {
            ScriptStep::Wait => {
                engine.wait_idle().await;
                continue;
            }
            // Answering a prompt means waiting for the bot first
            ScriptStep::Option(_) | ScriptStep::Feedback(_) => engine.wait_idle().await,
            ScriptStep::Say(_) => {}
        }

        match resolve(step, engine.actionable_prompt()) {
            Some(event) => engine.apply(event),
            None => warn!(?step, "latest message does not accept this step, skipping"),
        }
    }
    engine.wait_idle().await;
}

pub fn render_text(messages: &[Message], show_timestamps: bool) -> String {
    let mut out = String::new();
    for message in messages {
        if show_timestamps {
            out.push_str(&format!("[{}] ", message.timestamp.format("%H:%M:%S")));
        }
        out.push_str(&format!("{} {}: {}\n", message.sender.icon(), message.sender, message.text));
        match &message.prompt {
            Some(Prompt::Options { choices, selected }) => {
                for (i, choice) in choices.iter().enumerate() {
                    out.push_str(&format!("    [{}] {}\n", i + 1, choice));
                }
                if *selected {
                    out.push_str("    (answered)\n");
                }
            }
            Some(Prompt::Feedback { answered }) => {
                out.push_str("    [yes] [no]\n");
                if *answered {
                    out.push_str("    (answered)\n");
                }
            }
            None => {}
        }
    }
    out
}

pub fn render_json(messages: &[Message]) -> Result<String> {
    serde_json::to_string_pretty(messages).context("Failed to serialize transcript")
}

/// Read a script from `path` (stdin when absent), replay it and print the transcript
pub async fn replay(config: &Config, path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let source = match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read script {}", path.display()))?,
        None => {
            let mut source = String::new();
            tokio::io::stdin()
                .read_to_string(&mut source)
                .await
                .context("Failed to read script from stdin")?;
            source
        }
    };

    let steps = parse_script(&source)?;
    info!(steps = steps.len(), theme = config.theme.as_ref(), "replaying script");

    let mut engine = ConversationEngine::new(&config.theme(), config.reply_delay(), config.seed);
    run_script(&mut engine, &steps).await;

    let output = match format {
        OutputFormat::Text => render_text(engine.transcript(), config.ui.show_timestamps),
        OutputFormat::Json => render_json(engine.transcript())?,
    };
    println!("{}", output.trim_end());
    Ok(())
}
