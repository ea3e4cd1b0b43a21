// file: src/ui/render.rs
// description: text rendering for the banner and chat transcript
// reference: colored console output

use crate::config::UiConfig;
use crate::models::{ChatRole, ChatTurn};
use colored::Colorize;

pub const COMMANDS_HELP: &str = "Commands: /history shows the transcript, /help lists commands, /exit quits.";

pub fn banner(ui: &UiConfig) -> String {
    let rule = "=".repeat(ui.title.chars().count().max(40));
    format!(
        "{}\n{}\n{}\n{}\n{}\n",
        ui.title.bold(),
        rule.dimmed(),
        "Searches the web for your question and summarizes the top results with a language model.",
        "Each answer is built only from the retrieved results.".dimmed(),
        COMMANDS_HELP.dimmed()
    )
}

pub fn render_turn(turn: &ChatTurn) -> String {
    let label = match turn.role() {
        ChatRole::User => "you ›".cyan().bold(),
        ChatRole::Assistant => "assistant ›".green().bold(),
    };
    format!("{}\n{}\n", label, turn.content().trim_end())
}

pub fn render_transcript(history: &[ChatTurn]) -> String {
    if history.is_empty() {
        return format!("{}\n", "No messages yet.".dimmed());
    }

    history
        .iter()
        .map(render_turn)
        .collect::<Vec<_>>()
        .join("\n")
}
