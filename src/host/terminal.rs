// Terminal prompts on stderr/stdin

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::warn;

use super::Prompter;

/// Asks questions on stderr and reads answers from stdin.
/// An empty answer or end of input cancels.
pub struct TerminalPrompter {
    lines: Lines<BufReader<Stdin>>,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    async fn read_answer(&mut self, prompt: &str) -> Option<String> {
        eprint!("{} ", prompt);
        let _ = std::io::stderr().flush();

        match self.lines.next_line().await {
            Ok(Some(line)) => {
                let answer = line.trim().to_string();
                (!answer.is_empty()).then_some(answer)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to read from stdin: {}", e);
                None
            }
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve an answer to one of `options`, by 1-based index or by name
pub fn pick_option(options: &[&str], answer: &str) -> Option<String> {
    if let Ok(index) = answer.parse::<usize>() {
        return index
            .checked_sub(1)
            .and_then(|i| options.get(i))
            .map(|o| o.to_string());
    }

    options
        .iter()
        .find(|o| o.eq_ignore_ascii_case(answer))
        .map(|o| o.to_string())
}

impl Prompter for TerminalPrompter {
    async fn choose(&mut self, options: &[&str], placeholder: &str) -> Option<String> {
        for (i, option) in options.iter().enumerate() {
            eprintln!("  {}) {}", i + 1, option);
        }

        loop {
            let answer = self.read_answer(&format!("{}:", placeholder)).await?;
            match pick_option(options, &answer) {
                Some(choice) => return Some(choice),
                None => eprintln!("Not an option: {}", answer),
            }
        }
    }

    async fn input(&mut self, placeholder: &str) -> Option<String> {
        self.read_answer(&format!("{}:", placeholder)).await
    }
}
