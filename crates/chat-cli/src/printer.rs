use std::io::{self, Write};

use chat_core::Message;
use chat_render::{format_citations, ChatView, MessageDisplay, TypingFrame, ViewUpdate, THINKING_TEXT};
use colored::Colorize;

/// Writes the transcript to stdout, appending typed answers in place.
#[derive(Debug, Default)]
pub struct TranscriptPrinter {
    /// Bytes of the current typed answer already written.
    typed_bytes: usize,
}

impl TranscriptPrinter {
    pub fn prompt(&self) {
        print!("{} ", "You:".cyan().bold());
        flush();
    }

    pub fn print_thinking(&self) {
        println!("{}", THINKING_TEXT.dimmed());
    }

    /// Print a settled answer: either its first typed frame or its full content.
    pub fn print_answer(&mut self, view: &ChatView, message: &Message) {
        match view.display(message) {
            MessageDisplay::Thinking => self.print_thinking(),
            MessageDisplay::Typing { shown } => {
                println!("{}", "Assistant:".green().bold());
                print!("{}", shown);
                flush();
                self.typed_bytes = shown.len();
            }
            MessageDisplay::Static { content, sources } => {
                println!("{}", "Assistant:".green().bold());
                if message.use_typing_effect {
                    println!("{}", content);
                } else {
                    println!("{}", content.red());
                }
                print_citations(sources);
            }
            MessageDisplay::Empty => {}
        }
    }

    pub fn print_update(&mut self, update: &ViewUpdate, message: Option<&Message>) {
        match &update.frame {
            TypingFrame::Reveal(prefix) => {
                print!("{}", prefix.get(self.typed_bytes..).unwrap_or(prefix.as_str()));
                flush();
                self.typed_bytes = prefix.len();
            }
            TypingFrame::Complete => {
                println!();
                self.typed_bytes = 0;
                if let Some(message) = message {
                    print_citations(&message.sources);
                }
            }
        }
    }

    /// Write the rest of an answer whose reveal was cut short.
    pub fn finish_interrupted(&mut self, message: Option<&Message>) {
        if let Some(message) = message {
            print!("{}", message.content.get(self.typed_bytes..).unwrap_or_default());
            println!();
            print_citations(&message.sources);
        }
        self.typed_bytes = 0;
    }

    pub fn reset(&mut self) {
        self.typed_bytes = 0;
    }
}

fn print_citations(sources: &[String]) {
    if let Some(citations) = format_citations(sources) {
        println!("{}", citations.yellow());
    }
}

fn flush() {
    if let Err(e) = io::stdout().flush() {
        tracing::debug!("Failed to flush stdout: {}", e);
    }
}
