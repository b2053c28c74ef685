//! Line-oriented terminal front end.

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::command::{UiCommand, HELP_TEXT};
use crate::surface::Surface;

pub struct TerminalSurface {
    title: String,
}

impl TerminalSurface {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    pub fn show_banner(&self) {
        println!("{}", self.title);
        println!("{}", "=".repeat(self.title.chars().count()));
        println!("{}", HELP_TEXT);
    }
}

impl Surface for TerminalSurface {
    fn warn(&mut self, title: &str, message: &str) {
        println!("[{}] {}", title, message);
    }

    fn show_weather(&mut self, text: &str) {
        println!("--- Weather ---");
        println!("{}", text);
    }

    fn show_notes(&mut self, lines: &[String]) {
        println!("--- Calendar Notes ---");
        if lines.is_empty() {
            println!("(no notes)");
        }
        for line in lines {
            println!("{}", line);
        }
    }

    fn show_help(&mut self) {
        println!("{}", HELP_TEXT);
    }
}

/// Forward parsed stdin lines as commands. The sender is dropped at EOF.
pub fn spawn_stdin_reader(commands: UnboundedSender<UiCommand>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => match UiCommand::parse(&line) {
                    Ok(Some(command)) => {
                        if commands.send(command).is_err() {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => println!("{} (type 'help')", e),
                },
                Ok(None) => break,
                Err(e) => {
                    tracing::error!("Failed to read input: {}", e);
                    break;
                }
            }
        }
    })
}
