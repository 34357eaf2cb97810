//! Line-oriented prompts for collecting snippet fields.

use codestash_core::{parse_yes_no, EditField, Snippet, SnippetEdit};
use std::io::{self, BufRead, Write};

/// Terminates a multi-line code block.
pub const CODE_TERMINATOR: &str = "EOF";

pub struct Prompter<R> {
    input: R,
}

impl<R: BufRead> Prompter<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    /// Show `label` and return the trimmed answer; end of input reads as empty.
    pub fn ask(&mut self, label: &str) -> io::Result<String> {
        print!("{}", label);
        io::stdout().flush()?;
        Ok(self
            .read_line()?
            .map(|line| line.trim().to_string())
            .unwrap_or_default())
    }

    /// y/yes means true, anything else false.
    pub fn confirm(&mut self, label: &str) -> io::Result<bool> {
        let answer = self.ask(label)?;
        Ok(parse_yes_no(&answer).unwrap_or(false))
    }

    /// Read lines verbatim until one reading `EOF` or the end of input.
    pub fn ask_code(&mut self) -> io::Result<String> {
        println!(
            "📋 Enter code (end with '{}' on a new line):",
            CODE_TERMINATOR
        );
        let mut code = String::new();
        while let Some(line) = self.read_line()? {
            if line.trim() == CODE_TERMINATOR {
                break;
            }
            code.push_str(&line);
        }
        Ok(code)
    }

    /// Collect the fields of a new snippet. Returns raw answers; the caller
    /// builds the snippet.
    pub fn read_new_snippet(&mut self) -> io::Result<SnippetEdit> {
        let title = self.ask("📝 Title: ")?;
        let description = self.ask("🧾 Description: ")?;
        let language = self.ask("💻 Language: ")?;
        let tags = self.ask("🏷️ Tags (comma separated): ")?;
        let executable = self.ask("🚀 Is this snippet executable? (y/N): ")?;
        let code = self.ask_code()?;
        Ok(SnippetEdit {
            title,
            description,
            language,
            tags,
            executable,
            code,
        })
    }

    /// Walk every field showing the current value; an empty answer keeps it.
    pub fn read_snippet_edit(&mut self, snippet: &Snippet) -> io::Result<SnippetEdit> {
        println!("📝 Editing snippet: {}", snippet.title);
        println!("{}", crate::display::SEPARATOR);
        println!("Press Enter to keep current value, or type new value:");
        println!();

        let title = self.ask(&format!("📝 Title [{}]: ", snippet.title))?;
        let description = self.ask(&format!("🧾 Description [{}]: ", snippet.description))?;
        let language = self.ask(&format!("💻 Language [{}]: ", snippet.language))?;
        let tags = self.ask(&format!("🏷️ Tags [{}]: ", snippet.tags_joined()))?;
        let executable = self.ask(&format!(
            "🚀 Executable [{}] (y/n): ",
            yes_no(snippet.executable)
        ))?;

        let code = if self.confirm("📋 Edit code? (y/N): ")? {
            println!("Current code:");
            crate::display::print_code_block(&snippet.code);
            self.ask_code()?
        } else {
            String::new()
        };

        Ok(SnippetEdit {
            title,
            description,
            language,
            tags,
            executable,
            code,
        })
    }

    /// Ask for a new value of a single field.
    pub fn read_field_value(&mut self, snippet: &Snippet, field: EditField) -> io::Result<String> {
        match field {
            EditField::Title => {
                println!("📝 Current title: {}", snippet.title);
                self.ask("📝 New title: ")
            }
            EditField::Description => {
                println!("🧾 Current description: {}", snippet.description);
                self.ask("🧾 New description: ")
            }
            EditField::Language => {
                println!("💻 Current language: {}", snippet.language);
                self.ask("💻 New language: ")
            }
            EditField::Tags => {
                println!("🏷️ Current tags: {}", snippet.tags_joined());
                self.ask("🏷️ New tags (comma separated): ")
            }
            EditField::Executable => {
                println!(
                    "🚀 Current executable status: {}",
                    yes_no(snippet.executable)
                );
                self.ask("🚀 New executable status (y/n): ")
            }
            EditField::Code => {
                println!("📋 Current code:");
                crate::display::print_code_block(&snippet.code);
                self.ask_code()
            }
        }
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}
