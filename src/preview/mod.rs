//! Terminal replacement for the host's parameter dialog. Prompts render on
//! stderr, leaving stdout to the host protocol.

use anyhow::{anyhow, bail, Result};
use inquire::{InquireError, Password, PasswordDisplayMode, Select, Text};

use crate::config::RequestDefaults;
use crate::params::{RequestDescriptor, RequestInput};

pub const HTTP_METHODS: [&str; 8] = [
    "GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS", "HEAD", "TRACE",
];

pub trait PromptUi {
    fn print(&mut self, message: &str);
    fn select(&mut self, prompt: &str, items: &[String], start: usize) -> Result<Option<usize>>;
    fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<Option<String>>;
    fn secret(&mut self, prompt: &str) -> Result<Option<String>>;
}

pub struct InquireUi;

impl PromptUi for InquireUi {
    fn print(&mut self, message: &str) {
        eprintln!("{}", message);
    }

    fn select(&mut self, prompt: &str, items: &[String], start: usize) -> Result<Option<usize>> {
        match Select::new(prompt, items.to_vec())
            .with_page_size(HTTP_METHODS.len())
            .with_starting_cursor(start)
            .prompt()
        {
            Ok(choice) => items
                .iter()
                .position(|item| item == &choice)
                .map(Some)
                .ok_or_else(|| anyhow!("selection not found")),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
            Err(other) => Err(other.into()),
        }
    }

    fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<Option<String>> {
        let mut builder = Text::new(prompt);
        if let Some(value) = default {
            builder = builder.with_default(value);
        }
        match builder.prompt() {
            Ok(value) => Ok(Some(value)),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
            Err(other) => Err(other.into()),
        }
    }

    fn secret(&mut self, prompt: &str) -> Result<Option<String>> {
        match Password::new(prompt)
            .with_display_mode(PasswordDisplayMode::Masked)
            .without_confirmation()
            .prompt()
        {
            Ok(value) => Ok(Some(value)),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
            Err(other) => Err(other.into()),
        }
    }
}

/// Walks the user through every request field and returns the escaped
/// descriptor the host will store.
pub fn capture_request(ui: &mut dyn PromptUi, defaults: &RequestDefaults) -> Result<RequestDescriptor> {
    let defaults = RequestInput::from(defaults);
    ui.print("Enter the request to import (Esc cancels)");

    let uri = required(ui.input("URL", Some(defaults.uri.as_str()))?)?;
    let method = prompt_method(ui, &defaults.method)?;
    let header = required(ui.input("Headers (name:value;...)", Some(defaults.header.as_str()))?)?;
    let username = required(ui.input("Username", Some(defaults.username.as_str()))?)?;
    let password = required(ui.secret("Password")?)?;
    let body = required(ui.input("Request body", Some(defaults.body.as_str()))?)?;

    let descriptor = RequestInput {
        uri,
        method,
        header,
        username,
        password,
        body,
    }
    .into_descriptor()?;
    Ok(descriptor)
}

fn prompt_method(ui: &mut dyn PromptUi, default: &str) -> Result<String> {
    let mut items: Vec<String> = HTTP_METHODS.iter().map(|m| m.to_string()).collect();
    let wanted = default.trim().to_ascii_uppercase();
    let start = match items.iter().position(|item| item == &wanted) {
        Some(index) => index,
        None if wanted.is_empty() => 0,
        None => {
            items.insert(0, wanted);
            0
        }
    };

    let index = ui
        .select("Type", &items, start)?
        .ok_or_else(|| anyhow!("preview cancelled"))?;
    items
        .get(index)
        .cloned()
        .ok_or_else(|| anyhow!("invalid method selection"))
}

fn required(value: Option<String>) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => bail!("preview cancelled"),
    }
}
