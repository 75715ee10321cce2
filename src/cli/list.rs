//! List the components available in the registry.
//!
//! # Output Formats
//!
//! - **table** (default): name, type and description per component, followed
//!   by its npm dependencies when it has any
//! - **json**: the index `items` array exactly as served, pretty-printed
//!
//! ```bash
//! pixel-motion list
//! pixel-motion list --json | jq '.[].name'
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::CommandContext;
use crate::registry::{RegistryClient, RegistryIndex};
use crate::utils::progress::spinner_with_message;

/// Width of the rule under the table header
const RULE_WIDTH: usize = 70;

/// Command to list registry components.
#[derive(Args, Debug)]
pub struct ListCommand {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl ListCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let client = RegistryClient::new(ctx.registry.clone())?;

        let spinner = spinner_with_message("Fetching registry...", ctx.progress);
        let fetched = client.fetch_index_document().await;
        spinner.finish_and_clear();
        let (index, document) = fetched?;

        if self.json {
            // Items are printed as served, unknown fields included
            let items = document.get("items").cloned().unwrap_or_default();
            println!("{}", serde_json::to_string_pretty(&items)?);
        } else {
            print!("{}", render_table(&index));
        }
        Ok(())
    }
}

/// Human-readable listing of `index`
fn render_table(index: &RegistryIndex) -> String {
    let mut out = format!("\n{}\n\n", format!("{} Components", index.name).green().bold());

    if index.items.is_empty() {
        out.push_str(&format!("  {}\n", "No components found in registry.".yellow()));
        return out;
    }

    let name_width = index.items.iter().map(|item| item.name.len()).max().unwrap_or(0).max(4);
    let type_width =
        index.items.iter().map(|item| item.item_type.to_string().len()).max().unwrap_or(0).max(4);

    out.push_str(&format!(
        "  {}  {}  {}\n",
        format!("{:name_width$}", "Name").bold(),
        format!("{:type_width$}", "Type").bold(),
        "Description".bold()
    ));
    out.push_str(&format!("  {}\n", "-".repeat(RULE_WIDTH).dimmed()));

    for item in &index.items {
        let description = match item.description.as_deref() {
            Some(text) if !text.is_empty() => text.normal(),
            _ => "No description".dimmed(),
        };
        out.push_str(&format!(
            "  {}  {}  {}\n",
            format!("{:name_width$}", item.name).cyan(),
            format!("{:type_width$}", item.item_type.to_string()).yellow(),
            description
        ));

        if !item.dependencies.is_empty() {
            let deps = format!(
                "  {:name_width$}  {:type_width$}  deps: {}",
                "",
                "",
                item.dependencies.join(", ")
            );
            out.push_str(&format!("{}\n", deps.dimmed()));
        }
    }

    out.push_str(&format!(
        "\n  {}\n\n",
        format!("{} component(s) available", index.items.len()).dimmed()
    ));
    out.push_str(&format!(
        "  {}{}{}\n\n",
        "Run ".dimmed(),
        "npx pixel-motion add <name>".cyan(),
        " to install a component.".dimmed()
    ));
    out
}
