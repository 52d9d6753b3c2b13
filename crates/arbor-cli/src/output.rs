//! Output formatting for server results.
//!
//! Supports table (human-readable) and JSON output formats. Table output
//! follows the render mode chosen by the command.

use std::io::Write;

use arbor_proto::{ServerResult, TreeNode};
use serde::Serialize;
use serde_json::Value;

use crate::cli::Format;
use crate::error::CliError;
use crate::request::RenderMode;

/// Output formatter that handles both table and JSON output.
#[derive(Debug, Clone)]
pub struct OutputFormat {
    format: Format,
}

impl OutputFormat {
    /// Create a new output formatter.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Check if JSON format is selected.
    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self.format, Format::Json)
    }

    /// Write a serializable value to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write<W, T>(&self, writer: &mut W, value: &T) -> Result<(), CliError>
    where
        W: Write,
        T: Serialize + TableDisplay,
    {
        match self.format {
            Format::Json => {
                serde_json::to_writer_pretty(&mut *writer, value)
                    .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
                writeln!(writer)?;
            }
            Format::Table => {
                value.write_table(writer)?;
            }
        }
        Ok(())
    }

    /// Render a server result in the given mode.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn render<W: Write>(
        &self,
        writer: &mut W,
        result: &ServerResult,
        mode: RenderMode,
    ) -> Result<(), CliError> {
        self.write(writer, &Rendered { result, mode })
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::new(Format::Table)
    }
}

/// Trait for types that can be displayed as a table.
pub trait TableDisplay {
    /// Write the value as a human-readable table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError>;
}

/// A server result paired with its render mode.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct Rendered<'a> {
    result: &'a ServerResult,
    #[serde(skip)]
    mode: RenderMode,
}

impl TableDisplay for Rendered<'_> {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        match self.mode {
            RenderMode::List => write_list(writer, &rows(self.result)?),
            RenderMode::Show => write_details(writer, self.result),
            RenderMode::Tree => match &self.result.tree {
                Some(tree) => write_tree(writer, tree, 0),
                None => {
                    writeln!(writer, "No tree returned")?;
                    Ok(())
                }
            },
            RenderMode::Command => write_status(writer, self.result),
        }
    }
}

/// Identifier and display name of one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Row {
    id: String,
    name: String,
}

/// Keys of the envelope that are not entity lists.
const ENVELOPE_KEYS: &[&str] = &["statusCode", "statusText", "errors", "tree"];

/// Field that names an entity of each list.
fn name_field(list: &str) -> &'static str {
    match list {
        "modes" => "mode",
        "predicates" => "symbol",
        "users" => "userName",
        _ => "name",
    }
}

fn entity_lists(result: &ServerResult) -> Result<Vec<(String, Vec<Value>)>, CliError> {
    let value = serde_json::to_value(result)
        .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
    let Value::Object(map) = value else {
        return Ok(Vec::new());
    };
    Ok(map
        .into_iter()
        .filter(|(key, _)| !ENVELOPE_KEYS.contains(&key.as_str()))
        .filter_map(|(key, value)| match value {
            Value::Array(items) => Some((key, items)),
            _ => None,
        })
        .collect())
}

fn rows(result: &ServerResult) -> Result<Vec<Row>, CliError> {
    let mut rows = Vec::new();
    for (list, items) in entity_lists(result)? {
        let name_key = name_field(&list);
        for item in items {
            let text = |key: &str| {
                item.get(key)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_owned()
            };
            let mut name = text(name_key);
            if name.is_empty() {
                name = property_name(&item).unwrap_or_default();
            }
            rows.push(Row {
                id: text("id"),
                name,
            });
        }
    }
    Ok(rows)
}

/// Name of whichever property payload is set.
fn property_name(item: &Value) -> Option<String> {
    ["system", "custom", "service", "native", "oncall"]
        .iter()
        .find_map(|key| item.get(key)?.get("name")?.as_str())
        .map(str::to_owned)
}

fn write_list<W: Write>(writer: &mut W, rows: &[Row]) -> Result<(), CliError> {
    if rows.is_empty() {
        writeln!(writer, "No results")?;
        return Ok(());
    }

    if rows.iter().all(|r| r.id.is_empty()) {
        for row in rows {
            writeln!(writer, "{}", row.name)?;
        }
    } else {
        writeln!(writer, "{:<36}  NAME", "ID")?;
        writeln!(writer, "{}", "─".repeat(60))?;
        for row in rows {
            writeln!(writer, "{:<36}  {}", row.id, truncate(&row.name, 40))?;
        }
    }

    writeln!(writer)?;
    writeln!(writer, "Total: {}", rows.len())?;
    Ok(())
}

fn write_details<W: Write>(writer: &mut W, result: &ServerResult) -> Result<(), CliError> {
    let mut first = true;
    for (_, items) in entity_lists(result)? {
        for item in items {
            if !first {
                writeln!(writer)?;
            }
            first = false;
            let Value::Object(fields) = item else {
                writeln!(writer, "{item}")?;
                continue;
            };
            for (key, value) in fields {
                match value {
                    Value::String(s) => writeln!(writer, "{key:<16} {s}")?,
                    other => writeln!(writer, "{key:<16} {other}")?,
                }
            }
        }
    }
    if first {
        writeln!(writer, "No results")?;
    }
    Ok(())
}

fn write_tree<W: Write>(writer: &mut W, node: &TreeNode, depth: usize) -> Result<(), CliError> {
    writeln!(
        writer,
        "{}{} {} ({})",
        "  ".repeat(depth),
        node.kind,
        node.name,
        node.id
    )?;
    for child in &node.children {
        write_tree(writer, child, depth + 1)?;
    }
    Ok(())
}

fn write_status<W: Write>(writer: &mut W, result: &ServerResult) -> Result<(), CliError> {
    let status = if result.status_text.is_empty() {
        "done"
    } else {
        result.status_text.as_str()
    };
    writeln!(writer, "✓ {status}")?;
    for row in rows(result)? {
        if row.id.is_empty() {
            writeln!(writer, "  {}", row.name)?;
        } else {
            writeln!(writer, "  {}  {}", row.id, row.name)?;
        }
    }
    Ok(())
}

/// Truncate a string to a maximum number of characters.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    } else {
        s.chars().take(max_len).collect()
    }
}
