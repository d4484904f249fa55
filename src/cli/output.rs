//! Output formatting utilities

use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::borrow::Cow;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::helpers::truncate_str;
use crate::cli::OutputFormat;

/// Widest a name column gets in table output
const TABLE_NAME_WIDTH: usize = 48;

/// Determine the effective output format based on context
pub fn effective_format(format: OutputFormat, is_list: bool) -> OutputFormat {
    match format {
        OutputFormat::Auto => {
            if is_list {
                OutputFormat::Tsv
            } else {
                OutputFormat::Yaml
            }
        }
        other => other,
    }
}

/// A set line in list output
#[derive(Debug, Clone, Serialize)]
pub struct SetRow {
    pub id: String,
    pub name: String,
    pub pieces: Option<u64>,
}

impl Tabled for SetRow {
    const LENGTH: usize = 3;

    fn fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.id.as_str()),
            Cow::Borrowed(self.name.as_str()),
            Cow::Owned(self.pieces.map(|p| p.to_string()).unwrap_or_default()),
        ]
    }

    fn headers() -> Vec<Cow<'static, str>> {
        vec!["ID".into(), "NAME".into(), "PIECES".into()]
    }
}

/// Print a value as JSON or YAML
pub fn print_structured<T: Serialize>(value: &T, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value).into_diagnostic()?;
            println!("{}", json);
        }
        _ => {
            let yaml = serde_yml::to_string(value).into_diagnostic()?;
            print!("{}", yaml);
        }
    }
    Ok(())
}

/// Print rows in any list format
///
/// `format` must already be resolved (not `Auto`).
pub fn print_rows<T: Serialize + Tabled>(rows: &[T], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json | OutputFormat::Yaml | OutputFormat::Auto => {
            print_structured(&rows, format)?;
        }
        OutputFormat::Tsv => {
            for row in rows {
                let mut fields: Vec<String> =
                    row.fields().into_iter().map(|f| f.into_owned()).collect();
                while fields.last().is_some_and(|f| f.is_empty()) {
                    fields.pop();
                }
                println!("{}", fields.join("\t"));
            }
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            for row in rows {
                writer.serialize(row).into_diagnostic()?;
            }
            writer.flush().into_diagnostic()?;
        }
        OutputFormat::Table => {
            let mut table = Table::new(rows);
            table.with(Style::sharp());
            println!("{}", table);
        }
    }
    Ok(())
}

impl SetRow {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            pieces: None,
        }
    }

    pub fn with_pieces(mut self, pieces: u64) -> Self {
        self.pieces = Some(pieces);
        self
    }

    /// Shorten the name for fixed-width table output
    pub fn for_table(mut self) -> Self {
        self.name = truncate_str(&self.name, TABLE_NAME_WIDTH);
        self
    }
}
