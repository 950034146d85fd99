//! Menu command: fill in the brand onboarding menu templates form.

use std::io::Write;
use std::str::FromStr;

use anyhow::{Context, Result};
use chise_core::{MenuField, MenuForm};

/// A `FIELD=VALUE` pair from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
    pub field: MenuField,
    pub value: String,
}

impl FromStr for FieldValue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected FIELD=VALUE, got `{s}`"))?;
        let field = field.trim().parse::<MenuField>().map_err(|e| e.to_string())?;
        Ok(Self {
            field,
            value: value.to_string(),
        })
    }
}

/// Runs the menu command.
pub fn run<W: Write>(
    writer: &mut W,
    files: &[FieldValue],
    notes: &[FieldValue],
    list: bool,
) -> Result<()> {
    if list {
        for field in MenuField::ALL {
            writeln!(writer, "{:<20} {}", field.key(), field.label())?;
            writeln!(writer, "{:<20} {}", "", field.note())?;
        }
        return Ok(());
    }

    let mut form = MenuForm::new();
    for FieldValue { field, value } in files {
        form.set_file(*field, value.as_str());
    }
    for FieldValue { field, value } in notes {
        form.set_notes(*field, value.as_str());
    }

    serde_json::to_writer_pretty(&mut *writer, &form.to_json()).context("failed to write JSON")?;
    writeln!(writer)?;
    Ok(())
}
