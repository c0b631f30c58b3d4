//! Cart Snapshot

use std::io;

use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use crate::{catalog::ItemId, pricing::format_price};

/// A priced cart line, frozen at the time the snapshot was taken.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotLine {
    pub(crate) item_id: ItemId,
    pub(crate) display_name: String,
    pub(crate) unit_price: Money<'static, Currency>,
    pub(crate) quantity: u32,
    pub(crate) line_total: Money<'static, Currency>,
}

impl SnapshotLine {
    /// Item id
    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    /// Display name at snapshot time
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Price of one unit
    pub fn unit_price(&self) -> &Money<'static, Currency> {
        &self.unit_price
    }

    /// Quantity ordered
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// `unit_price × quantity`
    pub fn line_total(&self) -> &Money<'static, Currency> {
        &self.line_total
    }
}

/// Cart contents and total, as seen when checkout was opened.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSnapshot {
    pub(crate) lines: Vec<SnapshotLine>,
    pub(crate) total: Money<'static, Currency>,
}

impl CartSnapshot {
    /// Lines in display order
    pub fn lines(&self) -> &[SnapshotLine] {
        &self.lines
    }

    /// Order total
    pub fn total(&self) -> &Money<'static, Currency> {
        &self.total
    }

    /// Total number of units across all lines
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Whether the snapshot has no lines
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Writes the snapshot as an order summary table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write) -> io::Result<()> {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Qty", "Unit Price", "Line Total"]);

        for (idx, line) in self.lines.iter().enumerate() {
            builder.push_record([
                format!("#{:<3}", idx + 1),
                line.display_name.clone(),
                line.quantity.to_string(),
                format_price(&line.unit_price),
                format_price(&line.line_total),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(2..5), Alignment::right());

        writeln!(out, "\n{table}")?;
        writeln!(out, " Total: {}", format_price(&self.total))?;

        Ok(())
    }
}
