//! Arrow table of rendered plies, with CSV output and a console preview.

use crate::config::RowLayout;
use crate::error::ConvertError;
use crate::row::GameRow;
use arrow::csv::WriterBuilder;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::util::pretty::pretty_format_batches;
use arrow_array::builder::StringBuilder;
use arrow_array::{ArrayRef, RecordBatch};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Tables longer than this are previewed as head and tail only.
const PREVIEW_MAX_ROWS: usize = 60;
const PREVIEW_EDGE_ROWS: usize = 5;

/// Column names: `Ply 1` .. `Ply N`, then `Result`.
pub fn header(max_plies: usize) -> Vec<String> {
    (1..=max_plies)
        .map(|i| format!("Ply {}", i))
        .chain(std::iter::once("Result".to_string()))
        .collect()
}

pub struct PlyTable {
    schema: SchemaRef,
    max_plies: usize,
    layout: RowLayout,
    rows: Vec<GameRow>,
}

impl PlyTable {
    pub fn new(max_plies: usize, layout: RowLayout) -> Self {
        let fields: Vec<Field> = header(max_plies)
            .into_iter()
            .map(|name| Field::new(name, DataType::Utf8, true))
            .collect();
        PlyTable {
            schema: Arc::new(Schema::new(fields)),
            max_plies,
            layout,
            rows: Vec::new(),
        }
    }

    pub fn from_rows(
        rows: Vec<GameRow>,
        max_plies: usize,
        layout: RowLayout,
    ) -> Result<Self, ConvertError> {
        let mut table = PlyTable::new(max_plies, layout);
        for row in rows {
            table.push(row)?;
        }
        Ok(table)
    }

    pub fn push(&mut self, row: GameRow) -> Result<(), ConvertError> {
        if row.field_count() > self.num_columns() {
            return Err(ConvertError::RowTooWide {
                game: row.index,
                fields: row.field_count(),
                columns: self.num_columns(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn schema(&self) -> SchemaRef {
        self.schema.clone()
    }

    pub fn rows(&self) -> &[GameRow] {
        &self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.max_plies + 1
    }

    /// Cells of one row across all columns, `None` for empty cells.
    fn cells<'a>(&self, row: &'a GameRow) -> Vec<Option<&'a str>> {
        let width = self.num_columns();
        match self.layout {
            RowLayout::Ragged => {
                let mut cells: Vec<Option<&str>> = row.fields().map(Some).collect();
                cells.resize(width, None);
                cells
            }
            RowLayout::Padded => {
                let mut cells: Vec<Option<&str>> =
                    row.plies.iter().map(|p| Some(p.as_str())).collect();
                cells.resize(self.max_plies, None);
                cells.push(Some(row.result.as_str()));
                cells
            }
        }
    }

    fn build_batch<'a, I>(&self, rows: I) -> Result<RecordBatch, ConvertError>
    where
        I: IntoIterator<Item = Vec<Option<&'a str>>>,
    {
        let mut builders: Vec<StringBuilder> = (0..self.num_columns())
            .map(|_| StringBuilder::with_capacity(self.rows.len(), self.rows.len() * 4))
            .collect();

        for cells in rows {
            for (builder, cell) in builders.iter_mut().zip(cells) {
                builder.append_option(cell);
            }
        }

        let columns: Vec<ArrayRef> = builders
            .iter_mut()
            .map(|b| Arc::new(b.finish()) as ArrayRef)
            .collect();
        Ok(RecordBatch::try_new(self.schema.clone(), columns)?)
    }

    pub fn to_record_batch(&self) -> Result<RecordBatch, ConvertError> {
        self.build_batch(self.rows.iter().map(|row| self.cells(row)))
    }

    /// Write the table as CSV with a header row and no index column.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<W, ConvertError> {
        let batch = self.to_record_batch()?;
        let mut csv = WriterBuilder::new().with_header(true).build(writer);
        csv.write(&batch)?;
        Ok(csv.into_inner())
    }

    pub fn write_csv_file(&self, path: impl AsRef<Path>) -> Result<(), ConvertError> {
        let path = path.as_ref();
        let write_err = |source| ConvertError::Write {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(write_err)?;
        let mut writer = self.write_csv(BufWriter::new(file))?;
        writer.flush().map_err(write_err)?;

        info!(
            path = %path.display(),
            rows = self.num_rows(),
            columns = self.num_columns(),
            "wrote csv"
        );
        Ok(())
    }

    /// Human-readable rendering of the table, abbreviated when it is long.
    pub fn preview(&self) -> Result<String, ConvertError> {
        let n = self.rows.len();
        let batch = if n > PREVIEW_MAX_ROWS {
            let ellipsis = vec![Some("..."); self.num_columns()];
            let head = self.rows[..PREVIEW_EDGE_ROWS].iter().map(|r| self.cells(r));
            let tail = self.rows[n - PREVIEW_EDGE_ROWS..]
                .iter()
                .map(|r| self.cells(r));
            self.build_batch(head.chain(std::iter::once(ellipsis)).chain(tail))?
        } else {
            self.to_record_batch()?
        };

        let rendered = pretty_format_batches(&[batch])?;
        Ok(format!(
            "{}\n\n[{} rows x {} columns]",
            rendered,
            n,
            self.num_columns()
        ))
    }
}
