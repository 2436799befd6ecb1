//! Flat-file encoding of record sequences.
//!
//! Export never limits or paginates: callers hand in the full filtered and
//! sorted sequence and get every record back as one row.

use std::collections::HashSet;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use ledgerly_query::Seekable;

use crate::artifact::ExportArtifact;
use crate::cell::{cell_json, row_text};
use crate::error::{ExportError, Result};
use crate::format::ExportFormat;
use crate::sink::ExportSink;

/// Encodes `records` as delimited text.
///
/// Every value, headers included, is wrapped in double quotes, embedded
/// quotes are doubled, and missing values are written as `""`. The header
/// row comes first and rows are separated by `\n` with no trailing newline.
/// With no columns the output is empty. Two columns with the same name are
/// rejected with [`ExportError::DuplicateColumn`], as in [`to_json`].
///
/// # Example
///
/// ```
/// use ledgerly_export::to_csv;
/// use ledgerly_query::Record;
///
/// let rows = vec![
///     Record::new().with("name", "Model \"X\"").with("price", 10i64),
///     Record::new().with("name", "Plain"),
/// ];
/// let csv = to_csv(&rows, &["name", "price"], None).unwrap();
/// assert_eq!(csv, "\"name\",\"price\"\n\"Model \"\"X\"\"\",\"10\"\n\"Plain\",\"\"");
/// ```
pub fn to_csv<T, S>(records: &[T], fields: &[S], headers: Option<&[String]>) -> Result<String>
where
    T: Seekable,
    S: AsRef<str>,
{
    if fields.is_empty() {
        return Ok(String::new());
    }

    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(vec![]);

    wtr.write_record(column_names(fields, headers)?)?;
    for record in records {
        wtr.write_record(row_text(record, fields))?;
    }

    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    let mut text = String::from_utf8(bytes)?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

/// Encodes `records` as a pretty-printed JSON array of flat objects.
///
/// Each object holds exactly the requested columns, keyed by column name in
/// column order. Missing values become `""`, matching the delimited form.
/// Two columns with the same name are rejected with
/// [`ExportError::DuplicateColumn`].
pub fn to_json<T, S>(records: &[T], fields: &[S], headers: Option<&[String]>) -> Result<String>
where
    T: Seekable,
    S: AsRef<str>,
{
    let names = column_names(fields, headers)?;
    let rows: Vec<serde_json::Map<String, serde_json::Value>> = records
        .iter()
        .map(|record| {
            fields
                .iter()
                .zip(&names)
                .map(|(field, name)| (name.clone(), cell_json(record.lookup(field.as_ref()))))
                .collect()
        })
        .collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

/// Encodes `records` in `format` with the given column paths.
///
/// The artifact is named `export.<ext>`; use [`Exporter`] to name it after
/// an entity kind or relabel the columns.
pub fn export_flat<T, S>(records: &[T], fields: &[S], format: ExportFormat) -> Result<ExportArtifact>
where
    T: Seekable,
    S: AsRef<str>,
{
    let fields: Vec<String> = fields.iter().map(|f| f.as_ref().to_string()).collect();
    Exporter::new("export")
        .fields(fields)
        .format(format)
        .export(records)
}

/// Column header text: a label where one is given, the dot-path otherwise.
/// Names must be unique.
fn column_names<S: AsRef<str>>(fields: &[S], headers: Option<&[String]>) -> Result<Vec<String>> {
    let names: Vec<String> = fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            headers
                .and_then(|labels| labels.get(i))
                .cloned()
                .unwrap_or_else(|| field.as_ref().to_string())
        })
        .collect();

    let mut seen = HashSet::new();
    if let Some(name) = names.iter().find(|name| !seen.insert(name.as_str())) {
        return Err(ExportError::DuplicateColumn { name: name.clone() });
    }
    Ok(names)
}

/// Builder for export artifacts of one entity kind.
///
/// # Example
///
/// ```
/// use ledgerly_export::{ExportFormat, Exporter};
/// use ledgerly_query::Record;
///
/// let customers = vec![Record::new()
///     .with("name", "Ada")
///     .with("address", Record::new().with("city", "London"))];
///
/// let artifact = Exporter::new("customers")
///     .fields(["name", "address.city"])
///     .labels(["Name", "City"])
///     .format(ExportFormat::Csv)
///     .export(&customers)
///     .unwrap();
///
/// assert_eq!(artifact.filename, "customers.csv");
/// assert_eq!(artifact.body, "\"Name\",\"City\"\n\"Ada\",\"London\"");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exporter {
    entity_kind: String,
    fields: Vec<String>,
    labels: Option<Vec<String>>,
    format: ExportFormat,
}

impl Exporter {
    /// Creates an exporter for an entity kind, such as `"orders"`.
    pub fn new(entity_kind: impl Into<String>) -> Self {
        Exporter {
            entity_kind: entity_kind.into(),
            fields: Vec::new(),
            labels: None,
            format: ExportFormat::default(),
        }
    }

    /// Sets the ordered column dot-paths.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Overrides column names, by position. Columns without a label keep
    /// their dot-path as name.
    pub fn labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the output format.
    pub fn format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    /// The configured columns.
    pub fn columns(&self) -> &[String] {
        &self.fields
    }

    /// Suggested file name: `<entity kind>.<ext>`.
    pub fn filename(&self) -> String {
        format!("{}.{}", self.entity_kind, self.format.extension())
    }

    /// Encodes every record into an artifact.
    pub fn export<T: Seekable>(&self, records: &[T]) -> Result<ExportArtifact> {
        let headers = self.labels.as_deref();
        let body = match self.format {
            ExportFormat::Csv => to_csv(records, &self.fields, headers)?,
            ExportFormat::Json => to_json(records, &self.fields, headers)?,
        };
        Ok(ExportArtifact {
            filename: self.filename(),
            format: self.format,
            body,
        })
    }

    /// Encodes every record and hands the artifact to `sink`.
    ///
    /// Fails with [`ExportError::ExportUnavailable`](crate::ExportError::ExportUnavailable)
    /// before encoding anything if the sink cannot take this format.
    pub fn export_to<T, K>(&self, records: &[T], sink: &mut K) -> Result<ExportArtifact>
    where
        T: Seekable,
        K: ExportSink + ?Sized,
    {
        sink.check(self.format)?;
        let artifact = self.export(records)?;
        sink.deliver(&artifact)?;
        Ok(artifact)
    }
}
