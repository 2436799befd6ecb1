//! List screen glue.
//!
//! A [`ListScreen`] owns one snapshot of one entity kind and answers every
//! query against it. Results are returned to the caller and never kept on
//! the screen, so two screens (or two views of one screen) never share
//! pagination state.

use ledgerly_export::{ExportArtifact, ExportFormat, ExportSink, Exporter};
use ledgerly_query::{page_window, PageResult, QuerySpec, Record};

use crate::config::ListDefaults;
use crate::error::ScreenError;
use crate::source::{CallerIdentity, CollectionSource, EntityKind};

/// Query and export front end for one entity kind.
///
/// # Example
///
/// ```rust
/// use ledgerly::{InMemorySource, ListScreen, QuerySpec, Record};
///
/// let source = InMemorySource::new().with(
///     "customers",
///     (1..=12).map(|i| Record::new().with("name", format!("Customer {i}"))).collect(),
/// );
///
/// let mut screen = ListScreen::new(source, "customers", "u-1");
/// screen.refresh().unwrap();
///
/// let page = screen.query(&QuerySpec::new().page(2)).unwrap();
/// assert_eq!(page.summary(), "Showing 11-12 of 12");
/// assert_eq!(screen.page_numbers(&page), vec![1, 2]);
/// ```
#[derive(Debug)]
pub struct ListScreen<S> {
    source: S,
    kind: EntityKind,
    caller: CallerIdentity,
    defaults: ListDefaults,
    records: Vec<Record>,
}

impl<S: CollectionSource> ListScreen<S> {
    /// Creates a screen with no snapshot loaded; call [`refresh`](Self::refresh).
    pub fn new(
        source: S,
        kind: impl Into<EntityKind>,
        caller: impl Into<CallerIdentity>,
    ) -> Self {
        ListScreen {
            source,
            kind: kind.into(),
            caller: caller.into(),
            defaults: ListDefaults::default(),
            records: Vec::new(),
        }
    }

    /// Replaces the defaults.
    pub fn with_defaults(mut self, defaults: ListDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// The entity kind shown on this screen.
    pub fn kind(&self) -> &EntityKind {
        &self.kind
    }

    /// The caller collections are fetched for.
    pub fn caller(&self) -> &CallerIdentity {
        &self.caller
    }

    /// The screen's defaults.
    pub fn defaults(&self) -> &ListDefaults {
        &self.defaults
    }

    /// The current snapshot.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Fetches a fresh snapshot and returns its size.
    ///
    /// On failure the previous snapshot is kept.
    pub fn refresh(&mut self) -> Result<usize, ScreenError> {
        self.records = self.source.fetch_collection(&self.kind, &self.caller)?;
        Ok(self.records.len())
    }

    /// A first-page query carrying the screen's defaults.
    pub fn initial_query(&self) -> QuerySpec {
        self.defaults.query()
    }

    /// Runs `spec` against the snapshot and returns the requested page.
    pub fn query(&self, spec: &QuerySpec) -> Result<PageResult<Record>, ScreenError> {
        let rows: Vec<&Record> = self.records.iter().collect();
        Ok(spec.run(&rows)?.map(Record::clone))
    }

    /// Page numbers to render for `page`, using the configured window size.
    pub fn page_numbers<T>(&self, page: &PageResult<T>) -> Vec<usize> {
        page_window(page.current_page, page.total_pages, self.defaults.window_size)
    }

    /// Exports every record matching `spec`, in its sort order.
    ///
    /// The page and page size of `spec` are ignored. `format` falls back to
    /// the configured export format.
    pub fn export<F: AsRef<str>>(
        &self,
        spec: &QuerySpec,
        fields: &[F],
        format: Option<ExportFormat>,
    ) -> Result<ExportArtifact, ScreenError> {
        let rows = self.select(spec);
        Ok(self.exporter(fields, format).export(&rows)?)
    }

    /// Exports like [`export`](Self::export) and hands the artifact to `sink`.
    pub fn export_to<F, K>(
        &self,
        spec: &QuerySpec,
        fields: &[F],
        format: Option<ExportFormat>,
        sink: &mut K,
    ) -> Result<ExportArtifact, ScreenError>
    where
        F: AsRef<str>,
        K: ExportSink + ?Sized,
    {
        let rows = self.select(spec);
        Ok(self.exporter(fields, format).export_to(&rows, sink)?)
    }

    fn select(&self, spec: &QuerySpec) -> Vec<&Record> {
        let rows: Vec<&Record> = self.records.iter().collect();
        spec.select(&rows)
    }

    fn exporter<F: AsRef<str>>(&self, fields: &[F], format: Option<ExportFormat>) -> Exporter {
        Exporter::new(self.kind.as_str())
            .fields(fields.iter().map(|f| f.as_ref().to_string()))
            .format(format.unwrap_or(self.defaults.export_format))
    }
}
