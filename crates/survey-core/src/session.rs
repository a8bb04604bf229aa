//! The per-user session value.

use std::borrow::Cow;
use std::path::Path;

use chrono::{Local, NaiveDateTime};
use polars::prelude::DataFrame;
use survey_common::format_file_size;
use survey_history::{HistoryEntry, HistoryManager};
use survey_ingest::{SAMPLE_DATA_FILE, Upload, load_csv_file, load_sample_data};
use survey_model::{AgeGroupSelector, ExportFormat, SessionConfig};
use survey_output::{ExportArtifact, Exporter};
use survey_transform::optimize_memory;
use survey_validate::{age_groups, check_survey, filter_by_age_group, selector_for_label};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{Result, SessionError};

/// History, current filter and exporter for one dashboard user.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    history: HistoryManager,
    exporter: Exporter,
    filter: AgeGroupSelector,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            history: HistoryManager::new(config.max_history),
            exporter: Exporter::from_config(&config),
            filter: AgeGroupSelector::All,
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn exporter(&self) -> &Exporter {
        &self.exporter
    }

    pub fn age_filter(&self) -> &AgeGroupSelector {
        &self.filter
    }

    /// Loads a CSV file from disk and makes it current.
    pub fn load_path(&mut self, path: &Path) -> Result<Uuid> {
        let df = load_csv_file(path)?;
        let file_size = std::fs::metadata(path)
            .map(|meta| format_file_size(meta.len()))
            .unwrap_or_default();
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.admit(filename, df, file_size)
    }

    /// Loads the bundled sample table from the configured data directory.
    pub fn load_sample(&mut self) -> Result<Uuid> {
        let df = load_sample_data(&self.config.data_dir)?;
        self.admit(SAMPLE_DATA_FILE.to_string(), df, String::new())
    }

    /// Decodes an uploaded CSV blob and makes it current.
    pub fn load_upload(&mut self, filename: &str, bytes: &[u8]) -> Result<Uuid> {
        let upload = Upload::from_bytes(filename, bytes)?;
        self.admit(upload.filename, upload.df, upload.file_size)
    }

    fn admit(&mut self, filename: String, df: DataFrame, file_size: String) -> Result<Uuid> {
        let optimized = optimize_memory(&df)?;
        let report = check_survey(&optimized.frame, &self.config.schema);
        if !report.is_valid() {
            warn!(filename = %filename, issues = report.issue_count(), "rejected upload: {report}");
            return Err(SessionError::InvalidSchema(report));
        }

        let id = self.history.add(filename, &optimized.frame, file_size);
        self.filter = AgeGroupSelector::All;
        Ok(id)
    }

    /// Makes a listed history entry current.
    pub fn select(&mut self, id: Uuid) -> Result<()> {
        if self.history.get_entry(id).is_none() {
            return Err(SessionError::UnknownEntry(id));
        }
        if !self.history.is_current(id) {
            self.filter = AgeGroupSelector::All;
        }
        self.history.set_current(id);
        Ok(())
    }

    /// Removes an entry; unknown ids are ignored.
    pub fn delete(&mut self, id: Uuid) {
        let was_current = self.history.is_current(id);
        self.history.delete(id);
        if was_current {
            self.filter = AgeGroupSelector::All;
        }
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.filter = AgeGroupSelector::All;
        if let Some(cache) = self.exporter.cache_mut() {
            cache.clear();
        }
        info!("cleared session history");
    }

    pub fn set_age_filter(&mut self, selector: AgeGroupSelector) {
        debug!(age_group = %selector, "age filter changed");
        self.filter = selector;
    }

    /// Sets the filter from a menu label, `None` or `"all"` meaning every group.
    pub fn set_age_filter_label(&mut self, label: Option<&str>) {
        let selector = match self.history.current_data() {
            Some(df) => selector_for_label(df, &self.config.schema, label),
            None => AgeGroupSelector::from_label(label),
        };
        self.set_age_filter(selector);
    }

    pub fn current_entry(&self) -> Option<&HistoryEntry> {
        self.history.current_entry()
    }

    /// Age groups present in the current dataset, ascending.
    pub fn available_age_groups(&self) -> Result<Vec<String>> {
        match self.history.current_data() {
            Some(df) => Ok(age_groups(df, &self.config.schema)?),
            None => Ok(Vec::new()),
        }
    }

    /// The current dataset narrowed by the age filter.
    pub fn current_view(&self) -> Result<Option<Cow<'_, DataFrame>>> {
        let Some(df) = self.history.current_data() else {
            return Ok(None);
        };
        Ok(Some(filter_by_age_group(
            df,
            &self.config.schema,
            &self.filter,
        )?))
    }

    /// Exports the current view, named with the local time.
    pub fn export_current(&mut self, format: ExportFormat) -> Result<ExportArtifact> {
        self.export_current_at(format, Local::now().naive_local())
    }

    pub fn export_current_at(
        &mut self,
        format: ExportFormat,
        when: NaiveDateTime,
    ) -> Result<ExportArtifact> {
        let Some(df) = self.history.current_data() else {
            return Err(SessionError::NothingToExport);
        };
        let view = filter_by_age_group(df, &self.config.schema, &self.filter)?;
        if view.height() == 0 {
            return Err(SessionError::NothingToExport);
        }
        Ok(self
            .exporter
            .export_at(&view, format, &self.config.size_limits, when)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SURVEY_CSV: &str = "respondent_id,age_group,soccer,baseball,tennis\n\
                              1,20代,5,4,3\n\
                              2,30代,4,5,4\n\
                              3,20代,3,4,5\n";

    #[test]
    fn upload_becomes_current() {
        let mut session = Session::default();
        let id = session
            .load_upload("survey.csv", SURVEY_CSV.as_bytes())
            .unwrap();
        assert_eq!(session.history().current_id(), Some(id));
        let entry = session.current_entry().unwrap();
        assert_eq!(entry.filename, "survey.csv");
        assert_eq!(entry.row_count, 3);
    }

    #[test]
    fn invalid_upload_is_not_stored() {
        let mut session = Session::default();
        let result = session.load_upload("bad.csv", b"a,b\n1,2\n");
        assert!(matches!(result, Err(SessionError::InvalidSchema(_))));
        assert!(session.history().is_empty());
    }

    #[test]
    fn select_unknown_id_is_error() {
        let mut session = Session::default();
        let id = Uuid::new_v4();
        assert!(matches!(
            session.select(id),
            Err(SessionError::UnknownEntry(missing)) if missing == id
        ));
    }

    #[test]
    fn filter_narrows_view() {
        let mut session = Session::default();
        session
            .load_upload("survey.csv", SURVEY_CSV.as_bytes())
            .unwrap();
        session.set_age_filter_label(Some("20代"));
        let view = session.current_view().unwrap().unwrap();
        assert_eq!(view.height(), 2);

        session.set_age_filter_label(Some("all"));
        let view = session.current_view().unwrap().unwrap();
        assert_eq!(view.height(), 3);
    }

    #[test]
    fn empty_session_has_no_view() {
        let session = Session::default();
        assert!(session.current_view().unwrap().is_none());
        assert!(session.available_age_groups().unwrap().is_empty());
    }
}
