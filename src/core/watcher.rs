use std::process::ExitCode;

use log::{error, info, warn};

use crate::core::browser::RowSource;
use crate::core::detector;
use crate::core::normalizer::{self, RelevanceFilter};
use crate::core::notifier::{self, Notifier};
use crate::core::store::EntryStore;
use crate::error::watch::Result;
use crate::model::absence_entry::AbsenceEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Everything on the page was already reported.
    NothingNew,
    /// New entries were sent and recorded.
    Reported(Vec<AbsenceEntry>),
    /// New entries were found but the message did not go out; the store is
    /// left untouched so they are retried on the next scheduled run.
    ReportFailed(Vec<AbsenceEntry>),
}

/// One scrape → diff → notify pass.
pub struct Watcher<S, N> {
    filter: RelevanceFilter,
    store: EntryStore,
    source: S,
    notifier: N,
}

impl<S: RowSource, N: Notifier> Watcher<S, N> {
    pub fn new(filter: RelevanceFilter, store: EntryStore, source: S, notifier: N) -> Self {
        Watcher {
            filter,
            store,
            source,
            notifier,
        }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Runs the pipeline once.
    ///
    /// Store and extraction failures are returned as errors. A failed
    /// notification is not an error; it shows up as [`RunOutcome::ReportFailed`].
    pub async fn run(&self) -> Result<RunOutcome> {
        let past = self.store.load_past().await?;
        info!("{} entries already reported", past.len());

        let rows = self.source.fetch_rows().await?;
        let current = self.filter.select(normalizer::normalize_rows(&rows));
        info!("Data extracted: {:?}", current);

        let new_entries = detector::new_in_order(&current, &past);
        if new_entries.is_empty() {
            info!("No new entries");
            return Ok(RunOutcome::NothingNew);
        }
        info!("{} new entries", new_entries.len());

        let message = notifier::render_report(&new_entries);
        if !notifier::notify_best_effort(&self.notifier, &message).await {
            return Ok(RunOutcome::ReportFailed(new_entries));
        }

        self.store
            .save(&detector::merge_history(&past, &current))
            .await?;
        Ok(RunOutcome::Reported(new_entries))
    }

    /// Runs once and maps the result to the process exit status.
    ///
    /// A fatal error gets one best-effort failure message and exit 1. Every
    /// `RunOutcome`, including a report that could not be sent, exits 0.
    pub async fn run_and_report(&self) -> ExitCode {
        match self.run().await {
            Ok(RunOutcome::NothingNew) => ExitCode::SUCCESS,
            Ok(RunOutcome::Reported(entries)) => {
                info!("Reported {} new entries", entries.len());
                ExitCode::SUCCESS
            }
            Ok(RunOutcome::ReportFailed(entries)) => {
                warn!("{} new entries could not be reported", entries.len());
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("Error: {}", e);
                notifier::notify_best_effort(&self.notifier, &notifier::render_failure(&e)).await;
                ExitCode::FAILURE
            }
        }
    }
}
