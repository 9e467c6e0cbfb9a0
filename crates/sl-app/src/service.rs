//! The contract exposed to the presentation/transport shell.

use std::path::PathBuf;

use sl_core::{CurveBundle, FlatBundle};
use sl_pipeline::ProcessingOptions;
use sl_results::{HistorySummary, Metadata, ResultStore};
use tracing::info;

use crate::error::AppResult;
use crate::lifecycle::{GatePermit, OperationClass, OperationGate, Status, StatusBoard};

/// Service facade: pipeline, history store, per-operation gates and the
/// status board, behind one handle the shell can share.
pub struct SpectraLab {
    store: ResultStore,
    preview_gate: OperationGate,
    save_gate: OperationGate,
    status: StatusBoard,
}

impl SpectraLab {
    pub fn new(history_dir: PathBuf) -> AppResult<Self> {
        Ok(Self {
            store: ResultStore::new(history_dir)?,
            preview_gate: OperationGate::new(OperationClass::Preview),
            save_gate: OperationGate::new(OperationClass::Save),
            status: StatusBoard::new(),
        })
    }

    /// Current transient status, if one is posted and unexpired.
    pub fn status(&self) -> Option<Status> {
        self.status.current()
    }

    /// Claim an operation gate directly. The shell can use this to guard
    /// work of its own under the same exclusivity rules.
    pub fn begin(&self, class: OperationClass) -> AppResult<GatePermit<'_>> {
        match class {
            OperationClass::Preview => self.preview_gate.try_acquire(),
            OperationClass::Save => self.save_gate.try_acquire(),
        }
    }

    /// Run the correction/smoothing pipeline over three raw captures and
    /// return the flat wire shape. Guarded: a concurrent duplicate is
    /// rejected with `Busy` and leaves the running request untouched.
    pub fn process(
        &self,
        sample: &[u8],
        water: &[u8],
        dark: &[u8],
        options: &ProcessingOptions,
    ) -> AppResult<FlatBundle> {
        let _permit = self.preview_gate.try_acquire()?;
        self.status.post_info("Processing captures");

        match sl_pipeline::run(sample, water, dark, options) {
            Ok(bundle) => {
                info!(
                    samples = bundle.len(),
                    curves = bundle.curve_count(),
                    "processing finished"
                );
                self.status.post_success("Processing finished");
                Ok(bundle.to_flat())
            }
            Err(err) => {
                self.status.post_error(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Persist a processed result under `name`. Guarded independently of
    /// `process`.
    pub fn save(
        &self,
        name: &str,
        data: &FlatBundle,
        metadata: Metadata,
    ) -> AppResult<HistorySummary> {
        let _permit = self.save_gate.try_acquire()?;
        self.status.post_info("Saving result");

        let outcome: AppResult<_> = CurveBundle::from_flat(data)
            .map_err(Into::into)
            .and_then(|bundle| Ok(self.store.save(name, &bundle, metadata)?));

        match outcome {
            Ok(result) => {
                info!(name = %result.name, "result saved");
                self.status.post_success(format!("Saved '{}'", result.name));
                Ok(result.summary())
            }
            Err(err) => {
                self.status.post_error(err.to_string());
                Err(err)
            }
        }
    }

    /// History summaries, most recent first.
    pub fn history(&self) -> AppResult<Vec<HistorySummary>> {
        Ok(self.store.list()?)
    }

    /// One stored entry as `(metadata, flat data)`.
    pub fn history_item(&self, name: &str) -> AppResult<(Metadata, FlatBundle)> {
        let result = self.store.load(name)?;
        Ok((result.metadata, result.bundle.to_flat()))
    }

    pub fn export_csv(&self, name: &str) -> AppResult<Vec<u8>> {
        Ok(self.store.export_csv(name)?)
    }

    pub fn export_batch(&self) -> AppResult<Vec<u8>> {
        Ok(self.store.export_batch()?)
    }

    pub fn delete(&self, name: &str) -> AppResult<()> {
        Ok(self.store.delete(name)?)
    }
}
