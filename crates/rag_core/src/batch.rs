use crate::failure::{Failure, NO_FILES_SELECTED};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadPhase {
    #[default]
    Idle,
    InProgress,
    Succeeded,
    Failed,
}

/// Snapshot of an upload batch as seen by the presentation boundary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadBatchStatus {
    pub total_count: usize,
    pub processed_count: usize,
    pub failure: Option<Failure>,
    pub phase: UploadPhase,
}

impl UploadBatchStatus {
    /// Status of a batch refused before any file was attempted.
    pub fn rejected(failure: Failure) -> Self {
        Self {
            total_count: 0,
            processed_count: 0,
            failure: Some(failure),
            phase: UploadPhase::Failed,
        }
    }

    pub fn remaining(&self) -> usize {
        self.total_count.saturating_sub(self.processed_count)
    }

    pub fn is_settled(&self) -> bool {
        matches!(self.phase, UploadPhase::Succeeded | UploadPhase::Failed)
    }

    /// Human-readable status line, `None` while idle.
    pub fn summary(&self) -> Option<String> {
        match self.phase {
            UploadPhase::Idle => None,
            UploadPhase::InProgress => Some(format!(
                "Uploading {total} file(s)... {done}/{total} done",
                total = self.total_count,
                done = self.processed_count
            )),
            UploadPhase::Succeeded => Some(format!(
                "{} file(s) uploaded successfully.",
                self.processed_count
            )),
            UploadPhase::Failed => Some(match (&self.failure, self.total_count) {
                (Some(failure), 0) => failure.to_string(),
                (Some(failure), total) => format!(
                    "An error occurred: {failure}. {} of {total} file(s) uploaded before the failure.",
                    self.processed_count
                ),
                (None, _) => "An error occurred.".to_string(),
            }),
        }
    }
}

/// Position of a batch in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BatchState {
    #[default]
    Idle,
    /// `index` is the next file to submit; all files before it succeeded.
    Running { index: usize },
    Succeeded,
    /// `index` is the file that failed; all files before it succeeded.
    Failed { index: usize, cause: Failure },
}

/// Sequential, fail-fast upload batch. Files are processed strictly in order
/// and the first failure is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadBatch {
    total: usize,
    state: BatchState,
}

impl UploadBatch {
    /// Starts a batch over `total` files. An empty batch is a validation
    /// failure and never reaches the network.
    pub fn start(total: usize) -> Result<Self, Failure> {
        if total == 0 {
            return Err(Failure::validation(NO_FILES_SELECTED));
        }
        Ok(Self {
            total,
            state: BatchState::Running { index: 0 },
        })
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn state(&self) -> &BatchState {
        &self.state
    }

    /// Index of the file to submit next, if the batch is still running.
    pub fn current(&self) -> Option<usize> {
        match self.state {
            BatchState::Running { index } => Some(index),
            _ => None,
        }
    }

    /// Records success for the current file. No-op once the batch settled.
    pub fn complete_current(&mut self) {
        if let BatchState::Running { index } = self.state {
            let next = index + 1;
            self.state = if next == self.total {
                BatchState::Succeeded
            } else {
                BatchState::Running { index: next }
            };
        }
    }

    /// Records failure for the current file and stops the batch. The first
    /// failure wins; later calls are ignored.
    pub fn fail_current(&mut self, cause: Failure) {
        if let BatchState::Running { index } = self.state {
            self.state = BatchState::Failed { index, cause };
        }
    }

    pub fn processed(&self) -> usize {
        match &self.state {
            BatchState::Idle => 0,
            BatchState::Running { index } | BatchState::Failed { index, .. } => *index,
            BatchState::Succeeded => self.total,
        }
    }

    pub fn status(&self) -> UploadBatchStatus {
        let (phase, failure) = match &self.state {
            BatchState::Idle => (UploadPhase::Idle, None),
            BatchState::Running { .. } => (UploadPhase::InProgress, None),
            BatchState::Succeeded => (UploadPhase::Succeeded, None),
            BatchState::Failed { cause, .. } => (UploadPhase::Failed, Some(cause.clone())),
        };
        UploadBatchStatus {
            total_count: self.total,
            processed_count: self.processed(),
            failure,
            phase,
        }
    }
}
