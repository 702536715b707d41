use std::sync::{Mutex, MutexGuard, PoisonError};

/// Per-statement diagnostic state: the argument trace and the queue of dumped
/// batch entries.
///
/// Both live behind one mutex scoped to the logical statement, because bind
/// and batch calls may race on the same statement from concurrent callers.
/// The lock is held only around the read/write/clear itself, never across a
/// driver call. Nothing here ever fails the caller.
#[derive(Debug, Default)]
pub struct ArgumentTrace {
    state: Mutex<TraceState>,
}

#[derive(Debug, Default)]
struct TraceState {
    /// Dense 0-based map from logical parameter index to display string,
    /// gap-filled so out-of-order binding stays representable.
    args: Vec<Option<String>>,
    /// Dumped SQL per queued batch entry, diagnostics only. The actual batch
    /// state is accumulated independently by each physical statement.
    batch: Vec<String>,
}

impl ArgumentTrace {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, TraceState> {
        // A poisoned trace only means a panic happened mid-write somewhere
        // else, the data itself stays usable for diagnostics.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store the display form of the argument at `index` (0 based), growing
    /// the trace and filling any gap with empty markers.
    pub fn set(&self, index: usize, text: String) {
        let mut state = self.lock();
        if index >= state.args.len() {
            state.args.resize(index + 1, None);
        }
        state.args[index] = Some(text);
    }

    /// Display form of the argument at `index`, if one was traced.
    pub fn get(&self, index: usize) -> Option<String> {
        self.lock().args.get(index).cloned().flatten()
    }

    /// Number of trace slots, including gap fillers.
    pub fn len(&self) -> usize {
        self.lock().args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().args.is_empty()
    }

    /// Forget every traced argument.
    pub fn clear(&self) {
        self.lock().args.clear();
    }

    pub fn push_batch(&self, sql: String) {
        self.lock().batch.push(sql);
    }

    /// Snapshot of the queued batch dumps.
    pub fn batch(&self) -> Vec<String> {
        self.lock().batch.clone()
    }

    pub fn clear_batch(&self) {
        self.lock().batch.clear();
    }
}
