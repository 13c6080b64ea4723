//! Single-flight flags for async operations

/// Async operation classes that may only run once at a time
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BusyOp {
    Merge,
    Ingest,
}

impl BusyOp {
    /// Human readable operation name
    pub fn label(self) -> &'static str {
        match self {
            BusyOp::Merge => "merge images",
            BusyOp::Ingest => "import files",
        }
    }
}

/// In-flight markers, one per [`BusyOp`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BusyFlags {
    merging: bool,
    ingesting: bool,
}

impl BusyFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if `op` is in flight
    #[inline]
    pub fn is_busy(&self, op: BusyOp) -> bool {
        *self.flag(op)
    }

    /// Mark `op` as started; false when it already is
    pub fn begin(&mut self, op: BusyOp) -> bool {
        let flag = self.flag_mut(op);
        if *flag {
            return false;
        }
        *flag = true;
        true
    }

    /// Mark `op` as finished
    pub fn end(&mut self, op: BusyOp) {
        *self.flag_mut(op) = false;
    }

    fn flag(&self, op: BusyOp) -> &bool {
        match op {
            BusyOp::Merge => &self.merging,
            BusyOp::Ingest => &self.ingesting,
        }
    }

    fn flag_mut(&mut self, op: BusyOp) -> &mut bool {
        match op {
            BusyOp::Merge => &mut self.merging,
            BusyOp::Ingest => &mut self.ingesting,
        }
    }
}
