use crate::{Result, RowLabeled, RowsAffected, Value};

/// The blocking contract this layer expects from the wrapped database driver.
///
/// One physical SQL string prepares into one [`DriverStatement`]. Whatever
/// blocking, cancellation or timeout semantics the driver has pass through
/// unchanged, nothing is layered on top.
pub trait DriverConnection {
    type Statement: DriverStatement;

    /// Prepare a single physical SQL statement.
    fn prepare(&mut self, sql: &str) -> Result<Self::Statement>;
}

/// A prepared physical statement handle.
///
/// The proxy assumes query execution returns one row iterator, update
/// execution returns one count, and `close` is safe to call once. Parameter
/// indexes are 1 based, matching the `?` placeholders of the SQL text.
pub trait DriverStatement {
    type Rows: Iterator<Item = Result<RowLabeled>>;

    /// Bind a value at `index` (from 1).
    fn bind(&mut self, index: u64, value: &Value) -> Result<()>;
    /// Run the query form, producing the row set.
    fn execute_query(&mut self) -> Result<Self::Rows>;
    /// Run the update form, producing the affected row count.
    fn execute_update(&mut self) -> Result<RowsAffected>;
    /// Run the generic form; `true` means a row set is available.
    fn execute(&mut self) -> Result<bool>;
    /// Queue the current bindings into this statement's own batch.
    fn add_batch(&mut self) -> Result<()>;
    /// Run the accumulated batch, one count per queued entry.
    fn execute_batch(&mut self) -> Result<Vec<RowsAffected>>;
    /// Remove all previously bound values.
    fn clear_parameters(&mut self) -> Result<()>;
    /// Drop the accumulated batch without running it.
    fn clear_batch(&mut self) -> Result<()>;
    /// Release the handle.
    fn close(&mut self) -> Result<()>;
}
