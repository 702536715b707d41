use crate::{
    ArgumentTrace, AsValue, DiagnosticSink, DriverStatement, DumpOptions, Error, Result,
    RowsAffected, Value, ValueFormatter, dumped_sql, printable_sql,
};
use std::{
    fmt::{self, Display},
    sync::Arc,
    time::Instant,
};

/// A logical statement: the caller-visible handle over the ordered set of
/// physical statements produced by the temporal rewrite.
///
/// Created at prepare time by [`TemporalConnection::prepare`] and immutable in
/// shape from then on: the physical set never changes length, and the handles
/// are visited strictly in the rewriter's output order because later
/// statements may depend on side effects of earlier ones.
///
/// # Binding semantics
/// Parameters are addressed by logical 1-based position. With a single
/// physical statement the mapping is the identity. With more than one, the
/// first statement's parameter space is offset by the leading non-temporal
/// parameter count `k`: logical index `i <= k` skips the first statement
/// entirely, logical index `i > k` binds physical index `i - k` there; every
/// later statement always receives the unchanged logical index.
///
/// * `bind` appends at the running position.
/// * `bind_index` sets the parameter at a specific logical position.
///
/// Methods return `&mut Self` for fluent chaining:
/// ```rust,ignore
/// statement.bind(42)?.bind("hello")?;
/// ```
///
/// # Result aggregation
/// `execute_query` consumes only the first physical statement.
/// `execute_update`, `execute` and `execute_batch` drive every physical
/// statement in order and report the result of the last one, not a sum.
///
/// [`TemporalConnection::prepare`]: crate::TemporalConnection::prepare
pub struct TemporalStatement<S: DriverStatement> {
    sql: String,
    rewritten: Vec<String>,
    nontemporal_parameters: i64,
    statements: Vec<S>,
    index: u64,
    trace: ArgumentTrace,
    options: DumpOptions,
    formatter: Arc<dyn ValueFormatter>,
    sink: Arc<dyn DiagnosticSink>,
}

impl<S: DriverStatement> TemporalStatement<S> {
    pub(crate) fn new(
        sql: String,
        rewritten: Vec<String>,
        nontemporal_parameters: i64,
        statements: Vec<S>,
        options: DumpOptions,
        formatter: Arc<dyn ValueFormatter>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            sql,
            rewritten,
            nontemporal_parameters,
            statements,
            index: 1,
            trace: ArgumentTrace::new(),
            options,
            formatter,
            sink,
        }
    }

    /// The logical SQL as the caller prepared it.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The physical statements in execution order.
    pub fn rewritten(&self) -> &[String] {
        &self.rewritten
    }

    /// Leading logical parameters omitted from the first physical statement's
    /// parameter space, `-1` when no remap applies.
    pub fn nontemporal_parameters(&self) -> i64 {
        self.nontemporal_parameters
    }

    /// The logical SQL with every `?` replaced by its traced argument, for
    /// logs only.
    pub fn dumped_sql(&self) -> String {
        dumped_sql(&self.sql, &self.trace)
    }

    /// Append a parameter value at the running position.
    pub fn bind(&mut self, value: impl AsValue) -> Result<&mut Self> {
        let index = self.index;
        self.bind_index(value, index)
    }

    /// Bind a value at the logical position `index` (from 1), routing it to
    /// the right physical statement and position.
    pub fn bind_index(&mut self, value: impl AsValue, index: u64) -> Result<&mut Self> {
        if index < 1 {
            let error = Error::msg("Parameter positions are 1 based, cannot bind index 0");
            log::error!("{:#}", error);
            return Err(error);
        }
        let value = value.as_value();
        // Trace before touching the drivers, a failed bind still shows up in
        // the dumped SQL.
        self.trace_argument(index, &value);
        let multiple = self.statements.len() > 1;
        let mut first = true;
        for statement in self.statements.iter_mut() {
            let bound = if multiple && first {
                first = false;
                let shifted = index as i64 - self.nontemporal_parameters;
                if shifted <= 0 {
                    // The parameter belongs only to the later statements.
                    continue;
                }
                statement.bind(shifted as u64, &value)
            } else {
                statement.bind(index, &value)
            };
            if let Err(error) = bound {
                let error = error.context(format!(
                    "Cannot bind parameter {} in call bind_index({}, {})",
                    index, index, value,
                ));
                log::error!("{:#}", error);
                return Err(error);
            }
        }
        self.index = index + 1;
        Ok(self)
    }

    fn trace_argument(&self, index: u64, value: &Value) {
        let text = match self.formatter.format(value) {
            Ok(text) => text,
            Err(error) => {
                // The formatter must never break the caller, degrade to the
                // plain display form.
                log::debug!("Cannot format the parameter {}: {:#}", index, error);
                value.to_string()
            }
        };
        let text = if self.options.show_type_hints {
            format!("({}){}", value.kind(), text)
        } else {
            text
        };
        self.trace.set((index - 1) as usize, text);
    }

    fn report_translation(&self, method: &str) {
        self.sink
            .statement(&format!("Translate: {:?}", self.rewritten), method);
    }

    /// Execute the query form and return the row set.
    ///
    /// Only the first physical statement produces the caller-visible rows; a
    /// temporal rewrite that feeds the query path yields exactly one physical
    /// statement, so a longer set only means the context statements are
    /// skipped, never an error.
    pub fn execute_query(&mut self) -> Result<S::Rows> {
        let method = "execute_query()";
        let dumped = self.dumped_sql();
        self.sink.statement(&dumped, method);
        self.report_translation(method);
        let start = Instant::now();
        let Some(statement) = self.statements.first_mut() else {
            return Err(Error::msg("The physical statement set is empty"));
        };
        match statement.execute_query() {
            Ok(rows) => {
                self.sink.timing(start.elapsed(), &dumped, method);
                Ok(rows)
            }
            Err(error) => {
                self.sink.failure(&error, start.elapsed(), &dumped, method);
                Err(error)
            }
        }
    }

    /// Execute the update form of every physical statement in order and
    /// return the affected rows of the last one.
    pub fn execute_update(&mut self) -> Result<RowsAffected> {
        let method = "execute_update()";
        let dumped = self.dumped_sql();
        self.sink.statement(&dumped, method);
        self.report_translation(method);
        let start = Instant::now();
        let mut result = RowsAffected::default();
        for statement in self.statements.iter_mut() {
            // Last result wins, the earlier statements only set up context.
            result = match statement.execute_update() {
                Ok(count) => count,
                Err(error) => {
                    self.sink.failure(&error, start.elapsed(), &dumped, method);
                    return Err(error);
                }
            };
        }
        self.sink.timing(start.elapsed(), &dumped, method);
        Ok(result)
    }

    /// Execute the generic form of every physical statement in order and
    /// return the outcome of the last one.
    pub fn execute(&mut self) -> Result<bool> {
        let method = "execute()";
        let dumped = self.dumped_sql();
        self.sink.statement(&dumped, method);
        let start = Instant::now();
        let mut result = false;
        for statement in self.statements.iter_mut() {
            result = match statement.execute() {
                Ok(outcome) => outcome,
                Err(error) => {
                    self.sink.failure(&error, start.elapsed(), &dumped, method);
                    return Err(error);
                }
            };
        }
        self.sink.timing(start.elapsed(), &dumped, method);
        Ok(result)
    }

    /// Queue the current bindings: the dumped SQL lands in the diagnostic
    /// batch queue and every physical statement accumulates its own batch
    /// entry.
    ///
    /// Caveat: across a heterogeneous rewrite sequence the per-statement
    /// batches are forwarded independently, statement-kind alignment between
    /// entries is not verified.
    pub fn add_batch(&mut self) -> Result<&mut Self> {
        self.trace.push_batch(self.dumped_sql());
        for statement in self.statements.iter_mut() {
            if let Err(error) = statement.add_batch() {
                let error = error.context("Cannot queue the current bindings into the batch");
                log::error!("{:#}", error);
                return Err(error);
            }
        }
        Ok(self)
    }

    /// Run every physical statement's accumulated batch in order and return
    /// the counts of the last one.
    pub fn execute_batch(&mut self) -> Result<Vec<RowsAffected>> {
        let method = "execute_batch()";
        let dumped = self.trace.batch().join("\n");
        self.sink.statement(&dumped, method);
        let start = Instant::now();
        let mut result = Vec::new();
        for statement in self.statements.iter_mut() {
            result = match statement.execute_batch() {
                Ok(counts) => counts,
                Err(error) => {
                    self.sink.failure(&error, start.elapsed(), &dumped, method);
                    return Err(error);
                }
            };
        }
        self.trace.clear_batch();
        self.sink.timing(start.elapsed(), &dumped, method);
        Ok(result)
    }

    /// Forget every traced argument and clear the parameters of every
    /// physical statement.
    pub fn clear_parameters(&mut self) -> Result<&mut Self> {
        self.trace.clear();
        self.index = 1;
        for statement in self.statements.iter_mut() {
            if let Err(error) = statement.clear_parameters() {
                let error = error.context("Cannot clear the parameters of a physical statement");
                log::error!("{:#}", error);
                return Err(error);
            }
        }
        Ok(self)
    }

    /// Drop the diagnostic batch queue and every physical statement's
    /// accumulated batch.
    pub fn clear_batch(&mut self) -> Result<&mut Self> {
        self.trace.clear_batch();
        for statement in self.statements.iter_mut() {
            if let Err(error) = statement.clear_batch() {
                let error = error.context("Cannot clear the batch of a physical statement");
                log::error!("{:#}", error);
                return Err(error);
            }
        }
        Ok(self)
    }

    /// Close every physical statement in order. The first failure aborts the
    /// remainder, so later handles stay open and closing is not guaranteed
    /// complete on partial failure.
    pub fn close(&mut self) -> Result<()> {
        for statement in self.statements.iter_mut() {
            if let Err(error) = statement.close() {
                let error = error.context(format!(
                    "Cannot close the statement: {}",
                    printable_sql(&self.sql),
                ));
                log::error!("{:#}", error);
                return Err(error);
            }
        }
        Ok(())
    }
}

impl<S: DriverStatement> fmt::Debug for TemporalStatement<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemporalStatement")
            .field("sql", &self.sql)
            .field("rewritten", &self.rewritten)
            .field("nontemporal_parameters", &self.nontemporal_parameters)
            .field("index", &self.index)
            .field("trace", &self.trace)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<S: DriverStatement> Display for TemporalStatement<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&printable_sql(&self.dumped_sql()))
    }
}
