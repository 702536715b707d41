use crate::{
    DiagnosticSink, DriverConnection, DumpOptions, Error, LogReporter, Result,
    SqlLiteralFormatter, TemporalRewriter, TemporalStatement, ValueFormatter, printable_sql,
};
use std::sync::Arc;

/// Wraps the real driver connection together with the temporal rewriter.
///
/// Logical statements are created here, at prepare time: the rewriter turns
/// the incoming SQL into an ordered physical plan, every physical statement
/// is prepared against the real connection, and the result is handed to the
/// caller as one [`TemporalStatement`]. A rewrite or prepare failure aborts
/// the whole construction, nothing half built is observable.
pub struct TemporalConnection<C: DriverConnection, R: TemporalRewriter> {
    connection: C,
    rewriter: R,
    schema: String,
    options: DumpOptions,
    formatter: Arc<dyn ValueFormatter>,
    sink: Arc<dyn DiagnosticSink>,
}

impl<C: DriverConnection, R: TemporalRewriter> TemporalConnection<C, R> {
    pub fn new(connection: C, rewriter: R, schema: impl Into<String>) -> Self {
        Self {
            connection,
            rewriter,
            schema: schema.into(),
            options: DumpOptions::default(),
            formatter: Arc::new(SqlLiteralFormatter),
            sink: Arc::new(LogReporter),
        }
    }

    pub fn with_options(mut self, options: DumpOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_formatter(mut self, formatter: impl ValueFormatter + 'static) -> Self {
        self.formatter = Arc::new(formatter);
        self
    }

    pub fn with_sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// The declared schema name handed to the rewriter on every prepare.
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Direct access to the wrapped driver connection, for the operations
    /// that carry no rewriting concern.
    pub fn connection(&mut self) -> &mut C {
        &mut self.connection
    }

    /// Rewrite `sql` and prepare the resulting physical statement set, in the
    /// rewriter's output order, into one logical statement.
    pub fn prepare(&mut self, sql: &str) -> Result<TemporalStatement<C::Statement>> {
        let plan = match self.rewriter.rewrite(&self.schema, sql) {
            Ok(plan) => plan,
            Err(error) => {
                let error = error.context(format!(
                    "Cannot temporally rewrite: {}",
                    printable_sql(sql),
                ));
                log::error!("{:#}", error);
                return Err(error);
            }
        };
        if plan.statements.is_empty() {
            let error = Error::msg(format!(
                "The rewriter produced no physical statements for: {}",
                printable_sql(sql),
            ));
            log::error!("{:#}", error);
            return Err(error);
        }
        let mut statements = Vec::with_capacity(plan.statements.len());
        for physical in &plan.statements {
            // Any prepare failure drops the handles collected so far.
            match self.connection.prepare(physical) {
                Ok(prepared) => statements.push(prepared),
                Err(error) => {
                    let error = error.context(format!(
                        "Cannot prepare the physical statement: {}",
                        printable_sql(physical),
                    ));
                    log::error!("{:#}", error);
                    return Err(error);
                }
            }
        }
        Ok(TemporalStatement::new(
            sql.to_owned(),
            plan.statements,
            plan.nontemporal_parameters,
            statements,
            self.options,
            self.formatter.clone(),
            self.sink.clone(),
        ))
    }
}
