use std::sync::{Arc, Mutex};
use tempo::{
    DiagnosticSink, DriverConnection, DriverStatement, Error, Result, RewritePlan, RowLabeled,
    RowNames, RowsAffected, TemporalRewriter, Value,
};

/// Calls recorded by the scripted driver, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Prepare(String),
    Bind {
        statement: usize,
        index: u64,
        value: String,
    },
    Query(usize),
    Update(usize),
    Execute(usize),
    AddBatch(usize),
    ExecuteBatch(usize),
    ClearParameters(usize),
    ClearBatch(usize),
    Close(usize),
}

pub type Journal = Arc<Mutex<Vec<Call>>>;

/// Behavior knobs addressed by the preparation ordinal of each physical
/// statement.
#[derive(Debug, Clone, Default)]
pub struct Script {
    /// Update count returned per ordinal, defaults to ordinal + 1.
    pub update_counts: Vec<u64>,
    /// Outcome of the generic execute per ordinal, defaults to true.
    pub execute_results: Vec<bool>,
    /// Rows returned by the query form, whichever statement runs it.
    pub rows: Vec<RowLabeled>,
    pub fail_prepare: Option<usize>,
    pub fail_bind: Option<usize>,
    pub fail_update: Option<usize>,
    pub fail_close: Option<usize>,
}

pub struct FakeConnection {
    journal: Journal,
    script: Script,
    prepared: usize,
}

impl FakeConnection {
    pub fn new(script: Script) -> Self {
        Self {
            journal: Arc::new(Mutex::new(Vec::new())),
            script,
            prepared: 0,
        }
    }

    pub fn journal(&self) -> Journal {
        self.journal.clone()
    }
}

impl DriverConnection for FakeConnection {
    type Statement = FakeStatement;

    fn prepare(&mut self, sql: &str) -> Result<FakeStatement> {
        let id = self.prepared;
        self.prepared += 1;
        self.journal
            .lock()
            .unwrap()
            .push(Call::Prepare(sql.to_owned()));
        if self.script.fail_prepare == Some(id) {
            return Err(Error::msg("the scripted prepare refused this statement"));
        }
        Ok(FakeStatement {
            id,
            journal: self.journal.clone(),
            script: self.script.clone(),
        })
    }
}

pub struct FakeStatement {
    pub id: usize,
    journal: Journal,
    script: Script,
}

impl FakeStatement {
    fn record(&self, call: Call) {
        self.journal.lock().unwrap().push(call);
    }
}

impl DriverStatement for FakeStatement {
    type Rows = std::vec::IntoIter<Result<RowLabeled>>;

    fn bind(&mut self, index: u64, value: &Value) -> Result<()> {
        self.record(Call::Bind {
            statement: self.id,
            index,
            value: value.to_string(),
        });
        if self.script.fail_bind == Some(self.id) {
            return Err(Error::msg("the scripted bind refused this value"));
        }
        Ok(())
    }

    fn execute_query(&mut self) -> Result<Self::Rows> {
        self.record(Call::Query(self.id));
        Ok(self
            .script
            .rows
            .clone()
            .into_iter()
            .map(Ok)
            .collect::<Vec<_>>()
            .into_iter())
    }

    fn execute_update(&mut self) -> Result<RowsAffected> {
        self.record(Call::Update(self.id));
        if self.script.fail_update == Some(self.id) {
            return Err(Error::msg("the scripted update failed"));
        }
        let count = self
            .script
            .update_counts
            .get(self.id)
            .copied()
            .unwrap_or(self.id as u64 + 1);
        Ok(RowsAffected::new(count))
    }

    fn execute(&mut self) -> Result<bool> {
        self.record(Call::Execute(self.id));
        Ok(self
            .script
            .execute_results
            .get(self.id)
            .copied()
            .unwrap_or(true))
    }

    fn add_batch(&mut self) -> Result<()> {
        self.record(Call::AddBatch(self.id));
        Ok(())
    }

    fn execute_batch(&mut self) -> Result<Vec<RowsAffected>> {
        self.record(Call::ExecuteBatch(self.id));
        let count = self
            .script
            .update_counts
            .get(self.id)
            .copied()
            .unwrap_or(self.id as u64 + 1);
        Ok(vec![RowsAffected::new(count)])
    }

    fn clear_parameters(&mut self) -> Result<()> {
        self.record(Call::ClearParameters(self.id));
        Ok(())
    }

    fn clear_batch(&mut self) -> Result<()> {
        self.record(Call::ClearBatch(self.id));
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.record(Call::Close(self.id));
        if self.script.fail_close == Some(self.id) {
            return Err(Error::msg("the scripted close failed"));
        }
        Ok(())
    }
}

/// Rewriter that replays a fixed plan and records the schema it was called
/// with.
pub struct PlanRewriter {
    pub plan: RewritePlan,
    pub schemas: Arc<Mutex<Vec<String>>>,
}

impl PlanRewriter {
    pub fn new(plan: RewritePlan) -> Self {
        Self {
            plan,
            schemas: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl TemporalRewriter for PlanRewriter {
    fn rewrite(&self, schema: &str, _sql: &str) -> Result<RewritePlan> {
        self.schemas.lock().unwrap().push(schema.to_owned());
        Ok(self.plan.clone())
    }
}

/// Rewriter that always reports a parse failure.
pub struct FailingRewriter;

impl TemporalRewriter for FailingRewriter {
    fn rewrite(&self, _schema: &str, _sql: &str) -> Result<RewritePlan> {
        Err(Error::msg("parse error near FOR SYSTEM_TIME"))
    }
}

/// Sink capturing every report as a `kind|method|sql` line.
pub struct CollectingSink {
    pub events: Arc<Mutex<Vec<String>>>,
}

impl CollectingSink {
    pub fn new() -> (Self, Arc<Mutex<Vec<String>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                events: events.clone(),
            },
            events,
        )
    }
}

impl DiagnosticSink for CollectingSink {
    fn statement(&self, sql: &str, method: &str) {
        self.events
            .lock()
            .unwrap()
            .push(format!("sql|{}|{}", method, sql));
    }

    fn timing(&self, _elapsed: std::time::Duration, sql: &str, method: &str) {
        self.events
            .lock()
            .unwrap()
            .push(format!("time|{}|{}", method, sql));
    }

    fn failure(&self, _error: &Error, _elapsed: std::time::Duration, sql: &str, method: &str) {
        self.events
            .lock()
            .unwrap()
            .push(format!("fail|{}|{}", method, sql));
    }
}

pub fn row(names: &[&str], values: Vec<Value>) -> RowLabeled {
    let names: RowNames = names
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .into();
    RowLabeled::new(names, values.into())
}
