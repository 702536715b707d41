use crate::Result;

/// Outcome of rewriting one logical statement.
///
/// The statements run in exactly this order; later ones may depend on side
/// effects of earlier ones, so the order is never changed or parallelized.
#[derive(Debug, Clone, PartialEq)]
pub struct RewritePlan {
    /// Physical statements in execution order, never empty.
    pub statements: Vec<String>,
    /// Number of leading logical parameters that belong to clause context
    /// shared with the later statements: when the plan holds more than one
    /// statement, the first statement's own parameter space starts after this
    /// many logical positions. `-1` means single statement, no remap.
    pub nontemporal_parameters: i64,
}

impl RewritePlan {
    /// Plan for a statement that needs no rewriting.
    pub fn passthrough(sql: impl Into<String>) -> Self {
        Self {
            statements: vec![sql.into()],
            nontemporal_parameters: -1,
        }
    }

    /// Plan produced by an actual temporal rewrite. Multi-statement plans must
    /// carry a non-negative parameter count.
    pub fn rewritten(statements: Vec<String>, nontemporal_parameters: i64) -> Self {
        Self {
            statements,
            nontemporal_parameters,
        }
    }
}

/// The temporal-to-physical statement rewriter consumed by this layer.
///
/// Implementations are built over the schema metadata they need; only the
/// declared schema name travels with each call. A parse failure aborts the
/// preparation of the logical statement, nothing half built is observable.
pub trait TemporalRewriter {
    fn rewrite(&self, schema: &str, sql: &str) -> Result<RewritePlan>;
}

/// Rewriter that forwards every statement untouched, for connections whose
/// schema carries no temporal tables.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityRewriter;

impl TemporalRewriter for IdentityRewriter {
    fn rewrite(&self, _schema: &str, sql: &str) -> Result<RewritePlan> {
        Ok(RewritePlan::passthrough(sql))
    }
}
