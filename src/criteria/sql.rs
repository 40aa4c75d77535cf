//! Render a [`Criteria`] into PostgreSQL
//!
//! Column names come from the [`SearchField`] enum and are pushed verbatim;
//! every value is a bound parameter.

use sqlx::{Postgres, QueryBuilder};

use super::{Criteria, FieldSorting, Filter, FilterValue, RangeBounds, SearchField};

/// `SELECT <pk> FROM <table> WHERE .. ORDER BY .. LIMIT .. OFFSET ..`
///
/// Fetches [`Criteria::fetch_size`] ids so the caller can derive the
/// next-pages total from the row count.
pub fn select_ids<F: SearchField>(table: &str, criteria: &Criteria<F>) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {} FROM {}", F::primary_key().column(), table));
    push_where(&mut qb, criteria.filters());
    push_order_by(&mut qb, criteria.sorting());
    push_limit_offset(&mut qb, criteria.fetch_size(), criteria.offset());
    qb
}

/// `SELECT COUNT(*) FROM <table> WHERE ..`
pub fn count<F: SearchField>(table: &str, criteria: &Criteria<F>) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", table));
    push_where(&mut qb, criteria.filters());
    qb
}

pub fn push_where<F: SearchField>(qb: &mut QueryBuilder<'static, Postgres>, filters: &[Filter<F>]) {
    for (i, filter) in filters.iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        push_filter(qb, filter);
    }
}

fn push_filter<F: SearchField>(qb: &mut QueryBuilder<'static, Postgres>, filter: &Filter<F>) {
    let column = filter.field().column();
    match filter {
        Filter::Equals { value, .. } => push_equals(qb, column, value),
        Filter::EqualsAny { values, .. } if values.is_empty() => {
            qb.push("FALSE");
        }
        Filter::EqualsAny { values, .. } => {
            qb.push("(");
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    qb.push(" OR ");
                }
                push_equals(qb, column, value);
            }
            qb.push(")");
        }
        Filter::Range { bounds, .. } => push_range(qb, column, bounds),
        Filter::Contains { value, .. } => {
            qb.push(column).push(" ILIKE ");
            qb.push_bind(format!("%{}%", escape_like(value)));
        }
    }
}

fn push_equals(qb: &mut QueryBuilder<'static, Postgres>, column: &str, value: &FilterValue) {
    if matches!(value, FilterValue::Null) {
        qb.push(column).push(" IS NULL");
    } else {
        qb.push(column).push(" = ");
        push_value(qb, value);
    }
}

fn push_range(qb: &mut QueryBuilder<'static, Postgres>, column: &str, bounds: &RangeBounds) {
    if bounds.is_empty() {
        qb.push(column).push(" IS NOT NULL");
        return;
    }
    let parts = [
        (&bounds.gt, " > "),
        (&bounds.gte, " >= "),
        (&bounds.lt, " < "),
        (&bounds.lte, " <= "),
    ];
    qb.push("(");
    let mut first = true;
    for (bound, op) in parts {
        if let Some(value) = bound {
            if !first {
                qb.push(" AND ");
            }
            first = false;
            qb.push(column).push(op);
            push_value(qb, value);
        }
    }
    qb.push(")");
}

fn push_value(qb: &mut QueryBuilder<'static, Postgres>, value: &FilterValue) {
    match value.clone() {
        FilterValue::Uuid(v) => {
            qb.push_bind(v);
        }
        FilterValue::Text(v) => {
            qb.push_bind(v);
        }
        FilterValue::Integer(v) => {
            qb.push_bind(v);
        }
        FilterValue::Decimal(v) => {
            qb.push_bind(v);
        }
        FilterValue::Bool(v) => {
            qb.push_bind(v);
        }
        FilterValue::Timestamp(v) => {
            qb.push_bind(v);
        }
        FilterValue::Null => {
            qb.push("NULL");
        }
    }
}

/// `ORDER BY` the requested sortings, nulls last, then the primary key.
pub fn push_order_by<F: SearchField>(qb: &mut QueryBuilder<'static, Postgres>, sorting: &[FieldSorting<F>]) {
    qb.push(" ORDER BY ");
    for s in sorting {
        qb.push(s.field.column())
            .push(" ")
            .push(s.direction.as_sql())
            .push(" NULLS LAST, ");
    }
    qb.push(F::primary_key().column()).push(" ASC");
}

fn push_limit_offset(qb: &mut QueryBuilder<'static, Postgres>, limit: u64, offset: u64) {
    qb.push(" LIMIT ");
    qb.push_bind(i64::try_from(limit).unwrap_or(i64::MAX));
    qb.push(" OFFSET ");
    qb.push_bind(i64::try_from(offset).unwrap_or(i64::MAX));
}

fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
