use crate::types::{Dimension, Predicate, SalaryColumn};

/// Rendered SQL plus its positional parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<i64>,
}

/// Divisor splitting each amount into high and low parts. SQLite's integer
/// `SUM` errors on i64 overflow, so the two partial sums are recombined as
/// `high * SUM_SPLIT + low` in i128. Amounts are non-negative.
pub const SUM_SPLIT: i64 = 1 << 32;

/// `COUNT(*)` and the split `SUM(amount)` over a table, constrained by a
/// conjunction of equality predicates. Identifiers come from `SalaryColumn`,
/// never from input.
pub struct AggregateQuery<'a> {
    table_name: &'static str,
    amount_column: &'static str,
    predicates: &'a [Predicate],
}

impl<'a> AggregateQuery<'a> {
    pub fn new(table_name: &'static str, amount_column: &'static str) -> Self {
        Self {
            table_name,
            amount_column,
            predicates: &[],
        }
    }

    pub fn filter(mut self, predicates: &'a [Predicate]) -> Self {
        self.predicates = predicates;
        self
    }

    pub fn to_sql(&self) -> SqlResult {
        let mut query = format!(
            "SELECT COUNT(*) AS sample_size, \
             COALESCE(SUM(\"{amount}\" / {split}), 0) AS total_high, \
             COALESCE(SUM(\"{amount}\" % {split}), 0) AS total_low \
             FROM \"{table}\"",
            amount = self.amount_column,
            split = SUM_SPLIT,
            table = self.table_name,
        );

        let conditions: Vec<String> = self
            .predicates
            .iter()
            .enumerate()
            .map(|(i, p)| format!("\"{}\" = ?{}", p.column.column_name(), i + 1))
            .collect();
        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        SqlResult {
            query,
            params: self.predicates.iter().map(|p| p.id).collect(),
        }
    }
}

/// Distinct non-null values of a foreign-key column
pub fn distinct_sql(table_name: &str, column: SalaryColumn) -> String {
    format!(
        "SELECT DISTINCT \"{col}\" AS value FROM \"{table}\" WHERE \"{col}\" IS NOT NULL ORDER BY \"{col}\"",
        col = column.column_name(),
        table = table_name,
    )
}

/// Salary rows with every foreign key replaced by its reference label. Joins
/// are left joins, so a dangling or null id reads as a null label.
pub fn salary_view_sql(table_name: &str) -> String {
    let joined: Vec<(Dimension, SalaryColumn)> = Dimension::ALL
        .iter()
        .filter_map(|d| d.salary_column().map(|c| (*d, c)))
        .collect();

    let labels: Vec<String> = joined
        .iter()
        .map(|(d, c)| format!("\"{}\".\"{}\" AS \"{}\"", d.table_name(), d.label_column(), c.column_name()))
        .collect();
    let joins: String = joined
        .iter()
        .map(|(d, c)| {
            format!(
                " LEFT JOIN \"{t}\" ON \"{t}\".id = s.\"{col}\"",
                t = d.table_name(),
                col = c.column_name()
            )
        })
        .collect();

    format!(
        "SELECT s.id, s.year, s.salary_in_usd, {}, s.created_date, s.updated_date FROM \"{}\" s{}",
        labels.join(", "),
        table_name,
        joins
    )
}
