//! Dynamic SQL for property search.
//!
//! The search statement is assembled from a list of predicates, one per
//! filter that is present. Each predicate owns its parameter, and
//! placeholders are numbered as the predicates are rendered, so a missing
//! filter can never leave a gap in `$1..$n` or a dangling `AND`.
//!
//! Building is pure: nothing here touches the database, which keeps the
//! only branching logic in the query layer unit-testable.

use crate::{error::AppError, models::property::PropertyFilter, services::validate_limit};

/// A value bound to one positional placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Text(String),
    Int(i32),
    BigInt(i64),
    Float(f64),
}

/// A finished statement and its parameters, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

/// `<expr> <op> $n`, with the value that `$n` will carry.
#[derive(Debug)]
struct Predicate {
    expr: &'static str,
    op: &'static str,
    param: SqlParam,
}

/// Hands out `$1`, `$2`, ... while collecting the bound values.
#[derive(Debug, Default)]
struct Placeholders {
    params: Vec<SqlParam>,
}

impl Placeholders {
    fn push(&mut self, param: SqlParam) -> String {
        self.params.push(param);
        format!("${}", self.params.len())
    }

    fn render(&mut self, predicate: Predicate) -> String {
        let placeholder = self.push(predicate.param);
        format!("{} {} {}", predicate.expr, predicate.op, placeholder)
    }
}

const SELECT: &str = "SELECT properties.*, AVG(property_reviews.rating)::float8 AS average_rating\n\
FROM properties\n\
LEFT JOIN property_reviews ON property_reviews.property_id = properties.id";

const AVERAGE_RATING: &str = "AVG(property_reviews.rating)::float8";

/// A property search: filter plus page size.
#[derive(Debug, Clone, Copy)]
pub struct PropertySearch<'a> {
    filter: &'a PropertyFilter,
    limit: i64,
}

impl<'a> PropertySearch<'a> {
    pub fn new(filter: &'a PropertyFilter, limit: i64) -> Self {
        Self { filter, limit }
    }

    /// Validate the filter and render the statement.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` when the limit is outside `1..=100`, a price is
    /// negative or too large to convert to cents, the minimum price is above
    /// the maximum, or the rating is not a number between 0 and 5.
    pub fn build(&self) -> Result<BuiltQuery, AppError> {
        validate_limit(self.limit)?;

        let min_cents = self
            .filter
            .minimum_price_per_night
            .map(|dollars| dollars_to_cents("minimum_price_per_night", dollars))
            .transpose()?;
        let max_cents = self
            .filter
            .maximum_price_per_night
            .map(|dollars| dollars_to_cents("maximum_price_per_night", dollars))
            .transpose()?;

        if let (Some(min), Some(max)) = (min_cents, max_cents) {
            if min > max {
                return Err(AppError::InvalidRequest(
                    "minimum_price_per_night must not exceed maximum_price_per_night".to_string(),
                ));
            }
        }

        if let Some(rating) = self.filter.minimum_rating {
            if !rating.is_finite() || !(0.0..=5.0).contains(&rating) {
                return Err(AppError::InvalidRequest(
                    "minimum_rating must be between 0 and 5".to_string(),
                ));
            }
        }

        let mut where_predicates = Vec::new();

        if let Some(city) = self.city() {
            where_predicates.push(Predicate {
                expr: "properties.city",
                op: "ILIKE",
                param: SqlParam::Text(format!("%{}%", escape_like(city))),
            });
        }

        if let Some(owner_id) = self.filter.owner_id {
            where_predicates.push(Predicate {
                expr: "properties.owner_id",
                op: "=",
                param: SqlParam::Int(owner_id),
            });
        }

        if let Some(cents) = min_cents {
            where_predicates.push(Predicate {
                expr: "properties.cost_per_night",
                op: ">=",
                param: SqlParam::BigInt(cents),
            });
        }

        if let Some(cents) = max_cents {
            where_predicates.push(Predicate {
                expr: "properties.cost_per_night",
                op: "<=",
                param: SqlParam::BigInt(cents),
            });
        }

        let having_predicates: Vec<Predicate> = self
            .filter
            .minimum_rating
            .map(|rating| Predicate {
                expr: AVERAGE_RATING,
                op: ">=",
                param: SqlParam::Float(rating),
            })
            .into_iter()
            .collect();

        let mut placeholders = Placeholders::default();
        let mut lines = vec![SELECT.to_string()];

        if !where_predicates.is_empty() {
            let clauses: Vec<String> = where_predicates
                .into_iter()
                .map(|p| placeholders.render(p))
                .collect();
            lines.push(format!("WHERE {}", clauses.join(" AND ")));
        }

        lines.push("GROUP BY properties.id".to_string());

        if !having_predicates.is_empty() {
            let clauses: Vec<String> = having_predicates
                .into_iter()
                .map(|p| placeholders.render(p))
                .collect();
            lines.push(format!("HAVING {}", clauses.join(" AND ")));
        }

        lines.push("ORDER BY properties.cost_per_night ASC, properties.id ASC".to_string());

        let limit = placeholders.push(SqlParam::BigInt(self.limit));
        lines.push(format!("LIMIT {}", limit));

        Ok(BuiltQuery {
            sql: lines.join("\n"),
            params: placeholders.params,
        })
    }

    /// The city filter, treating a blank string as absent.
    fn city(&self) -> Option<&'a str> {
        self.filter
            .city
            .as_deref()
            .map(str::trim)
            .filter(|city| !city.is_empty())
    }
}

/// Convert a whole-dollar bound to the cents stored in `cost_per_night`.
fn dollars_to_cents(field: &str, dollars: i64) -> Result<i64, AppError> {
    if dollars < 0 {
        return Err(AppError::InvalidRequest(format!(
            "{} must not be negative",
            field
        )));
    }

    dollars
        .checked_mul(100)
        .ok_or_else(|| AppError::InvalidRequest(format!("{} is too large", field)))
}

/// Escape LIKE wildcards so a city name matches literally.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
