use sea_orm::sea_query::{Expr, ExprTrait, Func, LikeExpr, SimpleExpr};
use serde_json::Value;

/// A list column with optional search, ordering and render capabilities.
pub trait Column<R>: Send + Sync {
    /// Key of the column in projected rows and the `order_by` parameter.
    fn name(&self) -> &str;

    /// Search predicate for `term`, `None` when the column is not searchable.
    fn matches(&self, term: &str) -> Option<SimpleExpr>;

    /// Ordering expression, `None` when the column cannot be ordered.
    fn order_expr(&self) -> Option<SimpleExpr>;

    /// Display value for `row`, `None` to use the row's field of the same name.
    fn render(&self, row: &R) -> Option<Value>;
}

type FilterFn = Box<dyn Fn(&str) -> SimpleExpr + Send + Sync>;
type RenderFn<R> = Box<dyn Fn(&R) -> Value + Send + Sync>;

/// Substring match on `expr`, with `%`, `_` and `\` in `term` taken literally.
///
/// Only ASCII letters fold case: SQLite's `lower()` leaves other letters as they
/// are, so `é` and `É` match only themselves.
pub fn like_insensitive(expr: impl Into<SimpleExpr>, term: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(&term.to_ascii_lowercase()));
    Expr::expr(Func::lower(expr.into())).like(LikeExpr::new(pattern).escape('\\'))
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// The standard column: searched and ordered by a database expression, rendered
/// by an optional function.
pub struct Field<R> {
    name: String,
    column: Option<SimpleExpr>,
    searchable: bool,
    filter: Option<FilterFn>,
    ordering: Option<SimpleExpr>,
    render: Option<RenderFn<R>>,
}

impl<R> Field<R> {
    /// A column with no database expression; render-only until `column` is set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column: None,
            searchable: true,
            filter: None,
            ordering: None,
            render: None,
        }
    }

    /// Database expression used for search and ordering.
    pub fn column(mut self, expr: impl Into<SimpleExpr>) -> Self {
        self.column = Some(expr.into());
        self
    }

    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    /// Replaces the default substring match.
    pub fn filter(mut self, filter: impl Fn(&str) -> SimpleExpr + Send + Sync + 'static) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Replaces the default ordering expression.
    pub fn ordering(mut self, expr: impl Into<SimpleExpr>) -> Self {
        self.ordering = Some(expr.into());
        self
    }

    pub fn render(mut self, render: impl Fn(&R) -> Value + Send + Sync + 'static) -> Self {
        self.render = Some(Box::new(render));
        self
    }
}

impl<R> Column<R> for Field<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, term: &str) -> Option<SimpleExpr> {
        if !self.searchable {
            return None;
        }

        match (&self.filter, &self.column) {
            (Some(filter), _) => Some(filter(term)),
            (None, Some(column)) => Some(like_insensitive(column.clone(), term)),
            (None, None) => None,
        }
    }

    fn order_expr(&self) -> Option<SimpleExpr> {
        self.ordering.clone().or_else(|| self.column.clone())
    }

    fn render(&self, row: &R) -> Option<Value> {
        self.render.as_ref().map(|render| render(row))
    }
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn escapes_wildcards() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b\\c"), "a\\_b\\\\c");
        assert_eq!(escape_like("école"), "école");
    }
}
