//! Generic server-side list queries for dashboard tables.
//!
//! A `DataTable` is an ordered list of columns over a display row type `R`. Given a
//! base SeaORM select and the request's `ListParams` it applies free-text search,
//! ordering and pagination, then projects every row to `id` plus the declared columns.
//!
//! ```rust,ignore
//! let table = DataTable::<SeminarRow>::new(Expr::col((seminar::Entity, seminar::Column::CreatedAt)))
//!     .column(Field::new("title").column(Expr::col((seminar::Entity, seminar::Column::Title))))
//!     .column(Field::new("schedule").render(|row: &SeminarRow| json!(format_datetime(&row.seminar.schedule))));
//!
//! let page = table.fetch(db, query, &params).await?;
//! ```

pub mod column;

#[cfg(test)]
mod test;

pub use column::{like_insensitive, Column, Field};

use sea_orm::{
    sea_query::{Condition, SimpleExpr},
    DatabaseConnection, DbErr, Order, PaginatorTrait, QueryFilter, QueryOrder, SelectorTrait,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};

use crate::model::datatable::{ListMetaDto, ListResponseDto};

/// Page size used when the request does not specify one.
pub const DEFAULT_PER_PAGE: u64 = 10;

/// Largest page size a request may ask for.
pub const MAX_PER_PAGE: u64 = 1000;

/// A projected display row.
pub type Row = Map<String, Value>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    #[serde(alias = "ASC")]
    Asc,
    #[serde(alias = "DESC")]
    Desc,
}

impl From<SortDirection> for Order {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        }
    }
}

/// Query-string parameters accepted by every list endpoint.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Case-insensitive substring matched against searchable columns
    pub search: Option<String>,
    /// Column name to order by
    pub order_by: Option<String>,
    /// `asc` (default) or `desc`
    pub order: Option<SortDirection>,
    /// Page size; takes precedence over `per_page`
    pub limit: Option<u64>,
    /// Page size
    pub per_page: Option<u64>,
    /// 1-based page number
    pub page: Option<u64>,
}

impl ListParams {
    /// Trimmed search term, `None` when absent or blank.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }

    pub fn direction(&self) -> SortDirection {
        self.order.unwrap_or_default()
    }

    /// Requested page size, falling back to `default`; between 1 and [`MAX_PER_PAGE`].
    pub fn page_size(&self, default: u64) -> u64 {
        self.limit
            .or(self.per_page)
            .unwrap_or(default)
            .clamp(1, MAX_PER_PAGE)
    }

    /// Requested 1-based page; never below 1.
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }
}

/// One page of projected rows plus pagination metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub rows: Vec<Row>,
    pub current_page: u64,
    pub per_page: u64,
    pub total: u64,
    pub last_page: u64,
}

impl Page {
    pub fn into_dto(self) -> ListResponseDto {
        ListResponseDto {
            data: self.rows,
            meta: ListMetaDto {
                current_page: self.current_page,
                per_page: self.per_page,
                total: self.total,
                last_page: self.last_page,
            },
        }
    }
}

pub struct DataTable<R> {
    columns: Vec<Box<dyn Column<R>>>,
    default_order: SimpleExpr,
    per_page: u64,
}

impl<R: Serialize> DataTable<R> {
    /// Creates an empty table ordered by `default_order` descending unless the
    /// request names a known column.
    pub fn new(default_order: impl Into<SimpleExpr>) -> Self {
        Self {
            columns: Vec::new(),
            default_order: default_order.into(),
            per_page: DEFAULT_PER_PAGE,
        }
    }

    pub fn column(mut self, column: impl Column<R> + 'static) -> Self {
        self.columns.push(Box::new(column));
        self
    }

    /// Overrides the default page size.
    pub fn per_page(mut self, per_page: u64) -> Self {
        self.per_page = per_page.clamp(1, MAX_PER_PAGE);
        self
    }

    /// ORs together the match predicates of every searchable column.
    pub fn search<Q: QueryFilter>(&self, query: Q, term: &str) -> Q {
        let condition = self
            .columns
            .iter()
            .filter_map(|column| column.matches(term))
            .fold(Condition::any(), |condition, expr| condition.add(expr));

        if condition.is_empty() {
            query
        } else {
            query.filter(condition)
        }
    }

    /// Orders by the named column, or by the default ordering descending when the
    /// name is absent, unknown or not orderable.
    pub fn order<Q: QueryOrder>(&self, query: Q, order_by: Option<&str>, direction: SortDirection) -> Q {
        let expr = order_by
            .and_then(|name| self.columns.iter().find(|column| column.name() == name))
            .and_then(|column| column.order_expr());

        match expr {
            Some(expr) => query.order_by(expr, direction.into()),
            None => query.order_by(self.default_order.clone(), Order::Desc),
        }
    }

    /// Projects a row to `id` plus every declared column.
    ///
    /// Columns without a render function take the serialized field of the same
    /// name; missing fields become `null`.
    pub fn project(&self, row: &R) -> Row {
        let raw = match serde_json::to_value(row) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };

        let mut projected = Map::new();
        projected.insert(
            "id".to_string(),
            raw.get("id").cloned().unwrap_or(Value::Null),
        );

        for column in &self.columns {
            let value = column
                .render(row)
                .unwrap_or_else(|| raw.get(column.name()).cloned().unwrap_or(Value::Null));
            projected.insert(column.name().to_string(), value);
        }

        projected
    }

    /// Runs search, ordering and pagination against `query` and projects the page.
    ///
    /// # Arguments
    /// - `db` - Database connection
    /// - `query` - Base select, already restricted to live rows and joined as needed
    /// - `params` - Request list parameters
    ///
    /// # Returns
    /// - `Ok(Page)` - Projected rows with `lastPage = ceil(total / perPage)`
    /// - `Err(DbErr)` - Database error
    pub async fn fetch<'db, Q, S>(
        &self,
        db: &'db DatabaseConnection,
        query: Q,
        params: &ListParams,
    ) -> Result<Page, DbErr>
    where
        Q: QueryFilter + QueryOrder + PaginatorTrait<'db, DatabaseConnection, Selector = S>,
        S: SelectorTrait + Send + Sync + 'db,
        S::Item: Into<R>,
    {
        let query = match params.search_term() {
            Some(term) => self.search(query, term),
            None => query,
        };
        let query = self.order(query, params.order_by.as_deref(), params.direction());

        let per_page = params.page_size(self.per_page);
        let current_page = params.page();

        let paginator = query.paginate(db, per_page);
        let total = paginator.num_items().await?;
        // Pages starting past the last row are empty without querying.
        let in_range = (current_page - 1)
            .checked_mul(per_page)
            .is_some_and(|offset| offset < total);
        let items = if in_range {
            paginator.fetch_page(current_page - 1).await?
        } else {
            Vec::new()
        };

        let rows = items
            .into_iter()
            .map(|item| {
                let row: R = item.into();
                self.project(&row)
            })
            .collect();

        Ok(Page {
            rows,
            current_page,
            per_page,
            total,
            last_page: total.div_ceil(per_page),
        })
    }
}
