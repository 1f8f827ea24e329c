use entity::seminar;
use sea_orm::{sea_query::Expr, DbErr, EntityTrait};
use serde_json::json;
use test_utils::{builder::TestBuilder, factory::{helpers::at, seminar::SeminarFactory}};

use super::{like_insensitive, DataTable, Field, ListParams, SortDirection};

fn table() -> DataTable<seminar::Model> {
    DataTable::new(Expr::col((seminar::Entity, seminar::Column::CreatedAt)))
        .column(Field::new("title").column(Expr::col((seminar::Entity, seminar::Column::Title))))
        .column(
            Field::new("description")
                .column(Expr::col((seminar::Entity, seminar::Column::Description)))
                .searchable(false),
        )
        .column(
            Field::new("headline")
                .filter(|term| {
                    like_insensitive(Expr::col((seminar::Entity, seminar::Column::Description)), term)
                })
                .ordering(Expr::col((seminar::Entity, seminar::Column::Schedule)))
                .render(|row: &seminar::Model| json!(row.title.to_uppercase())),
        )
        .column(Field::new("not_a_field"))
}

/// Tests that search ORs searchable columns and custom filters.
///
/// The description column is not searchable, but the custom filter on `headline`
/// matches descriptions, so a description hit still counts.
///
/// Expected: title and description matches both returned
#[tokio::test]
async fn search_ors_columns_and_custom_filters() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_seminar_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    SeminarFactory::new(db).title("Ledger Lab").build().await?;
    SeminarFactory::new(db)
        .title("Workshop")
        .description("Hands-on ledger practice")
        .build()
        .await?;
    SeminarFactory::new(db).title("Unrelated").build().await?;

    let page = table()
        .fetch(
            db,
            seminar::Entity::find(),
            &ListParams {
                search: Some("  LEDGER ".to_string()),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(page.total, 2);
    for row in &page.rows {
        assert_ne!(row["title"], "Unrelated");
    }

    Ok(())
}

/// Tests row projection: render functions, raw fields and missing fields.
///
/// Expected: rendered headline, raw title, null for the unknown field
#[tokio::test]
async fn projects_rendered_raw_and_missing_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_seminar_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    SeminarFactory::new(db).title("Audit Prep").build().await?;

    let page = table()
        .fetch(db, seminar::Entity::find(), &ListParams::default())
        .await?;

    let row = &page.rows[0];
    assert_eq!(row.len(), 5);
    assert_eq!(row["title"], "Audit Prep");
    assert_eq!(row["headline"], "AUDIT PREP");
    assert!(row["not_a_field"].is_null());
    assert!(row["description"].is_null());

    Ok(())
}

/// Tests that a custom ordering expression honours the requested direction.
///
/// Expected: `headline` orders by schedule, descending when asked
#[tokio::test]
async fn custom_ordering_uses_requested_direction() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_seminar_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    SeminarFactory::new(db).title("Early").schedule(at(0)).build().await?;
    SeminarFactory::new(db).title("Late").schedule(at(3600)).build().await?;

    let params = |order| ListParams {
        order_by: Some("headline".to_string()),
        order: Some(order),
        ..Default::default()
    };

    let asc = table()
        .fetch(db, seminar::Entity::find(), &params(SortDirection::Asc))
        .await?;
    assert_eq!(asc.rows[0]["title"], "Early");

    let desc = table()
        .fetch(db, seminar::Entity::find(), &params(SortDirection::Desc))
        .await?;
    assert_eq!(desc.rows[0]["title"], "Late");

    Ok(())
}

/// Tests that a render-only column cannot be ordered and falls back to the default.
///
/// Expected: newest first
#[tokio::test]
async fn render_only_column_falls_back_to_default_order() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_seminar_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    SeminarFactory::new(db).title("Old").created_at(at(0)).build().await?;
    SeminarFactory::new(db).title("New").created_at(at(60)).build().await?;

    let page = table()
        .fetch(
            db,
            seminar::Entity::find(),
            &ListParams {
                order_by: Some("not_a_field".to_string()),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(page.rows[0]["title"], "New");

    Ok(())
}

/// Tests pagination bounds on empty and over-range pages.
///
/// Expected: empty table has last page 0; pages past the end are empty
#[tokio::test]
async fn paginates_empty_and_out_of_range() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_seminar_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let empty = table()
        .fetch(db, seminar::Entity::find(), &ListParams::default())
        .await?;
    assert_eq!(empty.total, 0);
    assert_eq!(empty.last_page, 0);
    assert_eq!(empty.per_page, 10);

    for offset in 0..3 {
        SeminarFactory::new(db).created_at(at(offset)).build().await?;
    }

    let beyond = table()
        .fetch(
            db,
            seminar::Entity::find(),
            &ListParams {
                per_page: Some(2),
                page: Some(5),
                ..Default::default()
            },
        )
        .await?;
    assert!(beyond.rows.is_empty());
    assert_eq!(beyond.total, 3);
    assert_eq!(beyond.last_page, 2);
    assert_eq!(beyond.current_page, 5);

    Ok(())
}

/// Tests page sizes and page numbers far beyond any real table.
///
/// Expected: the page size is capped, the last page is empty and nothing overflows
#[tokio::test]
async fn caps_oversized_page_requests() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_seminar_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for offset in 0..3 {
        SeminarFactory::new(db).created_at(at(offset)).build().await?;
    }

    let capped = table()
        .fetch(
            db,
            seminar::Entity::find(),
            &ListParams {
                limit: Some(9_223_372_036_854_775_808),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(capped.per_page, super::MAX_PER_PAGE);
    assert_eq!(capped.rows.len(), 3);
    assert_eq!(capped.last_page, 1);

    let far = table()
        .fetch(
            db,
            seminar::Entity::find(),
            &ListParams {
                per_page: Some(u64::MAX),
                page: Some(u64::MAX),
                ..Default::default()
            },
        )
        .await?;
    assert!(far.rows.is_empty());
    assert_eq!(far.total, 3);
    assert_eq!(far.current_page, u64::MAX);

    Ok(())
}

/// Tests that LIKE wildcards in the search term are matched literally.
///
/// Expected: `_` matches nothing, `%` only the title containing a percent sign;
/// non-ASCII letters match with their own case only
#[tokio::test]
async fn search_treats_wildcards_literally() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_seminar_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    SeminarFactory::new(db).title("Budgeting").build().await?;
    SeminarFactory::new(db).title("100% Growth").build().await?;
    SeminarFactory::new(db).title("École Numérique").build().await?;

    let titles = |search: &str| {
        let params = ListParams {
            search: Some(search.to_string()),
            ..Default::default()
        };
        async move {
            let page = table().fetch(db, seminar::Entity::find(), &params).await?;
            Ok::<_, DbErr>(
                page.rows
                    .iter()
                    .map(|row| row["title"].as_str().unwrap_or_default().to_string())
                    .collect::<Vec<_>>(),
            )
        }
    };

    assert!(titles("_").await?.is_empty());
    assert!(titles("\\").await?.is_empty());
    assert_eq!(titles("%").await?, vec!["100% Growth"]);
    assert_eq!(titles("0% g").await?, vec!["100% Growth"]);
    assert_eq!(titles("École").await?, vec!["École Numérique"]);
    assert_eq!(titles("numérique").await?, vec!["École Numérique"]);
    assert!(titles("école").await?.is_empty());

    Ok(())
}

/// Tests list parameter normalisation.
///
/// Expected: blank search ignored, zero sizes and pages clamped to 1, oversized
/// page sizes capped
#[test]
fn normalises_list_params() {
    let params = ListParams {
        search: Some("   ".to_string()),
        per_page: Some(0),
        page: Some(0),
        ..Default::default()
    };

    assert_eq!(params.search_term(), None);
    assert_eq!(params.page_size(10), 1);
    assert_eq!(params.page(), 1);
    assert_eq!(ListParams::default().page_size(7), 7);

    let huge = ListParams {
        limit: Some(9_223_372_036_854_775_808),
        page: Some(u64::MAX),
        ..Default::default()
    };
    assert_eq!(huge.page_size(10), super::MAX_PER_PAGE);
    assert_eq!(huge.page(), u64::MAX);
}

/// Tests the response envelope's camelCase metadata.
///
/// Expected: currentPage, perPage, total and lastPage keys
#[test]
fn serialises_envelope_in_camel_case() {
    let page = super::Page {
        rows: Vec::new(),
        current_page: 1,
        per_page: 10,
        total: 0,
        last_page: 0,
    };

    let value = serde_json::to_value(page.into_dto()).unwrap();
    assert_eq!(
        value,
        json!({
            "data": [],
            "meta": { "currentPage": 1, "perPage": 10, "total": 0, "lastPage": 0 }
        })
    );
}
