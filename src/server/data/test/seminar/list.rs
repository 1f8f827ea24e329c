use super::*;

/// Tests free-text search over the title and the owner's name.
///
/// Search is case-insensitive and matches any searchable column.
///
/// Expected: one matching row per search term
#[tokio::test]
async fn searches_title_and_owner_name() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_seminar_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = UserFactory::new(db).name("Priya Natarajan").build().await?;
    SeminarFactory::new(db).title("Budget Basics").build().await?;
    SeminarFactory::new(db)
        .title("Advanced Ledgers")
        .user_id(Some(owner.id))
        .build()
        .await?;
    SeminarFactory::new(db).title("Tax Planning").build().await?;

    let repo = SeminarRepository::new(db);

    let page = repo
        .list(&ListParams {
            search: Some("BUDGET".to_string()),
            ..Default::default()
        })
        .await?;
    assert_eq!(page.total, 1);
    assert_eq!(page.rows[0]["title"], "Budget Basics");

    let page = repo
        .list(&ListParams {
            search: Some("natarajan".to_string()),
            ..Default::default()
        })
        .await?;
    assert_eq!(page.total, 1);
    assert_eq!(page.rows[0]["title"], "Advanced Ledgers");
    assert_eq!(page.rows[0]["created_by"], "Priya Natarajan");

    Ok(())
}

/// Tests that an unknown `order_by` column falls back to newest first.
///
/// The requested direction is ignored when the column is unknown.
///
/// Expected: rows ordered by created_at descending
#[tokio::test]
async fn unknown_order_by_falls_back_to_created_at_desc() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_seminar_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for (title, offset) in [("First", 0), ("Second", 10), ("Third", 20)] {
        SeminarFactory::new(db)
            .title(title)
            .created_at(at(offset))
            .build()
            .await?;
    }

    let page = SeminarRepository::new(db)
        .list(&ListParams {
            order_by: Some("no_such_column".to_string()),
            order: Some(SortDirection::Asc),
            ..Default::default()
        })
        .await?;

    let titles: Vec<_> = page.rows.iter().map(|row| row["title"].clone()).collect();
    assert_eq!(titles, vec!["Third", "Second", "First"]);

    Ok(())
}

/// Tests ordering by the owner column, which orders on the joined user name.
///
/// Expected: seminars ordered by owner name in the requested direction
#[tokio::test]
async fn orders_by_owner_name() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_seminar_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let zed = UserFactory::new(db).name("Zed").build().await?;
    let amy = UserFactory::new(db).name("Amy").build().await?;
    SeminarFactory::new(db).title("Z").user_id(Some(zed.id)).build().await?;
    SeminarFactory::new(db).title("A").user_id(Some(amy.id)).build().await?;

    let repo = SeminarRepository::new(db);

    let asc = repo
        .list(&ListParams {
            order_by: Some("created_by".to_string()),
            ..Default::default()
        })
        .await?;
    assert_eq!(asc.rows[0]["created_by"], "Amy");

    let desc = repo
        .list(&ListParams {
            order_by: Some("created_by".to_string()),
            order: Some(SortDirection::Desc),
            ..Default::default()
        })
        .await?;
    assert_eq!(desc.rows[0]["created_by"], "Zed");

    Ok(())
}

/// Tests pagination metadata and page contents.
///
/// Expected: five rows at two per page give three pages, the last holding one row
#[tokio::test]
async fn paginates_with_ceiling_last_page() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_seminar_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for offset in 0..5 {
        SeminarFactory::new(db).created_at(at(offset)).build().await?;
    }

    let page = SeminarRepository::new(db)
        .list(&ListParams {
            per_page: Some(2),
            page: Some(3),
            ..Default::default()
        })
        .await?;

    assert_eq!(page.total, 5);
    assert_eq!(page.per_page, 2);
    assert_eq!(page.current_page, 3);
    assert_eq!(page.last_page, 3);
    assert_eq!(page.rows.len(), 1);

    Ok(())
}

/// Tests that rows project only the id and the declared columns.
///
/// Soft-deleted seminars are excluded and a soft-deleted owner renders as null.
///
/// Expected: one row with exactly the projected keys and a null owner
#[tokio::test]
async fn projects_columns_and_hides_deleted() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_seminar_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let live = factory::create_seminar(db, Some(owner.id)).await?;
    SeminarFactory::new(db).deleted().build().await?;

    let mut active = sea_orm::IntoActiveModel::into_active_model(owner);
    active.deleted_at = sea_orm::ActiveValue::Set(Some(Utc::now()));
    sea_orm::ActiveModelTrait::update(active, db).await?;

    let page = SeminarRepository::new(db).list(&ListParams::default()).await?;

    assert_eq!(page.total, 1);
    let row = &page.rows[0];
    let mut keys: Vec<_> = row.keys().cloned().collect();
    keys.sort();
    assert_eq!(
        keys,
        vec!["created_by", "description", "id", "is_active", "schedule", "title"]
    );
    assert_eq!(row["id"], live.id.to_string());
    assert!(row["created_by"].is_null());
    assert!(row["description"].is_null());

    Ok(())
}
