use sqlx::PgPool;
use std::sync::Arc;
use todo_api::domain::repositories::GroupRepository;
use todo_api::infrastructure::persistence::PgGroupRepository;

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_create_find_list(pool: PgPool) {
    let repo = PgGroupRepository::new(Arc::new(pool));

    let a = repo.create("editors").await.unwrap();
    let b = repo.create("viewers").await.unwrap();

    assert_eq!(repo.find_by_id(a.id).await.unwrap().unwrap().name, "editors");
    assert_eq!(repo.find_by_name("viewers").await.unwrap().unwrap().id, b.id);

    let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|g| g.name).collect();
    assert_eq!(names, vec!["editors", "viewers"]);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_duplicate_name(pool: PgPool) {
    let repo = PgGroupRepository::new(Arc::new(pool));

    repo.create("editors").await.unwrap();
    let err = repo.create("editors").await.unwrap_err();

    assert!(err.to_error_info().details.get("name").is_some());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_update_and_delete(pool: PgPool) {
    let repo = PgGroupRepository::new(Arc::new(pool));

    let group = repo.create("editors").await.unwrap();

    let renamed = repo.update(group.id, "writers").await.unwrap().unwrap();
    assert_eq!(renamed.name, "writers");
    assert!(repo.update(9999, "x").await.unwrap().is_none());

    assert!(repo.delete(group.id).await.unwrap());
    assert!(repo.find_by_id(group.id).await.unwrap().is_none());
}
