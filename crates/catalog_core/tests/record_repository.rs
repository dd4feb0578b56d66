use catalog_core::db::migrations::latest_version;
use catalog_core::db::open_db_in_memory;
use catalog_core::{
    Dish, Menu, MenuLookup, RecordRepository, RepoError, Restaurant, RestaurantLookup,
    SqliteRecordRepository, SqliteRelationRepository,
};
use rusqlite::Connection;

fn restaurant(tax_id: &str, name: &str, admin: &str) -> Restaurant {
    Restaurant {
        tax_id: tax_id.to_string(),
        name: name.to_string(),
        address: "Norte".to_string(),
        mobile: "8212341".to_string(),
        email: "a@b.com".to_string(),
        city: "Popayan".to_string(),
        admin_username: admin.to_string(),
    }
}

#[test]
fn insert_find_and_list_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::<Restaurant>::try_new(&conn).unwrap();

    repo.insert(&restaurant("222", "Donde Juan", "jp")).unwrap();
    repo.insert(&restaurant("111", "Cosecha", "mfg")).unwrap();

    let loaded = repo.find("111").unwrap().unwrap();
    assert_eq!(loaded, restaurant("111", "Cosecha", "mfg"));
    assert!(repo.find("999").unwrap().is_none());
    assert!(repo.exists("222").unwrap());
    assert!(!repo.exists("999").unwrap());

    let ids: Vec<_> = repo
        .find_all()
        .unwrap()
        .into_iter()
        .map(|item| item.tax_id)
        .collect();
    assert_eq!(ids, ["111", "222"]);
}

#[test]
fn insert_duplicate_key_returns_conflict() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::<Dish>::try_new(&conn).unwrap();
    let dish = Dish {
        id: "123".to_string(),
        name: "Ramen".to_string(),
        price: "18000".to_string(),
        category: "soup".to_string(),
        description: "pork broth".to_string(),
        dish_type: "main".to_string(),
    };

    repo.insert(&dish).unwrap();
    let err = repo.insert(&dish).unwrap_err();
    assert!(matches!(err, RepoError::Conflict { kind: "dish", ref id } if id == "123"));
}

#[test]
fn update_and_delete_missing_rows_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::<Menu>::try_new(&conn).unwrap();
    let menu = Menu {
        id: "100".to_string(),
        name: "Menu Oriental".to_string(),
        restaurant_tax_id: "500".to_string(),
    };

    assert!(matches!(
        repo.update(&menu).unwrap_err(),
        RepoError::NotFound { kind: "menu", .. }
    ));
    assert!(matches!(
        repo.delete("100").unwrap_err(),
        RepoError::NotFound { kind: "menu", .. }
    ));
}

#[test]
fn secondary_lookups_filter_by_column() {
    let conn = open_db_in_memory().unwrap();
    let restaurants = SqliteRecordRepository::<Restaurant>::try_new(&conn).unwrap();
    restaurants.insert(&restaurant("111", "Cosecha", "mfg")).unwrap();
    restaurants.insert(&restaurant("222", "Donde Juan", "mfg")).unwrap();
    restaurants.insert(&restaurant("333", "Lucho", "other")).unwrap();

    let by_name = restaurants.find_by_name("Donde Juan").unwrap().unwrap();
    assert_eq!(by_name.tax_id, "222");
    assert!(restaurants.find_by_name("Nowhere").unwrap().is_none());
    assert_eq!(restaurants.find_by_admin("mfg").unwrap().len(), 2);
    assert!(restaurants.find_by_admin("nobody").unwrap().is_empty());

    let menus = SqliteRecordRepository::<Menu>::try_new(&conn).unwrap();
    for (id, owner) in [("1", "111"), ("2", "222"), ("3", "111")] {
        menus
            .insert(&Menu {
                id: id.to_string(),
                name: format!("menu {id}"),
                restaurant_tax_id: owner.to_string(),
            })
            .unwrap();
    }
    let ids: Vec<_> = menus
        .find_by_restaurant("111")
        .unwrap()
        .into_iter()
        .map(|menu| menu.id)
        .collect();
    assert_eq!(ids, ["1", "3"]);
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteRecordRepository::<Restaurant>::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
    assert!(SqliteRelationRepository::try_new(&conn).is_err());
}

#[test]
fn repository_rejects_connection_without_required_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteRecordRepository::<Dish>::try_new(&conn);
    assert!(matches!(result, Err(RepoError::MissingRequiredTable("dishes"))));
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE menu_display_days (
            menu_id TEXT NOT NULL,
            day TEXT NOT NULL
        );
        CREATE TABLE menu_offerings (
            menu_id TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteRelationRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "menu_offerings",
            column: "dish_id"
        })
    ));
}
