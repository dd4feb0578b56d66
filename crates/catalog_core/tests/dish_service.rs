use catalog_core::db::open_db_in_memory;
use catalog_core::{
    Dish, DishService, RecordRepository, RepoResult, SqliteRecordRepository, ViolationKind,
};

fn ramen(id: &str) -> Dish {
    Dish {
        id: id.to_string(),
        name: "Ramen".to_string(),
        price: "18000".to_string(),
        category: "soup".to_string(),
        description: "pork broth".to_string(),
        dish_type: "main".to_string(),
    }
}

#[test]
fn dish_lifecycle() {
    let conn = open_db_in_memory().unwrap();
    let service = DishService::new(SqliteRecordRepository::<Dish>::try_new(&conn).unwrap());

    service.create(&ramen("123")).unwrap();

    let patch = Dish {
        id: String::new(),
        name: "Shoyu Ramen".to_string(),
        price: "20000".to_string(),
        description: "soy broth".to_string(),
        ..ramen("")
    };
    let merged = service.update("123", &patch).unwrap();
    assert_eq!(merged.id, "123");
    assert_eq!(merged.price, "20000");

    service.delete("123").unwrap();
    assert!(service.find("123").unwrap().is_none());
}

#[test]
fn create_with_all_fields_missing_reports_each_one() {
    let conn = open_db_in_memory().unwrap();
    let service = DishService::new(SqliteRecordRepository::<Dish>::try_new(&conn).unwrap());

    let err = service.create(&Dish::default()).unwrap_err();
    let fields: Vec<_> = err.violations().iter().map(|v| v.field.as_str()).collect();
    assert_eq!(
        fields,
        ["id", "name", "price", "category", "description", "dishType"]
    );
    assert!(err
        .violations()
        .iter()
        .all(|v| v.kind == ViolationKind::EmptyField));
    assert!(service.find_all().unwrap().is_empty());
}

#[test]
fn duplicate_dish_id_is_rejected_without_overwrite() {
    let conn = open_db_in_memory().unwrap();
    let service = DishService::new(SqliteRecordRepository::<Dish>::try_new(&conn).unwrap());
    service.create(&ramen("123")).unwrap();

    let mut other = ramen("123");
    other.name = "Udon".to_string();
    let err = service.create(&other).unwrap_err();
    assert_eq!(err.violations().len(), 1);
    assert_eq!(err.violations()[0].field, "id");
    assert_eq!(service.find("123").unwrap().unwrap().name, "Ramen");
}

#[test]
fn update_and_delete_of_missing_dish_are_rejected() {
    let conn = open_db_in_memory().unwrap();
    let service = DishService::new(SqliteRecordRepository::<Dish>::try_new(&conn).unwrap());

    let err = service.update("404", &ramen("404")).unwrap_err();
    assert_eq!(err.violations().len(), 1);
    assert_eq!(err.violations()[0].kind, ViolationKind::InvalidField);

    let err = service.delete("404").unwrap_err();
    assert_eq!(err.violations()[0].field, "id");
    assert!(service.find_all().unwrap().is_empty());
}

/// Dish store whose existence check always misses, so a second create
/// for the same id reaches the insert as a racing writer would.
struct StaleExistence<'conn>(SqliteRecordRepository<'conn, Dish>);

impl RecordRepository<Dish> for StaleExistence<'_> {
    fn find(&self, id: &str) -> RepoResult<Option<Dish>> {
        self.0.find(id)
    }

    fn exists(&self, _id: &str) -> RepoResult<bool> {
        Ok(false)
    }

    fn find_all(&self) -> RepoResult<Vec<Dish>> {
        self.0.find_all()
    }

    fn insert(&self, record: &Dish) -> RepoResult<()> {
        self.0.insert(record)
    }

    fn update(&self, record: &Dish) -> RepoResult<()> {
        self.0.update(record)
    }

    fn delete(&self, id: &str) -> RepoResult<()> {
        self.0.delete(id)
    }
}

#[test]
fn create_racing_past_existence_check_reports_duplicate_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::<Dish>::try_new(&conn).unwrap();
    let service = DishService::new(StaleExistence(repo));

    service.create(&ramen("1")).unwrap();
    let late = Dish {
        name: "Udon".to_string(),
        ..ramen("1")
    };
    let err = service.create(&late).unwrap_err();

    assert_eq!(err.violations().len(), 1);
    assert_eq!(err.violations()[0].kind, ViolationKind::InvalidField);
    assert_eq!(err.violations()[0].field, "id");
    assert_eq!(service.find("1").unwrap().unwrap().name, "Ramen");
}
