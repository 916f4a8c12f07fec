use planner_core::{
    Event, InMemoryPlannerRepository, JsonFilePlannerRepository, Planner, PlannerRepository,
    PlannerStore, RepoError, SetupError, SetupRequest,
};
use std::fs;

fn setup_request(divisions: &[&str]) -> SetupRequest {
    SetupRequest {
        user_name: "Alex".to_string(),
        divisions: divisions.iter().map(|name| name.to_string()).collect(),
    }
}

#[test]
fn load_returns_false_when_document_is_absent() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFilePlannerRepository::new(dir.path().join("planner_data.json"));
    let mut store = PlannerStore::new(repo);

    assert!(!store.load().unwrap());
    assert_eq!(store.planner(), &Planner::default());
}

#[test]
fn initialize_then_reload_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("planner_data.json");

    let mut store = PlannerStore::new(JsonFilePlannerRepository::new(&path));
    store.initialize(setup_request(&[" Math ", "Art"])).unwrap();
    assert!(path.exists());
    assert!(!path.with_extension("tmp").exists());

    let mut reloaded = PlannerStore::new(JsonFilePlannerRepository::new(&path));
    assert!(reloaded.load().unwrap());
    assert_eq!(reloaded.user_name(), "Alex");
    assert_eq!(reloaded.divisions(), ["Math".to_string(), "Art".to_string()]);
    assert!(reloaded.events().is_empty());
}

#[test]
fn saved_document_has_expected_shape() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planner_data.json");
    let repo = JsonFilePlannerRepository::new(&path);

    let mut planner = Planner::new("Alex", vec!["Math".to_string()]);
    planner
        .events
        .push(Event::new("Quiz", "2024-05-01", "09:00", "Math"));
    repo.save(&planner).unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "name": "Alex",
            "divisions": ["Math"],
            "events": [
                {"name": "Quiz", "date": "2024-05-01", "time": "09:00", "division": "Math"}
            ]
        })
    );
}

#[test]
fn saving_unchanged_state_is_byte_stable() {
    let repo = InMemoryPlannerRepository::new();
    let mut store = PlannerStore::new(&repo);
    store.initialize(setup_request(&["Math"])).unwrap();
    let first = repo.document().unwrap();

    store.save().unwrap();
    assert_eq!(repo.document().unwrap(), first);
}

#[test]
fn malformed_document_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planner_data.json");
    fs::write(&path, r#"{"name": "Alex", "divisions": []}"#).unwrap();

    let mut store = PlannerStore::new(JsonFilePlannerRepository::new(&path));
    let err = store.load().unwrap_err();
    assert!(matches!(err, RepoError::Malformed(ref message) if message.contains("events")));
    assert_eq!(store.planner(), &Planner::default());
}

#[test]
fn unreadable_resource_propagates_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFilePlannerRepository::new(dir.path());

    let err = repo.load().unwrap_err();
    assert!(matches!(err, RepoError::Io(_)));
}

#[test]
fn setup_rejects_empty_division_list_and_blank_names() {
    let repo = InMemoryPlannerRepository::new();
    let mut store = PlannerStore::new(&repo);

    let err = store.initialize(setup_request(&[])).unwrap_err();
    assert!(matches!(err, SetupError::NoDivisions));

    let err = store.initialize(setup_request(&["Math", "  "])).unwrap_err();
    assert!(matches!(err, SetupError::EmptyDivisionName { position: 2 }));

    assert!(repo.document().is_none());
    assert!(store.divisions().is_empty());
}
