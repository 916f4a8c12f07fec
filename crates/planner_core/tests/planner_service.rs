use planner_core::{
    EventValidationError, InMemoryPlannerRepository, PlannerRepository, PlannerService,
    PlannerStore, SectionOrder, ServiceError, SetupRequest, TextPresenter, ViewMode,
};

fn service_with<'a>(
    repo: &'a InMemoryPlannerRepository,
    divisions: &[&str],
) -> PlannerService<&'a InMemoryPlannerRepository> {
    let mut store = PlannerStore::new(repo);
    store
        .initialize(SetupRequest {
            user_name: "Alex".to_string(),
            divisions: divisions.iter().map(|name| name.to_string()).collect(),
        })
        .unwrap();
    PlannerService::new(store)
}

fn names(service: &PlannerService<&InMemoryPlannerRepository>) -> Vec<String> {
    service
        .store()
        .events()
        .iter()
        .map(|event| event.name.clone())
        .collect()
}

#[test]
fn end_to_end_setup_add_view_and_cascade() {
    let repo = InMemoryPlannerRepository::new();
    let mut service = service_with(&repo, &["Math", "Art"]);

    service.add_event("Quiz", "2024-05-01", "09:00", 1).unwrap();
    service.add_event("Draw", "2024-04-30", "10:00", 2).unwrap();

    let schedule: Vec<_> = service
        .whole_schedule()
        .iter()
        .map(|entry| (entry.event.name.clone(), entry.event.date.clone()))
        .collect();
    assert_eq!(
        schedule,
        vec![
            ("Draw".to_string(), "2024-04-30".to_string()),
            ("Quiz".to_string(), "2024-05-01".to_string()),
        ]
    );

    let deleted = service.delete_division(1).unwrap();
    assert_eq!(deleted.name, "Math");
    assert_eq!(deleted.removed_events, 1);

    let persisted = repo.load().unwrap().unwrap();
    assert_eq!(persisted.divisions, vec!["Art".to_string()]);
    assert_eq!(persisted.events.len(), 1);
    assert_eq!(persisted.events[0].name, "Draw");
    assert_eq!(persisted.events[0].division, "Art");
}

#[test]
fn every_mutation_is_persisted_and_reloads_equal() {
    let repo = InMemoryPlannerRepository::new();
    let mut service = service_with(&repo, &["Math"]);

    service.add_division("Art").unwrap();
    service.add_event("Quiz", "2024-05-01", "09:00", 1).unwrap();
    service.add_event("Sketch", "2024-05-02", "11:00", 2).unwrap();
    service.add_event("Essay", "2024-05-03", "12:00", 1).unwrap();
    service.delete_event(1).unwrap();

    let reloaded = repo.load().unwrap().unwrap();
    assert_eq!(&reloaded, service.store().planner());
}

#[test]
fn cascade_removes_only_matching_division_and_keeps_order() {
    let repo = InMemoryPlannerRepository::new();
    let mut service = service_with(&repo, &["Math", "Art", "Music"]);

    service.add_event("a", "2024-01-03", "08:00", 2).unwrap();
    service.add_event("b", "2024-01-01", "08:00", 1).unwrap();
    service.add_event("c", "2024-01-02", "08:00", 3).unwrap();
    service.add_event("d", "2024-01-01", "07:00", 1).unwrap();
    service.add_event("e", "2024-01-01", "06:00", 2).unwrap();

    service.delete_division(1).unwrap();
    assert_eq!(names(&service), vec!["a", "c", "e"]);
    assert_eq!(
        service.store().divisions(),
        ["Art".to_string(), "Music".to_string()]
    );
}

#[test]
fn duplicate_division_names_both_cascade() {
    let repo = InMemoryPlannerRepository::new();
    let mut service = service_with(&repo, &["Math"]);
    service.add_division("Math").unwrap();
    service.add_event("Quiz", "2024-05-01", "09:00", 2).unwrap();

    let deleted = service.delete_division(1).unwrap();
    assert_eq!(deleted.removed_events, 1);
    assert_eq!(service.store().divisions(), ["Math".to_string()]);
    assert!(service.store().events().is_empty());
}

#[test]
fn invalid_event_index_leaves_document_unchanged() {
    let repo = InMemoryPlannerRepository::new();
    let mut service = service_with(&repo, &["Math"]);
    service.add_event("Quiz", "2024-05-01", "09:00", 1).unwrap();
    service.add_event("Test", "2024-05-02", "09:00", 1).unwrap();
    let before = repo.document().unwrap();

    for index in [0, 3, 99] {
        let err = service.delete_event(index).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::InvalidEventIndex { available: 2, .. }
        ));
        assert!(err.is_recoverable());
        assert_eq!(err.to_string(), "Invalid event number.");
    }

    assert_eq!(repo.document().unwrap(), before);
    assert_eq!(names(&service), vec!["Quiz", "Test"]);
}

#[test]
fn invalid_division_index_is_rejected_without_mutation() {
    let repo = InMemoryPlannerRepository::new();
    let mut service = service_with(&repo, &["Math", "Art"]);
    let before = repo.document().unwrap();

    let err = service
        .add_event("Quiz", "2024-05-01", "09:00", 3)
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::InvalidDivisionIndex {
            index: 3,
            available: 2
        }
    ));

    let err = service.delete_division(0).unwrap_err();
    assert_eq!(err.to_string(), "Invalid division number.");

    assert_eq!(repo.document().unwrap(), before);
}

#[test]
fn add_event_rejects_malformed_date_and_time() {
    let repo = InMemoryPlannerRepository::new();
    let mut service = service_with(&repo, &["Math"]);

    let err = service.add_event("Quiz", "05/01/2024", "09:00", 1).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::InvalidEvent(EventValidationError::InvalidDate(_))
    ));
    let err = service.add_event("Quiz", "2024-05-01", "9am", 1).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::InvalidEvent(EventValidationError::InvalidTime(_))
    ));
    assert!(service.store().events().is_empty());
}

#[test]
fn add_event_rejects_non_ascii_digits_that_would_missort() {
    let repo = InMemoryPlannerRepository::new();
    let mut service = service_with(&repo, &["Math"]);

    let err = service.add_event("Old", "٢٠٢٣-01-01", "09:00", 1).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::InvalidEvent(EventValidationError::InvalidDate(_))
    ));

    service.add_event("New", "2024-01-01", "09:00", 1).unwrap();
    service.add_event("Old", "2023-01-01", "09:00", 1).unwrap();
    let order: Vec<_> = service
        .whole_schedule()
        .iter()
        .map(|entry| entry.event.name.clone())
        .collect();
    assert_eq!(order, vec!["Old", "New"]);
}

#[test]
fn duplicate_events_are_allowed() {
    let repo = InMemoryPlannerRepository::new();
    let mut service = service_with(&repo, &["Math"]);
    service.add_event("Quiz", "2024-05-01", "09:00", 1).unwrap();
    service.add_event("Quiz", "2024-05-01", "09:00", 1).unwrap();
    assert_eq!(service.store().events().len(), 2);
}

#[test]
fn delete_scheduled_event_follows_displayed_rows() {
    let repo = InMemoryPlannerRepository::new();
    let mut service = service_with(&repo, &["Math"]);
    service.add_event("Later", "2024-06-02", "09:00", 1).unwrap();
    service.add_event("Sooner", "2024-06-01", "09:00", 1).unwrap();

    let removed = service.delete_scheduled_event(1).unwrap();
    assert_eq!(removed.name, "Sooner");
    assert_eq!(names(&service), vec!["Later"]);

    let err = service.delete_scheduled_event(2).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidEventIndex { .. }));
}

#[test]
fn view_reports_no_events_and_renders_sections() {
    let repo = InMemoryPlannerRepository::new();
    let mut service = service_with(&repo, &["Math", "Art"]);

    let mut presenter = TextPresenter::new();
    service.view(ViewMode::WholeSchedule, &mut presenter);
    assert_eq!(presenter.text(), "No events found.\n");

    service.add_event("essay", "2024-05-03", "09:00", 1).unwrap();
    service.add_event("Algebra", "2024-05-04", "09:00", 1).unwrap();

    let mut presenter = TextPresenter::new();
    service.view(
        ViewMode::BySection(SectionOrder::Alphabetical),
        &mut presenter,
    );
    assert_eq!(
        presenter.into_text(),
        "\nMath:\n  2024-05-04 09:00 - Algebra\n  2024-05-03 09:00 - essay\n\nArt:\n"
    );
}
