use contactbook_core::db::open_db_in_memory;
use contactbook_core::{
    ContactPatch, ContactRepository, ContactService, ContactServiceError, NewContact,
    SqliteContactRepository,
};

fn new_contact(email: &str, name: &str) -> NewContact {
    NewContact {
        email: email.to_string(),
        name: name.to_string(),
        phone: None,
        company: None,
    }
}

#[test]
fn create_then_find_by_id_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let service = ContactService::new(SqliteContactRepository::try_new(&conn).unwrap());

    let mut payload = new_contact("a@x.com", "Ann");
    payload.company = Some("Acme".to_string());
    let created = service.create(&payload).unwrap();

    let loaded = service.find_by_id(created.id).unwrap().unwrap();
    assert_eq!(loaded, created);
    assert_eq!(loaded.email, payload.email);
    assert_eq!(loaded.name, payload.name);
    assert_eq!(loaded.phone, None);
    assert_eq!(loaded.company.as_deref(), Some("Acme"));
    assert_eq!(loaded.created_at, loaded.updated_at);
}

#[test]
fn ids_start_at_one_and_are_never_reused() {
    let conn = open_db_in_memory().unwrap();
    let service = ContactService::new(SqliteContactRepository::try_new(&conn).unwrap());

    let first = service.create(&new_contact("a@x.com", "Ann")).unwrap();
    assert_eq!(first.id, 1);
    service.delete(first.id).unwrap();

    let second = service.create(&new_contact("a@x.com", "Ann")).unwrap();
    assert_eq!(second.id, 2);
}

#[test]
fn duplicate_email_is_a_conflict() {
    let conn = open_db_in_memory().unwrap();
    let service = ContactService::new(SqliteContactRepository::try_new(&conn).unwrap());

    service.create(&new_contact("a@x.com", "Ann")).unwrap();
    let err = service.create(&new_contact("a@x.com", "Bob")).unwrap_err();

    assert!(matches!(err, ContactServiceError::Conflict { field: "email" }));
    assert_eq!(service.count().unwrap(), 1);
}

#[test]
fn find_all_is_empty_for_fresh_store() {
    let conn = open_db_in_memory().unwrap();
    let service = ContactService::new(SqliteContactRepository::try_new(&conn).unwrap());

    assert!(service.find_all().unwrap().is_empty());
    assert_eq!(service.count().unwrap(), 0);
}

#[test]
fn find_all_returns_most_recent_first() {
    let conn = open_db_in_memory().unwrap();
    let service = ContactService::new(SqliteContactRepository::try_new(&conn).unwrap());

    let ann = service.create(&new_contact("a@x.com", "Ann")).unwrap();
    let bob = service.create(&new_contact("b@x.com", "Bob")).unwrap();
    conn.execute(
        "UPDATE contacts SET created_at = created_at + 60000 WHERE id = ?1;",
        [ann.id],
    )
    .unwrap();
    let cid = service.create(&new_contact("c@x.com", "Cid")).unwrap();

    let ids = service
        .find_all()
        .unwrap()
        .into_iter()
        .map(|contact| contact.id)
        .collect::<Vec<_>>();
    assert_eq!(ids, vec![ann.id, cid.id, bob.id]);
}

#[test]
fn find_by_id_reports_absence_as_none() {
    let conn = open_db_in_memory().unwrap();
    let service = ContactService::new(SqliteContactRepository::try_new(&conn).unwrap());

    assert!(service.find_by_id(404).unwrap().is_none());
}

#[test]
fn partial_update_leaves_absent_fields_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let service = ContactService::new(SqliteContactRepository::try_new(&conn).unwrap());

    let mut payload = new_contact("a@x.com", "Ann");
    payload.company = Some("Acme".to_string());
    let created = service.create(&payload).unwrap();

    let patch = ContactPatch {
        phone: Some("555-1000".to_string()),
        name: Some("Annie".to_string()),
        ..ContactPatch::default()
    };
    let updated = service.update(created.id, &patch).unwrap();

    let mut expected = created.clone();
    patch.apply_to(&mut expected);
    expected.updated_at = updated.updated_at;
    assert_eq!(updated, expected);

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.email, "a@x.com");
    assert_eq!(updated.name, "Annie");
    assert_eq!(updated.phone.as_deref(), Some("555-1000"));
    assert_eq!(updated.company.as_deref(), Some("Acme"));
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
}

#[test]
fn update_refreshes_updated_at_only() {
    let conn = open_db_in_memory().unwrap();
    let service = ContactService::new(SqliteContactRepository::try_new(&conn).unwrap());

    let created = service.create(&new_contact("a@x.com", "Ann")).unwrap();
    conn.execute(
        "UPDATE contacts SET created_at = 1000, updated_at = 1000 WHERE id = ?1;",
        [created.id],
    )
    .unwrap();

    let patch = ContactPatch {
        company: Some("Acme".to_string()),
        ..ContactPatch::default()
    };
    let updated = service.update(created.id, &patch).unwrap();
    assert_eq!(updated.created_at, 1000);
    assert!(updated.updated_at > 1000);
}

#[test]
fn empty_update_is_a_noop_for_existing_contact() {
    let conn = open_db_in_memory().unwrap();
    let service = ContactService::new(SqliteContactRepository::try_new(&conn).unwrap());

    let created = service.create(&new_contact("a@x.com", "Ann")).unwrap();
    let updated = service.update(created.id, &ContactPatch::default()).unwrap();

    assert_eq!(updated, created);
}

#[test]
fn update_missing_contact_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = ContactService::new(SqliteContactRepository::try_new(&conn).unwrap());

    let patch = ContactPatch {
        name: Some("Ann".to_string()),
        ..ContactPatch::default()
    };
    let err = service.update(9, &patch).unwrap_err();
    assert!(matches!(err, ContactServiceError::NotFound(9)));
}

#[test]
fn update_to_taken_email_is_a_conflict_and_keeps_row() {
    let conn = open_db_in_memory().unwrap();
    let service = ContactService::new(SqliteContactRepository::try_new(&conn).unwrap());

    service.create(&new_contact("a@x.com", "Ann")).unwrap();
    let bob = service.create(&new_contact("b@x.com", "Bob")).unwrap();

    let patch = ContactPatch {
        email: Some("a@x.com".to_string()),
        name: Some("Robert".to_string()),
        ..ContactPatch::default()
    };
    let err = service.update(bob.id, &patch).unwrap_err();
    assert!(matches!(err, ContactServiceError::Conflict { field: "email" }));

    let unchanged = service.find_by_id(bob.id).unwrap().unwrap();
    assert_eq!(unchanged, bob);
}

#[test]
fn delete_removes_record_and_decrements_count() {
    let conn = open_db_in_memory().unwrap();
    let service = ContactService::new(SqliteContactRepository::try_new(&conn).unwrap());

    let ann = service.create(&new_contact("a@x.com", "Ann")).unwrap();
    service.create(&new_contact("b@x.com", "Bob")).unwrap();
    assert_eq!(service.count().unwrap(), 2);

    service.delete(ann.id).unwrap();

    assert!(service.find_by_id(ann.id).unwrap().is_none());
    assert_eq!(service.count().unwrap(), 1);
}

#[test]
fn delete_missing_contact_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = ContactService::new(SqliteContactRepository::try_new(&conn).unwrap());

    let err = service.delete(3).unwrap_err();
    assert!(matches!(err, ContactServiceError::NotFound(3)));
}

#[test]
fn repository_can_be_used_without_service() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    let id = repo.insert_contact(&new_contact("a@x.com", "Ann")).unwrap();
    assert_eq!(repo.count_contacts().unwrap(), 1);
    assert_eq!(repo.get_contact(id).unwrap().unwrap().name, "Ann");
}

#[test]
fn contact_serializes_with_camel_case_timestamps() {
    let conn = open_db_in_memory().unwrap();
    let service = ContactService::new(SqliteContactRepository::try_new(&conn).unwrap());

    let created = service.create(&new_contact("a@x.com", "Ann")).unwrap();
    let json = serde_json::to_value(&created).unwrap();

    assert_eq!(json["id"], 1);
    assert_eq!(json["email"], "a@x.com");
    assert!(json["phone"].is_null());
    assert!(json["createdAt"].is_i64());
    assert!(json["updatedAt"].is_i64());
}
