mod common;

use appointments_core::{
    Appointment, AppointmentClient, AppointmentDraft, AppointmentError, AppointmentRepository,
    Column, DeleteOutcome, FormController, FormError, ListController,
};
use chrono::NaiveDate;

fn rossi() -> Appointment {
    Appointment::new(
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        "09:30",
        "Rossi",
        "Via Roma 1",
        "Milano",
        50.0,
    )
}

fn bianchi() -> Appointment {
    Appointment::new(
        NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
        "15:00",
        "Bianchi",
        "Corso Francia 3",
        "Torino",
        80.0,
    )
}

async fn client() -> (AppointmentClient, common::Store) {
    let (url, store) = common::spawn().await;
    (AppointmentClient::new(&url).unwrap(), store)
}

#[tokio::test]
async fn test_create_then_get_returns_same_fields() {
    let (client, _store) = client().await;

    let created = client.create(&rossi()).await.unwrap();
    let id = created.id.expect("server assigns an id");

    let fetched = client.get(id).await.unwrap();
    assert_eq!(fetched.id, Some(id));
    assert_eq!(fetched.without_id(), rossi());
}

#[tokio::test]
async fn test_update_replaces_record() {
    let (client, store) = client().await;
    let saved = store.insert(rossi());
    let id = saved.id.unwrap();

    let replacement = bianchi().with_id(id);
    let updated = client.update(&replacement).await.unwrap();
    assert_eq!(updated, replacement);

    assert_eq!(client.get(id).await.unwrap(), replacement);
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let (client, store) = client().await;
    let id = store.insert(rossi()).id.unwrap();

    client.delete(id).await.unwrap();

    assert!(matches!(client.get(id).await, Err(AppointmentError::NotFound(n)) if n == id));
    assert_eq!(store.len(), 0);
}

#[tokio::test]
async fn test_missing_ids_are_not_found() {
    let (client, _store) = client().await;

    assert!(matches!(client.get(42).await, Err(AppointmentError::NotFound(42))));
    assert!(matches!(
        client.update(&rossi().with_id(42)).await,
        Err(AppointmentError::NotFound(42))
    ));
    assert!(matches!(client.delete(42).await, Err(AppointmentError::NotFound(42))));
}

#[tokio::test]
async fn test_list_keeps_store_order() {
    let (client, store) = client().await;
    store.insert(bianchi());
    store.insert(rossi());

    let names: Vec<String> = client
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.customer_name)
        .collect();
    assert_eq!(names, vec!["Bianchi", "Rossi"]);
}

#[tokio::test]
async fn test_store_rejection_is_validation_rejected() {
    let (client, store) = client().await;
    let mut appointment = rossi();
    appointment.city = common::REJECTED_CITY.into();

    match client.create(&appointment).await {
        Err(AppointmentError::ValidationRejected(msg)) => {
            assert!(msg.contains(common::REJECTED_CITY), "{msg}")
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    assert_eq!(store.len(), 0);
}

#[tokio::test]
async fn test_mode_misuse_is_refused_locally() {
    let client = AppointmentClient::new(&common::dead_url().await).unwrap();

    // Would be Transport errors if anything were sent
    assert!(matches!(
        client.create(&rossi().with_id(3)).await,
        Err(AppointmentError::AlreadySaved(3))
    ));
    assert!(matches!(client.update(&rossi()).await, Err(AppointmentError::Unsaved)));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let client = AppointmentClient::new(&common::dead_url().await).unwrap();
    assert!(matches!(client.list().await, Err(AppointmentError::Transport(_))));
}

#[tokio::test]
async fn test_missing_collection_is_unknown() {
    let (url, _store) = common::spawn().await;
    let client = AppointmentClient::new(&format!("{}/nowhere", url)).unwrap();
    assert!(matches!(client.list().await, Err(AppointmentError::Unknown(_))));
}

#[tokio::test]
async fn test_undecodable_body_is_unknown() {
    let (url, _store) = common::spawn().await;
    let client = AppointmentClient::new(&format!("{}/garbage", url)).unwrap();
    assert!(matches!(client.list().await, Err(AppointmentError::Unknown(_))));
}

#[tokio::test]
async fn test_list_controller_over_http() {
    let (client, store) = client().await;
    let rossi_id = store.insert(rossi()).id.unwrap();
    store.insert(bianchi());

    let mut list = ListController::new(client);
    list.load().await.unwrap();

    list.set_filter("BIANCHI");
    assert_eq!(list.view().rows.len(), 1);

    list.set_filter("");
    list.toggle_sort(Column::Cost);
    list.toggle_sort(Column::Cost);
    let costs: Vec<f64> = list.view().rows.iter().map(|a| a.cost).collect();
    assert_eq!(costs, vec![80.0, 50.0]);

    let outcome = list.delete(rossi_id, |_| true).await.unwrap();
    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert_eq!(list.snapshot().len(), 1);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_form_controller_over_http() {
    let (client, store) = client().await;

    let mut form = FormController::create(client.clone());
    *form.draft_mut() = AppointmentDraft::from(&rossi());
    form.draft_mut().cost = Some(-5.0);
    assert!(matches!(form.submit().await, Err(FormError::Invalid(_))));
    assert_eq!(store.len(), 0);

    form.draft_mut().cost = Some(55.0);
    let created = form.submit().await.unwrap();
    let id = created.id.unwrap();

    let mut edit = FormController::edit(client.clone(), id).await.unwrap();
    edit.draft_mut().city = common::REJECTED_CITY.into();
    assert!(matches!(
        edit.submit().await,
        Err(FormError::Repository(AppointmentError::ValidationRejected(_)))
    ));

    edit.draft_mut().city = "Bergamo".into();
    edit.submit().await.unwrap();
    assert_eq!(client.get(id).await.unwrap().city, "Bergamo");
}
