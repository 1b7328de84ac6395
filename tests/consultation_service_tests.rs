use std::sync::Arc;

use clinic_rust::api::{ConsultationId, ConsultationUpdate, NewConsultation, PatientId};
use clinic_rust::db::repositories::LocalRepository;
use clinic_rust::services::{ConsultationService, ValidationMessage};

fn setup() -> (ConsultationService, Arc<LocalRepository>) {
    let repo = Arc::new(LocalRepository::new());
    (ConsultationService::new(repo.clone()), repo)
}

#[tokio::test]
async fn create_then_get_by_id_round_trips() {
    let (service, _) = setup();

    let created = service
        .create(NewConsultation::new("2024-06-22", "10:00", 1, "Cardiology"))
        .await
        .unwrap();

    let fetched = service.get_by_id(created.id.value()).await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.date, "2024-06-22");
    assert_eq!(fetched.hour, "10:00");
    assert_eq!(fetched.patient_id, PatientId::new(1));
    assert_eq!(fetched.specialty, "Cardiology");
}

#[tokio::test]
async fn taken_slot_is_rejected_even_for_another_patient() {
    let (service, repo) = setup();

    let first = service
        .create(NewConsultation::new("2024-06-22", "10:00", 1, "Cardiology"))
        .await
        .unwrap();
    assert_eq!(first.id, ConsultationId::new(1));

    let err = service
        .create(NewConsultation::new(
            "2024-06-22",
            "10:00",
            2,
            "Dermatology",
        ))
        .await
        .unwrap_err();

    assert_eq!(
        err.validation_message(),
        Some(ValidationMessage::AlreadyChosenSlot)
    );
    assert_eq!(
        err.to_string(),
        "Já existe um agendamento nesse horário. Por favor, escolha outra data ou horário."
    );
    assert_eq!(repo.consultation_count(), 1);
}

#[tokio::test]
async fn differing_date_or_hour_is_accepted() {
    let (service, repo) = setup();

    service
        .create(NewConsultation::new("2024-06-22", "10:00", 1, "Cardiology"))
        .await
        .unwrap();
    service
        .create(NewConsultation::new("2024-06-22", "11:00", 1, "Cardiology"))
        .await
        .unwrap();
    service
        .create(NewConsultation::new("2024-06-23", "10:00", 1, "Cardiology"))
        .await
        .unwrap();

    assert_eq!(repo.consultation_count(), 3);
}

#[tokio::test]
async fn empty_fields_fail_before_any_storage_write() {
    let (service, repo) = setup();

    let inputs = [
        NewConsultation::new("", "10:00", 1, "Cardiology"),
        NewConsultation::new("2024-06-22", "", 1, "Cardiology"),
        NewConsultation::new("2024-06-22", "10:00", 0, "Cardiology"),
        NewConsultation::new("2024-06-22", "10:00", 1, ""),
    ];

    for input in inputs {
        let err = service.create(input).await.unwrap_err();
        assert_eq!(
            err.validation_message(),
            Some(ValidationMessage::EmptyInput)
        );
        assert_eq!(err.to_string(), "É necessário preecher todos os campos.");
    }

    assert_eq!(repo.consultation_count(), 0);
}

#[tokio::test]
async fn get_all_on_empty_collection_is_not_found() {
    let (service, _) = setup();

    let err = service.get_all().await.unwrap_err();
    assert_eq!(
        err.validation_message(),
        Some(ValidationMessage::NotFoundConsultations)
    );
    assert_eq!(err.to_string(), "Não foram encontradas consultas marcadas.");
}

#[tokio::test]
async fn get_all_after_one_create_returns_exactly_that_record() {
    let (service, _) = setup();

    let created = service
        .create(NewConsultation::new("2024-06-22", "10:00", 1, "Cardiology"))
        .await
        .unwrap();

    let all = service.get_all().await.unwrap();
    assert_eq!(all, vec![created]);
}

#[tokio::test]
async fn get_by_date_returns_every_hour_of_that_date() {
    let (service, _) = setup();

    service
        .create(NewConsultation::new("2024-06-22", "10:00", 1, "Cardiology"))
        .await
        .unwrap();
    service
        .create(NewConsultation::new(
            "2024-06-22",
            "11:00",
            2,
            "Dermatology",
        ))
        .await
        .unwrap();
    service
        .create(NewConsultation::new("2024-06-23", "10:00", 3, "Neurology"))
        .await
        .unwrap();

    let day = service.get_by_date("2024-06-22").await.unwrap();
    assert_eq!(day.len(), 2);
    assert!(day.iter().all(|c| c.date == "2024-06-22"));
}

#[tokio::test]
async fn get_by_date_with_no_match_is_not_found() {
    let (service, _) = setup();

    let err = service.get_by_date("1999-01-01").await.unwrap_err();
    assert_eq!(
        err.validation_message(),
        Some(ValidationMessage::NotFoundConsultations)
    );
}

#[tokio::test]
async fn get_by_id_missing_is_not_found() {
    let (service, _) = setup();

    let err = service.get_by_id(77).await.unwrap_err();
    assert_eq!(
        err.validation_message(),
        Some(ValidationMessage::NotFoundConsultations)
    );
}

#[tokio::test]
async fn update_does_not_recheck_slot_collision() {
    let (service, _) = setup();

    service
        .create(NewConsultation::new("2024-06-22", "10:00", 1, "Cardiology"))
        .await
        .unwrap();
    let second = service
        .create(NewConsultation::new(
            "2024-06-22",
            "11:00",
            2,
            "Dermatology",
        ))
        .await
        .unwrap();

    // Moving the second consultation onto the first one's slot succeeds:
    // only creation runs the collision check.
    let updated = service
        .update(
            second.id.value(),
            ConsultationUpdate {
                hour: Some("10:00".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.hour, "10:00");
}

#[tokio::test]
async fn delete_proceeds_without_existence_precheck() {
    let (service, repo) = setup();

    // Current behavior, asymmetric with patient deletion: deleting an
    // absent consultation is a no-op rather than an error.
    service.delete(424242).await.unwrap();
    assert_eq!(repo.consultation_count(), 0);

    let created = service
        .create(NewConsultation::new("2024-06-22", "10:00", 1, "Cardiology"))
        .await
        .unwrap();
    service.delete(created.id.value()).await.unwrap();
    assert_eq!(repo.consultation_count(), 0);
}

#[tokio::test]
async fn freed_slot_can_be_rebooked() {
    let (service, _) = setup();

    let created = service
        .create(NewConsultation::new("2024-06-22", "10:00", 1, "Cardiology"))
        .await
        .unwrap();
    service.delete(created.id.value()).await.unwrap();

    service
        .create(NewConsultation::new(
            "2024-06-22",
            "10:00",
            2,
            "Dermatology",
        ))
        .await
        .unwrap();
}
