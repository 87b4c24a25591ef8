use chrono::{NaiveDate, NaiveDateTime};
use medminder_core::{reconcile, IntakeLog, Medication, MedicationDraft};
use uuid::Uuid;

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 8, 28)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn medication(user: Uuid, name: &str, time: &str) -> Medication {
    Medication::from_draft(
        user,
        MedicationDraft {
            name: name.to_string(),
            dosage: "1 tablet".to_string(),
            time_to_take: time.to_string(),
            reminder_window_minutes: Some(30),
        },
    )
    .unwrap()
}

#[test]
fn produces_one_status_per_medication_in_input_order() {
    let user = Uuid::new_v4();
    let meds = vec![
        medication(user, "Evening dose", "21:00"),
        medication(user, "Morning dose", "08:00"),
        medication(user, "Noon dose", "12:00"),
    ];

    let statuses = reconcile(&meds, &[], at(7, 0));

    assert_eq!(statuses.len(), 3);
    for (status, med) in statuses.iter().zip(&meds) {
        assert_eq!(status.medication.id, med.id);
        assert!(!status.is_taken_today);
    }
}

#[test]
fn taken_today_forces_not_overdue_even_late_in_the_day() {
    let user = Uuid::new_v4();
    let med = medication(user, "Morning dose", "09:00");
    let log = IntakeLog::new(med.id, user, at(9, 10));

    let statuses = reconcile(&[med.clone()], &[log.clone()], at(23, 0));

    assert!(statuses[0].is_taken_today);
    assert!(!statuses[0].is_overdue);
    assert_eq!(statuses[0].today_log.as_ref().map(|l| l.id), Some(log.id));
}

#[test]
fn untaken_medication_is_overdue_past_its_window() {
    let user = Uuid::new_v4();
    let med = medication(user, "Morning dose", "09:00");

    let statuses = reconcile(&[med.clone()], &[], at(9, 45));
    assert!(statuses[0].is_overdue);

    // Exactly at the deadline is not overdue.
    let statuses = reconcile(&[med.clone()], &[], at(9, 30));
    assert!(!statuses[0].is_overdue);

    let statuses = reconcile(&[med], &[], at(9, 15));
    assert!(!statuses[0].is_overdue);
}

#[test]
fn first_log_in_slice_order_wins_on_duplicates() {
    let user = Uuid::new_v4();
    let med = medication(user, "Morning dose", "09:00");
    let first = IntakeLog::new(med.id, user, at(9, 5));
    let second = IntakeLog::new(med.id, user, at(9, 20));

    let statuses = reconcile(&[med], &[first.clone(), second], at(10, 0));

    assert_eq!(statuses[0].today_log.as_ref().map(|l| l.id), Some(first.id));
}

#[test]
fn logs_for_other_medications_do_not_match() {
    let user = Uuid::new_v4();
    let med_a = medication(user, "A", "09:00");
    let med_b = medication(user, "B", "09:00");
    let log_b = IntakeLog::new(med_b.id, user, at(9, 0));

    let statuses = reconcile(&[med_a, med_b], &[log_b], at(10, 0));

    assert!(!statuses[0].is_taken_today);
    assert!(statuses[0].is_overdue);
    assert!(statuses[1].is_taken_today);
    assert!(!statuses[1].is_overdue);
}

#[test]
fn status_serialization_flattens_medication_fields() {
    let user = Uuid::new_v4();
    let med = medication(user, "Morning dose", "09:00");
    let log = IntakeLog::new(med.id, user, at(9, 5));

    let statuses = reconcile(&[med.clone()], &[log], at(10, 0));
    let json = serde_json::to_value(&statuses[0]).unwrap();

    assert_eq!(json["id"], med.id.to_string());
    assert_eq!(json["name"], "Morning dose");
    assert_eq!(json["is_taken_today"], true);
    assert_eq!(json["is_overdue"], false);
    assert_eq!(json["today_log"]["date"], "2026-08-28");
}
