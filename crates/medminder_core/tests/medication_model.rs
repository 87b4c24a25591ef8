use medminder_core::{Medication, MedicationDraft, MedicationValidationError};
use uuid::Uuid;

fn draft(name: &str, dosage: &str, time: &str, window: Option<u32>) -> MedicationDraft {
    MedicationDraft {
        name: name.to_string(),
        dosage: dosage.to_string(),
        time_to_take: time.to_string(),
        reminder_window_minutes: window,
    }
}

#[test]
fn from_draft_applies_default_window_and_generates_id() {
    let user = Uuid::new_v4();
    let medication = Medication::from_draft(user, draft("Aspirin", "100mg", "09:00", None)).unwrap();

    assert!(!medication.id.is_nil());
    assert_eq!(medication.user_id, user);
    assert_eq!(medication.reminder_window_minutes, 30);
}

#[test]
fn from_draft_trims_and_strips_markup_from_text_fields() {
    let medication = Medication::from_draft(
        Uuid::new_v4(),
        draft("  Ibuprofen<script>  ", " 200mg ", "8:30", Some(60)),
    )
    .unwrap();

    assert_eq!(medication.name, "Ibuprofenscript");
    assert_eq!(medication.dosage, "200mg");
    assert_eq!(medication.reminder_window_minutes, 60);
}

#[test]
fn from_draft_canonicalizes_time_to_padded_form() {
    let user = Uuid::new_v4();

    let medication = Medication::from_draft(user, draft("Aspirin", "100mg", "8:30", None)).unwrap();
    assert_eq!(medication.time_to_take, "08:30");

    let medication =
        Medication::from_draft(user, draft("Aspirin", "100mg", " 21:00 ", None)).unwrap();
    assert_eq!(medication.time_to_take, "21:00");
}

#[test]
fn from_draft_rejects_each_failing_field() {
    let user = Uuid::new_v4();

    let err = Medication::from_draft(user, draft("", "100mg", "09:00", None)).unwrap_err();
    assert_eq!(err, MedicationValidationError::EmptyName);
    assert_eq!(err.field(), "name");

    // Sanitation runs first; markup-only names collapse to empty.
    let err = Medication::from_draft(user, draft("<>", "100mg", "09:00", None)).unwrap_err();
    assert_eq!(err, MedicationValidationError::EmptyName);

    let long_name = "x".repeat(101);
    let err = Medication::from_draft(user, draft(&long_name, "100mg", "09:00", None)).unwrap_err();
    assert_eq!(err, MedicationValidationError::NameTooLong { chars: 101 });

    let err = Medication::from_draft(user, draft("Aspirin", "", "09:00", None)).unwrap_err();
    assert_eq!(err, MedicationValidationError::EmptyDosage);
    assert_eq!(err.field(), "dosage");

    let long_dosage = "d".repeat(51);
    let err =
        Medication::from_draft(user, draft("Aspirin", &long_dosage, "09:00", None)).unwrap_err();
    assert_eq!(err, MedicationValidationError::DosageTooLong { chars: 51 });

    let err = Medication::from_draft(user, draft("Aspirin", "100mg", "25:00", None)).unwrap_err();
    assert_eq!(
        err,
        MedicationValidationError::InvalidTimeFormat {
            value: "25:00".to_string()
        }
    );
    assert_eq!(err.field(), "time_to_take");

    for minutes in [4, 241] {
        let err = Medication::from_draft(user, draft("Aspirin", "100mg", "09:00", Some(minutes)))
            .unwrap_err();
        assert_eq!(err, MedicationValidationError::WindowOutOfRange { minutes });
        assert_eq!(err.field(), "reminder_window_minutes");
    }
}

#[test]
fn from_draft_accepts_window_bounds() {
    let user = Uuid::new_v4();
    for minutes in [5, 240] {
        let medication =
            Medication::from_draft(user, draft("Aspirin", "100mg", "09:00", Some(minutes)))
                .unwrap();
        assert_eq!(medication.reminder_window_minutes, minutes);
    }
}

#[test]
fn medication_serialization_uses_expected_wire_fields() {
    let medication = Medication::from_draft(
        Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap(),
        draft("Aspirin", "100mg", "09:00", Some(45)),
    )
    .unwrap();

    let json = serde_json::to_value(&medication).unwrap();
    assert_eq!(json["id"], medication.id.to_string());
    assert_eq!(json["user_id"], "11111111-2222-4333-8444-555555555555");
    assert_eq!(json["name"], "Aspirin");
    assert_eq!(json["dosage"], "100mg");
    assert_eq!(json["time_to_take"], "09:00");
    assert_eq!(json["reminder_window_minutes"], 45);

    let decoded: Medication = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, medication);
}
