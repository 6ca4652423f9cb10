//! Form controller: Owns the feature draft and turns edits into payloads.

use crate::domain::{
    ChestPainType, ExerciseAngina, FastingBloodSugar, FeatureDraft, FieldName, PredictionPayload,
    RestingEcg, Sex, StSlope, ValidationError,
};

/// A representative patient from the training data, used by the sample key.
fn sample_patient() -> FeatureDraft {
    FeatureDraft {
        age: "54".into(),
        sex: Sex::M,
        chest_pain_type: ChestPainType::ASY,
        resting_bp: "140".into(),
        cholesterol: "239".into(),
        fasting_bs: FastingBloodSugar::Normal,
        resting_ecg: RestingEcg::Normal,
        max_hr: "136".into(),
        exercise_angina: ExerciseAngina::Y,
        oldpeak: "1.2".into(),
        st_slope: StSlope::Flat,
    }
}

/// Holds the operator's in-progress feature vector.
#[derive(Debug, Default)]
pub struct FormController {
    draft: FeatureDraft,
}

impl FormController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn draft(&self) -> &FeatureDraft {
        &self.draft
    }

    /// Replace a field's value, addressing it by its wire name.
    ///
    /// # Errors
    /// Returns `FieldError::Unknown` for a name outside the draft and
    /// `FieldError::InvalidValue` for an unknown categorical code. The draft is
    /// unchanged in both cases.
    pub fn update(&mut self, field_name: &str, raw_value: &str) -> crate::Result<()> {
        let field: FieldName = field_name.parse()?;
        self.update_field(field, raw_value)
    }

    /// Replace a field's value.
    ///
    /// # Errors
    /// Returns `FieldError::InvalidValue` for an unknown categorical code.
    pub fn update_field(&mut self, field: FieldName, raw_value: &str) -> crate::Result<()> {
        self.draft.set(field, raw_value)?;
        Ok(())
    }

    #[must_use]
    pub fn value(&self, field: FieldName) -> &str {
        self.draft.value(field)
    }

    /// Step a categorical field through its options.
    pub fn cycle(&mut self, field: FieldName, forward: bool) {
        self.draft.cycle(field, forward);
    }

    /// Normalize the draft into a request payload without touching it.
    ///
    /// # Errors
    /// Returns `ValidationError::MissingAge` if Age is empty.
    pub fn build_payload(&self) -> Result<PredictionPayload, ValidationError> {
        PredictionPayload::from_draft(&self.draft)
    }

    /// Fill every field with the sample patient.
    pub fn load_sample(&mut self) {
        self.draft.clear();
        self.draft = sample_patient();
    }

    /// Edit a text field in place, keystroke by keystroke.
    ///
    /// Categorical fields are ignored; returns whether the edit was applied.
    pub fn edit_text(&mut self, field: FieldName, edit: impl FnOnce(&mut String)) -> bool {
        self.draft.edit_text(field, edit)
    }

    /// Wipe text buffers and return to defaults.
    pub fn reset(&mut self) {
        self.draft.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HeartwatchError;

    #[test]
    fn test_update_by_wire_name() {
        let mut form = FormController::new();
        form.update("Age", "55").expect("age");
        form.update("ST_Slope", "Down").expect("slope");
        form.update("FastingBS", "1").expect("fasting");

        assert_eq!(form.value(FieldName::Age), "55");
        assert_eq!(form.value(FieldName::StSlope), "Down");
        assert_eq!(form.value(FieldName::FastingBS), "1");
    }

    #[test]
    fn test_unknown_field_is_rejected_without_corruption() {
        let mut form = FormController::new();
        form.update("Age", "70").expect("age");
        let before = form.draft().clone();

        let err = form.update("BloodType", "O+").unwrap_err();
        assert!(matches!(err, HeartwatchError::Field(_)));
        let err = form.update("Sex", "X").unwrap_err();
        assert!(matches!(err, HeartwatchError::Field(_)));

        assert_eq!(form.draft(), &before);
    }

    #[test]
    fn test_build_payload_is_pure() {
        let mut form = FormController::new();
        form.update("Age", "48").expect("age");
        form.update("Cholesterol", "abc").expect("chol");

        let before = form.draft().clone();
        let first = form.build_payload().expect("payload");
        let second = form.build_payload().expect("payload");

        assert_eq!(first, second);
        assert_eq!(form.draft(), &before);
        assert_eq!(form.value(FieldName::Cholesterol), "abc");
    }

    #[test]
    fn test_missing_age_fails_regardless_of_other_fields() {
        let mut form = FormController::new();
        form.load_sample();
        form.update("Age", "").expect("age");

        assert_eq!(form.build_payload(), Err(ValidationError::MissingAge));
    }

    #[test]
    fn test_sample_and_reset() {
        let mut form = FormController::new();
        form.load_sample();
        let payload = form.build_payload().expect("sample is complete");
        assert_eq!(payload.age, "54");
        assert_eq!(payload.cholesterol, Some(239.0));

        form.cycle(FieldName::Sex, true);
        assert_eq!(form.draft().sex, Sex::F);

        form.reset();
        assert_eq!(form.draft(), &FeatureDraft::default());
        assert_eq!(form.draft().chest_pain_type, ChestPainType::ASY);
    }

    #[test]
    fn test_sample_overwrites_every_field() {
        let mut form = FormController::new();
        form.update("Cholesterol", "999").expect("chol");
        form.update("ST_Slope", "Down").expect("slope");
        form.load_sample();

        let expected = [
            (FieldName::Age, "54"),
            (FieldName::Sex, "M"),
            (FieldName::ChestPainType, "ASY"),
            (FieldName::RestingBP, "140"),
            (FieldName::Cholesterol, "239"),
            (FieldName::FastingBS, "0"),
            (FieldName::RestingECG, "Normal"),
            (FieldName::MaxHR, "136"),
            (FieldName::ExerciseAngina, "Y"),
            (FieldName::Oldpeak, "1.2"),
            (FieldName::StSlope, "Flat"),
        ];
        for (field, value) in expected {
            assert_eq!(form.value(field), value, "{field}");
        }

        // Every sample value survives a round trip through the edit path.
        let mut replayed = FormController::new();
        for field in FieldName::ALL {
            replayed
                .update_field(field, form.value(field))
                .expect("sample value is valid");
        }
        assert_eq!(replayed.draft(), form.draft());
    }

    #[test]
    fn test_edit_text_skips_choice_fields() {
        let mut form = FormController::new();
        assert!(form.edit_text(FieldName::Age, |value| value.push('6')));
        assert!(!form.edit_text(FieldName::Sex, |value| value.push('F')));
        assert_eq!(form.value(FieldName::Age), "6");
        assert_eq!(form.value(FieldName::Sex), "M");
    }
}
