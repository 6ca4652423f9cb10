//! Feature draft for heart-disease prediction.
//!
//! Columns follow the UCI/Kaggle heart failure dataset that the prediction
//! service was trained on. Field names are the service's JSON keys.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use zeroize::Zeroize;

/// Error raised when a field edit cannot be applied to the draft.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("Unknown field: {0}")]
    Unknown(String),

    #[error("Invalid value {value:?} for {field}")]
    InvalidValue { field: FieldName, value: String },
}

/// A categorical input with a closed set of service-defined codes.
///
/// The terminal form cycles through `ALL` in place of a select widget.
pub trait Choice: Copy + PartialEq + Sized + 'static {
    /// Every option, in display order.
    const ALL: &'static [Self];

    /// Wire code sent to the prediction service.
    fn code(self) -> &'static str;

    /// Human-readable option label.
    fn label(self) -> &'static str;

    /// Parse a wire code (surrounding whitespace ignored).
    fn from_code(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.iter().copied().find(|option| option.code() == raw)
    }

    /// Step to the neighbouring option, wrapping at both ends.
    fn cycle(self, forward: bool) -> Self {
        let count = Self::ALL.len();
        let idx = Self::ALL
            .iter()
            .position(|option| *option == self)
            .unwrap_or(0);
        let next = if forward {
            (idx + 1) % count
        } else {
            (idx + count - 1) % count
        };
        Self::ALL[next]
    }
}

/// Biological sex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Sex {
    #[default]
    M,
    F,
}

impl Choice for Sex {
    const ALL: &'static [Self] = &[Self::M, Self::F];

    fn code(self) -> &'static str {
        match self {
            Self::M => "M",
            Self::F => "F",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::M => "Male",
            Self::F => "Female",
        }
    }
}

/// Chest pain presentation.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ChestPainType {
    #[default]
    ASY,
    NAP,
    ATA,
    TA,
}

impl Choice for ChestPainType {
    const ALL: &'static [Self] = &[Self::ASY, Self::NAP, Self::ATA, Self::TA];

    fn code(self) -> &'static str {
        match self {
            Self::ASY => "ASY",
            Self::NAP => "NAP",
            Self::ATA => "ATA",
            Self::TA => "TA",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::ASY => "Asymptomatic",
            Self::NAP => "Non-anginal pain",
            Self::ATA => "Atypical angina",
            Self::TA => "Typical angina",
        }
    }
}

/// Fasting blood sugar above 120 mg/dl. Sent as the integer 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FastingBloodSugar {
    #[default]
    Normal,
    Elevated,
}

impl FastingBloodSugar {
    #[must_use]
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::Elevated => 1,
        }
    }
}

impl Serialize for FastingBloodSugar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

impl Choice for FastingBloodSugar {
    const ALL: &'static [Self] = &[Self::Normal, Self::Elevated];

    fn code(self) -> &'static str {
        match self {
            Self::Normal => "0",
            Self::Elevated => "1",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Normal => "<= 120 mg/dl",
            Self::Elevated => "> 120 mg/dl",
        }
    }
}

/// Resting electrocardiogram result.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum RestingEcg {
    #[default]
    Normal,
    ST,
    LVH,
}

impl Choice for RestingEcg {
    const ALL: &'static [Self] = &[Self::Normal, Self::ST, Self::LVH];

    fn code(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::ST => "ST",
            Self::LVH => "LVH",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::ST => "ST-T wave abnormality",
            Self::LVH => "Left ventricular hypertrophy",
        }
    }
}

/// Exercise-induced angina.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ExerciseAngina {
    #[default]
    N,
    Y,
}

impl Choice for ExerciseAngina {
    const ALL: &'static [Self] = &[Self::N, Self::Y];

    fn code(self) -> &'static str {
        match self {
            Self::N => "N",
            Self::Y => "Y",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::N => "No angina",
            Self::Y => "Angina",
        }
    }
}

/// Slope of the peak exercise ST segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum StSlope {
    #[default]
    Flat,
    Up,
    Down,
}

impl Choice for StSlope {
    const ALL: &'static [Self] = &[Self::Flat, Self::Up, Self::Down];

    fn code(self) -> &'static str {
        match self {
            Self::Flat => "Flat",
            Self::Up => "Up",
            Self::Down => "Down",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Flat => "Flat",
            Self::Up => "Upsloping",
            Self::Down => "Downsloping",
        }
    }
}

/// Names of the draft's fields, spelled as the service's JSON keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    Age,
    Sex,
    ChestPainType,
    RestingBP,
    Cholesterol,
    FastingBS,
    RestingECG,
    MaxHR,
    ExerciseAngina,
    Oldpeak,
    StSlope,
}

impl FieldName {
    /// All fields in form order.
    pub const ALL: [FieldName; 11] = [
        Self::Age,
        Self::Sex,
        Self::ChestPainType,
        Self::RestingBP,
        Self::Cholesterol,
        Self::FastingBS,
        Self::RestingECG,
        Self::MaxHR,
        Self::ExerciseAngina,
        Self::Oldpeak,
        Self::StSlope,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::Sex => "Sex",
            Self::ChestPainType => "ChestPainType",
            Self::RestingBP => "RestingBP",
            Self::Cholesterol => "Cholesterol",
            Self::FastingBS => "FastingBS",
            Self::RestingECG => "RestingECG",
            Self::MaxHR => "MaxHR",
            Self::ExerciseAngina => "ExerciseAngina",
            Self::Oldpeak => "Oldpeak",
            Self::StSlope => "ST_Slope",
        }
    }

    /// Whether the field holds free text (as opposed to a fixed option).
    #[must_use]
    pub fn is_text(self) -> bool {
        matches!(
            self,
            Self::Age | Self::RestingBP | Self::Cholesterol | Self::MaxHR | Self::Oldpeak
        )
    }

    /// Label shown in the form.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::Sex => "Sex",
            Self::ChestPainType => "Chest Pain",
            Self::RestingBP => "Resting BP",
            Self::Cholesterol => "Cholesterol",
            Self::FastingBS => "Fasting BS",
            Self::RestingECG => "Resting ECG",
            Self::MaxHR => "Max HR",
            Self::ExerciseAngina => "Exercise Angina",
            Self::Oldpeak => "Oldpeak",
            Self::StSlope => "ST Slope",
        }
    }

    /// Placeholder for empty text fields.
    #[must_use]
    pub fn hint(self) -> &'static str {
        match self {
            Self::Age => "years (required)",
            Self::RestingBP => "mmHg",
            Self::Cholesterol => "mg/dl",
            Self::MaxHR => "bpm",
            Self::Oldpeak => "ST depression",
            _ => "",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| FieldError::Unknown(s.to_string()))
    }
}

/// In-progress feature vector. Every field always holds a value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureDraft {
    pub age: String,
    pub sex: Sex,
    pub chest_pain_type: ChestPainType,
    pub resting_bp: String,
    pub cholesterol: String,
    pub fasting_bs: FastingBloodSugar,
    pub resting_ecg: RestingEcg,
    pub max_hr: String,
    pub exercise_angina: ExerciseAngina,
    pub oldpeak: String,
    pub st_slope: StSlope,
}

impl FeatureDraft {
    /// Raw value of a field as the form displays it.
    #[must_use]
    pub fn value(&self, field: FieldName) -> &str {
        match field {
            FieldName::Age => &self.age,
            FieldName::Sex => self.sex.code(),
            FieldName::ChestPainType => self.chest_pain_type.code(),
            FieldName::RestingBP => &self.resting_bp,
            FieldName::Cholesterol => &self.cholesterol,
            FieldName::FastingBS => self.fasting_bs.code(),
            FieldName::RestingECG => self.resting_ecg.code(),
            FieldName::MaxHR => &self.max_hr,
            FieldName::ExerciseAngina => self.exercise_angina.code(),
            FieldName::Oldpeak => &self.oldpeak,
            FieldName::StSlope => self.st_slope.code(),
        }
    }

    /// Option label for categorical fields, `None` for text fields.
    #[must_use]
    pub fn option_label(&self, field: FieldName) -> Option<&'static str> {
        match field {
            FieldName::Sex => Some(self.sex.label()),
            FieldName::ChestPainType => Some(self.chest_pain_type.label()),
            FieldName::FastingBS => Some(self.fasting_bs.label()),
            FieldName::RestingECG => Some(self.resting_ecg.label()),
            FieldName::ExerciseAngina => Some(self.exercise_angina.label()),
            FieldName::StSlope => Some(self.st_slope.label()),
            _ => None,
        }
    }

    /// Replace a field's value.
    ///
    /// Text fields take `raw` verbatim. Categorical fields must receive one of
    /// their codes; anything else is rejected and the draft is left as it was.
    ///
    /// # Errors
    /// Returns `FieldError::InvalidValue` for an unknown categorical code.
    pub fn set(&mut self, field: FieldName, raw: &str) -> Result<(), FieldError> {
        let invalid = || FieldError::InvalidValue {
            field,
            value: raw.to_string(),
        };

        match field {
            FieldName::Age => replace_text(&mut self.age, raw),
            FieldName::RestingBP => replace_text(&mut self.resting_bp, raw),
            FieldName::Cholesterol => replace_text(&mut self.cholesterol, raw),
            FieldName::MaxHR => replace_text(&mut self.max_hr, raw),
            FieldName::Oldpeak => replace_text(&mut self.oldpeak, raw),
            FieldName::Sex => self.sex = Sex::from_code(raw).ok_or_else(invalid)?,
            FieldName::ChestPainType => {
                self.chest_pain_type = ChestPainType::from_code(raw).ok_or_else(invalid)?
            }
            FieldName::FastingBS => {
                self.fasting_bs = FastingBloodSugar::from_code(raw).ok_or_else(invalid)?
            }
            FieldName::RestingECG => {
                self.resting_ecg = RestingEcg::from_code(raw).ok_or_else(invalid)?
            }
            FieldName::ExerciseAngina => {
                self.exercise_angina = ExerciseAngina::from_code(raw).ok_or_else(invalid)?
            }
            FieldName::StSlope => self.st_slope = StSlope::from_code(raw).ok_or_else(invalid)?,
        }

        Ok(())
    }

    /// Edit a text field's buffer in place.
    ///
    /// Returns `false` and leaves the draft alone for categorical fields. A
    /// buffer that has to grow is copied into a fresh allocation and the old
    /// one is wiped.
    pub fn edit_text(&mut self, field: FieldName, edit: impl FnOnce(&mut String)) -> bool {
        let slot = match field {
            FieldName::Age => &mut self.age,
            FieldName::RestingBP => &mut self.resting_bp,
            FieldName::Cholesterol => &mut self.cholesterol,
            FieldName::MaxHR => &mut self.max_hr,
            FieldName::Oldpeak => &mut self.oldpeak,
            _ => return false,
        };

        if slot.len() == slot.capacity() {
            let mut grown = String::with_capacity(slot.capacity().max(8) * 2);
            grown.push_str(slot.as_str());
            slot.zeroize();
            *slot = grown;
        }
        edit(slot);
        true
    }

    /// Step a categorical field to its next or previous option.
    ///
    /// Text fields are left untouched.
    pub fn cycle(&mut self, field: FieldName, forward: bool) {
        match field {
            FieldName::Sex => self.sex = self.sex.cycle(forward),
            FieldName::ChestPainType => self.chest_pain_type = self.chest_pain_type.cycle(forward),
            FieldName::FastingBS => self.fasting_bs = self.fasting_bs.cycle(forward),
            FieldName::RestingECG => self.resting_ecg = self.resting_ecg.cycle(forward),
            FieldName::ExerciseAngina => self.exercise_angina = self.exercise_angina.cycle(forward),
            FieldName::StSlope => self.st_slope = self.st_slope.cycle(forward),
            _ => {}
        }
    }

    /// Wipe text buffers and restore every field to its default.
    pub fn clear(&mut self) {
        self.age.zeroize();
        self.resting_bp.zeroize();
        self.cholesterol.zeroize();
        self.max_hr.zeroize();
        self.oldpeak.zeroize();
        *self = Self::default();
    }
}

fn replace_text(slot: &mut String, raw: &str) {
    slot.zeroize();
    slot.push_str(raw);
}
