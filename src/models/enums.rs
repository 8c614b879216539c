use crate::form::FormError;

/// Macro to generate a closed choice list with as_str + std::str::FromStr.
///
/// The first listed variant is the control's default, and `ALL` keeps
/// declaration order so the rendered `<select>` matches the model's vocabulary.
macro_rules! choice_enum {
    ($name:ident, $field:literal { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::ALL[0]
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = FormError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(FormError::InvalidChoice {
                        field: $field,
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

choice_enum!(AgeBracket, "age" {
    Age0To10 => "[0-10)",
    Age10To20 => "[10-20)",
    Age20To30 => "[20-30)",
    Age30To40 => "[30-40)",
    Age40To50 => "[40-50)",
    Age50To60 => "[50-60)",
    Age60To70 => "[60-70)",
    Age70To80 => "[70-80)",
    Age80To90 => "[80-90)",
    Age90To100 => "[90-100)",
});

choice_enum!(Gender, "gender" {
    Male => "Male",
    Female => "Female",
});

choice_enum!(MedicalSpecialty, "medical_specialty" {
    InternalMedicine => "InternalMedicine",
    FamilyGeneralPractice => "Family/GeneralPractice",
    Cardiology => "Cardiology",
    EmergencyTrauma => "Emergency/Trauma",
    Orthopedics => "Orthopedics",
    Other => "Other",
    Unknown => "Unknown",
});

choice_enum!(InsulinUsage, "insulin" {
    No => "No",
    Steady => "Steady",
    Up => "Up",
    Down => "Down",
});

choice_enum!(MedicationChange, "change" {
    No => "No",
    Changed => "Ch",
});

choice_enum!(DiabetesMedication, "diabetesMed" {
    Yes => "Yes",
    No => "No",
});
