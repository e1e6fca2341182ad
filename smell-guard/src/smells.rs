//! The catalog of data smell kinds.
//!
//! A data smell is a heuristic hint that the values of a column may carry a
//! quality defect. The catalog is fixed at compile time; detectors only ever
//! report kinds listed here, even though only a subset has a checker.

use crate::error::{Result, SmellError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

macro_rules! smell_catalog {
    ($($variant:ident => $ident:literal, $name:literal, $description:literal;)+) => {
        /// A kind of data smell.
        ///
        /// Serialized as its identifier, e.g. `"CASING_SMELL"`.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum SmellKind {
            $(
                #[doc = $description]
                $variant,
            )+
        }

        impl SmellKind {
            /// Every smell kind of the catalog, in declaration order.
            pub const ALL: &'static [SmellKind] = &[$(SmellKind::$variant),+];

            /// The stable identifier, e.g. `EXTREME_VALUE_SMELL`.
            pub fn identifier(&self) -> &'static str {
                match self {
                    $(SmellKind::$variant => $ident,)+
                }
            }

            /// The human readable name, e.g. `Extreme Value Smell`.
            pub fn name(&self) -> &'static str {
                match self {
                    $(SmellKind::$variant => $name,)+
                }
            }

            /// A one paragraph description of the smell.
            pub fn description(&self) -> &'static str {
                match self {
                    $(SmellKind::$variant => $description,)+
                }
            }
        }

        impl FromStr for SmellKind {
            type Err = SmellError;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($ident => Ok(SmellKind::$variant),)+
                    other => Err(SmellError::configuration(format!(
                        "Unknown data smell kind '{other}'"
                    ))),
                }
            }
        }
    };
}

smell_catalog! {
    DummyValue => "DUMMY_VALUE_SMELL", "Dummy Value Smell",
        "A substitute (sentinel) value is used, e.g. for missing or unknown values or to get around not-null constraints.";
    DuplicatedValue => "DUPLICATED_VALUE_SMELL", "Duplicated Value Smell",
        "Data values are syntactically equal across several data instances.";
    ExtremeValue => "EXTREME_VALUE_SMELL", "Extreme Value Smell",
        "Data instances have extreme values relative to the other data instances.";
    MeaninglessValue => "MEANINGLESS_VALUE_SMELL", "Meaningless Value Smell",
        "A data value has no common meaning or contains suspect repeating sequences of characters.";
    Misspelling => "MISSPELLING_SMELL", "Misspelling Smell",
        "A data value probably has a spelling error.";
    SuspectClassValue => "SUSPECT_CLASS_VALUE_SMELL", "Suspect Class Value Smell",
        "Categorical data instances have uncommon class values.";
    SuspectDateValue => "SUSPECT_DATE_VALUE_SMELL", "Suspect Date Value Smell",
        "A data value represents a date far in the past or future.";
    SuspectDateTimeInterval => "SUSPECT_DATE_TIME_INTERVAL_SMELL", "Suspect Date/Time Interval Smell",
        "There is a very long or very short date/time interval between data instances.";
    SuspectSign => "SUSPECT_SIGN_SMELL", "Suspect Sign Smell",
        "Data instances have a different sign (+/-) than the rest of the instances.";
    SuspectDistribution => "SUSPECT_DISTRIBUTION_SMELL", "Suspect Distribution Smell",
        "The data values have a suspect distribution.";
    AmbiguousDateTimeFormat => "AMBIGUOUS_DATE_TIME_FORMAT_SMELL", "Ambiguous Date/Time Format Smell",
        "A date is represented in short format or a timestamp in 12 hour format.";
    AmbiguousValue => "AMBIGUOUS_VALUE_SMELL", "Ambiguous Value Smell",
        "Data values represent abbreviations, homonyms, acronyms or an ambiguous context.";
    Casing => "CASING_SMELL", "Casing Smell",
        "Data values use upper and lower case in an unusual way (mixed case, upper only, lower only).";
    Contracting => "CONTRACTING_SMELL", "Contracting Smell",
        "Data values represent shortened versions of words or phrases.";
    ExtraneousValue => "EXTRANEOUS_VALUE_SMELL", "Extraneous Value Smell",
        "Data values provide additional, likely unnecessary information.";
    IntermingledDataType => "INTERMINGLED_DATA_TYPE_SMELL", "Intermingled Data Type Smell",
        "Data values contain both numeric and alphabetic characters.";
    LongDataValue => "LONG_DATA_VALUE_SMELL", "Long Data Value Smell",
        "Data values are too long to understand.";
    MissingValue => "MISSING_VALUE_SMELL", "Missing Value Smell",
        "Data instances have no data values.";
    Separating => "SEPARATING_SMELL", "Separating Smell",
        "Data values contain thousands separators for grouping digits, which can be confused with decimal separators.";
    Spacing => "SPACING_SMELL", "Spacing Smell",
        "Data values contain an uncommon pattern of spaces (trailing, leading, multiple or missing spaces).";
    SpecialCharacter => "SPECIAL_CHARACTER_SMELL", "Special Character Smell",
        "Data values contain special (non-alphanumeric) characters such as commas, dashes, tabs or accented letters.";
    Synonym => "SYNONYM_SMELL", "Synonym Smell",
        "Data values have the same semantic meaning but differ syntactically (aliases, nick names, pseudonyms).";
    Tagging => "TAGGING_SMELL", "Tagging Smell",
        "Data values represent tags.";
    DateAsDateTime => "DATE_AS_DATE_TIME_SMELL", "Date As DateTime Smell",
        "A date is encoded as a datetime data type.";
    DateAsString => "DATE_AS_STRING_SMELL", "Date As String Smell",
        "A date is encoded as a string.";
    DateTimeAsString => "DATE_TIME_AS_STRING_SMELL", "DateTime As String Smell",
        "A date and a timestamp are encoded as a string.";
    FloatingPointNumberAsString => "FLOATING_POINT_NUMBER_AS_STRING_SMELL", "Floating Point Number As String Smell",
        "A floating-point number is encoded as a string.";
    IntegerAsFloatingPointNumber => "INTEGER_AS_FLOATING_POINT_NUMBER_SMELL", "Integer As Floating Point Number Smell",
        "An integer is encoded as a floating-point number.";
    IntegerAsString => "INTEGER_AS_STRING_SMELL", "Integer As String Smell",
        "An integer is encoded as a string.";
    TimeAsString => "TIME_AS_STRING_SMELL", "Time As String Smell",
        "A timestamp is encoded as a string.";
    SuspectCharacterEncoding => "SUSPECT_CHARACTER_ENCODING_SMELL", "Suspect Character Encoding Smell",
        "Special characters or umlauts are incorrectly encoded.";
    AbbreviationInconsistency => "ABBREVIATION_INCONSISTENCY_SMELL", "Abbreviation Inconsistency Smell",
        "Abbreviations or contractions are not used consistently.";
    CasingInconsistency => "CASING_INCONSISTENCY_SMELL", "Casing Inconsistency Smell",
        "Upper and lower case are not used consistently.";
    ClassInconsistency => "CLASS_INCONSISTENCY_SMELL", "Class Inconsistency Smell",
        "Class values of categorical data are not used consistently (different representations or abstractions).";
    DateTimeFormatInconsistency => "DATE_TIME_FORMAT_INCONSISTENCY_SMELL", "Date/Time Format Inconsistency Smell",
        "Date or time formats are not used consistently.";
    MissingValueInconsistency => "MISSING_VALUE_INCONSISTENCY_SMELL", "Missing Value Inconsistency Smell",
        "Constants representing missing values are not used consistently.";
    SeparatingInconsistency => "SEPARATING_INCONSISTENCY_SMELL", "Separating Inconsistency Smell",
        "Thousands separators are not used consistently.";
    SpacingInconsistency => "SPACING_INCONSISTENCY_SMELL", "Spacing Inconsistency Smell",
        "Spacing is not used consistently.";
    SpecialCharacterInconsistency => "SPECIAL_CHARACTER_INCONSISTENCY_SMELL", "Special Character Inconsistency Smell",
        "Special characters are not used consistently.";
    SyntaxInconsistency => "SYNTAX_INCONSISTENCY_SMELL", "Syntax Inconsistency Smell",
        "The general syntax of data values (decimal places, area codes, extraneous information) is not used consistently.";
    UnitInconsistency => "UNIT_INCONSISTENCY_SMELL", "Unit Inconsistency Smell",
        "Units of measurement are not used consistently.";
    TranspositionInconsistency => "TRANSPOSITION_INCONSISTENCY_SMELL", "Transposition Inconsistency Smell",
        "The ordering of words or special characters is not used consistently.";
}

impl fmt::Display for SmellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl Serialize for SmellKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.identifier())
    }
}

impl<'de> Deserialize<'de> for SmellKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let identifier = String::deserialize(deserializer)?;
        identifier.parse().map_err(serde::de::Error::custom)
    }
}
