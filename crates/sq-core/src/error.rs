use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error(
        "Not a valid unit scheme: {name:?} (choices are \"SI\", \"cgs\", \"Cosmology\", \"Zephyr\")"
    )]
    UnknownScheme { name: String },

    #[error("Unknown field {field:?} in the {catalog} catalog")]
    UnknownField {
        field: String,
        catalog: &'static str,
    },

    #[error("No usable scale factor for snapshot {snapshot} (probed through snapshot {probed})")]
    ScaleFactorUnavailable { snapshot: u32, probed: u32 },

    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
