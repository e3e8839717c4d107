use thiserror::Error;

/// Bad input shape. Never reaches the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Parameter error: name must contain numbers and lowercase letters only.")]
    NamePattern,

    #[error("Parameter error: name length must be between 3 and 24 characters.")]
    NameLength,

    #[error("Parameter error: expecting custom_domain to have a name attribute of type string.")]
    CustomDomainName,

    #[error(
        "Parameter error: expecting custom_domain to have a use_sub_domain attribute of type boolean."
    )]
    CustomDomainUseSubDomain,

    #[error("Parameter error: {0} required when creating a storage account.")]
    MissingForCreate(&'static str),

    #[error("Parameter error: {0}")]
    Payload(String),
}

impl From<serde_json::Error> for ValidationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Payload(err.to_string())
    }
}
