use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidPhoneNumber { input: String },
    Zero { field: &'static str },
    DuplicateVariable { name: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::Zero { field } => write!(f, "{field} must be greater than zero"),
            Self::DuplicateVariable { name } => {
                write!(f, "pattern variable declared more than once: {name}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
