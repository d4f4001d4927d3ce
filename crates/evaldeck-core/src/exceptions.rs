#[derive(Debug, PartialEq)]
pub enum GenericError {
    ParseError(String),
    RuntimeError(String),
}
impl GenericError {
    pub fn to_string(&self) -> String {
        match self {
            Self::ParseError(msg) => format!("ParseError: {}", msg),
            Self::RuntimeError(msg) => format!("Runtime Error: {}", msg),
        }
    }
}
