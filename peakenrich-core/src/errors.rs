use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Expected {expected} tab-separated fields, found {found}: {line}")]
    FieldCount {
        expected: usize,
        found: usize,
        line: String,
    },

    #[error("Error parsing {field} from value '{value}'")]
    FieldParse { field: &'static str, value: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
