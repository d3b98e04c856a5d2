use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalyzerError>;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Syntax error at line {line}, column {column}")]
    Syntax { line: usize, column: usize },

    #[error("Parser error: {0}")]
    Parser(String),
}
