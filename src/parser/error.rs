use std::{error, fmt};

pub type FieldResult<T> = Result<T, FieldError>;
pub type FastgResult<T> = Result<T, ParseError>;

/// The grammar violations a single entry can exhibit
#[derive(Debug, Clone, PartialEq)]
pub enum FieldError {
    /// The header used the `[` `]` bracket notation, a dialect
    /// extension this parser does not support.
    BracketNotation,
    /// The header did not end with the `;` terminator.
    MissingTerminator,
    /// The sequence body contained a character outside {A,C,G,T,U}.
    InvalidSequence,
    /// A descriptor did not match the
    /// `EDGE_<name>_length_<length>_cov_<coverage>` shape. Carries
    /// the offending descriptor text.
    BadDescriptor(String),
    /// A required bcalm header tag was absent. Includes the tag name.
    MissingTag(&'static str),
    /// A tag's value couldn't be parsed into the correct type.
    /// Includes the tag name.
    InvalidField(&'static str),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use FieldError as FE;
        match self {
            FE::BracketNotation => {
                write!(f, "Descriptor: [] notation not supported")
            }
            FE::MissingTerminator => {
                write!(f, "Descriptor: must end with ;")
            }
            FE::InvalidSequence => write!(
                f,
                "Sequence: not a valid nucleotide sequence (contains prohibited characters)"
            ),
            FE::BadDescriptor(desc) => write!(
                f,
                "Only the SPAdes descriptor dialect is supported, check your descriptors: `{}`",
                desc
            ),
            FE::MissingTag(tag) => {
                write!(f, "Header is missing required tag `{}`", tag)
            }
            FE::InvalidField(tag) => {
                write!(f, "Failed to parse the value of tag `{}`", tag)
            }
        }
    }
}

impl error::Error for FieldError {}

/// Type encapsulating the different kinds of parse failures
#[derive(Debug)]
pub enum ParseError {
    /// The path did not carry the expected file extension. Includes
    /// the path as given.
    InvalidExtension(String),
    /// The file was empty, or contained no header lines.
    EmptyFile,
    /// An entry couldn't be parsed. Includes a variant describing the
    /// error, the 1-based line number it was detected at, and the raw
    /// offending text.
    InvalidEntry(FieldError, usize, String),
    /// Wrapper for an IO error.
    IOError(std::io::Error),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ParseError as PE;
        match self {
            PE::InvalidExtension(path) => write!(
                f,
                "The path `{}` does not end with .fastg; if it is a .fastg file please rename it and try again",
                path
            ),
            PE::EmptyFile => {
                write!(f, "File was empty or contained no `>` header lines")
            }
            PE::InvalidEntry(field_err, line, text) => {
                write!(f, "Line {}: {}\n{}", line, field_err, text)
            }
            PE::IOError(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl From<std::io::Error> for ParseError {
    #[inline]
    fn from(err: std::io::Error) -> Self {
        Self::IOError(err)
    }
}

impl error::Error for ParseError {}

impl ParseError {
    #[inline]
    pub(crate) fn invalid_entry(
        error: FieldError,
        line: usize,
        text: &str,
    ) -> Self {
        Self::InvalidEntry(error, line, text.to_string())
    }
}
