pub mod error;

pub use self::error::*;

use nom::bytes::complete::{tag, take_while1};
use nom::character::complete::{alphanumeric1, char, digit1};
use nom::combinator::{all_consuming, map_res, opt};
use nom::IResult;

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

use crate::fastg::*;

/// One header/body pair split out of an assembly-graph file. The
/// body is the concatenation of all sequence lines up to the next
/// header, with no separator; `line` is the 1-based line number of
/// the header.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub header: String,
    pub sequence: String,
    pub line: usize,
}

/// Splits file text into header/body entries. A header is any line
/// starting with `>`. Lines are trimmed of surrounding whitespace;
/// lines preceding the first header belong to no entry and are
/// discarded. Fails with `ParseError::EmptyFile` when the text
/// contains no header line at all.
pub fn read_entries(text: &str) -> FastgResult<Vec<Entry>> {
    let mut entries: Vec<Entry> = Vec::new();
    let mut current: Option<Entry> = None;

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.starts_with('>') {
            if let Some(entry) = current.take() {
                entries.push(entry);
            }
            current = Some(Entry {
                header: line.to_string(),
                sequence: String::new(),
                line: i + 1,
            });
        } else if let Some(entry) = current.as_mut() {
            entry.sequence.push_str(line);
        }
    }
    if let Some(entry) = current {
        entries.push(entry);
    }

    if entries.is_empty() {
        return Err(ParseError::EmptyFile);
    }
    Ok(entries)
}

/// The shape of one parsed `EDGE_<name>_length_<length>_cov_<coverage>`
/// descriptor, with the optional trailing `'` reverse-complement
/// marker folded into the name's orientation.
fn descriptor(input: &str) -> IResult<&str, (EdgeName, u64, f64)> {
    let (input, _) = tag("EDGE_")(input)?;
    let (input, base) = alphanumeric1(input)?;
    let (input, _) = tag("_length_")(input)?;
    let (input, length) = map_res(digit1, |s: &str| s.parse::<u64>())(input)?;
    let (input, _) = tag("_cov_")(input)?;
    let (input, coverage) = map_res(
        take_while1(|c: char| c.is_ascii_digit() || c == '.'),
        |s: &str| s.parse::<f64>(),
    )(input)?;
    let (input, rc) = opt(char('\''))(input)?;

    let name = EdgeName::new(base, Orientation::from_rc_marker(rc.is_some()));
    Ok((input, (name, length, coverage)))
}

/// Parses a full descriptor, requiring the whole input to match.
fn parse_descriptor(input: &str) -> FieldResult<(EdgeName, u64, f64)> {
    all_consuming(descriptor)(input)
        .map(|(_, fields)| fields)
        .map_err(|_| FieldError::BadDescriptor(input.to_string()))
}

/// Parser for the SPAdes `.fastg` dialect
#[derive(Debug, Default, Clone, Copy)]
pub struct FastgParser;

impl FastgParser {
    pub fn new() -> Self {
        FastgParser
    }

    /// Parse a `.fastg` file into an EdgeTable, rejecting paths that
    /// don't end in the `.fastg` extension. The first invalid entry
    /// aborts the whole parse.
    pub fn parse<P: AsRef<Path>>(&self, path: P) -> FastgResult<EdgeTable> {
        let path = path.as_ref();
        if path.extension().and_then(OsStr::to_str) != Some("fastg") {
            return Err(ParseError::InvalidExtension(
                path.display().to_string(),
            ));
        }
        let text = fs::read_to_string(path)?;
        self.parse_str(&text)
    }

    /// Parse `.fastg` text that has already been read into memory.
    pub fn parse_str(&self, text: &str) -> FastgResult<EdgeTable> {
        read_entries(text)?
            .iter()
            .map(fastg_entry_to_record)
            .collect()
    }
}

fn check_fastg_entry(entry: &Entry) -> FastgResult<()> {
    if entry.header.contains('[') || entry.header.contains(']') {
        return Err(ParseError::invalid_entry(
            FieldError::BracketNotation,
            entry.line,
            &entry.header,
        ));
    }
    if !entry.header.ends_with(';') {
        return Err(ParseError::invalid_entry(
            FieldError::MissingTerminator,
            entry.line,
            &entry.header,
        ));
    }
    if entry
        .sequence
        .chars()
        .any(|c| !matches!(c, 'A' | 'C' | 'G' | 'T' | 'U'))
    {
        // the body starts on the line after the header
        return Err(ParseError::invalid_entry(
            FieldError::InvalidSequence,
            entry.line + 1,
            &entry.sequence,
        ));
    }
    Ok(())
}

fn fastg_entry_to_record(entry: &Entry) -> FastgResult<EdgeRecord> {
    check_fastg_entry(entry)?;

    let header = entry.header.trim_end_matches(';');
    // left of the first `:` is the main descriptor, the rest lists
    // the neighbor descriptors; no `:` means an orphaned or terminal
    // edge
    let (main, rest) = match header.find(':') {
        Some(at) => (&header[..at], Some(&header[at + 1..])),
        None => (header, None),
    };

    let fail =
        |e: FieldError| ParseError::invalid_entry(e, entry.line, &entry.header);

    // strip the leading `>` before matching
    let (name, length, coverage) =
        parse_descriptor(&main[1..]).map_err(&fail)?;

    // only the neighbor's derived name is retained; its length and
    // coverage duplicate that neighbor's own record
    let neighbors = match rest {
        None => Vec::new(),
        Some(list) => list
            .split(',')
            .map(|d| parse_descriptor(d).map(|(name, _, _)| name))
            .collect::<FieldResult<Vec<_>>>()
            .map_err(&fail)?,
    };

    Ok(EdgeRecord::new(
        name,
        length,
        coverage,
        entry.sequence.clone(),
        neighbors,
    ))
}

lazy_static! {
    static ref BCALM_ID: Regex = Regex::new(r"^>(\d+)").unwrap();
    static ref BCALM_LENGTH: Regex = Regex::new(r"LN:i:(\d+)").unwrap();
    static ref BCALM_TOTAL: Regex = Regex::new(r"KC:i:(\d+)").unwrap();
    static ref BCALM_AVG: Regex =
        Regex::new(r"km:f:(\d+(?:\.\d+)?)").unwrap();
    static ref BCALM_EDGE: Regex = Regex::new(r"L:[-+]:(\d+):[-+]").unwrap();
}

fn tagged_field<'a>(
    re: &Regex,
    header: &'a str,
    name: &'static str,
) -> FieldResult<&'a str> {
    re.captures(header)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or(FieldError::MissingTag(name))
}

fn tagged_u64(
    re: &Regex,
    header: &str,
    name: &'static str,
) -> FieldResult<u64> {
    tagged_field(re, header, name)?
        .parse()
        .map_err(|_| FieldError::InvalidField(name))
}

fn tagged_f64(
    re: &Regex,
    header: &str,
    name: &'static str,
) -> FieldResult<f64> {
    tagged_field(re, header, name)?
        .parse()
        .map_err(|_| FieldError::InvalidField(name))
}

/// Parser for the bcalm `.fasta` dialect. The header carries tagged
/// fields rather than the fixed SPAdes descriptor syntax; the
/// sequence body is trusted as given.
#[derive(Debug, Default, Clone, Copy)]
pub struct BcalmParser;

impl BcalmParser {
    pub fn new() -> Self {
        BcalmParser
    }

    pub fn parse<P: AsRef<Path>>(&self, path: P) -> FastgResult<EdgeTable> {
        let text = fs::read_to_string(path)?;
        self.parse_str(&text)
    }

    pub fn parse_str(&self, text: &str) -> FastgResult<EdgeTable> {
        read_entries(text)?
            .iter()
            .map(bcalm_entry_to_record)
            .collect()
    }
}

fn bcalm_entry_to_record(entry: &Entry) -> FastgResult<EdgeRecord> {
    let header = entry.header.as_str();
    let fail =
        |e: FieldError| ParseError::invalid_entry(e, entry.line, header);

    let base = tagged_field(&BCALM_ID, header, "id").map_err(&fail)?;
    let length = tagged_u64(&BCALM_LENGTH, header, "LN:i:").map_err(&fail)?;
    let total = tagged_u64(&BCALM_TOTAL, header, "KC:i:").map_err(&fail)?;
    let avg = tagged_f64(&BCALM_AVG, header, "km:f:").map_err(&fail)?;

    let edge_tags: Vec<String> = BCALM_EDGE
        .find_iter(header)
        .map(|m| m.as_str().to_string())
        .collect();
    let neighbors: Vec<EdgeName> = BCALM_EDGE
        .captures_iter(header)
        .map(|caps| EdgeName::forward(&caps[1]))
        .collect();

    let mut record = EdgeRecord::new(
        EdgeName::forward(base),
        length,
        avg,
        entry.sequence.clone(),
        neighbors,
    );
    record.total_abundance = Some(total);
    record.avg_abundance = Some(avg);
    record.edge_tags = edge_tags;
    Ok(record)
}
