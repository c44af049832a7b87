use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use fnv::FnvHashSet;

use crate::fastg::{EdgeName, EdgeRecord, EdgeTable};

/// Whether `write_fastg` appends to or overwrites the target file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Append,
    Overwrite,
}

/// Reconstruct a record's main descriptor:
/// `EDGE_<base>_length_<length>_cov_<coverage>`, coverage with six
/// decimal places, with a trailing `'` iff the record is on the
/// reverse strand. The `+`/`-` strand suffix itself is never
/// written.
pub fn main_descriptor(record: &EdgeRecord) -> String {
    format!(
        "EDGE_{}_length_{}_cov_{:.6}{}",
        record.name.base,
        record.length,
        record.coverage,
        record.name.orientation.rc_marker()
    )
}

/// Render one record's full `.fastg` descriptor line. Neighbor
/// descriptors are rendered from the rows of `table` that match the
/// record's neighbor list, in table row order (not neighbor-list
/// order); neighbors absent from the table are silently omitted, so
/// a fully dangling adjacency renders as no adjacency at all.
pub fn entry_string(table: &EdgeTable, record: &EdgeRecord) -> String {
    let mut descriptor = String::from(">");
    descriptor.push_str(&main_descriptor(record));

    if !record.neighbors.is_empty() {
        let names: FnvHashSet<EdgeName> =
            record.neighbors.iter().cloned().collect();
        let rows = table.select(&names);
        if !rows.is_empty() {
            let joined: Vec<String> =
                rows.iter().map(main_descriptor).collect();
            descriptor.push(':');
            descriptor.push_str(&joined.join(","));
        }
    }

    descriptor.push(';');
    descriptor
}

/// Write a table to a stream in `.fastg` format. For each row the
/// sequence line comes first, then the descriptor line; this
/// ordering is part of the format contract.
pub fn write_table<W: Write>(table: &EdgeTable, stream: &mut W) -> io::Result<()> {
    for record in table.iter() {
        writeln!(stream, "{}", record.sequence)?;
        writeln!(stream, "{}", entry_string(table, record))?;
    }
    Ok(())
}

/// Write a table to the file at `path`, appending or overwriting
/// per `mode`.
pub fn write_fastg<P: AsRef<Path>>(
    table: &EdgeTable,
    path: P,
    mode: WriteMode,
) -> io::Result<()> {
    let file = match mode {
        WriteMode::Append => {
            OpenOptions::new().create(true).append(true).open(path)?
        }
        WriteMode::Overwrite => File::create(path)?,
    };
    let mut stream = BufWriter::new(file);
    write_table(table, &mut stream)?;
    stream.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fastg::EdgeRecord;
    use crate::parser::FastgParser;
    use crate::writer::WriteMode::{Append, Overwrite};

    fn record(name: &str, length: u64, cov: f64, neighbors: &[&str]) -> EdgeRecord {
        EdgeRecord::new(
            name.parse().unwrap(),
            length,
            cov,
            "ACGT".to_string(),
            neighbors.iter().map(|n| n.parse().unwrap()).collect(),
        )
    }

    #[test]
    fn print_main_descriptor() {
        let fwd = record("1+", 5, 2.0, &[]);
        assert_eq!(main_descriptor(&fwd), "EDGE_1_length_5_cov_2.000000");

        let rev = record("3-", 100, 28.087, &[]);
        assert_eq!(
            main_descriptor(&rev),
            "EDGE_3_length_100_cov_28.087000'"
        );
    }

    #[test]
    fn print_orphaned_entry() {
        let table: EdgeTable =
            vec![record("1+", 5, 2.0, &[])].into_iter().collect();
        assert_eq!(
            entry_string(&table, &table.records()[0]),
            ">EDGE_1_length_5_cov_2.000000;"
        );
    }

    #[test]
    fn neighbor_descriptors_follow_table_order() {
        // the record lists 5+ before 2-, but 2- comes first in the table
        let table: EdgeTable = vec![
            record("2-", 3, 1.0, &[]),
            record("5+", 7, 4.5, &[]),
            record("1+", 5, 2.0, &["5+", "2-"]),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            entry_string(&table, &table.records()[2]),
            ">EDGE_1_length_5_cov_2.000000:\
             EDGE_2_length_3_cov_1.000000',\
             EDGE_5_length_7_cov_4.500000;"
        );
    }

    #[test]
    fn dangling_neighbors_are_dropped() {
        let table: EdgeTable = vec![
            record("1+", 5, 2.0, &["9+", "2-"]),
            record("2-", 3, 1.0, &[]),
        ]
        .into_iter()
        .collect();

        // 9+ has no row, so only 2- is rendered
        assert_eq!(
            entry_string(&table, &table.records()[0]),
            ">EDGE_1_length_5_cov_2.000000:EDGE_2_length_3_cov_1.000000';"
        );

        // a fully dangling adjacency renders as none at all
        let orphan: EdgeTable =
            vec![record("1+", 5, 2.0, &["9+"])].into_iter().collect();
        assert_eq!(
            entry_string(&orphan, &orphan.records()[0]),
            ">EDGE_1_length_5_cov_2.000000;"
        );
    }

    #[test]
    fn sequence_line_precedes_descriptor_line() {
        let table: EdgeTable =
            vec![record("1+", 5, 2.0, &[])].into_iter().collect();

        let mut out = Vec::new();
        write_table(&table, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "ACGT\n>EDGE_1_length_5_cov_2.000000;\n"
        );
    }

    #[test]
    fn append_and_overwrite_modes() {
        let file = tempfile::Builder::new()
            .suffix(".fastg")
            .tempfile()
            .unwrap();
        let path = file.path();

        let table: EdgeTable =
            vec![record("1+", 4, 2.0, &[])].into_iter().collect();

        write_fastg(&table, path, Append).unwrap();
        write_fastg(&table, path, Append).unwrap();
        assert_eq!(FastgParser::new().parse(path).unwrap().len(), 2);

        write_fastg(&table, path, Overwrite).unwrap();
        assert_eq!(FastgParser::new().parse(path).unwrap().len(), 1);
    }

    #[test]
    fn round_trip_preserves_records() {
        let original = FastgParser::new().parse("./lil.fastg").unwrap();

        let file = tempfile::Builder::new()
            .suffix(".fastg")
            .tempfile()
            .unwrap();
        write_fastg(&original, file.path(), Overwrite).unwrap();

        let reparsed = FastgParser::new().parse(file.path()).unwrap();

        let sorted = |table: &EdgeTable| {
            let mut rows: Vec<EdgeRecord> =
                table.iter().cloned().collect();
            rows.sort_by(|a, b| a.name.cmp(&b.name));
            rows
        };
        assert_eq!(sorted(&original), sorted(&reparsed));
    }
}
