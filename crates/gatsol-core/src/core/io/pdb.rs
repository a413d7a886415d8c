use std::io::{self, BufRead, Write};

const CHAIN_ID_COLUMN: usize = 21;
const RES_SEQ_COLUMNS: (usize, usize) = (22, 26);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TruncationStats {
    pub lines_read: usize,
    pub coordinates_dropped: usize,
    pub malformed_passed: usize,
}

fn is_coordinate_record(line: &str) -> bool {
    line.starts_with("ATOM") || line.starts_with("HETATM")
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> Option<&str> {
    line.get(start..end).map(str::trim)
}

/// Outcome of inspecting one coordinate line against the truncation limit.
#[derive(Debug, PartialEq, Eq)]
enum LineVerdict {
    Keep,
    Drop,
    Malformed,
}

fn judge_coordinate_line(line: &str, chain_id: char, max_residue: i32) -> LineVerdict {
    let chain = line
        .get(CHAIN_ID_COLUMN..CHAIN_ID_COLUMN + 1)
        .and_then(|s| s.chars().next());
    let res_seq = slice_and_trim(line, RES_SEQ_COLUMNS.0, RES_SEQ_COLUMNS.1)
        .and_then(|s| s.parse::<i32>().ok());

    match (chain, res_seq) {
        (Some(c), Some(n)) if c == chain_id && n > max_residue => LineVerdict::Drop,
        (Some(_), Some(_)) => LineVerdict::Keep,
        _ => LineVerdict::Malformed,
    }
}

/// Copies a PDB stream, dropping coordinate records of `chain_id` whose residue
/// sequence number exceeds `max_residue`.
///
/// Kept lines are written back byte for byte, line endings included. Coordinate lines
/// whose chain or residue number columns cannot be read are kept as well and counted in
/// [`TruncationStats::malformed_passed`].
pub fn truncate_chain<R: BufRead, W: Write>(
    mut reader: R,
    writer: &mut W,
    chain_id: char,
    max_residue: i32,
) -> io::Result<TruncationStats> {
    let mut stats = TruncationStats::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        stats.lines_read += 1;

        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\r', '\n']);
        if is_coordinate_record(line) {
            match judge_coordinate_line(line, chain_id, max_residue) {
                LineVerdict::Drop => {
                    stats.coordinates_dropped += 1;
                    continue;
                }
                LineVerdict::Malformed => stats.malformed_passed += 1,
                LineVerdict::Keep => {}
            }
        }
        writer.write_all(&buf)?;
    }

    writer.flush()?;
    Ok(stats)
}
