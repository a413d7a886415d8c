use crate::core::models::manifest::RunManifest;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Serialize)]
struct ManifestRow<'a> {
    id: &'a str,
    sequence: &'a str,
}

/// Writes the manifest table (`id,sequence`) in manifest order.
pub fn write_manifest<W: Write>(manifest: &RunManifest, writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in manifest.records() {
        csv_writer.serialize(ManifestRow {
            id: record.id(),
            sequence: record.sequence(),
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_manifest_to_path<P: AsRef<Path>>(
    manifest: &RunManifest,
    path: P,
) -> Result<(), csv::Error> {
    let file = std::fs::File::create(path)?;
    write_manifest(manifest, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::record::SequenceRecord;

    #[test]
    fn writes_header_and_rows_in_order() {
        let manifest = RunManifest::from_records(vec![
            SequenceRecord::new("seq1", "MKTAYIAK"),
            SequenceRecord::new("seq2", "AGVLLK"),
        ])
        .unwrap();

        let mut buffer = Vec::new();
        write_manifest(&manifest, &mut buffer).unwrap();

        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "id,sequence\nseq1,MKTAYIAK\nseq2,AGVLLK\n"
        );
    }
}
