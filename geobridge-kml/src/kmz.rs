//! KMZ archives: zip containers with KML documents.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::KmlError;

/// Name of the main document of a KMZ archive.
pub const MAIN_DOCUMENT_NAME: &str = "doc.kml";

/// Returns true if the file name has the `.kml` extension (case insensitive).
pub fn is_kml_file_name(name: &str) -> bool {
    name.rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("kml"))
}

/// Name of the archive entry for the `index`-th (1-based) packaged document.
pub fn entry_name(index: usize) -> String {
    if index == 1 {
        MAIN_DOCUMENT_NAME.to_string()
    } else {
        format!("class{index}.kml")
    }
}

fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
}

/// Packs KML documents into a KMZ archive.
///
/// Every input is a `(file name, content)` pair. Inputs whose name does not have the `.kml` extension are skipped.
/// The first packaged document becomes `doc.kml`, the following ones `class2.kml`, `class3.kml` etc. If no input is
/// a KML file, an empty archive is returned.
pub fn package<N, B>(entries: impl IntoIterator<Item = (N, B)>) -> Result<Vec<u8>, KmlError>
where
    N: AsRef<str>,
    B: AsRef<[u8]>,
{
    let mut writer = ZipWriter::new(Cursor::new(vec![]));

    let mut index = 1;
    for (name, content) in entries {
        let name = name.as_ref();
        if !is_kml_file_name(name) {
            log::debug!("Skipping {name}: not a KML file");
            continue;
        }

        let entry = entry_name(index);
        log::debug!("Packing {name} as {entry}");
        writer.start_file(entry, entry_options())?;
        writer.write_all(content.as_ref())?;
        index += 1;
    }

    Ok(writer.finish()?.into_inner())
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use zip::ZipArchive;

    use super::*;

    fn read_entries(bytes: Vec<u8>) -> Vec<(String, Vec<u8>)> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        (0..archive.len())
            .map(|i| {
                let mut file = archive.by_index(i).unwrap();
                let mut content = vec![];
                file.read_to_end(&mut content).unwrap();
                (file.name().to_string(), content)
            })
            .collect()
    }

    #[test]
    fn entries_are_named_by_position() {
        let bytes = package([
            ("a.kml", b"<kml>a</kml>".as_slice()),
            ("b.KML", b"<kml>b</kml>".as_slice()),
            ("notes.txt", b"not kml".as_slice()),
            ("c.kml", b"<kml>c</kml>".as_slice()),
        ])
        .unwrap();

        let entries = read_entries(bytes);
        let names: Vec<_> = entries.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["doc.kml", "class2.kml", "class3.kml"]);
        assert_eq!(entries[2].1, b"<kml>c</kml>");
    }

    #[test]
    fn no_kml_inputs_give_empty_archive() {
        let bytes = package([("readme.md", "text")]).unwrap();
        assert!(read_entries(bytes).is_empty());

        let bytes = package(Vec::<(String, Vec<u8>)>::new()).unwrap();
        assert!(read_entries(bytes).is_empty());
    }

    #[test]
    fn kml_extension() {
        assert!(is_kml_file_name("doc.kml"));
        assert!(is_kml_file_name("Parcels.KmL"));
        assert!(!is_kml_file_name("doc.kmz"));
        assert!(!is_kml_file_name("kml"));
    }
}
