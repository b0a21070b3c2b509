use crate::core::ClearanceRecord;
use crate::utils::error::{Result, ScoutError};
use std::io::Write;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    /// Serializes `records` in order, header row first.
    pub fn render(&self, records: &[ClearanceRecord]) -> Result<Vec<u8>> {
        match self {
            ExportFormat::Csv => to_csv(records),
            ExportFormat::Xlsx => to_xlsx(records),
        }
    }
}

pub fn to_csv(records: &[ClearanceRecord]) -> Result<Vec<u8>> {
    // Header is written by hand so an empty run still produces it.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(ClearanceRecord::HEADERS)?;
    for record in records {
        writer.serialize(record)?;
    }

    writer
        .into_inner()
        .map_err(|e| ScoutError::IoError(e.into_error()))
}

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets></workbook>"#;

const WORKBOOK_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

pub const SHEET_PATH: &str = "xl/worksheets/sheet1.xml";

const COLUMNS: [char; 4] = ['A', 'B', 'C', 'D'];

/// Builds a single-sheet workbook. `store_id` cells are numeric, everything
/// else is an inline string, and no index column is emitted.
pub fn to_xlsx(records: &[ClearanceRecord]) -> Result<Vec<u8>> {
    let sheet = sheet_xml(records);

    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, body) in [
        ("[Content_Types].xml", CONTENT_TYPES_XML),
        ("_rels/.rels", ROOT_RELS_XML),
        ("xl/workbook.xml", WORKBOOK_XML),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS_XML),
        (SHEET_PATH, sheet.as_str()),
    ] {
        zip.start_file(name, options)?;
        zip.write_all(body.as_bytes())?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

fn sheet_xml(records: &[ClearanceRecord]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );

    push_row(&mut xml, 1, |col| {
        string_cell(col, 1, ClearanceRecord::HEADERS[col])
    });

    for (i, record) in records.iter().enumerate() {
        let row = i + 2;
        push_row(&mut xml, row, |col| match col {
            0 => format!(r#"<c r="A{}"><v>{}</v></c>"#, row, record.store_id),
            1 => string_cell(col, row, &record.name),
            2 => string_cell(col, row, &record.price),
            _ => string_cell(col, row, &record.url),
        });
    }

    xml.push_str("</sheetData></worksheet>");
    xml
}

fn push_row(xml: &mut String, row: usize, cell: impl Fn(usize) -> String) {
    xml.push_str(&format!(r#"<row r="{}">"#, row));
    for col in 0..COLUMNS.len() {
        xml.push_str(&cell(col));
    }
    xml.push_str("</row>");
}

fn string_cell(col: usize, row: usize, value: &str) -> String {
    let preserve = if value.trim() != value {
        r#" xml:space="preserve""#
    } else {
        ""
    };
    format!(
        r#"<c r="{}{}" t="inlineStr"><is><t{}>{}</t></is></c>"#,
        COLUMNS[col],
        row,
        preserve,
        escape_xml(value)
    )
}

fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            // Control characters other than tab/newline/CR are illegal in XML 1.0.
            c if (c as u32) < 0x20 && !matches!(c, '\t' | '\n' | '\r') => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn record(store_id: u64, name: &str) -> ClearanceRecord {
        ClearanceRecord {
            store_id,
            name: name.to_string(),
            price: "$49".to_string(),
            url: "http://x/1".to_string(),
        }
    }

    fn read_sheet(bytes: Vec<u8>) -> String {
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        let mut sheet = archive.by_name(SHEET_PATH).unwrap();
        let mut xml = String::new();
        sheet.read_to_string(&mut xml).unwrap();
        xml
    }

    #[test]
    fn test_csv_header_only_when_empty() {
        let csv = String::from_utf8(to_csv(&[]).unwrap()).unwrap();
        assert_eq!(csv.trim_end(), "store_id,name,price,url");
    }

    #[test]
    fn test_csv_rows_end_with_crlf() {
        let csv = String::from_utf8(to_csv(&[record(625, "Drill")]).unwrap()).unwrap();
        assert_eq!(csv, "store_id,name,price,url\r\n625,Drill,$49,http://x/1\r\n");
    }

    #[test]
    fn test_csv_quotes_commas() {
        let csv = String::from_utf8(to_csv(&[record(625, "Drill, cordless")]).unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], r#"625,"Drill, cordless",$49,http://x/1"#);
    }

    #[test]
    fn test_xlsx_contains_all_parts() {
        let bytes = to_xlsx(&[record(625, "Drill")]).unwrap();
        let archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        let names: Vec<&str> = archive.file_names().collect();

        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "xl/workbook.xml",
            "xl/_rels/workbook.xml.rels",
            SHEET_PATH,
        ] {
            assert!(names.contains(&part), "missing {}", part);
        }
    }

    #[test]
    fn test_xlsx_rows_and_cells() {
        let xml = read_sheet(to_xlsx(&[record(625, "Drill"), record(1007, "Saw")]).unwrap());

        assert_eq!(xml.matches("<row ").count(), 3);
        assert!(xml.contains(r#"<c r="A1" t="inlineStr"><is><t>store_id</t></is></c>"#));
        assert!(xml.contains(r#"<c r="A2"><v>625</v></c>"#));
        assert!(xml.contains(r#"<c r="B3" t="inlineStr"><is><t>Saw</t></is></c>"#));
        assert!(xml.find("Drill").unwrap() < xml.find("Saw").unwrap());
    }

    #[test]
    fn test_xlsx_escapes_markup() {
        let xml = read_sheet(to_xlsx(&[record(625, "Bits & <Drivers>\u{1}")]).unwrap());
        assert!(xml.contains("<t>Bits &amp; &lt;Drivers&gt;</t>"));
    }

    #[test]
    fn test_xlsx_header_only_when_empty() {
        let xml = read_sheet(ExportFormat::Xlsx.render(&[]).unwrap());
        assert_eq!(xml.matches("<row ").count(), 1);
        assert!(xml.contains("<t>url</t>"));
    }
}
