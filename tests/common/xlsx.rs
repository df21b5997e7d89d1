use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets></workbook>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

/// Korean export header row
pub const KO_HEADER: [&str; 13] = [
    "교과구분",
    "개설대학",
    "개설학과",
    "이수과정",
    "학년",
    "교과목번호",
    "강좌번호",
    "교과목명",
    "부제명",
    "학점",
    "수업교시",
    "강의실(동-호)(#연건, *평창)",
    "주담당교수",
];

/// English export header row
pub const EN_HEADER: [&str; 6] = [
    "Course Number",
    "Lecture Number",
    "Course Title",
    "Professor",
    "Credit",
    "Class Time",
];

/// One course row of the Korean export
pub struct KoRow<'a> {
    pub course_code: &'a str,
    pub class_code: &'a str,
    pub title: &'a str,
    pub credit: &'a str,
    pub time: &'a str,
    pub room: &'a str,
    pub professor: &'a str,
}

impl KoRow<'_> {
    pub fn cells(&self) -> Vec<String> {
        [
            "전공",
            "공과대학",
            "컴퓨터공학부",
            "학사",
            "3",
            self.course_code,
            self.class_code,
            self.title,
            "",
            self.credit,
            self.time,
            self.room,
            self.professor,
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }
}

/// Korean export: two title rows, the header row, then data rows
pub fn korean_export(rows: &[KoRow<'_>]) -> Vec<u8> {
    let mut sheet = vec![
        vec!["2025학년도 2학기 수강편람".to_string()],
        Vec::new(),
        KO_HEADER.iter().map(|s| s.to_string()).collect(),
    ];
    sheet.extend(rows.iter().map(KoRow::cells));
    build(&sheet)
}

/// English export with the same row layout as `korean_export`
pub fn english_export(rows: &[[&str; 6]]) -> Vec<u8> {
    let mut sheet = vec![
        vec!["2025 Fall Course Catalog".to_string()],
        Vec::new(),
        EN_HEADER.iter().map(|s| s.to_string()).collect(),
    ];
    sheet.extend(
        rows.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect::<Vec<_>>()),
    );
    build(&sheet)
}

/// Single-sheet xlsx workbook; numeric cells are written as numbers
pub fn build(rows: &[Vec<String>]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    let sheet = sheet_xml(rows);
    for (name, body) in [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        ("xl/workbook.xml", WORKBOOK),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
        ("xl/worksheets/sheet1.xml", sheet.as_str()),
    ] {
        zip.start_file(name, options).unwrap();
        zip.write_all(body.as_bytes()).unwrap();
    }

    zip.finish().unwrap().into_inner()
}

fn sheet_xml(rows: &[Vec<String>]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );

    for (r, row) in rows.iter().enumerate() {
        xml.push_str(&format!(r#"<row r="{}">"#, r + 1));
        for (c, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            let cell_ref = format!("{}{}", column_name(c), r + 1);
            if is_number(value) {
                xml.push_str(&format!(r#"<c r="{}"><v>{}</v></c>"#, cell_ref, value));
            } else {
                xml.push_str(&format!(
                    r#"<c r="{}" t="inlineStr"><is><t>{}</t></is></c>"#,
                    cell_ref,
                    escape(value)
                ));
            }
        }
        xml.push_str("</row>");
    }

    xml.push_str("</sheetData></worksheet>");
    xml
}

/// Codes such as `001` stay text, like in the real export
fn is_number(value: &str) -> bool {
    value.parse::<f64>().is_ok() && (value == "0" || !value.starts_with('0'))
}

fn column_name(mut idx: usize) -> String {
    let mut name = Vec::new();
    loop {
        name.push(b'A' + (idx % 26) as u8);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }
    name.reverse();
    String::from_utf8(name).unwrap()
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
