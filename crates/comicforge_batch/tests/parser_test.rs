//! Tests for CSV ingestion.

use comicforge_batch::parse_csv_str;
use comicforge_core::CsvRow;

#[test]
fn parses_primary_japanese_headers() {
    let input = "ページ番号,使用するコマ割りテンプレ,漫画作成のプロンプト\n\
                 3,, テンプレ1 \n";
    // template cell empty on purpose: row is dropped
    let rows = parse_csv_str(input).unwrap();
    assert!(rows.is_empty());

    let input = "ページ番号,使用するコマ割りテンプレ,漫画作成のプロンプト\n\
                 \"3,\", テンプレ1 ,X\n";
    let rows = parse_csv_str(input).unwrap();
    assert_eq!(rows, vec![CsvRow::new("3", "テンプレ1", "X")]);
}

#[test]
fn parses_fallback_english_headers() {
    let input = "page_number,template,prompt\n1,テンプレ2,city at night\n";
    let rows = parse_csv_str(input).unwrap();
    assert_eq!(rows, vec![CsvRow::new("1", "テンプレ2", "city at night")]);
}

#[test]
fn parses_secondary_japanese_headers() {
    let input = "ページ,テンプレート,プロンプト\n2,テンプレ3,p\n";
    let rows = parse_csv_str(input).unwrap();
    assert_eq!(rows, vec![CsvRow::new("2", "テンプレ3", "p")]);
}

#[test]
fn first_alias_with_a_value_wins_per_row() {
    // Both alias columns exist; the primary is empty on the second row.
    let input = "page_number,ページ,template,prompt\n\
                 1,9,テンプレ1,a\n\
                 ,7,テンプレ1,b\n";
    let rows = parse_csv_str(input).unwrap();
    assert_eq!(rows[0].page_number, "1");
    assert_eq!(rows[1].page_number, "7");
}

#[test]
fn normalizes_template_names() {
    let input = "page_number,template,prompt\n1,\" テンプレ 1 \",p\n";
    let rows = parse_csv_str(input).unwrap();
    assert_eq!(rows[0].template_name, "テンプレ1");
}

#[test]
fn drops_rows_missing_any_column_without_raising() {
    let input = "page_number,template,prompt\n\
                 1,テンプレ1,keep\n\
                 ,テンプレ1,no page\n\
                 2,,no template\n\
                 3,テンプレ1,\n\
                 4,テンプレ1,keep too\n";
    let rows = parse_csv_str(input).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].prompt, "keep");
    assert_eq!(rows[1].prompt, "keep too");
}

#[test]
fn header_only_input_yields_empty_sequence() {
    let rows = parse_csv_str("page_number,template,prompt\n").unwrap();
    assert!(rows.is_empty());
}

#[test]
fn unrecognized_headers_yield_empty_sequence() {
    let rows = parse_csv_str("a,b,c\n1,2,3\n").unwrap();
    assert!(rows.is_empty());
}

#[test]
fn tolerates_utf8_bom_on_first_header() {
    let input = "\u{feff}ページ番号,template,prompt\n5,テンプレ1,p\n";
    let rows = parse_csv_str(input).unwrap();
    assert_eq!(rows[0].page_number, "5");
}
