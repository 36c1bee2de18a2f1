use pretty_assertions::assert_eq;
use uct_render::{render_csv, render_report, splice_into_document, write_csv, SpliceOutcome};
use uct_test_utils::{
    data_dir_with, parse_fixture, read, write_file, CHECKOUT_YAML, ORDER_YAML, REPORT_TEX,
};

#[test]
fn order_csv_matches_expected_records() {
    let use_case = parse_fixture("UC01", ORDER_YAML);
    let tables = use_case.flatten().unwrap();

    let csv = render_csv(&tables, &use_case.actors);
    let records: Vec<Vec<&str>> = csv
        .split("\r\n")
        .map(|line| if line.is_empty() { Vec::new() } else { line.split(',').collect() })
        .collect();

    assert_eq!(
        records,
        vec![
            vec!["Buyer", "Seller"],
            vec!["1. Places order", ""],
            vec!["", "2. Confirms order"],
            vec![],
            vec![],
            // after the final terminator
            vec![],
        ]
    );
}

#[test]
fn write_csv_overwrites() {
    let dir = data_dir_with(&[("UC01.csv", "stale content that is longer than the new file")]);
    let use_case = parse_fixture("UC01", ORDER_YAML);
    let tables = use_case.flatten().unwrap();
    let path = dir.path().join("UC01.csv");

    write_csv(&path, &tables, &use_case.actors).unwrap();

    assert_eq!(read(&path), render_csv(&tables, &use_case.actors));
}

#[test]
fn checkout_report_lists_every_table() {
    let use_case = parse_fixture("UC02", CHECKOUT_YAML);
    let tables = use_case.flatten().unwrap();

    let report = render_report(&use_case.name, &tables, &use_case.actors);

    assert!(report.starts_with("UC02\n\n┌"));
    let labels = [
        "\n\nAlternatives 1: Cart is empty\n┌",
        "\n\nExceptions 1: Card declined\n┌",
        "\n\nAlternatives 2: Voucher applied\n┌",
    ];
    let positions: Vec<usize> = labels.iter().map(|l| report.find(l).unwrap()).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(report.ends_with(&format!("┘\n\n\n{}\n\n\n", "=".repeat(78))));
}

#[test]
fn splice_is_idempotent() {
    let dir = data_dir_with(&[]);
    let tex = write_file(dir.path(), "report.tex", REPORT_TEX);
    let use_case = parse_fixture("UC02", CHECKOUT_YAML);
    let tables = use_case.flatten().unwrap();
    let marker = use_case.anchor.as_deref().unwrap();

    let first = splice_into_document(&tex, marker, &tables, &use_case.actors).unwrap();
    let once = read(&tex);
    let second = splice_into_document(&tex, marker, &tables, &use_case.actors).unwrap();
    let twice = read(&tex);

    assert_eq!(first, SpliceOutcome::Spliced { replaced: false });
    assert_eq!(second, SpliceOutcome::Spliced { replaced: true });
    assert_eq!(once, twice);

    let lines: Vec<&str> = once.lines().collect();
    let anchor = lines.iter().position(|l| *l == r"\section{UC02 Checkout}").unwrap();
    assert_eq!(lines[anchor + 1], "% START C02  TABLES");
    assert_eq!(once.matches("% START C02  TABLES").count(), 1);
    assert_eq!(once.matches("% END C02  TABLES").count(), 1);
    assert_eq!(once.matches(r"\begin{longtable}").count(), 4);
    assert!(once.ends_with("\\end{document}\n"));
}

#[test]
fn splice_updates_changed_tables_in_place() {
    let dir = data_dir_with(&[]);
    let tex = write_file(dir.path(), "report.tex", REPORT_TEX);

    let checkout = parse_fixture("UC02", CHECKOUT_YAML);
    let tables = checkout.flatten().unwrap();
    splice_into_document(&tex, "UC02 Checkout", &tables, &checkout.actors).unwrap();

    let order = parse_fixture("UC02", ORDER_YAML);
    splice_into_document(&tex, "UC02 Checkout", &order.flatten().unwrap(), &order.actors).unwrap();

    let doc = read(&tex);
    assert!(!doc.contains("Opens the cart"));
    assert!(doc.contains("1. Places order"));
    assert_eq!(doc.matches(r"\begin{longtable}").count(), 1);
}

#[test]
fn blocks_for_different_markers_coexist() {
    let dir = data_dir_with(&[]);
    let tex = write_file(dir.path(), "report.tex", REPORT_TEX);
    let order = parse_fixture("UC01", ORDER_YAML);
    let tables = order.flatten().unwrap();

    splice_into_document(&tex, "UC01 Order", &tables, &order.actors).unwrap();
    splice_into_document(&tex, "UC02 Checkout", &tables, &order.actors).unwrap();

    let doc = read(&tex);
    assert!(doc.contains("% START C01  TABLES"));
    assert!(doc.contains("% START C02  TABLES"));
}

#[test]
fn short_marker_gives_empty_tag_and_stays_idempotent() {
    let dir = data_dir_with(&[]);
    let tex = write_file(dir.path(), "report.tex", REPORT_TEX);
    let use_case = parse_fixture("UC01", ORDER_YAML);
    let tables = use_case.flatten().unwrap();

    splice_into_document(&tex, "U", &tables, &use_case.actors).unwrap();
    let once = read(&tex);
    let second = splice_into_document(&tex, "U", &tables, &use_case.actors).unwrap();

    assert_eq!(second, SpliceOutcome::Spliced { replaced: true });
    assert_eq!(read(&tex), once);

    let lines: Vec<&str> = once.lines().collect();
    let anchor = lines.iter().position(|l| *l == r"\section{UC01 Order}").unwrap();
    assert_eq!(lines[anchor + 1], "% START  TABLES");
    assert_eq!(once.matches("% START  TABLES").count(), 1);
    assert_eq!(once.matches("% END  TABLES").count(), 1);
}

#[test]
fn missing_anchor_leaves_document_untouched() {
    let dir = data_dir_with(&[]);
    let tex = write_file(dir.path(), "report.tex", REPORT_TEX);
    let use_case = parse_fixture("UC01", ORDER_YAML);

    let outcome =
        splice_into_document(&tex, "UC99", &use_case.flatten().unwrap(), &use_case.actors).unwrap();

    assert_eq!(outcome, SpliceOutcome::AnchorNotFound);
    assert_eq!(read(&tex), REPORT_TEX);
}

#[test]
fn invalid_marker_is_an_error() {
    let dir = data_dir_with(&[]);
    let tex = write_file(dir.path(), "report.tex", REPORT_TEX);
    let use_case = parse_fixture("UC01", ORDER_YAML);

    let err = splice_into_document(&tex, "UC(01", &use_case.flatten().unwrap(), &use_case.actors)
        .unwrap_err();

    assert!(matches!(err, uct_render::RenderError::InvalidMarker { .. }));
}
