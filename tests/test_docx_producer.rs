//! Integration tests for document assembly.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use schema_docx::docx::{BinaryPart, GridCell, GridTable, InlineImage};
use schema_docx::{
    ColumnRef, ContainerEngine, Database, DocxConfig, DocxPackage, DocxProducer, Element,
    Error, ForeignKeyConstraint, InMemoryAssets, OutputProducer, PageSize, ProduceOutcome, Result,
    Routine, RoutineParameter, Table, TableColumn, TableHandle, TableIndex, View,
};
use tempfile::tempdir;

// Container wrapper counting the calls the assembler makes

struct CountingContainer {
    inner: DocxPackage,
    embeds: usize,
    inline_displays: usize,
    persists: usize,
}

impl CountingContainer {
    fn new() -> Self {
        Self {
            inner: DocxPackage::create(DocxConfig::default().page()).unwrap(),
            embeds: 0,
            inline_displays: 0,
            persists: 0,
        }
    }
}

impl ContainerEngine for CountingContainer {
    fn writable_width(&self) -> u32 {
        self.inner.writable_width()
    }

    fn append_styled_paragraph(&mut self, style: &str, text: &str) -> Result<()> {
        self.inner.append_styled_paragraph(style, text)
    }

    fn append_paragraph(&mut self, text: Option<&str>) -> Result<()> {
        self.inner.append_paragraph(text)
    }

    fn allocate_table(
        &mut self,
        rows: usize,
        columns: usize,
        column_widths: &[u32],
    ) -> Result<TableHandle> {
        self.inner.allocate_table(rows, columns, column_widths)
    }

    fn cell_mut(&mut self, table: &TableHandle, row: usize, col: usize) -> Result<&mut GridCell> {
        self.inner.cell_mut(table, row, col)
    }

    fn embed_binary_asset(&mut self, bytes: &[u8]) -> Result<BinaryPart> {
        self.embeds += 1;
        self.inner.embed_binary_asset(bytes)
    }

    fn create_inline_display(&mut self, part: &BinaryPart, width_twips: u32) -> Result<InlineImage> {
        self.inline_displays += 1;
        self.inner.create_inline_display(part, width_twips)
    }

    fn append_page_break(&mut self) -> Result<()> {
        self.inner.append_page_break()
    }

    fn persist(&mut self, path: &Path) -> Result<()> {
        self.persists += 1;
        self.inner.persist(path)
    }

    fn elements(&self) -> &[Element] {
        self.inner.elements()
    }
}

// Container wrapper whose Nth table allocation fails

struct FailingContainer {
    inner: DocxPackage,
    fail_on: usize,
    allocations: usize,
    persists: usize,
}

impl FailingContainer {
    fn failing_on(fail_on: usize) -> Self {
        Self {
            inner: DocxPackage::create(DocxConfig::default().page()).unwrap(),
            fail_on,
            allocations: 0,
            persists: 0,
        }
    }
}

impl ContainerEngine for FailingContainer {
    fn writable_width(&self) -> u32 {
        self.inner.writable_width()
    }

    fn append_styled_paragraph(&mut self, style: &str, text: &str) -> Result<()> {
        self.inner.append_styled_paragraph(style, text)
    }

    fn append_paragraph(&mut self, text: Option<&str>) -> Result<()> {
        self.inner.append_paragraph(text)
    }

    fn allocate_table(
        &mut self,
        rows: usize,
        columns: usize,
        column_widths: &[u32],
    ) -> Result<TableHandle> {
        self.allocations += 1;
        if self.allocations == self.fail_on {
            return Err(Error::ContainerFault("table allocation refused".to_string()));
        }
        self.inner.allocate_table(rows, columns, column_widths)
    }

    fn cell_mut(&mut self, table: &TableHandle, row: usize, col: usize) -> Result<&mut GridCell> {
        self.inner.cell_mut(table, row, col)
    }

    fn embed_binary_asset(&mut self, bytes: &[u8]) -> Result<BinaryPart> {
        self.inner.embed_binary_asset(bytes)
    }

    fn create_inline_display(&mut self, part: &BinaryPart, width_twips: u32) -> Result<InlineImage> {
        self.inner.create_inline_display(part, width_twips)
    }

    fn append_page_break(&mut self) -> Result<()> {
        self.inner.append_page_break()
    }

    fn persist(&mut self, path: &Path) -> Result<()> {
        self.persists += 1;
        self.inner.persist(path)
    }

    fn elements(&self) -> &[Element] {
        self.inner.elements()
    }
}

// Fixtures

fn column(name: &str, type_name: &str, primary: bool, foreign_key: bool) -> TableColumn {
    let mut column = TableColumn::new(name, type_name);
    column.primary = primary;
    column.foreign_key = foreign_key;
    column
}

fn shop() -> Database {
    let customers = Table {
        name: "customers".to_string(),
        comments: Some("People who buy things".to_string()),
        columns: vec![
            column("id", "int", true, false),
            column("email", "varchar", false, false),
        ],
        indexes: vec![TableIndex {
            name: "ux_email".to_string(),
            index_type: "Unique".to_string(),
            columns: vec!["email".to_string()],
        }],
        ..Default::default()
    };

    let mut orders = Table {
        name: "orders".to_string(),
        comments: None,
        columns: vec![
            column("id", "int", true, false),
            column("customer_id", "int", false, true),
            column("shipping_country", "char", false, true),
            column("shipping_region", "char", false, true),
        ],
        ..Default::default()
    };
    orders.foreign_keys = vec![
        ForeignKeyConstraint {
            name: "fk_orders_customer".to_string(),
            parent_columns: vec![ColumnRef::new("customers", "id")],
            child_columns: vec![ColumnRef::new("orders", "customer_id")],
            delete_rule: "Cascade on delete".to_string(),
        },
        ForeignKeyConstraint {
            name: "fk_orders_region".to_string(),
            parent_columns: vec![
                ColumnRef::new("regions", "country"),
                ColumnRef::new("regions", "region"),
            ],
            child_columns: vec![
                ColumnRef::new("orders", "shipping_country"),
                ColumnRef::new("orders", "shipping_region"),
            ],
            delete_rule: "Restrict delete".to_string(),
        },
    ];
    orders
        .check_constraints
        .insert("ck_id".to_string(), "(id > 0)".to_string());

    Database {
        name: "shop".to_string(),
        schema: Some("public".to_string()),
        tables: vec![customers, orders],
        views: vec![View {
            name: "big_orders".to_string(),
            comments: Some("Orders over 100".to_string()),
            columns: vec![column("id", "int", true, false)],
            definition: Some("select id from orders where total > 100".to_string()),
        }],
        routines: vec![Routine {
            name: "order_total".to_string(),
            routine_type: "FUNCTION".to_string(),
            definition_language: "SQL".to_string(),
            deterministic: false,
            return_type: Some("decimal".to_string()),
            security_type: Some("INVOKER".to_string()),
            comment: None,
            definition: Some("select sum(price) from order_lines".to_string()),
            parameters: vec![RoutineParameter {
                name: "order_id".to_string(),
                param_type: "int".to_string(),
                mode: "IN".to_string(),
            }],
        }],
    }
}

fn render(database: &Database) -> DocxPackage {
    let producer = DocxProducer::new();
    let mut pkg = DocxPackage::create(producer.config().page()).unwrap();
    producer.render(&mut pkg, database).unwrap();
    pkg
}

fn headings(elements: &[Element], style: &str) -> Vec<String> {
    elements
        .iter()
        .filter_map(Element::as_paragraph)
        .filter(|p| p.style.as_deref() == Some(style))
        .map(|p| p.plain_text())
        .collect()
}

/// Finds the first table following the given Heading3 after `after_heading2`.
fn table_after<'a>(elements: &'a [Element], after_heading2: &str, heading3: &str) -> &'a GridTable {
    let start = elements
        .iter()
        .position(|e| {
            e.as_paragraph()
                .is_some_and(|p| p.style.as_deref() == Some("Heading2") && p.plain_text() == after_heading2)
        })
        .unwrap();
    let sub = elements[start..]
        .iter()
        .position(|e| {
            e.as_paragraph()
                .is_some_and(|p| p.style.as_deref() == Some("Heading3") && p.plain_text() == heading3)
        })
        .unwrap();
    elements[start + sub..]
        .iter()
        .find_map(Element::as_table)
        .unwrap()
}

/// Text-only rendering of the element sequence (ignores image identifiers).
fn text_outline(elements: &[Element]) -> Vec<String> {
    elements
        .iter()
        .map(|e| match e {
            Element::Paragraph(p) => format!("P[{}]{}", p.style.as_deref().unwrap_or(""), p.plain_text()),
            Element::Table(t) => {
                let cells: Vec<String> = t
                    .rows
                    .iter()
                    .map(|r| {
                        r.cells
                            .iter()
                            .map(|c| format!("{}{}", if c.has_drawing() { "*" } else { "" }, c.plain_text()))
                            .collect::<Vec<_>>()
                            .join("|")
                    })
                    .collect();
                format!("T{:?}{}", t.column_widths, cells.join("/"))
            },
            Element::PageBreak => "BR".to_string(),
        })
        .collect()
}

// Document order

#[test]
fn test_document_starts_with_title_and_schema() {
    let pkg = render(&shop());
    let elements = pkg.elements();

    let title = elements[0].as_paragraph().unwrap();
    assert_eq!(title.style.as_deref(), Some("Title"));
    assert_eq!(title.plain_text(), "Database: shop");

    let schema = elements[1].as_paragraph().unwrap();
    assert_eq!(schema.style.as_deref(), Some("Heading1"));
    assert_eq!(schema.plain_text(), "Schema: public");

    assert_eq!(headings(elements, "Title").len(), 1);
    assert_eq!(headings(elements, "Heading1").len(), 1);
}

#[test]
fn test_sections_in_fixed_order() {
    let pkg = render(&shop());
    assert_eq!(
        headings(pkg.elements(), "Heading2"),
        vec![
            "Tables",
            "Table: customers",
            "Table: orders",
            "Views",
            "View: big_orders",
            "Routines",
            "Routine: order_total",
        ]
    );
}

#[test]
fn test_empty_sections_fully_absent() {
    let mut db = shop();
    db.views.clear();
    db.routines.clear();
    let pkg = render(&db);

    let h2 = headings(pkg.elements(), "Heading2");
    assert!(!h2.iter().any(|h| h == "Views" || h.starts_with("View:")));
    assert!(!h2.iter().any(|h| h == "Routines" || h.starts_with("Routine:")));
    // summary break plus one per table
    let breaks = pkg
        .elements()
        .iter()
        .filter(|e| matches!(e, Element::PageBreak))
        .count();
    assert_eq!(breaks, 1 + 2);
}

#[test]
fn test_missing_schema_renders_empty_label() {
    let mut db = shop();
    db.schema = None;
    let pkg = render(&db);
    assert_eq!(pkg.elements()[1].as_paragraph().unwrap().plain_text(), "Schema: ");
}

// Short circuit

#[test]
fn test_zero_tables_writes_nothing() {
    let dir = tempdir().unwrap();
    let mut db = shop();
    db.tables.clear();

    let mut container = CountingContainer::new();
    let outcome = DocxProducer::new().generate_into(&mut container, &db, dir.path());

    assert_eq!(outcome, ProduceOutcome::NothingToWrite);
    assert!(container.elements().is_empty());
    assert_eq!(container.persists, 0);
    assert!(!dir.path().join("document.docx").exists());

    let outcome = DocxProducer::new().generate(&db, dir.path());
    assert_eq!(outcome, ProduceOutcome::NothingToWrite);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

// Table layout

#[test]
fn test_every_table_fills_writable_width() {
    let pkg = render(&shop());
    let writable = pkg.writable_width();
    assert_eq!(writable, 9360);

    for table in pkg.elements().iter().filter_map(Element::as_table) {
        let n = table.column_count() as u32;
        assert!(table.column_widths.iter().all(|w| *w == writable / n));
        assert!(table.rows.iter().all(|r| r.cells.len() == n as usize));
        assert!(table.rows.iter().flat_map(|r| &r.cells).all(|c| c.width == writable / n));
    }
}

#[test]
fn test_table_widths_follow_page_config() {
    let producer = DocxProducer::with_config(DocxConfig::new().with_page_size(PageSize::A4));
    let mut pkg = DocxPackage::create(producer.config().page()).unwrap();
    producer.render(&mut pkg, &shop()).unwrap();

    // A4 is 11906 twips wide, minus two 1440 margins
    let columns = table_after(pkg.elements(), "Table: orders", "Columns");
    assert_eq!(columns.column_widths, vec![9026 / 7; 7]);
}

#[test]
fn test_relationships_flattened_per_parent_column() {
    let pkg = render(&shop());
    let rel = table_after(pkg.elements(), "Table: orders", "Relationships");

    assert_eq!(rel.rows.len(), 1 + 3);
    let rows: Vec<Vec<String>> = rel.rows[1..]
        .iter()
        .map(|r| r.cells.iter().map(|c| c.plain_text()).collect())
        .collect();
    assert_eq!(
        rows,
        vec![
            vec!["fk_orders_customer", "customer_id", "customers.id", "Cascade on delete"],
            vec!["fk_orders_region", "shipping_country", "regions.country", "Restrict delete"],
            vec!["fk_orders_region", "shipping_region", "regions.region", "Restrict delete"],
        ]
    );
}

#[test]
fn test_single_table_scenario() {
    let db = Database {
        name: "db".to_string(),
        schema: Some("s".to_string()),
        tables: vec![Table {
            name: "T".to_string(),
            columns: vec![
                column("id", "int", true, false),
                column("name", "varchar", false, false),
            ],
            ..Default::default()
        }],
        ..Default::default()
    };
    let pkg = render(&db);
    let elements = pkg.elements();

    let detail_start = elements
        .iter()
        .position(|e| e.as_paragraph().is_some_and(|p| p.plain_text() == "Table: T"))
        .unwrap();
    let detail = &elements[detail_start..];

    let tables: Vec<&GridTable> = detail.iter().filter_map(Element::as_table).collect();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].rows.len(), 1 + 2);

    let h3 = headings(detail, "Heading3");
    assert_eq!(h3, vec!["Description", "Columns"]);
    assert!(matches!(detail.last(), Some(Element::PageBreak)));
    assert_eq!(
        detail.iter().filter(|e| matches!(e, Element::PageBreak)).count(),
        1
    );
}

#[test]
fn test_null_default_and_false_auto_render_blank() {
    let pkg = render(&shop());
    let columns = table_after(pkg.elements(), "Table: customers", "Columns");
    let email = &columns.rows[2];

    assert_eq!(email.cells[0].plain_text(), "email");
    assert_eq!(email.cells[3].plain_text(), "false");
    for cell in [&email.cells[4], &email.cells[5]] {
        assert!(cell.is_empty());
        assert_ne!(cell.plain_text(), "null");
        assert_ne!(cell.plain_text(), "false");
    }
}

// Icons

#[test]
fn test_key_columns_carry_icons() {
    let pkg = render(&shop());
    let columns = table_after(pkg.elements(), "Table: orders", "Columns");

    assert!(columns.rows[1].cells[0].has_drawing());
    assert!(columns.rows[2].cells[0].has_drawing());
    assert!(!columns.rows[1].cells[1].has_drawing());

    let customers = table_after(pkg.elements(), "Table: customers", "Columns");
    assert!(customers.rows[1].cells[0].has_drawing());
    assert!(!customers.rows[2].cells[0].has_drawing());
}

#[test]
fn test_each_icon_embedded_at_most_once() {
    let mut container = CountingContainer::new();
    DocxProducer::new().render(&mut container, &shop()).unwrap();

    // five key columns, two distinct icons
    assert_eq!(container.embeds, 2);
    assert_eq!(container.inline_displays, 2);
    assert_eq!(container.inner.media_count(), 2);
}

#[test]
fn test_unavailable_icons_leave_cells_empty() {
    let dir = tempdir().unwrap();
    let producer = DocxProducer::new().with_asset_source(Arc::new(InMemoryAssets::new()));
    let outcome = producer.generate(&shop(), dir.path());
    assert!(matches!(outcome, ProduceOutcome::Written(_)));

    let mut pkg = DocxPackage::create(producer.config().page()).unwrap();
    producer.render(&mut pkg, &shop()).unwrap();
    let columns = table_after(pkg.elements(), "Table: orders", "Columns");

    assert!(columns.rows[1].cells[0].is_empty());
    assert_eq!(columns.rows[1].cells[1].plain_text(), "int");
    assert_eq!(columns.rows[3].cells[0].plain_text(), "");
    assert_eq!(pkg.media_count(), 0);
}

// Idempotence

#[test]
fn test_rendering_twice_gives_same_sequence() {
    let db = shop();
    let first = render(&db);
    let second = render(&db);
    assert_eq!(text_outline(first.elements()), text_outline(second.elements()));

    let dir_a = tempdir().unwrap();
    let dir_b = tempdir().unwrap();
    let producer = DocxProducer::new();
    assert!(producer.generate(&db, dir_a.path()).is_success());
    assert!(producer.generate(&db, dir_b.path()).is_success());
    assert_eq!(
        read_part(&dir_a.path().join("document.docx"), "word/document.xml"),
        read_part(&dir_b.path().join("document.docx"), "word/document.xml")
    );
}

// Persistence

fn read_part(path: &Path, name: &str) -> String {
    let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut part = archive.by_name(name).unwrap();
    let mut text = String::new();
    part.read_to_string(&mut text).unwrap();
    text
}

#[test]
fn test_persisted_package_contents() {
    let dir = tempdir().unwrap();
    let outcome = DocxProducer::new().generate(&shop(), dir.path());
    let path = dir.path().join("document.docx");
    assert_eq!(outcome, ProduceOutcome::Written(path.clone()));

    let archive = zip::ZipArchive::new(File::open(&path).unwrap()).unwrap();
    let names: Vec<&str> = archive.file_names().collect();
    for expected in [
        "[Content_Types].xml",
        "_rels/.rels",
        "word/document.xml",
        "word/styles.xml",
        "word/_rels/document.xml.rels",
        "docProps/core.xml",
        "docProps/app.xml",
        "word/media/image1.png",
        "word/media/image2.png",
    ] {
        assert!(names.contains(&expected), "missing {}", expected);
    }

    let document = read_part(&path, "word/document.xml");
    assert!(document.contains("Database: shop"));
    assert!(document.contains("regions.country"));
    assert!(document.contains("<w:br w:type=\"page\"/>"));

    let rels = read_part(&path, "word/_rels/document.xml.rels");
    assert!(rels.contains("media/image1.png"));
}

#[test]
fn test_missing_output_directory_fails_quietly() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("does/not/exist");
    let outcome = DocxProducer::new().generate(&shop(), &missing);

    assert!(matches!(outcome, ProduceOutcome::Failed(_)));
    assert!(!missing.exists());
}

#[test]
fn test_table_allocation_fault_reported_as_failure() {
    // first call is the table summary, later ones are per-table detail tables
    for fail_on in [1, 2, 4] {
        let dir = tempdir().unwrap();
        let mut container = FailingContainer::failing_on(fail_on);
        let outcome = DocxProducer::new().generate_into(&mut container, &shop(), dir.path());

        match &outcome {
            ProduceOutcome::Failed(reason) => assert!(reason.contains("table allocation refused")),
            other => panic!("allocation {} gave {}", fail_on, other),
        }
        assert_eq!(container.allocations, fail_on);
        assert_eq!(container.persists, 0);
        assert!(!dir.path().join("document.docx").exists());
    }
}

#[test]
fn test_control_characters_stripped_from_persisted_document() {
    let dir = tempdir().unwrap();
    let mut db = shop();
    db.tables[0].comments = Some("a\u{000C}b".to_string());
    db.tables[0].columns[1].comments = Some("bell\u{0007}\u{0000}!".to_string());

    let outcome = DocxProducer::new().generate(&db, dir.path());
    let path = dir.path().join("document.docx");
    assert_eq!(outcome, ProduceOutcome::Written(path.clone()));

    let document = read_part(&path, "word/document.xml");
    assert!(document.contains(">ab<"));
    assert!(document.contains(">bell!<"));
    assert!(!document.chars().any(|c| c < '\u{20}' && !matches!(c, '\t' | '\n' | '\r')));
}

#[test]
fn test_model_loaded_from_json() {
    let json = r#"{
        "name": "inventory",
        "tables": [
            {
                "name": "items",
                "columns": [
                    {"name": "sku", "type_name": "varchar", "primary": true}
                ],
                "check_constraints": {"ck_b": "b > 0", "ck_a": "a > 0"}
            }
        ]
    }"#;
    let db: Database = serde_json::from_str(json).unwrap();
    let pkg = render(&db);

    let checks = table_after(pkg.elements(), "Table: items", "Checks");
    assert_eq!(checks.rows[1].cells[0].plain_text(), "ck_b");
    assert_eq!(checks.rows[2].cells[0].plain_text(), "ck_a");

    let description = pkg
        .elements()
        .iter()
        .filter_map(Element::as_paragraph)
        .find(|p| p.style.is_none() && p.plain_text() == "Comments");
    assert!(description.is_some());
}
