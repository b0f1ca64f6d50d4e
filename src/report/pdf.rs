use chrono::NaiveDate;
use genpdf::{elements, style, Element};
use std::cell::Cell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::ReportTable;
use crate::types::{Result, SalesError};

/// Fonts and page furniture for a rendered report
#[derive(Debug, Clone)]
pub struct PdfStyle {
    /// Directory holding `{family}-Regular.ttf`, `-Bold`, `-Italic`, `-BoldItalic`
    pub fonts_dir: PathBuf,
    pub font_family: String,
    /// Date printed in the page band
    pub generated_on: NaiveDate,
}

/// Text of the band drawn on every page
pub fn page_band(generated_on: NaiveDate, page: usize, total: usize) -> String {
    format!(
        "Generated on {} | Page {} of {}",
        generated_on.format("%Y-%m-%d"),
        page,
        total
    )
}

/// Render a report table to PDF bytes.
///
/// The document is laid out twice: a dry run counts the pages so the band
/// can print the total.
pub fn render_pdf(table: &ReportTable, style: &PdfStyle) -> Result<Vec<u8>> {
    let fonts = genpdf::fonts::from_files(&style.fonts_dir, &style.font_family, None).map_err(
        |e| {
            SalesError::Report(format!(
                "font {} not found in {}: {}",
                style.font_family,
                style.fonts_dir.display(),
                e
            ))
        },
    )?;

    let pages = Rc::new(Cell::new(0usize));
    build_document(table, style, fonts.clone(), 0, Rc::clone(&pages))?
        .render(io::sink())
        .map_err(|e| SalesError::Report(e.to_string()))?;
    let total = pages.get().max(1);

    let mut buffer = Vec::new();
    build_document(table, style, fonts, total, pages)?
        .render(&mut buffer)
        .map_err(|e| SalesError::Report(e.to_string()))?;
    Ok(buffer)
}

fn build_document(
    table: &ReportTable,
    style: &PdfStyle,
    fonts: genpdf::fonts::FontFamily<genpdf::fonts::FontData>,
    total: usize,
    pages: Rc<Cell<usize>>,
) -> Result<genpdf::Document> {
    let mut doc = genpdf::Document::new(fonts);
    doc.set_title(table.title.clone());

    let generated_on = style.generated_on;
    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(10);
    decorator.set_header(move |page| {
        pages.set(pages.get().max(page));
        let text = page_band(generated_on, page, total.max(page));
        elements::Paragraph::new(text).styled(style::Style::new().italic().with_font_size(8))
    });
    doc.set_page_decorator(decorator);

    doc.push(
        elements::Paragraph::new(table.title.clone())
            .styled(style::Style::new().bold().with_font_size(18)),
    );
    doc.push(elements::Break::new(1.5));

    let mut layout = elements::TableLayout::new(vec![3, 2]);
    layout.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

    let bold = style::Style::new().bold();
    layout
        .row()
        .element(elements::Paragraph::new(table.header[0]).styled(bold))
        .element(elements::Paragraph::new(table.header[1]).styled(bold))
        .push()
        .map_err(|e| SalesError::Report(e.to_string()))?;

    for row in &table.rows {
        layout
            .row()
            .element(elements::Paragraph::new(row.label.clone()))
            .element(elements::Paragraph::new(row.value_text().to_string()))
            .push()
            .map_err(|e| SalesError::Report(e.to_string()))?;
    }
    doc.push(layout);
    Ok(doc)
}

/// Render and write a report into `dir`, returning the written path
pub fn write_pdf(
    table: &ReportTable,
    style: &PdfStyle,
    dir: &Path,
    file_name: &str,
) -> Result<PathBuf> {
    let bytes = render_pdf(table, style)?;
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    fs::write(&path, bytes)?;
    tracing::info!(path = %path.display(), "report written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ReportKind, ReportPeriod};
    use crate::types::SalesSummary;
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    fn fixture_style() -> PdfStyle {
        PdfStyle {
            fonts_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("tests")
                .join("fixtures")
                .join("fonts"),
            font_family: "DejaVuSans".into(),
            generated_on: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        }
    }

    fn all_kinds() -> Vec<ReportKind> {
        ReportPeriod::ALL
            .into_iter()
            .map(ReportKind::Sales)
            .chain(std::iter::once(ReportKind::OrdersAndProducts))
            .collect()
    }

    fn summary() -> SalesSummary {
        SalesSummary {
            total_sales: Decimal::new(125050, 2),
            total_orders: 7,
            total_products: 19,
            today_sales: Decimal::from(500),
            this_week_sales: Decimal::new(98025, 2),
            ..Default::default()
        }
    }

    // ========== Rendering tests ==========

    #[test]
    fn test_render_every_report_kind() {
        let style = fixture_style();
        let summary = summary();
        for kind in all_kinds() {
            let bytes = render_pdf(&kind.table(Some(&summary)), &style).unwrap();
            assert!(bytes.starts_with(b"%PDF"), "{:?} is not a PDF", kind);
        }
    }

    #[test]
    fn test_render_placeholder_tables() {
        let style = fixture_style();
        let missing = ReportTable::sales(ReportPeriod::Monthly, None);
        assert!(render_pdf(&missing, &style).unwrap().starts_with(b"%PDF"));

        let unknown = ReportTable::for_name("Hourly", None);
        assert!(render_pdf(&unknown, &style).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn test_write_pdf_creates_named_files() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("reports");
        let style = fixture_style();
        let summary = summary();

        for kind in all_kinds() {
            let table = kind.table(Some(&summary));
            let path = write_pdf(&table, &style, &out, &kind.file_name()).unwrap();
            assert_eq!(path, out.join(kind.file_name()));
            let bytes = fs::read(&path).unwrap();
            assert!(bytes.starts_with(b"%PDF"));
        }

        assert!(out.join("weekly_sales_report.pdf").exists());
        assert!(out.join("overall_sales_report.pdf").exists());
        assert!(out.join("orders_products_report.pdf").exists());
    }

    #[test]
    fn test_page_band_text() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(page_band(date, 2, 3), "Generated on 2024-01-15 | Page 2 of 3");
    }

    #[test]
    fn test_render_table_spanning_pages() {
        let mut table = ReportTable::orders_and_products(Some(&summary()));
        let row = table.rows[0].clone();
        table.rows = std::iter::repeat(row).take(200).collect();

        let bytes = render_pdf(&table, &fixture_style()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    // ========== Font error tests ==========

    #[test]
    fn test_missing_fonts_is_report_error() {
        let dir = TempDir::new().unwrap();
        let style = PdfStyle {
            fonts_dir: dir.path().join("no-fonts"),
            font_family: "Roboto".into(),
            generated_on: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        };
        let table = ReportTable::sales(ReportPeriod::Daily, None);

        let err = render_pdf(&table, &style).unwrap_err();
        assert!(matches!(err, SalesError::Report(ref msg) if msg.contains("Roboto")));
    }

    #[test]
    fn test_write_pdf_does_not_create_file_on_failure() {
        let dir = TempDir::new().unwrap();
        let style = PdfStyle {
            fonts_dir: dir.path().to_path_buf(),
            font_family: "Missing".into(),
            generated_on: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        };
        let table = ReportTable::orders_and_products(None);
        let out = dir.path().join("out");

        assert!(write_pdf(&table, &style, &out, "orders_products_report.pdf").is_err());
        assert!(!out.join("orders_products_report.pdf").exists());
    }
}
