use std::io::Cursor;

use base64::{engine::general_purpose, Engine as _};
use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};
use rundown_pdf_rust::{
    AssetSource, BackgroundImage, DocumentConfig, DrawCommand, JsonBytesAsset, RendererError,
    RendererResult, RundownDocument, RundownItem,
};

fn background_png() -> Vec<u8> {
    let img = RgbImage::from_pixel(6, 8, Rgb([250, 244, 232]));
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut out, ImageOutputFormat::Png)
        .unwrap();
    out.into_inner()
}

fn asset_source() -> JsonBytesAsset {
    let payload = general_purpose::STANDARD.encode(background_png());
    JsonBytesAsset::new(format!(r#"{{"image": "data:image/png;base64,{}"}}"#, payload))
}

fn page_count(pdf: &[u8]) -> usize {
    lopdf::Document::load_mem(pdf).unwrap().get_pages().len()
}

/// Roughly `len` characters of plain words
fn activity_of_len(len: usize) -> String {
    let words = ["Sambutan", "keluarga", "mempelai", "dan", "doa", "bersama", "tamu", "undangan"];
    let mut text = String::new();
    let mut i = 0;
    while text.len() < len {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(words[i % words.len()]);
        i += 1;
    }
    text.truncate(len);
    text
}

#[test]
fn single_short_row_fits_on_one_page() {
    let doc = RundownDocument::new(vec![RundownItem::new("09:00", "10:00", "Registrasi")]);
    let rendered = doc.render_with(&asset_source()).unwrap();
    assert_eq!(rendered.page_count(), 1);

    let config = DocumentConfig::default();
    let page = &rendered.pages[0];
    let rows: Vec<_> = page
        .rects()
        .filter(|(rect, style)| style.fill.is_none() && rect.y >= config.body_top())
        .collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].0.height, config.header_height);

    let pdf = rendered.to_pdf_bytes();
    assert_eq!(page_count(&pdf), 1);
}

#[test]
fn long_activities_span_pages_with_repeated_header() {
    let rows: Vec<_> = (0..50)
        .map(|i| RundownItem::new(&format!("{:02}:00", 8 + i % 12), &format!("{:02}:30", 8 + i % 12), &activity_of_len(300)))
        .collect();
    let doc = RundownDocument::new(rows).with_slug("resepsi-pernikahan");
    let rendered = doc.render_with(&asset_source()).unwrap();
    assert!(rendered.page_count() >= 3, "got {} pages", rendered.page_count());

    let config = DocumentConfig::default();
    for page in &rendered.pages {
        match &page.commands[0] {
            DrawCommand::Image { rect, .. } => {
                assert_eq!((rect.width, rect.height), (config.page_width, config.page_height))
            }
            other => panic!("page must start with its background, got {:?}", other),
        }
        let (header, style) = page.rects().next().unwrap();
        assert_eq!(header.y, config.margin + config.padding_top);
        assert_eq!(header.x, (config.page_width - config.table_width) / 2.0);
        assert_eq!(header.width, config.table_width);
        assert!(style.fill.is_some());

        let labels: Vec<_> = page
            .texts()
            .filter(|t| matches!(*t, "Mulai" | "Berakhir" | "Kegiatan"))
            .collect();
        assert_eq!(labels, vec!["Mulai", "Berakhir", "Kegiatan"]);
    }

    let pdf = rendered.to_pdf_bytes();
    assert_eq!(page_count(&pdf), rendered.page_count());
}

#[test]
fn overflowing_content_produces_more_than_one_page() {
    let config = DocumentConfig::default();
    let rows: Vec<_> = (0..30).map(|_| RundownItem::new("10:00", "10:15", "Doa")).collect();
    // 30 rows of 24pt exceed the 568pt usable height
    assert!(30.0 * config.header_height > config.usable_height());
    let rendered = RundownDocument::new(rows).render(None).unwrap();
    assert!(rendered.page_count() > 1);
}

#[test]
fn empty_activity_row_has_header_height() {
    let config = DocumentConfig::default();
    let rendered = RundownDocument::new(vec![RundownItem::new("09:00", "", "")])
        .render(None)
        .unwrap();
    let heights: Vec<f64> = rendered.pages[0]
        .rects()
        .filter(|(_, style)| style.fill.is_none())
        .map(|(rect, _)| rect.height)
        .collect();
    assert_eq!(heights, vec![config.header_height]);
}

#[test]
fn table_stays_centered_for_custom_geometry() {
    let config = DocumentConfig {
        table_width: 400.0,
        ..DocumentConfig::default()
    };
    let rows: Vec<_> = (0..60).map(|_| RundownItem::new("09:00", "10:00", &activity_of_len(120))).collect();
    let rendered = RundownDocument::new(rows).with_config(config).render(None).unwrap();
    assert!(rendered.page_count() > 1);
    for page in &rendered.pages {
        for (rect, _) in page.rects() {
            assert_eq!(rect.x, 97.5);
            assert_eq!(rect.width, 400.0);
        }
    }
}

#[test]
fn preview_and_export_are_byte_identical() {
    let rows = vec![
        RundownItem::new("08:00", "09:00", "Registrasi tamu"),
        RundownItem::new("09:00", "10:30", &activity_of_len(400)),
    ];
    let doc = RundownDocument::new(rows).with_custom_title("Jadwal Acara 2025!");
    let source = asset_source();

    let preview_a = doc.preview(&source).unwrap();
    let preview_b = doc.preview(&source).unwrap();
    assert_eq!(preview_a, preview_b);

    let exported = doc.export(&source).unwrap();
    assert_eq!(exported.filename, "Jadwal-Acara-2025.pdf");
    let payload = preview_a.strip_prefix("data:application/pdf;base64,").unwrap();
    assert_eq!(general_purpose::STANDARD.decode(payload).unwrap(), exported.bytes);
}

#[test]
fn slug_drives_title_and_filename() {
    let doc = RundownDocument::new(vec![RundownItem::new("19:00", "21:00", "Rapat")]).with_slug("rapat-tahunan");
    assert_eq!(doc.title(), "Rundown – rapat tahunan");
    assert_eq!(doc.filename(), "rapat-tahunan.pdf");

    let dir = std::env::temp_dir().join(format!("rundown-export-{}", std::process::id()));
    let path = doc.export_to_dir(&asset_source(), &dir).unwrap();
    assert_eq!(path, dir.join("rapat-tahunan.pdf"));
    let written = std::fs::read(&path).unwrap();
    assert_eq!(page_count(&written), 1);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn failed_asset_fetch_produces_no_output() {
    let offline = || -> RendererResult<BackgroundImage> {
        Err(RendererError::AssetFetch("connection refused".to_string()))
    };
    let doc = RundownDocument::new(vec![RundownItem::new("09:00", "10:00", "Registrasi")]);

    assert!(matches!(doc.preview(&offline), Err(RendererError::AssetFetch(_))));
    assert!(matches!(doc.export(&offline), Err(RendererError::AssetFetch(_))));

    let dir = std::env::temp_dir().join(format!("rundown-never-written-{}", std::process::id()));
    assert!(doc.export_to_dir(&offline, &dir).is_err());
    assert!(!dir.exists());
}

#[test]
fn undecodable_asset_is_fatal() {
    let broken = JsonBytesAsset::new(r#"{"image": "bm90IGFuIGltYWdl"}"#);
    assert!(matches!(broken.fetch(), Err(RendererError::AssetDecode(_))));
    let doc = RundownDocument::new(vec![]);
    assert!(doc.export(&broken).is_err());
}

#[test]
fn rows_from_editor_json_render_permissively() {
    let rows = rundown_pdf_rust::json_helpers::parse_rows_str(
        r#"[{"start": "09:00", "end": "10:00", "activity": "Registrasi"},
            {"start": null, "activity": 12},
            {}]"#,
    )
    .unwrap();
    let rendered = RundownDocument::new(rows).render(None).unwrap();
    let data_rows = rendered.pages[0]
        .rects()
        .filter(|(_, style)| style.fill.is_none())
        .count();
    assert_eq!(data_rows, 3);
}

#[test]
fn single_row_taller_than_a_page_still_yields_more_than_one_page() {
    let config = DocumentConfig::default();
    let huge = vec!["acara"; 2000].join(" ");
    let rendered = RundownDocument::new(vec![RundownItem::new("09:00", "17:00", &huge)])
        .render(None)
        .unwrap();
    assert_eq!(rendered.page_count(), 2);

    // the row is drawn once, below the header of the second page
    let row_rects: Vec<_> = rendered
        .pages
        .iter()
        .flat_map(|page| page.rects().filter(|(_, style)| style.fill.is_none()))
        .collect();
    assert_eq!(row_rects.len(), 1);
    assert_eq!(row_rects[0].0.y, config.body_top());
    assert!(rendered.pages[1].rects().any(|(_, style)| style.fill.is_none()));

    assert_eq!(page_count(&rendered.to_pdf_bytes()), 2);
}
