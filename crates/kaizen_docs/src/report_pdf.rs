//! Report-to-PDF projection: walks the sections in canonical order and feeds
//! a [`PdfDocumentBuilder`]. Blank text fields, empty lists, empty fishbone
//! categories and failed captures are left out; section titles never are.

use kaizen_core::ExportError;
use kaizen_report::{Fishbone, IP_STEPS, IpReport, QCC_STEPS, QccReport};
use tracing::debug;

use crate::pdf::PdfDocumentBuilder;
use crate::rasterizer::{Rasterizer, regions};
use crate::tables::{self, TableData};

pub async fn render_qcc_pdf(
    report: &QccReport,
    rasterizer: &dyn Rasterizer,
) -> Result<Vec<u8>, ExportError> {
    let mut b = PdfDocumentBuilder::new();

    b.add_cover_title(&report.title)?;
    b.add_subtitle("Laporan Quality Control Circle (QCC)")?;
    labelled_line(&mut b, "Tim", &report.team)?;
    labelled_line(&mut b, "Lokasi", &report.location)?;
    labelled_line(&mut b, "Tanggal", &report.date)?;

    let title = |i: usize| format!("Langkah {}: {}", i + 1, QCC_STEPS[i]);

    // 1. Theme
    let s = &report.step1;
    b.start_section(&title(0))?;
    heading(&mut b, &s.heading)?;
    text_field(&mut b, "Latar Belakang", &s.background)?;
    text_field(&mut b, "Kondisi Awal", &s.initial_condition)?;
    table_field(&mut b, "Data Awal", &tables::initial_data_table(&s.initial_data))?;

    // 2. Target
    let s = &report.step2;
    b.start_section(&title(1))?;
    heading(&mut b, &s.heading)?;
    table_field(&mut b, "Target Kuantitatif", &tables::target_table(&s.quantitative))?;
    bullets_field(&mut b, "Target Kualitatif", &s.qualitative)?;

    // 3. Analysis
    let s = &report.step3;
    b.start_section(&title(2))?;
    heading(&mut b, &s.heading)?;
    if let Some(bitmap) = rasterizer.capture_region(regions::FISHBONE_DIAGRAM).await {
        b.add_image(&bitmap, 180.0, 80.0);
    }
    fishbone_field(&mut b, "Analisa Fishbone", &s.fishbone)?;
    table_field(&mut b, "Analisis 5 Why", &tables::five_why_table(&s.five_why))?;
    text_field(&mut b, "Akar Masalah", &s.root_cause)?;

    // 4. Plan
    let s = &report.step4;
    b.start_section(&title(3))?;
    heading(&mut b, &s.heading)?;
    table_field(&mut b, "Ide Perbaikan", &tables::ideas_table(&s.ideas))?;
    if let Some(bitmap) = rasterizer.capture_region(regions::GANTT_CHART).await {
        b.add_image(&bitmap, 180.0, 60.0);
    }
    table_field(&mut b, "Jadwal Perbaikan", &tables::schedule_table(&s.schedule))?;

    // 5. Implementation
    let s = &report.step5;
    b.start_section(&title(4))?;
    heading(&mut b, &s.heading)?;
    if !s.implementation.trim().is_empty() {
        b.add_paragraph(&s.implementation)?;
    }
    photo_pair(&mut b, rasterizer, report.photo_urls()).await?;

    // 6. Evaluation
    let s = &report.step6;
    b.start_section(&title(5))?;
    heading(&mut b, &s.heading)?;
    if !s.evaluation.trim().is_empty() {
        b.add_paragraph(&s.evaluation)?;
    }
    if let Some(bitmap) = rasterizer.capture_region(regions::BEFORE_AFTER_CHART).await {
        b.add_image(&bitmap, 180.0, 90.0);
    }
    table_field(&mut b, "Data Perbandingan", &tables::comparison_table(&s.comparison))?;

    // 7. Standardization
    let s = &report.step7;
    b.start_section(&title(6))?;
    heading(&mut b, &s.heading)?;
    table_field(&mut b, "Standardisasi", &tables::standards_table(&s.standards))?;
    text_field(&mut b, "Rencana Pencegahan", &s.prevention)?;
    text_field(&mut b, "Horizontal Development", &s.horizontal_development)?;

    // 8. Next plan
    let s = &report.step8;
    b.start_section(&title(7))?;
    heading(&mut b, &s.heading)?;
    if !s.next_plan.trim().is_empty() {
        b.add_paragraph(&s.next_plan)?;
    }

    debug!(pages = b.page_count(), "QCC PDF laid out");
    Ok(b.finish(&report.title))
}

pub async fn render_ip_pdf(
    report: &IpReport,
    rasterizer: &dyn Rasterizer,
) -> Result<Vec<u8>, ExportError> {
    let mut b = PdfDocumentBuilder::new();

    b.add_cover_title(&report.title)?;
    b.add_subtitle("Laporan Individual Project")?;

    let title = |i: usize| format!("{}. {}", i + 1, IP_STEPS[i]);

    b.start_section(&title(0))?;
    table_field(&mut b, "Jadwal Kegiatan", &tables::schedule_table(&report.schedule))?;
    if let Some(bitmap) = rasterizer.capture_region(regions::IP_GANTT_CHART).await {
        b.add_image(&bitmap, 180.0, 60.0);
    }

    let theme = &report.theme;
    b.start_section(&title(1))?;
    text_field(&mut b, "Data Penentuan Tema", &theme.data)?;
    text_field(&mut b, "Analisa Situasi", &theme.situation_analysis)?;
    text_field(&mut b, "Target", &theme.target)?;

    let analysis = &report.problem_analysis;
    b.start_section(&title(2))?;
    fishbone_field(&mut b, "Analisa Fishbone (Akar Masalah)", &analysis.fishbone)?;
    table_field(
        &mut b,
        "Verifikasi Akar Masalah",
        &tables::root_cause_table(&analysis.root_cause_checks),
    )?;

    b.start_section(&title(3))?;
    table_field(&mut b, "Opsi Solusi", &tables::alternatives_table(&report.alternatives))?;

    let design = &report.design_plan;
    b.start_section(&title(4))?;
    if !design.designs.is_empty() {
        b.add_subtitle("Desain Solusi")?;
        for d in &design.designs {
            if !d.title.trim().is_empty() {
                b.add_label(&d.title)?;
            }
            if !d.description.trim().is_empty() {
                b.add_paragraph(&d.description)?;
            }
        }
    }
    table_field(&mut b, "Rencana Detail (5W2H)", &tables::plan_table(&design.plan))?;

    b.start_section(&title(5))?;
    for stage in &report.implementation.stages {
        heading(&mut b, &stage.title)?;
        labelled_line(&mut b, "Study & Final Design", &stage.study_and_final_design)?;
        labelled_line(&mut b, "Persiapan Perbaikan", &stage.preparation)?;
        labelled_line(&mut b, "Proses Perbaikan", &stage.process)?;
        labelled_line(&mut b, "Trial & Evaluasi", &stage.trial_and_evaluation)?;
    }

    b.start_section(&title(6))?;
    photo_pair(&mut b, rasterizer, report.photo_urls()).await?;
    table_field(&mut b, "Evaluasi QCDSM", &tables::qcdsm_table(&report.evaluation.qcdsm))?;

    let standard = &report.standardization;
    b.start_section(&title(7))?;
    text_field(&mut b, "Standarisasi", &standard.description)?;
    text_field(&mut b, "Horizontal Development", &standard.horizontal_development)?;

    debug!(pages = b.page_count(), "IP PDF laid out");
    Ok(b.finish(&report.title))
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

fn heading(b: &mut PdfDocumentBuilder, text: &str) -> Result<(), ExportError> {
    if text.trim().is_empty() {
        return Ok(());
    }
    b.add_subtitle(text)
}

fn labelled_line(b: &mut PdfDocumentBuilder, label: &str, value: &str) -> Result<(), ExportError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    b.add_paragraph(&format!("{label}: {value}"))
}

fn text_field(b: &mut PdfDocumentBuilder, label: &str, value: &str) -> Result<(), ExportError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    b.add_subtitle(label)?;
    b.add_paragraph(value)
}

fn bullets_field(b: &mut PdfDocumentBuilder, label: &str, items: &[String]) -> Result<(), ExportError> {
    let items: Vec<&str> = items
        .iter()
        .map(String::as_str)
        .filter(|s| !s.trim().is_empty())
        .collect();
    if items.is_empty() {
        return Ok(());
    }
    b.add_subtitle(label)?;
    b.add_bullets(&items)
}

fn table_field(b: &mut PdfDocumentBuilder, label: &str, table: &TableData) -> Result<(), ExportError> {
    if table.is_empty() {
        return Ok(());
    }
    b.add_subtitle(label)?;
    b.add_table(table.headers, &table.rows)
}

/// Only categories with causes get a heading.
fn fishbone_field(b: &mut PdfDocumentBuilder, label: &str, fishbone: &Fishbone) -> Result<(), ExportError> {
    if fishbone.is_empty() {
        return Ok(());
    }
    b.add_subtitle(label)?;
    for (category, causes) in fishbone.populated() {
        b.add_label(category.label())?;
        b.add_bullets(causes)?;
    }
    Ok(())
}

/// Before/after photos. A photo that cannot be fetched is left out along
/// with its caption.
async fn photo_pair(
    b: &mut PdfDocumentBuilder,
    rasterizer: &dyn Rasterizer,
    [before, after]: [&str; 2],
) -> Result<(), ExportError> {
    for (caption, url) in [("Sebelum", before), ("Sesudah", after)] {
        if url.trim().is_empty() {
            continue;
        }
        if let Some(bitmap) = rasterizer.fetch_remote_image(url).await {
            b.add_label(caption)?;
            b.add_image(&bitmap, 120.0, 80.0);
        }
    }
    Ok(())
}
