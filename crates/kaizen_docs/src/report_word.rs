//! Report-to-Word projection. Single pass, no layout state: every section
//! heading is always emitted, empty text fields become empty paragraphs and
//! empty tables keep their header row.

use kaizen_report::{Fishbone, IP_STEPS, IpReport, QCC_STEPS, QccReport};

use crate::html::{
    bullet_list, captioned_image, generate_html_table, generate_word_html, heading,
    labelled_paragraph, paragraph,
};
use crate::tables::{self, TableData};

pub fn render_qcc_word(report: &QccReport) -> Vec<u8> {
    let mut body = String::new();
    body.push_str(&heading(1, &report.title));
    body.push_str(&labelled_paragraph("Tim", &report.team));
    body.push_str(&labelled_paragraph("Lokasi", &report.location));
    body.push_str(&labelled_paragraph("Tanggal", &report.date));

    let title = |i: usize| heading(2, &format!("Langkah {}: {}", i + 1, QCC_STEPS[i]));

    let s = &report.step1;
    body.push_str(&title(0));
    body.push_str(&paragraph(&s.heading));
    text_field(&mut body, "Latar Belakang", &s.background);
    text_field(&mut body, "Kondisi Awal", &s.initial_condition);
    table_field(&mut body, "Data Awal", &tables::initial_data_table(&s.initial_data));

    let s = &report.step2;
    body.push_str(&title(1));
    body.push_str(&paragraph(&s.heading));
    table_field(&mut body, "Target Kuantitatif", &tables::target_table(&s.quantitative));
    body.push_str(&heading(3, "Target Kualitatif"));
    if s.qualitative.is_empty() {
        body.push_str(&paragraph(""));
    } else {
        body.push_str(&bullet_list(&s.qualitative));
    }

    let s = &report.step3;
    body.push_str(&title(2));
    body.push_str(&paragraph(&s.heading));
    fishbone_field(&mut body, "Analisa Fishbone", &s.fishbone);
    table_field(&mut body, "Analisis 5 Why", &tables::five_why_table(&s.five_why));
    text_field(&mut body, "Akar Masalah", &s.root_cause);

    let s = &report.step4;
    body.push_str(&title(3));
    body.push_str(&paragraph(&s.heading));
    table_field(&mut body, "Ide Perbaikan", &tables::ideas_table(&s.ideas));
    table_field(&mut body, "Jadwal Perbaikan", &tables::schedule_table(&s.schedule));

    let s = &report.step5;
    body.push_str(&title(4));
    body.push_str(&paragraph(&s.heading));
    body.push_str(&paragraph(&s.implementation));
    photo_pair(&mut body, report.photo_urls());

    let s = &report.step6;
    body.push_str(&title(5));
    body.push_str(&paragraph(&s.heading));
    body.push_str(&paragraph(&s.evaluation));
    table_field(&mut body, "Data Perbandingan", &tables::comparison_table(&s.comparison));

    let s = &report.step7;
    body.push_str(&title(6));
    body.push_str(&paragraph(&s.heading));
    table_field(&mut body, "Standardisasi", &tables::standards_table(&s.standards));
    text_field(&mut body, "Rencana Pencegahan", &s.prevention);
    text_field(&mut body, "Horizontal Development", &s.horizontal_development);

    let s = &report.step8;
    body.push_str(&title(7));
    body.push_str(&paragraph(&s.heading));
    body.push_str(&paragraph(&s.next_plan));

    generate_word_html(&report.title, &body).into_bytes()
}

pub fn render_ip_word(report: &IpReport) -> Vec<u8> {
    let mut body = String::new();
    body.push_str(&heading(1, &report.title));
    body.push_str(&paragraph("Laporan Individual Project"));

    let title = |i: usize| heading(2, &format!("{}. {}", i + 1, IP_STEPS[i]));

    body.push_str(&title(0));
    body.push_str(&table_html(&tables::schedule_table(&report.schedule)));

    let theme = &report.theme;
    body.push_str(&title(1));
    text_field(&mut body, "Data Penentuan Tema", &theme.data);
    text_field(&mut body, "Analisa Situasi", &theme.situation_analysis);
    text_field(&mut body, "Target", &theme.target);

    let analysis = &report.problem_analysis;
    body.push_str(&title(2));
    fishbone_field(&mut body, "Analisa Fishbone", &analysis.fishbone);
    table_field(
        &mut body,
        "Verifikasi Akar Masalah",
        &tables::root_cause_table(&analysis.root_cause_checks),
    );

    body.push_str(&title(3));
    body.push_str(&table_html(&tables::alternatives_table(&report.alternatives)));

    let design = &report.design_plan;
    body.push_str(&title(4));
    body.push_str(&heading(3, "Desain Solusi"));
    if design.designs.is_empty() {
        body.push_str(&paragraph(""));
    }
    for d in &design.designs {
        body.push_str(&labelled_paragraph(&d.title, &d.description));
    }
    table_field(&mut body, "Rencana Detail (5W2H)", &tables::plan_table(&design.plan));

    body.push_str(&title(5));
    if report.implementation.stages.is_empty() {
        body.push_str(&paragraph(""));
    }
    for stage in &report.implementation.stages {
        body.push_str(&heading(3, &stage.title));
        body.push_str(&labelled_paragraph("Study & Final Design", &stage.study_and_final_design));
        body.push_str(&labelled_paragraph("Persiapan Perbaikan", &stage.preparation));
        body.push_str(&labelled_paragraph("Proses Perbaikan", &stage.process));
        body.push_str(&labelled_paragraph("Trial & Evaluasi", &stage.trial_and_evaluation));
    }

    body.push_str(&title(6));
    photo_pair(&mut body, report.photo_urls());
    table_field(&mut body, "Evaluasi QCDSM", &tables::qcdsm_table(&report.evaluation.qcdsm));

    let standard = &report.standardization;
    body.push_str(&title(7));
    text_field(&mut body, "Standarisasi", &standard.description);
    text_field(&mut body, "Horizontal Development", &standard.horizontal_development);

    generate_word_html(&report.title, &body).into_bytes()
}

fn table_html(table: &TableData) -> String {
    generate_html_table(table.headers, &table.rows)
}

fn text_field(body: &mut String, label: &str, value: &str) {
    body.push_str(&heading(3, label));
    body.push_str(&paragraph(value));
}

fn table_field(body: &mut String, label: &str, table: &TableData) {
    body.push_str(&heading(3, label));
    body.push_str(&table_html(table));
}

/// Empty categories get no heading at all.
fn fishbone_field(body: &mut String, label: &str, fishbone: &Fishbone) {
    body.push_str(&heading(3, label));
    if fishbone.is_empty() {
        body.push_str(&paragraph(""));
        return;
    }
    for (category, causes) in fishbone.populated() {
        body.push_str(&heading(4, category.label()));
        body.push_str(&bullet_list(causes));
    }
}

fn photo_pair(body: &mut String, [before, after]: [&str; 2]) {
    if before.trim().is_empty() && after.trim().is_empty() {
        return;
    }
    body.push_str(&heading(3, "Foto Sebelum & Sesudah"));
    for (caption, url) in [("Sebelum", before), ("Sesudah", after)] {
        if !url.trim().is_empty() {
            body.push_str(&captioned_image(url, caption));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kaizen_report::{ScheduleTask, SolutionDesign};

    fn html(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_qcc_word_has_all_step_headings() {
        let doc = html(render_qcc_word(&QccReport::default()));
        for (i, step) in QCC_STEPS.iter().enumerate() {
            let expected = format!("<h2>Langkah {}: {}</h2>", i + 1, step.replace('&', "&amp;"));
            assert!(doc.contains(&expected), "missing {expected}");
        }
        assert!(doc.contains("<p></p>"));
    }

    #[test]
    fn test_ip_word_has_all_section_headings() {
        let doc = html(render_ip_word(&IpReport::default()));
        for (i, step) in IP_STEPS.iter().enumerate() {
            let expected = format!("<h2>{}. {}</h2>", i + 1, step.replace('&', "&amp;"));
            assert!(doc.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn test_word_leaves_pagination_to_the_reader() {
        for doc in [
            html(render_qcc_word(&QccReport::default())),
            html(render_ip_word(&IpReport::default())),
        ] {
            assert!(!doc.contains("page-break"));
            assert!(!doc.contains("mso-break-type"));
        }
    }

    #[test]
    fn test_fishbone_only_populated_categories() {
        let mut report = IpReport::default();
        report.problem_analysis.fishbone.machine = vec!["Pisau tumpul".into()];
        report.problem_analysis.fishbone.method = vec!["SOP lama".into(), "Tanpa checklist".into()];
        let doc = html(render_ip_word(&report));
        assert!(doc.contains("<h4>Mesin</h4>"));
        assert!(doc.contains("<h4>Metode</h4>"));
        assert!(doc.contains("<li>Tanpa checklist</li>"));
        assert!(!doc.contains("<h4>Manusia</h4>"));
        assert!(!doc.contains("<h4>Lingkungan</h4>"));
        assert!(!doc.contains("<h4>Material</h4>"));
    }

    #[test]
    fn test_schedule_single_row() {
        let report = IpReport {
            schedule: vec![ScheduleTask::new("Survey", "2025-01-01", "2025-01-03", 3)],
            ..Default::default()
        };
        let doc = html(render_ip_word(&report));
        assert!(doc.contains(
            "<tr>\n    <td>Survey</td>\n    <td>2025-01-01</td>\n    <td>2025-01-03</td>\n    <td>3</td>\n</tr>"
        ));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut report = QccReport::default();
        report.step1.background = "Suhu <80C & tidak stabil".into();
        let doc = html(render_qcc_word(&report));
        assert!(doc.contains("<p>Suhu &lt;80C &amp; tidak stabil</p>"));
    }

    #[test]
    fn test_photos_referenced_by_url() {
        let mut report = QccReport::default();
        report.step5.photo_after_url = "https://img.example/after.jpg".into();
        let doc = html(render_qcc_word(&report));
        assert!(doc.contains("src=\"https://img.example/after.jpg\""));
        assert!(!doc.contains("alt=\"Sebelum\""));
    }

    #[test]
    fn test_designs_rendered_as_labelled_paragraphs() {
        let mut report = IpReport::default();
        report.design_plan.designs = vec![SolutionDesign {
            title: "Rak Modular".into(),
            description: "Rak dua tingkat".into(),
        }];
        let doc = html(render_ip_word(&report));
        assert!(doc.contains("<p><b>Rak Modular:</b> Rak dua tingkat</p>"));
    }

    #[test]
    fn test_word_output_is_deterministic() {
        let report = QccReport {
            title: "Sama".into(),
            ..Default::default()
        };
        assert_eq!(render_qcc_word(&report), render_qcc_word(&report));
    }
}
