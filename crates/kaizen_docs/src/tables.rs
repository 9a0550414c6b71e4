//! Per-section table mapping shared by the PDF, Word and slide renderers,
//! so every format shows the same columns and cell text.

use kaizen_report::{
    AlternativeGroup, ComparisonMetric, DataPoint, ImprovementIdea, PlanRow, QcdsmRow,
    RootCauseCheck, ScheduleTask, StandardEntry, TargetMetric, WhyPair,
};
use tracing::warn;

/// Header labels plus one row of cell text per record.
#[derive(Debug, Clone, PartialEq)]
pub struct TableData {
    pub headers: &'static [&'static str],
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    fn new(headers: &'static [&'static str], rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Shortest text that reads back as the same value. Whole numbers have no
/// trailing `.0`.
pub fn format_number(value: f64) -> String {
    value.to_string()
}

/// Schedule rows carry `duration` exactly as supplied. Inconsistent
/// dates are logged, never corrected.
pub fn schedule_table(tasks: &[ScheduleTask]) -> TableData {
    for task in tasks {
        for issue in task.check() {
            warn!(task = %task.label, %issue, "Schedule task is inconsistent");
        }
    }
    TableData::new(
        &["Tugas", "Mulai", "Selesai", "Durasi (Hari)"],
        tasks
            .iter()
            .map(|t| {
                vec![
                    t.label.clone(),
                    t.start.clone(),
                    t.end.clone(),
                    t.duration.to_string(),
                ]
            })
            .collect(),
    )
}

pub fn initial_data_table(points: &[DataPoint]) -> TableData {
    TableData::new(
        &["Data", "Nilai", "Unit"],
        points
            .iter()
            .map(|p| vec![p.label.clone(), format_number(p.value), p.unit.clone()])
            .collect(),
    )
}

pub fn target_table(targets: &[TargetMetric]) -> TableData {
    TableData::new(
        &["Metrik", "Baseline", "Target"],
        targets
            .iter()
            .map(|t| vec![t.metric.clone(), t.baseline.clone(), t.target.clone()])
            .collect(),
    )
}

pub fn five_why_table(pairs: &[WhyPair]) -> TableData {
    TableData::new(
        &["No", "Mengapa", "Karena"],
        pairs
            .iter()
            .enumerate()
            .map(|(i, p)| vec![(i + 1).to_string(), p.why.clone(), p.because.clone()])
            .collect(),
    )
}

pub fn ideas_table(ideas: &[ImprovementIdea]) -> TableData {
    TableData::new(
        &["Ide", "Deskripsi", "PJ"],
        ideas
            .iter()
            .map(|i| vec![i.idea.clone(), i.description.clone(), i.owner.clone()])
            .collect(),
    )
}

pub fn comparison_table(metrics: &[ComparisonMetric]) -> TableData {
    TableData::new(
        &["Metrik", "Sebelum", "Sesudah", "Unit"],
        metrics
            .iter()
            .map(|m| {
                vec![
                    m.name.clone(),
                    format_number(m.before),
                    format_number(m.after),
                    m.unit.clone(),
                ]
            })
            .collect(),
    )
}

pub fn standards_table(entries: &[StandardEntry]) -> TableData {
    TableData::new(
        &["Dokumen", "Deskripsi"],
        entries
            .iter()
            .map(|e| vec![e.document.clone(), e.description.clone()])
            .collect(),
    )
}

pub fn root_cause_table(checks: &[RootCauseCheck]) -> TableData {
    TableData::new(
        &["Kategori", "Root Cause", "Verifikasi", "Validasi"],
        checks
            .iter()
            .map(|c| {
                vec![
                    c.category.clone(),
                    c.root_cause.clone(),
                    c.verification.clone(),
                    c.validation.clone(),
                ]
            })
            .collect(),
    )
}

/// One row per solution option, each tagged with its root cause.
pub fn alternatives_table(groups: &[AlternativeGroup]) -> TableData {
    TableData::new(
        &["Root Cause", "Opsi", "Inspirasi Ide", "Analisa (+/-)", "Kesimpulan"],
        groups
            .iter()
            .flat_map(|g| {
                g.options.iter().map(move |o| {
                    vec![
                        g.root_cause.clone(),
                        o.name.clone(),
                        o.inspiration.clone(),
                        o.analysis.clone(),
                        o.conclusion.clone(),
                    ]
                })
            })
            .collect(),
    )
}

pub fn plan_table(rows: &[PlanRow]) -> TableData {
    TableData::new(
        &["Activity", "Why", "How", "Where", "When", "Who", "How Much"],
        rows.iter()
            .map(|r| {
                vec![
                    r.activity.clone(),
                    r.why.clone(),
                    r.how.clone(),
                    r.place.clone(),
                    r.when.clone(),
                    r.who.clone(),
                    r.how_much.clone(),
                ]
            })
            .collect(),
    )
}

pub fn qcdsm_table(rows: &[QcdsmRow]) -> TableData {
    TableData::new(
        &["Aspek", "Sebelum Perbaikan", "Sesudah Perbaikan", "Data"],
        rows.iter()
            .map(|r| {
                vec![
                    r.aspect.map(|a| a.label()).unwrap_or_default().to_string(),
                    r.before.clone(),
                    r.after.clone(),
                    r.data.clone(),
                ]
            })
            .collect(),
    )
}
