use serde::{Deserialize, Serialize};

use crate::shared::{Fishbone, ScheduleTask};

/// Individual Project report: title plus eight fixed sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpReport {
    #[serde(rename = "judul")]
    pub title: String,
    #[serde(rename = "jadwalKegiatan")]
    pub schedule: Vec<ScheduleTask>,
    #[serde(rename = "penentuanTema")]
    pub theme: ThemeTarget,
    #[serde(rename = "analisaMasalah")]
    pub problem_analysis: ProblemAnalysis,
    #[serde(rename = "alternatifSolusi")]
    pub alternatives: Vec<AlternativeGroup>,
    #[serde(rename = "desainRencanaPerbaikan")]
    pub design_plan: DesignPlan,
    #[serde(rename = "implementasiPerbaikan")]
    pub implementation: IpImplementation,
    #[serde(rename = "evaluasi")]
    pub evaluation: IpEvaluation,
    #[serde(rename = "standarisasi")]
    pub standardization: Standardization,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeTarget {
    pub data: String,
    #[serde(rename = "analisaSituasi")]
    pub situation_analysis: String,
    pub target: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProblemAnalysis {
    pub fishbone: Fishbone,
    #[serde(rename = "verifikasiAkarMasalah")]
    pub root_cause_checks: Vec<RootCauseCheck>,
}

/// One row of the root-cause verification table. `category` is kept as free
/// text (MAN, MATERIAL, MESIN, METODE) so unexpected values still render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RootCauseCheck {
    #[serde(rename = "kategori")]
    pub category: String,
    #[serde(rename = "rootCause")]
    pub root_cause: String,
    #[serde(rename = "verifikasi")]
    pub verification: String,
    #[serde(rename = "validasi")]
    pub validation: String,
}

/// Candidate solutions grouped under the root cause they address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlternativeGroup {
    #[serde(rename = "rootCause")]
    pub root_cause: String,
    #[serde(rename = "opsi")]
    pub options: Vec<SolutionOption>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolutionOption {
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "inspirasiIde")]
    pub inspiration: String,
    /// Pros and cons, written as "(+) ... (-) ...".
    #[serde(rename = "analisa")]
    pub analysis: String,
    #[serde(rename = "kesimpulan")]
    pub conclusion: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignPlan {
    #[serde(rename = "desainSolusi")]
    pub designs: Vec<SolutionDesign>,
    #[serde(rename = "rencanaDetail")]
    pub plan: Vec<PlanRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolutionDesign {
    #[serde(rename = "judul")]
    pub title: String,
    #[serde(rename = "deskripsi")]
    pub description: String,
}

/// A 5W2H planning row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanRow {
    pub activity: String,
    pub why: String,
    pub how: String,
    #[serde(rename = "where")]
    pub place: String,
    pub when: String,
    pub who: String,
    #[serde(rename = "howMuch")]
    pub how_much: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpImplementation {
    #[serde(rename = "langkah")]
    pub stages: Vec<ImplementationStage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImplementationStage {
    #[serde(rename = "judul")]
    pub title: String,
    #[serde(rename = "studyDanFinalDesign")]
    pub study_and_final_design: String,
    #[serde(rename = "persiapanPerbaikan")]
    pub preparation: String,
    #[serde(rename = "prosesPerbaikan")]
    pub process: String,
    #[serde(rename = "trialDanEvaluasi")]
    pub trial_and_evaluation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpEvaluation {
    #[serde(rename = "fotoSebelumUrl")]
    pub photo_before_url: String,
    #[serde(rename = "fotoSesudahUrl")]
    pub photo_after_url: String,
    #[serde(rename = "evaluasiQCDSM")]
    pub qcdsm: Vec<QcdsmRow>,
}

/// QCDSM evaluation dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QcdsmAspect {
    #[serde(rename = "Q", alias = "Quality")]
    Quality,
    #[serde(rename = "C", alias = "Cost")]
    Cost,
    #[serde(rename = "D", alias = "Delivery")]
    Delivery,
    #[serde(rename = "S", alias = "Safety")]
    Safety,
    #[serde(rename = "M", alias = "Morale")]
    Morale,
}

impl QcdsmAspect {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Quality => "Quality",
            Self::Cost => "Cost",
            Self::Delivery => "Delivery",
            Self::Safety => "Safety",
            Self::Morale => "Morale",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QcdsmRow {
    /// `None` when the row has no aspect yet.
    #[serde(rename = "aspek", deserialize_with = "blank_aspect")]
    pub aspect: Option<QcdsmAspect>,
    #[serde(rename = "sebelumPerbaikan")]
    pub before: String,
    #[serde(rename = "sesudahPerbaikan")]
    pub after: String,
    pub data: String,
}

/// An empty `aspek` string reads as no aspect.
fn blank_aspect<'de, D>(deserializer: D) -> Result<Option<QcdsmAspect>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(code) if code.trim().is_empty() => Ok(None),
        Some(code) => QcdsmAspect::deserialize(serde::de::value::StrDeserializer::<D::Error>::new(
            code.trim(),
        ))
        .map(Some),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Standardization {
    #[serde(rename = "deskripsiStandarisasi")]
    pub description: String,
    #[serde(rename = "horizontalDevelopment")]
    pub horizontal_development: String,
}

impl IpReport {
    /// Photo URLs referenced by the evaluation section, before then after.
    pub fn photo_urls(&self) -> [&str; 2] {
        [
            self.evaluation.photo_before_url.as_str(),
            self.evaluation.photo_after_url.as_str(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qcdsm_aspect_accepts_code_and_name() {
        let rows: Vec<QcdsmRow> = serde_json::from_str(
            r#"[{"aspek":"Q","data":"10% -> 2%"},{"aspek":"Morale"},{"aspek":"S"}]"#,
        )
        .unwrap();
        assert_eq!(rows[0].aspect, Some(QcdsmAspect::Quality));
        assert_eq!(rows[1].aspect, Some(QcdsmAspect::Morale));
        assert_eq!(rows[2].aspect.map(|a| a.label()), Some("Safety"));
        assert_eq!(serde_json::to_string(&QcdsmAspect::Cost).unwrap(), "\"C\"");
    }

    #[test]
    fn test_qcdsm_row_without_aspect() {
        let rows: Vec<QcdsmRow> = serde_json::from_str(
            r#"[{"data":"Jan-Feb"},{"aspek":""},{"aspek":null,"sesudahPerbaikan":"0x"}]"#,
        )
        .unwrap();
        assert!(rows.iter().all(|r| r.aspect.is_none()));
        assert_eq!(rows[2].after, "0x");
        assert!(serde_json::from_str::<QcdsmRow>(r#"{"aspek":"X"}"#).is_err());
    }

    #[test]
    fn test_alternatives_keep_groups() {
        let report: IpReport = serde_json::from_str(
            r#"{
                "judul": "Efisiensi Gudang",
                "alternatifSolusi": [
                    {"rootCause": "Rootcause 1", "opsi": [{"nama": "A"}, {"nama": "B"}]},
                    {"rootCause": "Rootcause 2", "opsi": [{"nama": "C"}]}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(report.alternatives.len(), 2);
        assert_eq!(report.alternatives[0].options.len(), 2);
        assert_eq!(report.alternatives[1].options[0].name, "C");
    }

    #[test]
    fn test_plan_row_where_field() {
        let row: PlanRow =
            serde_json::from_str(r#"{"activity":"Solusi 1","where":"Line 2","howMuch":"Rp 1jt"}"#)
                .unwrap();
        assert_eq!(row.place, "Line 2");
        assert_eq!(row.how_much, "Rp 1jt");
    }

    #[test]
    fn test_missing_sections_default() {
        let report: IpReport = serde_json::from_str(r#"{"judul": "Kosong"}"#).unwrap();
        assert!(report.schedule.is_empty());
        assert!(report.evaluation.qcdsm.is_empty());
        assert_eq!(report.photo_urls(), ["", ""]);
    }
}
