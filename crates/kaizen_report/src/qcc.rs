use serde::{Deserialize, Serialize};

use crate::shared::{Fishbone, ScheduleTask};

/// Quality Control Circle report: header plus eight fixed steps.
///
/// Wire names follow the generator's JSON (`judul`, `langkah1`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QccReport {
    #[serde(rename = "judul")]
    pub title: String,
    #[serde(rename = "tim")]
    pub team: String,
    #[serde(rename = "lokasi")]
    pub location: String,
    #[serde(rename = "tanggal")]
    pub date: String,
    #[serde(rename = "langkah1")]
    pub step1: ThemeStep,
    #[serde(rename = "langkah2")]
    pub step2: TargetStep,
    #[serde(rename = "langkah3")]
    pub step3: AnalysisStep,
    #[serde(rename = "langkah4")]
    pub step4: PlanStep,
    #[serde(rename = "langkah5")]
    pub step5: ImplementationStep,
    #[serde(rename = "langkah6")]
    pub step6: EvaluationStep,
    #[serde(rename = "langkah7")]
    pub step7: StandardizationStep,
    #[serde(rename = "langkah8")]
    pub step8: NextPlanStep,
}

// Step 1 -------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeStep {
    #[serde(rename = "judul")]
    pub heading: String,
    #[serde(rename = "latarBelakang")]
    pub background: String,
    #[serde(rename = "kondisiAwal")]
    pub initial_condition: String,
    #[serde(rename = "dataAwal")]
    pub initial_data: Vec<DataPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataPoint {
    pub label: String,
    pub value: f64,
    pub unit: String,
}

// Step 2 -------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetStep {
    #[serde(rename = "judul")]
    pub heading: String,
    #[serde(rename = "targetKuantitatif")]
    pub quantitative: Vec<TargetMetric>,
    #[serde(rename = "targetKualitatif")]
    pub qualitative: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetMetric {
    #[serde(rename = "metrik")]
    pub metric: String,
    pub baseline: String,
    pub target: String,
}

// Step 3 -------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisStep {
    #[serde(rename = "judul")]
    pub heading: String,
    pub fishbone: Fishbone,
    #[serde(rename = "fiveWhy")]
    pub five_why: Vec<WhyPair>,
    #[serde(rename = "akarMasalah")]
    pub root_cause: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhyPair {
    pub why: String,
    pub because: String,
}

// Step 4 -------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanStep {
    #[serde(rename = "judul")]
    pub heading: String,
    #[serde(rename = "idePerbaikan")]
    pub ideas: Vec<ImprovementIdea>,
    #[serde(rename = "ganttChart")]
    pub schedule: Vec<ScheduleTask>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImprovementIdea {
    #[serde(rename = "ide")]
    pub idea: String,
    #[serde(rename = "deskripsi")]
    pub description: String,
    #[serde(rename = "penanggungJawab")]
    pub owner: String,
}

// Step 5 -------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImplementationStep {
    #[serde(rename = "judul")]
    pub heading: String,
    #[serde(rename = "implementasi")]
    pub implementation: String,
    #[serde(rename = "fotoSebelumUrl")]
    pub photo_before_url: String,
    #[serde(rename = "fotoSesudahUrl")]
    pub photo_after_url: String,
}

// Step 6 -------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationStep {
    #[serde(rename = "judul")]
    pub heading: String,
    #[serde(rename = "evaluasi")]
    pub evaluation: String,
    #[serde(rename = "dataPerbandingan")]
    pub comparison: Vec<ComparisonMetric>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonMetric {
    pub name: String,
    #[serde(rename = "sebelum")]
    pub before: f64,
    #[serde(rename = "sesudah")]
    pub after: f64,
    pub unit: String,
}

// Step 7 -------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StandardizationStep {
    #[serde(rename = "judul")]
    pub heading: String,
    #[serde(rename = "standardisasi")]
    pub standards: Vec<StandardEntry>,
    #[serde(rename = "pencegahan")]
    pub prevention: String,
    #[serde(rename = "horizontalDevelopment")]
    pub horizontal_development: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StandardEntry {
    #[serde(rename = "dokumen")]
    pub document: String,
    #[serde(rename = "deskripsi")]
    pub description: String,
}

// Step 8 -------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NextPlanStep {
    #[serde(rename = "judul")]
    pub heading: String,
    #[serde(rename = "rencanaBerikutnya")]
    pub next_plan: String,
}

impl QccReport {
    /// Photo URLs referenced by step 5, before then after.
    pub fn photo_urls(&self) -> [&str; 2] {
        [
            self.step5.photo_before_url.as_str(),
            self.step5.photo_after_url.as_str(),
        ]
    }
}
