// Report data model: the QCC / IP tagged union consumed by the export engine.

pub mod ip;
pub mod qcc;
pub mod report;
pub mod shared;
pub mod steps;

pub use ip::{
    AlternativeGroup, DesignPlan, IpEvaluation, IpImplementation, IpReport, ImplementationStage,
    PlanRow, ProblemAnalysis, QcdsmAspect, QcdsmRow, RootCauseCheck, SolutionDesign,
    SolutionOption, Standardization, ThemeTarget,
};
pub use qcc::{
    AnalysisStep, ComparisonMetric, DataPoint, EvaluationStep, ImplementationStep,
    ImprovementIdea, NextPlanStep, PlanStep, QccReport, StandardEntry, StandardizationStep,
    TargetMetric, TargetStep, ThemeStep, WhyPair,
};
pub use report::{Report, ReportKind};
pub use shared::{Fishbone, FishboneCategory, ScheduleIssue, ScheduleTask};
pub use steps::{IP_STEPS, QCC_STEPS};
