use kaizen_core::ExportError;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ip::IpReport;
use crate::qcc::QccReport;

/// Discriminant of [`Report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Qcc,
    Ip,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Qcc => "QCC",
            Self::Ip => "IP",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "QCC" => Some(Self::Qcc),
            "IP" => Some(Self::Ip),
            _ => None,
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An improvement report: a closed union of the two report families.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Report {
    #[serde(rename = "QCC")]
    Qcc(QccReport),
    #[serde(rename = "IP")]
    Ip(IpReport),
}

impl Report {
    pub fn kind(&self) -> ReportKind {
        match self {
            Self::Qcc(_) => ReportKind::Qcc,
            Self::Ip(_) => ReportKind::Ip,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Qcc(r) => &r.title,
            Self::Ip(r) => &r.title,
        }
    }

    /// Parse a report as produced by the generation service.
    ///
    /// The `type` discriminant is checked before anything else so an unknown
    /// report family is rejected without touching the rest of the payload.
    /// Absent nested fields fall back to empty values.
    pub fn from_json(json: &str) -> Result<Self, ExportError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| ExportError::InvalidReport(e.to_string()))?;

        let tag = value
            .get("type")
            .and_then(|t| t.as_str())
            .ok_or_else(|| ExportError::UnsupportedReportType("<missing>".into()))?;

        match ReportKind::from_tag(tag) {
            Some(ReportKind::Qcc) => serde_json::from_value(value)
                .map(Self::Qcc)
                .map_err(|e| ExportError::InvalidReport(e.to_string())),
            Some(ReportKind::Ip) => serde_json::from_value(value)
                .map(Self::Ip)
                .map_err(|e| ExportError::InvalidReport(e.to_string())),
            None => Err(ExportError::UnsupportedReportType(tag.to_string())),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, ExportError> {
        serde_json::to_string_pretty(self).map_err(|e| ExportError::InvalidReport(e.to_string()))
    }
}

impl From<QccReport> for Report {
    fn from(report: QccReport) -> Self {
        Self::Qcc(report)
    }
}

impl From<IpReport> for Report {
    fn from(report: IpReport) -> Self {
        Self::Ip(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_qcc() {
        let report = Report::from_json(r#"{"type":"QCC","judul":"Reject Turun"}"#).unwrap();
        assert_eq!(report.kind(), ReportKind::Qcc);
        assert_eq!(report.title(), "Reject Turun");
    }

    #[test]
    fn test_from_json_ip() {
        let report = Report::from_json(
            r#"{"type":"IP","judul":"Gudang","jadwalKegiatan":[{"task":"Survey","start":"2025-01-01","end":"2025-01-03","duration":3}]}"#,
        )
        .unwrap();
        match report {
            Report::Ip(ip) => {
                assert_eq!(ip.schedule.len(), 1);
                assert_eq!(ip.schedule[0].end, "2025-01-03");
            }
            other => panic!("expected IP report, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_unknown_type_rejected() {
        let err = Report::from_json(r#"{"type":"SIX_SIGMA","judul":"x"}"#).unwrap_err();
        assert_eq!(err, ExportError::UnsupportedReportType("SIX_SIGMA".into()));
    }

    #[test]
    fn test_missing_type_rejected() {
        let err = Report::from_json(r#"{"judul":"x"}"#).unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedReportType(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = Report::from_json("{not json").unwrap_err();
        assert!(matches!(err, ExportError::InvalidReport(_)));
    }

    #[test]
    fn test_wrong_field_type_is_invalid_report() {
        let err = Report::from_json(r#"{"type":"QCC","langkah2":{"targetKualitatif":"oops"}}"#)
            .unwrap_err();
        assert!(matches!(err, ExportError::InvalidReport(_)));
    }

    #[test]
    fn test_json_roundtrip_keeps_tag() {
        let report: Report = QccReport {
            title: "Judul".into(),
            team: "Tim A".into(),
            ..Default::default()
        }
        .into();
        let json = report.to_json_pretty().unwrap();
        assert!(json.contains("\"type\": \"QCC\""));
        assert_eq!(Report::from_json(&json).unwrap(), report);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ReportKind::Ip.to_string(), "IP");
        assert_eq!(ReportKind::Qcc.as_str(), "QCC");
    }
}
