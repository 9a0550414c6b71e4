#![allow(dead_code)]

use kaizen_report::Report;
use serde_json::json;
use std::io::{Cursor, Read};

pub fn sample_qcc() -> Report {
    let value = json!({
        "type": "QCC",
        "judul": "Menurunkan Reject Seal Kemasan",
        "tim": "Tim Gemilang",
        "lokasi": "Line Packing 2",
        "tanggal": "2025-02-10",
        "langkah1": {
            "judul": "Reject seal tinggi",
            "latarBelakang": "Reject seal mencapai 8% per bulan.",
            "kondisiAwal": "Suhu sealer berfluktuasi.",
            "dataAwal": [{"label": "Reject", "value": 8, "unit": "%"}]
        },
        "langkah2": {
            "targetKuantitatif": [{"metrik": "Reject", "baseline": "8%", "target": "2%"}],
            "targetKualitatif": ["Operator memahami SOP baru"]
        },
        "langkah3": {
            "fishbone": {
                "manusia": ["Operator baru", "Kurang pelatihan"],
                "mesin": ["Heater aus"],
                "metode": [],
                "material": ["Film tipis"],
                "lingkungan": []
            },
            "fiveWhy": [{"why": "Kenapa seal bocor?", "because": "Suhu tidak stabil"}],
            "akarMasalah": "Heater aus"
        },
        "langkah4": {
            "idePerbaikan": [{"ide": "Ganti heater", "deskripsi": "Heater baru", "penanggungJawab": "Budi"}],
            "ganttChart": [{"task": "Survey", "start": "2025-01-01", "end": "2025-01-03", "duration": 3}]
        },
        "langkah5": {"implementasi": "Heater diganti dan dikalibrasi."},
        "langkah6": {
            "evaluasi": "Reject turun signifikan.",
            "dataPerbandingan": [{"name": "Reject", "sebelum": 8, "sesudah": 1.5, "unit": "%"}]
        },
        "langkah7": {
            "standardisasi": [{"dokumen": "SOP-PCK-07", "deskripsi": "Kalibrasi heater mingguan"}],
            "pencegahan": "Checklist harian",
            "horizontalDevelopment": "Line Packing 1 dan 3"
        },
        "langkah8": {"rencanaBerikutnya": "Menurunkan downtime mesin filling"}
    });
    Report::from_json(&value.to_string()).unwrap()
}

pub fn sample_ip() -> Report {
    let option = |name: &str| {
        json!({
            "nama": name,
            "inspirasiIde": "Benchmark gudang lain",
            "analisa": "(+) murah (-) perlu waktu",
            "kesimpulan": "Dipilih"
        })
    };
    let value = json!({
        "type": "IP",
        "judul": "Penataan Gudang Sparepart",
        "jadwalKegiatan": [
            {"task": "Survey", "start": "2025-01-01", "end": "2025-01-03", "duration": 3}
        ],
        "penentuanTema": {
            "data": "Waktu cari sparepart 25 menit",
            "analisaSituasi": "Rak tidak berlabel",
            "target": "Waktu cari 5 menit"
        },
        "analisaMasalah": {
            "fishbone": {
                "manusia": [],
                "mesin": [],
                "metode": ["Tidak ada sistem lokasi"],
                "material": ["Label mudah lepas"],
                "lingkungan": []
            },
            "verifikasiAkarMasalah": [
                {"kategori": "METODE", "rootCause": "Tidak ada sistem lokasi", "verifikasi": "Observasi", "validasi": "Valid"}
            ]
        },
        "alternatifSolusi": [
            {"rootCause": "Rak penuh", "opsi": [option("Opsi A1"), option("Opsi A2")]},
            {"rootCause": "Label hilang", "opsi": [option("Opsi B1"), option("Opsi B2")]}
        ],
        "desainRencanaPerbaikan": {
            "desainSolusi": [{"judul": "Rak Modular", "deskripsi": "Rak dua tingkat berkode"}],
            "rencanaDetail": [{
                "activity": "Pasang rak", "why": "Lokasi tetap", "how": "Vendor",
                "where": "Gudang", "when": "Minggu 2", "who": "Andi", "howMuch": "Rp 5jt"
            }]
        },
        "implementasiPerbaikan": {
            "langkah": [{
                "judul": "Tahap 1",
                "studyDanFinalDesign": "Layout final",
                "persiapanPerbaikan": "Beli rak",
                "prosesPerbaikan": "Pemasangan",
                "trialDanEvaluasi": "Uji cari 10 item"
            }]
        },
        "evaluasi": {
            "evaluasiQCDSM": [
                {"aspek": "Q", "sebelumPerbaikan": "Salah ambil 3x", "sesudahPerbaikan": "0x", "data": "Jan-Feb"}
            ]
        },
        "standarisasi": {
            "deskripsiStandarisasi": "SOP penyimpanan",
            "horizontalDevelopment": "Gudang bahan baku"
        }
    });
    Report::from_json(&value.to_string()).unwrap()
}

pub fn pdf_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

pub fn pdf_pages(bytes: &[u8]) -> usize {
    pdf_text(bytes).matches("/Type /Page /Parent").count()
}

/// Slide XML parts in slide order.
pub fn slide_xml(bytes: &[u8]) -> Vec<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut out = Vec::new();
    for i in 1.. {
        let Ok(mut file) = archive.by_name(&format!("ppt/slides/slide{i}.xml")) else {
            break;
        };
        let mut xml = String::new();
        file.read_to_string(&mut xml).unwrap();
        out.push(xml);
    }
    out
}

/// All `<a:t>` runs across the deck.
pub fn slide_runs(bytes: &[u8]) -> Vec<String> {
    slide_xml(bytes)
        .iter()
        .flat_map(|xml| {
            xml.split("<a:t>")
                .skip(1)
                .filter_map(|s| s.split("</a:t>").next())
                .map(String::from)
                .collect::<Vec<_>>()
        })
        .collect()
}
