/// Canonical QCC step titles, in rendering order.
pub const QCC_STEPS: [&str; 8] = [
    "Menetapkan Tema",
    "Target",
    "Analisa Masalah",
    "Ide & Rencana Perbaikan",
    "Implementasi Rencana Perbaikan",
    "Evaluasi",
    "Standardisasi",
    "Rencana Selanjutnya",
];

/// Canonical IP section titles, in rendering order.
pub const IP_STEPS: [&str; 8] = [
    "Jadwal",
    "Tema & Target",
    "Analisa Masalah",
    "Alternatif Solusi",
    "Desain Perbaikan",
    "Implementasi",
    "Evaluasi",
    "Standarisasi",
];
