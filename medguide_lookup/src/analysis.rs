use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafetyLevel {
    Safe,
    Caution,
    Risky,
}

impl fmt::Display for SafetyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SafetyLevel::Safe => "Safe",
            SafetyLevel::Caution => "Caution",
            SafetyLevel::Risky => "Risky",
        };
        f.write_str(label)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct MedicineAnalysis {
    pub safety_level: SafetyLevel,
    pub common_use: &'static str,
    pub dosage_summary: &'static str,
    pub warnings: &'static [&'static str],
}

static PARACETAMOL: MedicineAnalysis = MedicineAnalysis {
    safety_level: SafetyLevel::Safe,
    common_use: "Fever, Pain relief, Headache",
    dosage_summary: "Adults: 500-1000mg every 4-6 hours, max 4g/day",
    warnings: &[
        "Do not exceed 4g daily",
        "Avoid with liver disease",
        "Check with alcohol use",
    ],
};

static IBUPROFEN: MedicineAnalysis = MedicineAnalysis {
    safety_level: SafetyLevel::Caution,
    common_use: "Inflammation, Pain relief, Fever",
    dosage_summary: "Adults: 200-400mg every 4-6 hours, max 1.2g/day",
    warnings: &[
        "Take with food",
        "Avoid with stomach ulcers",
        "Monitor blood pressure",
    ],
};

static ASPIRIN: MedicineAnalysis = MedicineAnalysis {
    safety_level: SafetyLevel::Caution,
    common_use: "Heart protection, Pain relief, Anti-inflammatory",
    dosage_summary: "Low dose: 75-100mg daily; Pain: 300-600mg every 4 hours",
    warnings: &[
        "Not for children under 16",
        "Bleeding risk",
        "Take with food",
    ],
};

static AMOXICILLIN: MedicineAnalysis = MedicineAnalysis {
    safety_level: SafetyLevel::Safe,
    common_use: "Bacterial infections, Respiratory infections",
    dosage_summary: "Adults: 250-500mg every 8 hours for 7-10 days",
    warnings: &[
        "Complete full course",
        "Check for penicillin allergy",
        "Take with or without food",
    ],
};

static METFORMIN: MedicineAnalysis = MedicineAnalysis {
    safety_level: SafetyLevel::Safe,
    common_use: "Type 2 Diabetes, Blood sugar control",
    dosage_summary: "Adults: Start 500mg twice daily, max 2g/day",
    warnings: &[
        "Take with meals",
        "Monitor kidney function",
        "Stop before surgery",
    ],
};

static DEFAULT_ANALYSIS: MedicineAnalysis = MedicineAnalysis {
    safety_level: SafetyLevel::Caution,
    common_use: "Consult healthcare provider for specific uses",
    dosage_summary: "Follow healthcare provider's prescription",
    warnings: &[
        "Always consult healthcare provider",
        "Read medication label carefully",
        "Report side effects",
    ],
};

pub fn analysis_for(medicine: &str) -> &'static MedicineAnalysis {
    match medicine.trim().to_lowercase().as_str() {
        "paracetamol" => &PARACETAMOL,
        "ibuprofen" => &IBUPROFEN,
        "aspirin" => &ASPIRIN,
        "amoxicillin" => &AMOXICILLIN,
        "metformin" => &METFORMIN,
        _ => &DEFAULT_ANALYSIS,
    }
}
