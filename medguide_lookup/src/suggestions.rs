pub const MEDICINE_SUGGESTIONS: [&str; 30] = [
    "Paracetamol",
    "Ibuprofen",
    "Aspirin",
    "Amoxicillin",
    "Metformin",
    "Lisinopril",
    "Simvastatin",
    "Omeprazole",
    "Amlodipine",
    "Metoprolol",
    "Hydrochlorothiazide",
    "Losartan",
    "Furosemide",
    "Prednisone",
    "Warfarin",
    "Insulin",
    "Levothyroxine",
    "Atorvastatin",
    "Clopidogrel",
    "Ramipril",
    "Doxycycline",
    "Ciprofloxacin",
    "Azithromycin",
    "Cephalexin",
    "Clindamycin",
    "Tramadol",
    "Codeine",
    "Morphine",
    "Diazepam",
    "Lorazepam",
];

const MIN_QUERY_CHARS: usize = 2;
const MAX_SUGGESTIONS: usize = 8;

/// Case-insensitive substring match over the fixed suggestion list, in list order.
pub fn suggest(query: &str) -> Vec<&'static str> {
    if query.chars().count() < MIN_QUERY_CHARS {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    MEDICINE_SUGGESTIONS
        .into_iter()
        .filter(|medicine| medicine.to_lowercase().contains(&needle))
        .take(MAX_SUGGESTIONS)
        .collect()
}
