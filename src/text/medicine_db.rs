/// Known medications grouped by therapeutic category.
pub const MEDICINE_DB: &[(&str, &[&str])] = &[
    (
        "painkillers",
        &["Paracetamol", "Ibuprofen", "Aspirin", "Tramadol", "Codeine", "Diclofenac", "Naproxen"],
    ),
    (
        "antibiotics",
        &["Amoxicillin", "Azithromycin", "Ciprofloxacin", "Doxycycline", "Metronidazole"],
    ),
    (
        "antidiabetics",
        &["Metformin", "Glimepiride", "Sitagliptin", "Insulin", "Empagliflozin"],
    ),
    ("statins", &["Atorvastatin", "Simvastatin", "Rosuvastatin", "Pravastatin"]),
    (
        "antihypertensives",
        &["Amlodipine", "Lisinopril", "Losartan", "Hydrochlorothiazide", "Enalapril"],
    ),
    ("antihistamines", &["Cetirizine", "Loratadine", "Fexofenadine", "Chlorpheniramine"]),
    (
        "corticosteroids",
        &["Prednisolone", "Dexamethasone", "Hydrocortisone", "Budesonide"],
    ),
];

pub fn all_medicines() -> impl Iterator<Item = &'static str> {
    MEDICINE_DB.iter().flat_map(|(_, names)| names.iter().copied())
}

pub fn category_of(name: &str) -> Option<&'static str> {
    MEDICINE_DB
        .iter()
        .find(|(_, names)| names.iter().any(|known| known.eq_ignore_ascii_case(name)))
        .map(|(category, _)| *category)
}
