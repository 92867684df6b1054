use medguide_lookup::{LookupState, MedicineAnalysis, MedicineInfo};
use medguide_models::reminder::Reminder;

const FDA_NOTICE: &str =
    "Data provided by the U.S. FDA (OpenFDA), for informational purposes only.";

const ANALYSIS_NOTICE: &str = "This analysis is for educational purposes only. Always consult with a healthcare professional before taking any medication.";

pub fn reminder_list(reminders: &[Reminder]) -> String {
    if reminders.is_empty() {
        return "No reminders yet. Add your first medicine reminder with /add.".to_string();
    }

    let plural = if reminders.len() == 1 { "" } else { "s" };
    let mut lines = vec![format!(
        "You have {} active reminder{}:",
        reminders.len(),
        plural
    )];
    lines.extend(
        reminders
            .iter()
            .enumerate()
            .map(|(i, reminder)| display_reminder(i + 1, reminder)),
    );
    lines.join("\n")
}

fn display_reminder(position: usize, reminder: &Reminder) -> String {
    format!(
        "{}. {} at {} ({}) [id: {}]",
        position,
        reminder.name,
        reminder.time.to_12_hour(),
        reminder.frequency.display_name(),
        reminder.id
    )
}

pub fn lookup_state(state: &LookupState) -> String {
    match state {
        LookupState::Idle => "Search for a medicine with /lookup <medicine>.".to_string(),
        LookupState::Loading { query } => format!("Fetching data for {}...", query),
        LookupState::Found(info) => medicine_info(info),
        LookupState::NotFound { query } => format!(
            "No data available or medicine not found. No FDA data available for {}.",
            query
        ),
        LookupState::Failed { message, .. } => message.clone(),
    }
}

fn medicine_info(info: &MedicineInfo) -> String {
    let mut lines = vec![match info.distinct_brand_name() {
        Some(brand) => format!("{} ({})", info.product_name, brand),
        None => info.product_name.clone(),
    }];

    let summary = info.reaction_summary();
    if summary.shown.is_empty() {
        lines.push("No side effects reported".to_string());
    } else {
        lines.push("Reported side effects:".to_string());
        lines.extend(summary.shown.iter().map(|reaction| format!("  - {}", reaction)));
        if summary.remaining > 0 {
            lines.push(format!("  +{} more reactions...", summary.remaining));
        }
    }

    lines.push(format!(
        "Serious event: {}",
        if info.serious { "Yes" } else { "No" }
    ));
    lines.push(format!("Report date: {}", info.display_report_date()));
    lines.push(format!("Manufacturer: {}", info.manufacturer));
    if let Some(generic_name) = &info.generic_name {
        lines.push(format!("Generic name: {}", generic_name));
    }
    lines.push(format!("Source country: {}", info.source_country));
    lines.push(FDA_NOTICE.to_string());

    lines.join("\n")
}

pub fn suggestions(query: &str, suggestions: &[&str]) -> String {
    if suggestions.is_empty() {
        return format!("No suggestions for \"{}\".", query);
    }
    suggestions.join("\n")
}

pub fn analysis(medicine: &str, analysis: &MedicineAnalysis) -> String {
    let mut lines = vec![
        format!("Analysis summary - {} [{}]", medicine, analysis.safety_level),
        format!("Common use cases: {}", analysis.common_use),
        format!("Dosage summary: {}", analysis.dosage_summary),
        "Important warnings:".to_string(),
    ];
    lines.extend(analysis.warnings.iter().map(|warning| format!("  - {}", warning)));
    lines.push(ANALYSIS_NOTICE.to_string());
    lines.join("\n")
}
