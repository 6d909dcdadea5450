//! Start-menu entries and the taskbar clock.

use desktop_app_contract::AppKind;

use crate::catalog;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherEntry {
    pub kind: AppKind,
    pub label: String,
}

/// Launcher-visible apps in catalog order.
pub fn launcher_entries() -> Vec<LauncherEntry> {
    catalog::catalog()
        .apps
        .iter()
        .filter(|entry| entry.show_in_launcher)
        .map(|entry| LauncherEntry {
            kind: entry.kind,
            label: entry.label.clone(),
        })
        .collect()
}

/// Case-insensitive substring match on the label. A blank query keeps everything.
pub fn filter_launcher(entries: &[LauncherEntry], query: &str) -> Vec<LauncherEntry> {
    let needle = query.trim().to_lowercase();
    entries
        .iter()
        .filter(|entry| entry.label.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Local wall-clock reading; `month` is zero-based like the browser's.
pub struct ClockReading {
    pub hour: u32,
    pub minute: u32,
    pub month: u32,
    pub day: u32,
}

/// `HH:MM`, used by the taskbar and for naming saved drawings.
pub fn format_clock(reading: ClockReading) -> String {
    format!("{:02}:{:02}", reading.hour, reading.minute)
}

/// `Oct 18`.
pub fn format_date(reading: ClockReading) -> String {
    let month = MONTHS
        .get(reading.month as usize)
        .copied()
        .unwrap_or_default();
    format!("{month} {}", reading.day)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn launcher_lists_catalog_apps_except_document_viewers() {
        let entries = launcher_entries();
        assert_eq!(entries.len(), 22);
        assert_eq!(
            entries.first(),
            Some(&LauncherEntry {
                kind: AppKind::WebEditor,
                label: "Web Studio".to_string(),
            })
        );
        assert!(entries
            .iter()
            .all(|entry| entry.kind != AppKind::Files && entry.kind != AppKind::Viewer));
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let entries = launcher_entries();
        let kinds: Vec<AppKind> = filter_launcher(&entries, "CYBER")
            .into_iter()
            .map(|entry| entry.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![AppKind::Blackjack, AppKind::Cyber2048, AppKind::CyberQuiz]
        );
        assert_eq!(filter_launcher(&entries, "  ").len(), entries.len());
        assert!(filter_launcher(&entries, "solitaire").is_empty());
    }

    #[test]
    fn clock_formats_pad_minutes_and_name_months() {
        let reading = ClockReading {
            hour: 9,
            minute: 5,
            month: 9,
            day: 18,
        };
        assert_eq!(format_clock(reading), "09:05");
        assert_eq!(format_date(reading), "Oct 18");
    }
}
