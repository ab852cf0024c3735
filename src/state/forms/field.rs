//! Focusable form fields

use crate::state::{ApplicationField, EvidenceField, APPLICATION_NAMES, EVIDENCE_CATEGORIES};

/// How a field takes input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text typed directly into the form
    Text,
    /// Enumerated value cycled with Left/Right
    Choice(&'static [&'static str]),
    /// Path typed into a pending buffer and attached with Enter
    FilePath,
    Button,
}

/// A focusable position in the evidence form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Application(ApplicationField),
    Spreadsheet,
    Evidence(usize, EvidenceField),
    Images(usize),
    Submit,
}

impl FormField {
    pub fn kind(&self) -> FieldKind {
        match self {
            FormField::Application(ApplicationField::Name) => FieldKind::Choice(APPLICATION_NAMES),
            FormField::Application(_) => FieldKind::Text,
            FormField::Spreadsheet | FormField::Images(_) => FieldKind::FilePath,
            FormField::Evidence(_, EvidenceField::Category) => {
                FieldKind::Choice(EVIDENCE_CATEGORIES)
            }
            FormField::Evidence(_, _) => FieldKind::Text,
            FormField::Submit => FieldKind::Button,
        }
    }

    pub fn label(&self) -> String {
        match self {
            FormField::Application(ApplicationField::Name) => "Application Name".to_string(),
            FormField::Application(ApplicationField::Area) => "Application Area".to_string(),
            FormField::Application(ApplicationField::CenterId) => "CenterID".to_string(),
            FormField::Spreadsheet => "Upload Excel File *".to_string(),
            FormField::Evidence(i, EvidenceField::Category) => {
                format!("Evidence #{} · Category", i + 1)
            }
            FormField::Evidence(i, EvidenceField::ScreenshotSource) => {
                format!("Evidence #{} · Screenshot Source *", i + 1)
            }
            FormField::Evidence(i, EvidenceField::AttachmentType) => {
                format!("Evidence #{} · Attachment Type (Optional)", i + 1)
            }
            FormField::Images(i) => format!("Evidence #{} · Images *", i + 1),
            FormField::Submit => "Submit Evidence".to_string(),
        }
    }

    /// Index of the evidence entry this field belongs to
    pub fn evidence_index(&self) -> Option<usize> {
        match self {
            FormField::Evidence(i, _) | FormField::Images(i) => Some(*i),
            _ => None,
        }
    }
}

/// Focus order for a form with `entry_count` evidence entries
pub fn focus_order(entry_count: usize) -> Vec<FormField> {
    let mut fields = vec![
        FormField::Application(ApplicationField::Name),
        FormField::Application(ApplicationField::Area),
        FormField::Application(ApplicationField::CenterId),
        FormField::Spreadsheet,
    ];
    for i in 0..entry_count {
        fields.push(FormField::Evidence(i, EvidenceField::Category));
        fields.push(FormField::Evidence(i, EvidenceField::ScreenshotSource));
        fields.push(FormField::Evidence(i, EvidenceField::AttachmentType));
        fields.push(FormField::Images(i));
    }
    fields.push(FormField::Submit);
    fields
}

/// Next (or previous) option after `current`; unknown values restart at the first option
pub fn cycle_choice(options: &[&str], current: &str, forward: bool) -> String {
    let Some(first) = options.first() else {
        return current.to_string();
    };
    let next = match options.iter().position(|o| *o == current) {
        Some(pos) if forward => (pos + 1) % options.len(),
        Some(0) => options.len() - 1,
        Some(pos) => pos - 1,
        None => return first.to_string(),
    };
    options[next].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_order_single_entry() {
        let order = focus_order(1);
        assert_eq!(order.len(), 9);
        assert_eq!(order[0], FormField::Application(ApplicationField::Name));
        assert_eq!(order[3], FormField::Spreadsheet);
        assert_eq!(order[7], FormField::Images(0));
        assert_eq!(order.last(), Some(&FormField::Submit));
    }

    #[test]
    fn test_focus_order_grows_per_entry() {
        assert_eq!(focus_order(3).len(), 4 + 3 * 4 + 1);
        assert_eq!(
            focus_order(2)[8],
            FormField::Evidence(1, EvidenceField::Category)
        );
    }

    #[test]
    fn test_kinds() {
        assert_eq!(
            FormField::Application(ApplicationField::Name).kind(),
            FieldKind::Choice(APPLICATION_NAMES)
        );
        assert_eq!(
            FormField::Evidence(0, EvidenceField::ScreenshotSource).kind(),
            FieldKind::Text
        );
        assert_eq!(FormField::Images(2).kind(), FieldKind::FilePath);
        assert_eq!(FormField::Submit.kind(), FieldKind::Button);
    }

    #[test]
    fn test_evidence_index() {
        assert_eq!(FormField::Images(2).evidence_index(), Some(2));
        assert_eq!(
            FormField::Evidence(1, EvidenceField::Category).evidence_index(),
            Some(1)
        );
        assert_eq!(FormField::Spreadsheet.evidence_index(), None);
    }

    #[test]
    fn test_labels_are_one_based() {
        assert_eq!(
            FormField::Evidence(0, EvidenceField::ScreenshotSource).label(),
            "Evidence #1 · Screenshot Source *"
        );
    }

    #[test]
    fn test_cycle_choice_wraps_both_ways() {
        assert_eq!(cycle_choice(APPLICATION_NAMES, "CPLAT", true), "APP1");
        assert_eq!(cycle_choice(APPLICATION_NAMES, "APP2", true), "CPLAT");
        assert_eq!(cycle_choice(APPLICATION_NAMES, "CPLAT", false), "APP2");
        assert_eq!(cycle_choice(APPLICATION_NAMES, "APP1", false), "CPLAT");
    }

    #[test]
    fn test_cycle_choice_unknown_value_starts_over() {
        assert_eq!(cycle_choice(EVIDENCE_CATEGORIES, "", true), EVIDENCE_CATEGORIES[0]);
    }
}
