//! Evidence form state and its reducer
//!
//! Every change goes through [`EvidenceForm::reduce`], which consumes the
//! current form and returns the next one. Validity is derived on demand.

use crate::state::{
    ApplicationField, ApplicationInfo, EvidenceEntry, EvidenceField, FileRef, SubmissionPayload,
};
use tracing::debug;

/// A single state transition of the evidence form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    /// Replace one application field (no validation)
    SetApplicationField(ApplicationField, String),
    /// Replace the spreadsheet reference
    SetSpreadsheet(Option<FileRef>),
    /// Append a blank entry at the end
    AddEvidenceEntry,
    /// Remove a whole entry; the last remaining entry is kept
    RemoveEvidenceEntry(usize),
    /// Replace one text field of an entry
    UpdateEvidenceField {
        index: usize,
        field: EvidenceField,
        value: String,
    },
    /// Append images to an entry, keeping the ones already attached
    AppendImages { index: usize, files: Vec<FileRef> },
    /// Remove the image at `position` from an entry
    RemoveImage { index: usize, position: usize },
    /// Discard the session and start over
    Reset,
}

/// The whole form session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceForm {
    application: ApplicationInfo,
    spreadsheet: Option<FileRef>,
    evidence: Vec<EvidenceEntry>,
}

impl Default for EvidenceForm {
    fn default() -> Self {
        Self {
            application: ApplicationInfo::default(),
            spreadsheet: None,
            evidence: vec![EvidenceEntry::default()],
        }
    }
}

impl EvidenceForm {
    pub fn application(&self) -> &ApplicationInfo {
        &self.application
    }

    pub fn spreadsheet(&self) -> Option<&FileRef> {
        self.spreadsheet.as_ref()
    }

    pub fn evidence(&self) -> &[EvidenceEntry] {
        &self.evidence
    }

    /// True iff the spreadsheet is absent or any entry lacks a category,
    /// a screenshot source or an image
    pub fn required_missing(&self) -> bool {
        self.spreadsheet.is_none() || self.evidence.iter().any(|e| !e.is_complete())
    }

    /// Snapshot sent to `POST /api/submit`
    pub fn payload(&self) -> SubmissionPayload {
        SubmissionPayload {
            application: self.application.clone(),
            evidence: self.evidence.iter().map(EvidenceEntry::summary).collect(),
        }
    }

    /// Apply one action and return the next form
    pub fn reduce(self, action: FormAction) -> Self {
        match action {
            FormAction::SetApplicationField(field, value) => Self {
                application: self.application.with_field(field, value),
                ..self
            },
            FormAction::SetSpreadsheet(spreadsheet) => Self {
                spreadsheet,
                ..self
            },
            FormAction::AddEvidenceEntry => {
                let mut evidence = self.evidence;
                evidence.push(EvidenceEntry::default());
                Self { evidence, ..self }
            }
            FormAction::RemoveEvidenceEntry(index) => {
                if index >= self.evidence.len() || self.evidence.len() == 1 {
                    debug!(index, "Ignoring evidence entry removal");
                    return self;
                }
                let mut evidence = self.evidence;
                evidence.remove(index);
                Self { evidence, ..self }
            }
            FormAction::UpdateEvidenceField {
                index,
                field,
                value,
            } => self.map_entry(index, |entry| entry.with_field(field, value)),
            FormAction::AppendImages { index, files } => self.map_entry(index, |entry| {
                let mut images = entry.images;
                images.extend(files);
                EvidenceEntry { images, ..entry }
            }),
            FormAction::RemoveImage { index, position } => self.map_entry(index, |entry| {
                if position >= entry.images.len() {
                    debug!(index, position, "Image position out of range");
                    return entry;
                }
                let images = entry
                    .images
                    .into_iter()
                    .enumerate()
                    .filter(|(j, _)| *j != position)
                    .map(|(_, image)| image)
                    .collect();
                EvidenceEntry { images, ..entry }
            }),
            FormAction::Reset => Self::default(),
        }
    }

    /// Replace the entry at `index` with `f(entry)`; out of range is a no-op
    fn map_entry(self, index: usize, f: impl FnOnce(EvidenceEntry) -> EvidenceEntry) -> Self {
        if index >= self.evidence.len() {
            debug!(index, "Evidence index out of range");
            return self;
        }
        let mut evidence = self.evidence;
        let entry = std::mem::take(&mut evidence[index]);
        evidence[index] = f(entry);
        Self { evidence, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn files(names: &[&str]) -> Vec<FileRef> {
        names.iter().map(|n| FileRef::from_path(*n)).collect()
    }

    fn names(entry: &EvidenceEntry) -> Vec<&str> {
        entry.images.iter().map(|f| f.name.as_str()).collect()
    }

    /// Spreadsheet attached and the first entry filled in
    fn complete_form() -> EvidenceForm {
        EvidenceForm::default()
            .reduce(FormAction::SetSpreadsheet(Some(FileRef::from_path(
                "access.xlsx",
            ))))
            .reduce(FormAction::UpdateEvidenceField {
                index: 0,
                field: EvidenceField::ScreenshotSource,
                value: "AIMS console".to_string(),
            })
            .reduce(FormAction::AppendImages {
                index: 0,
                files: files(&["a.png"]),
            })
    }

    mod initial_state {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_default_has_one_blank_entry() {
            let form = EvidenceForm::default();
            assert_eq!(form.evidence().len(), 1);
            assert_eq!(form.evidence()[0], EvidenceEntry::default());
            assert!(form.spreadsheet().is_none());
            assert_eq!(form.application(), &ApplicationInfo::default());
        }

        #[test]
        fn test_default_is_not_submittable() {
            assert!(EvidenceForm::default().required_missing());
        }

        #[test]
        fn test_reset_restores_default() {
            let form = complete_form().reduce(FormAction::AddEvidenceEntry);
            assert_eq!(form.reduce(FormAction::Reset), EvidenceForm::default());
        }
    }

    mod required_missing {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_complete_form_is_submittable() {
            assert!(!complete_form().required_missing());
        }

        #[test]
        fn test_missing_spreadsheet() {
            let form = complete_form().reduce(FormAction::SetSpreadsheet(None));
            assert!(form.required_missing());
        }

        #[test]
        fn test_empty_category() {
            let form = complete_form().reduce(FormAction::UpdateEvidenceField {
                index: 0,
                field: EvidenceField::Category,
                value: String::new(),
            });
            assert!(form.required_missing());
        }

        #[test]
        fn test_empty_source() {
            let form = complete_form().reduce(FormAction::UpdateEvidenceField {
                index: 0,
                field: EvidenceField::ScreenshotSource,
                value: String::new(),
            });
            assert!(form.required_missing());
        }

        #[test]
        fn test_no_images() {
            let form = complete_form().reduce(FormAction::RemoveImage {
                index: 0,
                position: 0,
            });
            assert!(form.required_missing());
        }

        #[test]
        fn test_attachment_type_is_optional() {
            let form = complete_form();
            assert!(form.evidence()[0].attachment_type.is_empty());
            assert!(!form.required_missing());
        }

        #[test]
        fn test_any_incomplete_entry_blocks_submission() {
            let form = complete_form().reduce(FormAction::AddEvidenceEntry);
            assert!(form.required_missing());
        }

        #[test]
        fn test_matches_definition_for_all_combinations() {
            // Every combination of spreadsheet / category / source / image for two entries
            for mask in 0u32..(1 << 7) {
                let bit = |n: u32| mask & (1 << n) != 0;
                let mut form = EvidenceForm::default().reduce(FormAction::AddEvidenceEntry);
                if bit(0) {
                    form = form.reduce(FormAction::SetSpreadsheet(Some(FileRef::from_path(
                        "s.csv",
                    ))));
                }
                for index in 0..2u32 {
                    let base = 1 + index * 3;
                    let category = if bit(base) { "Cat" } else { "" };
                    let source = if bit(base + 1) { "Src" } else { "" };
                    form = form
                        .reduce(FormAction::UpdateEvidenceField {
                            index: index as usize,
                            field: EvidenceField::Category,
                            value: category.to_string(),
                        })
                        .reduce(FormAction::UpdateEvidenceField {
                            index: index as usize,
                            field: EvidenceField::ScreenshotSource,
                            value: source.to_string(),
                        });
                    if bit(base + 2) {
                        form = form.reduce(FormAction::AppendImages {
                            index: index as usize,
                            files: files(&["x.png"]),
                        });
                    }
                }

                let expected = form.spreadsheet().is_none()
                    || form.evidence().iter().any(|e| {
                        e.category.is_empty()
                            || e.screenshot_source.is_empty()
                            || e.images.is_empty()
                    });
                assert_eq!(form.required_missing(), expected, "mask {mask:#09b}");
            }
        }
    }

    mod application_fields {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_set_application_field_accepts_any_string() {
            let form = EvidenceForm::default()
                .reduce(FormAction::SetApplicationField(
                    ApplicationField::Name,
                    "NOT-IN-LIST".to_string(),
                ))
                .reduce(FormAction::SetApplicationField(
                    ApplicationField::CenterId,
                    String::new(),
                ));
            assert_eq!(form.application().name, "NOT-IN-LIST");
            assert_eq!(form.application().center_id, "");
            assert_eq!(form.application().area, "COMMONS PLATFORM");
        }
    }

    mod evidence_entries {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_add_entry_appends_blank_and_keeps_existing() {
            let before = complete_form();
            let after = before.clone().reduce(FormAction::AddEvidenceEntry);
            assert_eq!(after.evidence().len(), 2);
            assert_eq!(after.evidence()[0], before.evidence()[0]);
            assert_eq!(after.evidence()[1], EvidenceEntry::default());
            assert!(!after.evidence()[1].is_complete());
        }

        #[test]
        fn test_update_out_of_range_is_noop() {
            let before = complete_form();
            let after = before.clone().reduce(FormAction::UpdateEvidenceField {
                index: 5,
                field: EvidenceField::ScreenshotSource,
                value: "x".to_string(),
            });
            assert_eq!(after, before);
        }

        #[test]
        fn test_update_touches_only_target_entry() {
            let form = EvidenceForm::default()
                .reduce(FormAction::AddEvidenceEntry)
                .reduce(FormAction::UpdateEvidenceField {
                    index: 1,
                    field: EvidenceField::AttachmentType,
                    value: "PNG".to_string(),
                });
            assert_eq!(form.evidence()[0].attachment_type, "");
            assert_eq!(form.evidence()[1].attachment_type, "PNG");
        }

        #[test]
        fn test_remove_entry() {
            let form = EvidenceForm::default()
                .reduce(FormAction::AddEvidenceEntry)
                .reduce(FormAction::UpdateEvidenceField {
                    index: 1,
                    field: EvidenceField::ScreenshotSource,
                    value: "second".to_string(),
                })
                .reduce(FormAction::RemoveEvidenceEntry(0));
            assert_eq!(form.evidence().len(), 1);
            assert_eq!(form.evidence()[0].screenshot_source, "second");
        }

        #[test]
        fn test_remove_last_remaining_entry_is_noop() {
            let before = complete_form();
            let after = before.clone().reduce(FormAction::RemoveEvidenceEntry(0));
            assert_eq!(after, before);
        }

        #[test]
        fn test_remove_entry_out_of_range_is_noop() {
            let before = EvidenceForm::default().reduce(FormAction::AddEvidenceEntry);
            let after = before.clone().reduce(FormAction::RemoveEvidenceEntry(2));
            assert_eq!(after, before);
        }
    }

    mod images {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_append_is_additive() {
            let form = EvidenceForm::default()
                .reduce(FormAction::AppendImages {
                    index: 0,
                    files: files(&["a.png", "b.png"]),
                })
                .reduce(FormAction::AppendImages {
                    index: 0,
                    files: files(&["c.png"]),
                });
            assert_eq!(names(&form.evidence()[0]), vec!["a.png", "b.png", "c.png"]);
        }

        #[test]
        fn test_append_then_remove_preserves_order() {
            let original = files(&["a.png", "b.png"]);
            let added = files(&["c.png", "d.png", "e.png"]);

            for k in 0..(original.len() + added.len()) {
                let form = EvidenceForm::default()
                    .reduce(FormAction::AppendImages {
                        index: 0,
                        files: original.clone(),
                    })
                    .reduce(FormAction::AppendImages {
                        index: 0,
                        files: added.clone(),
                    })
                    .reduce(FormAction::RemoveImage {
                        index: 0,
                        position: k,
                    });

                let mut expected: Vec<FileRef> =
                    original.iter().chain(added.iter()).cloned().collect();
                expected.remove(k);
                assert_eq!(form.evidence()[0].images, expected, "removing position {k}");
            }
        }

        #[test]
        fn test_remove_image_leaves_other_entries_alone() {
            let form = EvidenceForm::default()
                .reduce(FormAction::AddEvidenceEntry)
                .reduce(FormAction::AppendImages {
                    index: 0,
                    files: files(&["a.png", "b.png"]),
                })
                .reduce(FormAction::AppendImages {
                    index: 1,
                    files: files(&["c.png"]),
                })
                .reduce(FormAction::RemoveImage {
                    index: 0,
                    position: 0,
                });
            assert_eq!(names(&form.evidence()[0]), vec!["b.png"]);
            assert_eq!(names(&form.evidence()[1]), vec!["c.png"]);
        }

        #[test]
        fn test_remove_image_out_of_range_is_noop() {
            let before = complete_form();
            let after = before
                .clone()
                .reduce(FormAction::RemoveImage {
                    index: 0,
                    position: 3,
                })
                .reduce(FormAction::RemoveImage {
                    index: 4,
                    position: 0,
                });
            assert_eq!(after, before);
        }

        #[test]
        fn test_append_out_of_range_is_noop() {
            let before = EvidenceForm::default();
            let after = before.clone().reduce(FormAction::AppendImages {
                index: 1,
                files: files(&["a.png"]),
            });
            assert_eq!(after, before);
        }
    }

    mod payload {
        use super::*;
        use pretty_assertions::assert_eq;
        use crate::state::EvidenceSummary;

        #[test]
        fn test_payload_projects_entries() {
            let form = complete_form()
                .reduce(FormAction::AppendImages {
                    index: 0,
                    files: files(&["b.png"]),
                })
                .reduce(FormAction::UpdateEvidenceField {
                    index: 0,
                    field: EvidenceField::AttachmentType,
                    value: "PNG".to_string(),
                });

            let payload = form.payload();
            assert_eq!(payload.application, ApplicationInfo::default());
            assert_eq!(
                payload.evidence,
                vec![EvidenceSummary {
                    category: "BoKS Entitlements (AIMS)".to_string(),
                    screenshot_source: "AIMS console".to_string(),
                    attachment_type: "PNG".to_string(),
                    images_count: 2,
                }]
            );
        }
    }
}
