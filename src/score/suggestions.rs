use crate::score::{CheckItem, Status};

/// Remediation texts for every check that is not `good`, in checklist order
pub fn suggestions(checklist: &[CheckItem]) -> Vec<String> {
    checklist
        .iter()
        .filter(|item| item.status != Status::Good)
        .map(|item| item.key.suggestion().to_string())
        .collect()
}
