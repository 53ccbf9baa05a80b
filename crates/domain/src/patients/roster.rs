use serde::Serialize;

use crate::collation;

use super::{PatientId, PatientSummary};

/// A doctor's patient list as shown on the dashboard.
///
/// Always sorted ascending by name under [`collation::compare`]; patients with equal names
/// keep the order the service returned them in. A roster is never mutated in place:
/// removals produce a new roster so a failed server call leaves the current one untouched.
#[derive(Clone, Debug, Default, Serialize, Eq, PartialEq)]
#[serde(transparent)]
pub struct PatientRoster {
    patients: Vec<PatientSummary>,
}

impl PatientRoster {
    pub fn from_unsorted(mut patients: Vec<PatientSummary>) -> Self {
        sort_by_name(&mut patients);
        Self { patients }
    }

    pub fn without(&self, id: &PatientId) -> Self {
        Self {
            patients: self.patients.iter().filter(|p| &p.id != id).cloned().collect(),
        }
    }

    pub fn get(&self, id: &PatientId) -> Option<&PatientSummary> {
        self.patients.iter().find(|p| &p.id == id)
    }

    pub fn as_slice(&self) -> &[PatientSummary] {
        &self.patients
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PatientSummary> {
        self.patients.iter()
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    pub fn into_vec(self) -> Vec<PatientSummary> {
        self.patients
    }
}

impl<'a> IntoIterator for &'a PatientRoster {
    type Item = &'a PatientSummary;
    type IntoIter = std::slice::Iter<'a, PatientSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Stable sort: `sort_by` keeps equal elements in input order.
pub fn sort_by_name(patients: &mut [PatientSummary]) {
    patients.sort_by(|a, b| collation::compare(&a.name, &b.name));
}
