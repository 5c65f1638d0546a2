use std::collections::HashSet;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::model::{CanonicalField, EntityKind};

use super::normalize::normalize_key;

/// Where one original header lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappingTarget {
    Field(CanonicalField),
    /// No canonical field; the column keeps its original name.
    Passthrough,
}

/// Original header to target, in header order. At most one header per
/// canonical field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMapping {
    kind: EntityKind,
    entries: Vec<(String, MappingTarget)>,
}

/// A proposed header→field-name mapping, e.g. from an oracle. Unchecked.
pub type MappingProposal = Vec<(String, String)>;

impl HeaderMapping {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Insert or replace the target of `header`.
    pub fn insert(&mut self, header: String, target: MappingTarget) {
        match self.entries.iter_mut().find(|(h, _)| *h == header) {
            Some(entry) => entry.1 = target,
            None => self.entries.push((header, target)),
        }
    }

    pub fn get(&self, header: &str) -> Option<MappingTarget> {
        self.entries
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, t)| *t)
    }

    pub fn field_for(&self, header: &str) -> Option<CanonicalField> {
        match self.get(header)? {
            MappingTarget::Field(f) => Some(f),
            MappingTarget::Passthrough => None,
        }
    }

    /// Output column name: the canonical field name or the header itself.
    pub fn target_name<'a>(&'a self, header: &'a str) -> Option<&'a str> {
        self.entries
            .iter()
            .find(|(h, _)| h == header)
            .map(|(h, t)| match t {
                MappingTarget::Field(f) => f.name(),
                MappingTarget::Passthrough => h.as_str(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, MappingTarget)> {
        self.entries.iter().map(|(h, t)| (h.as_str(), *t))
    }

    /// Claimed canonical fields in header order.
    pub fn fields(&self) -> impl Iterator<Item = CanonicalField> + '_ {
        self.entries.iter().filter_map(|(_, t)| match t {
            MappingTarget::Field(f) => Some(*f),
            MappingTarget::Passthrough => None,
        })
    }

    pub fn mapped_count(&self) -> usize {
        self.fields().count()
    }

    /// Expected fields no header was mapped to.
    pub fn unmapped_fields(&self) -> Vec<CanonicalField> {
        let claimed: HashSet<CanonicalField> = self.fields().collect();
        self.kind
            .fields()
            .iter()
            .copied()
            .filter(|f| !claimed.contains(f))
            .collect()
    }

    /// The mapping as an unchecked proposal of header to target name.
    pub fn to_proposal(&self) -> MappingProposal {
        self.entries
            .iter()
            .map(|(h, t)| {
                let name = match t {
                    MappingTarget::Field(f) => f.name().to_string(),
                    MappingTarget::Passthrough => h.clone(),
                };
                (h.clone(), name)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for HeaderMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (header, target) in &self.entries {
            let name = match target {
                MappingTarget::Field(f) => f.name(),
                MappingTarget::Passthrough => header.as_str(),
            };
            map.serialize_entry(header, name)?;
        }
        map.end()
    }
}

/// Read a proposal out of a JSON object; non-string values are skipped.
pub fn proposal_from_json(value: &Value) -> Option<MappingProposal> {
    let obj = value.as_object()?;
    Some(
        obj.iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.trim().to_string())))
            .collect(),
    )
}

/// Repair a proposed mapping so that every key is an original header, every
/// original header has an entry, and no canonical field is targeted twice.
///
/// Entries are processed in proposal order: the first header to claim a field
/// keeps it. Unknown headers are dropped. Invalid or colliding targets, and
/// headers the proposal left out, are rerouted through [`fallback_match`].
pub fn validate_header_mapping(
    proposal: &[(String, String)],
    headers: &[String],
    kind: EntityKind,
) -> HeaderMapping {
    let mut used: HashSet<CanonicalField> = HashSet::new();
    let mut resolved: Vec<(String, MappingTarget)> = Vec::new();

    for (header, proposed) in proposal {
        if !headers.contains(header) {
            tracing::warn!(
                target: "alchemist.ingest",
                stage = "ingest.mapping.unknown_header",
                header = %header,
                "mapping references a header that is not in the upload"
            );
            continue;
        }
        if resolved.iter().any(|(h, _)| h == header) {
            continue;
        }

        let target = match kind.field_named(proposed) {
            Some(field) if used.insert(field) => MappingTarget::Field(field),
            Some(field) => {
                tracing::warn!(
                    target: "alchemist.ingest",
                    stage = "ingest.mapping.collision",
                    header = %header,
                    field = %field,
                    "field already claimed, using fallback"
                );
                fallback_match(header, kind, &mut used)
            }
            None => {
                if proposed != header {
                    tracing::warn!(
                        target: "alchemist.ingest",
                        stage = "ingest.mapping.invalid_target",
                        header = %header,
                        proposed = %proposed,
                        kind = %kind,
                        "target is not a field of this entity kind, using fallback"
                    );
                }
                fallback_match(header, kind, &mut used)
            }
        };
        resolved.push((header.clone(), target));
    }

    let mut mapping = HeaderMapping::new(kind);
    for header in headers {
        let target = match resolved.iter().find(|(h, _)| h == header) {
            Some((_, t)) => *t,
            None => fallback_match(header, kind, &mut used),
        };
        mapping.insert(header.clone(), target);
    }
    mapping
}

/// First unused expected field whose normalized name contains, or is
/// contained in, the normalized header. Claims the field when found.
pub fn fallback_match(
    header: &str,
    kind: EntityKind,
    used: &mut HashSet<CanonicalField>,
) -> MappingTarget {
    let normalized = normalize_key(header);
    if normalized.is_empty() {
        return MappingTarget::Passthrough;
    }
    for field in kind.fields() {
        if used.contains(field) {
            continue;
        }
        let nf = normalize_key(field.name());
        if normalized.contains(&nf) || nf.contains(&normalized) {
            used.insert(*field);
            return MappingTarget::Field(*field);
        }
    }
    MappingTarget::Passthrough
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn strings(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn proposal(pairs: &[(&str, &str)]) -> MappingProposal {
        pairs
            .iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect()
    }

    fn assert_invariants(m: &HeaderMapping, headers: &[String]) {
        for h in headers {
            assert!(m.get(h).is_some(), "header {h} missing from mapping");
        }
        let fields: Vec<_> = m.fields().collect();
        let unique: HashSet<_> = fields.iter().collect();
        assert_eq!(fields.len(), unique.len(), "duplicate target in {m:?}");
        assert_eq!(m.len(), headers.len());
    }

    #[test]
    fn accepts_a_clean_proposal() {
        let headers = strings(&["Client Id", "Name"]);
        let m = validate_header_mapping(
            &proposal(&[("Client Id", "ClientID"), ("Name", "ClientName")]),
            &headers,
            EntityKind::Clients,
        );
        assert_eq!(m.field_for("Client Id"), Some(CanonicalField::ClientId));
        assert_eq!(m.field_for("Name"), Some(CanonicalField::ClientName));
        assert_invariants(&m, &headers);
    }

    #[test]
    fn drops_unknown_headers() {
        let headers = strings(&["ID"]);
        let m = validate_header_mapping(
            &proposal(&[("Ghost", "ClientName"), ("ID", "ClientID")]),
            &headers,
            EntityKind::Clients,
        );
        assert_eq!(m.len(), 1);
        assert!(m.get("Ghost").is_none());
        assert_eq!(m.field_for("ID"), Some(CanonicalField::ClientId));
    }

    #[test]
    fn collision_keeps_first_and_reroutes_later() {
        let headers = strings(&["Task ID", "Priority Level Task"]);
        let m = validate_header_mapping(
            &proposal(&[("Task ID", "TaskID"), ("Priority Level Task", "TaskID")]),
            &headers,
            EntityKind::Tasks,
        );
        assert_eq!(m.field_for("Task ID"), Some(CanonicalField::TaskId));
        // No task field name appears inside "priorityleveltask".
        assert_eq!(m.get("Priority Level Task"), Some(MappingTarget::Passthrough));
        assert_invariants(&m, &headers);
    }

    #[test]
    fn invalid_target_uses_fallback() {
        let headers = strings(&["duration_hours"]);
        let m = validate_header_mapping(
            &proposal(&[("duration_hours", "Hours")]),
            &headers,
            EntityKind::Tasks,
        );
        assert_eq!(m.field_for("duration_hours"), Some(CanonicalField::Duration));
    }

    #[test]
    fn wrong_kind_target_is_invalid() {
        let headers = strings(&["Skills"]);
        let m = validate_header_mapping(
            &proposal(&[("Skills", "Skills")]),
            &headers,
            EntityKind::Tasks,
        );
        // Skills is a worker field; fallback finds RequiredSkills.
        assert_eq!(m.field_for("Skills"), Some(CanonicalField::RequiredSkills));
    }

    #[test]
    fn missing_headers_are_filled_by_fallback() {
        let headers = strings(&["WorkerID", "Qualification", "Remarks"]);
        let m = validate_header_mapping(&proposal(&[]), &headers, EntityKind::Workers);
        assert_eq!(m.field_for("WorkerID"), Some(CanonicalField::WorkerId));
        assert_eq!(
            m.field_for("Qualification"),
            Some(CanonicalField::QualificationLevel)
        );
        assert_eq!(m.target_name("Remarks"), Some("Remarks"));
        assert_invariants(&m, &headers);
    }

    #[test]
    fn identity_target_for_canonical_header_collides_safely() {
        let headers = strings(&["id", "ClientID"]);
        let m = validate_header_mapping(
            &proposal(&[("id", "ClientID"), ("ClientID", "ClientID")]),
            &headers,
            EntityKind::Clients,
        );
        assert_eq!(m.field_for("id"), Some(CanonicalField::ClientId));
        assert_eq!(m.get("ClientID"), Some(MappingTarget::Passthrough));
        assert_invariants(&m, &headers);
    }

    #[test]
    fn invariants_hold_for_adversarial_proposals() {
        let headers = strings(&[
            "ClientID", "Name", "Priority", "Tasks", "Group", "Attrs", "Extra", "!!",
        ]);
        let targets = [
            "ClientID",
            "ClientName",
            "PriorityLevel",
            "RequestedTaskIDs",
            "GroupTag",
            "AttributesJSON",
            "Nonsense",
            "WorkerID",
        ];
        for shift in 0..targets.len() {
            let p: MappingProposal = headers
                .iter()
                .enumerate()
                .map(|(i, h)| (h.clone(), targets[(i + shift) % targets.len()].to_string()))
                .collect();
            let m = validate_header_mapping(&p, &headers, EntityKind::Clients);
            assert_invariants(&m, &headers);
        }
        for target in targets {
            let p: MappingProposal = headers
                .iter()
                .map(|h| (h.clone(), target.to_string()))
                .collect();
            let m = validate_header_mapping(&p, &headers, EntityKind::Clients);
            assert_invariants(&m, &headers);
        }
    }

    #[test]
    fn serializes_as_header_to_name_object() {
        let headers = strings(&["ID", "Notes"]);
        let m = validate_header_mapping(&proposal(&[("ID", "ClientID")]), &headers, EntityKind::Clients);
        assert_eq!(
            serde_json::to_value(&m).unwrap(),
            json!({"ID": "ClientID", "Notes": "Notes"})
        );
    }

    #[test]
    fn proposal_from_json_skips_non_strings() {
        let p = proposal_from_json(&json!({"a": "ClientID", "b": 3})).unwrap();
        assert_eq!(p, vec![("a".to_string(), "ClientID".to_string())]);
        assert!(proposal_from_json(&json!([1])).is_none());
    }
}
