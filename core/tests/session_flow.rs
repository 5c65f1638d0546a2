mod common;

use alchemist_core::error::RuleError;
use alchemist_core::ingest::ingest_table;
use alchemist_core::model::{EntityKind, FindingKind};
use alchemist_core::oracle::{suggest_modifications, FieldChange, ModificationDraft};
use alchemist_core::rules::{text_to_rule, RulePatch};
use alchemist_core::session::Session;
use alchemist_core::validate::DataValidator;
use common::{clients_rows, table, tasks_rows, workers_rows, ScriptedOracle};
use pretty_assertions::assert_eq;
use serde_json::json;

async fn loaded_session() -> Session {
    let mut session = Session::new();
    for (name, rows) in [
        ("clients.csv", clients_rows()),
        ("workers.csv", workers_rows()),
        ("tasks.csv", tasks_rows()),
    ] {
        let outcome = ingest_table(None, name, None, &table(rows)).await;
        session.set_file_name(name);
        session.set_data(outcome.kind, outcome.records);
    }
    session
}

#[tokio::test]
async fn editing_a_record_resolves_its_finding() {
    let mut session = loaded_session().await;
    assert_eq!(session.clients().len(), 2);
    assert_eq!(session.workers().len(), 3);
    assert_eq!(session.tasks().len(), 3);

    let validator = DataValidator::default();
    assert!(session.revalidate(&validator).is_empty());

    let broken = json!({"Duration": 0}).as_object().cloned().unwrap();
    assert!(session.update_record(EntityKind::Tasks, "T3", &broken));
    let findings = session.revalidate(&validator).to_vec();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].kind(), FindingKind::InvalidDuration);

    let fixed = json!({"Duration": 1}).as_object().cloned().unwrap();
    assert!(session.update_record(EntityKind::Tasks, "T3", &fixed));
    assert!(session.revalidate(&validator).is_empty());
    assert_eq!(session.file_name(), Some("tasks.csv"));
}

#[tokio::test]
async fn accepted_modification_resolves_its_finding() {
    let mut session = loaded_session().await;
    let validator = DataValidator::default();
    let broken = json!({"Duration": 0}).as_object().cloned().unwrap();
    session.update_record(EntityKind::Tasks, "T3", &broken);
    assert_eq!(session.revalidate(&validator).len(), 1);

    let offline = suggest_modifications(None, "set T3 duration to 1", session.data()).await;
    assert_eq!(offline.len(), 1);
    assert_eq!(session.apply_modification(&offline[0], &validator), 0);
    assert_eq!(session.findings().len(), 1);

    let oracle = ScriptedOracle {
        modifications: Some(vec![ModificationDraft {
            entity_type: Some("tasks".into()),
            changes: Some(vec![FieldChange {
                record_id: "T3".into(),
                field: "Duration".into(),
                old_value: json!(0),
                new_value: json!(1),
            }]),
            confidence: Some(0.9),
            ..ModificationDraft::default()
        }]),
        ..ScriptedOracle::default()
    };
    let suggestions =
        suggest_modifications(Some(&oracle), "set T3 duration to 1", session.data()).await;
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].entity, EntityKind::Tasks);
    assert_eq!(suggestions[0].command, "set T3 duration to 1");
    assert!(suggestions[0].id.ends_with("-0"));

    assert_eq!(session.apply_modification(&suggestions[0], &validator), 1);
    assert!(session.findings().is_empty());
}

#[tokio::test]
async fn rule_book_lifecycle() {
    let mut session = loaded_session().await;
    let rule = text_to_rule(None, "Keep T1 and T2 in phase 2").await;
    let id = rule.id.clone();
    session.rules_mut().add(rule.clone()).unwrap();
    assert!(matches!(
        session.rules_mut().add(rule),
        Err(RuleError::DuplicateId(_))
    ));

    let bad = RulePatch {
        priority: Some(11),
        description: Some("ignored".into()),
        ..RulePatch::default()
    };
    assert!(matches!(
        session.rules_mut().update(&id, bad),
        Err(RuleError::PriorityOutOfRange(11))
    ));
    assert_eq!(
        session.rules().get(&id).unwrap().description,
        "Keep T1 and T2 in phase 2"
    );

    assert!(!session.rules_mut().toggle(&id).unwrap());
    assert_eq!(session.rules().enabled().count(), 0);

    session.clear_data();
    assert!(session.data().is_empty());
    assert_eq!(session.rules().len(), 1);
    session.rules_mut().remove(&id).unwrap();
    assert!(session.rules().is_empty());
}
