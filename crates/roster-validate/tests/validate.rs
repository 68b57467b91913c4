//! Integration tests for the validation pipeline.

use roster_validate::{
    Dataset, DatasetSet, EntityKind, Execution, GatePolicy, Issue, Record, RuleCode, Severity,
    ValidationOptions, gate_allocation, validate, validate_with_options,
};
use serde_json::{Value, json};

fn record(pairs: &[(&str, Value)]) -> Record {
    pairs
        .iter()
        .map(|(column, value)| (*column, value.clone()))
        .collect()
}

fn dataset(kind: EntityKind, rows: Vec<Record>) -> Dataset {
    Dataset::with_expected_headers(kind, kind.default_file_name(), rows)
}

fn client(id: &str, priority: Value, requested: &str) -> Record {
    record(&[
        ("ClientID", json!(id)),
        ("ClientName", json!(format!("Client {id}"))),
        ("PriorityLevel", priority),
        ("RequestedTaskIDs", json!(requested)),
        ("GroupTag", json!("GroupA")),
        ("AttributesJSON", json!("{\"location\": \"NYC\"}")),
    ])
}

fn worker(id: &str, skills: &str, slots: &str, max_load: i64) -> Record {
    record(&[
        ("WorkerID", json!(id)),
        ("WorkerName", json!(format!("Worker {id}"))),
        ("Skills", json!(skills)),
        ("AvailableSlots", json!(slots)),
        ("MaxLoadPerPhase", json!(max_load)),
        ("WorkerGroup", json!("GroupA")),
        ("QualificationLevel", json!(3)),
    ])
}

fn task(id: &str, duration: Value, skills: &str, max_concurrent: i64) -> Record {
    record(&[
        ("TaskID", json!(id)),
        ("TaskName", json!(format!("Task {id}"))),
        ("Category", json!("ETL")),
        ("Duration", duration),
        ("RequiredSkills", json!(skills)),
        ("PreferredPhases", json!("[1, 2]")),
        ("MaxConcurrent", json!(max_concurrent)),
    ])
}

fn clean_datasets() -> DatasetSet {
    DatasetSet::new()
        .with_clients(dataset(
            EntityKind::Clients,
            vec![
                client("C1", json!(3), "T1, T2"),
                client("C2", json!("5"), "T2"),
            ],
        ))
        .with_workers(dataset(
            EntityKind::Workers,
            vec![
                worker("W1", "rust, sql", "[1, 2, 3]", 2),
                worker("W2", "rust,design", "[2, 3]", 1),
            ],
        ))
        .with_tasks(dataset(
            EntityKind::Tasks,
            vec![
                task("T1", json!("2"), "rust", 2),
                task("T2", json!(1), "sql", 1),
            ],
        ))
}

fn issues_with(issues: &[Issue], code: RuleCode) -> Vec<&Issue> {
    issues.iter().filter(|i| i.rule_code() == code).collect()
}

#[test]
fn clean_input_is_valid() {
    let report = validate(&clean_datasets());
    assert!(report.is_valid(), "unexpected issues: {:?}", report.issues());
    assert!(report.counts_by_file().is_empty());
}

#[test]
fn empty_input_is_valid() {
    let report = validate(&DatasetSet::new());
    assert!(report.is_valid());
}

#[test]
fn missing_columns_each_reported_once() {
    let headers: Vec<String> = ["WorkerID", "WorkerName", "Skills"]
        .iter()
        .map(|h| (*h).to_string())
        .collect();
    let workers = Dataset::new(EntityKind::Workers, "workers.csv", headers, Vec::new())
        .expect("workers dataset");
    let report = validate(&DatasetSet::new().with_workers(workers));

    let v1 = issues_with(report.issues(), RuleCode::V1);
    let mut missing: Vec<&str> = v1.iter().filter_map(|i| i.column()).collect();
    missing.sort_unstable();
    assert_eq!(
        missing,
        vec![
            "AvailableSlots",
            "MaxLoadPerPhase",
            "QualificationLevel",
            "WorkerGroup"
        ]
    );
    assert!(v1.iter().all(|i| i.file() == EntityKind::Workers));
}

#[test]
fn decoded_slot_arrays_are_trusted_by_capacity_check() {
    let decoded = |id: &str, slots: Value| {
        let mut row = worker(id, "rust", "", 3);
        row.insert("AvailableSlots", slots);
        row
    };
    let workers = dataset(
        EntityKind::Workers,
        vec![
            decoded("W1", json!(["mon", "tue", "wed"])),
            decoded("W2", json!([1, null, 3])),
        ],
    );

    let report = validate(&DatasetSet::new().with_workers(workers));
    assert!(report.is_valid(), "{:?}", report.issues());
}

#[test]
fn duplicate_client_ids_flag_every_occurrence() {
    let clients = dataset(
        EntityKind::Clients,
        vec![
            record(&[("ClientID", json!("C1"))]),
            record(&[("ClientID", json!("C1"))]),
            record(&[("ClientID", json!("C2"))]),
        ],
    );
    let report = validate(&DatasetSet::new().with_clients(clients));
    let v2 = issues_with(report.issues(), RuleCode::V2);
    assert_eq!(v2.len(), 2);
    let rows: Vec<Option<usize>> = v2.iter().map(|i| i.row()).collect();
    assert_eq!(rows, vec![Some(0), Some(1)]);
    assert!(v2.iter().all(|i| i.value() == Some("C1")));
}

#[test]
fn priority_level_boundaries() {
    let clients = dataset(
        EntityKind::Clients,
        vec![
            client("C1", json!(0), ""),
            client("C2", json!(6), ""),
            client("C3", json!("abc"), ""),
            client("C4", json!(1), ""),
            client("C5", json!(5), ""),
        ],
    );
    let report = validate(&DatasetSet::new().with_clients(clients));
    let v4 = issues_with(report.issues(), RuleCode::V4);
    let rows: Vec<Option<usize>> = v4.iter().map(|i| i.row()).collect();
    assert_eq!(rows, vec![Some(0), Some(1), Some(2)]);
    assert!(v4.iter().all(|i| i.severity() == Severity::Error));
}

#[test]
fn unresolved_task_reference() {
    let clients = dataset(
        EntityKind::Clients,
        vec![client("C1", json!(2), "T1, T9")],
    );
    let tasks = dataset(EntityKind::Tasks, vec![task("T1", json!(1), "", 1)]);
    let report = validate(&DatasetSet::new().with_clients(clients).with_tasks(tasks));
    let v6 = issues_with(report.issues(), RuleCode::V6);
    assert_eq!(v6.len(), 1);
    assert_eq!(v6[0].value(), Some("T9"));
    assert_eq!(v6[0].file(), EntityKind::Clients);
}

#[test]
fn uncovered_skill_reported_per_task_row() {
    let workers = dataset(
        EntityKind::Workers,
        vec![worker("W1", "python", "[1]", 1)],
    );
    let tasks = dataset(
        EntityKind::Tasks,
        vec![
            task("T1", json!(1), "rust", 1),
            task("T2", json!(1), "rust, python", 1),
        ],
    );
    let report = validate(&DatasetSet::new().with_workers(workers).with_tasks(tasks));
    let v11 = issues_with(report.issues(), RuleCode::V11);
    let located: Vec<(Option<usize>, Option<&str>)> =
        v11.iter().map(|i| (i.row(), i.value())).collect();
    assert_eq!(located, vec![(Some(0), Some("rust")), (Some(1), Some("rust"))]);
}

#[test]
fn end_to_end_scenario() {
    let client_headers: Vec<String> = [
        "ClientID",
        "ClientName",
        "PriorityLevel",
        "RequestedTaskIDs",
        "AttributesJSON",
    ]
    .iter()
    .map(|h| (*h).to_string())
    .collect();
    let clients = Dataset::new(
        EntityKind::Clients,
        "clients.csv",
        client_headers,
        vec![record(&[
            ("ClientID", json!("C1")),
            ("ClientName", json!("Acme")),
            ("PriorityLevel", json!("3")),
            ("RequestedTaskIDs", json!("T1")),
        ])],
    )
    .expect("clients dataset");
    let workers = dataset(
        EntityKind::Workers,
        vec![
            worker("W1", "rust", "[1, 2]", 1),
            worker("W1", "rust", "[1, 2]", 1),
        ],
    );
    let tasks = dataset(EntityKind::Tasks, vec![task("T1", json!("-1"), "rust", 1)]);
    let report = validate(
        &DatasetSet::new()
            .with_clients(clients)
            .with_workers(workers)
            .with_tasks(tasks),
    );

    assert!(!report.is_valid());
    assert!(report.count_for(EntityKind::Clients) >= 1);
    assert!(report.count_for(EntityKind::Workers) >= 1);
    assert!(report.count_for(EntityKind::Tasks) >= 1);

    let v1 = report.issues_for(EntityKind::Clients);
    assert_eq!(v1.len(), 1);
    assert_eq!(v1[0].rule_code(), RuleCode::V1);
    assert_eq!(v1[0].column(), Some("GroupTag"));
    assert_eq!(issues_with(report.issues_for(EntityKind::Workers), RuleCode::V2).len(), 2);
    let v4 = issues_with(report.issues_for(EntityKind::Tasks), RuleCode::V4);
    assert_eq!(v4.len(), 1);
    assert_eq!(v4[0].value(), Some("-1"));

    assert!(!gate_allocation(&report, GatePolicy::AnyIssue).allow_allocation);
    assert!(!gate_allocation(&report, GatePolicy::ErrorsOnly).allow_allocation);
}

#[test]
fn issues_are_ordered_by_rule_then_file_then_row() {
    let clients = dataset(
        EntityKind::Clients,
        vec![client("C1", json!(9), "T9"), client("C1", json!(1), "")],
    );
    let workers = dataset(
        EntityKind::Workers,
        vec![worker("W1", "rust", "1,2", 1), worker("W1", "rust", "[1]", 4)],
    );
    let tasks = dataset(
        EntityKind::Tasks,
        vec![task("T1", json!(0), "go", 3), task("T1", json!(1), "rust", 1)],
    );
    let report = validate(
        &DatasetSet::new()
            .with_clients(clients)
            .with_workers(workers)
            .with_tasks(tasks),
    );
    let keys: Vec<(RuleCode, EntityKind, Option<usize>)> = report
        .issues()
        .iter()
        .map(|i| (i.rule_code(), i.file(), i.row()))
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
    assert!(keys.contains(&(RuleCode::V2, EntityKind::Clients, Some(0))));
    assert!(keys.contains(&(RuleCode::V3, EntityKind::Workers, Some(0))));
    assert!(keys.contains(&(RuleCode::V9, EntityKind::Workers, Some(1))));
    assert!(keys.contains(&(RuleCode::V11, EntityKind::Tasks, Some(0))));
    assert!(keys.contains(&(RuleCode::V12, EntityKind::Tasks, Some(0))));
}

#[test]
fn correcting_flagged_rows_clears_their_rules() {
    let broken = DatasetSet::new()
        .with_clients(dataset(
            EntityKind::Clients,
            vec![client("C1", json!(7), "T1, T3")],
        ))
        .with_workers(dataset(
            EntityKind::Workers,
            vec![worker("W1", "rust", "[1]", 3)],
        ))
        .with_tasks(dataset(
            EntityKind::Tasks,
            vec![task("T1", json!("0"), "rust, ml", 1)],
        ));
    let before = validate(&broken);
    let codes: Vec<RuleCode> = before.issues().iter().map(Issue::rule_code).collect();
    assert!(codes.contains(&RuleCode::V4));
    assert!(codes.contains(&RuleCode::V6));
    assert!(codes.contains(&RuleCode::V9));
    assert!(codes.contains(&RuleCode::V11));

    let fixed = DatasetSet::new()
        .with_clients(dataset(
            EntityKind::Clients,
            vec![client("C1", json!(4), "T1")],
        ))
        .with_workers(dataset(
            EntityKind::Workers,
            vec![worker("W1", "rust, ml", "[1, 2, 3]", 3)],
        ))
        .with_tasks(dataset(
            EntityKind::Tasks,
            vec![task("T1", json!("1"), "rust, ml", 1)],
        ));
    let after = validate(&fixed);
    assert!(after.is_valid(), "unexpected issues: {:?}", after.issues());
}

#[test]
fn disabled_rules_are_skipped() {
    let workers = dataset(
        EntityKind::Workers,
        vec![worker("W1", "rust", "[1]", 3)],
    );
    let datasets = DatasetSet::new().with_workers(workers);
    assert_eq!(validate(&datasets).warning_count(), 1);

    let options = ValidationOptions::new().with_disabled_rule(RuleCode::V9);
    assert!(validate_with_options(&datasets, &options).is_valid());
}

#[test]
fn parallel_execution_matches_sequential() {
    let workers = dataset(
        EntityKind::Workers,
        vec![worker("W1", "rust", "oops", 3), worker("W1", "go", "[1]", 2)],
    );
    let tasks = dataset(
        EntityKind::Tasks,
        vec![task("T1", json!("x"), "rust, ml", 4), task("T2", json!(2), "go", 1)],
    );
    let clients = dataset(
        EntityKind::Clients,
        vec![client("C1", json!(2), "T1, T5"), client("C2", json!(8), "T2")],
    );
    let datasets = DatasetSet::new()
        .with_clients(clients)
        .with_workers(workers)
        .with_tasks(tasks);

    let sequential = validate(&datasets);
    let parallel = validate_with_options(
        &datasets,
        &ValidationOptions::new().with_execution(Execution::Parallel),
    );
    assert!(!sequential.is_empty());
    assert_eq!(sequential, parallel);
}
