//! Skill coverage and concurrency feasibility (V11, V12).
//!
//! Both checks compare task RequiredSkills against worker Skills:
//! - V11: every required skill is held by at least one worker
//! - V12: enough workers hold *all* of a task's skills to staff MaxConcurrent

use std::collections::{BTreeSet, HashMap};

use roster_model::{Dataset, DatasetSet, Issue, RecordView, RuleCode, Severity};

const SKILLS_COLUMN: &str = "Skills";
const REQUIRED_SKILLS_COLUMN: &str = "RequiredSkills";
const MAX_CONCURRENT_COLUMN: &str = "MaxConcurrent";

/// Skill set of every worker, in row order.
///
/// Returns `None` when the workers table or its Skills column is absent, so
/// the skill checks stay silent instead of flagging every task.
pub fn worker_skill_sets(datasets: &DatasetSet) -> Option<Vec<BTreeSet<String>>> {
    let workers = datasets.workers()?;
    if !workers.has_column(SKILLS_COLUMN) {
        return None;
    }
    Some(
        workers
            .views()
            .map(|(_, view)| view.list(SKILLS_COLUMN).into_iter().collect())
            .collect(),
    )
}

struct TaskSkills<'a> {
    row: usize,
    view: RecordView<'a>,
    task: String,
    skills: Vec<String>,
}

/// Required skills of every task, deduplicated within the row.
fn required_skills(tasks: &Dataset) -> impl Iterator<Item = TaskSkills<'_>> {
    tasks.views().map(|(row, view)| {
        let mut seen = BTreeSet::new();
        let skills = view
            .list(REQUIRED_SKILLS_COLUMN)
            .into_iter()
            .filter(|skill| seen.insert(skill.clone()))
            .collect();
        let task = view.id().unwrap_or_else(|| format!("row {row}"));
        TaskSkills {
            row,
            view,
            task,
            skills,
        }
    })
}

/// V11: every skill a task requires must be held by some worker.
pub fn check_coverage(datasets: &DatasetSet) -> Vec<Issue> {
    let Some(tasks) = datasets.tasks() else {
        return Vec::new();
    };
    let Some(skill_sets) = worker_skill_sets(datasets) else {
        return Vec::new();
    };
    let available: BTreeSet<&str> = skill_sets
        .iter()
        .flat_map(|set| set.iter().map(String::as_str))
        .collect();

    let mut issues = Vec::new();
    for TaskSkills {
        row, task, skills, ..
    } in required_skills(tasks)
    {
        for skill in skills {
            if available.contains(skill.as_str()) {
                continue;
            }
            issues.push(
                Issue::new(
                    RuleCode::V11,
                    Severity::Error,
                    tasks.kind(),
                    format!("Task {task} requires skill {skill} which no worker has"),
                )
                .with_row(row)
                .with_column(REQUIRED_SKILLS_COLUMN)
                .with_value(skill.as_str())
                .with_suggestion(format!(
                    "Add {skill} to a worker's {SKILLS_COLUMN} or remove it from the task"
                )),
            );
        }
    }

    issues
}

/// V12: qualified workers must cover a task's MaxConcurrent.
///
/// A worker qualifies when its skill set contains every required skill.
/// Counts are memoized per distinct required-skill set.
pub fn check_concurrency(datasets: &DatasetSet) -> Vec<Issue> {
    let Some(tasks) = datasets.tasks() else {
        return Vec::new();
    };
    let Some(skill_sets) = worker_skill_sets(datasets) else {
        return Vec::new();
    };

    let mut qualified_counts: HashMap<BTreeSet<String>, usize> = HashMap::new();
    let mut issues = Vec::new();

    for TaskSkills {
        row,
        view,
        task,
        skills,
    } in required_skills(tasks)
    {
        let Ok(Some(max_concurrent)) = view.number(MAX_CONCURRENT_COLUMN) else {
            continue;
        };

        let required: BTreeSet<String> = skills.into_iter().collect();
        let qualified = match qualified_counts.get(&required) {
            Some(count) => *count,
            None => {
                let count = skill_sets
                    .iter()
                    .filter(|held| required.is_subset(held))
                    .count();
                qualified_counts.insert(required.clone(), count);
                count
            }
        };

        if (qualified as f64) >= max_concurrent {
            continue;
        }
        let skill_list = required.iter().cloned().collect::<Vec<_>>().join(", ");
        issues.push(
            Issue::new(
                RuleCode::V12,
                Severity::Warning,
                tasks.kind(),
                format!(
                    "Task {task} allows {max_concurrent} concurrent assignment(s) but only \
                     {qualified} worker(s) hold all required skills [{skill_list}]"
                ),
            )
            .with_row(row)
            .with_column(MAX_CONCURRENT_COLUMN)
            .with_value(max_concurrent.to_string())
            .with_suggestion(format!(
                "Lower {MAX_CONCURRENT_COLUMN} to at most {qualified} or qualify more workers"
            )),
        );
    }

    issues
}
