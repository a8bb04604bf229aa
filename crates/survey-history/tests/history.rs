use polars::prelude::*;
use survey_history::HistoryManager;

fn table(rows: i64) -> DataFrame {
    let ids: Vec<i64> = (1..=rows).collect();
    df! {
        "respondent_id" => ids,
    }
    .unwrap()
}

#[test]
fn add_delete_scenario() {
    let mut history = HistoryManager::new(5);
    let a = history.add("a.csv", &table(1), "1 B");
    let b = history.add("b.csv", &table(2), "2 B");
    let c = history.add("c.csv", &table(3), "3 B");

    let ids: Vec<_> = history.list().iter().map(|entry| entry.id).collect();
    assert_eq!(ids, vec![c, b, a]);
    assert_eq!(history.current_id(), Some(c));

    history.delete(b);
    let ids: Vec<_> = history.list().iter().map(|entry| entry.id).collect();
    assert_eq!(ids, vec![c, a]);
    assert_eq!(history.current_id(), Some(c));

    history.delete(c);
    assert_eq!(history.current_id(), Some(a));
    assert_eq!(history.current_data().unwrap().height(), 1);
}

#[test]
fn eviction_keeps_newest() {
    let mut history = HistoryManager::new(3);
    let mut ids = Vec::new();
    for n in 1..=4 {
        ids.push(history.add(format!("{n}.csv"), &table(n), "1 B"));
    }
    assert_eq!(history.len(), 3);
    let listed: Vec<_> = history.list().iter().map(|entry| entry.id).collect();
    assert_eq!(listed, vec![ids[3], ids[2], ids[1]]);
    assert!(history.get_entry(ids[0]).is_none());
    assert_eq!(history.usage_label(), "3/3");
}

#[test]
fn add_selects_new_entry_even_with_zero_capacity() {
    let mut history = HistoryManager::new(2);
    history.add("a.csv", &table(1), "1 B");
    let b = history.add("b.csv", &table(2), "1 B");
    assert_eq!(history.current_id(), Some(b));

    let mut history = HistoryManager::new(0);
    let id = history.add("gone.csv", &table(1), "1 B");
    assert!(history.is_empty());
    assert_eq!(history.current_id(), Some(id));
    assert!(history.current_data().is_none());
    assert!(history.current_entry().is_none());
}

#[test]
fn deleting_last_entry_clears_selection() {
    let mut history = HistoryManager::default();
    let only = history.add("only.csv", &table(2), "1 B");
    history.delete(only);
    assert!(history.is_empty());
    assert_eq!(history.current_id(), None);
    assert!(history.current_data().is_none());
}

#[test]
fn delete_unknown_is_noop() {
    let mut history = HistoryManager::default();
    let id = history.add("a.csv", &table(1), "1 B");
    history.delete(uuid::Uuid::new_v4());
    assert_eq!(history.len(), 1);
    assert!(history.is_current(id));
}

#[test]
fn clear_empties_everything() {
    let mut history = HistoryManager::default();
    history.add("a.csv", &table(1), "1 B");
    history.add("b.csv", &table(2), "1 B");
    history.clear();
    assert!(history.is_empty());
    assert_eq!(history.current_id(), None);
}

#[test]
fn set_current_switches_data() {
    let mut history = HistoryManager::default();
    let a = history.add("a.csv", &table(1), "1 B");
    history.add("b.csv", &table(2), "1 B");
    history.set_current(a);
    assert_eq!(history.current_data().unwrap().height(), 1);
    assert_eq!(history.current_entry().unwrap().filename, "a.csv");
}

#[test]
fn unknown_id_lookups_are_none() {
    let mut history = HistoryManager::default();
    let missing = uuid::Uuid::new_v4();
    assert!(history.get_data(missing).is_none());
    history.set_current(missing);
    assert!(history.current_data().is_none());
}

#[test]
fn stored_copy_is_independent() {
    let mut source = table(3);
    let mut history = HistoryManager::default();
    let id = history.add("a.csv", &source, "1 B");

    source
        .with_column(Column::new("respondent_id".into(), &[9i64, 9, 9]))
        .unwrap();

    let stored = history.get_data(id).unwrap();
    assert_eq!(stored.column("respondent_id").unwrap().get(0).unwrap(), AnyValue::Int64(1));
}
