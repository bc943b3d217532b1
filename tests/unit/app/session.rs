use super::*;
use crate::kernel::services::adapters::storage::{MemoryStorage, StorageService};
use std::rc::Rc;

fn registry_with(memory: &MemoryStorage) -> DocumentRegistry {
    let storage = StorageService::empty().with_provider(Box::new(memory.clone()));
    DocumentRegistry::new(Rc::new(storage))
}

fn output_lines(output: &[u8]) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(output)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn inbound_distinguishes_view_and_host_messages() {
    let edit: Inbound = serde_json::from_str(r#"{"type":"edit","value":"x"}"#).unwrap();
    assert_eq!(
        edit,
        Inbound::View(ViewMessage::Edit {
            value: "x".to_string()
        })
    );

    let save_as: Inbound =
        serde_json::from_str(r#"{"type":"saveAs","target":"memory:///b.txt"}"#).unwrap();
    assert_eq!(
        save_as,
        Inbound::Host(HostCommand::SaveAs {
            target: "memory:///b.txt".to_string()
        })
    );

    assert!(serde_json::from_str::<Inbound>(r#"{"type":"bogus"}"#).is_err());
}

#[tokio::test]
async fn session_round_trip() {
    let memory = MemoryStorage::new();
    let resource = Resource::parse("memory:///doc.txt").unwrap();
    memory.insert(&resource, "");
    let registry = registry_with(&memory);

    let input = concat!(
        "{\"type\":\"edit\",\"value\":\"hello\"}\n",
        "{\"type\":\"save\"}\n",
        "\n",
        "{\"type\":\"edit\",\"value\":\"hello world\"}\n",
        "{\"type\":\"undo\"}\n",
        "{\"type\":\"redo\"}\n",
        "{\"type\":\"bogus\"}\n",
        "{\"type\":\"saveAs\",\"target\":\"memory:///copy.txt\"}\n",
    );
    let mut output = Vec::new();

    let session = Session::open(&registry, &resource, &Settings::default());
    session.run(input.as_bytes(), &mut output).await.unwrap();

    let lines = output_lines(&output);
    let kinds: Vec<&str> = lines.iter().map(|l| l["type"].as_str().unwrap()).collect();
    assert_eq!(
        kinds,
        vec!["setValue", "setValue", "setValue", "setValue", "setValue", "error"]
    );
    let values: Vec<&str> = lines.iter().filter_map(|l| l["value"].as_str()).collect();
    assert_eq!(values, vec!["", "hello", "hello world", "hello", "hello world"]);

    let copy = Resource::parse("memory:///copy.txt").unwrap();
    assert_eq!(memory.get_string(&resource).as_deref(), Some("hello"));
    assert_eq!(memory.get_string(&copy).as_deref(), Some("hello world"));
    assert!(registry.is_empty());
}

#[tokio::test]
async fn session_reports_load_failure() {
    let memory = MemoryStorage::new();
    let resource = Resource::parse("memory:///missing.txt").unwrap();
    let registry = registry_with(&memory);
    let mut output = Vec::new();

    let session = Session::open(&registry, &resource, &Settings::default());
    session.run(&b""[..], &mut output).await.unwrap();

    let lines = output_lines(&output);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["type"], "error");
}

#[tokio::test]
async fn handle_line_records_view_edits() {
    let memory = MemoryStorage::new();
    let resource = Resource::parse("memory:///doc.txt").unwrap();
    memory.insert(&resource, "");
    let registry = registry_with(&memory);

    let mut session = Session::open(&registry, &resource, &Settings::default());
    session
        .handle_line(r#"{"type":"edit","value":"a"}"#)
        .await
        .unwrap();

    assert!(session.stack().can_undo());
    assert_eq!(session.controller().document().contents().as_deref(), Some("a"));

    let err = session.handle_line("not json").await.unwrap_err();
    assert!(matches!(err, CommandError::Parse(_)));
}
