use super::*;

#[test]
fn view_edit_message_parses_from_json() {
    let msg: ViewMessage = serde_json::from_str(r#"{"type":"edit","value":"abc"}"#).unwrap();
    assert_eq!(
        msg,
        ViewMessage::Edit {
            value: "abc".to_string()
        }
    );
}

#[test]
fn host_messages_use_camel_case_tags() {
    let set = serde_json::to_value(RefreshKind::SetValue.message("x".to_string())).unwrap();
    assert_eq!(set, serde_json::json!({ "type": "setValue", "value": "x" }));

    let apply = serde_json::to_value(RefreshKind::Apply.message("y".to_string())).unwrap();
    assert_eq!(apply, serde_json::json!({ "type": "apply", "value": "y" }));
}

#[test]
fn view_handle_reports_closed_receiver() {
    let (handle, rx) = view_channel();
    assert!(handle.post(HostMessage::SetValue {
        value: "a".to_string()
    }));

    drop(rx);
    assert!(handle.is_closed());
    assert!(!handle.post(HostMessage::SetValue {
        value: "b".to_string()
    }));
}

#[test]
fn view_receiver_yields_messages_in_order() {
    let (handle, mut rx) = view_channel();
    handle.post(RefreshKind::SetValue.message("1".to_string()));
    handle.post(RefreshKind::SetValue.message("2".to_string()));

    assert_eq!(rx.try_recv().and_then(|m| m.value().map(String::from)), Some("1".into()));
    assert_eq!(rx.try_recv().and_then(|m| m.value().map(String::from)), Some("2".into()));
    assert!(rx.try_recv().is_none());
}
