//! Multi-turn conversations through the dispatcher

use std::sync::Arc;

use serde_json::{json, Value};
use solar_agent_agent::{InMemorySessionStore, IntentDispatcher};
use solar_agent_config::ToolsDomainView;
use solar_agent_core::{SessionStore, WebhookRequest};

fn dispatcher() -> Arc<IntentDispatcher> {
    Arc::new(IntentDispatcher::new(
        Arc::new(InMemorySessionStore::new()),
        Arc::new(ToolsDomainView::default()),
    ))
}

fn turn(dispatcher: &IntentDispatcher, session: &str, intent: &str, parameters: Value) -> String {
    let request: WebhookRequest = serde_json::from_value(json!({
        "session": session,
        "queryResult": {
            "intent": { "displayName": intent },
            "parameters": parameters
        }
    }))
    .unwrap();
    dispatcher.handle_webhook(&request).fulfillment_text
}

#[test]
fn test_bill_then_area_then_cost() {
    let dispatcher = dispatcher();

    let first = turn(&dispatcher, "conv-1", "Get_System_Size", json!({"monthly_bill": 16500}));
    assert!(first.starts_with("Estimated system size: ~2.3 kW"));

    // bill still outranks area, so the size stays bill-based
    let second = turn(
        &dispatcher,
        "conv-1",
        "Get_System_Size",
        json!({"roof_area": {"amount": 5, "unit": "marla"}}),
    );
    assert_eq!(
        second,
        "Estimated system size: ~2.3 kW for Rawalpindi ☀️\n\
         (Based on bill of PKR 16,500, roof area of 5 marla)"
    );

    let cost = turn(&dispatcher, "conv-1", "Check_Cost", json!({}));
    assert_eq!(cost, "Estimated turnkey cost for 2.3 kW: ~PKR 460,000");
}

#[test]
fn test_area_only_conversation() {
    let dispatcher = dispatcher();

    let size = turn(
        &dispatcher,
        "conv-2",
        "Get_System_Size",
        json!({"roof_area": {"amount": 1000, "unit": "sq ft"}}),
    );
    assert!(size.starts_with("Estimated system size: ~9.3 kW"));

    let cost = turn(&dispatcher, "conv-2", "Check_Cost", json!({"size_kw": ""}));
    assert_eq!(cost, "Estimated turnkey cost for 9.3 kW: ~PKR 1,805,000");
}

#[test]
fn test_explicit_standard_size_gets_breakdown() {
    let dispatcher = dispatcher();
    let cost = turn(&dispatcher, "conv-3", "Check_Cost", json!({"size_kw": 10}));
    assert!(cost.starts_with("💡 Cost for 10kW system:\n• Panels: PKR 1,200,000"));
    assert!(cost.ends_with("👉 Total: PKR 1,750,000"));
}

#[test]
fn test_sessions_do_not_leak() {
    let dispatcher = dispatcher();
    turn(&dispatcher, "alice", "Get_System_Size", json!({"units": 900}));

    let cost = turn(&dispatcher, "bob", "Check_Cost", json!({}));
    assert_eq!(cost, "Please provide monthly bill/units or rooftop area to estimate cost.");
}

#[test]
fn test_malformed_parameters_degrade_to_prompt() {
    let dispatcher = dispatcher();
    let reply = turn(
        &dispatcher,
        "conv-4",
        "Get_System_Size",
        json!({"monthly_bill": "a lot", "energy_usage": {"amount": "x"}, "roof_area": [null]}),
    );
    assert!(reply.starts_with("I need more information to calculate system size."));
}

#[test]
fn test_installer_and_faq_turns() {
    let dispatcher = dispatcher();

    let installers = turn(&dispatcher, "conv-5", "Find_Installer", json!({"location": "Bahria Town"}));
    assert!(installers.starts_with("🔧 Top Solar Installers in Bahria Town:\n\n1. Bahria Solar Experts"));

    let faq = turn(&dispatcher, "conv-5", "Solar_FAQ", json!({"faq_topic": "MAINTENANCE"}));
    assert_eq!(faq, "💡 Maintenance: Panels require periodic cleaning and checks.");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_turns_on_one_session() {
    let store = Arc::new(InMemorySessionStore::new());
    let dispatcher = Arc::new(IntentDispatcher::new(
        store.clone(),
        Arc::new(ToolsDomainView::default()),
    ));

    let inputs = vec![
        json!({"monthly_bill": 20000}),
        json!({"energy_usage": 400}),
        json!({"roof_area": {"amount": 10, "unit": "marla"}}),
    ];

    let mut handles = Vec::new();
    for round in 0..20 {
        for params in &inputs {
            let dispatcher = Arc::clone(&dispatcher);
            let params = params.clone();
            handles.push(tokio::spawn(async move {
                turn(&dispatcher, "busy", "Get_System_Size", params);
                round
            }));
        }
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let record = store.get("busy").unwrap();
    assert_eq!(record.bill, Some(20_000.0));
    assert_eq!(record.units, Some(400.0));
    assert_eq!(record.area_display.as_deref(), Some("10 marla"));
    assert!(record.size_kw.unwrap() > 0.0);
}
