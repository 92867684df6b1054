use async_trait::async_trait;
use medguide_lookup::{AdverseEventReport, AdverseEventSource, LookupError};
use medguide_models::{chrono::NaiveTime, reminder::Frequency};
use medguide_storage::{InMemorySnapshotSlot, parse_snapshot};
use proptest::prelude::*;
use proptest_arbitrary_interop::arb;

use super::*;

/// Knows a single medicine; fails for "Brokenium".
struct StaticSource;

#[async_trait]
impl AdverseEventSource for StaticSource {
    async fn fetch_latest(
        &self,
        medicine: &str,
    ) -> Result<Option<AdverseEventReport>, LookupError> {
        match medicine {
            "Paracetamol" => Ok(Some(
                serde_json::from_value(serde_json::json!({
                    "serious": "2",
                    "receivedate": "20240102",
                    "patient": {
                        "drug": [{
                            "medicinalproduct": "PARACETAMOL",
                            "openfda": {"brand_name": ["TYLENOL"]}
                        }],
                        "reaction": [
                            {"reactionmeddrapt": "Nausea"},
                            {"reactionmeddrapt": "Rash"},
                            {"reactionmeddrapt": "Headache"},
                            {"reactionmeddrapt": "Fatigue"},
                            {"reactionmeddrapt": "Dizziness"},
                            {"reactionmeddrapt": "Vomiting"}
                        ]
                    }
                }))
                .unwrap(),
            )),
            "Brokenium" => Err(LookupError::Status(503)),
            _ => Ok(None),
        }
    }
}

struct TestContext {
    pub slot: InMemorySnapshotSlot,
    pub app: App<StaticSource>,
}

impl TestContext {
    fn new() -> Self {
        Self::with_slot(InMemorySnapshotSlot::new())
    }

    fn with_slot(slot: InMemorySnapshotSlot) -> Self {
        let app = App::init(Box::new(slot.clone()), StaticSource);
        Self { slot, app }
    }

    async fn run_script(&mut self, script: &str) -> String {
        let mut output = Vec::new();
        run(
            &mut self.app,
            script.as_bytes(),
            &mut output,
            CancellationToken::new(),
        )
        .await
        .unwrap();
        String::from_utf8(output).unwrap()
    }

    async fn send(&mut self, line: &str) -> String {
        handle_command(&mut self.app, line.parse().unwrap()).await
    }
}

#[tokio::test]
async fn add_list_and_delete_session() {
    let mut ctx = TestContext::new();

    let reply = ctx.send("/add Paracetamol | 08:00 | daily").await;
    assert_eq!(reply, "Success! Paracetamol reminder added for 8:00 AM (Daily).");

    ctx.send("/add Ibuprofen | 21:15 | alternate").await;
    let list = ctx.send("/list").await;
    assert!(list.starts_with("You have 2 active reminders:"));
    assert!(list.contains("1. Paracetamol at 8:00 AM (Daily)"));
    assert!(list.contains("2. Ibuprofen at 9:15 PM (Every other day)"));

    let first_id = ctx.app.store().list()[0].id.clone();
    let reply = ctx.send(&format!("/delete {}", first_id)).await;
    assert_eq!(reply, "Paracetamol reminder has been removed.");

    let persisted = parse_snapshot(&ctx.slot.value().unwrap()).unwrap();
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].name, "Ibuprofen");
    assert_eq!(persisted[0].frequency, Frequency::Alternate);
}

#[tokio::test]
async fn invalid_add_reports_validation_error() {
    let mut ctx = TestContext::new();

    let reply = ctx.send("/add    | 08:00 | daily").await;

    assert_eq!(reply, "Validation error: Please enter a medicine name.");
    assert!(ctx.app.store().list().is_empty());
}

#[tokio::test]
async fn empty_list_has_hint() {
    let mut ctx = TestContext::new();

    assert_eq!(
        ctx.send("/list").await,
        "No reminders yet. Add your first medicine reminder with /add."
    );
}

#[tokio::test]
async fn unavailable_storage_is_a_warning_not_a_failure() {
    let mut ctx = TestContext::new();
    ctx.slot.set_unavailable(true);

    let reply = ctx.send("/add Aspirin | 07:00 | once").await;

    assert!(reply.starts_with("Success! Aspirin reminder added"));
    assert!(reply.contains("\nWarning: Could not save reminders"));
    assert_eq!(ctx.app.store().list().len(), 1);
}

#[tokio::test]
async fn lookup_renders_medicine_info() {
    let mut ctx = TestContext::new();

    let reply = ctx.send("/lookup Paracetamol").await;

    assert!(reply.starts_with("PARACETAMOL (TYLENOL)"));
    assert!(reply.contains("  - Nausea"));
    assert!(!reply.contains("Vomiting"));
    assert!(reply.contains("  +1 more reactions..."));
    assert!(reply.contains("Serious event: No"));
    assert!(reply.contains("Report date: 01/02/2024"));
    assert!(reply.contains("Manufacturer: Unknown"));
    assert!(!reply.contains("Generic name"));
}

#[tokio::test]
async fn lookup_not_found_and_failure() {
    let mut ctx = TestContext::new();

    let reply = ctx.send("/lookup Unknownium").await;
    assert!(reply.starts_with("No data available or medicine not found."));

    let reply = ctx.send("/lookup Brokenium").await;
    assert_eq!(
        reply,
        "Failed to fetch medicine information. Please try again."
    );

    let reply = ctx.send("/lookup").await;
    assert_eq!(
        reply,
        "Validation error: Please enter a medicine name to search for."
    );
}

#[tokio::test]
async fn suggestions_and_analysis() {
    let mut ctx = TestContext::new();

    assert_eq!(ctx.send("/suggest pam").await, "Diazepam\nLorazepam");
    assert_eq!(ctx.send("/suggest x").await, "No suggestions for \"x\".");

    let analysis = ctx.send("/analysis Metformin").await;
    assert!(analysis.starts_with("Analysis summary - Metformin [Safe]"));
    assert!(analysis.contains("  - Take with meals"));
}

#[tokio::test]
async fn script_runs_until_quit() {
    let mut ctx = TestContext::new();

    let output = ctx
        .run_script("/add Insulin | 19:00 | daily\n\nhello\n/quit\n/add Never | 10:00 | once\n")
        .await;

    let lines: Vec<_> = output.lines().collect();
    assert_eq!(lines[0], GREETING);
    assert!(lines[1].starts_with("Success! Insulin reminder added"));
    assert!(lines[2].starts_with("Unable to handle the message."));
    assert_eq!(lines[3], "Goodbye!");
    assert_eq!(ctx.app.store().list().len(), 1);
}

#[tokio::test]
async fn invalid_utf8_line_does_not_end_session() {
    let mut ctx = TestContext::new();
    let mut output = Vec::new();

    run(
        &mut ctx.app,
        &b"\xff\xfe\n/add Aspirin | 08:00 | daily\n"[..],
        &mut output,
        CancellationToken::new(),
    )
    .await
    .unwrap();

    let output = String::from_utf8(output).unwrap();
    let lines: Vec<_> = output.lines().collect();
    assert!(lines[1].starts_with("Unable to handle the message."));
    assert!(lines[2].starts_with("Success! Aspirin reminder added"));
    assert_eq!(ctx.app.store().list().len(), 1);
}

#[tokio::test]
async fn corrupt_snapshot_is_reported_at_startup() {
    let mut ctx = TestContext::with_slot(InMemorySnapshotSlot::with_value("not json"));

    let output = ctx.run_script("/list\n").await;

    assert!(output.contains("Warning: Could not load saved reminders"));
    assert!(output.contains("No reminders yet."));
}

#[tokio::test]
async fn cancelled_shutdown_stops_loop() {
    let mut ctx = TestContext::new();
    let shutdown = CancellationToken::new();
    shutdown.cancel();
    let mut output = Vec::new();

    // Input never ends on its own.
    let (_writer, reader) = tokio::io::duplex(64);
    run(
        &mut ctx.app,
        tokio::io::BufReader::new(reader),
        &mut output,
        shutdown,
    )
    .await
    .unwrap();

    assert!(String::from_utf8(output).unwrap().ends_with("Goodbye!\n"));
}

proptest! {
    #[test]
    fn added_time_is_displayed_in_list(time in arb::<NaiveTime>()) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let mut ctx = TestContext::new();
        let time_text = time.format("%H:%M").to_string();

        let list = runtime.block_on(async {
            ctx.send(&format!("/add Warfarin | {} | once", time_text)).await;
            ctx.send("/list").await
        });

        let stored = ctx.app.store().list()[0].time;
        prop_assert_eq!(stored.to_string(), time_text);
        prop_assert!(list.contains(&stored.to_12_hour()));
    }
}
