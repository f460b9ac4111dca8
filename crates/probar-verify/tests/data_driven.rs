//! End-to-end data-driven runs: test data file → invocations → component
//! assertions → recording channel.

use probar_verify::prelude::*;
use std::sync::Arc;

const CHECKOUT: &str = r#"
segments:
  - name: checkout
    fields: [quantity, total, status, min_total, max_total]
    rows:
      - values: { quantity: "2", total: "19.98", status: "Confirmed", min_total: "19", max_total: "20" }
      - values: { quantity: "1", total: "<NULL>", status: ~, min_total: "<NULL>", max_total: "20" }
      - values: { quantity: "5", total: "49.95", status: "Pending", min_total: "50", max_total: "50" }
        ignored: "payment provider sandbox down"
  - name: login
    rows:
      - values: { user: alice }
"#;

struct CheckoutPage {
    quantity: GuiComponent,
    total: GuiComponent,
    status: GuiComponent,
}

impl CheckoutPage {
    fn new(ctx: &VerifyContext) -> Self {
        Self {
            quantity: ctx.component(ComponentKind::InputField, "quantity", "#qty"),
            total: ctx.component(ComponentKind::InputField, "total", "#total"),
            status: ctx.component(ComponentKind::Label, "status", ".status"),
        }
    }
}

fn channel_for(quantity: &str, total: &str, status: &str) -> Arc<RecordingChannel> {
    Arc::new(
        RecordingChannel::new()
            .with_element(ElementRef::new("InputField", "quantity", "#qty"), "", quantity)
            .with_element(ElementRef::new("InputField", "total", "#total"), "", total)
            .with_element(ElementRef::new("Label", "status", ".status"), status, ""),
    )
}

fn run_row(page: &CheckoutPage, invocation: &Invocation<'_>) -> VerifyResult<()> {
    page.quantity.assert_text_equals(invocation.value("quantity")?);
    page.total.assert_text_equals(invocation.value("total")?);
    page.total.assert_value_greater_than(invocation.value("min_total")?);
    page.total.assert_value_less_than(invocation.value("max_total")?);
    page.status.assert_text_equals_ignore_case_trimmed(invocation.value("status")?);
    Ok(())
}

#[test]
fn test_full_run_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("checkout.yaml");
    std::fs::write(&path, CHECKOUT).unwrap();
    let doc = TestDataMetadata::load(&path).unwrap();

    let invocations = doc.invocations("checkout").unwrap();
    assert_eq!(invocations.len(), 3);

    let mut executed = 0;
    let mut skipped = Vec::new();
    for invocation in &invocations {
        if invocation.is_ignored() {
            skipped.push(invocation.to_string());
            continue;
        }
        let channel = channel_for("2", "19.98", "  confirmed ");
        let ctx = VerifyContext::new(channel.clone(), Arc::new(RuntimeConfig::default()));
        run_row(&CheckoutPage::new(&ctx), invocation).unwrap();
        executed += 1;

        match invocation.index() {
            0 => {
                assert_eq!(channel.verification_count(), 5);
                assert!(channel.verify().is_ok(), "{:?}", channel.failures());
            }
            1 => {
                // total, min_total and status are placeholders or null
                assert_eq!(channel.verification_count(), 2);
                let failures = channel.failures();
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].element.element_name(), "quantity");
                assert_eq!(failures[0].channel, ChannelMode::Value);
            }
            other => panic!("unexpected row {other}"),
        }
    }
    assert_eq!(executed, 2);
    assert_eq!(skipped, ["checkout[2]"]);
}

#[test]
fn test_misspelled_segment_fails_before_any_assertion() {
    let doc = TestDataMetadata::from_yaml(CHECKOUT).unwrap();
    let channel = channel_for("", "", "");
    let err = doc.invocations("chekout").unwrap_err();
    assert!(matches!(err, VerifyError::SegmentNotFound { .. }));
    assert_eq!(channel.verification_count(), 0);
}

#[test]
fn test_tolerance_change_applies_to_next_assertion() {
    let channel = channel_for("", "9.6", "");
    let config = Arc::new(RuntimeConfig::default());
    let ctx = VerifyContext::new(channel.clone(), config.clone());
    let total = ctx.component(ComponentKind::InputField, "total", "#total");

    total.assert_value_greater_than("10");
    config.set_numeric_tolerance(0.5).unwrap();
    total.assert_value_greater_than("10");

    let log = channel.verifications();
    assert!(!log[0].passed);
    assert!(log[1].passed);
}

/// A component built by composition on top of the dispatcher
struct CurrencyField {
    assertions: ComponentAssertions,
    symbol: &'static str,
}

impl ValueComponent for CurrencyField {
    fn assertions(&self) -> &ComponentAssertions {
        &self.assertions
    }
}

impl CurrencyField {
    fn assert_currency(&self) -> Dispatch {
        let symbol = self.symbol;
        self.assert_text_matches(&FnValidator::new(format!("prefixed with {symbol}"), move |s: &str| {
            s.starts_with(symbol)
        }))
    }
}

#[test]
fn test_custom_component_via_composition() {
    let element = ElementRef::new("CurrencyField", "price", "#price");
    let channel = Arc::new(RecordingChannel::new().with_element(element.clone(), "€ 12,00", "12"));
    let assertions = ComponentAssertions::new(
        element,
        ChannelMode::Text,
        channel.clone(),
        Arc::new(FixedTolerance(0.0)),
    )
    .with_marker(PlaceholderMarker::new("-"));
    let price = CurrencyField {
        assertions,
        symbol: "€",
    };

    assert!(price.assert_currency().is_dispatched());
    assert_eq!(price.assert_text_contains("-"), Dispatch::Skipped);
    assert!(price.assert_text_contains("12").is_dispatched());
    assert_eq!(price.get_text(), "€ 12,00");
    assert!(channel.verify().is_ok());
}

#[test]
fn test_shared_data_across_concurrent_tests() {
    let doc = Arc::new(TestDataMetadata::from_yaml(CHECKOUT).unwrap());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let doc = Arc::clone(&doc);
            std::thread::spawn(move || {
                let channel = channel_for("2", "19.98", "Confirmed");
                let ctx = VerifyContext::new(channel.clone(), Arc::new(RuntimeConfig::default()));
                let page = CheckoutPage::new(&ctx);
                let invocations = doc.invocations("checkout").unwrap();
                run_row(&page, &invocations[0]).unwrap();
                channel.verify().is_ok()
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[test]
fn test_decimal_text_survives_loading() {
    let doc = TestDataMetadata::from_yaml(
        "segments:\n  - name: prices\n    rows:\n      - values: { price: \"10.50\" }\n",
    )
    .unwrap();
    let element = ElementRef::new("InputField", "price", "#price");
    let channel = Arc::new(RecordingChannel::new().with_element(element, "", "10.50"));
    let ctx = VerifyContext::new(channel.clone(), Arc::new(RuntimeConfig::default()));
    let price = ctx.component(ComponentKind::InputField, "price", "#price");

    for invocation in doc.invocations("prices").unwrap() {
        price.assert_text_equals(invocation.value("price").unwrap());
    }
    assert_eq!(channel.verification_count(), 1);
    assert!(channel.verify().is_ok(), "{:?}", channel.failures());

    let unquoted = "segments:\n  - name: prices\n    rows:\n      - values: { price: 10.50 }\n";
    assert!(matches!(
        TestDataMetadata::from_yaml(unquoted),
        Err(VerifyError::ParseError(_))
    ));
}
