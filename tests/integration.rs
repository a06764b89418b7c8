use std::sync::Arc;
use std::thread;

use html_guard::{
    Field, FieldValidator, HtmlGuardError, HtmlSanitizer, PatientRecord, PolicyBuilder,
    TextFilter, ValidationError, filter_style, filter_text, sanitize, validate,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Inputs that exercise parser recovery, nesting, escaping and script
/// vectors.
const ADVERSARIAL: &[&str] = &[
    "<script>alert(1)</script>",
    r#"<p onclick="evil()">hi</p>"#,
    r#"<div style="color:red; position:absolute; background-image:url(javascript:x)">t</div>"#,
    r#"<img src=x onerror=alert(1)>"#,
    r#"<a href="javascript:alert(1)">link <b>bold</b></a>"#,
    "<p>unclosed <em>emphasis <strong>strong",
    "<ul><li>one<li>two</ul><ol><li>three",
    "<table><tr><td>cell</td></tr></table>",
    "<svg><g><text>vector</text></g></svg>",
    "<math><mi>x</mi></math>",
    "<p>a < b && c > d</p>",
    "&lt;script&gt;alert(1)&lt;/script&gt;",
    "<pre>\n\nindented\n  code</pre>",
    "<pre><x>\nflattened</x></pre>",
    "<pre><x></x>\nafter empty</pre>",
    "<h1><span><h2>nested heading</h2></span></h1>",
    "<p><div>block in paragraph</div></p>",
    "<!-- comment --><p>after</p><!DOCTYPE html>",
    "<style>p { color: red }</style><p>styled</p>",
    "<textarea><p>raw</p></textarea>",
    "<noscript><p>fallback</p></noscript>",
    "<iframe srcdoc=\"<script>x</script>\"></iframe>",
    "<span class=\"a&quot;b\" id=\"\u{a0}\">nbsp\u{a0}text</span>",
    "<p style='color: red; font-weight: bold;;; :; margin'>s</p>",
    "<b><i>mis</b>nested</i>",
    "<form><input value=\"x\"><button>go</button></form>",
    "plain text with & ampersand",
    "<br><br/><br />",
    "\r\nline\r\nbreaks\r\n",
    "<script> </script>",
    "<x>\t</x>",
];

fn full_record() -> PatientRecord {
    PatientRecord {
        name: "Ana".into(),
        surname: "García".into(),
        email: "ana@example.com".into(),
        age: Some("34".into()),
        phone: Some("+34 600 000 000".into()),
        consultation_reason: "<p>Persistent cough</p>".into(),
        diagnosis: Some("<p><em>Bronchitis</em></p>".into()),
        conclusions: Some("<ul><li>Rest</li><li>Fluids</li></ul>".into()),
    }
}

// ---------------------------------------------------------------------------
// Markup sanitization
// ---------------------------------------------------------------------------

#[test]
fn sanitize_is_idempotent() {
    for input in ADVERSARIAL {
        let once = sanitize(input);
        let twice = sanitize(&once);
        assert_eq!(once, twice, "not idempotent for {input:?}");
    }
}

#[test]
fn sanitize_output_contains_no_disallowed_tags() {
    for input in ADVERSARIAL {
        let out = sanitize(input);
        for forbidden in [
            "<script", "<img", "<a ", "<iframe", "<style", "<svg", "<table", "<textarea",
        ] {
            assert!(!out.contains(forbidden), "{forbidden} in {out:?}");
        }
        assert!(!out.contains("onclick"), "{out:?}");
        assert!(!out.contains("onerror="), "{out:?}");
    }
}

#[test]
fn script_tag_degrades_to_plain_text() {
    let out = sanitize("<script>alert(1)</script>");
    assert!(!out.contains("<script"));
    assert!(out.contains("alert(1)"));
}

#[test]
fn event_attribute_is_removed() {
    assert_eq!(sanitize(r#"<p onclick="evil()">hi</p>"#), "<p>hi</p>");
}

#[test]
fn style_keeps_only_allowed_declarations() {
    let out = sanitize(
        r#"<div style="color:red; position:absolute; background-image:url(javascript:x)">t</div>"#,
    );
    assert_eq!(out, r#"<div style="color: red">t</div>"#);
    assert!(!out.contains("position"));
    assert!(!out.contains("background-image"));
}

#[test]
fn fully_rejected_style_leaves_no_attribute() {
    let out = sanitize(r#"<div style="position:absolute; z-index:10">t</div>"#);
    assert_eq!(out, "<div>t</div>");
    assert!(!out.contains("style"));
}

#[test]
fn empty_input_yields_empty_output() {
    assert_eq!(sanitize(""), "");
    assert_eq!(sanitize("   "), "");
    assert_eq!(filter_text(""), "");
}

#[test]
fn disallowed_wrappers_keep_their_text() {
    let out = sanitize("<table><tr><td>cell</td></tr></table><p>after</p>");
    assert_eq!(out, "cell<p>after</p>");
}

#[test]
fn comments_are_dropped() {
    assert_eq!(sanitize("<!-- secret --><p>shown</p>"), "<p>shown</p>");
}

#[test]
fn mixed_rich_text_survives_intact() {
    let html = concat!(
        r#"<h3 class="section">Findings</h3>"#,
        r#"<p style="text-align: center; font-size: 14px">Patient <u>reports</u> <i>mild</i> pain.</p>"#,
        r#"<blockquote>quoted <code>note</code></blockquote>"#,
        r#"<ol><li>first</li><li>second<br>line</li></ol>"#,
    );
    assert_eq!(sanitize(html), html);
}

#[test]
fn custom_policy_is_enforced() {
    let policy = PolicyBuilder::new()
        .deny_tag("span")
        .deny_attribute("id")
        .build()
        .unwrap();
    let sanitizer = HtmlSanitizer::new(policy);
    assert_eq!(
        sanitizer.sanitize(r#"<p id="x"><span class="c">t</span></p>"#),
        "<p>t</p>"
    );
}

#[test]
fn custom_policy_rejects_unsafe_entries() {
    let err = PolicyBuilder::new().allow_tags(["iframe"]).build().unwrap_err();
    assert!(matches!(err, HtmlGuardError::UnsafeTag(_)));
    assert_eq!(err.to_string(), "Tag cannot be allowed: iframe");
}

#[test]
fn case_insensitive_style_hardening_is_opt_in() {
    let markup = r#"<span style="color: red; margin: JavaScript:x">t</span>"#;
    assert_eq!(
        sanitize(markup),
        r#"<span style="color: red; margin: JavaScript:x">t</span>"#
    );

    let hardened = HtmlSanitizer::new(
        PolicyBuilder::new()
            .case_insensitive_style_checks(true)
            .build()
            .unwrap(),
    );
    assert_eq!(
        hardened.sanitize(markup),
        r#"<span style="color: red">t</span>"#
    );
}

#[test]
fn deep_nesting_is_flattened_not_fatal() {
    let markup = "<div>".repeat(1_000) + "bottom" + &"</div>".repeat(1_000);
    let out = sanitize(&markup);
    assert!(out.contains("bottom"));
    assert_eq!(sanitize(&out), out);
}

#[test]
fn sanitizer_is_shareable_across_threads() {
    let sanitizer = Arc::new(HtmlSanitizer::default());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let sanitizer = Arc::clone(&sanitizer);
            thread::spawn(move || sanitizer.sanitize(&format!("<p>{i}<script>x</script></p>")))
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("<p>{i}x</p>"));
    }
}

// ---------------------------------------------------------------------------
// Style and text filtering
// ---------------------------------------------------------------------------

#[test]
fn filter_style_free_function() {
    assert_eq!(
        filter_style("color:red; position:absolute").as_deref(),
        Some("color: red")
    );
    assert_eq!(filter_style("position:absolute"), None);
    assert_eq!(filter_style("color: expression(alert(1))"), None);
}

#[test]
fn filter_text_removes_vectors_and_bounds_length() {
    let input = format!(
        "<b>hi</b> onmouseover= javascript:alert(1) {}",
        "x".repeat(2000)
    );
    let out = filter_text(&input);
    assert!(!out.contains('<'));
    assert!(!out.contains('>'));
    assert!(!out.contains("javascript:"));
    assert!(!out.contains("onmouseover="));
    assert!(out.chars().count() <= 1000);
    assert!(out.starts_with("bhi/b  alert(1) x"));
}

#[test]
fn filter_text_custom_bound() {
    let filter = TextFilter::with_max_len(5);
    assert_eq!(filter.filter("  abcdefgh  "), "abcde");
}

// ---------------------------------------------------------------------------
// Record validation
// ---------------------------------------------------------------------------

#[test]
fn complete_record_is_valid() {
    let result = validate(&full_record());
    assert!(result.is_valid(), "{:?}", result.messages());
    assert!(result.errors().is_empty());
}

#[test]
fn errors_accumulate_in_check_order() {
    let record = PatientRecord {
        name: String::new(),
        email: "not-an-email".into(),
        age: Some("200".into()),
        ..full_record()
    };
    let result = validate(&record);
    assert!(!result.is_valid());
    assert_eq!(
        result.errors(),
        &[
            ValidationError::Required(Field::Name),
            ValidationError::InvalidEmail,
            ValidationError::InvalidAge,
        ]
    );
}

#[test]
fn safe_reason_passes_round_trip() {
    let record = PatientRecord {
        consultation_reason: "<p>fine</p>".into(),
        ..full_record()
    };
    assert!(validate(&record).is_valid());
}

#[test]
fn unsafe_reason_reports_one_content_error() {
    let record = PatientRecord {
        consultation_reason: "<script>x</script>".into(),
        ..full_record()
    };
    let result = validate(&record);
    assert_eq!(
        result.errors(),
        &[ValidationError::UnsafeContent(Field::ConsultationReason)]
    );
    assert_eq!(
        result.messages(),
        vec!["Consultation reason contains content that is not allowed"]
    );
}

#[test]
fn unsafe_optional_rich_fields_are_reported() {
    let record = PatientRecord {
        diagnosis: Some(r#"<p onclick="x()">d</p>"#.into()),
        conclusions: Some(r#"<p style="position:fixed">c</p>"#.into()),
        ..full_record()
    };
    assert_eq!(
        validate(&record).into_errors(),
        vec![
            ValidationError::UnsafeContent(Field::Diagnosis),
            ValidationError::UnsafeContent(Field::Conclusions),
        ]
    );
}

#[test]
fn empty_record_reports_exactly_the_required_fields() {
    let result = validate(&PatientRecord::default());
    assert_eq!(
        result.messages(),
        vec![
            "Name is required",
            "Surname is required",
            "Email is required",
            "Consultation reason is required",
        ]
    );
}

#[test]
fn sanitized_record_passes_validation() {
    let dirty = PatientRecord {
        name: "<i>Ana</i>".into(),
        consultation_reason: r#"<p onclick="x()">cough</p><script>steal()</script>"#.into(),
        diagnosis: Some(r#"<span style="color: blue; position: fixed">ok</span>"#.into()),
        ..full_record()
    };
    let validator = FieldValidator::default();
    assert!(!validator.validate(&dirty).is_valid());

    let clean = validator.sanitize_record(&dirty);
    assert_eq!(clean.name, "iAna/i");
    assert_eq!(clean.consultation_reason, "<p>cough</p>steal()");
    assert_eq!(
        clean.diagnosis.as_deref(),
        Some(r#"<span style="color: blue">ok</span>"#)
    );
    assert!(validator.validate(&clean).is_valid());
}
