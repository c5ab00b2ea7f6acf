//! End-to-end flow through the composition root: config -> state -> render.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use dotprom_exporter::{app_state::AppState, config};

#[test]
fn observations_surface_in_rendered_exposition() {
    let cfg = config::load_from_str(
        r#"
version: 1
exporter:
  namespace: "thumbor"
"#,
    )
    .expect("must parse");
    let state = AppState::new(cfg).expect("state build failed");

    state.record_count("response.status.200");
    state.record_count("response.status.200");
    state.record_count("response.status.404");
    state.record_timing("response.time.200_jpg", 40.0);
    state.record_count("not.in.the.table");

    let text = state.registry().render();
    assert!(text.contains("thumbor_counter_response_status{statuscode=\"200\"} 2"));
    assert!(text.contains("thumbor_counter_response_status{statuscode=\"404\"} 1"));
    assert!(text.contains("thumbor_timer_response_time_count{statuscode_extension=\"200_jpg\"} 1"));
    assert!(text.contains("thumbor_timer_response_time_sum{statuscode_extension=\"200_jpg\"} 40"));
    assert!(!text.contains("not_in_the_table"));
}

#[test]
fn shared_handles_converge_on_one_registry() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    let state = AppState::new(cfg).expect("state build failed");
    let clone = state.clone();

    state.record_count("response.status.200");
    clone.record_count("response.status.200");

    let fam = state.registry().counter_family("dotprom_counter_response_status").unwrap();
    assert_eq!(fam.value(&["200"]), Some(2));
    assert_eq!(state.registry().counter_family_count(), 1);
}
