use crate::harness::{Control, ListId, Page, Scenario, SignalId};
use converge_core::WaitConfig;
use std::time::Duration;

#[test]
fn test_offline_backend_times_out_list_wait() {
    let error = Scenario::new("offline_list")
        .already_started()
        .disconnect_backend()
        .open(Page::Subscriptions)
        .wait_for_list(ListId::SubscribedChannels)
        .within(Duration::from_secs(2))
        .assert_list_count(ListId::SubscribedChannels, 5)
        .run()
        .expect_timeout_at(2);

    assert!(error.contains("list `subscribed_channels_list` was not populated"));
    assert!(error.contains("20 ticks"));
}

#[test]
fn test_timeout_aborts_only_its_own_scenario() {
    let failed = Scenario::new("offline_settings")
        .already_started()
        .disconnect_backend()
        .open(Page::Settings)
        .wait_for_settings()
        .run();
    assert!(failed.timed_out);
    // Default timeout: 10s of 100ms ticks.
    assert_eq!(failed.elapsed, Duration::from_secs(10));

    Scenario::new("online_settings")
        .already_started()
        .open(Page::Settings)
        .wait_for_settings()
        .run()
        .expect("a fresh scenario is unaffected by the previous timeout");
}

#[test]
fn test_notification_fired_while_idle_is_missed() {
    let error = Scenario::new("missed_notification")
        .open(Page::Subscriptions)
        .wait_for_list(ListId::SubscribedChannels)
        .click(Control::ToggleSubscription(0))
        .idle(Duration::from_secs(1))
        .wait_for_signal(SignalId::UnsubscribedChannel)
        .within(Duration::from_secs(1))
        .run()
        .expect_timeout_at(4);

    assert!(error.contains("signal `unsubscribed_channel` was not raised"));
}

#[test]
fn test_armed_notification_survives_idle() {
    Scenario::new("armed_notification")
        .open(Page::Subscriptions)
        .wait_for_list(ListId::SubscribedChannels)
        .arm_signal(SignalId::UnsubscribedChannel)
        .click(Control::ToggleSubscription(0))
        .idle(Duration::from_secs(1))
        .await_signal(SignalId::UnsubscribedChannel)
        .assert_last_wait_ticks(1)
        .run()
        .unwrap();
}

#[test]
fn test_unknown_path_fails_fast() {
    let result = Scenario::new("unknown_path")
        .already_started()
        .wait_for_value("downloads_page.dowloads")
        .run();

    assert!(!result.success);
    assert!(!result.timed_out);
    assert_eq!(result.elapsed, Duration::ZERO);
    assert!(result.error.unwrap_or_default().contains("dowloads"));
}

#[test]
fn test_custom_poll_interval() {
    let config = WaitConfig {
        timeout_secs: 1,
        poll_interval_ms: 250,
    };
    let error = Scenario::new("coarse_ticks")
        .with_config(config)
        .already_started()
        .disconnect_backend()
        .open(Page::Downloads)
        .wait_for_value("downloads_page.downloads")
        .run()
        .expect_timeout_at(2);

    assert!(error.contains("(4 ticks)"));
}

#[test]
fn test_slow_startup_fails_before_first_step() {
    let config = WaitConfig {
        timeout_secs: 1,
        poll_interval_ms: 100,
    };
    let result = Scenario::new("slow_startup")
        .with_config(config)
        .open(Page::Home)
        .run();

    assert!(!result.success);
    assert!(result.timed_out);
    assert_eq!(result.steps_executed, 0);
}

#[test]
fn test_startup_notification_is_not_replayed() {
    let error = Scenario::new("startup_replay")
        .wait_for_signal(SignalId::TriblerStarted)
        .within(Duration::from_secs(1))
        .run()
        .expect_timeout_at(0);

    assert!(error.contains("signal `tribler_started` was not raised"));
}

#[test]
fn test_wait_exceeding_tick_budget_fails_assertion() {
    let result = Scenario::new("tick_budget")
        .already_started()
        .open(Page::Settings)
        .wait_for_settings()
        .assert_last_wait_ticks_at_most(3)
        .run();

    assert!(!result.success);
    assert!(!result.timed_out);
    assert_eq!(result.failure_step, Some(2));
}
