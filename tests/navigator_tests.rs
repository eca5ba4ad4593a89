use std::collections::BTreeSet;
use std::time::Duration;

use pokedex::navigator::{hold_for, Navigator, Transition, ViewState, TRANSITION_DELAY};
use pretty_assertions::assert_eq;

fn on_roster() -> Navigator {
    let mut nav = Navigator::new();
    assert!(nav.finish_loading());
    nav
}

fn open_detail(nav: &mut Navigator, name: &str) {
    let ticket = nav.request(Transition::OpenDetail(name.to_string())).unwrap();
    nav.settle(ticket).unwrap();
}

#[test]
fn starts_loading_and_finishes_once() {
    let mut nav = Navigator::new();
    assert_eq!(nav.view(), &ViewState::Loading);
    assert!(nav.finish_loading());
    assert_eq!(nav.view(), &ViewState::Roster);
    assert!(!nav.finish_loading());
}

#[test]
fn nothing_is_accepted_while_loading() {
    let mut nav = Navigator::new();
    assert_eq!(nav.request(Transition::OpenFilter), None);
    assert_eq!(nav.request(Transition::OpenDetail("a".to_string())), None);
}

#[test]
fn transition_commits_only_on_settle() {
    let mut nav = on_roster();
    let ticket = nav.request(Transition::OpenDetail("pikachu".to_string())).unwrap();

    assert!(nav.is_transitioning());
    assert_eq!(nav.view(), &ViewState::Roster);

    let committed = nav.settle(ticket);
    assert_eq!(committed, Some(Transition::OpenDetail("pikachu".to_string())));
    assert_eq!(
        nav.view(),
        &ViewState::Detail {
            name: "pikachu".to_string()
        }
    );
    assert!(!nav.is_transitioning());
}

#[test]
fn requests_refused_while_pending() {
    let mut nav = on_roster();
    nav.request(Transition::OpenFilter).unwrap();
    assert_eq!(nav.request(Transition::OpenDetail("a".to_string())), None);
}

#[test]
fn stale_ticket_is_ignored() {
    let mut nav = on_roster();
    let ticket = nav.request(Transition::OpenFilter).unwrap();
    assert_eq!(nav.settle(ticket + 1), None);
    assert!(nav.is_transitioning());
    assert_eq!(nav.settle(ticket), Some(Transition::OpenFilter));
    assert_eq!(nav.settle(ticket), None);
}

#[test]
fn self_click_is_refused() {
    let mut nav = on_roster();
    open_detail(&mut nav, "ivysaur");
    assert_eq!(nav.request(Transition::OpenDetail("ivysaur".to_string())), None);
    assert!(!nav.is_transitioning());
}

#[test]
fn detail_to_other_detail_is_allowed() {
    let mut nav = on_roster();
    open_detail(&mut nav, "ivysaur");
    open_detail(&mut nav, "venusaur");
    assert_eq!(
        nav.view(),
        &ViewState::Detail {
            name: "venusaur".to_string()
        }
    );
}

#[test]
fn invalid_transitions_are_refused() {
    let mut nav = on_roster();
    assert_eq!(nav.request(Transition::Back), None);
    assert_eq!(nav.request(Transition::ApplyCategories(BTreeSet::new())), None);

    let ticket = nav.request(Transition::OpenFilter).unwrap();
    nav.settle(ticket);
    assert_eq!(nav.request(Transition::OpenFilter), None);
    assert_eq!(nav.request(Transition::OpenDetail("a".to_string())), None);

    let ticket = nav.request(Transition::Back).unwrap();
    nav.settle(ticket);
    open_detail(&mut nav, "a");
    assert_eq!(nav.request(Transition::OpenFilter), None);
}

#[test]
fn apply_and_back_return_to_roster() {
    let mut nav = on_roster();
    let ticket = nav.request(Transition::OpenFilter).unwrap();
    nav.settle(ticket);

    let selection: BTreeSet<String> = ["fire".to_string()].into_iter().collect();
    let ticket = nav
        .request(Transition::ApplyCategories(selection.clone()))
        .unwrap();
    assert_eq!(nav.settle(ticket), Some(Transition::ApplyCategories(selection)));
    assert_eq!(nav.view(), &ViewState::Roster);

    open_detail(&mut nav, "a");
    let ticket = nav.request(Transition::Back).unwrap();
    nav.settle(ticket);
    assert_eq!(nav.view(), &ViewState::Roster);
}

#[tokio::test(start_paused = true)]
async fn hold_for_waits_out_the_minimum() {
    let started = tokio::time::Instant::now();
    let value = hold_for(TRANSITION_DELAY, async { 7 }).await;
    assert_eq!(value, 7);
    assert!(started.elapsed() >= TRANSITION_DELAY);
}

#[tokio::test(start_paused = true)]
async fn hold_for_does_not_extend_slow_work() {
    let started = tokio::time::Instant::now();
    let slow = Duration::from_millis(900);
    hold_for(TRANSITION_DELAY, tokio::time::sleep(slow)).await;
    let elapsed = started.elapsed();
    assert!(elapsed >= slow);
    assert!(elapsed < slow + TRANSITION_DELAY);
}
