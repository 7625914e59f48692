use super::*;
use std::time::Duration;
use tokio::time::sleep;

fn controller() -> ViewController {
    ViewController::new(DEFAULT_TRANSITION)
}

#[test]
fn starts_idle_on_home() {
    let nav = controller();
    let state = nav.snapshot();
    assert_eq!(state.current, View::Home);
    assert!(!state.is_transitioning());
    assert_eq!(state.phase(), Phase::Idle(View::Home));
    assert!(state.selected_entity_id.is_none());
}

#[tokio::test(start_paused = true)]
async fn transitioning_holds_until_commit_delay_elapses() {
    let nav = controller();
    nav.navigate(View::Academics, NavParams::none());

    let state = nav.snapshot();
    assert!(state.is_transitioning());
    assert_eq!(
        state.phase(),
        Phase::Transitioning {
            current: View::Home,
            target: View::Academics
        }
    );

    sleep(Duration::from_millis(299)).await;
    assert!(nav.is_transitioning());
    assert_eq!(nav.current(), View::Home);

    sleep(Duration::from_millis(2)).await;
    assert!(!nav.is_transitioning());
    assert_eq!(nav.current(), View::Academics);
}

#[tokio::test(start_paused = true)]
async fn commit_records_entity_id_and_resets_scroll() {
    let nav = controller();
    nav.set_scroll_offset(840);
    nav.navigate(View::DepartmentDetail, NavParams::with_id("2"));
    assert_eq!(nav.snapshot().scroll_offset, 840);

    let state = nav.settled().await;
    assert_eq!(state.current, View::DepartmentDetail);
    assert_eq!(state.selected_entity_id.as_deref(), Some("2"));
    assert_eq!(state.scroll_offset, 0);
}

#[tokio::test(start_paused = true)]
async fn renavigating_to_current_view_replays_transition() {
    let nav = controller();
    nav.navigate(View::Home, NavParams::none());
    assert!(nav.is_transitioning());

    let state = nav.settled().await;
    assert_eq!(state.current, View::Home);
    assert!(!state.is_transitioning());
}

#[tokio::test(start_paused = true)]
async fn last_known_entity_survives_parameterless_visit_and_fragment_back() {
    let nav = controller();
    nav.navigate(View::DepartmentDetail, NavParams::with_id("2"));
    nav.settled().await;
    nav.navigate(View::Academics, NavParams::none());
    nav.settled().await;
    assert_eq!(nav.current(), View::Academics);

    assert_eq!(
        nav.on_location_changed("#/department-detail"),
        Some(View::DepartmentDetail)
    );
    let state = nav.snapshot();
    assert_eq!(state.current, View::DepartmentDetail);
    assert_eq!(state.selected_entity_id.as_deref(), Some("2"));
    assert!(!state.is_transitioning());
}

#[tokio::test(start_paused = true)]
async fn newer_navigation_supersedes_pending_one() {
    let nav = controller();
    nav.navigate(View::Admissions, NavParams::none());
    sleep(Duration::from_millis(100)).await;
    nav.navigate(View::Portal, NavParams::none());

    // The first request's timer would have fired at 300ms.
    sleep(Duration::from_millis(250)).await;
    assert!(nav.is_transitioning());
    assert_eq!(nav.current(), View::Home);

    sleep(Duration::from_millis(51)).await;
    assert!(!nav.is_transitioning());
    assert_eq!(nav.current(), View::Portal);

    sleep(Duration::from_secs(1)).await;
    assert_eq!(nav.current(), View::Portal);
}

#[tokio::test(start_paused = true)]
async fn back_to_back_requests_settle_on_the_later_target() {
    let nav = controller();
    nav.navigate(View::DepartmentDetail, NavParams::with_id("1"));
    nav.navigate(View::Academics, NavParams::none());

    let state = nav.settled().await;
    assert_eq!(state.current, View::Academics);
    // The superseded request never committed, so its id was never recorded.
    assert!(state.selected_entity_id.is_none());
}

#[tokio::test(start_paused = true)]
async fn transitioning_flag_tracks_every_request_in_a_sequence() {
    let nav = controller();
    let targets = [View::Academics, View::DepartmentDetail, View::Portal, View::Home];
    for target in targets {
        nav.navigate(target, NavParams::with_id("4"));
        assert!(nav.is_transitioning());
        sleep(Duration::from_millis(150)).await;
        assert!(nav.is_transitioning());
        sleep(Duration::from_millis(151)).await;
        assert!(!nav.is_transitioning());
        assert_eq!(nav.current(), target);
    }
}

#[tokio::test(start_paused = true)]
async fn fragment_change_cancels_pending_navigation() {
    let nav = controller();
    nav.navigate(View::Portal, NavParams::none());
    assert_eq!(nav.on_location_changed("#/admissions"), Some(View::Admissions));
    assert!(!nav.is_transitioning());

    sleep(Duration::from_secs(1)).await;
    assert_eq!(nav.current(), View::Admissions);
}

#[tokio::test(start_paused = true)]
async fn unrecognized_fragment_is_ignored() {
    let nav = controller();
    nav.navigate(View::Academics, NavParams::none());
    nav.settled().await;

    assert_eq!(nav.on_location_changed("#/research"), None);
    assert_eq!(nav.on_location_changed("#/unknown"), None);
    assert_eq!(nav.current(), View::Academics);
}

#[tokio::test(start_paused = true)]
async fn unknown_token_falls_back_to_home() {
    let nav = controller();
    nav.navigate(View::Portal, NavParams::none());
    nav.settled().await;

    assert_eq!(nav.navigate_token("library", NavParams::none()), View::Home);
    assert_eq!(nav.settled().await.current, View::Home);

    assert_eq!(nav.navigate_token("", NavParams::none()), View::Home);
    assert_eq!(
        nav.navigate_token("department-detail", NavParams::with_id("3")),
        View::DepartmentDetail
    );
    let state = nav.settled().await;
    assert_eq!(state.current, View::DepartmentDetail);
    assert_eq!(state.selected_entity_id.as_deref(), Some("3"));
}

#[tokio::test(start_paused = true)]
async fn subscribers_observe_both_phases() {
    let nav = controller();
    let mut rx = nav.subscribe();
    nav.navigate(View::Admissions, NavParams::none());

    rx.changed().await.unwrap();
    assert!(rx.borrow_and_update().is_transitioning());

    rx.changed().await.unwrap();
    let state = rx.borrow_and_update().clone();
    assert_eq!(state.phase(), Phase::Idle(View::Admissions));
}

#[test]
fn navigation_without_runtime_commits_immediately() {
    let nav = controller();
    nav.navigate(View::Portal, NavParams::with_id("9"));
    let state = nav.snapshot();
    assert_eq!(state.current, View::Portal);
    assert!(!state.is_transitioning());
    assert_eq!(state.selected_entity_id.as_deref(), Some("9"));
}

#[test]
fn racing_requests_from_two_threads_always_settle() {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_time()
        .build()
        .unwrap();

    for _ in 0..500 {
        let nav = ViewController::new(Duration::from_millis(1));
        let barrier = std::sync::Arc::new(std::sync::Barrier::new(2));
        let threads: Vec<_> = [View::Academics, View::Portal]
            .into_iter()
            .map(|view| {
                let nav = nav.clone();
                let barrier = std::sync::Arc::clone(&barrier);
                let handle = runtime.handle().clone();
                std::thread::spawn(move || {
                    let _entered = handle.enter();
                    barrier.wait();
                    nav.navigate(view, NavParams::none());
                })
            })
            .collect();
        for thread in threads {
            thread.join().unwrap();
        }

        let state = runtime
            .block_on(async { tokio::time::timeout(Duration::from_secs(1), nav.settled()).await })
            .expect("a pending navigation was left without a commit");
        assert!(matches!(state.current, View::Academics | View::Portal));
        assert!(!state.is_transitioning());
    }
}

#[test]
fn fragment_racing_a_request_leaves_no_stale_pending() {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_time()
        .build()
        .unwrap();

    for _ in 0..500 {
        let nav = ViewController::new(Duration::from_millis(1));
        let barrier = std::sync::Arc::new(std::sync::Barrier::new(2));
        let requester = {
            let nav = nav.clone();
            let barrier = std::sync::Arc::clone(&barrier);
            let handle = runtime.handle().clone();
            std::thread::spawn(move || {
                let _entered = handle.enter();
                barrier.wait();
                nav.navigate(View::Academics, NavParams::none());
            })
        };
        barrier.wait();
        nav.on_location_changed("#/portal");
        requester.join().unwrap();

        let state = runtime
            .block_on(async { tokio::time::timeout(Duration::from_secs(1), nav.settled()).await })
            .expect("a pending navigation was left without a commit");
        assert!(!state.is_transitioning());
    }
}
