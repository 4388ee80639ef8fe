//! Tests for list mutation from inside a broadcast

use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;

use tests::{
    init_test_tracing, Call, CallLog, ExtendedObserverList, Hook, ObserverListConfig,
    ObserverListPolicy, RecordingObserver,
};

fn three(log: &CallLog) -> [Rc<RecordingObserver>; 3] {
    [
        RecordingObserver::new("a", log),
        RecordingObserver::new("b", log),
        RecordingObserver::new("c", log),
    ]
}

fn list_with(
    policy: ObserverListPolicy,
    observers: &[Rc<RecordingObserver>],
) -> Rc<ExtendedObserverList> {
    let list = Rc::new(ExtendedObserverList::with_config(
        ObserverListConfig::default().with_policy(policy),
    ));
    for observer in observers {
        list.add_observer(observer);
    }
    list
}

#[test]
fn self_removal_fires_once_and_skips_nobody() {
    let log = CallLog::new();
    let [a, b, c] = three(&log);
    let list = list_with(
        ObserverListPolicy::ExistingOnly,
        &[a.clone(), b.clone(), c.clone()],
    );

    let handle = Rc::clone(&list);
    b.on_hook(move |me, _| handle.remove_observer(me));

    list.notify_close_contents();
    assert_eq!(log.observers(), vec!["a", "b", "c"]);

    log.clear();
    list.notify_close_contents();
    assert_eq!(log.observers(), vec!["a", "c"]);
}

#[test]
fn removing_observer_ahead_of_cursor_skips_it() {
    let log = CallLog::new();
    let [a, b, c] = three(&log);
    let list = list_with(
        ObserverListPolicy::ExistingOnly,
        &[a.clone(), b.clone(), c.clone()],
    );

    let handle = Rc::clone(&list);
    let target = Rc::clone(&c);
    a.on_hook(move |_, _| handle.remove_observer(&*target));

    list.notify_renderer_responsive();
    assert_eq!(log.observers(), vec!["a", "b"]);
    assert_eq!(list.len(), 2);
}

#[test]
fn removing_observer_behind_cursor_affects_next_pass_only() {
    let log = CallLog::new();
    let [a, b, c] = three(&log);
    let list = list_with(
        ObserverListPolicy::ExistingOnly,
        &[a.clone(), b.clone(), c.clone()],
    );

    let handle = Rc::clone(&list);
    let target = Rc::clone(&a);
    c.on_hook(move |_, _| handle.remove_observer(&*target));

    list.notify_renderer_responsive();
    assert_eq!(log.observers(), vec!["a", "b", "c"]);

    log.clear();
    list.notify_renderer_responsive();
    assert_eq!(log.observers(), vec!["b", "c"]);
}

#[test]
fn existing_only_defers_mid_pass_additions() {
    let log = CallLog::new();
    let [a, b, late] = three(&log);
    let list = list_with(ObserverListPolicy::ExistingOnly, &[a.clone(), b.clone()]);

    let handle = Rc::clone(&list);
    let newcomer = Rc::clone(&late);
    a.on_hook(move |_, _| handle.add_observer(&newcomer));

    list.notify_close_contents();
    assert_eq!(log.observers(), vec!["a", "b"]);

    log.clear();
    list.notify_close_contents();
    assert_eq!(log.observers(), vec!["a", "b", "c"]);
}

#[test]
fn all_observers_includes_mid_pass_additions_once() {
    let log = CallLog::new();
    let [a, b, late] = three(&log);
    let list = list_with(ObserverListPolicy::AllObservers, &[a.clone(), b.clone()]);

    // Both existing observers try to add the newcomer
    for observer in [&a, &b] {
        let handle = Rc::clone(&list);
        let newcomer = Rc::clone(&late);
        observer.on_hook(move |_, _| handle.add_observer(&newcomer));
    }

    list.notify_close_contents();
    assert_eq!(log.observers(), vec!["a", "b", "c"]);
}

#[test]
fn remove_then_readd_mid_pass_never_duplicates() {
    for policy in [ObserverListPolicy::ExistingOnly, ObserverListPolicy::AllObservers] {
        let log = CallLog::new();
        let [a, b, c] = three(&log);
        let list = list_with(policy, &[a.clone(), b.clone(), c.clone()]);

        let handle = Rc::clone(&list);
        let target = Rc::clone(&b);
        a.on_hook(move |_, _| {
            handle.remove_observer(&*target);
            handle.add_observer(&target);
        });

        list.notify_renderer_responsive();
        let expected = match policy {
            ObserverListPolicy::ExistingOnly => vec!["a", "c"],
            ObserverListPolicy::AllObservers => vec!["a", "c", "b"],
        };
        assert_eq!(log.observers(), expected, "policy {:?}", policy);
        assert_eq!(list.len(), 3);
    }
}

#[test]
fn clear_during_pass_stops_delivery() {
    let log = CallLog::new();
    let [a, b, c] = three(&log);
    let list = list_with(
        ObserverListPolicy::ExistingOnly,
        &[a.clone(), b.clone(), c.clone()],
    );

    let handle = Rc::clone(&list);
    a.on_hook(move |_, _| handle.clear());

    list.notify_close_contents();
    assert_eq!(log.observers(), vec!["a"]);
    assert!(list.is_empty());
}

#[test]
fn nested_broadcast_reaches_everyone() {
    let log = CallLog::new();
    let [a, b, c] = three(&log);
    let list = list_with(
        ObserverListPolicy::ExistingOnly,
        &[a.clone(), b.clone(), c.clone()],
    );

    // A nested pass in which c removes itself
    let nested = Rc::clone(&list);
    a.on_hook(move |_, hook| {
        if hook == Hook::RendererResponsive {
            nested.notify_close_contents();
        }
    });
    let handle = Rc::clone(&list);
    c.on_hook(move |me, hook| {
        if hook == Hook::CloseContents {
            handle.remove_observer(me);
        }
    });

    list.notify_renderer_responsive();
    assert_eq!(
        log.calls(),
        vec![
            Call::new("a", Hook::RendererResponsive),
            Call::new("a", Hook::CloseContents),
            Call::new("b", Hook::CloseContents),
            Call::new("c", Hook::CloseContents),
            Call::new("b", Hook::RendererResponsive),
        ]
    );
    assert_eq!(list.len(), 2);
}

#[test]
fn observer_dropped_without_removal_is_skipped() {
    init_test_tracing();

    let log = CallLog::new();
    let [a, b, c] = three(&log);
    let list = list_with(
        ObserverListPolicy::ExistingOnly,
        &[a.clone(), b.clone(), c.clone()],
    );

    drop(b);
    assert_eq!(list.len(), 2);

    list.notify_renderer_responsive();
    assert_eq!(log.observers(), vec!["a", "c"]);

    // The dead slot was pruned, so the list keeps working normally
    list.remove_observer(&*a);
    list.notify_renderer_responsive();
    assert_eq!(log.observers(), vec!["a", "c", "c"]);
}

#[test]
fn owner_dropping_observer_during_pass_is_safe() {
    init_test_tracing();

    let log = CallLog::new();
    let list = Rc::new(ExtendedObserverList::new());
    let a = RecordingObserver::new("a", &log);
    let owned: Rc<RefCell<Option<Rc<RecordingObserver>>>> =
        Rc::new(RefCell::new(Some(RecordingObserver::new("b", &log))));
    let c = RecordingObserver::new("c", &log);

    list.add_observer(&a);
    if let Some(b) = owned.borrow().as_ref() {
        list.add_observer(b);
    }
    list.add_observer(&c);

    let owner = Rc::clone(&owned);
    a.on_hook(move |_, _| {
        owner.borrow_mut().take();
    });

    list.notify_draggable_regions_updated(&[]);
    assert_eq!(log.observers(), vec!["a", "c"]);
    assert_eq!(list.len(), 2);
}

#[test]
fn one_shot_hook_can_retire_its_own_action() {
    let log = CallLog::new();
    let [a, b, c] = three(&log);
    let list = list_with(
        ObserverListPolicy::ExistingOnly,
        &[a.clone(), b.clone(), c.clone()],
    );

    // First broadcast detaches c, then the action hands over to a quieter one
    let handle = Rc::clone(&list);
    let target = Rc::clone(&c);
    a.on_hook(move |me, _| {
        handle.remove_observer(&*target);
        me.on_hook(|me, _| me.clear_action());
    });

    list.notify_renderer_responsive();
    list.notify_renderer_responsive();
    list.notify_renderer_responsive();

    assert_eq!(log.observers(), vec!["a", "b", "a", "b", "a", "b"]);
    assert!(!list.has_observer(&*c));
}
