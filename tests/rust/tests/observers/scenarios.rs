//! Lifecycle scenarios for the extended observer list

use pretty_assertions::assert_eq;
use std::rc::Rc;

use tests::{regions, Call, CallLog, ExtendedObserverList, Hook, RecordingObserver};

#[test]
fn removed_observer_misses_close_contents() {
    let log = CallLog::new();
    let list = ExtendedObserverList::new();
    let a = RecordingObserver::new("a", &log);
    let b = RecordingObserver::new("b", &log);
    let c = RecordingObserver::new("c", &log);
    list.add_observer(&a);
    list.add_observer(&b);
    list.add_observer(&c);

    list.remove_observer(&*b);
    list.notify_close_contents();

    assert_eq!(
        log.calls(),
        vec![
            Call::new("a", Hook::CloseContents),
            Call::new("c", Hook::CloseContents),
        ]
    );
}

#[test]
fn observer_removing_itself_on_renderer_responsive() {
    let log = CallLog::new();
    let list = Rc::new(ExtendedObserverList::new());
    let a = RecordingObserver::new("a", &log);
    list.add_observer(&a);

    let handle = Rc::clone(&list);
    a.on_hook(move |me, hook| {
        if hook == Hook::RendererResponsive {
            handle.remove_observer(me);
        }
    });

    list.notify_renderer_responsive();
    assert_eq!(log.calls(), vec![Call::new("a", Hook::RendererResponsive)]);

    list.notify_renderer_responsive();
    assert_eq!(log.count_for("a"), 1);
    assert!(list.is_empty());
}

#[test]
fn empty_regions_with_no_observers() {
    let list = ExtendedObserverList::new();
    list.notify_draggable_regions_updated(&[]);
    assert!(list.is_empty());
}

#[test]
fn regions_are_passed_through() {
    let log = CallLog::new();
    let list = ExtendedObserverList::new();
    let a = RecordingObserver::new("a", &log);
    list.add_observer(&a);

    list.notify_draggable_regions_updated(&regions::title_bar(800));
    list.notify_draggable_regions_updated(&[]);

    assert_eq!(
        log.calls(),
        vec![
            Call::new("a", Hook::DraggableRegionsUpdated(2)),
            Call::new("a", Hook::DraggableRegionsUpdated(0)),
        ]
    );
}
