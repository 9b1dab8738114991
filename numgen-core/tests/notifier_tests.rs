// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use numgen_core::{
    Notifier, NumGenError, RoundSink, Subscriber, SubscriberRef, Value, WeakNotifier,
};
use numgen_test_utils::recording::DeliveryLog;
use numgen_test_utils::{CollectingSink, RecordingSubscriber, ScriptedSource};
use std::cell::RefCell;
use std::rc::Rc;

fn scripted(values: &[Value]) -> (Notifier, ScriptedSource) {
    let source = ScriptedSource::new(values.iter().copied());
    (Notifier::new(source.clone()), source)
}

#[test]
fn test_attach_registers_subscriber() -> anyhow::Result<()> {
    // Arrange
    let (notifier, _) = scripted(&[1]);
    let recorder = RecordingSubscriber::new(&notifier, 0);

    // Act
    notifier.attach(recorder.clone())?;

    // Assert
    assert!(notifier.is_registered(&recorder));
    assert_eq!(notifier.subscriber_count(), 1);
    Ok(())
}

#[test]
fn test_attach_twice_is_rejected_and_registry_unchanged() -> anyhow::Result<()> {
    // Arrange
    let (notifier, _) = scripted(&[1]);
    let recorder = RecordingSubscriber::attach_to(&notifier, 0)?;

    // Act
    let err = notifier.attach(recorder.clone()).unwrap_err();

    // Assert
    assert_eq!(err, NumGenError::DuplicateSubscriber);
    assert_eq!(notifier.subscriber_count(), 1);
    Ok(())
}

#[test]
fn test_identity_is_by_instance_not_state() -> anyhow::Result<()> {
    // Arrange - two recorders with identical state
    let (notifier, _) = scripted(&[1]);
    let first = RecordingSubscriber::attach_to(&notifier, 0)?;
    let second = RecordingSubscriber::new(&notifier, 0);

    // Act
    notifier.attach(second.clone())?;

    // Assert
    assert!(notifier.is_registered(&first));
    assert!(notifier.is_registered(&second));
    assert_eq!(notifier.subscriber_count(), 2);
    Ok(())
}

#[test]
fn test_detach_unregistered_subscriber_fails() {
    // Arrange
    let (notifier, _) = scripted(&[1]);
    let recorder = RecordingSubscriber::new(&notifier, 0);

    // Act
    let err = notifier.detach(&recorder).unwrap_err();

    // Assert
    assert_eq!(err, NumGenError::NotRegistered);
}

#[test]
fn test_detach_twice_fails_second_time() -> anyhow::Result<()> {
    // Arrange
    let (notifier, _) = scripted(&[1]);
    let recorder = RecordingSubscriber::attach_to(&notifier, 0)?;

    // Act
    notifier.detach(&recorder)?;
    let err = notifier.detach(&recorder).unwrap_err();

    // Assert
    assert_eq!(err, NumGenError::NotRegistered);
    assert!(notifier.is_empty());
    Ok(())
}

#[test]
fn test_is_registered_on_empty_registry_is_false() {
    let (notifier, _) = scripted(&[1]);
    let recorder = RecordingSubscriber::new(&notifier, 0);

    assert!(!notifier.is_registered(&recorder));
}

#[test]
fn test_notify_all_delivers_in_registration_order() -> anyhow::Result<()> {
    // Arrange
    let (notifier, _) = scripted(&[1]);
    let log = DeliveryLog::default();
    for name in ["a", "b", "c"] {
        let recorder = RecordingSubscriber::named(&notifier, name, 0);
        recorder.borrow_mut().log_to(&log);
        notifier.attach(recorder)?;
    }

    // Act
    notifier.notify_all(42)?;

    // Assert
    assert_eq!(*log.borrow(), vec![("a", 42), ("b", 42), ("c", 42)]);
    Ok(())
}

#[test]
fn test_self_detach_mid_round_does_not_skip_or_repeat_others() -> anyhow::Result<()> {
    // Arrange - the middle subscriber leaves after its first value
    let (notifier, _) = scripted(&[1]);
    let log = DeliveryLog::default();
    let a = RecordingSubscriber::named(&notifier, "a", 0);
    let b = RecordingSubscriber::named(&notifier, "b", 1);
    let c = RecordingSubscriber::named(&notifier, "c", 0);
    for recorder in [&a, &b, &c] {
        recorder.borrow_mut().log_to(&log);
        notifier.attach(recorder.clone())?;
    }

    // Act
    notifier.notify_all(7)?;
    notifier.notify_all(8)?;

    // Assert
    assert_eq!(
        *log.borrow(),
        vec![("a", 7), ("b", 7), ("c", 7), ("a", 8), ("c", 8)]
    );
    assert!(!notifier.is_registered(&b));
    assert_eq!(notifier.subscriber_count(), 2);
    Ok(())
}

#[test]
fn test_every_subscriber_detaching_in_same_round_each_receives_once() -> anyhow::Result<()> {
    // Arrange
    let (notifier, _) = scripted(&[1]);
    let recorders: Vec<_> = (0..4)
        .map(|_| RecordingSubscriber::attach_to(&notifier, 1))
        .collect::<Result<_, _>>()?;

    // Act
    notifier.notify_all(3)?;

    // Assert
    assert!(notifier.is_empty());
    for recorder in &recorders {
        assert_eq!(recorder.borrow().values(), &[3]);
    }
    Ok(())
}

#[test]
fn test_subscriber_detached_by_earlier_one_is_skipped() -> anyhow::Result<()> {
    // Arrange - "a" detaches "b" before b's turn
    let (notifier, _) = scripted(&[1]);
    let a = RecordingSubscriber::attach_to(&notifier, 0)?;
    let b = RecordingSubscriber::attach_to(&notifier, 0)?;
    let c = RecordingSubscriber::attach_to(&notifier, 0)?;
    a.borrow_mut().detach_on_first_delivery(&b);

    // Act
    notifier.notify_all(5)?;

    // Assert
    assert_eq!(a.borrow().values(), &[5]);
    assert!(b.borrow().values().is_empty());
    assert_eq!(c.borrow().values(), &[5]);
    assert!(!notifier.is_registered(&b));
    Ok(())
}

#[test]
fn test_subscriber_attached_mid_round_waits_for_next_round() -> anyhow::Result<()> {
    // Arrange
    let (notifier, _) = scripted(&[1]);
    let late = RecordingSubscriber::new(&notifier, 0);
    let late_handle: SubscriberRef = late.clone();
    let attacher = {
        let notifier = notifier.clone();
        let mut pending = Some(late_handle);
        Rc::new(RefCell::new(move |_: Value| -> numgen_core::Result<()> {
            if let Some(late) = pending.take() {
                notifier.attach(late)?;
            }
            Ok(())
        }))
    };
    notifier.attach(attacher)?;

    // Act
    notifier.notify_all(1)?;
    notifier.notify_all(2)?;

    // Assert
    assert_eq!(late.borrow().values(), &[2]);
    Ok(())
}

#[test]
fn test_handler_error_propagates() -> anyhow::Result<()> {
    // Arrange
    let (notifier, _) = scripted(&[1]);
    let failing = Rc::new(RefCell::new(|_: Value| -> numgen_core::Result<()> {
        Err(NumGenError::invalid_argument("boom"))
    }));
    let after = RecordingSubscriber::new(&notifier, 0);
    notifier.attach(failing)?;
    notifier.attach(after.clone())?;

    // Act
    let err = notifier.notify_all(1).unwrap_err();

    // Assert - the round stopped at the failing handler
    assert!(matches!(err, NumGenError::InvalidArgument { .. }));
    assert!(after.borrow().values().is_empty());
    Ok(())
}

struct Reentrant {
    notifier: Notifier,
}

impl Subscriber for Reentrant {
    fn on_next(&mut self, value: Value) -> numgen_core::Result<()> {
        self.notifier.notify_all(value)
    }
}

#[test]
fn test_reentrant_notify_is_invalid_operation() -> anyhow::Result<()> {
    // Arrange
    let (notifier, _) = scripted(&[1]);
    notifier.attach(Rc::new(RefCell::new(Reentrant {
        notifier: notifier.clone(),
    })))?;

    // Act
    let err = notifier.notify_all(1).unwrap_err();

    // Assert
    assert!(err.is_internal_fault());
    Ok(())
}

#[test]
fn test_run_with_no_subscribers_draws_nothing() -> anyhow::Result<()> {
    // Arrange
    let (notifier, source) = scripted(&[1, 2, 3]);

    // Act
    let rounds = notifier.run()?;

    // Assert
    assert_eq!(rounds, 0);
    assert_eq!(source.drawn(), 0);
    assert!(!notifier.is_running());
    Ok(())
}

#[test]
fn test_run_with_single_one_shot_subscriber_draws_exactly_once() -> anyhow::Result<()> {
    // Arrange
    let (notifier, source) = scripted(&[9, 8, 7]);
    let recorder = RecordingSubscriber::attach_to(&notifier, 1)?;

    // Act
    let rounds = notifier.run()?;

    // Assert
    assert_eq!(rounds, 1);
    assert_eq!(source.drawn(), 1);
    assert_eq!(recorder.borrow().values(), &[9]);
    assert!(notifier.is_empty());
    Ok(())
}

#[test]
fn test_run_continues_until_last_subscriber_leaves() -> anyhow::Result<()> {
    // Arrange
    let (notifier, source) = scripted(&[1, 2, 3, 4, 5, 6]);
    let short = RecordingSubscriber::attach_to(&notifier, 2)?;
    let long = RecordingSubscriber::attach_to(&notifier, 5)?;

    // Act
    let rounds = notifier.run()?;

    // Assert
    assert_eq!(rounds, 5);
    assert_eq!(source.drawn(), 5);
    assert_eq!(short.borrow().values(), &[1, 2]);
    assert_eq!(long.borrow().values(), &[1, 2, 3, 4, 5]);
    assert!(!short.borrow().is_attached());
    assert!(!long.borrow().is_attached());
    Ok(())
}

#[test]
fn test_subscriber_state_survives_detachment() -> anyhow::Result<()> {
    // Arrange
    let (notifier, _) = scripted(&[4, 2]);
    let recorder = RecordingSubscriber::attach_to(&notifier, 2)?;

    // Act
    notifier.run()?;
    drop(notifier);

    // Assert
    assert_eq!(recorder.borrow().values(), &[4, 2]);
    Ok(())
}

#[test]
fn test_step_on_empty_registry_returns_none() -> anyhow::Result<()> {
    let (notifier, source) = scripted(&[1]);

    assert_eq!(notifier.step()?, None);
    assert_eq!(source.drawn(), 0);
    Ok(())
}

#[test]
fn test_step_produces_one_round() -> anyhow::Result<()> {
    // Arrange
    let (notifier, _) = scripted(&[11, 12]);
    let recorder = RecordingSubscriber::attach_to(&notifier, 0)?;

    // Act
    let first = notifier.step()?;
    let second = notifier.step()?;

    // Assert
    assert_eq!(first, Some(11));
    assert_eq!(second, Some(12));
    assert_eq!(recorder.borrow().values(), &[11, 12]);
    Ok(())
}

struct NestedRunner {
    notifier: Notifier,
}

impl Subscriber for NestedRunner {
    fn on_next(&mut self, _value: Value) -> numgen_core::Result<()> {
        self.notifier.run().map(drop)
    }
}

#[test]
fn test_nested_run_is_rejected() -> anyhow::Result<()> {
    // Arrange
    let (notifier, _) = scripted(&[1]);
    notifier.attach(Rc::new(RefCell::new(NestedRunner {
        notifier: notifier.clone(),
    })))?;
    let stopper = RecordingSubscriber::attach_to(&notifier, 1)?;

    // Act
    let err = notifier.run().unwrap_err();

    // Assert
    assert!(err.is_internal_fault());
    assert!(stopper.borrow().values().is_empty());
    assert!(!notifier.is_running());
    Ok(())
}

#[test]
fn test_sink_observes_values_and_run_end() -> anyhow::Result<()> {
    // Arrange
    let sink = CollectingSink::new();
    let notifier = Notifier::new(ScriptedSource::new([5, 6, 7])).with_sink(sink.clone());
    RecordingSubscriber::attach_to(&notifier, 3)?;

    // Act
    notifier.run()?;

    // Assert
    assert_eq!(sink.values(), vec![5, 6, 7]);
    assert_eq!(sink.runs(), vec![3]);
    Ok(())
}

#[test]
fn test_value_source_may_query_notifier() -> anyhow::Result<()> {
    // Arrange
    let handle = Rc::new(RefCell::new(WeakNotifier::default()));
    let counts = Rc::new(RefCell::new(Vec::new()));
    let notifier = Notifier::new({
        let handle = handle.clone();
        let counts = counts.clone();
        move || {
            let notifier = handle.borrow().upgrade();
            let count = notifier.map_or(0, |notifier| notifier.subscriber_count());
            counts.borrow_mut().push(count);
            7
        }
    });
    *handle.borrow_mut() = notifier.downgrade();
    let recorder = RecordingSubscriber::attach_to(&notifier, 2)?;

    // Act
    let rounds = notifier.run()?;

    // Assert
    assert_eq!(rounds, 2);
    assert_eq!(*counts.borrow(), vec![1, 1]);
    assert_eq!(recorder.borrow().values(), vec![7, 7]);
    Ok(())
}

#[test]
fn test_value_source_stepping_notifier_is_invalid_operation() -> anyhow::Result<()> {
    // Arrange
    let handle = Rc::new(RefCell::new(WeakNotifier::default()));
    let nested = Rc::new(RefCell::new(Vec::new()));
    let notifier = Notifier::new({
        let handle = handle.clone();
        let nested = nested.clone();
        move || {
            if let Some(notifier) = handle.borrow().upgrade() {
                nested.borrow_mut().push(notifier.step());
            }
            3
        }
    });
    *handle.borrow_mut() = notifier.downgrade();
    let recorder = RecordingSubscriber::attach_to(&notifier, 1)?;

    // Act
    let value = notifier.step()?;

    // Assert
    assert_eq!(value, Some(3));
    assert_eq!(recorder.borrow().values(), vec![3]);
    let nested = nested.borrow();
    assert_eq!(nested.len(), 1);
    assert!(matches!(
        nested[0],
        Err(NumGenError::InvalidOperation { .. })
    ));
    Ok(())
}

struct QueryingSink {
    notifier: WeakNotifier,
    seen: Rc<RefCell<Vec<(usize, bool)>>>,
}

impl RoundSink for QueryingSink {
    fn value_generated(&mut self, _value: Value) {
        if let Some(notifier) = self.notifier.upgrade() {
            self.seen
                .borrow_mut()
                .push((notifier.subscriber_count(), notifier.is_running()));
        }
    }

    fn run_finished(&mut self, _rounds: u64) {
        if let Some(notifier) = self.notifier.upgrade() {
            self.seen
                .borrow_mut()
                .push((notifier.subscriber_count(), notifier.is_running()));
        }
    }
}

#[test]
fn test_sink_may_query_notifier() -> anyhow::Result<()> {
    // Arrange
    let seen = Rc::new(RefCell::new(Vec::new()));
    let notifier = Notifier::new(ScriptedSource::new([1, 2]));
    let notifier = notifier.clone().with_sink(QueryingSink {
        notifier: notifier.downgrade(),
        seen: seen.clone(),
    });
    RecordingSubscriber::attach_to(&notifier, 2)?;

    // Act
    notifier.run()?;

    // Assert
    assert_eq!(*seen.borrow(), vec![(1, true), (1, true), (0, false)]);
    Ok(())
}
