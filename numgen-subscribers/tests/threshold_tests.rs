// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use numgen_core::{Notifier, NumGenError, Subscriber};
use numgen_subscribers::{Threshold, ThresholdSubscriber};
use numgen_test_utils::ScriptedSource;

#[test]
fn test_detaches_exactly_after_kth_value() -> anyhow::Result<()> {
    for k in [1_u64, 5, 100] {
        // Arrange
        let notifier = Notifier::new(ScriptedSource::new([1]));
        let subscriber = ThresholdSubscriber::attach_to(&notifier, k)?;

        // Act & Assert - still attached before the k-th value
        for delivered in 1..k {
            notifier.notify_all(1)?;
            assert_eq!(subscriber.borrow().received_count(), delivered);
            assert!(subscriber.borrow().is_attached(), "left early at {delivered}");
        }

        notifier.notify_all(1)?;
        assert_eq!(subscriber.borrow().received_count(), k);
        assert!(!notifier.is_registered(&subscriber));

        // Nothing further reaches it
        notifier.notify_all(1)?;
        assert_eq!(subscriber.borrow().received_count(), k);
    }
    Ok(())
}

#[test]
fn test_run_stops_after_wait_for_count_rounds() -> anyhow::Result<()> {
    // Arrange
    let source = ScriptedSource::new([4, 8, 15, 16, 23, 42]);
    let notifier = Notifier::new(source.clone());
    let subscriber = ThresholdSubscriber::attach_to(&notifier, 4)?;

    // Act
    let rounds = notifier.run()?;

    // Assert
    assert_eq!(rounds, 4);
    assert_eq!(source.drawn(), 4);
    assert_eq!(subscriber.borrow().wait_for_count(), 4);
    Ok(())
}

#[test]
fn test_delivery_after_detach_is_invalid_operation() -> anyhow::Result<()> {
    // Arrange
    let notifier = Notifier::new(ScriptedSource::new([1]));
    let subscriber = ThresholdSubscriber::attach_to(&notifier, 1)?;
    notifier.notify_all(1)?;

    // Act - a host feeding it directly makes it try to detach twice
    let err = subscriber.borrow_mut().on_next(1).unwrap_err();

    // Assert
    assert!(matches!(err, NumGenError::InvalidOperation { .. }));
    Ok(())
}

#[test]
fn test_unbounded_subscriber_never_detaches() -> anyhow::Result<()> {
    // Arrange
    let notifier = Notifier::new(ScriptedSource::new([1]));
    let subscriber = ThresholdSubscriber::attach_to(&notifier, Threshold::UNBOUNDED)?;

    // Act
    for _ in 0..500 {
        notifier.notify_all(1)?;
    }

    // Assert
    assert!(subscriber.borrow().is_attached());
    assert_eq!(subscriber.borrow().received_count(), 500);
    Ok(())
}

#[test]
fn test_new_does_not_attach() {
    let notifier = Notifier::new(ScriptedSource::new([1]));
    let subscriber = ThresholdSubscriber::new(&notifier, 3);

    assert!(!subscriber.borrow().is_attached());
    assert!(notifier.is_empty());
}

#[test]
fn test_attach_to_twice_for_same_instance_is_duplicate() -> anyhow::Result<()> {
    let notifier = Notifier::new(ScriptedSource::new([1]));
    let subscriber = ThresholdSubscriber::attach_to(&notifier, 3)?;

    let err = notifier.attach(subscriber.clone()).unwrap_err();

    assert_eq!(err, NumGenError::DuplicateSubscriber);
    assert_eq!(notifier.subscriber_count(), 1);
    Ok(())
}

#[test]
fn test_display_summary() -> anyhow::Result<()> {
    let notifier = Notifier::new(ScriptedSource::new([1]));
    let subscriber = ThresholdSubscriber::attach_to(&notifier, 5)?;
    notifier.notify_all(1)?;
    notifier.notify_all(1)?;

    assert_eq!(
        subscriber.borrow().to_string(),
        "ThresholdSubscriber [received='2', wait_for='5']"
    );
    Ok(())
}
