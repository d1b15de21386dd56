//! Integration tests: ShakeDetector subscription lifecycle against a
//! recording sensor service.

use std::cell::RefCell;
use std::rc::Rc;

use diceroller::app::ports::SamplingRate;
use diceroller::shake::{Sample, SampleOutcome, ShakeDetector, ShakeFilter};

use crate::mock_platform::{MockSensors, SensorCall};

const MS: u64 = 1_000_000;

fn detector(sensors: MockSensors) -> ShakeDetector<MockSensors> {
    ShakeDetector::new(sensors, ShakeFilter::new(10.0, 100 * MS), SamplingRate::Ui)
}

#[test]
fn stop_listening_without_start_does_not_fail() {
    let mut d = detector(MockSensors::new(1));
    d.stop_listening();
    d.stop_listening();
    assert!(!d.is_listening());
    assert_eq!(d.sensors().registrations(), 0);
}

#[test]
fn restart_while_listening_re_registers() {
    let mut d = detector(MockSensors::new(1));
    d.start_listening(Box::new(|_force: f32| {}));
    d.start_listening(Box::new(|_force: f32| {}));
    assert_eq!(
        d.sensors().calls,
        vec![
            SensorCall::Register(SamplingRate::Ui),
            SensorCall::Unregister,
            SensorCall::Register(SamplingRate::Ui),
        ]
    );
}

#[test]
fn drop_releases_active_subscription() {
    let (sensors, log) = MockSensors::with_shared_log(1);
    let mut d = detector(sensors);
    d.start_listening(Box::new(|_force: f32| {}));
    drop(d);
    assert_eq!(
        *log.borrow(),
        vec![SensorCall::Register(SamplingRate::Ui), SensorCall::Unregister]
    );
}

#[test]
fn drop_after_stop_does_not_unregister_twice() {
    let (sensors, log) = MockSensors::with_shared_log(1);
    let mut d = detector(sensors);
    d.start_listening(Box::new(|_force: f32| {}));
    d.stop_listening();
    drop(d);
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn restart_resets_baseline() {
    let mut d = detector(MockSensors::new(1));
    d.start_listening(Box::new(|_force: f32| {}));
    d.on_sensor_changed(&Sample::new(0, 1.0, 1.0, 1.0));
    assert!(d.filter().is_tracking());

    d.stop_listening();
    d.start_listening(Box::new(|_force: f32| {}));
    assert!(!d.filter().is_tracking());
    assert_eq!(
        d.on_sensor_changed(&Sample::new(1, 50.0, 0.0, 0.0)),
        Some(SampleOutcome::Baseline)
    );
}

#[test]
fn samples_outside_session_are_dropped() {
    let mut d = detector(MockSensors::new(1));
    assert_eq!(d.on_sensor_changed(&Sample::new(0, 0.0, 0.0, 0.0)), None);
    assert!(!d.filter().is_tracking());
}

#[test]
fn no_event_before_second_sample() {
    let fired = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&fired);
    let mut d = detector(MockSensors::new(1));
    d.start_listening(Box::new(move |_force: f32| *counter.borrow_mut() += 1));

    let out = d.on_sensor_changed(&Sample::new(0, 100.0, 100.0, 100.0));
    assert_eq!(out, Some(SampleOutcome::Baseline));
    assert_eq!(*fired.borrow(), 0);
}

#[test]
fn listener_receives_force_of_exactly_eleven() {
    let forces = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&forces);
    let mut d = detector(MockSensors::new(1));
    d.start_listening(Box::new(move |force: f32| sink.borrow_mut().push(force)));

    d.sensors_mut().queue.push_back(Sample::new(0, 1.0, 2.0, 3.0));
    d.sensors_mut().queue.push_back(Sample::new(150 * MS, 12.0, 2.0, 3.0));
    assert_eq!(d.deliver_pending(), 1);
    assert_eq!(*forces.borrow(), vec![11.0]);
}

#[test]
fn unsupported_device_ignores_start() {
    let mut d = detector(MockSensors::new(0));
    assert!(!d.is_supported());
    d.start_listening(Box::new(|_force: f32| {}));
    assert!(!d.is_listening());
    assert!(d.sensors().calls.is_empty());
}

#[test]
fn support_answer_is_cached() {
    let mut d = detector(MockSensors::new(1));
    assert!(d.is_supported());
    d.sensors_mut().accelerometers = 0;
    assert!(d.is_supported());
}
