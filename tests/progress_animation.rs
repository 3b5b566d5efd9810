use import_dashboard_wasm::domain::import::{ANIMATION_STEPS, ProgressAnimator};
use quickcheck_macros::quickcheck;

fn run_to_completion(start: f64, target: f64) -> (Vec<f64>, u32) {
    let mut animator = ProgressAnimator::new(start, target);
    let mut values = Vec::new();
    let mut ticks = 0;
    loop {
        let frame = animator.tick();
        values.push(frame.value);
        ticks += 1;
        if frame.done {
            return (values, ticks);
        }
        assert!(ticks <= ANIMATION_STEPS, "animation never finished");
    }
}

#[test]
fn rises_in_equal_steps_and_lands_exactly_on_the_target() {
    let (values, ticks) = run_to_completion(0.0, 100.0);
    assert_eq!(ticks, ANIMATION_STEPS);
    assert!((values[0] - 5.0).abs() < 1e-9);
    assert_eq!(*values.last().unwrap(), 100.0);
    assert!(values.windows(2).all(|pair| pair[1] >= pair[0]));
}

#[test]
fn resuming_midway_eases_from_the_current_value() {
    let (values, _) = run_to_completion(40.0, 80.0);
    assert!((values[0] - 42.0).abs() < 1e-9);
    assert_eq!(*values.last().unwrap(), 80.0);
}

#[test]
fn a_lower_target_snaps_down_immediately() {
    let (values, ticks) = run_to_completion(100.0, 30.0);
    assert_eq!(ticks, 1);
    assert_eq!(values, vec![30.0]);
}

#[test]
fn equal_start_and_target_finishes_on_the_first_tick() {
    let (values, ticks) = run_to_completion(50.0, 50.0);
    assert_eq!(ticks, 1);
    assert_eq!(values, vec![50.0]);
}

#[test]
fn target_is_remembered_for_comparison_with_later_frames() {
    assert_eq!(ProgressAnimator::new(0.0, 55.0).target(), 55.0);
}

#[quickcheck]
fn never_overshoots_and_always_terminates(start: u8, target: u8) -> bool {
    let start = f64::from(start) / 2.55;
    let target = f64::from(target) / 2.55;
    let (values, ticks) = run_to_completion(start, target);
    ticks <= ANIMATION_STEPS
        && *values.last().unwrap() == target
        && values.iter().all(|&value| value <= start.max(target) + 1e-9)
}
